use bevy_math::Vec3;

/// One recorded pair of edge-anchor world positions at a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub point_start: Vec3,
    pub point_end: Vec3,
}

impl Sample {
    pub const fn new(point_start: Vec3, point_end: Vec3) -> Self {
        Self {
            point_start,
            point_end,
        }
    }

    /// Midpoint between the two anchors; the ribbon's spine runs through these.
    pub fn center(&self) -> Vec3 {
        (self.point_start + self.point_end) * 0.5
    }

    /// Edge-separation vector, used as the ribbon's local up direction.
    /// This is not a surface normal.
    pub fn up(&self) -> Vec3 {
        self.point_end - self.point_start
    }

    /// Shift both anchors by `offset` (relative-mode storage).
    pub fn offset_by(&self, offset: Vec3) -> Self {
        Self {
            point_start: self.point_start + offset,
            point_end: self.point_end + offset,
        }
    }
}

/// Fixed-capacity ring of motion samples, newest first.
///
/// The head walks *backward* through physical storage as samples arrive, so
/// logical index 0 is always the most recent sample (the tip of the trail)
/// and higher indices are progressively older. Reads clamp the index to the
/// populated range, which lets the spline evaluator reuse boundary samples as
/// virtual neighbors without branching.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: Vec<Sample>,
    head: usize,
    count: usize,
}

impl SampleHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: vec![Sample::default(); capacity],
            head: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pre-fill every slot with `sample` and saturate the count. Used when a
    /// trail finishes its warm-up so the first real ticks interpolate against
    /// a stationary history instead of uninitialized geometry.
    pub fn fill(&mut self, sample: Sample) {
        for slot in &mut self.samples {
            *slot = sample;
        }
        self.head = 0;
        self.count = self.capacity();
    }

    /// Overwrite the slot the head points at with the current tick's sample.
    pub fn write_head(&mut self, sample: Sample) {
        self.samples[self.head] = sample;
    }

    /// Move the head one slot backward, duplicating the newest sample into
    /// the freshly vacated slot as the placeholder for the next write, and
    /// grow the populated count until it saturates at capacity.
    pub fn advance(&mut self) {
        let capacity = self.capacity();
        self.head = (self.head + capacity - 1) % capacity;
        self.samples[self.head] = self.samples[(self.head + 1) % capacity];
        if self.count < capacity {
            self.count += 1;
        }
    }

    /// Record one sample: vacate the head slot, then write into it.
    pub fn push(&mut self, sample: Sample) {
        self.advance();
        self.write_head(sample);
    }

    /// Sample at logical `index` (0 = newest), clamped to the populated range.
    pub fn get(&self, index: isize) -> Sample {
        let max = self.count.saturating_sub(1) as isize;
        let index = index.clamp(0, max) as usize;
        self.samples[(self.head + index) % self.capacity()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(z: f32) -> Sample {
        Sample::new(Vec3::new(0.0, 0.0, z), Vec3::new(0.0, 1.0, z))
    }

    #[test]
    fn count_grows_then_saturates() {
        let mut history = SampleHistory::new(4);
        for i in 0..4 {
            assert_eq!(history.len(), i);
            history.push(sample_at(i as f32));
        }
        assert_eq!(history.len(), 4);
        for i in 4..9 {
            history.push(sample_at(i as f32));
            assert_eq!(history.len(), 4);
        }
    }

    #[test]
    fn window_holds_most_recent_samples_newest_first() {
        let mut history = SampleHistory::new(4);
        for i in 0..7 {
            history.push(sample_at(i as f32));
        }
        for (logical, z) in [(0, 6.0), (1, 5.0), (2, 4.0), (3, 3.0)] {
            assert_eq!(history.get(logical).center().z, z);
        }
    }

    #[test]
    fn advance_duplicates_newest_into_the_vacated_slot() {
        let mut history = SampleHistory::new(3);
        history.push(sample_at(1.0));
        history.push(sample_at(2.0));
        // The placeholder stands in until the next write lands on it.
        history.advance();
        assert_eq!(history.get(0), history.get(1));
        assert_eq!(history.get(0).center().z, 2.0);
    }

    #[test]
    fn reads_clamp_to_populated_range() {
        let mut history = SampleHistory::new(4);
        history.push(sample_at(1.0));
        assert_eq!(history.get(-3), history.get(0));
        assert_eq!(history.get(10), history.get(0));
    }

    #[test]
    fn fill_saturates_with_one_sample() {
        let mut history = SampleHistory::new(5);
        history.fill(sample_at(7.0));
        assert_eq!(history.len(), 5);
        for i in 0..5 {
            assert_eq!(history.get(i).center().z, 7.0);
        }
    }

    #[test]
    fn capacity_has_a_floor_of_one() {
        let history = SampleHistory::new(0);
        assert_eq!(history.capacity(), 1);
    }
}
