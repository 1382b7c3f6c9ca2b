use bevy_math::{Vec3, Vec4};

use super::history::{Sample, SampleHistory};
use super::mesh::RibbonGeometry;
use super::spline::catmull_rom;
use crate::config::{TrailSpec, TrailSpecError};

/// Converts a sparse, irregularly spaced history of two moving anchor points
/// into a smooth, constant-density ribbon.
///
/// All buffers (sample ring, distance cache, vertex attributes) are sized
/// once at construction and rewritten in place every tick; a tick performs no
/// allocation.
#[derive(Debug, Clone)]
pub struct TrailRibbon {
    history: SampleHistory,
    distances: Vec<f32>,
    total_distance: f32,
    geometry: RibbonGeometry,
    granularity: usize,
    whitestep: f32,
    color: Vec4,
}

impl TrailRibbon {
    pub fn new(spec: &TrailSpec) -> Result<Self, TrailSpecError> {
        spec.validate()?;
        Ok(Self {
            history: SampleHistory::new(spec.trail_length),
            distances: vec![0.0; spec.trail_length],
            total_distance: 0.0,
            geometry: RibbonGeometry::new(spec.granularity),
            granularity: spec.granularity,
            whitestep: spec.whitestep.clamp(0.0, 1.0),
            color: spec.color_vec4(),
        })
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    /// Cumulative arc-length per populated sample, measured from the tip.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn geometry(&self) -> &RibbonGeometry {
        &self.geometry
    }

    /// Pre-fill the history with a stationary sample. Called once when the
    /// warm-up period ends so the first visible frames interpolate against a
    /// fully populated buffer.
    pub fn prime(&mut self, sample: Sample) {
        self.history.fill(sample);
    }

    /// One simulation step.
    ///
    /// In relative mode the caller stores `sample` with the reference-frame
    /// origin already subtracted and passes that origin as `frame_offset`, so
    /// interpolated centers are re-expanded into current world space. Outside
    /// relative mode `frame_offset` is zero.
    ///
    /// `width` is the anchors' *current* separation; it is applied uniformly
    /// to every cross-section rather than the separation recorded with each
    /// sample.
    pub fn tick(&mut self, sample: Sample, width: f32, frame_offset: Vec3) {
        self.history.push(sample);
        self.recalculate_distances();
        self.rebuild_geometry(width, frame_offset);
    }

    fn recalculate_distances(&mut self) {
        self.distances[0] = 0.0;
        self.total_distance = 0.0;
        for i in 1..self.history.len() {
            let prev = self.history.get(i as isize - 1).center();
            let cur = self.history.get(i as isize).center();
            self.total_distance += cur.distance(prev);
            self.distances[i] = self.total_distance;
        }
    }

    /// Locate the segment containing normalized arc-length `t` and the local
    /// fraction within it, by linear scan of the cumulative distances.
    fn segment_at(&self, t: f32) -> (isize, f32) {
        let target = t * self.total_distance;
        for i in 0..self.history.len() {
            if self.distances[i] >= target {
                if i == 0 {
                    return (0, 0.0);
                }
                let prev = self.distances[i - 1];
                let segment = self.distances[i] - prev;
                let local = if segment > 0.0 {
                    (target - prev) / segment
                } else {
                    0.0
                };
                return (i as isize - 1, local);
            }
        }
        (self.history.len() as isize - 1, 0.0)
    }

    fn interpolate(&self, t: f32, up: bool) -> Vec3 {
        if self.history.len() < 2 {
            let sample = self.history.get(0);
            return if up { sample.up() } else { sample.center() };
        }

        let t = t.clamp(0.0, 1.0);
        let (index, local) = self.segment_at(t);

        // Out-of-range neighbors clamp to the boundary sample, which turns
        // the end segments into splines with repeated control points.
        let s0 = self.history.get(index - 1);
        let s1 = self.history.get(index);
        let s2 = self.history.get(index + 1);
        let s3 = self.history.get(index + 2);

        if up {
            catmull_rom(s0.up(), s1.up(), s2.up(), s3.up(), local)
        } else {
            catmull_rom(s0.center(), s1.center(), s2.center(), s3.center(), local)
        }
    }

    /// Interpolated spine position at normalized arc-length `t`
    /// (0 = tip / newest sample, 1 = oldest retained sample).
    pub fn interpolate_position(&self, t: f32) -> Vec3 {
        self.interpolate(t, false)
    }

    /// Interpolated edge-separation vector at normalized arc-length `t`.
    pub fn interpolate_up(&self, t: f32) -> Vec3 {
        self.interpolate(t, true)
    }

    fn rebuild_geometry(&mut self, width: f32, frame_offset: Vec3) {
        let half_width = width * 0.5;
        let denom = (self.granularity - 1).max(1) as f32;
        for section in 0..self.granularity {
            let t = section as f32 / denom;
            let center = self.interpolate(t, false) + frame_offset;
            let up = self.interpolate(t, true).normalize_or_zero();
            let color = self.section_color(t);
            self.geometry.write_section(
                section,
                t,
                center + up * half_width,
                center,
                center - up * half_width,
                color,
            );
        }
    }

    fn section_color(&self, t: f32) -> Vec4 {
        if self.whitestep > 0.0 && t < self.whitestep {
            Vec4::ONE.lerp(self.color, t / self.whitestep)
        } else {
            self.color
        }
    }
}
