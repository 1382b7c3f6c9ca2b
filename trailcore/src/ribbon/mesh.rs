use bevy_math::{Vec3, Vec4};

/// CPU-side ribbon buffers with a fixed triangle-list topology.
///
/// Each of the `granularity` cross-sections contributes three vertices (left
/// edge, center, right edge), and every gap between neighboring sections is
/// filled with two quads (left half and right half of the ribbon), each split
/// into two triangles. The topology is written once; ticks rewrite only the
/// vertex attributes in place.
#[derive(Debug, Clone)]
pub struct RibbonGeometry {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
    granularity: usize,
}

impl RibbonGeometry {
    pub fn new(granularity: usize) -> Self {
        let granularity = granularity.max(2);
        let vertex_count = granularity * 3;

        let mut indices = Vec::with_capacity((granularity - 1) * 12);
        for section in 0..granularity - 1 {
            let base = (section * 3) as u32;
            let next = base + 3;
            // Left half of the ribbon.
            indices.extend_from_slice(&[next, next + 1, base]);
            indices.extend_from_slice(&[next + 1, base + 1, base]);
            // Right half.
            indices.extend_from_slice(&[next + 1, next + 2, base + 1]);
            indices.extend_from_slice(&[next + 2, base + 2, base + 1]);
        }

        Self {
            positions: vec![[0.0; 3]; vertex_count],
            uvs: vec![[0.0; 2]; vertex_count],
            colors: vec![[1.0; 4]; vertex_count],
            indices,
            granularity,
        }
    }

    pub fn granularity(&self) -> usize {
        self.granularity
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Rewrite one cross-section's vertices. `t` becomes the V texture
    /// coordinate; U runs 0 / 0.5 / 1 across left, center, right.
    pub fn write_section(
        &mut self,
        section: usize,
        t: f32,
        left: Vec3,
        center: Vec3,
        right: Vec3,
        color: Vec4,
    ) {
        let base = section * 3;
        let color = color.to_array();

        self.positions[base] = left.to_array();
        self.positions[base + 1] = center.to_array();
        self.positions[base + 2] = right.to_array();

        self.uvs[base] = [0.0, t];
        self.uvs[base + 1] = [0.5, t];
        self.uvs[base + 2] = [1.0, t];

        self.colors[base] = color;
        self.colors[base + 1] = color;
        self.colors[base + 2] = color;
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}
