//! Light extraction from emissive-tagged geometry groups.
//!
//! Groups whose name contains [`LIGHT_GROUP_MARKER`] are reduced to compact
//! [`LightObject`] summaries while the loader walks their vertices: an
//! axis-aligned bounding box, the last-seen normal as a representative
//! outward direction, and an area derived from the bounding diagonal.
//!
//! The area formula (`diagonal squared x 0.5`) is a known approximation of
//! the true polygon area, preserved as-is for renderer compatibility.

/// Group-name substring that marks geometry as a light source.
pub const LIGHT_GROUP_MARKER: &str = "lightquad";

/// A derived, read-only light summary. Not part of the render geometry.
///
/// # Memory Layout
///
/// `#[repr(C)]` with explicit padding so the list can be uploaded to a GPU
/// buffer unchanged.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightObject {
    /// Minimum corner of the emitting geometry's bounds (w = 1).
    pub world_pos_min: [f32; 4],
    /// Maximum corner of the emitting geometry's bounds (w = 1).
    pub world_pos_max: [f32; 4],
    /// Representative outward normal (w = 0).
    pub world_direction: [f32; 4],
    /// Approximate emitting area.
    pub area: f32,
    _padding: [f32; 3],
}

/// Accumulates bounds and direction for one light group during vertex
/// traversal.
///
/// Starts from infinite sentinel bounds; a group that never sees a vertex
/// stays invalid and [`finish`](Self::finish) returns `None` rather than a
/// degenerate light at the sentinel coordinates.
#[derive(Debug)]
pub struct LightAccumulator {
    min: [f32; 3],
    max: [f32; 3],
    direction: [f32; 3],
}

impl LightAccumulator {
    pub fn new() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            direction: [0.0; 3],
        }
    }

    /// Folds one vertex position into the bounds.
    pub fn add_position(&mut self, position: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(position[axis]);
            self.max[axis] = self.max[axis].max(position[axis]);
        }
    }

    /// Records the latest normal seen in the group.
    pub fn set_direction(&mut self, normal: [f32; 3]) {
        self.direction = normal;
    }

    /// Emits the light summary, or `None` if the group had no vertices.
    pub fn finish(&self) -> Option<LightObject> {
        if self.min[0] > self.max[0] {
            return None;
        }

        let diagonal = ((self.max[0] - self.min[0]).powi(2)
            + (self.max[1] - self.min[1]).powi(2)
            + (self.max[2] - self.min[2]).powi(2))
        .sqrt();

        Some(LightObject {
            world_pos_min: [self.min[0], self.min[1], self.min[2], 1.0],
            world_pos_max: [self.max[0], self.max[1], self.max[2], 1.0],
            world_direction: [self.direction[0], self.direction[1], self.direction[2], 0.0],
            area: diagonal * diagonal * 0.5,
            _padding: [0.0; 3],
        })
    }
}

impl Default for LightAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
