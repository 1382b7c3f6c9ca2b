use bevy_math::Vec3;

/// Uniform 4-point Catmull-Rom interpolation at `t` in [0,1] between `p1`
/// and `p2`, with `p0`/`p3` shaping the tangents.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * (p1 - p2) + p3 - p0) * t3)
}
