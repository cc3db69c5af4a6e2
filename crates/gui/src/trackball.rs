//! Virtual-sphere trackball: maps a 2D drag to a 3D rotation.

use glam::{Mat4, Vec2, Vec3};

/// Inside this fraction of the radius the point projects onto the
/// sphere; beyond it, onto the hyperbolic sheet, so drags that leave
/// the sphere's silhouette still rotate smoothly.
const SHEET_CROSSOVER: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Map a viewport-centred point onto the virtual sphere of the given
/// radius (hyperbolic sheet outside the crossover).
fn map_to_sphere(p: Vec2, radius: f32) -> Vec3 {
    let d = p.length();
    let z = if d < radius * SHEET_CROSSOVER {
        (radius * radius - d * d).sqrt()
    } else {
        (radius * radius * 0.5) / d
    };
    Vec3::new(p.x, p.y, z)
}

/// Rotation axis and angle for a drag from `prev` to `cur`, both in
/// viewport-centred coordinates (+x right, +y up). Returns `None` for
/// a degenerate drag (no motion, or a non-positive radius).
pub fn compute_rotation(prev: Vec2, cur: Vec2, radius: f32) -> Option<(Vec3, f32)> {
    if radius <= 0.0 || prev == cur {
        return None;
    }
    let a = map_to_sphere(prev, radius);
    let b = map_to_sphere(cur, radius);

    let axis = a.cross(b);
    if axis.length_squared() < f32::EPSILON {
        return None;
    }
    // Clamp before acos: floating-point overshoot past ±1 would NaN.
    let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
    Some((axis.normalize(), cos.acos()))
}

/// Incremental rotation matrix for a drag. Degenerate drags yield the
/// identity, not an error. The caller pre-multiplies this onto the
/// accumulated orientation so drags compose in world space.
pub fn rotation_matrix(prev: Vec2, cur: Vec2, radius: f32) -> Mat4 {
    match compute_rotation(prev, cur, radius) {
        Some((axis, angle)) => Mat4::from_axis_angle(axis, angle),
        None => Mat4::IDENTITY,
    }
}
