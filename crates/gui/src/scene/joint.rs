//! Joint articulation state

use glam::Mat4;
use shared::{JointAxis, JointRange};

/// One rotation axis of a joint: current angle plus its bounds,
/// all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    pub angle: f32,
    pub initial: f32,
    pub min: f32,
    pub max: f32,
}

impl AxisState {
    pub fn from_range(range: JointRange) -> Self {
        let initial = range.initial.clamp(range.min, range.max);
        Self {
            angle: initial,
            initial,
            min: range.min,
            max: range.max,
        }
    }
}

/// Articulation state of a joint node: per-axis angles and limits,
/// plus which axis a horizontal drag bends and whether a vertical
/// drag swings the alternate axis.
#[derive(Debug, Clone, PartialEq)]
pub struct JointState {
    pub x: AxisState,
    pub y: AxisState,
    pub bend_axis: JointAxis,
    pub swing: bool,
}

impl JointState {
    pub fn new(x: JointRange, y: JointRange, bend_axis: JointAxis, swing: bool) -> Self {
        Self {
            x: AxisState::from_range(x),
            y: AxisState::from_range(y),
            bend_axis,
            swing,
        }
    }

    fn axis_mut(&mut self, axis: JointAxis) -> &mut AxisState {
        match axis {
            JointAxis::X => &mut self.x,
            JointAxis::Y => &mut self.y,
        }
    }

    /// Rotate one axis by `delta` degrees, clamped into [min, max].
    /// Out-of-range requests are clamped, never rejected.
    pub fn rotate(&mut self, axis: JointAxis, delta: f32) {
        let a = self.axis_mut(axis);
        a.angle = (a.angle + delta).clamp(a.min, a.max);
    }

    /// Current (x, y) angles in degrees.
    pub fn angles(&self) -> [f32; 2] {
        [self.x.angle, self.y.angle]
    }

    /// Restore a recorded (x, y) angle pair, clamped into range.
    pub fn set_angles(&mut self, angles: [f32; 2]) {
        self.x.angle = angles[0].clamp(self.x.min, self.x.max);
        self.y.angle = angles[1].clamp(self.y.min, self.y.max);
    }

    /// Restore both axes to their load-time angles.
    pub fn reset(&mut self) {
        self.x.angle = self.x.initial;
        self.y.angle = self.y.initial;
    }

    /// Local rotation contributed by the current angles, composed
    /// after the node's static transform during traversal.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x.angle.to_radians())
            * Mat4::from_rotation_y(self.y.angle.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f32, max: f32) -> JointRange {
        JointRange {
            initial: 0.0,
            min,
            max,
        }
    }

    #[test]
    fn test_rotate_clamps_to_max() {
        let mut j = JointState::new(range(-45.0, 45.0), range(0.0, 0.0), JointAxis::X, false);
        j.rotate(JointAxis::X, 60.0);
        assert_eq!(j.x.angle, 45.0);
    }

    #[test]
    fn test_rotate_clamps_to_min() {
        let mut j = JointState::new(range(-30.0, 30.0), range(0.0, 0.0), JointAxis::X, false);
        j.rotate(JointAxis::X, -100.0);
        assert_eq!(j.x.angle, -30.0);
    }

    #[test]
    fn test_angle_stays_in_range_after_many_rotates() {
        let mut j = JointState::new(range(-20.0, 50.0), range(-10.0, 10.0), JointAxis::X, false);
        for i in 0..100 {
            let delta = if i % 3 == 0 { 17.0 } else { -23.0 };
            j.rotate(JointAxis::X, delta);
            j.rotate(JointAxis::Y, delta * 0.5);
            assert!(j.x.angle >= -20.0 && j.x.angle <= 50.0);
            assert!(j.y.angle >= -10.0 && j.y.angle <= 10.0);
        }
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut j = JointState::new(
            JointRange {
                initial: 10.0,
                min: -45.0,
                max: 45.0,
            },
            range(-5.0, 5.0),
            JointAxis::X,
            false,
        );
        j.rotate(JointAxis::X, 30.0);
        j.rotate(JointAxis::Y, 3.0);
        j.reset();
        assert_eq!(j.angles(), [10.0, 0.0]);
    }

    #[test]
    fn test_initial_clamped_into_range() {
        let j = JointState::new(
            JointRange {
                initial: 90.0,
                min: -45.0,
                max: 45.0,
            },
            range(0.0, 0.0),
            JointAxis::X,
            false,
        );
        assert_eq!(j.x.angle, 45.0);
        assert_eq!(j.x.initial, 45.0);
    }

    #[test]
    fn test_rotation_matrix_identity_at_zero() {
        let j = JointState::new(range(-45.0, 45.0), range(-45.0, 45.0), JointAxis::X, false);
        assert!(j
            .rotation_matrix()
            .abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
