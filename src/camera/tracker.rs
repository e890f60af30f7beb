//! Constant-radius correction keeping the orbit camera around a moving target.
use bevy::prelude::*;

/// Re-projects the orbit camera onto a sphere of `desired_radius` around the
/// target every world tick, keeping the direction the camera already has.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitTracker {
    desired_radius: f32,
    /// Last usable unit direction from target to camera.
    last_direction: Vec3,
}

impl OrbitTracker {
    /// `fallback_direction` is used until the first valid direction is seen.
    pub fn new(desired_radius: f32, fallback_direction: Vec3) -> Self {
        Self {
            desired_radius,
            last_direction: fallback_direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    pub fn desired_radius(&self) -> f32 {
        self.desired_radius
    }

    /// Returns the corrected camera position. A camera sitting on the target
    /// keeps the previous direction.
    pub fn correct(&mut self, camera: Vec3, target: Vec3) -> Vec3 {
        if let Some(direction) = (camera - target).try_normalize() {
            self.last_direction = direction;
        }
        target + self.last_direction * self.desired_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn stationary_target_leaves_camera_in_place() {
        let mut tracker = OrbitTracker::new(10.0, Vec3::X);
        let target = Vec3::new(2.0, 1.0, -3.0);
        let mut camera = target + Vec3::new(6.0, 0.0, 8.0);

        for _ in 0..100 {
            let next = tracker.correct(camera, target);
            assert!((next - camera).length() < EPSILON);
            camera = next;
        }
    }

    #[test]
    fn moving_target_keeps_radius_along_new_direction() {
        let radius = 454.0_f32.sqrt();
        let mut tracker = OrbitTracker::new(radius, Vec3::X);
        let delta = Vec3::new(0.5, 0.0, 0.25);
        let mut target = Vec3::ZERO;
        let mut camera = target + Vec3::new(-15.0, 2.0, -15.0);

        for _ in 0..64 {
            target += delta;
            let expected = target + (camera - target).normalize() * radius;
            camera = tracker.correct(camera, target);

            assert!((camera - expected).length() < EPSILON);
            assert!((camera.distance(target) - radius).abs() < EPSILON);
        }
    }

    #[test]
    fn radius_is_restored_after_drift() {
        let mut tracker = OrbitTracker::new(5.0, Vec3::X);
        let corrected = tracker.correct(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
        assert!((corrected - Vec3::new(0.0, 0.0, 5.0)).length() < EPSILON);
    }

    #[test]
    fn coincident_camera_holds_previous_direction() {
        let mut tracker = OrbitTracker::new(4.0, Vec3::X);
        let first = tracker.correct(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO);
        assert!((first - Vec3::new(0.0, 4.0, 0.0)).length() < EPSILON);

        let target = Vec3::new(1.0, 1.0, 1.0);
        let degenerate = tracker.correct(target, target);
        assert!(degenerate.is_finite());
        assert!((degenerate - (target + Vec3::Y * 4.0)).length() < EPSILON);
    }

    #[test]
    fn coincident_camera_before_any_direction_uses_fallback() {
        let mut tracker = OrbitTracker::new(2.0, Vec3::new(-15.0, 2.0, -15.0));
        let corrected = tracker.correct(Vec3::ZERO, Vec3::ZERO);
        assert!(corrected.is_finite());
        assert!((corrected.length() - 2.0).abs() < EPSILON);
        assert!(corrected.x < 0.0 && corrected.z < 0.0);
    }
}
