//! Tests for the locomotion adapter.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::locomotion::{Locomotion, LocomotionAdapter};
    use crate::ai::test_support::FakeNav;

    #[derive(Default)]
    struct CountingNav {
        destination_calls: usize,
        speed_calls: usize,
        destination: Vec3,
        speed: f32,
        remaining: f32,
    }

    impl Locomotion for CountingNav {
        fn set_destination(&mut self, destination: Vec3) {
            self.destination_calls += 1;
            self.destination = destination;
        }

        fn set_speed(&mut self, speed: f32) {
            self.speed_calls += 1;
            self.speed = speed;
        }

        fn remaining_distance(&self) -> f32 {
            self.remaining
        }

        fn has_destination(&self) -> bool {
            self.destination_calls > 0
        }
    }

    #[test]
    fn test_same_destination_forwarded_once() {
        let mut nav = CountingNav::default();
        let mut adapter = LocomotionAdapter::new();

        assert!(adapter.set_destination(&mut nav, Vec3::X));
        assert!(!adapter.set_destination(&mut nav, Vec3::X));

        assert_eq!(nav.destination_calls, 1);
        assert_eq!(nav.destination, Vec3::X);
    }

    #[test]
    fn test_new_destination_forwarded() {
        let mut nav = CountingNav::default();
        let mut adapter = LocomotionAdapter::new();

        adapter.set_destination(&mut nav, Vec3::X);
        adapter.set_destination(&mut nav, Vec3::Z);

        assert_eq!(nav.destination_calls, 2);
        assert_eq!(adapter.destination(), Some(Vec3::Z));
    }

    #[test]
    fn test_stop_sets_zero_speed_once() {
        let mut nav = CountingNav::default();
        let mut adapter = LocomotionAdapter::new();

        adapter.move_at(&mut nav, 6.0);
        adapter.stop(&mut nav);
        adapter.stop(&mut nav);

        assert_eq!(nav.speed_calls, 2);
        assert_eq!(nav.speed, 0.0);
    }

    #[test]
    fn test_invalidate_forces_resend() {
        let mut nav = CountingNav::default();
        let mut adapter = LocomotionAdapter::new();

        adapter.set_destination(&mut nav, Vec3::X);
        adapter.invalidate();
        adapter.set_destination(&mut nav, Vec3::X);

        assert_eq!(nav.destination_calls, 2);
    }

    #[test]
    fn test_collaborator_reset_forces_resend() {
        let mut nav = FakeNav::far();
        let mut adapter = LocomotionAdapter::new();

        adapter.set_destination(&mut nav, Vec3::X);
        adapter.move_at(&mut nav, 6.0);

        // Host подменил локомоцию: destination и speed потеряны
        nav.destination = None;
        nav.speed = 0.0;

        assert!(adapter.set_destination(&mut nav, Vec3::X));
        assert!(adapter.move_at(&mut nav, 6.0));
        assert_eq!(nav.destination, Some(Vec3::X));
        assert_eq!(nav.speed, 6.0);
        assert_eq!(nav.destination_calls, 2);
    }

    #[test]
    fn test_arrival_is_inclusive() {
        let mut nav = CountingNav::default();
        let adapter = LocomotionAdapter::new();

        nav.remaining = 0.3;
        assert!(adapter.has_arrived(&nav, 0.3));

        nav.remaining = 0.31;
        assert!(!adapter.has_arrived(&nav, 0.3));
    }
}
