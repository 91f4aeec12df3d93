//! Tests for the waypoint cycle.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::waypoints::WaypointCycle;
    use crate::error::ConfigError;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn test_empty_waypoints_rejected() {
        let result = WaypointCycle::new(Vec::new());
        assert!(matches!(result, Err(ConfigError::EmptyWaypoints)));
    }

    #[test]
    fn test_starts_at_first_point() {
        let cycle = WaypointCycle::new(square()).unwrap();
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.current(), Vec3::ZERO);
    }

    #[test]
    fn test_next_point_advances_by_one() {
        let mut cycle = WaypointCycle::new(square()).unwrap();
        let next = cycle.next_point();
        assert_eq!(cycle.index(), 1);
        assert_eq!(next, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_cycle_closes_after_len_steps() {
        let mut cycle = WaypointCycle::new(square()).unwrap();
        cycle.next_point(); // стартуем не с нуля

        let start = cycle.index();
        for step in 1..=cycle.len() {
            cycle.next_point();
            assert!(cycle.index() < cycle.len());
            if step < cycle.len() {
                assert_ne!(cycle.index(), start);
            }
        }
        assert_eq!(cycle.index(), start);
    }

    #[test]
    fn test_single_point_cycle_stays_put() {
        let mut cycle = WaypointCycle::new(vec![Vec3::X]).unwrap();
        assert_eq!(cycle.next_point(), Vec3::X);
        assert_eq!(cycle.index(), 0);
    }
}
