//! Tests for the perception query.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::components::PerceptionConfig;
    use crate::ai::perception::perceive;
    use crate::ai::world::{Candidate, ObstacleBox, SpatialQuery, StaticWorld, TargetKind};

    // Агент в начале координат смотрит вдоль -Z
    const FORWARD: Vec3 = Vec3::NEG_Z;

    fn config(radius: f32, angle: f32, occlusion: bool) -> PerceptionConfig {
        PerceptionConfig {
            view_radius: radius,
            view_angle_degrees: angle,
            occlusion_enabled: occlusion,
        }
    }

    fn wall_between() -> ObstacleBox {
        // Стена поперёк линии взгляда на z = -3
        ObstacleBox::from_center_half_extents(Vec3::new(0.0, 0.0, -3.0), Vec3::new(2.0, 2.0, 0.25))
    }

    #[test]
    fn test_target_ahead_detected() {
        let world = StaticWorld::new().with_target(TargetKind::Player, Vec3::new(0.0, 0.0, -5.0));
        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);

        assert!(result.detected);
        assert_eq!(result.target_position, Some(Vec3::new(0.0, 0.0, -5.0)));
        assert_eq!(result.target_kind, Some(TargetKind::Player));
    }

    #[test]
    fn test_target_outside_radius_not_detected() {
        for distance in [15.01, 20.0, 100.0] {
            let world = StaticWorld::new().with_target(TargetKind::Player, Vec3::new(0.0, 0.0, -distance));
            let result = perceive(&config(15.0, 90.0, false), Vec3::ZERO, FORWARD, &world);
            assert!(!result.detected, "distance {} should be out of range", distance);
        }
    }

    #[test]
    fn test_target_outside_angle_not_detected() {
        // ~50° от forward при полном угле 90°
        let edge = Vec3::new(-6.0, 0.0, -5.0);
        let side = Vec3::new(5.0, 0.0, 0.0);
        let behind = Vec3::new(0.0, 0.0, 5.0);

        for position in [edge, side, behind] {
            let world = StaticWorld::new().with_target(TargetKind::Player, position);
            let result = perceive(&config(15.0, 90.0, false), Vec3::ZERO, FORWARD, &world);
            assert!(!result.detected, "{:?} should be outside the cone", position);
        }
    }

    #[test]
    fn test_target_exactly_on_cone_edge_not_detected() {
        // Ровно 45° от forward при полном угле 90°
        let edges = [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(-3.0, 0.0, -3.0),
            Vec3::new(7.0, 0.0, -7.0),
            Vec3::new(1.0, 0.0, -1.0),
        ];

        for position in edges {
            let world = StaticWorld::new().with_target(TargetKind::Player, position);
            let result = perceive(&config(15.0, 90.0, false), Vec3::ZERO, FORWARD, &world);
            assert!(!result.detected, "{:?} on the cone edge must not be seen", position);
        }
    }

    #[test]
    fn test_target_just_inside_angle_detected() {
        // ~40° от forward
        let position = Vec3::new(-4.0, 0.0, -5.0);
        let world = StaticWorld::new().with_target(TargetKind::Player, position);
        let result = perceive(&config(15.0, 90.0, false), Vec3::ZERO, FORWARD, &world);
        assert!(result.detected);
    }

    #[test]
    fn test_full_circle_disables_angle_filter() {
        let world = StaticWorld::new().with_target(TargetKind::Player, Vec3::new(0.0, 0.0, 5.0));
        let result = perceive(&config(15.0, 360.0, false), Vec3::ZERO, FORWARD, &world);
        assert!(result.detected);
    }

    #[test]
    fn test_zero_radius_detects_nothing() {
        let world = StaticWorld::new().with_target(TargetKind::Player, Vec3::ZERO);
        let result = perceive(&config(0.0, 360.0, false), Vec3::ZERO, FORWARD, &world);
        assert!(!result.detected);
        assert_eq!(result.target_position, None);
    }

    #[test]
    fn test_occluded_target_depends_on_flag() {
        let world = StaticWorld::new()
            .with_target(TargetKind::Player, Vec3::new(0.0, 0.0, -5.0))
            .with_obstacle(wall_between());

        let blocked = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);
        assert!(!blocked.detected);

        let unblocked = perceive(&config(15.0, 90.0, false), Vec3::ZERO, FORWARD, &world);
        assert!(unblocked.detected);
    }

    #[test]
    fn test_obstacle_behind_target_does_not_occlude() {
        let world = StaticWorld::new()
            .with_target(TargetKind::Player, Vec3::new(0.0, 0.0, -2.0))
            .with_obstacle(wall_between());

        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);
        assert!(result.detected);
    }

    #[test]
    fn test_closest_candidate_wins() {
        let world = StaticWorld::new()
            .with_target(TargetKind::Player, Vec3::new(0.0, 0.0, -8.0))
            .with_target(TargetKind::Pickup, Vec3::new(0.0, 0.0, -3.0));

        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);
        assert_eq!(result.target_kind, Some(TargetKind::Pickup));
        assert_eq!(result.target_position, Some(Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_closest_visible_candidate_wins_over_occluded_closer_one() {
        let world = StaticWorld::new()
            .with_target(TargetKind::Pickup, Vec3::new(0.0, 0.0, -5.0))
            .with_target(TargetKind::Player, Vec3::new(-7.0, 0.0, -9.0))
            .with_obstacle(wall_between());

        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);
        assert_eq!(result.target_kind, Some(TargetKind::Player));
    }

    #[test]
    fn test_tie_keeps_enumeration_order() {
        let world = StaticWorld::new()
            .with_target(TargetKind::Pickup, Vec3::new(1.0, 0.0, -4.0))
            .with_target(TargetKind::Player, Vec3::new(-1.0, 0.0, -4.0));

        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &world);
        assert_eq!(result.target_kind, Some(TargetKind::Pickup));
    }

    /// Collaborator, игнорирующий радиус — perception всё равно режет по view_radius
    struct SloppyQuery(Vec<Candidate>);

    impl SpatialQuery for SloppyQuery {
        fn candidates_within_radius(&self, _origin: Vec3, _radius: f32, _kinds: &[TargetKind]) -> Vec<Candidate> {
            self.0.clone()
        }

        fn is_occluded(&self, _origin: Vec3, _target: Vec3, _max_distance: f32) -> bool {
            false
        }
    }

    #[test]
    fn test_radius_enforced_even_if_collaborator_overreports() {
        let query = SloppyQuery(vec![Candidate {
            position: Vec3::new(0.0, 0.0, -50.0),
            kind: TargetKind::Player,
        }]);
        let result = perceive(&config(15.0, 90.0, true), Vec3::ZERO, FORWARD, &query);
        assert!(!result.detected);
    }
}
