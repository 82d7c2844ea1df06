//! Circle contact primitives
//!
//! Everything on the field is a circle: agents are points with a padded
//! contact zone, obstacles and the objective are discs.

use glam::Vec2;

use crate::{length, normalize, perpendicular, subtract};

/// Result of a contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the point is inside the zone
    pub hit: bool,
    /// Direction from the zone centre to the point (zero if they coincide)
    pub normal: Vec2,
    /// How far inside the zone the point is
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether `point` lies strictly inside the disc at `center`
pub fn point_in_zone(point: Vec2, center: Vec2, zone_radius: f32) -> CollisionResult {
    let separation = subtract(point, center);
    let penetration = zone_radius - length(separation);

    if penetration > 0.0 {
        CollisionResult {
            hit: true,
            normal: normalize(separation),
            penetration,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Soft positional correction: move a point out along the contact normal
/// by `factor` of its penetration.
///
/// A point sitting exactly on the centre has no normal and stays put.
#[inline]
pub fn push_out(point: Vec2, contact: &CollisionResult, factor: f32) -> Vec2 {
    point + contact.normal * (contact.penetration * factor)
}

/// Unit tangent for circling `center` counter-clockwise from `point`
///
/// Perpendicular to the point-to-centre vector; zero if they coincide.
#[inline]
pub fn orbit_tangent(point: Vec2, center: Vec2) -> Vec2 {
    normalize(perpendicular(subtract(center, point)))
}

/// Whether two discs are closer than the sum of their radii plus `margin`
#[inline]
pub fn discs_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32, margin: f32) -> bool {
    length(subtract(a, b)) < radius_a + radius_b + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_zone_hit() {
        let result = point_in_zone(Vec2::new(110.0, 100.0), Vec2::new(100.0, 100.0), 32.0);
        assert!(result.hit);
        assert!((result.penetration - 22.0).abs() < 1e-5);
        assert!((result.normal - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_point_on_boundary_is_miss() {
        let result = point_in_zone(Vec2::new(32.0, 0.0), Vec2::ZERO, 32.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_push_out_partial_correction() {
        let center = Vec2::ZERO;
        let point = Vec2::new(0.0, 22.0);
        let contact = point_in_zone(point, center, 32.0);
        let pushed = push_out(point, &contact, 0.6);
        // 10 units deep, corrected by 6
        assert!((pushed - Vec2::new(0.0, 28.0)).length() < 1e-5);
    }

    #[test]
    fn test_push_out_at_centre_stays() {
        let contact = point_in_zone(Vec2::ZERO, Vec2::ZERO, 32.0);
        assert!(contact.hit);
        assert_eq!(push_out(Vec2::ZERO, &contact, 0.6), Vec2::ZERO);
    }

    #[test]
    fn test_orbit_tangent_is_perpendicular() {
        let center = Vec2::new(450.0, 300.0);
        let point = Vec2::new(480.0, 300.0);
        let tangent = orbit_tangent(point, center);
        assert!((tangent.length() - 1.0).abs() < 1e-6);
        assert!(tangent.dot(point - center).abs() < 1e-5);
    }

    #[test]
    fn test_discs_overlap_with_margin() {
        assert!(discs_overlap(Vec2::ZERO, 24.0, Vec2::new(53.0, 0.0), 24.0, 6.0));
        assert!(!discs_overlap(Vec2::ZERO, 24.0, Vec2::new(54.0, 0.0), 24.0, 6.0));
    }
}
