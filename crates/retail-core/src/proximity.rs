//! # Proximity Filter
//!
//! Decides which stores a user can reach.
//!
//! Coordinates are positions on an abstract 100×100 plane, not geodetic
//! latitude/longitude. Distance is plain Euclidean distance on that plane and
//! the radius is compared against it directly:
//!
//! ```text
//!   distance = sqrt((lat₂ - lat₁)² + (lon₂ - lon₁)²)
//!
//!   user (10,10) ── 25.0 ──► store S (10,35)   ✓ within 30
//!   user (10,10) ── 70.7 ──► store T (60,60)   ✗ excluded
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::validation::{validate_coordinate, ValidationResult};

/// A point on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting values outside [0, 100].
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        validate_coordinate("latitude", latitude)?;
        validate_coordinate("longitude", longitude)?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Wraps values already validated on the way into the data store.
    #[inline]
    pub(crate) const fn unchecked(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Planar Euclidean distance to `other`.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }

    /// Whether `other` lies within `radius` (inclusive).
    pub fn is_within(&self, other: &Coordinates, radius: f64) -> bool {
        self.planar_distance(other) <= radius
    }
}

/// Returns the ids of every candidate within `radius` of `origin`.
///
/// ## Example
/// ```rust
/// use retail_core::proximity::{within_radius, Coordinates};
///
/// let origin = Coordinates::new(10.0, 10.0).unwrap();
/// let candidates = vec![
///     (1, Coordinates::new(10.0, 35.0).unwrap()),
///     (2, Coordinates::new(60.0, 60.0).unwrap()),
/// ];
///
/// let reachable = within_radius(origin, candidates, 30.0);
/// assert_eq!(reachable.into_iter().collect::<Vec<_>>(), vec![1]);
/// ```
pub fn within_radius<K, I>(origin: Coordinates, candidates: I, radius: f64) -> BTreeSet<K>
where
    K: Ord,
    I: IntoIterator<Item = (K, Coordinates)>,
{
    candidates
        .into_iter()
        .filter(|(_, position)| origin.is_within(position, radius))
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoreId;
    use crate::ORDER_RADIUS;

    fn at(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    #[test]
    fn test_planar_distance() {
        assert!((at(10.0, 10.0).planar_distance(&at(10.0, 35.0)) - 25.0).abs() < 1e-9);
        assert!((at(0.0, 0.0).planar_distance(&at(3.0, 4.0)) - 5.0).abs() < 1e-9);
        assert_eq!(at(42.0, 42.0).planar_distance(&at(42.0, 42.0)), 0.0);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let origin = at(0.0, 0.0);
        assert!(origin.is_within(&at(0.0, 30.0), ORDER_RADIUS));
        assert!(!origin.is_within(&at(0.0, 30.01), ORDER_RADIUS));
    }

    #[test]
    fn test_within_radius_selects_nearby_stores() {
        let origin = at(10.0, 10.0);
        let candidates = vec![
            (StoreId::new(1), at(10.0, 35.0)),
            (StoreId::new(2), at(60.0, 60.0)),
            (StoreId::new(3), at(30.0, 30.0)),
        ];

        let reachable = within_radius(origin, candidates, ORDER_RADIUS);

        assert!(reachable.contains(&StoreId::new(1)));
        assert!(!reachable.contains(&StoreId::new(2)));
        // sqrt(20² + 20²) ≈ 28.3
        assert!(reachable.contains(&StoreId::new(3)));
    }

    #[test]
    fn test_rejects_off_plane_coordinates() {
        assert!(Coordinates::new(-0.1, 5.0).is_err());
        assert!(Coordinates::new(5.0, 100.5).is_err());
        assert!(Coordinates::new(f64::NAN, 5.0).is_err());
        assert!(Coordinates::new(0.0, 100.0).is_ok());
    }
}
