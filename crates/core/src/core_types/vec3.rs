//! Vector type alias for world positions and wind directions.

use nalgebra::Vector3;

/// 3D vector in world space: X and Z span the simulation plane, Y points up.
///
/// Alias for `nalgebra::Vector3<f32>`; plant positions, bounds corners and
/// the wind propagation vector all use it.
pub type Vec3 = Vector3<f32>;
