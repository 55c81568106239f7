//! Math utilities and types
//!
//! Screen space is y-down with the origin at the top-left corner of the
//! render target, measured in pixels.

pub use nalgebra::{Matrix3, Point2, Vector2};

/// Floating-point 2D vector, used for positions, offsets and sizes
pub type Vector2f = Vector2<f32>;

/// Unsigned 2D vector, used for pixel resolutions
pub type Vector2u = Vector2<u32>;

/// 3x3 homogeneous matrix for 2D affine transforms
pub type Mat3 = Matrix3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Placement of a sized, rotated quad on screen
///
/// Every backend derives sprite geometry from this type so identical
/// attribute values give identical coordinates everywhere. The matrix is
/// `translate * rotate * scale` applied to the unit square `[0, 1]²`:
///
/// - the quad is scaled to `size` pixels,
/// - rotated about its top-left corner by `rotation` degrees (positive is
///   clockwise on a y-down screen),
/// - translated so that corner sits at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteTransform {
    /// Top-left corner of the quad before rotation
    pub position: Vector2f,
    /// Quad extent in pixels
    pub size: Vector2f,
    /// Rotation in degrees, as stored on the sprite
    pub rotation: f32,
}

impl SpriteTransform {
    /// Create a new sprite transform
    pub const fn new(position: Vector2f, size: Vector2f, rotation: f32) -> Self {
        Self { position, size, rotation }
    }

    /// Homogeneous matrix mapping unit-square coordinates to screen pixels
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::new_translation(&self.position)
            * Mat3::new_rotation(utils::deg_to_rad(self.rotation))
            * Mat3::new_nonuniform_scaling(&self.size)
    }

    /// Screen-space corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vector2f; 4] {
        let matrix = self.to_matrix();
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].map(|(u, v)| {
            matrix.transform_point(&Point2::new(u, v)).coords
        })
    }

    /// Axis-aligned bounds of the transformed quad as `(min, max)`
    pub fn bounds(&self) -> (Vector2f, Vector2f) {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.inf(corner);
            max = max.sup(corner);
        }
        (min, max)
    }

    /// Map a screen point back into unit-square coordinates
    ///
    /// Returns `None` for degenerate quads (zero width or height), which
    /// cover no pixels.
    pub fn to_local(&self, point: Vector2f) -> Option<Vector2f> {
        let inverse = self.to_matrix().try_inverse()?;
        Some(inverse.transform_point(&Point2::from(point)).coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_unrotated_corners() {
        let transform = SpriteTransform::new(Vector2f::new(10.0, 20.0), Vector2f::new(4.0, 2.0), 0.0);
        let corners = transform.corners();

        assert_relative_eq!(corners[0], Vector2f::new(10.0, 20.0), epsilon = EPSILON);
        assert_relative_eq!(corners[1], Vector2f::new(14.0, 20.0), epsilon = EPSILON);
        assert_relative_eq!(corners[2], Vector2f::new(14.0, 22.0), epsilon = EPSILON);
        assert_relative_eq!(corners[3], Vector2f::new(10.0, 22.0), epsilon = EPSILON);
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        // With y pointing down, the right edge should swing down.
        let transform = SpriteTransform::new(Vector2f::zeros(), Vector2f::new(10.0, 5.0), 90.0);
        let corners = transform.corners();

        assert_relative_eq!(corners[1], Vector2f::new(0.0, 10.0), epsilon = EPSILON);
        assert_relative_eq!(corners[3], Vector2f::new(-5.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applies_before_rotation() {
        // Rotate-then-scale would stretch along screen axes instead.
        let transform = SpriteTransform::new(Vector2f::zeros(), Vector2f::new(8.0, 2.0), 45.0);
        let corners = transform.corners();
        let top_edge = corners[1] - corners[0];
        let left_edge = corners[3] - corners[0];

        assert_relative_eq!(top_edge.norm(), 8.0, epsilon = EPSILON);
        assert_relative_eq!(left_edge.norm(), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_to_local_round_trip() {
        let transform = SpriteTransform::new(Vector2f::new(3.0, 7.0), Vector2f::new(6.0, 4.0), 30.0);
        let corner = transform.corners()[2];
        let local = transform.to_local(corner).unwrap();

        assert_relative_eq!(local, Vector2f::new(1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_quad_has_no_inverse() {
        let transform = SpriteTransform::new(Vector2f::zeros(), Vector2f::new(0.0, 4.0), 0.0);
        assert!(transform.to_local(Vector2f::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_bounds_cover_rotated_quad() {
        let transform = SpriteTransform::new(Vector2f::zeros(), Vector2f::new(10.0, 5.0), 90.0);
        let (min, max) = transform.bounds();

        assert_relative_eq!(min, Vector2f::new(-5.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(max, Vector2f::new(0.0, 10.0), epsilon = EPSILON);
    }
}
