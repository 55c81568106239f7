use crate::foundation::math::Vector2f;

/// Positional state shared by every positioned entity
///
/// Entities embed exactly one of these and expose it through
/// [`Transformable`]. The position can only change through
/// [`move_to`](Self::move_to) and [`move_by`](Self::move_by).
#[derive(Debug, PartialEq)]
pub struct Transform2D {
    position: Vector2f,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::at(Vector2f::zeros())
    }
}

impl Transform2D {
    /// Create a transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform at `position`
    pub const fn at(position: Vector2f) -> Self {
        Self { position }
    }

    /// Set the absolute position
    pub fn move_to(&mut self, position: Vector2f) {
        self.position = position;
    }

    /// Offset the position; plain vector addition, no clamping
    pub fn move_by(&mut self, offset: Vector2f) {
        self.position += offset;
    }

    /// Current position
    pub const fn position(&self) -> &Vector2f {
        &self.position
    }
}

/// Capability: has a 2D position and can be moved
///
/// Implementors only provide access to their single [`Transform2D`]; the
/// movement operations are provided here so no implementor can keep a
/// second copy of the position.
pub trait Transformable {
    /// The entity's positional state
    fn transform(&self) -> &Transform2D;

    /// Mutable access to the entity's positional state
    fn transform_mut(&mut self) -> &mut Transform2D;

    /// Move to the given absolute position
    fn move_to(&mut self, position: Vector2f) {
        self.transform_mut().move_to(position);
    }

    /// Move by the given offset
    fn move_by(&mut self, offset: Vector2f) {
        self.transform_mut().move_by(offset);
    }

    /// Current position
    fn position(&self) -> &Vector2f {
        self.transform().position()
    }
}

impl Transformable for Transform2D {
    fn transform(&self) -> &Transform2D {
        self
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        self
    }
}
