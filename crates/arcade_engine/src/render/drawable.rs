use super::{RenderResult, RenderTarget, Transformable};

/// Capability: can render itself into a [`RenderTarget`]
///
/// A drawable is always positioned, so `Transformable` is a supertrait and
/// the draw reads the same position `move_to`/`move_by` write.
///
/// `draw` takes `&self`: drawing never changes the entity. The host may draw
/// any number of entities into one target per frame in an order it alone
/// decides, so implementations must not assume anything about what was
/// drawn before or after them.
pub trait Drawable: Transformable {
    /// Draw the entity's current visual state into `target`
    fn draw(&self, target: &mut dyn RenderTarget) -> RenderResult<()>;
}
