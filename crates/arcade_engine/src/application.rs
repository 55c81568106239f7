//! Application trait and lifecycle management

use thiserror::Error;

use crate::backend::EntityFactory;
use crate::input::InputEvent;
use crate::render::{Drawable, RenderError};

/// Application lifecycle trait
///
/// Implement this trait to create a game module the [`Host`](crate::Host)
/// can drive on any backend. The module never sees a backend type: it
/// creates its entities through the [`EntityFactory`] handed to
/// [`load`](Self::load) and hands them back as [`Drawable`]s each frame.
pub trait Application {
    /// Display name of the module
    fn name(&self) -> &str;

    /// Create every entity the module draws
    ///
    /// Called once when the host starts and again whenever the backend is
    /// replaced. Entities from a previous backend must be dropped here,
    /// since they belong to a backend that no longer exists.
    fn load(&mut self, factory: &dyn EntityFactory) -> Result<(), AppError>;

    /// React to one input event
    ///
    /// Called for every event the backend delivers, before
    /// [`update`](Self::update).
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance game state
    ///
    /// # Arguments
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, delta_time: f32) -> Result<(), AppError>;

    /// Entities to draw this frame, back to front
    fn drawables(&self) -> Vec<&dyn Drawable>;

    /// Whether the module wants the host to stop
    fn is_finished(&self) -> bool {
        false
    }

    /// Called once when the host shuts down
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Render error propagated to application level
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Asset directory or file the module needs is unavailable
    #[error("Asset error: {0}")]
    Asset(String),
}
