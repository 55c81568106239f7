//! # Arcade Engine
//!
//! Backend-agnostic rendering and input contracts. A host drives an
//! interchangeable backend and an interchangeable application module
//! ("game") without either side knowing the other's concrete types.
//!
//! ## Capabilities
//!
//! - **Transformable**: has a 2D position and can be moved
//! - **Drawable**: renders itself into a [`RenderTarget`](render::RenderTarget)
//! - **Sprite** / **Text**: image-backed and string-backed drawables
//! - **KeyCode**: closed, backend-independent key taxonomy
//! - **RenderSettings**: resolution and fullscreen flag handed to a backend
//!
//! Every backend in [`backend`] implements these contracts; every
//! [`Application`] consumes them through trait objects only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arcade_engine::prelude::*;
//!
//! struct Hello {
//!     label: Option<Box<dyn Text>>,
//! }
//!
//! impl Application for Hello {
//!     fn name(&self) -> &str {
//!         "hello"
//!     }
//!
//!     fn load(&mut self, factory: &dyn EntityFactory) -> Result<(), AppError> {
//!         let mut label = factory.create_text();
//!         label.set_text("Hello, arcade!");
//!         label.move_to(Vector2f::new(16.0, 16.0));
//!         self.label = Some(label);
//!         Ok(())
//!     }
//!
//!     fn handle_event(&mut self, _event: &InputEvent) {}
//!
//!     fn update(&mut self, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn drawables(&self) -> Vec<&dyn Drawable> {
//!         self.label.iter().map(|t| t.as_drawable()).collect()
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HostConfig::default();
//!     let mut host = Host::new(&config, Box::new(Hello { label: None }))?;
//!     host.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod window;

mod application;
mod host;

pub use application::{AppError, Application};
pub use host::{Host, HostConfig, HostError};

/// Common imports for backends and application modules
pub mod prelude {
    pub use crate::{
        AppError, Application, Host, HostConfig, HostError,
        backend::{Backend, BackendKind, EntityFactory, create_backend},
        foundation::math::{Vector2f, Vector2u},
        input::{InputEvent, KeyCode, KeyState, Modifiers},
        render::{
            Color, Drawable, RenderError, RenderResult, RenderTarget, Sprite, Text,
            Transformable,
        },
        window::RenderSettings,
    };
}
