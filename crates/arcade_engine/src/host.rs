//! Host: drives one backend and one application module
//!
//! Each frame the host polls the backend for input, forwards every event to
//! the application, advances it, then clears the target, draws the
//! application's drawables in the order it returned them, and presents.
//!
//! The backend can be replaced while the application keeps running. The
//! old backend is torn down first, the new one is created from the same or
//! new [`RenderSettings`], and the application reloads its entities through
//! the new backend's factory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{AppError, Application};
use crate::backend::{self, Backend, BackendKind, RecordingBackend, INTERFACE_VERSION};
use crate::config::{Config, ConfigError};
use crate::foundation::time::{FramePacer, Timer};
use crate::input::InputEvent;
use crate::render::{Color, RenderError};
use crate::window::RenderSettings;

/// Highest frame rate the host will pace to
pub const MAX_TARGET_FPS: u32 = 1000;

/// Host configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Backend to start with
    pub backend: BackendKind,
    /// Settings handed to the backend
    pub render: RenderSettings,
    /// Frames per second; 0 runs unpaced
    pub target_fps: u32,
}

impl HostConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        if self.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::Invalid(format!(
                "target_fps must be at most {MAX_TARGET_FPS}, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Terminal,
            render: RenderSettings::default(),
            target_fps: 30,
        }
    }
}

impl Config for HostConfig {}

/// Host-level errors
#[derive(Error, Debug)]
pub enum HostError {
    /// Backend or rendering failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Application failure
    #[error("Application error: {0}")]
    App(#[from] AppError),

    /// Invalid host configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Replacing the backend failed and so did restoring the previous one
    ///
    /// The host is stopped; the application holds no live entities.
    #[error("Backend replacement failed ({failed}) and restoring the previous backend failed ({restore})")]
    RestoreFailed {
        /// Why the requested backend could not be installed
        failed: Box<HostError>,
        /// Why the previous backend could not be reinstalled
        restore: Box<HostError>,
    },

    /// Backend built against another interface version
    #[error("Backend '{backend}' implements interface version {found}, host expects {expected}")]
    IncompatibleBackend {
        /// Backend name
        backend: String,
        /// Version the backend reports
        found: u32,
        /// Version the host was built with
        expected: u32,
    },
}

fn check_version(backend: &dyn Backend) -> Result<(), HostError> {
    let found = backend.interface_version();
    if found == INTERFACE_VERSION {
        Ok(())
    } else {
        log::error!(
            "Refusing backend '{}': interface version {found}, expected {INTERFACE_VERSION}",
            backend.name()
        );
        Err(HostError::IncompatibleBackend {
            backend: backend.name().to_string(),
            found,
            expected: INTERFACE_VERSION,
        })
    }
}

/// Owns the running backend and application module
pub struct Host {
    config: HostConfig,
    backend: Box<dyn Backend>,
    app: Box<dyn Application>,
    timer: Timer,
    running: bool,
}

impl Host {
    /// Create the configured backend and load the application on it
    ///
    /// An unusable resolution is reported as [`RenderError::BackendInit`],
    /// the same as when the backend itself refuses it.
    pub fn new(config: &HostConfig, app: Box<dyn Application>) -> Result<Self, HostError> {
        backend::check_settings(&config.render)?;
        config.validate()?;
        let backend = backend::create_backend(config.backend, &config.render)?;
        Self::with_backend(*config, backend, app)
    }

    /// Load the application on an already created backend
    pub fn with_backend(
        config: HostConfig,
        backend: Box<dyn Backend>,
        mut app: Box<dyn Application>,
    ) -> Result<Self, HostError> {
        check_version(backend.as_ref())?;

        log::info!("Loading '{}' on {} backend", app.name(), backend.name());
        app.load(backend.as_factory())?;

        Ok(Self {
            config,
            backend,
            app,
            timer: Timer::new(),
            running: true,
        })
    }

    /// Run frames until the backend closes or the application finishes
    pub fn run(&mut self) -> Result<(), HostError> {
        let mut pacer = FramePacer::new(self.config.target_fps);
        log::info!("Starting main loop...");

        let result = loop {
            if !self.running {
                break Ok(());
            }
            pacer.begin_frame();
            if let Err(e) = self.run_frame() {
                break Err(e);
            }
            pacer.end_frame();
        };

        self.app.cleanup();
        log::info!(
            "Host stopped after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        result
    }

    /// Run a single frame
    ///
    /// Stops the host without drawing when the backend reports
    /// [`InputEvent::Closed`] or the application reports itself finished.
    /// Does nothing once the host has stopped.
    pub fn run_frame(&mut self) -> Result<(), HostError> {
        if !self.running {
            return Ok(());
        }
        self.timer.update();

        while let Some(event) = self.backend.poll_event()? {
            if event == InputEvent::Closed {
                log::info!("{} backend closed", self.backend.name());
                self.running = false;
                return Ok(());
            }
            self.app.handle_event(&event);
        }

        self.app.update(self.timer.delta_time())?;
        if self.app.is_finished() {
            log::info!("'{}' finished", self.app.name());
            self.running = false;
            return Ok(());
        }

        let target = self.backend.target();
        target.clear(Color::BLACK);
        for drawable in self.app.drawables() {
            // One bad entity does not stop the frame.
            if let Err(e) = drawable.draw(target) {
                log::warn!("Draw failed: {e}");
            }
        }
        target.display()?;
        Ok(())
    }

    /// Replace the backend with another kind at the current settings
    pub fn switch_backend(&mut self, kind: BackendKind) -> Result<(), HostError> {
        let settings = *self.backend.settings();
        self.replace_backend(kind, settings)
    }

    /// Recreate the backend with new settings
    ///
    /// Unusable settings are refused before the running backend is touched.
    pub fn reconfigure(&mut self, settings: RenderSettings) -> Result<(), HostError> {
        backend::check_settings(&settings)?;
        self.replace_backend(self.config.backend, settings)
    }

    fn replace_backend(&mut self, kind: BackendKind, settings: RenderSettings) -> Result<(), HostError> {
        let previous = (self.config.backend, *self.backend.settings());
        log::info!("Replacing {} backend with {}", self.backend.name(), kind.name());

        // Two backends may not share one output surface. The headless
        // placeholder keeps the previous settings so config and backend agree.
        drop(std::mem::replace(
            &mut self.backend,
            Box::new(RecordingBackend::new(previous.1)),
        ));

        let Err(failed) = self.install(kind, settings) else {
            return Ok(());
        };
        log::warn!("Backend replacement failed, restoring {}: {failed}", previous.0.name());

        match self.install(previous.0, previous.1) {
            Ok(()) => Err(failed),
            Err(restore) => {
                log::error!("Could not restore previous backend, stopping: {restore}");
                self.running = false;
                Err(HostError::RestoreFailed {
                    failed: Box::new(failed),
                    restore: Box::new(restore),
                })
            }
        }
    }

    fn install(&mut self, kind: BackendKind, settings: RenderSettings) -> Result<(), HostError> {
        let backend = backend::create_backend(kind, &settings)?;
        check_version(backend.as_ref())?;
        self.app.load(backend.as_factory())?;
        self.backend = backend;
        self.config.backend = kind;
        self.config.render = settings;
        Ok(())
    }

    /// Ask the host to stop after the current frame
    pub fn stop(&mut self) {
        log::info!("Host shutdown requested");
        self.running = false;
    }

    /// Whether the main loop would run another frame
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current configuration, tracking backend swaps
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Running backend
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Mutable access to the running backend
    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// Frame timing
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }
}
