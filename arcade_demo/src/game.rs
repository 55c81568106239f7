//! Ship-and-score game module
//!
//! A ship sprite steered with the arrow keys (or WASD), rotated with Q/E,
//! and a score that ticks up while the game runs. Escape quits.

use std::path::PathBuf;

use arcade_engine::prelude::*;

/// Pixels the ship moves per key press
const STEP: f32 = 16.0;

/// Degrees the ship turns per key press
const TURN: f32 = 15.0;

/// Points awarded per second survived
const POINTS_PER_SECOND: f32 = 10.0;

/// Ship sprite extent in pixels
const SHIP_SIZE: f32 = 48.0;

/// Game state that survives backend swaps
pub struct ShipGame {
    assets: PathBuf,
    arena: Vector2f,
    ship_position: Vector2f,
    ship_rotation: f32,
    elapsed: f32,
    finished: bool,
    ship: Option<Box<dyn Sprite>>,
    score: Option<Box<dyn Text>>,
    hint: Option<Box<dyn Text>>,
}

impl ShipGame {
    /// Create a game for an arena of the given resolution
    #[allow(clippy::cast_precision_loss)]
    pub fn new(assets: impl Into<PathBuf>, arena: Vector2u) -> Self {
        let arena = Vector2f::new(arena.x as f32, arena.y as f32);
        Self {
            assets: assets.into(),
            arena,
            ship_position: (arena - Vector2f::repeat(SHIP_SIZE)) / 2.0,
            ship_rotation: 0.0,
            elapsed: 0.0,
            finished: false,
            ship: None,
            score: None,
            hint: None,
        }
    }

    /// Points so far
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn points(&self) -> u32 {
        (self.elapsed * POINTS_PER_SECOND) as u32
    }

    fn steer(&mut self, offset: Vector2f) {
        let max = (self.arena - Vector2f::repeat(SHIP_SIZE)).sup(&Vector2f::zeros());
        let target = (self.ship_position + offset).sup(&Vector2f::zeros()).inf(&max);
        let applied = target - self.ship_position;
        self.ship_position = target;
        if let Some(ship) = self.ship.as_mut() {
            ship.move_by(applied);
        }
    }

    fn turn(&mut self, degrees: f32) {
        self.ship_rotation += degrees;
        if let Some(ship) = self.ship.as_mut() {
            ship.set_rotation(self.ship_rotation);
        }
    }
}

impl Application for ShipGame {
    fn name(&self) -> &str {
        "ship"
    }

    fn load(&mut self, factory: &dyn EntityFactory) -> Result<(), AppError> {
        if !self.assets.is_dir() {
            return Err(AppError::Asset(format!(
                "asset directory {} not found",
                self.assets.display()
            )));
        }

        let mut ship = factory.create_sprite();
        ship.set_image_file(&self.assets.join("ship.png"))?;
        ship.set_ascii_file(&self.assets.join("ship.txt"))?;
        ship.set_size(Vector2f::repeat(SHIP_SIZE));
        ship.set_rotation(self.ship_rotation);
        ship.move_to(self.ship_position);

        let mut score = factory.create_text();
        score.set_color(Color::YELLOW);
        score.set_size(24)?;
        score.move_to(Vector2f::new(8.0, 0.0));

        let mut hint = factory.create_text();
        hint.set_text("arrows/WASD move  Q/E turn  Esc quit");
        hint.set_color(Color::rgb(160, 160, 160));
        hint.set_size(16)?;
        hint.move_to(Vector2f::new(8.0, (self.arena.y - 16.0).max(0.0)));

        self.ship = Some(ship);
        self.score = Some(score);
        self.hint = Some(hint);
        log::info!("Ship game entities loaded");
        Ok(())
    }

    fn handle_event(&mut self, event: &InputEvent) {
        let InputEvent::Key { code, state: KeyState::Pressed, .. } = *event else {
            return;
        };
        match code {
            KeyCode::Left | KeyCode::A => self.steer(Vector2f::new(-STEP, 0.0)),
            KeyCode::Right | KeyCode::D => self.steer(Vector2f::new(STEP, 0.0)),
            KeyCode::Up | KeyCode::W => self.steer(Vector2f::new(0.0, -STEP)),
            KeyCode::Down | KeyCode::S => self.steer(Vector2f::new(0.0, STEP)),
            KeyCode::Q => self.turn(-TURN),
            KeyCode::E => self.turn(TURN),
            KeyCode::Escape => self.finished = true,
            KeyCode::Unknown => log::debug!("Ignoring unmapped key"),
            other => log::trace!("No binding for {other}"),
        }
    }

    fn update(&mut self, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;
        let points = self.points();
        if let Some(score) = self.score.as_mut() {
            score.set_text(&format!("SCORE {points:05}"));
        }
        Ok(())
    }

    fn drawables(&self) -> Vec<&dyn Drawable> {
        let mut drawables: Vec<&dyn Drawable> = Vec::with_capacity(3);
        drawables.extend(self.ship.iter().map(|ship| ship.as_drawable()));
        drawables.extend(self.score.iter().map(|score| score.as_drawable()));
        drawables.extend(self.hint.iter().map(|hint| hint.as_drawable()));
        drawables
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn cleanup(&mut self) {
        log::info!("Final score: {}", self.points());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::backend::RecordingBackend;

    fn assets() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    fn loaded_game() -> ShipGame {
        let backend = RecordingBackend::new(RenderSettings::windowed(320, 240));
        let mut game = ShipGame::new(assets(), Vector2u::new(320, 240));
        game.load(backend.as_factory()).unwrap();
        game
    }

    #[test]
    fn test_load_creates_entities() {
        let game = loaded_game();
        assert_eq!(game.drawables().len(), 3);
    }

    #[test]
    fn test_missing_asset_directory() {
        let backend = RecordingBackend::new(RenderSettings::windowed(320, 240));
        let mut game = ShipGame::new(assets().join("missing"), Vector2u::new(320, 240));

        let error = game.load(backend.as_factory()).unwrap_err();
        assert!(matches!(error, AppError::Asset(msg) if msg.contains("missing")));
        assert!(game.drawables().is_empty());
    }

    #[test]
    fn test_steering_is_clamped_to_arena() {
        let mut game = loaded_game();
        for _ in 0..100 {
            game.handle_event(&InputEvent::pressed(KeyCode::Left));
        }
        assert_eq!(game.ship_position.x, 0.0);
        assert_eq!(game.ship.as_ref().unwrap().position().x, 0.0);
    }

    #[test]
    fn test_state_survives_reload() {
        let mut game = loaded_game();
        game.handle_event(&InputEvent::pressed(KeyCode::E));
        game.handle_event(&InputEvent::pressed(KeyCode::Down));

        let backend = RecordingBackend::new(RenderSettings::windowed(320, 240));
        game.load(backend.as_factory()).unwrap();

        let ship = game.ship.as_ref().unwrap();
        assert_eq!(ship.rotation(), TURN);
        assert_eq!(*ship.position(), game.ship_position);
    }

    #[test]
    fn test_score_and_escape() {
        let mut game = loaded_game();
        game.update(1.5).unwrap();
        assert_eq!(game.points(), 15);
        assert_eq!(game.score.as_ref().unwrap().text(), "SCORE 00015");

        game.handle_event(&InputEvent::pressed(KeyCode::Escape));
        assert!(game.is_finished());
    }
}
