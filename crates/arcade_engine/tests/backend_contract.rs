//! Integration tests for the drawable contract across backends
//!
//! The same entity operations are run against the recording backend and
//! the terminal target. Terminal output is captured through a
//! `RecordingLayer`, so both sides are compared as draw-command logs.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use arcade_engine::backend::{
    DrawCommand, EntityFactory, RecordingBackend, RecordingLayer, RecordingTarget, TerminalSprite,
    TerminalTarget,
};
use arcade_engine::prelude::*;
use arcade_engine::render::{StandardSprite, StandardText};

fn write_png(dir: &Path) -> PathBuf {
    let path = dir.join("ship.png");
    image::RgbaImage::new(4, 4).save(&path).unwrap();
    path
}

fn write_art(dir: &Path) -> PathBuf {
    let path = dir.join("ship.txt");
    std::fs::write(&path, " ^ \n<#>\n").unwrap();
    path
}

fn place(sprite: &mut dyn Sprite, image: &Path, art: &Path) {
    sprite.set_image_file(image).unwrap();
    sprite.set_ascii_file(art).unwrap();
    sprite.set_size(Vector2f::new(48.0, 32.0));
    sprite.set_rotation(30.0);
    sprite.move_to(Vector2f::new(100.0, 40.0));
    sprite.move_by(Vector2f::new(-20.5, 8.25));
}

fn image_corners(commands: &[DrawCommand]) -> [Vector2f; 4] {
    commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Image { corners, .. } => Some(*corners),
            _ => None,
        })
        .unwrap()
}

#[test]
fn test_same_sprite_same_geometry_on_both_backends() {
    arcade_engine::foundation::logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path());
    let art = write_art(dir.path());
    let size = Vector2u::new(320, 240);

    let mut recorded = RecordingTarget::new(size);
    let mut standard = StandardSprite::new();
    place(&mut standard, &image, &art);
    standard.draw(&mut recorded).unwrap();

    let mut terminal = TerminalTarget::headless(size);
    let mut layer = RecordingLayer::new(&mut terminal);
    let mut text_mode = TerminalSprite::new();
    place(&mut text_mode, &image, &art);
    text_mode.draw(&mut layer).unwrap();
    let forwarded = layer.into_commands();

    assert_eq!(recorded.commands(), forwarded.as_slice());

    let corners = image_corners(&forwarded);
    assert_relative_eq!(corners[0].x, 79.5);
    assert_relative_eq!(corners[0].y, 48.25);
    assert_relative_eq!(corners[1].x, 79.5 + 48.0 * 30f32.to_radians().cos(), epsilon = 1e-4);
    assert_relative_eq!(corners[1].y, 48.25 + 48.0 * 30f32.to_radians().sin(), epsilon = 1e-4);
}

#[test]
fn test_missing_image_is_resource_error_on_both_backends() {
    let missing = Path::new("assets/does-not-exist.png");
    let recording = RecordingBackend::new(RenderSettings::default());
    let sprites: [(&str, Box<dyn Sprite>); 2] = [
        ("recording", recording.create_sprite()),
        ("terminal", Box::new(TerminalSprite::new())),
    ];

    for (name, mut sprite) in sprites {
        let error = sprite.set_image_file(missing).unwrap_err();
        assert!(error.is_resource(), "{name}: {error}");
        assert_eq!(sprite.image_file(), None, "{name}");
    }
}

#[test]
fn test_empty_text_leaves_both_targets_untouched() {
    let text = StandardText::new();

    let mut recorded = RecordingTarget::new(Vector2u::new(160, 64));
    text.draw(&mut recorded).unwrap();
    assert!(recorded.commands().is_empty());

    let mut terminal = TerminalTarget::headless(Vector2u::new(160, 64));
    let before = terminal.framebuffer().clone();
    text.draw(&mut terminal).unwrap();
    assert_eq!(*terminal.framebuffer(), before);
}

#[test]
fn test_color_arrives_unchanged_on_both_backends() {
    let color = Color::rgba(12, 200, 77, 255);
    let mut text = StandardText::new();
    text.set_text("1UP");
    text.set_color(color);
    text.move_to(Vector2f::new(16.0, 16.0));

    let mut recorded = RecordingTarget::new(Vector2u::new(160, 64));
    text.draw(&mut recorded).unwrap();
    assert!(matches!(
        recorded.commands(),
        [DrawCommand::Text { color: c, .. }] if *c == color
    ));

    let mut terminal = TerminalTarget::headless(Vector2u::new(160, 64));
    text.draw(&mut terminal).unwrap();
    let cell = terminal.framebuffer().get(2, 1).unwrap();
    assert_eq!(cell.ch, '1');
    assert_eq!(cell.fg, color);
}

#[test]
fn test_text_size_rules() {
    let mut text = StandardText::new();
    assert_eq!(text.size(), 30);

    text.set_size(12).unwrap();
    assert_eq!(text.size(), 12);

    let error = text.set_size(0).unwrap_err();
    assert!(matches!(error, RenderError::InvalidArgument(_)));
    assert_eq!(text.size(), 12);
}

#[test]
fn test_unknown_native_key_still_delivered() {
    use arcade_engine::backend::terminal::keymap;
    use crossterm::event::{KeyCode as TermKey, KeyEvent};

    let event = keymap::translate(KeyEvent::from(TermKey::ScrollLock));
    assert_eq!(event, InputEvent::pressed(KeyCode::Unknown));
}
