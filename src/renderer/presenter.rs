//! Screen presenter
//!
//! Draws the current session: a phase overlay, or the playfield while playing.
//! Read-only with respect to the session.

use glam::Vec2;

use super::{Paint, Surface};
use crate::consts::SPLASH_RADIUS;
use crate::sim::{Entity, GamePhase, GameSession};

const PROMPT_FONT: f32 = 30.0;
const COUNTDOWN_FONT: f32 = 50.0;
const HUD_FONT: f32 = 20.0;
const GLYPH_FONT: f32 = 40.0;

pub const START_PROMPT: &str = "Click to Start";
pub const GAME_OVER_PROMPT: &str = "Game Over! Tap to Restart";
pub const GO_TEXT: &str = "Go!";

/// Render the whole screen for the session's current phase
pub fn present(session: &GameSession, surface: &mut dyn Surface) {
    let w = surface.width();
    let h = surface.height();
    surface.fill_rect(Vec2::ZERO, Vec2::new(w, h), Paint::Background);

    match session.phase {
        GamePhase::Start => {
            surface.fill_text(
                START_PROMPT,
                Vec2::new(w / 2.0 - 80.0, h / 2.0),
                PROMPT_FONT,
                Paint::Ink,
            );
        }
        GamePhase::Countdown => {
            let text = countdown_text(session.countdown);
            surface.fill_text(
                &text,
                Vec2::new(w / 2.0 - 20.0, h / 2.0),
                COUNTDOWN_FONT,
                Paint::Ink,
            );
        }
        GamePhase::Playing => draw_playfield(session, surface),
        GamePhase::GameOver => {
            surface.fill_text(
                GAME_OVER_PROMPT,
                Vec2::new(100.0, h / 2.0),
                PROMPT_FONT,
                Paint::Ink,
            );
            surface.fill_text(
                &score_text(session.score),
                Vec2::new(w / 2.0 - 50.0, h / 2.0 + 40.0),
                HUD_FONT,
                Paint::Ink,
            );
        }
    }
}

/// Digit while counting, "Go!" once it reaches zero
pub fn countdown_text(value: i32) -> String {
    if value > 0 {
        value.to_string()
    } else {
        GO_TEXT.to_string()
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

fn draw_entity(entity: &Entity, surface: &mut dyn Surface) {
    surface.fill_text(entity.kind.glyph(), entity.pos, GLYPH_FONT, Paint::Ink);
}

fn draw_playfield(session: &GameSession, surface: &mut dyn Surface) {
    for entity in session.fruits.iter().chain(&session.bombs) {
        draw_entity(entity, surface);
    }
    for splash in &session.splashes {
        surface.fill_circle(splash.pos, SPLASH_RADIUS, Paint::Juice);
    }
    let w = surface.width();
    surface.fill_text(
        &score_text(session.score),
        Vec2::new(w - 100.0, 30.0),
        HUD_FONT,
        Paint::Ink,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use crate::sim::{EntityKind, FruitKind, Splash};

    #[test]
    fn test_start_screen() {
        let session = GameSession::new();
        let mut surface = RecordingSurface::default();
        present(&session, &mut surface);

        assert_eq!(
            surface.calls[0],
            DrawCall::Rect {
                pos: Vec2::ZERO,
                size: Vec2::new(500.0, 800.0),
                paint: Paint::Background,
            }
        );
        assert_eq!(surface.texts(), vec![START_PROMPT]);
    }

    #[test]
    fn test_countdown_text() {
        assert_eq!(countdown_text(3), "3");
        assert_eq!(countdown_text(1), "1");
        assert_eq!(countdown_text(0), "Go!");
        assert_eq!(countdown_text(-1), "Go!");
    }

    #[test]
    fn test_playing_draws_entities_splashes_and_score() {
        let mut session = GameSession::new();
        session.phase = GamePhase::Playing;
        session.score = 12;
        session.fruits.push(Entity::new(
            EntityKind::Fruit(FruitKind::Banana),
            Vec2::new(10.0, 20.0),
            2.0,
        ));
        session
            .bombs
            .push(Entity::new(EntityKind::Bomb, Vec2::new(30.0, 40.0), 2.0));
        session.splashes.push(Splash::new(Vec2::new(5.0, 6.0)));

        let mut surface = RecordingSurface::default();
        present(&session, &mut surface);

        assert_eq!(surface.texts(), vec!["🍌", "💣", "Score: 12"]);
        assert_eq!(surface.circles(), vec![(Vec2::new(5.0, 6.0), 10.0)]);
        assert!(surface.calls.contains(&DrawCall::Text {
            text: "Score: 12".to_string(),
            pos: Vec2::new(400.0, 30.0),
            font_size: 20.0,
            paint: Paint::Ink,
        }));
    }

    #[test]
    fn test_game_over_shows_prompt_and_score() {
        let mut session = GameSession::new();
        session.phase = GamePhase::GameOver;
        session.score = 4;
        let mut surface = RecordingSurface::default();
        present(&session, &mut surface);
        assert!(surface.has_text(GAME_OVER_PROMPT));
        assert!(surface.has_text("Score: 4"));
    }
}
