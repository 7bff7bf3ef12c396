//! Drawing
//!
//! The game draws through [`Surface`], an opaque sink for filled rectangles
//! and text plus a translation for camera scrolling. The browser host backs
//! it with a canvas 2D context; tests record the calls.

use glam::Vec2;

use crate::camera::Camera;
use crate::sim::{
    Boss, BossType, Enemy, EnemyKind, Explosion, Faction, GamePhase, GameState, HeartDrop, Level,
    Player, PowerUp, Projectile, Rect, Turret,
};

/// Horizontal anchoring of drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Opaque drawing sink
pub trait Surface {
    /// Size of the drawable area in pixels
    fn viewport(&self) -> (f32, f32);

    /// Fill the whole viewport, ignoring the translation
    fn clear(&mut self, color: &str);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// `y` is the text baseline, `size` the font size in pixels
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: &str, align: TextAlign);

    /// Offset applied to every subsequent draw
    fn set_translation(&mut self, offset: Vec2);
}

/// Something that knows how to draw itself in world space
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

const HUD_COLOR: &str = "#ffffff";
const HUD_FONT: f32 = 14.0;
const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.7)";
const EXPLOSION_COLORS: [&str; 4] = ["#ffff00", "#ffaa00", "#ff5500", "#aa2200"];

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        // Blink while invulnerable
        if self.is_invulnerable() && ((self.invulnerable * 10.0) as i32) % 2 == 1 {
            return;
        }
        let body = &self.body;
        surface.fill_rect(body.rect(), "#0000ff");
        let head_x = if self.facing > 0.0 { body.pos.x + 8.0 } else { body.pos.x };
        surface.fill_rect(Rect::new(head_x, body.pos.y + 4.0, 24.0, 20.0), "#88ccff");
    }
}

impl Draw for Enemy {
    fn draw(&self, surface: &mut dyn Surface) {
        let color = match self.kind {
            EnemyKind::Walker => "#ff0000",
            EnemyKind::Drone { .. } => "#ff00ff",
        };
        surface.fill_rect(self.body.rect(), color);
    }
}

impl Draw for Turret {
    fn draw(&self, surface: &mut dyn Surface) {
        let rect = self.body.rect();
        surface.fill_rect(rect, "#888888");
        surface.fill_rect(Rect::new(rect.x + 8.0, rect.y + 8.0, 16.0, 16.0), "#ff4400");
    }
}

impl Draw for Boss {
    fn draw(&self, surface: &mut dyn Surface) {
        let rect = self.body.rect();
        let color = match self.kind {
            BossType::Wall => "#666666",
            BossType::Heart => "#aa0044",
        };
        surface.fill_rect(rect, color);

        // Health bar above the body
        let bar = Rect::new(rect.x, rect.y - 15.0, rect.width, 6.0);
        surface.fill_rect(bar, "#550000");
        surface.fill_rect(
            Rect::new(bar.x, bar.y, bar.width * self.health_fraction(), bar.height),
            "#ff0000",
        );
    }
}

impl Draw for Projectile {
    fn draw(&self, surface: &mut dyn Surface) {
        let color = match self.faction {
            Faction::Player => "#ffff00",
            Faction::Enemy => "#ff6600",
        };
        surface.fill_rect(self.body.rect(), color);
    }
}

impl Draw for PowerUp {
    fn draw(&self, surface: &mut dyn Surface) {
        let rect = self.body.rect();
        surface.fill_rect(rect, "#00ffff");
        let center = rect.center();
        surface.draw_text("S", center.x, center.y + 6.0, 16.0, "#000000", TextAlign::Center);
    }
}

impl Draw for HeartDrop {
    fn draw(&self, surface: &mut dyn Surface) {
        if self.visible() {
            surface.fill_rect(self.body.rect(), "#ff3366");
        }
    }
}

impl Draw for Explosion {
    fn draw(&self, surface: &mut dyn Surface) {
        let frame = (self.frame() as usize).min(EXPLOSION_COLORS.len() - 1);
        // Grows a little each frame
        let rect = self.body.rect().expand(frame as f32 * 4.0);
        surface.fill_rect(rect, EXPLOSION_COLORS[frame]);
    }
}

impl Draw for Level {
    fn draw(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        surface.fill_rect(
            Rect::new(0.0, self.ground_y, self.width, self.height - self.ground_y),
            &theme.ground,
        );
        surface.fill_rect(Rect::new(0.0, self.ground_y, self.width, 2.0), &theme.accent);
        for platform in &self.platforms {
            surface.fill_rect(*platform, &theme.platform);
        }
    }
}

fn draw_all<T: Draw>(items: &[T], surface: &mut dyn Surface) {
    for item in items {
        item.draw(surface);
    }
}

/// Draw one frame: world through the camera, then screen-space HUD
pub fn render_frame(
    state: &GameState,
    camera: &Camera,
    surface: &mut dyn Surface,
    show_controls: bool,
) {
    let level = state.level();
    surface.clear(&level.theme.background);

    surface.set_translation(camera.offset());
    level.draw(surface);

    if !state.phase.is_terminal() {
        state.player.draw(surface);
    }
    draw_all(&state.enemies, surface);
    draw_all(&state.turrets, surface);
    draw_all(&state.power_ups, surface);
    draw_all(&state.heart_drops, surface);
    if let Some(boss) = state.boss.as_ref().filter(|b| b.active) {
        boss.draw(surface);
    }
    draw_all(&state.projectiles, surface);
    draw_all(&state.explosions, surface);

    surface.set_translation(Vec2::ZERO);
    draw_hud(state, surface, show_controls);
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface, show_controls: bool) {
    let (width, height) = surface.viewport();

    match state.phase {
        GamePhase::GameOver => {
            draw_banner(surface, "GAME OVER", "#ff0000", "Press R to Restart");
            return;
        }
        GamePhase::Victory => {
            draw_banner(surface, "MISSION ACCOMPLISHED", "#00ff00", "Press R to Play Again");
            return;
        }
        GamePhase::LevelTransition => {
            let title = format!("LEVEL {} CLEAR", state.level_index + 1);
            let seconds = state.transition_timer.max(0.0).ceil() as u32;
            let prompt = if state.has_next_level() {
                format!("Next level in {seconds}... (Enter to skip)")
            } else {
                format!("Extraction in {seconds}... (Enter to skip)")
            };
            draw_banner(surface, &title, &state.level().theme.accent, &prompt);
        }
        GamePhase::Playing => {}
    }

    if show_controls {
        let lines = [
            "CONTROLS:",
            "Move: WASD / Arrows",
            "Jump: Space / W",
            "Shoot: J / Z",
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = 20.0 + i as f32 * 20.0;
            surface.draw_text(line, 10.0, y, HUD_FONT, HUD_COLOR, TextAlign::Left);
        }
    }

    let right = width - 10.0;
    surface.draw_text(
        &format!("LIVES: {}", state.player.lives),
        right,
        20.0,
        HUD_FONT,
        HUD_COLOR,
        TextAlign::Right,
    );
    surface.draw_text(
        &format!("ENEMIES: {}", state.enemies.len()),
        right,
        40.0,
        HUD_FONT,
        HUD_COLOR,
        TextAlign::Right,
    );
    surface.draw_text(
        &state.level().name,
        width / 2.0,
        height - 10.0,
        HUD_FONT,
        HUD_COLOR,
        TextAlign::Center,
    );
}

/// Dimmed full-screen overlay with a headline and a prompt
fn draw_banner(surface: &mut dyn Surface, title: &str, color: &str, prompt: &str) {
    let (width, height) = surface.viewport();
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), OVERLAY_COLOR);
    surface.draw_text(title, width / 2.0, height / 2.0, 48.0, color, TextAlign::Center);
    surface.draw_text(
        prompt,
        width / 2.0,
        height / 2.0 + 50.0,
        24.0,
        HUD_COLOR,
        TextAlign::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(String),
        Rect(Rect, String),
        Text(String, TextAlign),
        Translate(Vec2),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn has_rect_color(&self, color: &str) -> bool {
            self.ops
                .iter()
                .any(|op| matches!(op, Op::Rect(_, c) if c == color))
        }
    }

    impl Surface for Recorder {
        fn viewport(&self) -> (f32, f32) {
            (800.0, 600.0)
        }

        fn clear(&mut self, color: &str) {
            self.ops.push(Op::Clear(color.to_string()));
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.ops.push(Op::Rect(rect, color.to_string()));
        }

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: &str, align: TextAlign) {
            self.ops.push(Op::Text(text.to_string(), align));
        }

        fn set_translation(&mut self, offset: Vec2) {
            self.ops.push(Op::Translate(offset));
        }
    }

    fn render(state: &GameState, show_controls: bool) -> Recorder {
        let mut camera = Camera::default();
        camera.follow(&state.player.body, state.level());
        let mut recorder = Recorder::default();
        render_frame(state, &camera, &mut recorder, show_controls);
        recorder
    }

    #[test]
    fn test_playing_frame_draws_world_and_hud() {
        let state = GameState::with_builtin_levels().unwrap();
        let recorder = render(&state, true);

        assert_eq!(recorder.ops[0], Op::Clear("#000000".into()));
        assert!(recorder.has_rect_color("#0000ff"));
        assert!(recorder.has_rect_color("#ff0000"));
        let texts = recorder.texts();
        assert!(texts.contains(&"CONTROLS:"));
        assert!(texts.contains(&"LIVES: 3"));
        assert!(texts.contains(&"ENEMIES: 4"));
    }

    #[test]
    fn test_hud_drawn_without_camera_translation() {
        let mut state = GameState::with_builtin_levels().unwrap();
        state.player.body.pos.x = 1500.0;
        let recorder = render(&state, false);

        let translations: Vec<Vec2> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Translate(offset) => Some(*offset),
                _ => None,
            })
            .collect();
        assert_eq!(translations.len(), 2);
        assert!(translations[0].x < 0.0);
        assert_eq!(translations[1], Vec2::ZERO);

        // Text only appears after the reset
        let reset = recorder
            .ops
            .iter()
            .rposition(|op| matches!(op, Op::Translate(_)))
            .unwrap();
        assert!(
            recorder.ops[..reset]
                .iter()
                .all(|op| !matches!(op, Op::Text(text, _) if text.starts_with("LIVES")))
        );
    }

    #[test]
    fn test_controls_hidden_when_disabled() {
        let state = GameState::with_builtin_levels().unwrap();
        let recorder = render(&state, false);
        assert!(!recorder.texts().contains(&"CONTROLS:"));
        assert!(recorder.texts().contains(&"LIVES: 3"));
    }

    #[test]
    fn test_game_over_overlay_hides_player() {
        let mut state = GameState::with_builtin_levels().unwrap();
        state.phase = GamePhase::GameOver;
        let recorder = render(&state, true);

        let texts = recorder.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"Press R to Restart"));
        assert!(!texts.contains(&"CONTROLS:"));
        assert!(!recorder.has_rect_color("#0000ff"));
    }

    #[test]
    fn test_victory_overlay() {
        let mut state = GameState::with_builtin_levels().unwrap();
        state.phase = GamePhase::Victory;
        let recorder = render(&state, true);
        let texts = recorder.texts();
        assert!(texts.contains(&"MISSION ACCOMPLISHED"));
        assert!(texts.contains(&"Press R to Play Again"));
    }

    #[test]
    fn test_transition_banner_counts_down() {
        let mut state = GameState::with_builtin_levels().unwrap();
        state.begin_level_transition();
        state.transition_timer = 2.4;
        let recorder = render(&state, true);
        let texts = recorder.texts();
        assert!(texts.contains(&"LEVEL 1 CLEAR"));
        assert!(texts.contains(&"Next level in 3... (Enter to skip)"));
        // Player still visible between levels
        assert!(recorder.has_rect_color("#0000ff"));
    }

    #[test]
    fn test_boss_health_bar_scales() {
        let mut boss = Boss::new(100.0, 100.0, BossType::Wall);
        boss.hp = 10;
        let mut recorder = Recorder::default();
        boss.draw(&mut recorder);

        let fill = recorder.ops.iter().find_map(|op| match op {
            Op::Rect(rect, color) if color == "#ff0000" => Some(*rect),
            _ => None,
        });
        assert_eq!(fill.map(|r| r.width), Some(48.0));
    }

    #[test]
    fn test_level_theme_colors_used() {
        let levels = crate::sim::builtin_levels().unwrap();
        let mut recorder = Recorder::default();
        levels[1].draw(&mut recorder);
        assert!(recorder.has_rect_color(&levels[1].theme.platform));
        assert!(recorder.has_rect_color(&levels[1].theme.ground));
    }
}
