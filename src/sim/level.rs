//! Level data
//!
//! A level is an immutable world description loaded once per level start.
//! Platform order is preserved from the source data because the physics
//! resolver lands entities on the first matching platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::error::LevelError;

/// A spawn coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Ground-dwelling or flying enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    #[default]
    Walker,
    Drone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: EnemyType,
}

/// Boss variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossType {
    /// Armored wall that fires straight ahead
    #[default]
    Wall,
    /// Pulsing heart that fires an aimed spread
    Heart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: BossType,
}

/// Weapon granted by a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    #[default]
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: PowerUpKind,
}

/// CSS colors used to draw the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTheme {
    pub background: String,
    pub ground: String,
    pub platform: String,
    pub accent: String,
}

impl Default for LevelTheme {
    fn default() -> Self {
        Self {
            background: "#000000".into(),
            ground: "#333333".into(),
            platform: "#555555".into(),
            accent: "#00ff00".into(),
        }
    }
}

fn default_player_start() -> Point {
    Point { x: 50.0, y: 436.0 }
}

/// Immutable world description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    #[serde(default = "default_player_start")]
    pub player_start: Point,
    #[serde(default)]
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub turrets: Vec<Point>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpSpawn>,
    #[serde(default)]
    pub boss: Option<BossSpawn>,
    #[serde(default)]
    pub theme: LevelTheme,
}

impl Level {
    /// A bare level with only a ground line
    pub fn flat(width: f32, height: f32, ground_y: f32) -> Self {
        Self {
            name: String::new(),
            width,
            height,
            ground_y,
            player_start: default_player_start(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            turrets: Vec::new(),
            power_ups: Vec::new(),
            boss: None,
            theme: LevelTheme::default(),
        }
    }

    /// Parse a level from JSON. `name` is used in errors and when the
    /// document does not name itself.
    pub fn from_json(name: &str, json: &str) -> Result<Self, LevelError> {
        let mut level: Level =
            serde_json::from_str(json).map_err(|source| LevelError::Parse {
                name: name.to_string(),
                source,
            })?;
        if level.name.is_empty() {
            level.name = name.to_string();
        }
        level.validate()?;
        Ok(level)
    }

    /// World dimensions must be positive and the ground inside the world.
    /// Spawn coordinates are deliberately not checked.
    pub fn validate(&self) -> Result<(), LevelError> {
        let dims_ok = self.width > 0.0
            && self.height > 0.0
            && self.ground_y > 0.0
            && self.ground_y <= self.height;
        if dims_ok {
            Ok(())
        } else {
            Err(LevelError::InvalidDimensions {
                name: self.name.clone(),
            })
        }
    }

    /// The world rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

const LEVEL_1: &str = include_str!("../../levels/level1.json");
const LEVEL_2: &str = include_str!("../../levels/level2.json");

/// The built-in campaign, in play order
pub fn builtin_levels() -> Result<Vec<Level>, LevelError> {
    Ok(vec![
        Level::from_json("level1", LEVEL_1)?,
        Level::from_json("level2", LEVEL_2)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_parse() {
        let levels = builtin_levels().unwrap();
        assert_eq!(levels.len(), 2);

        let first = &levels[0];
        assert_eq!(first.ground_y, 500.0);
        assert_eq!(first.platforms.len(), 5);
        assert_eq!(first.enemies.len(), 4);
        assert_eq!(first.turrets.len(), 3);
        assert_eq!(first.boss.map(|b| b.kind), Some(BossType::Wall));

        let second = &levels[1];
        assert_eq!(second.boss.map(|b| b.kind), Some(BossType::Heart));
        assert!(second.enemies.iter().any(|e| e.kind == EnemyType::Drone));
    }

    #[test]
    fn test_platform_order_preserved() {
        let levels = builtin_levels().unwrap();
        let xs: Vec<f32> = levels[0].platforms.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![400.0, 700.0, 1000.0, 1400.0, 1600.0]);
    }

    #[test]
    fn test_minimal_level_defaults() {
        let level =
            Level::from_json("tiny", r#"{"width": 800, "height": 600, "ground_y": 500}"#).unwrap();
        assert_eq!(level.name, "tiny");
        assert!(level.platforms.is_empty());
        assert!(level.boss.is_none());
        assert_eq!(level.theme, LevelTheme::default());
        assert_eq!(level.player_start, Point { x: 50.0, y: 436.0 });
    }

    #[test]
    fn test_enemy_kind_defaults_to_walker() {
        let level = Level::from_json(
            "walkers",
            r#"{"width": 800, "height": 600, "ground_y": 500,
                "enemies": [{"x": 100, "y": 436}]}"#,
        )
        .unwrap();
        assert_eq!(level.enemies[0].kind, EnemyType::Walker);
    }

    #[test]
    fn test_bad_json_reports_level_name() {
        let err = Level::from_json("broken", "{ not json").unwrap_err();
        assert!(matches!(err, LevelError::Parse { ref name, .. } if name == "broken"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_ground_outside_world_rejected() {
        let err = Level::from_json(
            "deep",
            r#"{"width": 800, "height": 600, "ground_y": 700}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LevelError::InvalidDimensions { .. }));
    }
}
