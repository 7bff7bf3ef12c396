//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level order, then spawn order)
//! - No rendering or platform dependencies

pub mod actors;
pub mod body;
pub mod collision;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use actors::{
    Boss, Damageable, Enemy, EnemyKind, Explosion, Faction, HeartDrop, Player, PlayerActions,
    PowerUp, Projectile, Turret, Weapon,
};
pub use body::Body;
pub use collision::{Bounded, Rect, check_aabb};
pub use level::{
    BossSpawn, BossType, EnemySpawn, EnemyType, Level, LevelTheme, Point, PowerUpKind,
    PowerUpSpawn, builtin_levels,
};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
