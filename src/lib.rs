//! Run and Gun - A side-scrolling action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, session state)
//! - `scheduler`: Fixed timestep loop driven by a host frame hook
//! - `input`: Keyboard state adapter producing per-tick input snapshots
//! - `camera`: Viewport follow/clamp
//! - `render`: Drawing-surface abstraction and actor drawing
//! - `audio`: Sound cues for simulation events
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod camera;
pub mod error;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use camera::Camera;
pub use error::{InitError, LevelError};
pub use scheduler::{FixedStepLoop, FrameCallbacks, FrameHook};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// How far below a platform top an entity's feet may be and still land
    pub const PLATFORM_TOLERANCE: f32 = 10.0;

    /// Viewport size in pixels
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_FORCE: f32 = -600.0;
    /// Seconds between shots
    pub const FIRE_RATE: f32 = 0.15;
    pub const PLAYER_LIVES: i32 = 3;
    pub const MAX_LIVES: i32 = 5;
    /// Grace period after taking damage (seconds)
    pub const INVULNERABILITY_TIME: f32 = 2.0;
    /// Vertical velocity applied when hurt
    pub const KNOCKBACK_FORCE: f32 = -300.0;
    /// Muzzle height below the player's top edge
    pub const MUZZLE_OFFSET_Y: f32 = 16.0;
    /// Angular offsets of the spread weapon (radians)
    pub const SPREAD_ANGLES: [f32; 3] = [-0.2, 0.0, 0.2];

    /// Projectiles
    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const PLAYER_SHOT_SPEED: f32 = 600.0;
    pub const TURRET_SHOT_SPEED: f32 = 300.0;
    pub const BOSS_SHOT_SPEED: f32 = 400.0;
    pub const HEART_SHOT_SPEED: f32 = 215.0;
    /// Distance outside the level a projectile may travel before despawning
    pub const PROJECTILE_BOUNDS_MARGIN: f32 = 100.0;

    /// Walker enemy
    pub const WALKER_WIDTH: f32 = 32.0;
    pub const WALKER_HEIGHT: f32 = 64.0;
    pub const WALKER_SPEED: f32 = 50.0;
    pub const WALKER_HP: i32 = 3;

    /// Drone enemy
    pub const DRONE_SIZE: f32 = 32.0;
    pub const DRONE_SPEED: f32 = 80.0;
    pub const DRONE_AMPLITUDE: f32 = 50.0;
    pub const DRONE_FREQUENCY: f32 = 2.0;
    pub const DRONE_HP: i32 = 2;

    /// Turret
    pub const TURRET_SIZE: f32 = 32.0;
    pub const TURRET_HP: i32 = 5;
    pub const TURRET_FIRE_RATE: f32 = 2.0;
    pub const TURRET_RANGE: f32 = 600.0;

    /// Bosses
    pub const WALL_BOSS_SIZE: f32 = 96.0;
    pub const WALL_BOSS_HP: i32 = 20;
    pub const HEART_BOSS_SIZE: f32 = 128.0;
    pub const HEART_BOSS_HP: i32 = 30;
    pub const BOSS_ATTACK_INTERVAL: f32 = 2.0;
    /// Half-angle of the heart boss spread (radians)
    pub const HEART_SPREAD: f32 = 0.3;
    /// The boss appears once the player is this close to its spawn x
    pub const BOSS_TRIGGER_DISTANCE: f32 = 200.0;

    /// Pickups
    pub const POWER_UP_SIZE: f32 = 24.0;
    pub const HEART_DROP_SIZE: f32 = 16.0;
    pub const HEART_DROP_LIFETIME: f32 = 3.0;

    /// Explosion animation (frames at fps, no loop)
    pub const EXPLOSION_SIZE: f32 = 32.0;
    pub const EXPLOSION_FRAMES: u32 = 4;
    pub const EXPLOSION_FPS: f32 = 12.0;

    /// Delay between a boss kill and the next level (seconds)
    pub const LEVEL_TRANSITION_DELAY: f32 = 3.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
