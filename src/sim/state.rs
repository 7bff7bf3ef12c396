//! Session state
//!
//! `GameState` owns every live actor plus the level campaign, and tracks
//! which phase of play the session is in.

use serde::{Deserialize, Serialize};

use super::actors::{Boss, Enemy, Explosion, HeartDrop, Player, PowerUp, Projectile, Turret};
use super::level::{Level, builtin_levels};
use crate::consts::*;
use crate::error::LevelError;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Boss down, counting down to the next level
    LevelTransition,
    /// Player ran out of lives
    GameOver,
    /// Final boss defeated
    Victory,
}

impl GamePhase {
    /// GameOver and Victory only end through a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Something noteworthy that happened during a tick.
///
/// Hosts drain these after each tick to drive audio; the simulation never
/// waits on what they do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot,
    PlayerJumped,
    /// A turret or boss fired
    EnemyShot,
    /// A player shot connected with an enemy, turret or boss
    EnemyHit,
    /// The player lost a life
    PlayerHit,
    Explosion,
    PowerUpCollected,
    LifeUp,
    BossSpawned,
    BossDefeated,
    LevelStarted { index: usize },
    GameOver,
    Victory,
    Restarted,
}

/// The whole simulated session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Campaign, in play order
    pub levels: Vec<Level>,
    /// Index into `levels` of the level being played
    pub level_index: usize,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub turrets: Vec<Turret>,
    pub boss: Option<Boss>,
    /// The level's boss has appeared (it never respawns)
    pub boss_spawned: bool,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub heart_drops: Vec<HeartDrop>,
    pub explosions: Vec<Explosion>,
    /// Seconds left before the next level loads
    pub transition_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session on the first of `levels`
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        let first = levels.first().ok_or(LevelError::Empty)?;
        let player = Player::new(first.player_start.x, first.player_start.y);

        let mut state = Self {
            levels,
            level_index: 0,
            phase: GamePhase::Playing,
            player,
            enemies: Vec::new(),
            turrets: Vec::new(),
            boss: None,
            boss_spawned: false,
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            heart_drops: Vec::new(),
            explosions: Vec::new(),
            transition_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.load_level(0);
        Ok(state)
    }

    /// Start a session on the built-in campaign
    pub fn with_builtin_levels() -> Result<Self, LevelError> {
        Self::new(builtin_levels()?)
    }

    /// The level being played
    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    /// Whether another level follows the current one
    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < self.levels.len()
    }

    /// Replace all actors with the spawn lists of level `index`.
    ///
    /// The player keeps lives and weapon but moves to the level start.
    pub fn load_level(&mut self, index: usize) {
        self.level_index = index;
        self.phase = GamePhase::Playing;
        self.transition_timer = 0.0;

        let level = &self.levels[index];
        self.enemies = level.enemies.iter().map(Enemy::from_spawn).collect();
        self.turrets = level.turrets.iter().map(|t| Turret::new(t.x, t.y)).collect();
        self.power_ups = level.power_ups.iter().map(PowerUp::from_spawn).collect();
        self.boss = None;
        self.boss_spawned = false;
        self.projectiles.clear();
        self.heart_drops.clear();

        let start = level.player_start;
        self.player.body.pos = start.into();
        self.player.body.vel = glam::Vec2::ZERO;
        self.player.body.grounded = false;

        log::info!(
            "Level {} ({}): {} enemies, {} turrets, boss: {}",
            index + 1,
            level.name,
            self.enemies.len(),
            self.turrets.len(),
            level.boss.is_some()
        );
        self.events.push(GameEvent::LevelStarted { index });
    }

    /// Back to the first level with a fresh player. Any pending level
    /// transition is dropped along with the rest of the session.
    pub fn restart(&mut self) {
        let start = self.levels[0].player_start;
        self.player = Player::new(start.x, start.y);
        self.explosions.clear();
        self.load_level(0);
        log::info!("Session restarted");
    }

    /// Enter the between-levels countdown after a boss kill
    pub fn begin_level_transition(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::LevelTransition;
        self.transition_timer = LEVEL_TRANSITION_DELAY;
        log::info!("Level {} cleared", self.level_index + 1);
    }

    /// Load the next level, or finish the campaign
    pub fn advance_level(&mut self) {
        if self.has_next_level() {
            self.load_level(self.level_index + 1);
        } else {
            self.phase = GamePhase::Victory;
            self.transition_timer = 0.0;
            self.events.push(GameEvent::Victory);
            log::info!("Campaign complete");
        }
    }

    /// Player ran out of lives
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        log::info!("Game over on level {}", self.level_index + 1);
    }

    /// Take every event raised since the previous drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every actor whose `active` flag went false this tick
    pub fn retain_active(&mut self) {
        self.projectiles.retain(|p| p.active);
        self.enemies.retain(|e| e.active);
        self.turrets.retain(|t| t.active);
        self.power_ups.retain(|p| p.active);
        self.heart_drops.retain(|h| h.active);
        self.explosions.retain(|e| e.active);
        if self.boss.as_ref().is_some_and(|b| !b.active) {
            self.boss = None;
        }
    }
}
