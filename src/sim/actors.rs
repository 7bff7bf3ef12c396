//! Actor behaviors
//!
//! Each actor owns one `Body` plus its own timers and counters. Actors never
//! hold references to each other or to the session: anything that needs the
//! player's position receives it as an argument, and anything that fires
//! returns the projectiles it wants spawned. The session drains those
//! requests once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Bounded, Rect};
use super::level::{BossSpawn, BossType, EnemySpawn, EnemyType, Level, PowerUpKind, PowerUpSpawn};
use super::physics;
use super::tick::TickInput;
use crate::consts::*;
use crate::direction_from_angle;

/// Which side a projectile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Something that can be shot
pub trait Damageable: Bounded {
    fn take_damage(&mut self, amount: i32);
    fn is_active(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Projectile
// ---------------------------------------------------------------------------

/// A faction-tagged bullet travelling at constant velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub faction: Faction,
    pub active: bool,
}

impl Projectile {
    /// Create a projectile with its top-left corner at `pos`
    pub fn new(pos: Vec2, vel: Vec2, faction: Faction) -> Self {
        Self {
            body: Body::new(pos.x, pos.y, PROJECTILE_SIZE, PROJECTILE_SIZE).with_velocity(vel),
            faction,
            active: true,
        }
    }

    /// Create a projectile centered on `center`
    pub fn centered(center: Vec2, vel: Vec2, faction: Faction) -> Self {
        Self::new(center - Vec2::splat(PROJECTILE_SIZE / 2.0), vel, faction)
    }

    /// Move, and despawn once fully outside `envelope`
    pub fn update(&mut self, dt: f32, envelope: &Rect) {
        self.body.integrate(dt);
        if envelope.excludes(&self.body.rect()) {
            self.active = false;
        }
    }

    pub fn is_enemy(&self) -> bool {
        self.faction == Faction::Enemy
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Fire mode of the player's gun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Standard,
    Spread,
}

impl From<PowerUpKind> for Weapon {
    fn from(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Spread => Weapon::Spread,
        }
    }
}

/// What the player did this tick
#[derive(Debug, Default)]
pub struct PlayerActions {
    pub jumped: bool,
    pub shots: Vec<Projectile>,
}

/// The player-controlled soldier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: i32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub fire_cooldown: f32,
    /// Seconds of invulnerability remaining
    pub invulnerable: f32,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            lives: PLAYER_LIVES,
            facing: 1.0,
            fire_cooldown: 0.0,
            invulnerable: 0.0,
            weapon: Weapon::Standard,
        }
    }

    /// Horizontal movement, jumping and shooting. Gravity and landing are
    /// left to the physics resolver, which the session runs right after.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> PlayerActions {
        let mut actions = PlayerActions::default();

        let move_x = input.axis_x.signum() as f32;
        self.body.vel.x = move_x * PLAYER_SPEED;
        self.body.pos.x += self.body.vel.x * dt;
        if move_x != 0.0 {
            self.facing = move_x;
        }

        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }

        if self.body.grounded && input.jump {
            self.body.vel.y = JUMP_FORCE;
            self.body.grounded = false;
            actions.jumped = true;
        }

        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
        if input.fire && self.fire_cooldown <= 0.0 {
            actions.shots = self.shoot();
            self.fire_cooldown = FIRE_RATE;
        }

        actions
    }

    fn shoot(&self) -> Vec<Projectile> {
        let muzzle = Vec2::new(
            if self.facing > 0.0 {
                self.body.right()
            } else {
                self.body.pos.x - PROJECTILE_SIZE
            },
            self.body.pos.y + MUZZLE_OFFSET_Y,
        );

        match self.weapon {
            Weapon::Standard => vec![Projectile::new(
                muzzle,
                Vec2::new(self.facing * PLAYER_SHOT_SPEED, 0.0),
                Faction::Player,
            )],
            Weapon::Spread => SPREAD_ANGLES
                .iter()
                .map(|&angle| {
                    let dir = direction_from_angle(angle);
                    let vel = Vec2::new(dir.x * self.facing, dir.y) * PLAYER_SHOT_SPEED;
                    Projectile::new(muzzle, vel, Faction::Player)
                })
                .collect(),
        }
    }

    /// Lose a life unless invulnerable. Returns whether damage was taken.
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable > 0.0 {
            return false;
        }
        self.lives -= 1;
        self.invulnerable = INVULNERABILITY_TIME;
        self.body.vel.y = KNOCKBACK_FORCE;
        self.body.grounded = false;
        true
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.lives <= 0
    }

    pub fn equip(&mut self, kind: PowerUpKind) {
        self.weapon = kind.into();
    }

    /// Add a life up to the cap. Returns false when already full.
    pub fn gain_life(&mut self) -> bool {
        if self.lives >= MAX_LIVES {
            return false;
        }
        self.lives += 1;
        true
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

// ---------------------------------------------------------------------------
// Enemies
// ---------------------------------------------------------------------------

/// Movement pattern of a regular enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Marches left along the ground, falling off ledges
    Walker,
    /// Flies left while bobbing around a baseline
    Drone { start_y: f32, time: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub hp: i32,
    pub active: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn walker(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, WALKER_WIDTH, WALKER_HEIGHT),
            hp: WALKER_HP,
            active: true,
            kind: EnemyKind::Walker,
        }
    }

    pub fn drone(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, DRONE_SIZE, DRONE_SIZE),
            hp: DRONE_HP,
            active: true,
            kind: EnemyKind::Drone {
                start_y: y,
                time: 0.0,
            },
        }
    }

    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        match spawn.kind {
            EnemyType::Walker => Self::walker(spawn.x, spawn.y),
            EnemyType::Drone => Self::drone(spawn.x, spawn.y),
        }
    }

    pub fn update(&mut self, dt: f32, level: &Level) {
        match &mut self.kind {
            EnemyKind::Walker => {
                self.body.vel.x = -WALKER_SPEED;
                self.body.pos.x += self.body.vel.x * dt;
                physics::resolve(&mut self.body, level, dt);
            }
            EnemyKind::Drone { start_y, time } => {
                *time += dt;
                self.body.vel.x = -DRONE_SPEED;
                self.body.pos.x += self.body.vel.x * dt;
                self.body.pos.y = *start_y + (*time * DRONE_FREQUENCY).sin() * DRONE_AMPLITUDE;
            }
        }

        if self.body.is_off_left() {
            self.active = false;
        }
    }

    pub fn is_drone(&self) -> bool {
        matches!(self.kind, EnemyKind::Drone { .. })
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ---------------------------------------------------------------------------
// Turret
// ---------------------------------------------------------------------------

/// Stationary gun that fires at the player when in range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub body: Body,
    pub hp: i32,
    pub active: bool,
    pub fire_timer: f32,
}

impl Turret {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, TURRET_SIZE, TURRET_SIZE),
            hp: TURRET_HP,
            active: true,
            fire_timer: 0.0,
        }
    }

    /// `target` is the player's center. No line-of-sight check.
    pub fn update(&mut self, target: Vec2, dt: f32) -> Option<Projectile> {
        self.fire_timer -= dt;

        let center = self.body.center();
        let delta = target - center;
        let dist = delta.length();
        if dist >= TURRET_RANGE || self.fire_timer > 0.0 {
            return None;
        }

        self.fire_timer = TURRET_FIRE_RATE;
        let dir = if dist > 0.0 { delta / dist } else { Vec2::NEG_X };
        Some(Projectile::centered(
            center,
            dir * TURRET_SHOT_SPEED,
            Faction::Enemy,
        ))
    }
}

impl Bounded for Turret {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

impl Damageable for Turret {
    fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ---------------------------------------------------------------------------
// Boss
// ---------------------------------------------------------------------------

/// End-of-level guardian; killing it clears the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: Body,
    pub kind: BossType,
    pub hp: i32,
    pub max_hp: i32,
    pub active: bool,
    pub attack_timer: f32,
}

impl Boss {
    pub fn new(x: f32, y: f32, kind: BossType) -> Self {
        let (size, hp) = match kind {
            BossType::Wall => (WALL_BOSS_SIZE, WALL_BOSS_HP),
            BossType::Heart => (HEART_BOSS_SIZE, HEART_BOSS_HP),
        };
        Self {
            body: Body::new(x, y, size, size),
            kind,
            hp,
            max_hp: hp,
            active: true,
            attack_timer: 0.0,
        }
    }

    pub fn from_spawn(spawn: &BossSpawn) -> Self {
        Self::new(spawn.x, spawn.y, spawn.kind)
    }

    /// Attack on a fixed interval. `target` is the player's center.
    pub fn update(&mut self, target: Vec2, dt: f32) -> Vec<Projectile> {
        self.attack_timer -= dt;
        if self.attack_timer > 0.0 {
            return Vec::new();
        }
        self.attack_timer = BOSS_ATTACK_INTERVAL;

        let center = self.body.center();
        match self.kind {
            BossType::Wall => {
                let muzzle = Vec2::new(
                    self.body.pos.x - PROJECTILE_SIZE,
                    center.y - PROJECTILE_SIZE / 2.0,
                );
                vec![Projectile::new(
                    muzzle,
                    Vec2::new(-BOSS_SHOT_SPEED, 0.0),
                    Faction::Enemy,
                )]
            }
            BossType::Heart => {
                let delta = target - center;
                let aim = delta.y.atan2(delta.x);
                [aim - HEART_SPREAD, aim, aim + HEART_SPREAD]
                    .into_iter()
                    .map(|angle| {
                        Projectile::centered(
                            center,
                            direction_from_angle(angle) * HEART_SHOT_SPEED,
                            Faction::Enemy,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Remaining health as a 0-1 fraction
    pub fn health_fraction(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

impl Bounded for Boss {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

impl Damageable for Boss {
    fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
        if self.hp <= 0 {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ---------------------------------------------------------------------------
// Pickups and effects
// ---------------------------------------------------------------------------

/// Floating weapon pickup; never expires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    pub active: bool,
    start_y: f32,
    time: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            body: Body::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            active: true,
            start_y: y,
            time: 0.0,
        }
    }

    pub fn from_spawn(spawn: &PowerUpSpawn) -> Self {
        Self::new(spawn.x, spawn.y, spawn.kind)
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.body.pos.y = self.start_y + (self.time * 3.0).sin() * 10.0;
    }
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

/// Extra life dropped by destroyed drones; expires after a few seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartDrop {
    pub body: Body,
    pub active: bool,
    /// Seconds left to collect it
    pub lifetime: f32,
    start_y: f32,
    time: f32,
}

impl HeartDrop {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, HEART_DROP_SIZE, HEART_DROP_SIZE),
            active: true,
            lifetime: HEART_DROP_LIFETIME,
            start_y: y,
            time: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
        self.body.pos.y = self.start_y + (self.time * 5.0).sin() * 5.0;
    }

    /// Blinks every 0.1s during the last second
    pub fn visible(&self) -> bool {
        self.lifetime >= 1.0 || ((self.lifetime * 10.0).floor() as i32) % 2 == 0
    }
}

impl Bounded for HeartDrop {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}

/// Visual-only blast that removes itself after one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub body: Body,
    pub active: bool,
    elapsed: f32,
}

impl Explosion {
    /// Create an explosion centered on `center`
    pub fn at(center: Vec2) -> Self {
        let half = EXPLOSION_SIZE / 2.0;
        Self {
            body: Body::new(center.x - half, center.y - half, EXPLOSION_SIZE, EXPLOSION_SIZE),
            active: true,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.frame() >= EXPLOSION_FRAMES {
            self.active = false;
        }
    }

    /// Current animation frame
    pub fn frame(&self) -> u32 {
        (self.elapsed * EXPLOSION_FPS).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_invulnerability_blocks_second_hit() {
        let mut player = Player::new(50.0, 436.0);
        assert!(player.take_damage());
        assert!(!player.take_damage());
        assert_eq!(player.lives, PLAYER_LIVES - 1);
        assert!(player.body.vel.y < 0.0);
    }

    #[test]
    fn test_player_invulnerability_expires() {
        let mut player = Player::new(50.0, 436.0);
        assert!(player.take_damage());
        let input = TickInput::default();
        // A bit over two seconds at 60 Hz
        for _ in 0..125 {
            player.update(&input, SIM_DT);
        }
        assert!(!player.is_invulnerable());
        assert!(player.take_damage());
        assert_eq!(player.lives, PLAYER_LIVES - 2);
    }

    #[test]
    fn test_player_facing_is_sticky() {
        let mut player = Player::new(100.0, 436.0);
        let left = TickInput {
            axis_x: -1,
            ..Default::default()
        };
        player.update(&left, SIM_DT);
        assert_eq!(player.facing, -1.0);
        assert!(player.body.pos.x < 100.0);

        player.update(&TickInput::default(), SIM_DT);
        assert_eq!(player.facing, -1.0);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_player_jump_requires_ground() {
        let mut player = Player::new(50.0, 436.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let actions = player.update(&jump, SIM_DT);
        assert!(!actions.jumped);

        player.body.grounded = true;
        let actions = player.update(&jump, SIM_DT);
        assert!(actions.jumped);
        assert_eq!(player.body.vel.y, JUMP_FORCE);
        assert!(!player.body.grounded);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let mut player = Player::new(50.0, 436.0);
        let shots: usize = (0..60).map(|_| player.update(&fire(), SIM_DT).shots.len()).sum();
        // 0.15s between shots => 6 or 7 shots per second
        assert!((6..=7).contains(&shots), "shots = {shots}");
    }

    #[test]
    fn test_player_shot_direction_and_muzzle() {
        let mut player = Player::new(100.0, 436.0);
        let shots = player.update(&fire(), SIM_DT).shots;
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].faction, Faction::Player);
        assert!(shots[0].body.vel.x > 0.0);
        assert_eq!(shots[0].body.pos.x, player.body.right());
        assert_eq!(shots[0].body.pos.y, player.body.pos.y + MUZZLE_OFFSET_Y);

        let mut player = Player::new(100.0, 436.0);
        player.facing = -1.0;
        let shots = player.update(&fire(), SIM_DT).shots;
        assert!(shots[0].body.vel.x < 0.0);
        assert_eq!(shots[0].body.pos.x, 100.0 - PROJECTILE_SIZE);
    }

    #[test]
    fn test_spread_weapon_fires_three() {
        let mut player = Player::new(100.0, 436.0);
        player.equip(PowerUpKind::Spread);
        let shots = player.update(&fire(), SIM_DT).shots;
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().all(|s| s.body.vel.x > 0.0));
        assert!(shots[0].body.vel.y < 0.0);
        assert_eq!(shots[1].body.vel.y, 0.0);
        assert!(shots[2].body.vel.y > 0.0);
    }

    #[test]
    fn test_gain_life_capped() {
        let mut player = Player::new(0.0, 0.0);
        while player.gain_life() {}
        assert_eq!(player.lives, MAX_LIVES);
    }

    #[test]
    fn test_walker_drifts_left_and_despawns() {
        let level = Level::flat(3000.0, 600.0, 500.0);
        let mut walker = Enemy::walker(10.0, 436.0);
        walker.update(SIM_DT, &level);
        assert!(walker.body.pos.x < 10.0);
        assert!(walker.body.grounded);

        for _ in 0..120 {
            walker.update(SIM_DT, &level);
        }
        assert!(!walker.active);
    }

    #[test]
    fn test_drone_oscillates_around_baseline() {
        let level = Level::flat(3000.0, 600.0, 500.0);
        let mut drone = Enemy::drone(1000.0, 250.0);
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for _ in 0..240 {
            drone.update(SIM_DT, &level);
            min_y = min_y.min(drone.body.pos.y);
            max_y = max_y.max(drone.body.pos.y);
        }
        assert!(max_y <= 250.0 + DRONE_AMPLITUDE + 0.01);
        assert!(min_y >= 250.0 - DRONE_AMPLITUDE - 0.01);
        assert!(max_y - min_y > DRONE_AMPLITUDE);
        assert!(drone.body.pos.x < 1000.0);
    }

    #[test]
    fn test_enemy_damage_deactivates_at_zero() {
        let mut walker = Enemy::walker(500.0, 436.0);
        walker.take_damage(1);
        walker.take_damage(1);
        assert!(walker.active);
        walker.take_damage(1);
        assert!(!walker.active);
    }

    #[test]
    fn test_turret_out_of_range_never_fires() {
        let mut turret = Turret::new(0.0, 0.0);
        let target = turret.body.center() + Vec2::new(650.0, 0.0);
        for _ in 0..600 {
            assert!(turret.update(target, SIM_DT).is_none());
        }
    }

    #[test]
    fn test_turret_fires_once_per_interval_in_range() {
        let mut turret = Turret::new(0.0, 0.0);
        let far = turret.body.center() + Vec2::new(650.0, 0.0);
        for _ in 0..30 {
            assert!(turret.update(far, SIM_DT).is_none());
        }

        let near = turret.body.center() + Vec2::new(599.0, 0.0);
        // Just under one fire interval
        let shots: Vec<Projectile> = (0..119)
            .filter_map(|_| turret.update(near, SIM_DT))
            .collect();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].faction, Faction::Enemy);
        assert!((shots[0].body.vel.length() - TURRET_SHOT_SPEED).abs() < 0.01);
        assert!(shots[0].body.vel.x > 0.0);
    }

    #[test]
    fn test_boss_dies_on_exactly_last_hit() {
        let mut boss = Boss::new(2800.0, 404.0, BossType::Wall);
        assert_eq!(boss.hp, 20);
        for _ in 0..19 {
            boss.take_damage(1);
            assert!(boss.active);
        }
        boss.take_damage(1);
        assert!(!boss.active);
        assert_eq!(boss.health_fraction(), 0.0);
    }

    #[test]
    fn test_wall_boss_fires_straight_left() {
        let mut boss = Boss::new(2800.0, 404.0, BossType::Wall);
        let shots = boss.update(Vec2::new(100.0, 100.0), SIM_DT);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].body.vel, Vec2::new(-BOSS_SHOT_SPEED, 0.0));

        // Next attack only after the interval
        let more: usize = (0..100).map(|_| boss.update(Vec2::ZERO, SIM_DT).len()).sum();
        assert_eq!(more, 0);
    }

    #[test]
    fn test_heart_boss_fans_three_shots_at_player() {
        let mut boss = Boss::new(2800.0, 372.0, BossType::Heart);
        let target = boss.body.center() + Vec2::new(-500.0, 0.0);
        let shots = boss.update(target, SIM_DT);
        assert_eq!(shots.len(), 3);
        // Middle shot aims straight at the target
        let mid = shots[1].body.vel.normalize();
        assert!((mid - Vec2::NEG_X).length() < 1e-4);
        for shot in &shots {
            assert!((shot.body.vel.length() - HEART_SHOT_SPEED).abs() < 0.01);
        }
        let outer = shots[0].body.vel.normalize().dot(shots[2].body.vel.normalize());
        let spread = outer.clamp(-1.0, 1.0).acos();
        assert!((spread - 2.0 * HEART_SPREAD).abs() < 1e-3);
    }

    #[test]
    fn test_projectile_leaves_envelope() {
        let envelope = Rect::new(0.0, 0.0, 800.0, 600.0).expand(PROJECTILE_BOUNDS_MARGIN);
        let mut shot = Projectile::new(Vec2::new(850.0, 300.0), Vec2::new(600.0, 0.0), Faction::Player);
        shot.update(SIM_DT, &envelope);
        assert!(shot.active);
        for _ in 0..10 {
            shot.update(SIM_DT, &envelope);
        }
        assert!(!shot.active);
    }

    #[test]
    fn test_heart_drop_expires_and_blinks() {
        let mut heart = HeartDrop::new(100.0, 400.0);
        heart.update(SIM_DT);
        assert!(heart.visible());

        let mut saw_hidden = false;
        while heart.active {
            heart.update(SIM_DT);
            if heart.lifetime < 1.0 && !heart.visible() {
                saw_hidden = true;
            }
        }
        assert!(saw_hidden);
        assert!(heart.lifetime <= 0.0);
    }

    #[test]
    fn test_power_up_never_expires() {
        let mut power_up = PowerUp::new(600.0, 400.0, PowerUpKind::Spread);
        for _ in 0..6000 {
            power_up.update(SIM_DT);
        }
        assert!(power_up.active);
        assert!((power_up.body.pos.y - 400.0).abs() <= 10.0 + 1e-3);
    }

    #[test]
    fn test_explosion_finishes_after_animation() {
        let mut explosion = Explosion::at(Vec2::new(100.0, 100.0));
        assert_eq!(explosion.body.center(), Vec2::new(100.0, 100.0));

        let duration = EXPLOSION_FRAMES as f32 / EXPLOSION_FPS;
        let ticks = (duration / SIM_DT).ceil() as usize;
        for _ in 0..ticks - 2 {
            explosion.update(SIM_DT);
        }
        assert!(explosion.active);
        for _ in 0..4 {
            explosion.update(SIM_DT);
        }
        assert!(!explosion.active);
    }
}
