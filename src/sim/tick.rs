//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::actors::{Boss, Damageable, Explosion, HeartDrop, Projectile};
use super::collision::check_aabb;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Horizontal axis: -1 left, 0 none, 1 right
    pub axis_x: i8,
    /// Vertical axis: -1 up, 0 none, 1 down
    pub axis_y: i8,
    /// Jump held
    pub jump: bool,
    /// Fire held
    pub fire: bool,
    /// Restart pressed this tick
    pub restart: bool,
    /// Confirm pressed this tick (skips the level transition)
    pub confirm: bool,
}

/// Advance the session by one fixed timestep.
///
/// Events accumulate in `state.events` until the host drains them.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Restart beats everything, in every phase
    if input.restart {
        state.restart();
        state.events.push(GameEvent::Restarted);
        return;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::GameOver | GamePhase::Victory => {
            // Frozen; only let running explosions finish
            update_explosions(state, dt);
            return;
        }
        GamePhase::LevelTransition => {
            update_explosions(state, dt);
            state.transition_timer -= dt;
            if state.transition_timer <= 0.0 || input.confirm {
                state.advance_level();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    update_actors(state, input, dt);
    resolve_combat(state);
    state.retain_active();
}

fn update_explosions(state: &mut GameState, dt: f32) {
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }
    state.explosions.retain(|e| e.active);
}

/// Run every actor's own update rule; collect spawn requests and launch them
fn update_actors(state: &mut GameState, input: &TickInput, dt: f32) {
    let level = &state.levels[state.level_index];
    let mut spawned: Vec<Projectile> = Vec::new();

    // Player
    let actions = state.player.update(input, dt);
    if actions.jumped {
        state.events.push(GameEvent::PlayerJumped);
    }
    if !actions.shots.is_empty() {
        state.events.push(GameEvent::PlayerShot);
        spawned.extend(actions.shots);
    }
    physics::resolve(&mut state.player.body, level, dt);
    let max_x = level.width - state.player.body.width();
    state.player.body.pos.x = state.player.body.pos.x.clamp(0.0, max_x.max(0.0));

    let target = state.player.body.center();

    // Boss appears once the player approaches its spawn point
    if !state.boss_spawned {
        if let Some(spawn) = level.boss {
            if state.player.body.pos.x > spawn.x - BOSS_TRIGGER_DISTANCE {
                state.boss = Some(Boss::from_spawn(&spawn));
                state.boss_spawned = true;
                state.events.push(GameEvent::BossSpawned);
                log::info!("Boss {:?} spawned at x={}", spawn.kind, spawn.x);
            }
        }
    }

    if let Some(boss) = state.boss.as_mut().filter(|b| b.active) {
        let shots = boss.update(target, dt);
        if !shots.is_empty() {
            state.events.push(GameEvent::EnemyShot);
            spawned.extend(shots);
        }
    }

    for turret in &mut state.turrets {
        if let Some(shot) = turret.update(target, dt) {
            state.events.push(GameEvent::EnemyShot);
            spawned.push(shot);
        }
    }

    for power_up in &mut state.power_ups {
        power_up.update(dt);
    }
    for heart in &mut state.heart_drops {
        heart.update(dt);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }

    // Launch this tick's shots, then move every projectile
    state.projectiles.append(&mut spawned);
    let envelope = level.bounds().expand(PROJECTILE_BOUNDS_MARGIN);
    for projectile in &mut state.projectiles {
        projectile.update(dt, &envelope);
    }

    for enemy in &mut state.enemies {
        enemy.update(dt, level);
    }
}

/// Side effects of a target being hit by the player
struct Hit {
    killed: bool,
    center: glam::Vec2,
}

/// Apply one point of damage to `target` if `projectile` overlaps it.
///
/// The projectile is consumed on contact so it can never register a second
/// hit in the same tick.
fn try_hit<T: Damageable>(projectile: &mut Projectile, target: &mut T) -> Option<Hit> {
    if !projectile.active || !target.is_active() || !check_aabb(&*projectile, &*target) {
        return None;
    }
    projectile.active = false;
    target.take_damage(1);
    Some(Hit {
        killed: !target.is_active(),
        center: target.bounds().center(),
    })
}

/// Pairwise hit testing in a fixed order, then outcome transitions
fn resolve_combat(state: &mut GameState) {
    let mut explosions: Vec<Explosion> = Vec::new();
    let mut hearts: Vec<HeartDrop> = Vec::new();
    let mut boss_killed = false;
    let mut player_hits = 0u32;

    // Projectiles
    for projectile in &mut state.projectiles {
        if !projectile.active {
            continue;
        }

        if projectile.is_enemy() {
            if check_aabb(&*projectile, &state.player) {
                projectile.active = false;
                if state.player.take_damage() {
                    player_hits += 1;
                }
            }
            continue;
        }

        for enemy in &mut state.enemies {
            if let Some(hit) = try_hit(projectile, enemy) {
                state.events.push(GameEvent::EnemyHit);
                if hit.killed {
                    explosions.push(Explosion::at(hit.center));
                    if enemy.is_drone() {
                        let half = HEART_DROP_SIZE / 2.0;
                        hearts.push(HeartDrop::new(hit.center.x - half, hit.center.y - half));
                    }
                }
                break;
            }
        }

        for turret in &mut state.turrets {
            if let Some(hit) = try_hit(projectile, turret) {
                state.events.push(GameEvent::EnemyHit);
                if hit.killed {
                    explosions.push(Explosion::at(hit.center));
                }
                break;
            }
        }

        if let Some(boss) = state.boss.as_mut() {
            if let Some(hit) = try_hit(projectile, boss) {
                state.events.push(GameEvent::EnemyHit);
                if hit.killed {
                    explosions.push(Explosion::at(hit.center));
                    boss_killed = true;
                }
            }
        }
    }

    // Contact damage
    for enemy in &state.enemies {
        if enemy.active && check_aabb(&state.player, enemy) && state.player.take_damage() {
            player_hits += 1;
        }
    }
    for turret in &state.turrets {
        if turret.active && check_aabb(&state.player, turret) && state.player.take_damage() {
            player_hits += 1;
        }
    }
    if let Some(boss) = state.boss.as_ref().filter(|b| b.active) {
        if check_aabb(&state.player, boss) && state.player.take_damage() {
            player_hits += 1;
        }
    }

    // Pickups
    for power_up in &mut state.power_ups {
        if power_up.active && check_aabb(&state.player, power_up) {
            power_up.active = false;
            state.player.equip(power_up.kind);
            state.events.push(GameEvent::PowerUpCollected);
            log::debug!("Picked up {:?}", power_up.kind);
        }
    }
    for heart in &mut state.heart_drops {
        if heart.active && check_aabb(&state.player, heart) {
            heart.active = false;
            if state.player.gain_life() {
                state.events.push(GameEvent::LifeUp);
            }
        }
    }

    // Outcomes
    for _ in &explosions {
        state.events.push(GameEvent::Explosion);
    }
    state.explosions.append(&mut explosions);
    state.heart_drops.append(&mut hearts);

    for _ in 0..player_hits {
        state.events.push(GameEvent::PlayerHit);
    }

    if boss_killed {
        state.events.push(GameEvent::BossDefeated);
    }
    // A dead player never clears the level
    if state.player.is_dead() {
        state.game_over();
    } else if boss_killed {
        state.begin_level_transition();
    }
}
