//! Gravity and vertical collision against the ground and one-way platforms

use super::body::Body;
use super::level::Level;
use crate::consts::{GRAVITY, PLATFORM_TOLERANCE};

/// Apply gravity, integrate vertical motion, then resolve one collision pass.
///
/// The ground always wins over platforms. Platforms only catch entities
/// that are falling or resting (`vel.y >= 0`) and whose feet are within
/// `PLATFORM_TOLERANCE` of the platform top; the first matching platform in
/// level order is used. Horizontal motion is the caller's business.
pub fn resolve(body: &mut Body, level: &Level, dt: f32) {
    body.vel.y += GRAVITY * dt;
    body.pos.y += body.vel.y * dt;

    // Airborne until a surface proves otherwise
    body.grounded = false;

    if body.bottom() >= level.ground_y {
        land(body, level.ground_y);
        return;
    }

    if body.vel.y < 0.0 {
        return;
    }

    let feet = body.bottom();
    for platform in &level.platforms {
        let horizontal = body.right() > platform.x && body.pos.x < platform.right();
        if !horizontal {
            continue;
        }
        if feet >= platform.y && feet <= platform.y + PLATFORM_TOLERANCE {
            land(body, platform.y);
            return;
        }
    }
}

fn land(body: &mut Body, surface_y: f32) {
    body.pos.y = surface_y - body.height();
    body.vel.y = 0.0;
    body.grounded = true;
}
