//! Snapshot system: reads every collection and builds a `GameStateSnapshot`.
//!
//! This system is read-only. HUD counts are taken from the collections
//! themselves so they cannot drift from what is actually alive.

use skirmish_core::config::Tuning;
use skirmish_core::enums::SessionPhase;
use skirmish_core::events::GameEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;

use crate::presentation;
use crate::systems::enemy::EnemySystem;
use crate::systems::kinematics::PlayerState;
use crate::systems::ordnance::OrdnanceSystem;
use crate::systems::projectile::ProjectileSystem;

/// Running score tracked by the engine. Cumulative, never derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub shots_fired: u32,
    pub bombs_dropped: u32,
    pub damage_taken: u32,
}

/// Borrowed view of everything a snapshot is built from.
pub struct SnapshotSources<'a> {
    pub time: &'a SimTime,
    pub phase: SessionPhase,
    pub tuning: &'a Tuning,
    pub player: &'a PlayerState,
    pub projectiles: &'a ProjectileSystem,
    pub ordnance: &'a OrdnanceSystem,
    pub enemies: &'a EnemySystem,
    pub score: &'a ScoreState,
}

/// Build a complete snapshot of the current state.
pub fn build_snapshot(src: &SnapshotSources<'_>, events: Vec<GameEvent>) -> GameStateSnapshot {
    let player = src.player;

    GameStateSnapshot {
        time: *src.time,
        phase: src.phase,
        player: PlayerView {
            position: player.position,
            yaw: player.yaw,
            vertical_velocity: player.vertical_velocity,
            health: player.health,
            motion: player.motion,
            is_moving: player.is_moving,
        },
        bullets: build_bullets(src.projectiles),
        bombs: build_bombs(src.ordnance),
        explosions: build_explosions(src.ordnance),
        enemies: build_enemies(src.enemies),
        hud: build_hud(src),
        camera: presentation::follow_camera(player.position, player.yaw),
        pose: presentation::limb_pose(src.time.elapsed_secs, player.is_moving),
        events,
    }
}

fn build_bullets(projectiles: &ProjectileSystem) -> Vec<BulletView> {
    projectiles
        .bullets()
        .iter()
        .map(|b| BulletView {
            id: b.id,
            position: b.position,
            direction: b.direction,
        })
        .collect()
}

fn build_bombs(ordnance: &OrdnanceSystem) -> Vec<BombView> {
    ordnance
        .bombs()
        .iter()
        .map(|b| BombView {
            id: b.id,
            position: b.position,
            fuse_remaining_secs: b.fuse_remaining.max(0.0),
        })
        .collect()
}

fn build_explosions(ordnance: &OrdnanceSystem) -> Vec<ExplosionView> {
    ordnance
        .explosions()
        .iter()
        .map(|e| ExplosionView {
            id: e.id,
            position: e.position,
            ttl_secs: e.ttl.max(0.0),
        })
        .collect()
}

fn build_enemies(enemies: &EnemySystem) -> Vec<EnemyView> {
    enemies
        .enemies()
        .iter()
        .map(|e| EnemyView {
            id: e.id,
            position: e.position,
            hp: e.hp,
            flashing: e.is_flashing(),
        })
        .collect()
}

fn build_hud(src: &SnapshotSources<'_>) -> HudView {
    HudView {
        bullets: src.projectiles.len() as u32,
        bombs: src.ordnance.bombs().len() as u32,
        explosions: src.ordnance.explosions().len() as u32,
        enemies: src.enemies.len() as u32,
        health: src.player.health,
        max_health: src.tuning.max_health,
        score: ScoreView {
            enemies_killed: src.score.enemies_killed,
            shots_fired: src.score.shots_fired,
            bombs_dropped: src.score.bombs_dropped,
            damage_taken: src.score.damage_taken,
        },
    }
}
