//! Combat resolver: the single place where entity kinds interact.
//!
//! Runs after every system has advanced its own entities. Bullet-enemy hits
//! are resolved before enemy-player contact, so an enemy killed this tick
//! cannot hurt the player this tick. Removals are collected during the pass
//! and applied once at the end of it.

use glam::Vec3;

use skirmish_core::config::Tuning;
use skirmish_core::events::GameEvent;
use skirmish_core::types::{BulletId, EnemyId};

use crate::systems::enemy::EnemySystem;
use crate::systems::kinematics::PlayerState;
use crate::systems::projectile::ProjectileSystem;

/// What one resolution pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatOutcome {
    /// Bullets consumed by hits, removed at the end of the pass.
    pub spent_bullets: Vec<BulletId>,
    /// Enemies that reached zero hit points, removed at the end of the pass.
    pub killed: Vec<EnemyId>,
    /// Health the player actually lost.
    pub damage_taken: u32,
    pub events: Vec<GameEvent>,
}

/// Reconcile bullets, enemies and the player for one tick.
pub fn resolve(
    player: &mut PlayerState,
    projectiles: &mut ProjectileSystem,
    enemies: &mut EnemySystem,
    tuning: &Tuning,
) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();

    resolve_bullet_hits(projectiles, enemies, tuning, &mut outcome);
    resolve_player_contact(player, enemies, tuning, &mut outcome);

    projectiles.remove_many(&outcome.spent_bullets);
    enemies.remove_many(&outcome.killed);
    outcome
}

/// Each bullet hits at most one enemy: the first live one in spawn order
/// that is inside the hit radius.
fn resolve_bullet_hits(
    projectiles: &ProjectileSystem,
    enemies: &mut EnemySystem,
    tuning: &Tuning,
    outcome: &mut CombatOutcome,
) {
    for bullet in projectiles.bullets() {
        let target = enemies
            .enemies()
            .iter()
            .find(|enemy| {
                enemy.is_alive() && bullet.position.distance(enemy.position) < tuning.hit_radius
            })
            .map(|enemy| (enemy.id, enemy.position));

        let Some((enemy_id, enemy_position)) = target else {
            continue;
        };
        let Some(remaining_hp) = enemies.apply_damage(enemy_id, tuning.bullet_damage) else {
            log::warn!("{enemy_id} vanished mid-pass; ignoring hit");
            continue;
        };

        outcome.spent_bullets.push(bullet.id);
        if remaining_hp == 0 {
            log::debug!("{} killed {enemy_id}", bullet.id);
            outcome.killed.push(enemy_id);
            outcome.events.push(GameEvent::EnemyKilled {
                enemy_id,
                position: enemy_position,
            });
        } else {
            outcome.events.push(GameEvent::EnemyHit {
                enemy_id,
                remaining_hp,
            });
        }
    }
}

/// Every live enemy touching the player deals contact damage and is shoved
/// straight away from the player, so the next tick's check starts clear.
fn resolve_player_contact(
    player: &mut PlayerState,
    enemies: &mut EnemySystem,
    tuning: &Tuning,
    outcome: &mut CombatOutcome,
) {
    for enemy in enemies.enemies_mut().iter_mut().filter(|e| e.is_alive()) {
        let offset = enemy.position - player.position;
        if offset.length() >= tuning.contact_radius {
            continue;
        }

        let before = player.health;
        player.health = player.health.saturating_sub(tuning.contact_damage);
        let damage = before - player.health;
        if damage > 0 {
            outcome.damage_taken += damage;
            outcome.events.push(GameEvent::PlayerDamaged {
                enemy_id: enemy.id,
                damage,
                health: player.health,
            });
        }

        let away = Vec3::new(offset.x, 0.0, offset.z)
            .try_normalize()
            .unwrap_or(Vec3::X);
        enemy.position += away * tuning.push_back_distance;
    }
}
