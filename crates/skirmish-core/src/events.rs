//! Events emitted by the simulation for audio, HUD and effect triggers.
//!
//! Events are fire-and-forget: the simulation never waits on their consumers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{BombId, BulletId, EnemyId, ExplosionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A bullet left the muzzle. Emitted once per successful spawn.
    ShotFired { bullet_id: BulletId },
    /// A bomb was placed at the player's feet.
    BombDropped { bomb_id: BombId, position: Vec3 },
    /// A bomb's fuse ran out.
    BombDetonated {
        bomb_id: BombId,
        explosion_id: ExplosionId,
        position: Vec3,
    },
    /// An explosion finished lingering.
    ExplosionExpired { explosion_id: ExplosionId },
    /// The spawner produced a new enemy.
    EnemySpawned { enemy_id: EnemyId, position: Vec3 },
    /// A bullet struck an enemy that survived.
    EnemyHit { enemy_id: EnemyId, remaining_hp: u32 },
    /// An enemy's hit points reached zero.
    EnemyKilled { enemy_id: EnemyId, position: Vec3 },
    /// An enemy touched the player.
    PlayerDamaged {
        enemy_id: EnemyId,
        damage: u32,
        health: u32,
    },
    /// The player left the ground.
    Jumped,
    /// The player touched down.
    Landed,
}
