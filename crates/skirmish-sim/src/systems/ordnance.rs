//! Ordnance system: bombs on a fuse and the explosions they leave behind.
//!
//! Bomb lifecycle is Armed -> Detonated. A detonated bomb is removed in the
//! same tick and replaced by exactly one explosion at its frozen position.
//! Explosions deal no damage; they are a trigger for effects only.

use glam::Vec3;

use skirmish_core::config::Tuning;
use skirmish_core::constants::TIMER_EPSILON;
use skirmish_core::types::{BombId, ExplosionId, IdCounter};

#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub id: BombId,
    pub position: Vec3,
    pub fuse_remaining: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub id: ExplosionId,
    pub position: Vec3,
    pub ttl: f32,
}

#[derive(Debug, Clone)]
pub struct OrdnanceSystem {
    bombs: Vec<Bomb>,
    explosions: Vec<Explosion>,
    bomb_ids: IdCounter,
    explosion_ids: IdCounter,
    fuse_secs: f32,
    explosion_lifetime: f32,
}

impl OrdnanceSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bombs: Vec::new(),
            explosions: Vec::new(),
            bomb_ids: IdCounter::default(),
            explosion_ids: IdCounter::default(),
            fuse_secs: tuning.bomb_fuse_secs,
            explosion_lifetime: tuning.explosion_lifetime_secs,
        }
    }

    /// Arm a bomb at `origin`. The fuse starts counting on the next advance.
    pub fn drop(&mut self, origin: Vec3) -> BombId {
        let id = BombId(self.bomb_ids.next_raw());
        self.bombs.push(Bomb {
            id,
            position: origin,
            fuse_remaining: self.fuse_secs,
        });
        log::debug!("armed {id} at {origin}");
        id
    }

    /// Count every fuse down by `dt`. Bombs whose fuse ran out are removed and
    /// each yields one new explosion, returned alongside the bomb's id.
    pub fn advance_all(&mut self, dt: f32) -> Vec<(BombId, Explosion)> {
        let mut detonations = Vec::new();
        let lifetime = self.explosion_lifetime;
        let explosion_ids = &mut self.explosion_ids;

        self.bombs.retain_mut(|bomb| {
            bomb.fuse_remaining -= dt;
            if bomb.fuse_remaining > TIMER_EPSILON {
                return true;
            }
            let explosion = Explosion {
                id: ExplosionId(explosion_ids.next_raw()),
                position: bomb.position,
                ttl: lifetime,
            };
            log::debug!("{} detonated as {}", bomb.id, explosion.id);
            detonations.push((bomb.id, explosion));
            false
        });

        self.explosions
            .extend(detonations.iter().map(|(_, explosion)| explosion.clone()));
        detonations
    }

    /// Age explosions by `dt` and discard the ones whose time is up.
    /// Returns the ids of discarded explosions.
    pub fn expire_explosions(&mut self, dt: f32) -> Vec<ExplosionId> {
        let mut expired = Vec::new();
        self.explosions.retain_mut(|explosion| {
            explosion.ttl -= dt;
            let alive = explosion.ttl > TIMER_EPSILON;
            if !alive {
                expired.push(explosion.id);
            }
            alive
        });
        expired
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }
}
