//! Projectile system: owns live bullets and flies them in straight lines.

use glam::Vec3;

use skirmish_core::config::Tuning;
use skirmish_core::types::{BulletId, IdCounter};

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: BulletId,
    pub position: Vec3,
    /// Unit vector, fixed at spawn.
    pub direction: Vec3,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct ProjectileSystem {
    /// Live bullets in spawn order.
    bullets: Vec<Bullet>,
    ids: IdCounter,
    speed: f32,
    world_bound: f32,
}

impl ProjectileSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bullets: Vec::new(),
            ids: IdCounter::default(),
            speed: tuning.bullet_speed,
            world_bound: tuning.world_bound,
        }
    }

    /// Spawn a bullet at `origin` heading along `direction`.
    ///
    /// The direction is normalized; a zero or non-finite direction is
    /// rejected and no bullet is created.
    pub fn spawn(&mut self, origin: Vec3, direction: Vec3) -> Option<BulletId> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() {
            return None;
        }

        let id = BulletId(self.ids.next_raw());
        self.bullets.push(Bullet {
            id,
            position: origin,
            direction,
            speed: self.speed,
        });
        log::trace!("spawned {id} at {origin} heading {direction}");
        Some(id)
    }

    /// Move every bullet by `direction * speed * dt` and retire the ones that
    /// left the world box. Returns the retired ids.
    pub fn advance_all(&mut self, dt: f32) -> Vec<BulletId> {
        for bullet in &mut self.bullets {
            bullet.position += bullet.direction * (bullet.speed * dt);
        }

        let bound = self.world_bound;
        let mut retired = Vec::new();
        self.bullets.retain(|bullet| {
            let inside = bullet.position.abs().max_element() <= bound;
            if !inside {
                retired.push(bullet.id);
            }
            inside
        });
        retired
    }

    /// Remove one bullet. Unknown ids are a no-op.
    pub fn remove(&mut self, id: BulletId) -> bool {
        let before = self.bullets.len();
        self.bullets.retain(|b| b.id != id);
        self.bullets.len() != before
    }

    /// Remove a batch of bullets in one pass.
    pub fn remove_many(&mut self, ids: &[BulletId]) {
        if ids.is_empty() {
            return;
        }
        self.bullets.retain(|b| !ids.contains(&b.id));
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.bullets.iter().find(|b| b.id == id)
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}
