//! Entity records
//!
//! Every entity is a plain struct that embeds a [`Body`] (transform plus the
//! soft-delete flag) and adds its own per-kind data. Collections live on
//! [`GameState`](super::GameState) and are swept once per frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::colors::{self, Color};
use crate::consts::*;

/// Shared transform and lifecycle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in viewport pixels
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Soft delete: removed at the end-of-frame sweep
    pub marked: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            pos,
            size,
            color,
            marked: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    pub fn mark(&mut self) {
        self.marked = true;
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Horizontal speed, pixels per frame
    pub speed: f32,
    /// Wall-clock time of the last shot (None = never fired)
    pub last_shot_ms: Option<f64>,
}

impl Player {
    /// Ship centred horizontally near the bottom of the viewport
    pub fn new() -> Self {
        let pos = Vec2::new(
            (VIEWPORT_WIDTH - PLAYER_WIDTH) / 2.0,
            VIEWPORT_HEIGHT - PLAYER_BOTTOM_MARGIN,
        );
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT), colors::PLAYER),
            speed: PLAYER_SPEED,
            last_shot_ms: None,
        }
    }

    /// Apply one frame of horizontal input, clamped to the viewport
    pub fn steer(&mut self, left: bool, right: bool) {
        if left {
            self.body.pos.x -= self.speed;
        }
        if right {
            self.body.pos.x += self.speed;
        }
        self.body.pos.x = self.body.pos.x.clamp(0.0, VIEWPORT_WIDTH - self.body.size.x);
    }

    /// Whether the shot cooldown has elapsed at `now_ms`
    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms - last >= SHOT_COOLDOWN_MS,
            None => true,
        }
    }

    /// Spawn positions for the two wing guns
    pub fn wingtips(&self) -> [Vec2; 2] {
        let y = self.body.pos.y + 10.0;
        [
            Vec2::new(self.body.pos.x, y),
            Vec2::new(self.body.pos.x + self.body.size.x - PROJECTILE_WIDTH, y),
        ]
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A shot travelling vertically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Signed vertical speed (negative = upward)
    pub speed: f32,
    pub owner: Owner,
}

impl Projectile {
    pub fn from_player(pos: Vec2) -> Self {
        Self {
            body: Body::new(
                pos,
                Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
                colors::PLAYER_SHOT,
            ),
            speed: PLAYER_PROJECTILE_SPEED,
            owner: Owner::Player,
        }
    }

    /// Shot dropped from the bottom centre of an enemy
    pub fn from_enemy(enemy: &Body) -> Self {
        let pos = Vec2::new(
            enemy.pos.x + (enemy.size.x - PROJECTILE_WIDTH) / 2.0,
            enemy.bottom(),
        );
        Self {
            body: Body::new(
                pos,
                Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
                colors::ENEMY_SHOT,
            ),
            speed: ENEMY_PROJECTILE_SPEED,
            owner: Owner::Enemy,
        }
    }

    pub fn advance(&mut self) {
        self.body.pos.y += self.speed;
    }

    /// Outside the vertical band projectiles are allowed to live in
    pub fn out_of_bounds(&self) -> bool {
        self.body.pos.y < -PROJECTILE_CULL_MARGIN
            || self.body.pos.y > VIEWPORT_HEIGHT + PROJECTILE_CULL_MARGIN
    }
}

/// Enemy rank; the top row is worth the most
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Kind 1, row 0
    Elite,
    /// Kind 2, row 1
    Warrior,
    /// Kind 3, remaining rows
    Grunt,
}

impl EnemyKind {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => EnemyKind::Elite,
            1 => EnemyKind::Warrior,
            _ => EnemyKind::Grunt,
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Elite => 50,
            EnemyKind::Warrior => 30,
            EnemyKind::Grunt => 10,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            EnemyKind::Elite => colors::ENEMY_KIND_1,
            EnemyKind::Warrior => colors::ENEMY_KIND_2,
            EnemyKind::Grunt => colors::ENEMY_KIND_3,
        }
    }
}

/// A member of the enemy grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Drops a power-up when destroyed
    pub has_powerup: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT), kind.color()),
            kind,
            has_powerup: false,
        }
    }
}

/// Falling extra-life pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub body: Body,
}

impl Powerup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(POWERUP_SIZE), colors::POWERUP),
        }
    }

    pub fn advance(&mut self) {
        self.body.pos.y += POWERUP_FALL_SPEED;
    }

    pub fn below_viewport(&self) -> bool {
        self.body.pos.y > VIEWPORT_HEIGHT
    }
}

/// Cosmetic debris
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub vel: Vec2,
    /// 1.0 when spawned, gone at 0
    pub life: f32,
}

impl Particle {
    pub fn new<R: Rng>(rng: &mut R, origin: Vec2, color: Color) -> Self {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
        );
        Self {
            body: Body::new(origin, Vec2::splat(PARTICLE_SIZE), color),
            vel,
            life: 1.0,
        }
    }

    /// Spawn `count` particles at `origin`
    pub fn burst<R: Rng>(
        rng: &mut R,
        origin: Vec2,
        color: Color,
        count: usize,
    ) -> Vec<Particle> {
        (0..count).map(|_| Particle::new(rng, origin, color)).collect()
    }

    pub fn update(&mut self) {
        self.body.pos += self.vel;
        self.life -= PARTICLE_DECAY;
        if self.life <= 0.0 {
            self.body.mark();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_spawn_position() {
        let player = Player::new();
        assert_eq!(player.body.pos.x, 380.0);
        assert_eq!(player.body.pos.y, 540.0);
        assert!(player.last_shot_ms.is_none());
    }

    #[test]
    fn test_player_steer_clamps() {
        let mut player = Player::new();
        player.body.pos.x = 2.0;
        player.steer(true, false);
        assert_eq!(player.body.pos.x, 0.0);

        player.body.pos.x = VIEWPORT_WIDTH - PLAYER_WIDTH - 1.0;
        player.steer(false, true);
        assert_eq!(player.body.pos.x, VIEWPORT_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_player_steer_both_cancels() {
        let mut player = Player::new();
        let x = player.body.pos.x;
        player.steer(true, true);
        assert_eq!(player.body.pos.x, x);
    }

    #[test]
    fn test_cooldown() {
        let mut player = Player::new();
        assert!(player.can_fire(0.0));
        player.last_shot_ms = Some(1000.0);
        assert!(!player.can_fire(1199.0));
        assert!(player.can_fire(1200.0));
    }

    #[test]
    fn test_enemy_kind_table() {
        assert_eq!(EnemyKind::for_row(0), EnemyKind::Elite);
        assert_eq!(EnemyKind::for_row(1), EnemyKind::Warrior);
        assert_eq!(EnemyKind::for_row(3), EnemyKind::Grunt);
        assert_eq!(EnemyKind::Elite.points(), 50);
        assert_eq!(EnemyKind::Warrior.points(), 30);
        assert_eq!(EnemyKind::Grunt.points(), 10);
    }

    #[test]
    fn test_projectile_bounds() {
        let mut shot = Projectile::from_player(Vec2::new(100.0, -15.0));
        assert!(!shot.out_of_bounds());
        shot.advance();
        assert!(shot.out_of_bounds());

        let enemy = Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Grunt);
        let shot = Projectile::from_enemy(&enemy.body);
        assert_eq!(shot.owner, Owner::Enemy);
        assert_eq!(shot.body.pos, Vec2::new(113.0, 130.0));
        assert!(shot.speed > 0.0);
    }

    #[test]
    fn test_particle_decay() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particle = Particle::new(&mut rng, Vec2::ZERO, colors::POWERUP);
        assert!(particle.vel.x.abs() <= PARTICLE_MAX_SPEED);
        assert!(particle.vel.y.abs() <= PARTICLE_MAX_SPEED);

        // 1.0 / 0.04 = 25 frames (float error may push it to 26)
        let mut frames = 0;
        while !particle.body.marked {
            particle.update();
            frames += 1;
        }
        assert!((25..=26).contains(&frames));
    }
}
