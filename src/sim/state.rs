//! Game state and core simulation types
//!
//! Everything the simulation loop owns between ticks lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::Progression;
use crate::consts::*;
use crate::{centered_at, clamp_to_playfield};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player destroyed
    GameOver,
}

/// How the player's guns are triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    /// Fire only while the fire input is held
    #[default]
    Manual,
    /// Fire continuously
    Automatic,
}

/// Shared spatial shape of every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { id, pos, size, vel }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: u32,
    pub max_health: u32,
    /// Ticks of damage immunity remaining
    pub invincible_ticks: u32,
    /// One-shot shield that absorbs the next collision
    pub shield: bool,
    /// Ticks of triple-shot remaining
    pub triple_shot_ticks: u32,
}

impl Player {
    pub fn new(id: u32) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let pos = Vec2::new(
            (PLAYFIELD_WIDTH - PLAYER_SIZE) / 2.0,
            PLAYFIELD_HEIGHT - PLAYER_SPAWN_OFFSET,
        );
        Self {
            body: Body::new(id, pos, size, Vec2::ZERO),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invincible_ticks: 0,
            shield: false,
            triple_shot_ticks: 0,
        }
    }

    /// Move by a direction (components in -1..=1), staying on the playfield
    pub fn steer(&mut self, dir: Vec2) {
        let pos = self.body.pos + dir * PLAYER_SPEED;
        self.body.pos = clamp_to_playfield(pos, self.body.size);
    }

    /// Ease toward a pointer target, staying on the playfield
    pub fn follow(&mut self, target: Vec2) {
        let pos = self.body.pos + (target - self.body.pos) * POINTER_FOLLOW;
        self.body.pos = clamp_to_playfield(pos, self.body.size);
    }

    /// Count down transient effects by one tick
    pub fn decay_effects(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.triple_shot_ticks = self.triple_shot_ticks.saturating_sub(1);
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn has_triple_shot(&self) -> bool {
        self.triple_shot_ticks > 0
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

/// Fixed per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub size: Vec2,
    /// Base downward speed before the level bonus
    pub speed: f32,
    pub health: i32,
    pub score: u64,
    /// RGB color, also used for the explosion burst
    pub color: u32,
    /// Maximum horizontal drift in either direction
    pub drift: f32,
}

impl EnemyKind {
    pub fn profile(&self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                size: Vec2::splat(40.0),
                speed: 2.0,
                health: 1,
                score: 100,
                color: 0xef4444,
                drift: 0.5,
            },
            EnemyKind::Fast => EnemyProfile {
                size: Vec2::splat(30.0),
                speed: 4.0,
                health: 1,
                score: 200,
                color: 0xf59e0b,
                drift: 1.5,
            },
            EnemyKind::Heavy => EnemyProfile {
                size: Vec2::splat(60.0),
                speed: 1.0,
                health: 3,
                score: 500,
                color: 0x8b5cf6,
                drift: 0.5,
            },
        }
    }
}

/// A hostile craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub score_value: u64,
    pub color: u32,
}

impl Enemy {
    /// Build an enemy of `kind` at full health
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        let profile = kind.profile();
        Self {
            body: Body::new(id, pos, profile.size, vel),
            kind,
            health: profile.health,
            max_health: profile.health,
            score_value: profile.score,
            color: profile.color,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub damage: i32,
    /// Fired by the player (only these can hit enemies)
    pub from_player: bool,
    /// Render tilt for spread shots
    pub angle: Option<f32>,
}

impl Bullet {
    /// A player bullet leaving the nose of a craft at `muzzle`
    pub fn player_shot(id: u32, muzzle: Vec2, drift: f32, angle: Option<f32>) -> Self {
        let size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
        let pos = Vec2::new(muzzle.x - BULLET_WIDTH / 2.0, muzzle.y);
        Self {
            body: Body::new(id, pos, size, Vec2::new(drift, -BULLET_SPEED)),
            damage: BULLET_DAMAGE,
            from_player: true,
            angle,
        }
    }

    pub fn out_of_bounds(&self) -> bool {
        let y = self.body.pos.y;
        y < -BULLET_MARGIN || y > PLAYFIELD_HEIGHT + BULLET_MARGIN
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    Shield,
}

impl PowerUpKind {
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::TripleShot => 0x3b82f6,
            PowerUpKind::Shield => 0x10b981,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
}

impl PowerUp {
    /// A pickup centered on `center`, falling at the standard speed
    pub fn new(id: u32, kind: PowerUpKind, center: Vec2) -> Self {
        let size = Vec2::splat(POWERUP_SIZE);
        Self {
            body: Body::new(
                id,
                centered_at(center, size),
                size,
                Vec2::new(0.0, POWERUP_SPEED),
            ),
            kind,
        }
    }

    pub fn out_of_bounds(&self) -> bool {
        self.body.pos.y > PLAYFIELD_HEIGHT || self.body.bottom() < -BULLET_MARGIN
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Drift and fade by one tick
    pub fn age(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// HUD snapshot reported after every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u64,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub enemies_killed: u32,
    pub power_ups_collected: u32,
    pub distance_traveled: f32,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub stats: GameStats,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Firing mode chosen for the session
    pub fire_mode: FireMode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Live particle cap
    pub max_particles: usize,
    /// Score, level and achievement bookkeeping
    pub progression: Progression,
    /// Time of the last enemy spawn (None = spawn on the next tick)
    pub last_spawn_ms: Option<f64>,
    /// Time of the last volley (None = may fire immediately)
    pub last_shot_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session in the Start phase
    pub fn new(seed: u64, fire_mode: FireMode) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            fire_mode,
            player: Player::new(0),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            max_particles: crate::QualityPreset::default().max_particles(),
            progression: Progression::new(),
            last_spawn_ms: None,
            last_shot_ms: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.player = Player::new(state.next_entity_id());
        state
    }

    /// Create a session configured from settings
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut state = Self::new(settings.resolve_seed(), settings.fire_mode);
        state.max_particles = settings.max_particles();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Current HUD stats
    pub fn stats(&self) -> GameStats {
        self.progression.stats(&self.player)
    }

    /// Borrow everything a renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            power_ups: &self.power_ups,
            particles: &self.particles,
            stats: self.stats(),
        }
    }

    /// Start -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        log::info!("Session started (seed {}, {:?} fire)", self.seed, self.fire_mode);
        self.phase = GamePhase::Playing;
        true
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            _ => return false,
        };
        log::debug!("Pause toggled, now {:?}", self.phase);
        true
    }

    /// GameOver -> Playing with fresh stats and empty collections.
    ///
    /// Unlocked achievements persist for the whole session.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.enemies.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.progression.reset();
        self.last_spawn_ms = None;
        self.last_shot_ms = None;
        self.player = Player::new(self.next_entity_id());
        self.phase = GamePhase::Playing;
        log::info!("Session restarted");
        true
    }

    /// Append particles, dropping any beyond the cap
    pub fn push_particles(&mut self, burst: impl IntoIterator<Item = Particle>) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        self.particles.extend(burst.into_iter().take(room));
    }
}
