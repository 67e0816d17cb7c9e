//! Collision detection and response
//!
//! Every test is an axis-aligned box overlap. Passes mark entities dead while
//! scanning and compact the collections afterwards, so no removal can cause a
//! neighbour to be skipped.

use super::events::{GameEvent, SoundCue};
use super::spawn::{drop_power_up, explosion};
use super::state::{Body, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

const SHIELD_COLOR: u32 = 0x10b981;
const HULL_COLOR: u32 = 0xef4444;

/// Open-interval AABB overlap; touching edges do not count
#[inline]
pub fn aabb_overlap(a: &Body, b: &Body) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Run all collision passes for one tick
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Drops are held back so the pickup pass only sees power-ups that
    // existed when resolution began.
    let mut drops = Vec::new();

    resolve_bullet_hits(state, events, &mut drops);
    resolve_player_hits(state, events);
    if state.phase == GamePhase::Playing {
        resolve_pickups(state, events);
    }

    state.power_ups.extend(drops);
}

/// Player bullets against enemies. Each bullet damages at most one enemy.
fn resolve_bullet_hits(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    drops: &mut Vec<PowerUp>,
) {
    if state.bullets.is_empty() || state.enemies.is_empty() {
        return;
    }

    let mut bullet_spent = vec![false; state.bullets.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut kills = Vec::new();

    for (b_idx, bullet) in state.bullets.iter().enumerate() {
        if !bullet.from_player {
            continue;
        }
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(e_idx, enemy)| !enemy_dead[*e_idx] && aabb_overlap(&bullet.body, &enemy.body))
            .map(|(e_idx, _)| e_idx);

        if let Some(e_idx) = target {
            bullet_spent[b_idx] = true;
            let enemy = &mut state.enemies[e_idx];
            enemy.health -= bullet.damage;
            if enemy.is_destroyed() {
                enemy_dead[e_idx] = true;
                kills.push(e_idx);
            }
        }
    }

    for e_idx in kills {
        let (center, color, score_value, kind, id) = {
            let enemy = &state.enemies[e_idx];
            (enemy.body.center(), enemy.color, enemy.score_value, enemy.kind, enemy.body.id)
        };
        log::debug!("Destroyed {:?} enemy {}", kind, id);

        let burst = explosion(state, center, color, KILL_BURST);
        state.push_particles(burst);
        events.push(GameEvent::Sound(SoundCue::Explosion));

        state.progression.record_kill(score_value, events);
        if let Some(power_up) = drop_power_up(state, center) {
            drops.push(power_up);
        }
    }

    let mut spent = bullet_spent.into_iter();
    state.bullets.retain(|_| !spent.next().unwrap_or(false));
    let mut dead = enemy_dead.into_iter();
    state.enemies.retain(|_| !dead.next().unwrap_or(false));
}

/// Enemies ramming the player
fn resolve_player_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.player.is_invincible() {
        return;
    }

    let mut rammed = vec![false; state.enemies.len()];
    for e_idx in 0..state.enemies.len() {
        if !aabb_overlap(&state.player.body, &state.enemies[e_idx].body) {
            continue;
        }
        rammed[e_idx] = true;
        let center = state.player.body.center();

        if state.player.shield {
            state.player.shield = false;
            log::debug!("Shield absorbed enemy {}", state.enemies[e_idx].body.id);
            events.push(GameEvent::Sound(SoundCue::PowerUp));
            let burst = explosion(state, center, SHIELD_COLOR, SHIELD_BURST);
            state.push_particles(burst);
            events.push(GameEvent::Sound(SoundCue::Explosion));
            continue;
        }

        state.player.health = state.player.health.saturating_sub(1);
        log::debug!("Hull hit, health {}", state.player.health);
        let burst = explosion(state, center, HULL_COLOR, HULL_BURST);
        state.push_particles(burst);
        events.push(GameEvent::Sound(SoundCue::Explosion));

        if state.player.health == 0 {
            state.phase = GamePhase::GameOver;
            let stats = state.stats();
            log::info!("Player destroyed: {:?}", stats);
            events.push(GameEvent::GameOver(stats));
        } else {
            state.player.invincible_ticks = INVINCIBILITY_TICKS;
        }
        // Either dead or immune; nothing else in this pass can hurt the player
        break;
    }

    let mut gone = rammed.into_iter();
    state.enemies.retain(|_| !gone.next().unwrap_or(false));
}

/// Player collecting power-ups
fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.body;
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        if aabb_overlap(&player, &power_up.body) {
            collected.push(power_up.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            PowerUpKind::TripleShot => state.player.triple_shot_ticks = TRIPLE_SHOT_TICKS,
            PowerUpKind::Shield => state.player.shield = true,
        }
        log::debug!("Collected {:?}", kind);
        events.push(GameEvent::Sound(SoundCue::PowerUp));
        state.progression.record_pickup(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyKind, FireMode};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, FireMode::Manual);
        state.phase = GamePhase::Playing;
        state
    }

    fn enemy_at(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, kind, pos, Vec2::ZERO));
        id
    }

    fn bullet_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let mut bullet = Bullet::player_shot(id, Vec2::ZERO, 0.0, None);
        bullet.body.pos = pos;
        state.bullets.push(bullet);
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Body::new(1, Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO);
        let b = Body::new(2, Vec2::new(10.0, 0.0), Vec2::splat(10.0), Vec2::ZERO);
        assert!(!aabb_overlap(&a, &b));
        let c = Body::new(3, Vec2::new(9.9, 9.9), Vec2::splat(10.0), Vec2::ZERO);
        assert!(aabb_overlap(&a, &c));
    }

    #[test]
    fn test_bullet_kills_basic_enemy() {
        let mut state = playing_state();
        enemy_at(&mut state, EnemyKind::Basic, Vec2::new(100.0, 100.0));
        bullet_at(&mut state, Vec2::new(110.0, 110.0));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.progression.score, 100);
        assert_eq!(state.progression.enemies_killed, 1);
        assert_eq!(state.particles.len(), KILL_BURST);
        assert!(state.power_ups.len() <= 1);
        assert!(events.contains(&GameEvent::AchievementUnlocked(
            crate::AchievementId::FirstBlood
        )));
    }

    #[test]
    fn test_heavy_enemy_survives_one_hit() {
        let mut state = playing_state();
        enemy_at(&mut state, EnemyKind::Heavy, Vec2::new(100.0, 100.0));
        bullet_at(&mut state, Vec2::new(110.0, 110.0));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert!(state.bullets.is_empty());
        assert_eq!(state.progression.score, 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_bullet_hits_only_first_overlapping_enemy() {
        let mut state = playing_state();
        let first = enemy_at(&mut state, EnemyKind::Heavy, Vec2::new(100.0, 100.0));
        enemy_at(&mut state, EnemyKind::Heavy, Vec2::new(105.0, 105.0));
        bullet_at(&mut state, Vec2::new(120.0, 120.0));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        let healths: Vec<_> = state.enemies.iter().map(|e| (e.body.id, e.health)).collect();
        assert_eq!(healths[0], (first, 2));
        assert_eq!(healths[1].1, 3);
    }

    #[test]
    fn test_adjacent_kills_are_not_skipped() {
        let mut state = playing_state();
        enemy_at(&mut state, EnemyKind::Basic, Vec2::new(100.0, 100.0));
        enemy_at(&mut state, EnemyKind::Basic, Vec2::new(300.0, 100.0));
        bullet_at(&mut state, Vec2::new(110.0, 110.0));
        bullet_at(&mut state, Vec2::new(310.0, 110.0));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.progression.enemies_killed, 2);
    }

    #[test]
    fn test_second_bullet_does_not_hit_dead_enemy() {
        let mut state = playing_state();
        enemy_at(&mut state, EnemyKind::Basic, Vec2::new(100.0, 100.0));
        bullet_at(&mut state, Vec2::new(110.0, 110.0));
        bullet_at(&mut state, Vec2::new(112.0, 110.0));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.progression.enemies_killed, 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullets_are_ignored() {
        let mut state = playing_state();
        enemy_at(&mut state, EnemyKind::Basic, Vec2::new(100.0, 100.0));
        bullet_at(&mut state, Vec2::new(110.0, 110.0));
        state.bullets[0].from_player = false;

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_shield_absorbs_ram() {
        let mut state = playing_state();
        state.player.shield = true;
        let pos = state.player.body.pos;
        enemy_at(&mut state, EnemyKind::Basic, pos);

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(!state.player.shield);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(state.enemies.is_empty());
        assert_eq!(state.particles.len(), SHIELD_BURST);
        assert_eq!(state.player.invincible_ticks, 0);
    }

    #[test]
    fn test_ram_costs_health_and_grants_invincibility() {
        let mut state = playing_state();
        let pos = state.player.body.pos;
        enemy_at(&mut state, EnemyKind::Basic, pos);
        enemy_at(&mut state, EnemyKind::Basic, pos);

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 1);
        assert_eq!(state.player.invincible_ticks, INVINCIBILITY_TICKS);
        assert_eq!(state.particles.len(), HULL_BURST);
        // A hull hit ends the pass; the other overlapping enemy survives
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_invincible_player_ignores_enemies() {
        let mut state = playing_state();
        state.player.invincible_ticks = 5;
        let pos = state.player.body.pos;
        enemy_at(&mut state, EnemyKind::Basic, pos);

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_last_hit_ends_game() {
        let mut state = playing_state();
        state.player.health = 1;
        state.progression.score = 1234;
        let pos = state.player.body.pos;
        enemy_at(&mut state, EnemyKind::Basic, pos);

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let over: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver(stats) => Some(*stats),
                _ => None,
            })
            .collect();
        assert_eq!(over.len(), 1);
        assert_eq!(over[0].health, 0);
        assert_eq!(over[0].score, 1234);
    }

    #[test]
    fn test_pickups_apply_effects() {
        let mut state = playing_state();
        let center = state.player.body.center();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        state.power_ups.push(PowerUp::new(a, PowerUpKind::TripleShot, center));
        state.power_ups.push(PowerUp::new(b, PowerUpKind::Shield, center));
        state.power_ups.push(PowerUp::new(99, PowerUpKind::Shield, Vec2::new(5.0, 5.0)));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.player.triple_shot_ticks, TRIPLE_SHOT_TICKS);
        assert!(state.player.shield);
        assert_eq!(state.progression.power_ups_collected, 2);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].body.id, 99);
    }

    #[test]
    fn test_shield_pickup_while_shielded_is_idempotent() {
        let mut state = playing_state();
        state.player.shield = true;
        let center = state.player.body.center();
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp::new(id, PowerUpKind::Shield, center));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.player.shield);
        assert!(state.particles.is_empty());
        let cues = events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundCue::PowerUp))
            .count();
        assert_eq!(cues, 1);
    }

    #[test]
    fn test_empty_collections_are_noop() {
        let mut state = playing_state();
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    fn body_strategy() -> impl Strategy<Value = Body> {
        (-100.0f32..900.0, -100.0f32..900.0, 1.0f32..80.0, 1.0f32..80.0)
            .prop_map(|(x, y, w, h)| Body::new(0, Vec2::new(x, y), Vec2::new(w, h), Vec2::ZERO))
    }

    proptest! {
        #[test]
        fn prop_aabb_symmetric(a in body_strategy(), b in body_strategy()) {
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_aabb_self_overlap(a in body_strategy()) {
            prop_assert!(aabb_overlap(&a, &a));
        }
    }
}
