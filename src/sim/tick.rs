//! Fixed-order simulation tick
//!
//! Core game loop that advances every system once per call. The order of the
//! steps is part of the game rules: movement, then separation, then damage,
//! then the win check.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{circle_hits_any, circle_intersects_circle, push_circle_out_of_walls, soft_separate};
use super::enemy::Enemy;
use super::events::{GameEvent, HitTarget};
use super::projectile::Side;
use super::state::{GamePhase, GameState};
use crate::consts::CONTACT_REACH;
use crate::sanitize_dt;
use crate::score::{RunStats, ScoreKeeper};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire whenever the cooldown allows
    pub shoot: bool,
    /// Aim point in world space
    pub aim: Vec2,
}

/// Advance the game state by `dt` seconds
///
/// Won and lost runs are frozen: the call returns no events.
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    let dt = sanitize_dt(dt);
    state.time_ticks += 1;

    // 1. Loss
    if !state.player.is_alive() {
        state.phase = GamePhase::Lost;
        let results = state.results();
        log::info!(
            "Level '{}' lost after {:.1}s (score {})",
            state.level().name,
            results.time_seconds,
            results.score
        );
        events.push(GameEvent::LevelLost { results });
        return events;
    }
    state.stats.time_seconds += dt;

    // 2. Intro pre-roll
    let intro_running = state.intro_timer > 0.0;
    state.intro_timer = (state.intro_timer - dt).max(0.0);

    // 3. Waves
    if !intro_running {
        update_waves(state, dt, &mut events);
    }

    // 4. Player movement
    state
        .player
        .set_intent(input.up, input.down, input.left, input.right);
    state.player.update(dt, &state.arena);

    // 5. Player shooting
    if input.shoot {
        if let Some(shot) = state.player.shoot_towards(input.aim, &state.tuning) {
            state.player_projectiles.push(shot);
            state.stats.shots_fired += 1;
            events.push(GameEvent::ShotFired { by: Side::Player });
        }
    }

    // 6. Enemy AI
    let player_pos = state.player.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player_pos, &state.arena);
        if let Some(shot) = enemy.try_shoot(player_pos, &state.tuning) {
            state.enemy_projectiles.push(shot);
            events.push(GameEvent::ShotFired { by: Side::Enemy });
        }
    }

    // 7-8. Separation, then keep every body out of walls
    let before_separation = state.player.pos;
    separate_bodies(state);
    fix_player_walls(state, before_separation);

    // 9. Contact damage
    resolve_contact(state, dt, &mut events);

    // 10-11. Projectiles
    resolve_player_projectiles(state, dt, &mut events);
    resolve_enemy_projectiles(state, dt, &mut events);

    // 12. Purge
    state.enemies.retain(|e| e.alive);
    state.player_projectiles.retain(|p| p.alive);
    state.enemy_projectiles.retain(|p| p.alive);

    // 13. Win
    check_win(state, &mut events);

    events
}

fn update_waves<R: Rng>(state: &mut GameState<R>, dt: f32, events: &mut Vec<GameEvent>) {
    let live = state.live_enemy_count();
    let update = state.director.update(dt, live);

    if let Some(wave_index) = update.cleared {
        award_wave_clear(state, wave_index, events);
    }

    if let Some(order) = update.spawn {
        let count = state.spawn_wave(&order, events);
        log::info!(
            "Wave {}/{} spawned: {} enemies",
            order.wave_index + 1,
            state.director.total_waves(),
            count
        );
        events.push(GameEvent::WaveSpawned {
            wave_index: order.wave_index,
            count,
        });
    }
}

fn award_wave_clear<R: Rng>(state: &mut GameState<R>, wave_index: u32, events: &mut Vec<GameEvent>) {
    let bonus = state.score.add_wave_complete(wave_index + 1);
    events.push(GameEvent::WaveCleared { wave_index, bonus });
}

fn record_kill(score: &mut ScoreKeeper, stats: &mut RunStats, enemy: &Enemy, events: &mut Vec<GameEvent>) {
    let points = score.add_kill(enemy.kind);
    stats.record_kill(enemy.kind);
    events.push(GameEvent::EnemyKilled {
        id: enemy.id,
        variant: enemy.kind,
        points,
    });
}

/// Pairwise soft separation: player against each enemy, then every enemy pair
///
/// Separation may shove an enemy into a wall, so each one is pushed back out
/// before being clamped into the arena.
fn separate_bodies<R: Rng>(state: &mut GameState<R>) {
    let player = &mut state.player;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let (p, e) = soft_separate(player.pos, player.radius, enemy.pos, enemy.radius);
        player.pos = p;
        enemy.pos = e;
    }

    for i in 0..state.enemies.len() {
        let (head, tail) = state.enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.alive {
            continue;
        }
        for b in tail.iter_mut().filter(|b| b.alive) {
            let (pa, pb) = soft_separate(a.pos, a.radius, b.pos, b.radius);
            a.pos = pa;
            b.pos = pb;
        }
    }

    let walls = &state.arena.walls;
    for enemy in state.enemies.iter_mut() {
        let (pos, _) = push_circle_out_of_walls(enemy.pos, enemy.radius, walls);
        enemy.pos = state.arena.clamp_inside(pos, enemy.radius);
    }
}

/// Push the player out of walls; if that fails, retry from `fallback`
fn fix_player_walls<R: Rng>(state: &mut GameState<R>, fallback: Vec2) {
    let walls = &state.arena.walls;
    let radius = state.player.radius;

    let (mut pos, _) = push_circle_out_of_walls(state.player.pos, radius, walls);
    if circle_hits_any(pos, radius, walls) {
        pos = push_circle_out_of_walls(fallback, radius, walls).0;
    }
    state.player.pos = state.arena.clamp_inside(pos, radius);
}

/// One contact exchange per cooldown, against the first touching enemy
fn resolve_contact<R: Rng>(state: &mut GameState<R>, dt: f32, events: &mut Vec<GameEvent>) {
    state.contact_timer = (state.contact_timer - dt).max(0.0);
    if state.contact_timer > 0.0 {
        return;
    }

    let player_pos = state.player.pos;
    let reach = state.player.radius + CONTACT_REACH;
    let Some(enemy) = state
        .enemies
        .iter_mut()
        .find(|e| e.alive && circle_intersects_circle(player_pos, reach, e.pos, e.radius))
    else {
        return;
    };

    let to_player = state.tuning.contact_damage;
    let to_enemy = state.tuning.player_contact_damage;
    state.player.take_damage(to_player);
    let killed = enemy.take_damage(to_enemy);
    events.push(GameEvent::ContactDamage {
        enemy_id: enemy.id,
        to_player,
        to_enemy,
    });
    if killed {
        record_kill(&mut state.score, &mut state.stats, enemy, events);
    }
    state.contact_timer = state.tuning.contact_damage_interval;
}

fn resolve_player_projectiles<R: Rng>(state: &mut GameState<R>, dt: f32, events: &mut Vec<GameEvent>) {
    let arena = &state.arena;
    for proj in state.player_projectiles.iter_mut().filter(|p| p.alive) {
        let steps = proj.substeps(dt);
        let step_dt = dt / steps as f32;

        for _ in 0..steps {
            proj.update(step_dt);
            if arena.is_out_of_bounds(proj.pos) || arena.overlaps_wall(proj.pos, proj.radius) {
                proj.alive = false;
                break;
            }

            let Some(enemy) = state
                .enemies
                .iter_mut()
                .find(|e| e.alive && circle_intersects_circle(proj.pos, proj.radius, e.pos, e.radius))
            else {
                continue;
            };

            proj.alive = false;
            state.stats.shots_hit += 1;
            let killed = enemy.take_damage(proj.damage);
            enemy.apply_knockback(proj.pos, proj.knockback);
            events.push(GameEvent::ProjectileHit {
                target: HitTarget::Enemy { id: enemy.id },
                damage: proj.damage,
            });
            if killed {
                record_kill(&mut state.score, &mut state.stats, enemy, events);
            }
            break;
        }
    }
}

fn resolve_enemy_projectiles<R: Rng>(state: &mut GameState<R>, dt: f32, events: &mut Vec<GameEvent>) {
    let arena = &state.arena;
    let player = &mut state.player;
    for proj in state.enemy_projectiles.iter_mut().filter(|p| p.alive) {
        let steps = proj.substeps(dt);
        let step_dt = dt / steps as f32;

        for _ in 0..steps {
            proj.update(step_dt);
            if arena.is_out_of_bounds(proj.pos) || arena.overlaps_wall(proj.pos, proj.radius) {
                proj.alive = false;
                break;
            }
            if circle_intersects_circle(proj.pos, proj.radius, player.pos, player.radius) {
                proj.alive = false;
                player.take_damage(proj.damage);
                events.push(GameEvent::ProjectileHit {
                    target: HitTarget::Player,
                    damage: proj.damage,
                });
                break;
            }
        }
    }
}

/// Close out the last wave and either advance the campaign or end the run
fn check_win<R: Rng>(state: &mut GameState<R>, events: &mut Vec<GameEvent>) {
    let live = state.enemies.len();
    if let Some(wave_index) = state.director.finish_if_cleared(live) {
        award_wave_clear(state, wave_index, events);
    }

    // A player killed this tick loses on the next one instead
    if !state.player.is_alive() {
        return;
    }
    let met = state.level().win_condition.is_met(
        state.director.wave_index(),
        state.director.total_waves(),
        live,
    );
    if !met {
        return;
    }

    if state.has_next_level() {
        let next = state.level_index + 1;
        state.load_level(next);
        let name = state.level().name.clone();
        log::info!("Campaign advanced to level {} '{}'", next, name);
        events.push(GameEvent::LevelAdvanced {
            level_index: next,
            name,
        });
    } else {
        state.phase = GamePhase::Won;
        let results = state.results();
        log::info!(
            "Level '{}' won in {:.1}s (score {}, {} kills)",
            state.level().name,
            results.time_seconds,
            results.score,
            results.kills_total
        );
        events.push(GameEvent::LevelWon { results });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Campaign, LevelDescriptor};
    use crate::sim::aabb::Aabb;
    use crate::sim::arena::Arena;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::projectile::Projectile;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_level(stats: &str) -> LevelDescriptor {
        LevelDescriptor::from_json(&format!(
            r#"{{ "name": "Test Yard", "arenaWidth": 32, "arenaHeight": 32, "waves": 3,
                 "spawnIntervalSeconds": 2.0, "enemyTypes": ["melee"],
                 "enemyStats": {{ "melee": {stats} }},
                 "winCondition": "kill_all_after_waves" }}"#
        ))
        .unwrap()
    }

    /// Empty 2048x2048 arena with the player at its center
    fn yard(stats: &str) -> GameState<Pcg32> {
        let arena = Arena::bordered(2048.0, 2048.0);
        let mut state = GameState::with_arena(test_level(stats), arena, Tuning::default(), Pcg32::seed_from_u64(1)).unwrap();
        state.player.pos = Vec2::new(1000.0, 1000.0);
        state
    }

    fn count<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], pred: F) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_contact_exchange_kills_adjacent_melee() {
        let mut state = yard(r#"{ "hp": 25, "speed": 120 }"#);
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(1034.0, 1000.0));

        let mut events = Vec::new();
        for _ in 0..4 {
            events.extend(state.advance(0.5, &TickInput::default()));
        }

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.hp, 60);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::ContactDamage { to_player: 10, .. })), 4);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::EnemyKilled { .. })), 1);
        assert_eq!(state.stats.kills_total, 1);
        assert_eq!(state.score.score, EnemyKind::Melee.kill_score());
    }

    #[test]
    fn test_projectile_hit_on_stationary_enemy() {
        let mut state = yard(r#"{ "hp": 20, "speed": 0 }"#);
        let id = state.spawn_enemy(EnemyKind::Melee, Vec2::new(1060.0, 1000.0));

        let input = TickInput {
            shoot: true,
            aim: Vec2::new(1060.0, 1000.0),
            ..Default::default()
        };
        let events = state.advance(0.1, &input);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 5);
        assert!(state.player_projectiles.is_empty());
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ProjectileHit { target: HitTarget::Enemy { id: hit }, damage: 15 } if *hit == id)),
            1
        );
        assert_eq!(state.stats.shots_fired, 1);
        assert_eq!(state.stats.shots_hit, 1);
        // Knocked away from the shot
        assert!(state.enemies[0].knockback.x > 0.0);
    }

    #[test]
    fn test_simultaneous_damage_kills_once() {
        let mut state = yard(r#"{ "hp": 8, "speed": 0 }"#);
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(1030.0, 1000.0));
        // A bullet already in flight toward the same enemy
        let tuning = state.tuning.clone();
        state.player_projectiles.push(Projectile::new(
            Vec2::new(1000.0, 1000.0),
            Vec2::new(tuning.bullet_speed, 0.0),
            tuning.bullet_radius,
            tuning.bullet_damage,
            tuning.bullet_knockback,
            Side::Player,
        ));

        let events = state.advance(0.1, &TickInput::default());

        assert_eq!(count(&events, |e| matches!(e, GameEvent::EnemyKilled { .. })), 1);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::ProjectileHit { .. })), 0);
        assert_eq!(state.stats.kills_total, 1);
        assert_eq!(state.score.score, 50);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_enemy_projectile_damages_player() {
        let mut state = yard(r#"{ "hp": 50, "speed": 0 }"#);
        let tuning = state.tuning.clone();
        state.enemy_projectiles.push(Projectile::new(
            Vec2::new(1100.0, 1000.0),
            Vec2::new(-tuning.enemy_bullet_speed, 0.0),
            tuning.enemy_bullet_radius,
            tuning.enemy_bullet_damage,
            tuning.enemy_bullet_knockback,
            Side::Enemy,
        ));

        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(state.advance(0.1, &TickInput::default()));
        }
        assert_eq!(state.player.hp, 100 - tuning.enemy_bullet_damage);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::ProjectileHit { target: HitTarget::Player, .. })), 1);
        assert!(state.enemy_projectiles.is_empty());
    }

    #[test]
    fn test_player_bullets_stop_at_walls() {
        let mut state = yard(r#"{ "hp": 50, "speed": 0 }"#);
        state.arena.walls.push(Aabb::from_center_size(1100.0, 1000.0, 10.0, 200.0));
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(1200.0, 1000.0));
        let input = TickInput {
            shoot: true,
            aim: Vec2::new(1200.0, 1000.0),
            ..Default::default()
        };
        state.advance(0.1, &input);
        state.advance(0.1, &TickInput::default());
        assert!(state.player_projectiles.is_empty());
        assert_eq!(state.enemies[0].hp, 50);
    }

    #[test]
    fn test_intro_delays_first_wave() {
        let mut state = yard(r#"{ "hp": 25, "speed": 0 }"#);
        let mut spawned = None;
        for _ in 0..40 {
            let intro_before = state.intro_timer;
            let events = state.advance(0.1, &TickInput::default());
            if let Some(GameEvent::WaveSpawned { wave_index, count }) =
                events.iter().find(|e| matches!(e, GameEvent::WaveSpawned { .. }))
            {
                assert_eq!(intro_before, 0.0);
                spawned = Some((*wave_index, *count));
                break;
            }
        }
        assert_eq!(spawned, Some((0, 4)));
        assert_eq!(state.enemies.len(), 4);
    }

    #[test]
    fn test_loss_fires_once() {
        let mut state = yard(r#"{ "hp": 25, "speed": 0 }"#);
        state.player.hp = 0;
        let events = state.advance(0.1, &TickInput::default());
        assert_eq!(events.len(), 1);
        let GameEvent::LevelLost { results } = &events[0] else {
            panic!("expected loss, got {:?}", events[0]);
        };
        assert_eq!(results.hp_end, 0);
        assert_eq!(state.phase, GamePhase::Lost);
        assert!(state.advance(0.1, &TickInput::default()).is_empty());
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut state = yard(r#"{ "hp": 25, "speed": 120 }"#);
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(1300.0, 1000.0));
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        state.advance(-1.0, &input);
        state.advance(f32::NAN, &input);
        assert_eq!(state.player.pos, Vec2::new(1000.0, 1000.0));
        assert_eq!(state.enemies[0].pos, Vec2::new(1300.0, 1000.0));
        assert_eq!(state.stats.time_seconds, 0.0);
    }

    #[test]
    fn test_stacked_enemies_never_cross_wall() {
        let mut state = yard(r#"{ "hp": 50, "speed": 120 }"#);
        // Keep the director quiet so only the stacked pair moves
        state.intro_timer = 1e9;
        state.arena.walls.push(Aabb::from_center_size(1000.0, 1000.0, 100.0, 400.0));
        state.player.pos = Vec2::new(1200.0, 1000.0);
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(932.0, 1000.0));
        state.spawn_enemy(EnemyKind::Melee, Vec2::new(915.0, 1000.0));

        for _ in 0..120 {
            state.advance(1.0 / 30.0, &TickInput::default());
            for e in &state.enemies {
                assert!(e.pos.x < 950.0, "enemy {} crossed into the wall at {:?}", e.id, e.pos);
                assert!(!state.arena.overlaps_wall(e.pos, e.radius));
            }
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_wave_cadence_through_tick() {
        let mut state = yard(r#"{ "hp": 25, "speed": 0 }"#);
        let mut events = Vec::new();
        for _ in 0..30 {
            events.extend(state.advance(0.5, &TickInput::default()));
            for enemy in state.enemies.iter_mut() {
                enemy.alive = false;
            }
        }

        let spawned: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::WaveSpawned { wave_index, .. } => Some(*wave_index),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, vec![0, 1, 2]);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::WaveCleared { .. })), 3);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.director.is_finished());
        assert!(state.advance(0.5, &TickInput::default()).is_empty());
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut state = yard(r#"{ "hp": 25, "speed": 0 }"#);
        state.advance(3.0, &TickInput::default());
        assert_eq!(state.stats.time_seconds, crate::consts::MAX_TICK_DT);
    }

    const TWO_LEVELS: &str = r#"[
        { "name": "Open Field", "arenaWidth": 20, "arenaHeight": 14, "waves": 1,
          "spawnIntervalSeconds": 1.0, "enemyTypes": ["melee"], "winCondition": "kill_all_after_waves" },
        { "name": "Ring Road", "arenaWidth": 20, "arenaHeight": 20, "waves": 1,
          "enemyTypes": ["shooter"], "winCondition": "kill_all_after_waves" }
    ]"#;

    /// Tick until the current wave spawns
    fn spawn_first_wave(state: &mut GameState<Pcg32>) {
        for _ in 0..100 {
            let events = state.advance(0.1, &TickInput::default());
            if events.iter().any(|e| matches!(e, GameEvent::WaveSpawned { .. })) {
                return;
            }
        }
        panic!("first wave never spawned");
    }

    /// Remove every enemy as if killed off-screen and tick once
    fn clear_field(state: &mut GameState<Pcg32>) -> Vec<GameEvent> {
        for enemy in state.enemies.iter_mut() {
            enemy.alive = false;
        }
        state.advance(0.1, &TickInput::default())
    }

    #[test]
    fn test_campaign_advances() {
        let campaign = Campaign::from_json(TWO_LEVELS).unwrap();
        let mut state = GameState::seeded(campaign, 0, true, Tuning::default(), 3).unwrap();
        spawn_first_wave(&mut state);
        state.player.hp = 55;

        let events = clear_field(&mut state);

        assert!(events.contains(&GameEvent::WaveCleared { wave_index: 0, bonus: 175 }));
        assert!(events.contains(&GameEvent::LevelAdvanced {
            level_index: 1,
            name: "Ring Road".to_string()
        }));
        assert!(!events.iter().any(GameEvent::is_terminal));
        assert_eq!(state.level_index, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.hp, 55);
        assert_eq!(state.score.score, 175);
        assert_eq!(state.director.wave_index(), 0);
    }

    #[test]
    fn test_single_level_win_is_terminal() {
        let campaign = Campaign::from_json(TWO_LEVELS).unwrap();
        let mut state = GameState::seeded(campaign, 0, false, Tuning::default(), 3).unwrap();
        spawn_first_wave(&mut state);

        let events = clear_field(&mut state);

        let won: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
        assert_eq!(won.len(), 1);
        let GameEvent::LevelWon { results } = won[0] else {
            panic!("expected win");
        };
        assert_eq!(results.waves_spawned, 1);
        assert_eq!(results.waves_total, 1);
        assert_eq!(results.score, 175);
        assert!(!results.campaign_mode);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.advance(0.1, &TickInput::default()).is_empty());
    }

    /// Scripted input that moves in a slow square and always fires
    fn scripted_input(step: u32) -> TickInput {
        let phase = (step / 40) % 4;
        TickInput {
            up: phase == 0,
            right: phase == 1,
            down: phase == 2,
            left: phase == 3,
            shoot: true,
            aim: Vec2::new((step * 37 % 1280) as f32, (step * 53 % 896) as f32),
        }
    }

    fn full_campaign() -> Campaign {
        Campaign::from_json(
            r#"[{ "name": "Open Field", "arenaWidth": 20, "arenaHeight": 14, "waves": 3,
                  "spawnIntervalSeconds": 1.0, "enemyTypes": ["melee", "shooter", "charger", "tank"],
                  "winCondition": "kill_all_after_waves" }]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::seeded(full_campaign(), 0, false, Tuning::default(), 99999).unwrap();
        let mut state2 = GameState::seeded(full_campaign(), 0, false, Tuning::default(), 99999).unwrap();

        for step in 0..900 {
            let input = scripted_input(step);
            let events1 = state1.advance(1.0 / 60.0, &input);
            let events2 = state2.advance(1.0 / 60.0, &input);
            assert_eq!(
                serde_json::to_string(&events1).unwrap(),
                serde_json::to_string(&events2).unwrap()
            );
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.results(), state2.results());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_entities_stay_in_bounds(seed in any::<u64>(), layout in 0usize..3) {
            let name = ["Open Field", "Labyrinth", "Ring Road"][layout];
            let campaign = Campaign::from_json(&format!(
                r#"[{{ "name": "{name}", "arenaWidth": 30, "arenaHeight": 16, "waves": 3,
                      "spawnIntervalSeconds": 0.5,
                      "enemyTypes": ["melee", "shooter", "charger", "tank"],
                      "winCondition": "kill_all_after_waves" }}]"#
            ))
            .unwrap();
            let mut state = GameState::seeded(campaign, 0, false, Tuning::default(), seed).unwrap();
            let (w, h) = (state.arena.width, state.arena.height);
            let inside = |pos: Vec2, r: f32| pos.x >= -r && pos.y >= -r && pos.x <= w + r && pos.y <= h + r;

            for step in 0..400 {
                state.advance(1.0 / 30.0, &scripted_input(step));
                prop_assert!(inside(state.player.pos, state.player.radius));
                for e in &state.enemies {
                    prop_assert!(inside(e.pos, e.radius), "enemy {} at {:?}", e.id, e.pos);
                }
                for p in state.player_projectiles.iter().chain(&state.enemy_projectiles) {
                    prop_assert!(inside(p.pos, p.radius));
                }
            }
        }
    }
}
