// src/app/tests.rs
//! End-to-end scenarios through `GameApp`.

use std::sync::Arc;

use super::game_app::GameApp;
use crate::clock::{Clock, ManualClock};
use crate::components::line_segment::LineSegment;
use crate::components::position::Position2D;
use crate::components::race::{RaceState, RaceStatus};
use crate::config::{FinishRule, GameConfig};
use crate::ecs::component::Component;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::{ErrorKind, GameError};
use crate::events::GameEvent;
use crate::logic::rules::{PlayerStep, ProgressPolicy, ProgressUpdate};
use crate::protocol::{CheckpointSpec, Command, Identity, Outcome, RaceId, TrackId, TrackSpec};
use crate::registry::Role;
use crate::systems::{MoveSystem, RaceSystem, TrackSystem};

const ADMIN: Identity = Identity(0xad);
const MANAGER: Identity = Identity(0x3a);
const A: Identity = Identity(0xa1);
const B: Identity = Identity(0xb2);
const C: Identity = Identity(0xc3);

const FULL: u32 = 100_00;

// --- Helpers ---

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup_with(config: GameConfig) -> (GameApp, ManualClock) {
    init_logger();
    let clock = ManualClock::starting_at(1_000);
    let mut app = GameApp::new(ADMIN, config, Arc::new(clock.clone())).unwrap();
    app.set_paused(ADMIN, false).unwrap();
    app.grant_role(ADMIN, Role::Manager, MANAGER).unwrap();
    (app, clock)
}

fn setup() -> (GameApp, ManualClock) {
    setup_with(GameConfig::default())
}

fn started_race(app: &mut GameApp, players: &[Identity]) -> RaceId {
    let race_id = app.create_race(players[0], players.len() as u32).unwrap();
    for &player in players {
        app.join_race(player, race_id).unwrap();
    }
    race_id
}

/// Reference course: a 30x30 square with a 20x20
/// hole and four single-line checkpoints around it.
fn test_track() -> TrackSpec {
    let mut lines = LineSegment::polygon(&[(0, 0), (0, 30), (30, 30), (30, 0)]);
    lines.extend(LineSegment::polygon(&[(5, 5), (5, 25), (25, 25), (25, 5)]));
    TrackSpec {
        lines,
        checkpoints: vec![
            CheckpointSpec { lines: vec![LineSegment::new(0, 25, 5, 25)] },
            CheckpointSpec { lines: vec![LineSegment::new(25, 25, 30, 25)] },
            CheckpointSpec { lines: vec![LineSegment::new(25, 5, 25, 0)] },
            CheckpointSpec { lines: vec![LineSegment::new(5, 5, 5, 0)] },
        ],
    }
}

/// A course with one finish line across x = 0..5 at y = 3.
fn short_track() -> TrackSpec {
    TrackSpec {
        lines: vec![],
        checkpoints: vec![CheckpointSpec { lines: vec![LineSegment::new(0, 3, 5, 3)] }],
    }
}

/// Everything a caller can observe about a race, serialized.
fn observe(app: &GameApp, race_id: RaceId) -> String {
    format!(
        "{}|{}|{}",
        app.race_snapshot_json(race_id).unwrap_or_default(),
        app.events().len(),
        app.world().entity_count()
    )
}

// --- Bootstrap ---

#[test]
fn test_bootstrap_wires_every_module() {
    init_logger();
    let clock = ManualClock::starting_at(0);
    let app = GameApp::new(ADMIN, GameConfig::default(), Arc::new(clock)).unwrap();

    assert!(app.is_paused(), "a fresh game starts paused");
    assert!(app.registry().is_initialized());
    assert!(app.has_role(Role::DefaultAdmin, ADMIN));
    assert!(app.has_role(Role::Deployer, ADMIN));
    assert!(app.has_role(Role::Pauser, ADMIN));
    assert!(!app.has_role(Role::Manager, ADMIN));

    assert_eq!(app.get_system(&RaceSystem::ID), Some(app.race_system().address()));
    assert_eq!(app.get_system(&MoveSystem::ID), Some(app.move_system().address()));
    assert_eq!(app.get_system(&TrackSystem::ID), Some(app.track_system().address()));
    assert!(app.has_role(Role::GameLogicContract, app.move_system().address()));
    assert!(app.get_component(&Position2D::ID).is_some());
    assert!(app.get_component(&RaceState::ID).is_some());
    assert_ne!(app.get_component(&Position2D::ID), app.get_component(&RaceState::ID));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig { move_cost: Some(FULL + 1), ..GameConfig::default() };
    let err = GameApp::new(ADMIN, config, Arc::new(ManualClock::default())).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

// --- Races ---

#[test]
fn test_scenario_a_new_race_is_waiting() {
    let (mut app, _) = setup();
    let race_id = app.create_race(A, 3).unwrap();
    assert_eq!(race_id, RaceId(1));

    let race = app.get_race(race_id).unwrap();
    assert_eq!(race.status, RaceStatus::WaitingForPlayers);
    assert_eq!(race.creator, A);
    assert_eq!(race.nb_players, 3);
    assert_eq!(race.nb_players_joined, 0);
    assert_eq!(race.players, vec![None, None, None]);
    assert_eq!(app.events().last(), Some(&GameEvent::RaceCreated { race_id, creator: A }));

    assert_eq!(app.create_race(B, 2).unwrap(), RaceId(2), "ids increase by one");
}

#[test]
fn test_scenario_b_last_join_starts_race() {
    let (mut app, clock) = setup();
    let race_id = app.create_race(A, 2).unwrap();

    assert!(!app.join_race(A, race_id).unwrap());
    let race = app.get_race(race_id).unwrap();
    assert_eq!(race.status, RaceStatus::WaitingForPlayers);
    assert_eq!(race.players, vec![Some(A), None]);

    let cursor = app.events().len();
    assert!(app.join_race(B, race_id).unwrap());
    assert_eq!(
        app.events().since(cursor),
        &[GameEvent::PlayerJoined { race_id, player: B }, GameEvent::RaceStarted { race_id }],
        "join and start must land in the same transaction"
    );

    let race = app.get_race(race_id).unwrap();
    assert_eq!(race.status, RaceStatus::Started);
    assert_eq!(race.players, vec![Some(A), Some(B)]);
    assert_eq!(race.nb_players_joined, 2);

    for player in [A, B] {
        let info = app.get_player_info(race_id, player).unwrap();
        assert_eq!((info.x, info.y), (1, 1));
        assert_eq!((info.vx, info.vy), (0, 0));
        assert_eq!(info.energy, FULL);
        assert_eq!(info.last_update, clock.now());
        assert_eq!(info.next_checkpoint, 0);
        assert!(!info.finished);
    }
}

#[test]
fn test_player_count_bounds() {
    let (mut app, _) = setup();
    assert_eq!(app.create_race(A, 0), Err(GameError::InvalidPlayerCount { requested: 0, max: 16 }));
    assert_eq!(app.create_race(A, 17), Err(GameError::InvalidPlayerCount { requested: 17, max: 16 }));
    assert_eq!(app.create_race(A, 16), Ok(RaceId(1)), "failed creations must not burn ids");
}

#[test]
fn test_player_info_errors() {
    let (mut app, _) = setup();
    let race_id = app.create_race(A, 2).unwrap();
    app.join_race(A, race_id).unwrap();

    assert_eq!(app.get_player_info(race_id, A), Err(GameError::RaceNotStarted(race_id)));
    assert_eq!(
        app.get_player_info(race_id, C),
        Err(GameError::PlayerNotJoined { race: race_id, player: C })
    );
    assert_eq!(app.get_player_info(RaceId(9), A), Err(GameError::RaceNotFound(RaceId(9))));
}

// --- Movement ---

#[test]
fn test_scenario_c_move_costs_a_full_tank() {
    let (mut app, clock) = setup();
    let race_id = started_race(&mut app, &[A, B]);

    let cursor = app.events().len();
    app.move_player(A, race_id, 1, 1).unwrap();
    assert_eq!(app.events().since(cursor), &[GameEvent::PlayerMoved { race_id, player: A }]);

    let info = app.get_player_info(race_id, A).unwrap();
    assert_eq!((info.x, info.y, info.vx, info.vy, info.energy), (2, 2, 1, 1, 0));

    assert_eq!(
        app.move_player(A, race_id, 1, 1),
        Err(GameError::NotEnoughEnergy { available: 0, required: FULL })
    );

    clock.advance(2);
    assert_eq!(app.get_player_info(race_id, A).unwrap().energy, 40_00);
    assert_eq!(
        app.move_player(A, race_id, 1, 1),
        Err(GameError::NotEnoughEnergy { available: 40_00, required: FULL })
    );

    clock.advance(3);
    assert_eq!(app.get_player_info(race_id, A).unwrap().energy, FULL);
    clock.advance(3_600);
    assert_eq!(app.get_player_info(race_id, A).unwrap().energy, FULL, "energy is capped");

    app.move_player(A, race_id, -1, 1).unwrap();
    let info = app.get_player_info(race_id, A).unwrap();
    assert_eq!((info.x, info.y, info.vx, info.vy, info.energy), (2, 4, 0, 2, 0));

    // The other player has been regenerating all along.
    app.move_player(B, race_id, 1, 1).unwrap();
    let info = app.get_player_info(race_id, B).unwrap();
    assert_eq!((info.x, info.y, info.vx, info.vy, info.energy), (2, 2, 1, 1, 0));
}

#[test]
fn test_energy_never_decreases_while_waiting() {
    let (mut app, clock) = setup();
    let race_id = started_race(&mut app, &[A]);
    app.move_player(A, race_id, 0, 0).unwrap();

    let mut last = 0;
    for _ in 0..8 {
        clock.advance(1);
        let energy = app.get_player_info(race_id, A).unwrap().energy;
        assert!(energy >= last && energy <= FULL);
        last = energy;
    }
    assert_eq!(last, FULL);
}

#[test]
fn test_cheaper_moves_leave_energy() {
    let config = GameConfig { move_cost: Some(30_00), ..GameConfig::default() };
    let (mut app, _) = setup_with(config);
    let race_id = started_race(&mut app, &[A]);

    app.move_player(A, race_id, 1, 0).unwrap();
    app.move_player(A, race_id, 1, 0).unwrap();
    app.move_player(A, race_id, 1, 0).unwrap();
    let info = app.get_player_info(race_id, A).unwrap();
    assert_eq!(info.energy, 10_00);
    assert_eq!((info.x, info.vx), (1 + 1 + 2 + 3, 3));
    assert!(matches!(app.move_player(A, race_id, 0, 0), Err(GameError::NotEnoughEnergy { .. })));
}

#[test]
fn test_scenario_d_lifecycle_errors() {
    let (mut app, _) = setup();

    assert_eq!(app.join_race(A, RaceId(42)), Err(GameError::RaceNotFound(RaceId(42))));
    assert_eq!(app.move_player(A, RaceId(42), 0, 0), Err(GameError::RaceNotFound(RaceId(42))));

    let race_id = app.create_race(A, 2).unwrap();
    app.join_race(A, race_id).unwrap();
    assert_eq!(
        app.join_race(A, race_id),
        Err(GameError::PlayerAlreadyJoined { race: race_id, player: A })
    );
    assert_eq!(app.move_player(A, race_id, 1, 1), Err(GameError::RaceNotStarted(race_id)));

    app.join_race(B, race_id).unwrap();
    assert_eq!(app.join_race(C, race_id), Err(GameError::RaceAlreadyStarted(race_id)));
    assert_eq!(
        app.move_player(C, race_id, 1, 1),
        Err(GameError::PlayerNotJoined { race: race_id, player: C })
    );

    for (dvx, dvy) in [(2, 1), (1, 2), (-2, 0), (1, -2)] {
        let err = app.move_player(A, race_id, dvx, dvy).unwrap_err();
        assert_eq!(err, GameError::InvalidMove { dvx, dvy });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[test]
fn test_scenario_e_pause_blocks_every_mutation() {
    let (mut app, _) = setup();
    let race_id = app.create_race(A, 2).unwrap();
    app.join_race(A, race_id).unwrap();
    let other = started_race(&mut app, &[C]);

    app.set_paused(ADMIN, true).unwrap();
    let before = observe(&app, race_id);

    assert_eq!(app.create_race(A, 2), Err(GameError::Paused));
    assert_eq!(app.join_race(B, race_id), Err(GameError::Paused));
    assert_eq!(app.move_player(C, other, 1, 1), Err(GameError::Paused));
    assert_eq!(app.create_track(MANAGER, short_track()), Err(GameError::Paused));
    assert_eq!(observe(&app, race_id), before);

    app.set_paused(ADMIN, false).unwrap();
    assert!(app.join_race(B, race_id).unwrap());
    app.move_player(C, other, 1, 1).unwrap();
    assert_eq!(app.create_race(A, 1), Ok(RaceId(3)));
}

#[test]
fn test_pause_is_checked_before_validation() {
    let (mut app, _) = setup();
    app.set_paused(ADMIN, true).unwrap();
    assert_eq!(app.move_player(A, RaceId(1), 5, 5), Err(GameError::Paused));
    assert_eq!(app.create_race(A, 0), Err(GameError::Paused));
}

#[test]
fn test_system_pause_only_stops_that_system() {
    let (mut app, _) = setup();
    let race_id = started_race(&mut app, &[A]);

    app.set_system_paused(ADMIN, MoveSystem::ID, true).unwrap();
    assert!(app.is_system_paused(&MoveSystem::ID));
    assert_eq!(app.move_player(A, race_id, 1, 0), Err(GameError::Paused));
    assert!(app.create_race(B, 1).is_ok());

    app.set_system_paused(ADMIN, MoveSystem::ID, false).unwrap();
    app.move_player(A, race_id, 1, 0).unwrap();
}

#[test]
fn test_only_pausers_pause() {
    let (mut app, _) = setup();
    assert_eq!(
        app.set_paused(A, true),
        Err(GameError::MissingRole { role: Role::Pauser, account: A })
    );
    assert!(!app.is_paused());
}

#[test]
fn test_failed_calls_change_nothing() {
    let (mut app, clock) = setup();
    let race_id = started_race(&mut app, &[A, B]);
    app.move_player(A, race_id, 1, 1).unwrap();
    clock.advance(1);

    let before = observe(&app, race_id);
    let a_before = app.get_player_info(race_id, A).unwrap();

    assert!(app.move_player(A, race_id, 1, 1).is_err()); // not enough energy
    assert!(app.move_player(B, race_id, 3, 0).is_err()); // invalid move
    assert!(app.move_player(C, race_id, 0, 0).is_err()); // not joined
    assert!(app.join_race(C, race_id).is_err()); // already started
    assert!(app.create_race_on_track(A, 2, TrackId(5)).is_err()); // no such track
    assert!(app.create_track(A, test_track()).is_err()); // not a manager

    assert_eq!(observe(&app, race_id), before);
    assert_eq!(app.get_player_info(race_id, A).unwrap(), a_before, "timestamp must not move");
}

#[test]
fn test_writes_require_game_logic_role() {
    let (mut app, _) = setup();
    let race_address = app.race_system().address();
    app.revoke_role(ADMIN, Role::GameLogicContract, race_address).unwrap();

    let entities = app.world().entity_count();
    assert_eq!(
        app.create_race(A, 2),
        Err(GameError::MissingRole { role: Role::GameLogicContract, account: race_address })
    );
    assert_eq!(app.world().entity_count(), entities);

    app.grant_role(ADMIN, Role::GameLogicContract, race_address).unwrap();
    assert_eq!(app.create_race(A, 2), Ok(RaceId(1)));
}

// --- Registry through the app ---

#[test]
fn test_role_admin_and_events() {
    let (mut app, _) = setup();

    assert_eq!(
        app.grant_role(A, Role::Manager, A),
        Err(GameError::MissingRole { role: Role::DefaultAdmin, account: A })
    );

    let cursor = app.events().len();
    app.grant_role(ADMIN, Role::Manager, A).unwrap();
    app.grant_role(ADMIN, Role::Manager, A).unwrap();
    assert_eq!(app.events().since(cursor).len(), 1, "a repeated grant emits nothing");

    app.revoke_role(ADMIN, Role::Manager, A).unwrap();
    assert!(!app.has_role(Role::Manager, A));
    assert_eq!(
        app.events().last(),
        Some(&GameEvent::RoleRevoked { role: Role::Manager, account: A, sender: ADMIN })
    );
}

#[test]
fn test_registration_overwrites_and_needs_deployer() {
    let (mut app, _) = setup();
    let replacement = Identity(0xbeef);

    assert!(matches!(
        app.register_system(A, RaceSystem::ID, replacement),
        Err(GameError::MissingRole { role: Role::Deployer, .. })
    ));
    app.register_system(ADMIN, RaceSystem::ID, replacement).unwrap();
    assert_eq!(app.get_system(&RaceSystem::ID), Some(replacement));
}

// --- Tracks ---

#[test]
fn test_create_and_read_track() {
    let (mut app, _) = setup();
    let spec = test_track();

    assert_eq!(
        app.create_track(A, spec.clone()),
        Err(GameError::MissingRole { role: Role::Manager, account: A })
    );

    let track_id = app.create_track(MANAGER, spec.clone()).unwrap();
    assert_eq!(track_id, TrackId(1));
    assert_eq!(app.events().last(), Some(&GameEvent::TrackCreated { track_id }));

    let view = app.get_track(track_id).unwrap();
    assert_eq!(view.id, track_id);
    assert_eq!(view.lines, spec.lines);
    assert_eq!(view.checkpoints, spec.checkpoints);
    assert_eq!(view.lines[3], LineSegment::new(30, 0, 0, 0));

    assert_eq!(app.get_track(TrackId(2)), Err(GameError::TrackNotFound(TrackId(2))));
}

#[test]
fn test_malformed_tracks_are_invalid() {
    let (mut app, _) = setup();
    let before = app.events().len();

    let no_checkpoints = TrackSpec { lines: test_track().lines, checkpoints: vec![] };
    assert!(matches!(app.create_track(MANAGER, no_checkpoints), Err(GameError::InvalidTrack(_))));

    let empty_checkpoint = TrackSpec { lines: vec![], checkpoints: vec![CheckpointSpec { lines: vec![] }] };
    assert!(matches!(app.create_track(MANAGER, empty_checkpoint), Err(GameError::InvalidTrack(_))));

    let point_checkpoint = TrackSpec {
        lines: vec![],
        checkpoints: vec![CheckpointSpec { lines: vec![LineSegment::new(2, 2, 2, 2)] }],
    };
    assert!(matches!(app.create_track(MANAGER, point_checkpoint), Err(GameError::InvalidTrack(_))));

    assert_eq!(app.events().len(), before);
    assert_eq!(app.create_track(MANAGER, short_track()), Ok(TrackId(1)), "rejected tracks must not consume ids");
}

#[test]
fn test_race_on_unknown_track() {
    let (mut app, _) = setup();
    assert_eq!(app.create_race_on_track(A, 1, TrackId(1)), Err(GameError::TrackNotFound(TrackId(1))));
    let track_id = app.create_track(MANAGER, short_track()).unwrap();
    let race_id = app.create_race_on_track(A, 1, track_id).unwrap();
    assert_eq!(app.get_race(race_id).unwrap().track, Some(track_id));
}

// --- Progress ---

#[test]
fn test_full_lap_on_test_track() {
    let (mut app, clock) = setup();
    let track_id = app.create_track(MANAGER, test_track()).unwrap();
    let race_id = app.create_race_on_track(A, 1, track_id).unwrap();
    app.join_race(A, race_id).unwrap();

    // (acceleration, position after the move, checkpoint crossed by the move)
    let lap: [((i32, i32), (i64, i64), Option<u32>); 31] = [
        ((1, 1), (2, 2), None),
        ((-1, 1), (2, 4), None),
        ((0, 1), (2, 7), None),
        ((0, 1), (2, 11), None),
        ((0, 0), (2, 15), None),
        ((0, 0), (2, 19), None),
        ((0, 0), (2, 23), None),
        ((0, 0), (2, 27), Some(0)),
        ((1, -1), (3, 30), None),
        ((1, -1), (5, 32), None),
        ((1, -1), (8, 33), None),
        ((1, -1), (12, 33), None),
        ((0, 0), (16, 33), None),
        ((0, 0), (20, 33), None),
        ((0, -1), (24, 32), None),
        ((-1, -1), (27, 30), None),
        ((-1, -1), (29, 27), None),
        ((-1, 0), (30, 24), Some(1)),
        ((-1, -1), (30, 20), None),
        ((0, 0), (30, 16), None),
        ((0, 0), (30, 12), None),
        ((0, 1), (30, 9), None),
        ((-1, 1), (29, 7), None),
        ((0, 0), (28, 5), None),
        ((-1, 1), (26, 4), None),
        ((0, 1), (24, 4), Some(2)),
        ((-1, 0), (21, 4), None),
        ((-1, 0), (17, 4), None),
        ((0, 0), (13, 4), None),
        ((-1, 0), (8, 4), None),
        ((0, 0), (3, 4), Some(3)),
    ];

    let mut expected_next = 0;
    for (turn, ((dvx, dvy), (x, y), crossed)) in lap.into_iter().enumerate() {
        if turn > 0 {
            clock.advance(5);
        }
        let cursor = app.events().len();
        app.move_player(A, race_id, dvx, dvy).unwrap();
        let info = app.get_player_info(race_id, A).unwrap();
        assert_eq!((info.x, info.y), (x, y), "position after turn {turn}");

        let events = app.events().since(cursor);
        if let Some(checkpoint) = crossed {
            expected_next = checkpoint + 1;
            assert!(
                events.contains(&GameEvent::CheckpointCrossed { race_id, player: A, checkpoint }),
                "turn {turn} should cross checkpoint {checkpoint}"
            );
        } else {
            assert_eq!(events, &[GameEvent::PlayerMoved { race_id, player: A }], "turn {turn}");
        }
        assert_eq!(info.next_checkpoint, expected_next);
    }

    let info = app.get_player_info(race_id, A).unwrap();
    assert!(info.finished);
    let race = app.get_race(race_id).unwrap();
    assert_eq!(race.status, RaceStatus::Finished);
    assert_eq!(race.finish_order, vec![A]);

    let tail = app.events().since(app.events().len() - 3);
    assert_eq!(
        tail,
        &[
            GameEvent::CheckpointCrossed { race_id, player: A, checkpoint: 3 },
            GameEvent::PlayerFinished { race_id, player: A, rank: 1 },
            GameEvent::RaceFinished { race_id },
        ]
    );

    clock.advance(5);
    assert_eq!(app.move_player(A, race_id, 0, 0), Err(GameError::RaceNotStarted(race_id)));
}

#[test]
fn test_all_players_rule_waits_for_everyone() {
    let (mut app, clock) = setup();
    let track_id = app.create_track(MANAGER, short_track()).unwrap();
    let race_id = app.create_race_on_track(A, 2, track_id).unwrap();
    app.join_race(A, race_id).unwrap();
    app.join_race(B, race_id).unwrap();

    app.move_player(A, race_id, 1, 1).unwrap();
    clock.advance(5);
    app.move_player(A, race_id, 0, 1).unwrap();
    assert_eq!(app.events().last(), Some(&GameEvent::PlayerFinished { race_id, player: A, rank: 1 }));
    assert_eq!(app.get_race(race_id).unwrap().status, RaceStatus::Started);

    clock.advance(5);
    assert_eq!(
        app.move_player(A, race_id, 0, 0),
        Err(GameError::PlayerAlreadyFinished { race: race_id, player: A })
    );

    app.move_player(B, race_id, 1, 1).unwrap();
    clock.advance(5);
    app.move_player(B, race_id, 0, 1).unwrap();

    let race = app.get_race(race_id).unwrap();
    assert_eq!(race.status, RaceStatus::Finished);
    assert_eq!(race.finish_order, vec![A, B]);
    assert_eq!(app.events().last(), Some(&GameEvent::RaceFinished { race_id }));
}

#[test]
fn test_first_player_rule_ends_race_at_once() {
    let config = GameConfig { finish_rule: FinishRule::FirstPlayer, ..GameConfig::default() };
    let (mut app, clock) = setup_with(config);
    let track_id = app.create_track(MANAGER, short_track()).unwrap();
    let race_id = app.create_race_on_track(A, 2, track_id).unwrap();
    app.join_race(A, race_id).unwrap();
    app.join_race(B, race_id).unwrap();

    app.move_player(A, race_id, 1, 1).unwrap();
    clock.advance(5);
    app.move_player(A, race_id, 0, 1).unwrap();

    assert_eq!(app.get_race(race_id).unwrap().status, RaceStatus::Finished);
    assert_eq!(app.move_player(B, race_id, 1, 1), Err(GameError::RaceNotStarted(race_id)));
}

#[test]
fn test_race_without_track_never_finishes() {
    let (mut app, clock) = setup();
    let race_id = started_race(&mut app, &[A]);
    for _ in 0..5 {
        app.move_player(A, race_id, 0, 1).unwrap();
        clock.advance(5);
    }
    let info = app.get_player_info(race_id, A).unwrap();
    assert_eq!((info.next_checkpoint, info.finished), (0, false));
    assert_eq!(app.get_race(race_id).unwrap().status, RaceStatus::Started);
}

struct NeverProgress;

impl ProgressPolicy for NeverProgress {
    fn evaluate(&self, _: &World, _: &RaceState, step: &PlayerStep) -> Result<ProgressUpdate, GameError> {
        Ok(ProgressUpdate::unchanged(step.progress))
    }
}

#[test]
fn test_progress_policy_can_be_swapped() {
    let (app, clock) = setup();
    let mut app = app.with_policy(Box::new(NeverProgress));
    let track_id = app.create_track(MANAGER, short_track()).unwrap();
    let race_id = app.create_race_on_track(A, 1, track_id).unwrap();
    app.join_race(A, race_id).unwrap();

    app.move_player(A, race_id, 1, 1).unwrap();
    clock.advance(5);
    app.move_player(A, race_id, 0, 1).unwrap();
    assert_eq!(app.get_player_info(race_id, A).unwrap().next_checkpoint, 0);
    assert_eq!(app.get_race(race_id).unwrap().status, RaceStatus::Started);
}

// --- Commands and snapshots ---

#[test]
fn test_json_commands() {
    let (mut app, _) = setup();

    let outcome = app.submit_json(A, r#"{"type":"create_race","nb_players":1}"#).unwrap();
    assert_eq!(outcome, Outcome::RaceCreated { race_id: RaceId(1) });
    let outcome = app.submit_json(A, r#"{"type":"join_race","race_id":1}"#).unwrap();
    assert_eq!(outcome, Outcome::Joined { race_id: RaceId(1), started: true });
    let outcome = app.submit_json(A, r#"{"type":"move","race_id":1,"vx":1,"vy":0}"#).unwrap();
    assert_eq!(outcome, Outcome::Moved { race_id: RaceId(1) });

    let err = app.submit_json(A, r#"{"type":"fly"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(app.submit_json(A, "{"), Err(GameError::InvalidCommand(_))));
}

#[test]
fn test_track_and_role_commands() {
    let (mut app, _) = setup();
    let outcome = app
        .submit(ADMIN, Command::GrantRole { role: Role::Manager, account: B })
        .unwrap();
    assert_eq!(outcome, Outcome::Done);

    let spec_json = serde_json::to_string(&Command::CreateTrack(short_track())).unwrap();
    let outcome = app.submit_json(B, &spec_json).unwrap();
    assert_eq!(outcome, Outcome::TrackCreated { track_id: TrackId(1) });

    let outcome = app
        .submit(A, Command::CreateRace { nb_players: 2, track: Some(TrackId(1)) })
        .unwrap();
    assert_eq!(outcome, Outcome::RaceCreated { race_id: RaceId(1) });

    app.submit(ADMIN, Command::SetPaused { paused: true }).unwrap();
    assert_eq!(app.submit(A, Command::JoinRace { race_id: RaceId(1) }), Err(GameError::Paused));
}

#[test]
fn test_race_snapshot_lists_placed_players() {
    let (mut app, _) = setup();
    let race_id = app.create_race(A, 2).unwrap();
    app.join_race(A, race_id).unwrap();
    assert!(app.race_snapshot(race_id).unwrap().players.is_empty());

    app.join_race(B, race_id).unwrap();
    let snapshot = app.race_snapshot(race_id).unwrap();
    assert_eq!(snapshot.race.status, RaceStatus::Started);
    let players: Vec<Identity> = snapshot.players.iter().map(|entry| entry.player).collect();
    assert_eq!(players, vec![A, B]);

    let json = app.race_snapshot_json(race_id).unwrap();
    assert!(json.contains(r#""status":"STARTED""#));
    assert!(json.contains(r#""energy":10000"#));
}
