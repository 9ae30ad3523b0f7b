// src/app/game_app.rs

use std::sync::Arc;

use log::{info, warn};

use super::{command_handler, init_handler, state_getter};
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::events::{EventLog, GameEvent};
use crate::logic::rules::{CheckpointProgress, ProgressPolicy};
use crate::protocol::{
    Command, Identity, ModuleId, Outcome, PlayerView, RaceId, RaceSnapshot, RaceView, TrackId,
    TrackSpec, TrackView,
};
use crate::registry::{Authority, GameRegistry, Role};
use crate::systems::{MoveSystem, RaceSystem, SystemContext, TrackSystem};

/// The installed systems plus the progress policy movement reports to.
pub(crate) struct Modules {
    pub(crate) race: RaceSystem,
    pub(crate) movement: MoveSystem,
    pub(crate) track: TrackSystem,
    pub(crate) policy: Box<dyn ProgressPolicy>,
}

/// The whole game: component store, registry and event log, driven through
/// typed entry points.
///
/// Every mutating call is one transaction. It either commits all of its
/// writes and events, or fails and leaves the game exactly as it was.
pub struct GameApp {
    world: World,
    registry: GameRegistry,
    events: EventLog,
    config: GameConfig,
    clock: Arc<dyn Clock>,
    modules: Modules,
}

impl GameApp {
    /// Builds a game administered by `admin`.
    ///
    /// `admin` gets the admin, deployer and pauser roles, every component
    /// and system is registered, and systems get write access. The game
    /// starts paused; call [`GameApp::set_paused`] to open it.
    pub fn new(admin: Identity, config: GameConfig, clock: Arc<dyn Clock>) -> Result<Self, GameError> {
        config.validate()?;
        info!("GameApp: initializing for admin {}", admin);

        let mut world = init_handler::initialize_world();
        let mut registry = GameRegistry::new();
        let modules = Modules {
            race: RaceSystem::new(init_handler::system_address(0)),
            movement: MoveSystem::new(init_handler::system_address(1)),
            track: TrackSystem::new(init_handler::system_address(2)),
            policy: Box::new(CheckpointProgress::new(config.finish_rule)),
        };
        let events = init_handler::install(&mut registry, &mut world, admin, &modules)?;

        let mut log = EventLog::new();
        log.extend(events);
        info!("GameApp: ready ({} tables, paused)", world.component_ids().len());

        Ok(Self { world, registry, events: log, config, clock, modules })
    }

    /// Replaces the progress policy evaluated after every move.
    pub fn with_policy(mut self, policy: Box<dyn ProgressPolicy>) -> Self {
        self.modules.policy = policy;
        self
    }

    /// Runs `op` as one all-or-nothing transaction.
    fn transact<R>(
        &mut self,
        action: &str,
        op: impl FnOnce(&mut SystemContext<'_>, &Modules) -> Result<R, GameError>,
    ) -> Result<R, GameError> {
        let snapshot = self.world.clone();
        let now = self.clock.now();
        let result = {
            let mut ctx = SystemContext::new(&mut self.world, &self.registry, &self.config, now);
            op(&mut ctx, &self.modules).map(|value| (value, ctx.take_events()))
        };
        match result {
            Ok((value, events)) => {
                self.events.extend(events);
                Ok(value)
            }
            Err(err) => {
                self.world = snapshot;
                warn!("GameApp: {} rejected: {}", action, err);
                Err(err)
            }
        }
    }

    fn record(&mut self, event: Option<GameEvent>) {
        if let Some(event) = event {
            self.events.push(event);
        }
    }

    // --- Races ---

    pub fn create_race(&mut self, caller: Identity, nb_players: u32) -> Result<RaceId, GameError> {
        self.transact("create_race", |ctx, m| m.race.create_race(ctx, caller, nb_players, None))
    }

    pub fn create_race_on_track(
        &mut self,
        caller: Identity,
        nb_players: u32,
        track: TrackId,
    ) -> Result<RaceId, GameError> {
        self.transact("create_race_on_track", |ctx, m| {
            m.race.create_race(ctx, caller, nb_players, Some(track))
        })
    }

    /// Returns whether this join started the race.
    pub fn join_race(&mut self, caller: Identity, race_id: RaceId) -> Result<bool, GameError> {
        self.transact("join_race", |ctx, m| m.race.join_race(ctx, caller, race_id))
    }

    pub fn move_player(&mut self, caller: Identity, race_id: RaceId, dvx: i32, dvy: i32) -> Result<(), GameError> {
        self.transact("move", |ctx, m| {
            m.movement.move_player(ctx, m.policy.as_ref(), caller, race_id, dvx, dvy)
        })
    }

    pub fn get_race(&self, race_id: RaceId) -> Result<RaceView, GameError> {
        RaceSystem::get_race(&self.world, race_id)
    }

    pub fn get_player_info(&self, race_id: RaceId, player: Identity) -> Result<PlayerView, GameError> {
        RaceSystem::get_player_info(&self.world, race_id, player, self.clock.now(), &self.config)
    }

    /// Race view plus the state of every placed player.
    pub fn race_snapshot(&self, race_id: RaceId) -> Result<RaceSnapshot, GameError> {
        state_getter::race_snapshot(&self.world, race_id, self.clock.now(), &self.config)
    }

    pub fn race_snapshot_json(&self, race_id: RaceId) -> Result<String, GameError> {
        state_getter::race_snapshot_json(&self.world, race_id, self.clock.now(), &self.config)
    }

    // --- Tracks ---

    pub fn create_track(&mut self, caller: Identity, spec: TrackSpec) -> Result<TrackId, GameError> {
        self.transact("create_track", |ctx, m| m.track.create_track(ctx, caller, spec))
    }

    pub fn get_track(&self, track_id: TrackId) -> Result<TrackView, GameError> {
        TrackSystem::get_track(&self.world, track_id)
    }

    // --- Registry ---

    pub fn grant_role(&mut self, sender: Identity, role: Role, account: Identity) -> Result<(), GameError> {
        let event = self.registry.grant_role(sender, role, account)?;
        self.record(event);
        Ok(())
    }

    pub fn revoke_role(&mut self, sender: Identity, role: Role, account: Identity) -> Result<(), GameError> {
        let event = self.registry.revoke_role(sender, role, account)?;
        self.record(event);
        Ok(())
    }

    pub fn set_paused(&mut self, sender: Identity, paused: bool) -> Result<(), GameError> {
        let event = self.registry.set_paused(sender, paused)?;
        self.record(event);
        Ok(())
    }

    pub fn set_system_paused(&mut self, sender: Identity, system: ModuleId, paused: bool) -> Result<(), GameError> {
        let event = self.registry.set_system_paused(sender, system, paused)?;
        self.record(event);
        Ok(())
    }

    pub fn register_component(&mut self, sender: Identity, id: ModuleId, address: Identity) -> Result<(), GameError> {
        let event = self.registry.register_component(sender, id, address)?;
        self.record(Some(event));
        Ok(())
    }

    pub fn register_system(&mut self, sender: Identity, id: ModuleId, address: Identity) -> Result<(), GameError> {
        let event = self.registry.register_system(sender, id, address)?;
        self.record(Some(event));
        Ok(())
    }

    pub fn has_role(&self, role: Role, account: Identity) -> bool {
        self.registry.has_role(role, account)
    }

    pub fn is_paused(&self) -> bool {
        self.registry.is_paused()
    }

    pub fn is_system_paused(&self, system: &ModuleId) -> bool {
        self.registry.is_system_paused(system)
    }

    pub fn get_component(&self, id: &ModuleId) -> Option<Identity> {
        self.registry.get_component(id)
    }

    pub fn get_system(&self, id: &ModuleId) -> Option<Identity> {
        self.registry.get_system(id)
    }

    // --- Commands ---

    /// Runs one [`Command`] on behalf of `caller`.
    pub fn submit(&mut self, caller: Identity, command: Command) -> Result<Outcome, GameError> {
        command_handler::dispatch(self, caller, command)
    }

    /// Like [`GameApp::submit`], with the command as JSON.
    pub fn submit_json(&mut self, caller: Identity, json: &str) -> Result<Outcome, GameError> {
        let command = command_handler::parse_command(json)?;
        self.submit(caller, command)
    }

    // --- Accessors ---

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn race_system(&self) -> &RaceSystem {
        &self.modules.race
    }

    pub fn move_system(&self) -> &MoveSystem {
        &self.modules.movement
    }

    pub fn track_system(&self) -> &TrackSystem {
        &self.modules.track
    }
}

impl std::fmt::Debug for GameApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameApp")
            .field("world", &self.world)
            .field("registry", &self.registry)
            .field("events", &self.events.len())
            .field("config", &self.config)
            .finish()
    }
}
