// src/app/command_handler.rs
//! Turns [`Command`] messages into calls on [`GameApp`].

use log::debug;

use super::game_app::GameApp;
use crate::error::GameError;
use crate::protocol::{Command, Identity, Outcome};

pub(crate) fn parse_command(json: &str) -> Result<Command, GameError> {
    serde_json::from_str(json).map_err(|e| GameError::InvalidCommand(e.to_string()))
}

pub(crate) fn dispatch(app: &mut GameApp, caller: Identity, command: Command) -> Result<Outcome, GameError> {
    debug!("command from {}: {:?}", caller, command);
    match command {
        Command::CreateRace { nb_players, track: None } => {
            let race_id = app.create_race(caller, nb_players)?;
            Ok(Outcome::RaceCreated { race_id })
        }
        Command::CreateRace { nb_players, track: Some(track) } => {
            let race_id = app.create_race_on_track(caller, nb_players, track)?;
            Ok(Outcome::RaceCreated { race_id })
        }
        Command::JoinRace { race_id } => {
            let started = app.join_race(caller, race_id)?;
            Ok(Outcome::Joined { race_id, started })
        }
        Command::Move { race_id, vx, vy } => {
            app.move_player(caller, race_id, vx, vy)?;
            Ok(Outcome::Moved { race_id })
        }
        Command::CreateTrack(spec) => {
            let track_id = app.create_track(caller, spec)?;
            Ok(Outcome::TrackCreated { track_id })
        }
        Command::GrantRole { role, account } => {
            app.grant_role(caller, role, account)?;
            Ok(Outcome::Done)
        }
        Command::RevokeRole { role, account } => {
            app.revoke_role(caller, role, account)?;
            Ok(Outcome::Done)
        }
        Command::SetPaused { paused } => {
            app.set_paused(caller, paused)?;
            Ok(Outcome::Done)
        }
        Command::SetSystemPaused { system, paused } => {
            app.set_system_paused(caller, system, paused)?;
            Ok(Outcome::Done)
        }
        Command::RegisterComponent { id, address } => {
            app.register_component(caller, id, address)?;
            Ok(Outcome::Done)
        }
        Command::RegisterSystem { id, address } => {
            app.register_system(caller, id, address)?;
            Ok(Outcome::Done)
        }
    }
}
