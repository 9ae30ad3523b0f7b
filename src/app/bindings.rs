// src/app/bindings.rs
//! JavaScript facade over [`GameApp`]. Everything crosses the boundary as
//! JSON strings; identities as `0x` hex or decimal strings.

use std::sync::Arc;

use log::info;
use wasm_bindgen::prelude::*;

use super::game_app::GameApp;
use crate::clock::{Clock, Timestamp};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::protocol::{Identity, RaceId, TrackId};

/// Wall clock read through `Date.now()`.
#[derive(Debug, Default, Clone, Copy)]
struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> Timestamp {
        (js_sys::Date::now() / 1000.0) as Timestamp
    }
}

#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: GameError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(GameError::Serialization(e.to_string())))
}

fn parse_identity(s: &str) -> Result<Identity, JsValue> {
    s.parse().map_err(to_js)
}

#[wasm_bindgen]
pub struct RaceGame {
    app: GameApp,
}

#[wasm_bindgen]
impl RaceGame {
    /// `config_json` may be omitted or list only the settings to change.
    #[wasm_bindgen(constructor)]
    pub fn new(admin: &str, config_json: Option<String>) -> Result<RaceGame, JsValue> {
        let admin = parse_identity(admin)?;
        let config = match config_json {
            Some(json) => GameConfig::from_json_str(&json).map_err(to_js)?,
            None => GameConfig::default(),
        };
        let app = GameApp::new(admin, config, Arc::new(JsClock)).map_err(to_js)?;
        info!("RaceGame: created for admin {}", admin);
        Ok(RaceGame { app })
    }

    /// Runs a JSON `Command` as `caller` and returns the JSON `Outcome`.
    pub fn submit(&mut self, caller: &str, command_json: &str) -> Result<String, JsValue> {
        let caller = parse_identity(caller)?;
        let outcome = self.app.submit_json(caller, command_json).map_err(to_js)?;
        to_json(&outcome)
    }

    pub fn get_race(&self, race_id: u64) -> Result<String, JsValue> {
        to_json(&self.app.get_race(RaceId(race_id)).map_err(to_js)?)
    }

    pub fn get_player_info(&self, race_id: u64, player: &str) -> Result<String, JsValue> {
        let player = parse_identity(player)?;
        to_json(&self.app.get_player_info(RaceId(race_id), player).map_err(to_js)?)
    }

    pub fn get_track(&self, track_id: u64) -> Result<String, JsValue> {
        to_json(&self.app.get_track(TrackId(track_id)).map_err(to_js)?)
    }

    pub fn race_snapshot(&self, race_id: u64) -> Result<String, JsValue> {
        self.app.race_snapshot_json(RaceId(race_id)).map_err(to_js)
    }

    /// JSON array of the events recorded after `cursor`.
    pub fn events_since(&self, cursor: usize) -> Result<String, JsValue> {
        to_json(&self.app.events().since(cursor))
    }

    pub fn event_count(&self) -> usize {
        self.app.events().len()
    }
}
