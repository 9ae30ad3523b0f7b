// src/app/mod.rs
//! The game application and its entry points, split by concern.

pub mod command_handler;
pub mod game_app;
pub mod init_handler;
pub mod state_getter;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

#[cfg(test)]
mod tests;

pub use game_app::GameApp;
