//! Internal modules for the Morse game client.
//!
//! This library provides configuration, the game loop driver and the two
//! front ends (terminal UI and headless) used by the morse_client binary.

pub mod app;
pub mod config;
pub mod headless;
pub mod tui_app;
