//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime settings
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Splits the engine into a headless core plugin and a rendering plugin.
pub mod app_setup;

/// Visualiser lifecycle states and the per-frame system set ordering.
pub mod app_state;

/// Runtime settings with defaults from `constants`, optionally read from JSON.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
