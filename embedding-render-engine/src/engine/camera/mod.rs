//! Orbit camera control and the per-tick camera snapshot.

/// Damped orbit around a fixed target: drag rotates, scroll zooms.
pub mod orbit_camera;

/// Immutable view of the camera shared by picking and drawing within one tick.
pub mod snapshot;
