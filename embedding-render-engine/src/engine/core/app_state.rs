use bevy::prelude::*;

/// Lifecycle of the single visualisation instance.
#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum VisualiserState {
    /// No batch loaded; render loop and pointer handling are stopped.
    #[default]
    Idle,
    /// A batch is on screen.
    Running,
    /// The drawing surface was lost or never became available.
    Failed,
}

/// Per-frame ordering inside `Update`.
///
/// A batch load or teardown completes in `Load` before the camera, pointer
/// handlers or uniform upload of the same tick can observe the model.
/// `Camera` captures the snapshot that both `Interaction` and the draw use.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisualiserSet {
    Load,
    Camera,
    Interaction,
    RenderLoop,
    Present,
}

pub fn configure_visualiser_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            VisualiserSet::Load,
            VisualiserSet::Camera,
            VisualiserSet::Interaction,
            VisualiserSet::RenderLoop,
            VisualiserSet::Present,
        )
            .chain(),
    );
}
