use bevy::prelude::*;
use bevy::window::PresentMode;
#[cfg(not(target_arch = "wasm32"))]
use bevy::window::WindowResolution;

#[cfg(not(target_arch = "wasm32"))]
const WINDOW_TITLE: &str = "Embedding Visualiser";

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            // Wheel zoom over the canvas must not scroll the host page.
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: WINDOW_TITLE.into(),
            name: Some(WINDOW_TITLE.into()),
            resolution: WindowResolution::new(1280.0, 800.0),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
