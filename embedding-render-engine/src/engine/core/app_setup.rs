use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::diagnostics::LOG_FILTER;

use crate::engine::assets::batch_manifest::BatchManifest;
use crate::engine::assets::point_cloud_model::PointCloudModel;
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_input, step_orbit_camera};
use crate::engine::camera::snapshot::{CameraSnapshot, capture_camera_snapshot};
use crate::engine::core::app_state::{VisualiserSet, VisualiserState, configure_visualiser_sets};
use crate::engine::core::settings::{
    SettingsLoader, VisualiserSettings, apply_settings_when_loaded, propagate_settings,
    start_settings_load,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::render::highlight_material::HighlightMaterial;
use crate::engine::render::render_loop::{
    AnimationClock, RenderLoopStats, advance_animation_clock, sync_highlight_uniforms,
};
use crate::engine::scene::axes::{spawn_axes, update_axis_labels};
use crate::engine::scene::label_overlay::{spawn_label_overlay, update_label_overlay};
use crate::engine::scene::point_cloud_loader::{
    BatchLoadOutcome, LivePointCloud, LoadBatchRequest, TeardownRequest,
    handle_load_batch_requests, handle_teardown_requests,
};
use crate::engine::scene::scene_graph::{
    handle_surface_lost, handle_viewport_resize, initialise_scene, verify_render_surface,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::point_selection::{
    DisplayedLabelChanged, pointer_click_system, pointer_hover_system,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::demo_batch::{
    DemoBatchLoader, start_demo_batch_load, submit_demo_batch_when_loaded,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

/// Model, lifecycle and per-frame logic. Needs no window or GPU, so it can drive
/// a headless `App` with `MinimalPlugins`, `AssetPlugin`, `StatesPlugin` and
/// `InputPlugin`.
pub struct VisualiserCorePlugin;

impl Plugin for VisualiserCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<VisualiserState>()
            .init_resource::<VisualiserSettings>()
            .init_resource::<PointCloudModel>()
            .init_resource::<LivePointCloud>()
            .init_resource::<AnimationClock>()
            .init_resource::<RenderLoopStats>()
            .init_resource::<OrbitCamera>()
            .init_resource::<CameraSnapshot>()
            .add_event::<LoadBatchRequest>()
            .add_event::<TeardownRequest>()
            .add_event::<BatchLoadOutcome>()
            .add_event::<DisplayedLabelChanged>();

        configure_visualiser_sets(app);

        // Load and teardown run in every state: they are how the state changes.
        app.add_systems(
            Update,
            (handle_teardown_requests, handle_load_batch_requests)
                .chain()
                .in_set(VisualiserSet::Load),
        )
        .add_systems(
            Update,
            (orbit_camera_input, step_orbit_camera, capture_camera_snapshot)
                .chain()
                .in_set(VisualiserSet::Camera)
                .run_if(in_state(VisualiserState::Running)),
        )
        .add_systems(
            Update,
            (pointer_hover_system, pointer_click_system)
                .chain()
                .in_set(VisualiserSet::Interaction)
                .run_if(in_state(VisualiserState::Running)),
        )
        .add_systems(
            Update,
            (advance_animation_clock, sync_highlight_uniforms)
                .chain()
                .in_set(VisualiserSet::RenderLoop)
                .run_if(in_state(VisualiserState::Running)),
        );
    }
}

/// Window-facing half: material pipeline, scene entities, UI, settings file.
pub struct VisualiserRenderPlugin;

impl Plugin for VisualiserRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<HighlightMaterial>::default())
            // Registers the settings and batch files as loadable JSON assets.
            .add_plugins(JsonAssetPlugin::<VisualiserSettings>::new(&["settings.json"]))
            .add_plugins(JsonAssetPlugin::<BatchManifest>::new(&["batch.json"]))
            .init_resource::<SettingsLoader>()
            .insert_resource(ClearColor(VisualiserSettings::default().background()));

        app.add_systems(
            Startup,
            (
                start_settings_load,
                initialise_scene,
                verify_render_surface,
                spawn_axes,
                spawn_label_overlay,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (apply_settings_when_loaded, propagate_settings, handle_viewport_resize)
                .chain()
                .before(VisualiserSet::Load),
        )
        .add_systems(
            Update,
            (update_axis_labels, update_label_overlay, handle_surface_lost)
                .in_set(VisualiserSet::Present),
        );

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<DemoBatchLoader>().add_systems(
                Update,
                (start_demo_batch_load, submit_demo_batch_when_loaded)
                    .chain()
                    .after(apply_settings_when_loaded)
                    .before(VisualiserSet::Load),
            );
        }
    }
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(VisualiserCorePlugin)
        .add_plugins(VisualiserRenderPlugin)
        .add_plugins(WebRpcPlugin);

    app.add_systems(
        Update,
        fps_notification_system.in_set(VisualiserSet::Present),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system.in_set(VisualiserSet::Present));
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
