use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::{camera, picking, render_settings, scene};
use serde::Deserialize;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::scene::scene_graph::VisualiserCamera;

pub const SETTINGS_PATH: &str = "visualiser.settings.json";

/// Runtime configuration. Every field falls back to the `constants` default,
/// so a settings file only needs the values it changes.
#[derive(Resource, Asset, TypePath, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualiserSettings {
    pub point_base_size: f32,
    pub point_highlight_size: f32,
    pub pulse_frequency: f32,
    pub pulse_amplitude: f32,
    pub highlight_colour: [f32; 4],
    pub background_colour: [f32; 3],
    pub time_step: f32,
    pub hit_tolerance_px: f32,
    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_start_position: [f32; 3],
    pub orbit_damping: f32,
    pub orbit_rotate_speed: f32,
    pub orbit_zoom_speed: f32,
    pub orbit_min_distance: f32,
    pub orbit_max_distance: f32,
    /// Batch file loaded at startup on native builds.
    pub demo_batch: Option<String>,
}

impl Default for VisualiserSettings {
    fn default() -> Self {
        Self {
            point_base_size: render_settings::POINT_BASE_SIZE,
            point_highlight_size: render_settings::POINT_HIGHLIGHT_SIZE,
            pulse_frequency: render_settings::PULSE_FREQUENCY,
            pulse_amplitude: render_settings::PULSE_AMPLITUDE,
            highlight_colour: render_settings::HIGHLIGHT_COLOUR,
            background_colour: scene::BACKGROUND_COLOUR,
            time_step: render_settings::TIME_STEP,
            hit_tolerance_px: picking::HIT_TOLERANCE_PX,
            camera_fov_degrees: camera::CAMERA_FOV_DEGREES,
            camera_near: camera::CAMERA_NEAR,
            camera_far: camera::CAMERA_FAR,
            camera_start_position: camera::CAMERA_START_POSITION.to_array(),
            orbit_damping: camera::ORBIT_DAMPING,
            orbit_rotate_speed: camera::ORBIT_ROTATE_SPEED,
            orbit_zoom_speed: camera::ORBIT_ZOOM_SPEED,
            orbit_min_distance: camera::ORBIT_MIN_DISTANCE,
            orbit_max_distance: camera::ORBIT_MAX_DISTANCE,
            demo_batch: None,
        }
    }
}

impl VisualiserSettings {
    pub fn background(&self) -> Color {
        let [r, g, b] = self.background_colour;
        Color::srgb(r, g, b)
    }

    pub fn highlight_colour(&self) -> Vec4 {
        Vec4::from_array(self.highlight_colour)
    }

    pub fn perspective(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.camera_fov_degrees.to_radians(),
            near: self.camera_near,
            far: self.camera_far,
            ..default()
        }
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<VisualiserSettings>>,
    resolved: bool,
}

impl SettingsLoader {
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

pub fn start_settings_load(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    info!("Loading settings from: {}", SETTINGS_PATH);
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Apply the settings file once it resolves; a missing or malformed file keeps the defaults.
pub fn apply_settings_when_loaded(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<VisualiserSettings>>,
    mut settings: ResMut<VisualiserSettings>,
) {
    if loader.resolved {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(loaded) = settings_assets.get(&handle) {
        *settings = loaded.clone();
        loader.resolved = true;
        info!("Settings applied from {}", SETTINGS_PATH);
    } else if matches!(
        asset_server.get_load_state(&handle),
        Some(LoadState::Failed(_))
    ) {
        loader.resolved = true;
        warn!("Settings file {} unavailable, using defaults", SETTINGS_PATH);
    }
}

/// Push settings that live outside the per-frame uniforms into the scene.
///
/// A new `camera_start_position` re-seats the orbit there, so a settings file
/// that resolves after startup still decides where the camera begins.
pub fn propagate_settings(
    settings: Res<VisualiserSettings>,
    mut clear_colour: ResMut<ClearColor>,
    mut orbit: ResMut<OrbitCamera>,
    mut applied_start: Local<Option<[f32; 3]>>,
    mut cameras: Query<(&mut Projection, &mut Transform), With<VisualiserCamera>>,
) {
    if !settings.is_changed() {
        return;
    }

    clear_colour.0 = settings.background();

    let start_moved = *applied_start != Some(settings.camera_start_position);
    if start_moved {
        let target = orbit.target;
        *orbit = OrbitCamera::looking_from(Vec3::from_array(settings.camera_start_position), target);
        *applied_start = Some(settings.camera_start_position);
    }
    orbit.configure(&settings);

    for (mut projection, mut transform) in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            let aspect_ratio = perspective.aspect_ratio;
            *perspective = PerspectiveProjection {
                aspect_ratio,
                ..settings.perspective()
            };
        }
        if start_moved {
            *transform = orbit.transform();
        }
    }
}
