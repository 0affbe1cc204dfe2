use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowClosed, WindowResized};
use constants::camera::CAMERA_TARGET;
use constants::scene::{AMBIENT_BRIGHTNESS, DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_DIRECTION};

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::app_state::VisualiserState;
use crate::engine::core::settings::VisualiserSettings;
use crate::engine::scene::point_cloud_loader::TeardownRequest;

#[derive(Component)]
pub struct VisualiserCamera;

/// Camera, lights and clear colour. Runs once at startup.
pub fn initialise_scene(
    mut commands: Commands,
    settings: Res<VisualiserSettings>,
    mut orbit: ResMut<OrbitCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let eye = Vec3::from_array(settings.camera_start_position);
    *orbit = OrbitCamera::looking_from(eye, CAMERA_TARGET);
    orbit.configure(&settings);

    let aspect_ratio = windows
        .single()
        .ok()
        .map(|window| window.width() / window.height().max(1.0))
        .unwrap_or(1.0);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            aspect_ratio,
            ..settings.perspective()
        }),
        // Keep the sprite colours exactly as the shader writes them.
        Tonemapping::None,
        orbit.transform(),
        VisualiserCamera,
    ));

    spawn_lighting(&mut commands);
    commands.insert_resource(ClearColor(settings.background()));
    info!("Scene initialised, camera at {:?}", eye);
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(DIRECTIONAL_LIGHT_DIRECTION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Move into `Failed` when there is nothing to draw into.
pub fn verify_render_surface(
    windows: Query<(), With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<VisualiserState>>,
) {
    if windows.is_empty() {
        error!("No primary window available, visualiser cannot draw");
        next_state.set(VisualiserState::Failed);
    }
}

/// Keep the projection aspect in step with the drawing surface.
pub fn handle_viewport_resize(
    mut resize_events: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<VisualiserCamera>>,
) {
    let Ok(primary) = primary.single() else {
        resize_events.clear();
        return;
    };
    let Some(resized) = resize_events
        .read()
        .filter(|event| event.window == primary)
        .last()
    else {
        return;
    };
    if resized.width <= 0.0 || resized.height <= 0.0 {
        return;
    }

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = resized.width / resized.height;
        }
    }
    debug!("Viewport resized to {}x{}", resized.width, resized.height);
}

/// Losing the window means losing the surface: release the cloud and fail.
pub fn handle_surface_lost(
    mut closed_events: EventReader<WindowClosed>,
    mut teardown: EventWriter<TeardownRequest>,
    mut next_state: ResMut<NextState<VisualiserState>>,
) {
    if closed_events.is_empty() {
        return;
    }
    closed_events.clear();
    warn!("Drawing surface closed");
    teardown.write(TeardownRequest);
    next_state.set(VisualiserState::Failed);
}
