#![allow(dead_code)]

use bevy::input::ButtonState;
use bevy::input::InputPlugin;
use bevy::input::mouse::MouseButtonInput;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::{ExitCondition, PrimaryWindow};

use embedding_render_engine::VisualiserCorePlugin;
use embedding_render_engine::engine::camera::snapshot::{CameraSnapshot, CameraView};
use embedding_render_engine::engine::mesh::point_quad_mesh::PointCloud;
use embedding_render_engine::engine::render::highlight_material::{
    HighlightMaterial, HighlightUniform,
};
use embedding_render_engine::engine::scene::point_cloud_loader::{
    BatchLoadOutcome, LivePointCloud, LoadBatchRequest,
};

pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

/// Core plugin on a windowless app.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin::default(),
        StatesPlugin,
        InputPlugin,
        WindowPlugin {
            primary_window: None,
            exit_condition: ExitCondition::DontExit,
            close_when_requested: false,
        },
    ))
    .init_asset::<Mesh>()
    .init_asset::<HighlightMaterial>()
    .add_plugins(VisualiserCorePlugin);
    app.update();
    app
}

pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Five well-spread 4-D vectors.
pub fn spread_batch() -> (Vec<String>, Vec<Vec<f64>>) {
    (
        labels(&["alpha", "beta", "gamma", "delta", "epsilon"]),
        vec![
            vec![1.0, 0.0, 0.0, 0.2],
            vec![0.0, 1.0, 0.0, -0.4],
            vec![0.0, 0.0, 1.0, 0.6],
            vec![-1.0, 0.5, 0.3, 0.0],
            vec![0.2, -0.8, -0.5, 1.0],
        ],
    )
}

pub fn cat_dog_car() -> (Vec<String>, Vec<Vec<f64>>) {
    (
        labels(&["cat", "dog", "car"]),
        vec![
            vec![0.90, 0.10, 0.00, 0.20],
            vec![0.88, 0.12, 0.01, 0.21],
            vec![0.00, 0.90, 0.80, 0.10],
        ],
    )
}

pub fn send_load(app: &mut App, batch: (Vec<String>, Vec<Vec<f64>>)) {
    let (labels, vectors) = batch;
    app.world_mut()
        .send_event(LoadBatchRequest::direct(labels, vectors));
}

/// Load and run until the state transition into `Running` has been applied.
pub fn load_and_settle(app: &mut App, batch: (Vec<String>, Vec<Vec<f64>>)) {
    send_load(app, batch);
    app.update();
    app.update();
}

pub fn outcomes(app: &App) -> Vec<BatchLoadOutcome> {
    let events = app.world().resource::<Events<BatchLoadOutcome>>();
    events.get_cursor().read(events).cloned().collect()
}

pub fn point_cloud_entities(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<PointCloud>>()
        .iter(app.world())
        .collect()
}

pub fn live_uniform(app: &App) -> Option<HighlightUniform> {
    let handle = app.world().resource::<LivePointCloud>().material()?.clone();
    app.world()
        .resource::<Assets<HighlightMaterial>>()
        .get(&handle)
        .map(|material| material.params)
}

pub fn front_view() -> CameraView {
    CameraView::perspective(
        Vec3::new(5.0, 5.0, 5.0),
        Vec3::ZERO,
        75f32.to_radians(),
        0.1,
        VIEWPORT,
    )
    .unwrap()
}

pub fn install_view(app: &mut App, view: CameraView) {
    app.world_mut().resource_mut::<CameraSnapshot>().0 = Some(view);
}

/// Window cursor position (logical pixels) at which `position` is drawn.
pub fn cursor_over(view: &CameraView, position: Vec3) -> Vec2 {
    let clip = view.clip_from_world * position.extend(1.0);
    let ndc = clip.truncate().truncate() / clip.w;
    Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5) * view.viewport_size
}

pub fn move_cursor(app: &mut App, position: Vec2) {
    app.world_mut().send_event(CursorMoved {
        window: Entity::PLACEHOLDER,
        position,
        delta: None,
    });
    app.update();
}

/// Click with the primary window's cursor at `position`.
pub fn click_at(app: &mut App, position: Vec2) {
    let world = app.world_mut();
    let existing = world
        .query_filtered::<Entity, With<PrimaryWindow>>()
        .iter(world)
        .next();
    let window = match existing {
        Some(entity) => entity,
        None => world.spawn((Window::default(), PrimaryWindow)).id(),
    };
    if let Some(mut component) = world.get_mut::<Window>(window) {
        component.set_physical_cursor_position(Some(DVec2::new(
            position.x as f64,
            position.y as f64,
        )));
    }

    world.send_event(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
        window,
    });
    app.update();
    app.world_mut().send_event(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Released,
        window,
    });
    app.update();
}
