mod common;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use common::*;

use embedding_render_engine::VisualiserError;
use embedding_render_engine::engine::assets::point_cloud_model::{HighlightState, PointCloudModel};
use embedding_render_engine::engine::core::app_state::VisualiserState;
use embedding_render_engine::engine::render::highlight_material::HighlightMaterial;
use embedding_render_engine::engine::render::render_loop::{AnimationClock, RenderLoopStats};
use embedding_render_engine::engine::scene::point_cloud_loader::{
    BatchSummary, LivePointCloud, TeardownRequest,
};

fn state(app: &App) -> VisualiserState {
    *app.world().resource::<State<VisualiserState>>().get()
}

#[test]
fn load_spawns_one_point_cloud_and_runs() {
    let mut app = headless_app();
    assert_eq!(state(&app), VisualiserState::Idle);

    load_and_settle(&mut app, spread_batch());

    assert_eq!(state(&app), VisualiserState::Running);
    assert_eq!(point_cloud_entities(&mut app).len(), 1);
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
    assert_eq!(app.world().resource::<Assets<HighlightMaterial>>().len(), 1);

    let model = app.world().resource::<PointCloudModel>();
    assert_eq!(model.len(), 5);
    assert_eq!(model.dimensions(), 4);
    assert_eq!(model.label(2), Some("gamma"));

    let outcomes = outcomes(&app);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].result,
        Ok(BatchSummary {
            count: 5,
            dimensions: 4
        })
    );
}

#[test]
fn reload_resets_highlight_and_replaces_resources() {
    let mut app = headless_app();
    load_and_settle(&mut app, spread_batch());

    app.world_mut().resource_mut::<PointCloudModel>().highlight = HighlightState {
        selected: Some(1),
        hovered: Some(3),
    };
    app.update();
    let uniform = live_uniform(&app).unwrap();
    assert_eq!(uniform.selected_index, 1);
    assert_eq!(uniform.hovered_index, 3);

    let old = app
        .world()
        .resource::<LivePointCloud>()
        .resources()
        .cloned()
        .unwrap();

    send_load(&mut app, cat_dog_car());
    app.update();

    let model = app.world().resource::<PointCloudModel>();
    assert_eq!(model.highlight, HighlightState::default());
    assert_eq!(model.len(), 3);

    let new = app
        .world()
        .resource::<LivePointCloud>()
        .resources()
        .cloned()
        .unwrap();
    assert_ne!(new.entity, old.entity);
    assert!(app.world().get_entity(old.entity).is_err());
    assert!(app.world().resource::<Assets<Mesh>>().get(&old.mesh).is_none());
    assert!(
        app.world()
            .resource::<Assets<HighlightMaterial>>()
            .get(&old.material)
            .is_none()
    );
    assert_eq!(point_cloud_entities(&mut app), vec![new.entity]);

    // The first frame of the new batch already carries reset uniforms.
    let uniform = live_uniform(&app).unwrap();
    assert_eq!(uniform.selected_index, -1);
    assert_eq!(uniform.hovered_index, -1);
}

#[test]
fn rejected_batches_touch_nothing() {
    let mut app = headless_app();

    send_load(&mut app, (labels(&["only"]), vec![vec![1.0, 2.0]]));
    app.update();
    send_load(
        &mut app,
        (labels(&["a", "b"]), vec![vec![0.5, 0.5, 0.5], vec![0.5, 0.5, 0.5]]),
    );
    app.update();
    send_load(
        &mut app,
        (labels(&["a", "b"]), vec![vec![0.5, 0.5, 0.5], vec![0.5, 0.5]]),
    );
    app.update();

    assert_eq!(state(&app), VisualiserState::Idle);
    assert!(point_cloud_entities(&mut app).is_empty());
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    assert!(!app.world().resource::<LivePointCloud>().is_live());

    let errors: Vec<_> = outcomes(&app)
        .into_iter()
        .filter_map(|outcome| outcome.result.err())
        .collect();
    // Only the two most recent frames of events are retained.
    assert!(errors.contains(&VisualiserError::DegenerateRange { value: 0.0 }));
    assert!(errors.contains(&VisualiserError::DimensionMismatch {
        index: 1,
        expected: 3,
        found: 2
    }));
}

#[test]
fn single_vector_reports_insufficient_data() {
    let mut app = headless_app();
    send_load(&mut app, (labels(&["only"]), vec![vec![1.0, 2.0]]));
    app.update();

    let outcomes = outcomes(&app);
    assert_eq!(
        outcomes[0].result,
        Err(VisualiserError::InsufficientData { count: 1 })
    );
}

#[test]
fn failed_reload_keeps_the_previous_batch() {
    let mut app = headless_app();
    load_and_settle(&mut app, spread_batch());
    let before = app.world().resource::<LivePointCloud>().entity();

    send_load(&mut app, (labels(&["x"]), vec![vec![1.0]]));
    app.update();

    assert_eq!(state(&app), VisualiserState::Running);
    assert_eq!(app.world().resource::<LivePointCloud>().entity(), before);
    assert_eq!(app.world().resource::<PointCloudModel>().len(), 5);
}

#[test]
fn teardown_stops_the_render_loop_and_pointer_handling() {
    let mut app = headless_app();
    load_and_settle(&mut app, spread_batch());
    for _ in 0..3 {
        app.update();
    }
    assert!(app.world().resource::<RenderLoopStats>().ticks >= 3);
    assert!(app.world().resource::<AnimationClock>().time > 0.0);

    app.world_mut().send_event(TeardownRequest);
    app.update();
    app.update();

    assert_eq!(state(&app), VisualiserState::Idle);
    assert!(point_cloud_entities(&mut app).is_empty());
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    assert_eq!(app.world().resource::<Assets<HighlightMaterial>>().len(), 0);
    assert_eq!(app.world().resource::<AnimationClock>().time, 0.0);

    let ticks = app.world().resource::<RenderLoopStats>().ticks;
    let view = front_view();
    install_view(&mut app, view);
    move_cursor(&mut app, VIEWPORT * 0.5);
    for _ in 0..5 {
        app.update();
    }

    assert_eq!(app.world().resource::<RenderLoopStats>().ticks, ticks);
    assert_eq!(app.world().resource::<AnimationClock>().time, 0.0);
    assert_eq!(
        app.world().resource::<PointCloudModel>().highlight,
        HighlightState::default()
    );
}

#[test]
fn clock_advances_by_the_fixed_step() {
    let mut app = headless_app();
    load_and_settle(&mut app, spread_batch());
    let start = app.world().resource::<AnimationClock>().time;
    for _ in 0..10 {
        app.update();
    }
    let elapsed = app.world().resource::<AnimationClock>().time - start;
    assert!((elapsed - 0.16).abs() < 1e-4);

    let uniform = live_uniform(&app).unwrap();
    assert_eq!(uniform.time, app.world().resource::<AnimationClock>().time);
}

#[test]
fn uniforms_carry_the_window_scale_factor() {
    let mut app = headless_app();
    app.world_mut().spawn((
        Window {
            resolution: WindowResolution::new(VIEWPORT.x, VIEWPORT.y)
                .with_scale_factor_override(2.0),
            ..default()
        },
        PrimaryWindow,
    ));
    load_and_settle(&mut app, spread_batch());
    app.update();

    assert_eq!(live_uniform(&app).unwrap().pixel_ratio, 2.0);
}
