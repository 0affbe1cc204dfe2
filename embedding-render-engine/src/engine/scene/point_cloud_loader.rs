use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use serde_json::Value;

use crate::engine::assets::point_cloud_model::PointCloudModel;
use crate::engine::core::app_state::VisualiserState;
use crate::engine::core::settings::VisualiserSettings;
use crate::engine::mesh::point_quad_mesh::{PointCloud, create_point_quad_mesh};
use crate::engine::projection::{PreparedBatch, prepare_batch};
use crate::engine::render::highlight_material::{HighlightMaterial, HighlightUniform};
use crate::engine::render::render_loop::AnimationClock;
use crate::error::{Result, VisualiserError};
use crate::tools::point_selection::DisplayedLabelChanged;

/// Who asked for a batch, so the outcome can be routed back.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOrigin {
    Rpc { id: Option<Value> },
    Demo,
    Direct,
}

/// Replace whatever is on screen with this batch.
#[derive(Event, Debug, Clone)]
pub struct LoadBatchRequest {
    pub labels: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
    pub origin: BatchOrigin,
}

impl LoadBatchRequest {
    pub fn direct(labels: Vec<String>, vectors: Vec<Vec<f64>>) -> Self {
        Self {
            labels,
            vectors,
            origin: BatchOrigin::Direct,
        }
    }
}

/// Stop drawing and release the point cloud's GPU resources.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TeardownRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub count: usize,
    pub dimensions: usize,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct BatchLoadOutcome {
    pub origin: BatchOrigin,
    pub result: Result<BatchSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudResources {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<HighlightMaterial>,
}

/// The one point cloud currently drawn, if any.
#[derive(Resource, Debug, Default)]
pub struct LivePointCloud {
    live: Option<PointCloudResources>,
}

impl LivePointCloud {
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn resources(&self) -> Option<&PointCloudResources> {
        self.live.as_ref()
    }

    pub fn entity(&self) -> Option<Entity> {
        self.live.as_ref().map(|live| live.entity)
    }

    pub fn mesh(&self) -> Option<&Handle<Mesh>> {
        self.live.as_ref().map(|live| &live.mesh)
    }

    pub fn material(&self) -> Option<&Handle<HighlightMaterial>> {
        self.live.as_ref().map(|live| &live.material)
    }
}

/// Project and normalise each requested batch, then swap it in.
///
/// Nothing on screen changes until projection has succeeded, so a rejected
/// batch leaves the previous one intact.
pub fn handle_load_batch_requests(
    mut requests: EventReader<LoadBatchRequest>,
    mut outcomes: EventWriter<BatchLoadOutcome>,
    mut label_events: EventWriter<DisplayedLabelChanged>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<HighlightMaterial>>,
    mut live: ResMut<LivePointCloud>,
    mut model: ResMut<PointCloudModel>,
    mut clock: ResMut<AnimationClock>,
    settings: Res<VisualiserSettings>,
    state: Res<State<VisualiserState>>,
    mut next_state: ResMut<NextState<VisualiserState>>,
) {
    for request in requests.read() {
        let result = if *state.get() == VisualiserState::Failed {
            Err(VisualiserError::ResourceInit(
                "drawing surface unavailable".to_string(),
            ))
        } else {
            prepare_batch(request.labels.clone(), request.vectors.clone())
        };

        let result = result.map(|prepared| {
            let had_label = model.highlight.displayed().is_some();
            release_point_cloud(&mut commands, &mut meshes, &mut materials, &mut live);
            let summary = BatchSummary {
                count: prepared.len(),
                dimensions: prepared.dimensions,
            };
            live.live = Some(spawn_point_cloud(
                &mut commands,
                &mut meshes,
                &mut materials,
                &settings,
                &prepared,
            ));
            model.replace(prepared);
            clock.reset();
            next_state.set(VisualiserState::Running);
            if had_label {
                label_events.write(DisplayedLabelChanged {
                    index: None,
                    label: None,
                });
            }
            summary
        });

        match &result {
            Ok(summary) => info!(
                "Point cloud ready: {} points from {} dimensions ({:?})",
                summary.count, summary.dimensions, request.origin
            ),
            Err(err) => warn!("Batch rejected ({:?}): {}", request.origin, err),
        }

        outcomes.write(BatchLoadOutcome {
            origin: request.origin.clone(),
            result,
        });
    }
}

pub fn handle_teardown_requests(
    mut requests: EventReader<TeardownRequest>,
    mut label_events: EventWriter<DisplayedLabelChanged>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<HighlightMaterial>>,
    mut live: ResMut<LivePointCloud>,
    mut model: ResMut<PointCloudModel>,
    mut clock: ResMut<AnimationClock>,
    state: Res<State<VisualiserState>>,
    mut next_state: ResMut<NextState<VisualiserState>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let had_label = model.highlight.displayed().is_some();
    release_point_cloud(&mut commands, &mut meshes, &mut materials, &mut live);
    model.clear();
    clock.reset();
    if *state.get() != VisualiserState::Failed {
        next_state.set(VisualiserState::Idle);
    }
    if had_label {
        label_events.write(DisplayedLabelChanged {
            index: None,
            label: None,
        });
    }
    info!("Point cloud torn down");
}

/// Despawn the live entity and drop its mesh and material. No-op when nothing is live.
pub fn release_point_cloud(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<HighlightMaterial>,
    live: &mut LivePointCloud,
) {
    let Some(resources) = live.live.take() else {
        return;
    };
    commands.entity(resources.entity).despawn();
    meshes.remove(&resources.mesh);
    materials.remove(&resources.material);
}

fn spawn_point_cloud(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<HighlightMaterial>,
    settings: &VisualiserSettings,
    prepared: &PreparedBatch,
) -> PointCloudResources {
    let mesh = meshes.add(create_point_quad_mesh(&prepared.positions));
    let material = materials.add(HighlightMaterial {
        params: HighlightUniform::reset(settings),
    });

    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::IDENTITY,
            Visibility::Visible,
            PointCloud,
            // Sprites extend past the positions' bounds.
            NoFrustumCulling,
            NotShadowCaster,
        ))
        .id();

    PointCloudResources {
        entity,
        mesh,
        material,
    }
}
