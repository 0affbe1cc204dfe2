use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::batch_manifest::BatchManifest;
use crate::engine::core::settings::{SettingsLoader, VisualiserSettings};
use crate::engine::scene::point_cloud_loader::{BatchOrigin, LoadBatchRequest};

#[derive(Resource, Default)]
pub struct DemoBatchLoader {
    handle: Option<Handle<BatchManifest>>,
    started: bool,
    submitted: bool,
}

/// Begin loading once settings have resolved and name a batch file.
pub fn start_demo_batch_load(
    mut loader: ResMut<DemoBatchLoader>,
    settings_loader: Res<SettingsLoader>,
    settings: Res<VisualiserSettings>,
    asset_server: Res<AssetServer>,
) {
    if loader.started || !settings_loader.is_resolved() {
        return;
    }
    loader.started = true;

    let Some(path) = settings.demo_batch.as_deref() else {
        info!("No demo batch configured, waiting for a batch");
        return;
    };
    info!("Loading demo batch from: {}", path);
    loader.handle = Some(asset_server.load(path.to_owned()));
}

pub fn submit_demo_batch_when_loaded(
    mut loader: ResMut<DemoBatchLoader>,
    asset_server: Res<AssetServer>,
    mut manifests: ResMut<Assets<BatchManifest>>,
    mut requests: EventWriter<LoadBatchRequest>,
) {
    if loader.submitted {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(manifest) = manifests.remove(&handle) {
        let (labels, vectors) = manifest.into_columns();
        requests.write(LoadBatchRequest {
            labels,
            vectors,
            origin: BatchOrigin::Demo,
        });
        loader.submitted = true;
    } else if matches!(
        asset_server.get_load_state(&handle),
        Some(LoadState::Failed(_))
    ) {
        warn!("Demo batch could not be read");
        loader.submitted = true;
    }
}
