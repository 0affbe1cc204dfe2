use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::assets::point_cloud_model::PointCloudModel;
use crate::engine::core::settings::VisualiserSettings;
use crate::engine::render::highlight_material::{HighlightMaterial, HighlightUniform};
use crate::engine::scene::point_cloud_loader::LivePointCloud;

/// Shader time. Advances by a fixed step per tick, independent of frame rate.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    pub time: f32,
}

impl AnimationClock {
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

/// Ticks that pushed uniforms to a live point cloud.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderLoopStats {
    pub ticks: u64,
}

pub fn advance_animation_clock(
    live: Res<LivePointCloud>,
    settings: Res<VisualiserSettings>,
    mut clock: ResMut<AnimationClock>,
) {
    if live.is_live() {
        clock.time += settings.time_step;
    }
}

/// Copy the highlight state, clock and surface scale factor into the material uniforms.
pub fn sync_highlight_uniforms(
    live: Res<LivePointCloud>,
    model: Res<PointCloudModel>,
    clock: Res<AnimationClock>,
    settings: Res<VisualiserSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut materials: ResMut<Assets<HighlightMaterial>>,
    mut stats: ResMut<RenderLoopStats>,
) {
    let Some(handle) = live.material() else {
        return;
    };
    let Some(material) = materials.get_mut(handle) else {
        return;
    };

    let pixel_ratio = windows
        .single()
        .map(|window| window.scale_factor())
        .unwrap_or(1.0);
    material.params =
        HighlightUniform::from_state(&settings, &model.highlight, clock.time, pixel_ratio);
    stats.ticks += 1;
}
