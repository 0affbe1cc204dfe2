use bevy::prelude::*;
use constants::render_settings::NO_POINT_INDEX;

use crate::engine::projection::PreparedBatch;

/// Selected and hovered point indices for the current batch.
///
/// `None` is the "no point" state; it becomes `-1` when packed into a uniform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
}

impl HighlightState {
    pub fn selected_uniform(&self) -> i32 {
        index_to_uniform(self.selected)
    }

    pub fn hovered_uniform(&self) -> i32 {
        index_to_uniform(self.hovered)
    }

    /// Index shown to the user: hover wins over selection.
    pub fn displayed(&self) -> Option<usize> {
        self.hovered.or(self.selected)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn index_to_uniform(index: Option<usize>) -> i32 {
    index
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(NO_POINT_INDEX)
}

/// Positions and labels of the loaded batch plus its highlight state.
///
/// Geometry is written once per batch by `replace`; only `highlight` changes
/// between loads.
#[derive(Resource, Debug, Default)]
pub struct PointCloudModel {
    labels: Vec<String>,
    positions: Vec<Vec3>,
    dimensions: usize,
    generation: u64,
    pub highlight: HighlightState,
}

impl PointCloudModel {
    /// Swap in a freshly prepared batch and reset the highlight state.
    pub fn replace(&mut self, batch: PreparedBatch) {
        self.labels = batch.labels;
        self.positions = batch.positions;
        self.dimensions = batch.dimensions;
        self.generation += 1;
        self.highlight.clear();
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.positions.clear();
        self.dimensions = 0;
        self.generation += 1;
        self.highlight.clear();
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Incremented on every replace or clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn displayed_label(&self) -> Option<&str> {
        self.highlight.displayed().and_then(|i| self.label(i))
    }
}
