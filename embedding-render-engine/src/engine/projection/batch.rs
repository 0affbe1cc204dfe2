use bevy::log::info;
use bevy::math::Vec3;

use super::{normalise, project};
use crate::error::{Result, VisualiserError};

/// Validated, index-aligned labels and embedding vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingBatch {
    labels: Vec<String>,
    vectors: Vec<Vec<f64>>,
    dimensions: usize,
}

impl EmbeddingBatch {
    /// Validates shape before anything downstream sees the data.
    ///
    /// Checks run in order: label/vector count, minimum batch size,
    /// consistent dimensionality, finite components.
    pub fn new(labels: Vec<String>, vectors: Vec<Vec<f64>>) -> Result<Self> {
        if labels.len() != vectors.len() {
            return Err(VisualiserError::LabelMismatch {
                labels: labels.len(),
                vectors: vectors.len(),
            });
        }

        if vectors.len() < 2 {
            return Err(VisualiserError::InsufficientData {
                count: vectors.len(),
            });
        }

        let dimensions = vectors[0].len();
        if let Some((index, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != dimensions)
        {
            return Err(VisualiserError::DimensionMismatch {
                index,
                expected: dimensions,
                found: vector.len(),
            });
        }

        if let Some(index) = vectors
            .iter()
            .position(|v| v.iter().any(|c| !c.is_finite()))
        {
            return Err(VisualiserError::NonFiniteInput { index });
        }

        Ok(Self {
            labels,
            vectors,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

/// Geometry ready for upload: one normalised position per label, same order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBatch {
    pub labels: Vec<String>,
    pub positions: Vec<Vec3>,
    pub dimensions: usize,
}

impl PreparedBatch {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Validate, project and normalise a batch in one step.
pub fn prepare_batch(labels: Vec<String>, vectors: Vec<Vec<f64>>) -> Result<PreparedBatch> {
    let batch = EmbeddingBatch::new(labels, vectors)?;
    let dimensions = batch.dimensions();

    let projected = project(&batch)?;
    let (positions, transform) = normalise(&projected)?;

    info!(
        "Projected {} vectors of {} dimensions (range {:.4} .. {:.4})",
        batch.len(),
        dimensions,
        transform.min,
        transform.max
    );

    Ok(PreparedBatch {
        labels: batch.into_labels(),
        positions,
        dimensions,
    })
}
