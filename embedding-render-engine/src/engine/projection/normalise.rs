use bevy::math::Vec3;

use super::pca::ProjectedPoint;
use crate::error::{Result, VisualiserError};

/// Affine map from projected space into the [-1, 1] cube.
///
/// `min` and `max` are taken over every coordinate of every point, so x, y
/// and z share one scale and the relative shape of the cloud is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalisationTransform {
    pub min: f64,
    pub max: f64,
    /// `2 / (max - min)`.
    pub scale: f64,
}

impl NormalisationTransform {
    pub fn from_points(points: &[ProjectedPoint]) -> Result<Self> {
        let (min, max) = points
            .iter()
            .flat_map(|p| p.to_array())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        let range = max - min;
        if !(range > 0.0 && range.is_finite()) {
            return Err(VisualiserError::DegenerateRange {
                value: if min.is_finite() { min } else { 0.0 },
            });
        }

        Ok(Self {
            min,
            max,
            scale: 2.0 / range,
        })
    }

    /// `(v - min) * scale - 1`, evaluated as a ratio of the range so the extremes
    /// land on exactly -1 and +1.
    pub fn apply_scalar(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * 2.0 - 1.0
    }

    pub fn apply(&self, point: ProjectedPoint) -> Vec3 {
        Vec3::new(
            self.apply_scalar(point.x) as f32,
            self.apply_scalar(point.y) as f32,
            self.apply_scalar(point.z) as f32,
        )
    }
}

/// Normalise projected points into the visual cube.
///
/// Fails with `DegenerateRange` when every coordinate has the same value,
/// rather than emitting NaN or infinite positions.
pub fn normalise(points: &[ProjectedPoint]) -> Result<(Vec<Vec3>, NormalisationTransform)> {
    let transform = NormalisationTransform::from_points(points)?;
    let normalised = points.iter().map(|p| transform.apply(*p)).collect();
    Ok((normalised, transform))
}
