use bevy::prelude::*;

use crate::engine::camera::snapshot::CameraView;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub index: usize,
    /// Screen distance between the pointer and the projected point, logical pixels.
    pub distance_px: f32,
    /// Distance along the pick ray.
    pub depth: f32,
}

/// Point under the pointer: of every point drawn within `tolerance_px` of it,
/// the one nearest along the pick ray, then the lower index.
///
/// A point in front therefore wins over one behind it even when the rear
/// point sits closer to the cursor on screen. Points at or behind the eye are
/// never hit.
pub fn pick_point(
    pointer_ndc: Vec2,
    view: &CameraView,
    positions: &[Vec3],
    tolerance_px: f32,
) -> Option<PickHit> {
    let ray = view.ray_through(pointer_ndc)?;
    let mut best: Option<PickHit> = None;

    for (index, &position) in positions.iter().enumerate() {
        let depth = (position - ray.origin).dot(ray.direction.as_vec3());
        if depth <= 0.0 {
            continue;
        }
        let clip = view.clip_from_world * position.extend(1.0);
        if clip.w <= f32::EPSILON {
            continue;
        }

        let ndc = clip.truncate().truncate() / clip.w;
        let distance_px = view.ndc_to_pixels(ndc - pointer_ndc).length();
        if distance_px > tolerance_px {
            continue;
        }

        let candidate = PickHit { index, distance_px, depth };
        best = match best {
            Some(current) if !beats(&candidate, &current) => Some(current),
            _ => Some(candidate),
        };
    }

    best
}

// Later indices only win on strictly smaller depth.
fn beats(candidate: &PickHit, current: &PickHit) -> bool {
    candidate.depth < current.depth
}

/// Pick under a window cursor position (logical pixels).
pub fn pick_at_cursor(
    cursor: Vec2,
    view: &CameraView,
    positions: &[Vec3],
    tolerance_px: f32,
) -> Option<usize> {
    pick_point(view.pointer_to_ndc(cursor), view, positions, tolerance_px).map(|hit| hit.index)
}
