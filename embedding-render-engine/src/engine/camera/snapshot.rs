use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy::window::PrimaryWindow;

use crate::engine::scene::scene_graph::VisualiserCamera;

/// Camera matrices captured once per tick, after orbit damping.
///
/// Picking and the uniform update read this instead of the live camera, so
/// both observe the same view within a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub clip_from_world: Mat4,
    pub world_from_clip: Mat4,
    pub eye: Vec3,
    /// Logical pixels.
    pub viewport_size: Vec2,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CameraSnapshot(pub Option<CameraView>);

impl CameraSnapshot {
    pub fn view(&self) -> Option<&CameraView> {
        self.0.as_ref()
    }
}

impl CameraView {
    /// `None` for an empty viewport or a singular projection.
    pub fn new(world_from_view: Mat4, clip_from_view: Mat4, viewport_size: Vec2) -> Option<Self> {
        if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
            return None;
        }
        let clip_from_world = clip_from_view * world_from_view.inverse();
        if clip_from_world.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }

        Some(Self {
            clip_from_world,
            world_from_clip: clip_from_world.inverse(),
            eye: world_from_view.w_axis.truncate(),
            viewport_size,
        })
    }

    /// Perspective view from `eye` toward `target`, using the same projection
    /// form as the render camera.
    pub fn perspective(
        eye: Vec3,
        target: Vec3,
        fov_y: f32,
        near: f32,
        viewport_size: Vec2,
    ) -> Option<Self> {
        let aspect = viewport_size.x / viewport_size.y.max(1.0);
        let world_from_view = Transform::from_translation(eye)
            .looking_at(target, Vec3::Y)
            .compute_matrix();
        let clip_from_view = Mat4::perspective_infinite_reverse_rh(fov_y, aspect, near);
        Self::new(world_from_view, clip_from_view, viewport_size)
    }

    /// Window cursor (logical pixels, origin top-left) to NDC.
    pub fn pointer_to_ndc(&self, cursor: Vec2) -> Vec2 {
        let unit = cursor / self.viewport_size;
        Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0)
    }

    /// NDC offset to logical pixels.
    pub fn ndc_to_pixels(&self, delta: Vec2) -> Vec2 {
        delta * self.viewport_size * 0.5
    }

    /// Ray from the eye through `ndc`.
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray3d> {
        // Reverse-z: depth 1 is the near plane.
        let on_near = self.world_from_clip.project_point3(ndc.extend(1.0));
        let direction = Dir3::new(on_near - self.eye).ok()?;
        Some(Ray3d::new(self.eye, direction))
    }
}

/// Record the camera after `step_orbit_camera` has moved it.
///
/// The projection is rebuilt from the `Projection` component at the primary
/// window's current size. `Camera::clip_from_view` only catches up in
/// `PostUpdate`, which would pair last frame's aspect with this frame's cursor.
pub fn capture_camera_snapshot(
    camera_query: Query<(&Projection, &Transform), With<VisualiserCamera>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut snapshot: ResMut<CameraSnapshot>,
) {
    let Ok((projection, transform)) = camera_query.single() else {
        return;
    };
    let next = windows.single().ok().and_then(|window| {
        let viewport = window.size();
        let mut projection = projection.clone();
        if let Projection::Perspective(perspective) = &mut projection {
            perspective.aspect_ratio = viewport.x / viewport.y.max(1.0);
        }
        CameraView::new(transform.compute_matrix(), projection.get_clip_from_view(), viewport)
    });
    if snapshot.0 != next {
        snapshot.0 = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::window::WindowResolution;

    fn front_view() -> CameraView {
        CameraView::perspective(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            75f32.to_radians(),
            0.1,
            Vec2::new(800.0, 600.0),
        )
        .unwrap()
    }

    #[test]
    fn pointer_maps_to_ndc_corners() {
        let view = front_view();
        assert_eq!(view.pointer_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(view.pointer_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(view.pointer_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let view = front_view();
        let ray = view.ray_through(Vec2::ZERO).unwrap();
        assert!((ray.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!(ray.direction.as_vec3().dot(Vec3::NEG_Z) > 0.9999);
    }

    #[test]
    fn snapshot_follows_the_window_before_the_camera_catches_up() {
        let mut app = App::new();
        app.init_resource::<CameraSnapshot>()
            .add_systems(Update, capture_camera_snapshot);
        let eye = Vec3::new(0.0, 0.0, 5.0);
        app.world_mut().spawn((
            Window {
                resolution: WindowResolution::new(1000.0, 500.0),
                ..default()
            },
            PrimaryWindow,
        ));
        app.world_mut().spawn((
            // Aspect still from the previous surface size.
            Projection::Perspective(PerspectiveProjection {
                fov: 75f32.to_radians(),
                near: 0.1,
                aspect_ratio: 1.0,
                ..default()
            }),
            Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
            VisualiserCamera,
        ));
        app.update();

        let captured = *app.world().resource::<CameraSnapshot>().view().unwrap();
        let expected = CameraView::perspective(
            eye,
            Vec3::ZERO,
            75f32.to_radians(),
            0.1,
            Vec2::new(1000.0, 500.0),
        )
        .unwrap();
        assert_eq!(captured.viewport_size, Vec2::new(1000.0, 500.0));
        assert!(captured.clip_from_world.abs_diff_eq(expected.clip_from_world, 1e-5));
    }

    #[test]
    fn empty_viewport_has_no_view() {
        let view = CameraView::perspective(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            1.0,
            0.1,
            Vec2::new(0.0, 600.0),
        );
        assert!(view.is_none());
    }
}
