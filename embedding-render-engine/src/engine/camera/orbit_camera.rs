use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    CAMERA_START_POSITION, CAMERA_TARGET, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
    ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

use crate::engine::core::settings::VisualiserSettings;
use crate::engine::scene::scene_graph::VisualiserCamera;

/// Spherical camera state around `target`.
///
/// Input moves the goal angles/distance; `step` eases the current values
/// toward the goal by `damping` once per frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(CAMERA_START_POSITION, CAMERA_TARGET)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(ORBIT_MIN_DISTANCE);
        let pitch = (offset.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        let yaw = offset.x.atan2(offset.z);

        Self {
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }

    pub fn configure(&mut self, settings: &VisualiserSettings) {
        self.damping = settings.orbit_damping.clamp(0.0, 1.0);
        self.rotate_speed = settings.orbit_rotate_speed;
        self.zoom_speed = settings.orbit_zoom_speed;
        self.min_distance = settings.orbit_min_distance;
        self.max_distance = settings.orbit_max_distance.max(settings.orbit_min_distance);
        self.goal_distance = self.goal_distance.clamp(self.min_distance, self.max_distance);
    }

    /// Drag in logical pixels. Dragging right swings the camera left around the
    /// target; dragging down raises it.
    pub fn rotate(&mut self, drag: Vec2) {
        self.goal_yaw -= drag.x * self.rotate_speed;
        self.goal_pitch = (self.goal_pitch + drag.y * self.rotate_speed)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Positive `lines` zooms in.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance = (self.goal_distance * (-lines * self.zoom_speed).exp())
            .clamp(self.min_distance, self.max_distance);
    }

    /// Ease toward the goal. Returns `true` while still moving.
    pub fn step(&mut self) -> bool {
        let before = (self.yaw, self.pitch, self.distance);
        self.yaw += (self.goal_yaw - self.yaw) * self.damping;
        self.pitch += (self.goal_pitch - self.pitch) * self.damping;
        self.distance += (self.goal_distance - self.distance) * self.damping;
        before != (self.yaw, self.pitch, self.distance)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

/// Accumulate drag (left button held) and wheel input into the orbit goal.
pub fn orbit_camera_input(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }
}

/// Apply one damping step and move the camera entity.
pub fn step_orbit_camera(
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<VisualiserCamera>>,
) {
    orbit.step();
    let transform = orbit.transform();
    for mut camera_transform in &mut camera_query {
        *camera_transform = transform;
    }
}
