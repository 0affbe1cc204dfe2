use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;

pub const CAMERA_FAR: f32 = 1000.0;

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Fraction of the remaining orbit distance covered per frame.
pub const ORBIT_DAMPING: f32 = 0.1;

/// Radians of rotation per pixel of pointer drag.
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;

/// Multiplicative distance change per scroll line.
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;

pub const ORBIT_MIN_DISTANCE: f32 = 0.5;

pub const ORBIT_MAX_DISTANCE: f32 = 200.0;

/// Pitch limit keeping the camera off the poles (radians).
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
