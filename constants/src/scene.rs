/// Length of each axis gizmo line.
pub const AXIS_LENGTH: f32 = 5.0;

/// Distance from the origin at which axis labels are placed.
pub const AXIS_LABEL_OFFSET: f32 = 5.2;

pub const AXIS_LABEL_FONT_SIZE: f32 = 20.0;

pub const BACKGROUND_COLOUR: [f32; 3] = [0.941, 0.941, 0.941];

pub const AMBIENT_BRIGHTNESS: f32 = 500.0;

pub const DIRECTIONAL_ILLUMINANCE: f32 = 5000.0;

pub const DIRECTIONAL_LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 1.0];
