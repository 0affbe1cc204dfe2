/// Diameter of an unhighlighted point sprite in logical pixels. The shader
/// scales it by the window's scale factor.
pub const POINT_BASE_SIZE: f32 = 8.0;

/// Extra diameter added to a highlighted point before the pulse is applied.
pub const POINT_HIGHLIGHT_SIZE: f32 = 4.0;

/// Angular frequency of the highlight pulse (radians per animation second).
pub const PULSE_FREQUENCY: f32 = 5.0;

/// Relative size oscillation of a highlighted point.
pub const PULSE_AMPLITUDE: f32 = 0.2;

/// Colour highlighted points oscillate toward (sRGB display values, RGBA).
pub const HIGHLIGHT_COLOUR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Nominal per-frame increment of the animation clock (~60 FPS).
pub const TIME_STEP: f32 = 0.016;

/// Sprite radius (in unit quad space) past which fragments are discarded.
pub const SPRITE_RADIUS: f32 = 0.5;

/// Sprite radius at which the anti-aliased alpha fade begins.
pub const SPRITE_FADE_START: f32 = 0.3;

/// Vertices emitted per point: two triangles forming a screen-aligned quad.
pub const VERTICES_PER_POINT: usize = 6;

/// Uniform sentinel for "no point".
pub const NO_POINT_INDEX: i32 = -1;
