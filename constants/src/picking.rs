/// Maximum pointer-to-point distance, in logical pixels, that still counts as a hit.
pub const HIT_TOLERANCE_PX: f32 = 6.0;
