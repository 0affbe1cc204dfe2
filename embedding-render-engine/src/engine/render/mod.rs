//! Point cloud shading and the per-frame render loop.

/// Highlight material: uniforms and pipeline specialisation for the point sprites.
pub mod highlight_material;

/// Animation clock, uniform upload and frame accounting.
pub mod render_loop;
