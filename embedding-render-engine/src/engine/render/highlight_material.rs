use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};
use constants::render_settings::NO_POINT_INDEX;

use crate::engine::assets::point_cloud_model::HighlightState;
use crate::engine::core::settings::VisualiserSettings;

pub const HIGHLIGHT_SHADER_PATH: &str = "shaders/highlight_points.wgsl";

/// Uniform block read by `highlight_points.wgsl`. Field order matches the WGSL struct.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct HighlightUniform {
    pub highlight_colour: Vec4,
    /// Draw-order index of the selected point, or -1.
    pub selected_index: i32,
    /// Draw-order index of the hovered point, or -1.
    pub hovered_index: i32,
    pub time: f32,
    pub base_size: f32,
    pub highlight_size: f32,
    pub pulse_frequency: f32,
    pub pulse_amplitude: f32,
    /// Physical pixels per logical pixel of the drawing surface.
    pub pixel_ratio: f32,
}

impl HighlightUniform {
    /// Uniforms for a freshly loaded batch: nothing highlighted, clock at zero.
    pub fn reset(settings: &VisualiserSettings) -> Self {
        Self {
            highlight_colour: settings.highlight_colour(),
            selected_index: NO_POINT_INDEX,
            hovered_index: NO_POINT_INDEX,
            time: 0.0,
            base_size: settings.point_base_size,
            highlight_size: settings.point_highlight_size,
            pulse_frequency: settings.pulse_frequency,
            pulse_amplitude: settings.pulse_amplitude,
            pixel_ratio: 1.0,
        }
    }

    pub fn from_state(
        settings: &VisualiserSettings,
        highlight: &HighlightState,
        time: f32,
        pixel_ratio: f32,
    ) -> Self {
        Self {
            selected_index: highlight.selected_uniform(),
            hovered_index: highlight.hovered_uniform(),
            time,
            pixel_ratio,
            ..Self::reset(settings)
        }
    }
}

/// Point sprite material. All per-point visual state is derived on the GPU
/// from these uniforms and each vertex's point index.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct HighlightMaterial {
    #[uniform(0)]
    pub params: HighlightUniform,
}

impl Material for HighlightMaterial {
    fn vertex_shader() -> ShaderRef {
        HIGHLIGHT_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        HIGHLIGHT_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Quads are expanded in clip space; winding depends on corner order.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::render_settings::{SPRITE_FADE_START, SPRITE_RADIUS};

    const SHADER_SOURCE: &str = include_str!("../../../assets/shaders/highlight_points.wgsl");

    #[test]
    fn shader_matches_uniform_layout_and_sprite_constants() {
        let fields = [
            "highlight_colour: vec4<f32>",
            "selected_index: i32",
            "hovered_index: i32",
            "time: f32",
            "base_size: f32",
            "highlight_size: f32",
            "pulse_frequency: f32",
            "pulse_amplitude: f32",
            "pixel_ratio: f32",
        ];
        let mut cursor = 0;
        for field in fields {
            let found = SHADER_SOURCE[cursor..]
                .find(field)
                .unwrap_or_else(|| panic!("{field} missing or out of order"));
            cursor += found + field.len();
        }

        assert!(SHADER_SOURCE.contains(&format!("const SPRITE_RADIUS: f32 = {SPRITE_RADIUS:?};")));
        assert!(
            SHADER_SOURCE.contains(&format!("const SPRITE_FADE_START: f32 = {SPRITE_FADE_START:?};"))
        );
    }

    #[test]
    fn reset_clears_indices_and_time() {
        let uniform = HighlightUniform::reset(&VisualiserSettings::default());
        assert_eq!(uniform.selected_index, NO_POINT_INDEX);
        assert_eq!(uniform.hovered_index, NO_POINT_INDEX);
        assert_eq!(uniform.time, 0.0);
    }

    #[test]
    fn packs_highlight_state() {
        let settings = VisualiserSettings::default();
        let state = HighlightState {
            selected: Some(3),
            hovered: Some(4),
        };
        let uniform = HighlightUniform::from_state(&settings, &state, 1.25, 2.0);
        assert_eq!(uniform.selected_index, 3);
        assert_eq!(uniform.hovered_index, 4);
        assert_eq!(uniform.time, 1.25);
        assert_eq!(uniform.base_size, settings.point_base_size);
        assert_eq!(uniform.highlight_colour, Vec4::new(1.0, 1.0, 0.0, 1.0));
        assert_eq!(uniform.pixel_ratio, 2.0);
    }

    #[test]
    fn sprite_size_is_scaled_to_physical_pixels() {
        assert!(SHADER_SOURCE.contains("* highlight.pixel_ratio / view.viewport.zw"));
    }

    #[test]
    fn output_colour_is_encoded_for_the_srgb_target() {
        assert!(SHADER_SOURCE.contains("fn srgb_to_linear("));
        assert!(SHADER_SOURCE.contains("vec4<f32>(srgb_to_linear(colour),"));
    }
}
