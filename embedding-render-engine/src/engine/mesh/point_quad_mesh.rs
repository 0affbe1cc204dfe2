use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::VERTICES_PER_POINT;

#[derive(Component)]
pub struct PointCloud;

/// Create the point cloud mesh for GPU-side quad expansion.
///
/// Every point contributes `VERTICES_PER_POINT` vertices (two triangles).
/// All six share the point's normalised position; `UV_0` carries
/// `[point_index, corner]` so the shader knows which point it is drawing
/// independently of where the mesh lands in the vertex slab.
pub fn create_point_quad_mesh(positions: &[Vec3]) -> Mesh {
    let vertex_count = positions.len() * VERTICES_PER_POINT;
    let mut vertices: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut identities: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

    for (index, position) in positions.iter().enumerate() {
        for corner in 0..VERTICES_PER_POINT {
            vertices.push(position.to_array());
            identities.push([index as f32, corner as f32]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, identities);
    mesh
}
