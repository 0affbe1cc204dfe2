use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::scene::{AXIS_LABEL_FONT_SIZE, AXIS_LABEL_OFFSET, AXIS_LENGTH};

use crate::engine::scene::scene_graph::VisualiserCamera;

#[derive(Component)]
pub struct AxisGizmo;

/// Screen-space label pinned to a world-space anchor.
#[derive(Component, Debug, Clone, Copy)]
pub struct AxisLabel {
    pub anchor: Vec3,
}

const AXES: [(&str, Vec3, [f32; 4]); 3] = [
    ("X", Vec3::X, [1.0, 0.0, 0.0, 1.0]),
    ("Y", Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
    ("Z", Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
];

/// Three coloured line segments from the origin.
pub fn create_axes_mesh(length: f32) -> Mesh {
    let mut positions = Vec::with_capacity(AXES.len() * 2);
    let mut colours = Vec::with_capacity(AXES.len() * 2);
    for (_, direction, colour) in AXES {
        positions.push([0.0, 0.0, 0.0]);
        positions.push((direction * length).to_array());
        colours.push(colour);
        colours.push(colour);
    }

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colours)
}

pub fn spawn_axes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(create_axes_mesh(AXIS_LENGTH))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        AxisGizmo,
    ));

    for (name, direction, [r, g, b, a]) in AXES {
        commands.spawn((
            Text::new(name),
            TextFont {
                font_size: AXIS_LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::srgba(r, g, b, a)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            AxisLabel {
                anchor: direction * AXIS_LABEL_OFFSET,
            },
        ));
    }
}

/// Reproject the axis labels every frame; hide those off screen.
pub fn update_axis_labels(
    camera_query: Query<(&Camera, &GlobalTransform), With<VisualiserCamera>>,
    mut labels: Query<(&AxisLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for (label, mut node, mut visibility) in &mut labels {
        match camera.world_to_viewport(camera_transform, label.anchor) {
            Ok(position) => {
                node.left = Val::Px(position.x);
                node.top = Val::Px(position.y);
                *visibility = Visibility::Inherited;
            }
            Err(_) => *visibility = Visibility::Hidden,
        }
    }
}
