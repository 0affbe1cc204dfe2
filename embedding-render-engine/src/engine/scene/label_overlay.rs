use bevy::prelude::*;

use crate::tools::point_selection::DisplayedLabelChanged;

#[derive(Component)]
pub struct LabelText;

#[derive(Component)]
pub struct FpsText;

const HINT: &str = "Hover or click a point to see its label. Drag to orbit, scroll to zoom.";

pub fn spawn_label_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.18, 0.49, 0.2)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                LabelText,
            ));
            parent.spawn((
                Text::new(HINT),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.35, 0.35)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
            ));

            #[cfg(not(target_arch = "wasm32"))]
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

pub fn update_label_overlay(
    mut label_events: EventReader<DisplayedLabelChanged>,
    mut query: Query<&mut Text, With<LabelText>>,
) {
    let Some(latest) = label_events.read().last() else {
        return;
    };
    let content = latest
        .label
        .as_deref()
        .map(|label| format!("Selected/Hovered String: {label}"))
        .unwrap_or_default();
    for mut text in &mut query {
        text.0.clone_from(&content);
    }
}
