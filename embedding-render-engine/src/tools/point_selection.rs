use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::assets::point_cloud_model::{HighlightState, PointCloudModel};
use crate::engine::camera::snapshot::CameraSnapshot;
use crate::engine::core::settings::VisualiserSettings;
use crate::tools::picking::pick_at_cursor;

/// The label shown to the user changed (hover or selection).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DisplayedLabelChanged {
    pub index: Option<usize>,
    pub label: Option<String>,
}

/// Set the hovered index; a miss clears it. Returns `true` on change.
pub fn apply_hover(state: &mut HighlightState, pick: Option<usize>) -> bool {
    if state.hovered == pick {
        return false;
    }
    state.hovered = pick;
    true
}

/// Set the selected index; clicking empty space deselects. Returns `true` on change.
pub fn apply_click(state: &mut HighlightState, pick: Option<usize>) -> bool {
    if state.selected == pick {
        return false;
    }
    state.selected = pick;
    true
}

fn pick_under(
    cursor: Vec2,
    snapshot: &CameraSnapshot,
    model: &PointCloudModel,
    settings: &VisualiserSettings,
) -> Option<usize> {
    let view = snapshot.view()?;
    pick_at_cursor(cursor, view, model.positions(), settings.hit_tolerance_px)
}

fn publish_if_changed(
    before: Option<usize>,
    model: &PointCloudModel,
    label_events: &mut EventWriter<DisplayedLabelChanged>,
) {
    let index = model.highlight.displayed();
    if index == before {
        return;
    }
    let label = index.and_then(|i| model.label(i)).map(str::to_owned);
    debug!("Displayed label: {:?}", label);
    label_events.write(DisplayedLabelChanged { index, label });
}

/// Re-pick on pointer movement only; a stationary pointer keeps its hover.
pub fn pointer_hover_system(
    mut cursor_moved: EventReader<CursorMoved>,
    snapshot: Res<CameraSnapshot>,
    settings: Res<VisualiserSettings>,
    mut model: ResMut<PointCloudModel>,
    mut label_events: EventWriter<DisplayedLabelChanged>,
) {
    let Some(cursor) = cursor_moved.read().last().map(|event| event.position) else {
        return;
    };

    let pick = pick_under(cursor, &snapshot, &model, &settings);
    let before = model.highlight.displayed();
    if apply_hover(&mut model.highlight, pick) {
        publish_if_changed(before, &model, &mut label_events);
    }
}

pub fn pointer_click_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    snapshot: Res<CameraSnapshot>,
    settings: Res<VisualiserSettings>,
    mut model: ResMut<PointCloudModel>,
    mut label_events: EventWriter<DisplayedLabelChanged>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let cursor = window_query
        .single()
        .ok()
        .and_then(|window| window.cursor_position());
    let pick = cursor.and_then(|cursor| pick_under(cursor, &snapshot, &model, &settings));
    let before = model.highlight.displayed();
    if apply_click(&mut model.highlight, pick) {
        publish_if_changed(before, &model, &mut label_events);
    }
}
