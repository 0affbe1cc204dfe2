use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::engine::assets::point_cloud_model::PointCloudModel;
use crate::engine::core::app_state::VisualiserSet;
use crate::engine::scene::point_cloud_loader::{
    BatchLoadOutcome, BatchOrigin, LoadBatchRequest, TeardownRequest,
};
use crate::engine::systems::fps_tracking::current_fps;
use crate::error::VisualiserError;
use crate::tools::point_selection::DisplayedLabelChanged;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// One-way message to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<&VisualiserError> for RpcError {
    fn from(error: &VisualiserError) -> Self {
        Self {
            code: error.rpc_code(),
            message: error.to_string(),
            data: Some(json!({ "kind": error.kind() })),
        }
    }
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }
    }
}

/// Outgoing notifications and responses, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Raw message text from the host.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .before(VisualiserSet::Load),
            )
            .add_systems(
                Update,
                (
                    respond_to_batch_outcomes,
                    notify_label_changes,
                    send_outgoing_messages,
                )
                    .chain()
                    .in_set(VisualiserSet::Present),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::{Arc, Mutex};

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership passes to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    model: Res<PointCloudModel>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut load_requests: EventWriter<LoadBatchRequest>,
    mut teardown_requests: EventWriter<TeardownRequest>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    json!({ "message": format!("Parse error: {}", parse_error) }),
                );
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let result = match request.method.as_str() {
            "load_batch" => match parse_load_batch_params(&request.params) {
                Ok((labels, vectors)) => {
                    load_requests.write(LoadBatchRequest {
                        labels,
                        vectors,
                        origin: BatchOrigin::Rpc {
                            id: request.id.clone(),
                        },
                    });
                    // Answered from `respond_to_batch_outcomes`.
                    continue;
                }
                Err(error) => Err(error),
            },
            "clear_batch" => {
                teardown_requests.write(TeardownRequest);
                Ok(json!({ "success": true }))
            }
            "get_selection" => Ok(selection_json(&model)),
            "get_fps" => Ok(json!({ "fps": current_fps(&diagnostics).unwrap_or(0.0) as f32 })),
            _ => {
                warn!("Unknown RPC method: {}", request.method);
                Err(RpcError::method_not_found(&request.method))
            }
        };

        // Requests without ids are notifications and get no reply.
        let Some(id) = request.id else {
            continue;
        };
        rpc_interface.queue_response(match result {
            Ok(value) => RpcResponse::success(id, value),
            Err(error) => RpcResponse::failure(id, error),
        });
    }
}

/// `{ labels: [...], vectors: [[...], ...] }`. Shape rules beyond JSON types
/// are left to `prepare_batch` so every entry point reports them the same way.
pub fn parse_load_batch_params(
    params: &Value,
) -> Result<(Vec<String>, Vec<Vec<f64>>), RpcError> {
    #[derive(Deserialize)]
    struct LoadBatchParams {
        labels: Vec<String>,
        vectors: Vec<Vec<f64>>,
    }

    let parsed = serde_json::from_value::<LoadBatchParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected 'labels' (string[]) and 'vectors' (number[][])")
    })?;
    Ok((parsed.labels, parsed.vectors))
}

pub fn selection_json(model: &PointCloudModel) -> Value {
    json!({
        "selected": model.highlight.selected,
        "hovered": model.highlight.hovered,
        "label": model.displayed_label(),
    })
}

fn respond_to_batch_outcomes(
    mut outcomes: EventReader<BatchLoadOutcome>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for outcome in outcomes.read() {
        let result = match &outcome.result {
            Ok(summary) => {
                let value = json!({ "count": summary.count, "dimensions": summary.dimensions });
                rpc_interface.send_notification("batch_loaded", value.clone());
                Ok(value)
            }
            Err(error) => {
                let rpc_error = RpcError::from(error);
                rpc_interface.send_notification(
                    "batch_load_failed",
                    json!({
                        "code": rpc_error.code,
                        "kind": error.kind(),
                        "message": rpc_error.message,
                    }),
                );
                Err(rpc_error)
            }
        };

        if let BatchOrigin::Rpc { id: Some(id) } = &outcome.origin {
            rpc_interface.queue_response(match result {
                Ok(value) => RpcResponse::success(id.clone(), value),
                Err(error) => RpcResponse::failure(id.clone(), error),
            });
        }
    }
}

fn notify_label_changes(
    mut label_events: EventReader<DisplayedLabelChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in label_events.read() {
        rpc_interface.send_notification(
            "label_changed",
            json!({ "index": event.index, "label": event.label }),
        );
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, then responses, to keep ordering stable for the host.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_batch_params_parse() {
        let params = json!({ "labels": ["cat", "dog"], "vectors": [[0.1, 0.2], [0.3, 0.4]] });
        let (labels, vectors) = parse_load_batch_params(&params).unwrap();
        assert_eq!(labels, vec!["cat", "dog"]);
        assert_eq!(vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[test]
    fn malformed_load_batch_params_are_invalid_params() {
        for params in [
            json!({ "labels": ["cat"] }),
            json!({ "labels": "cat", "vectors": [[1.0]] }),
            json!({ "labels": ["cat"], "vectors": [["x"]] }),
            Value::Null,
        ] {
            let error = parse_load_batch_params(&params).unwrap_err();
            assert_eq!(error.code, -32602);
        }
    }

    #[test]
    fn request_without_params_parses() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"clear_batch","id":4}"#).unwrap();
        assert_eq!(request.method, "clear_batch");
        assert_eq!(request.params, Value::Null);
        assert_eq!(request.id, Some(json!(4)));
    }

    #[test]
    fn visualiser_errors_carry_their_code_and_kind() {
        let error = RpcError::from(&VisualiserError::InsufficientData { count: 1 });
        assert_eq!(error.code, -32001);
        assert_eq!(error.data, Some(json!({ "kind": "insufficient_data" })));
    }

    #[test]
    fn selection_reports_displayed_label() {
        let model = PointCloudModel::default();
        assert_eq!(
            selection_json(&model),
            json!({ "selected": null, "hovered": null, "label": null })
        );
    }
}
