//! JSON-RPC 2.0 bridge to a host page.
//!
//! On wasm the engine runs inside an iframe; the host posts requests with
//! `postMessage` and receives responses and notifications the same way.
//! Native builds keep the same queues but never transmit.
//!
//! ## Methods
//!
//! - `load_batch { labels: string[], vectors: number[][] }`: replace the
//!   point cloud. The response arrives once the batch has been projected:
//!   `{ count, dimensions }` or an error whose code is the error's
//!   application code (-32001..-32010) with `data.kind` naming it.
//! - `clear_batch`: tear the point cloud down.
//! - `get_selection`: `{ selected, hovered, label }`.
//! - `get_fps`: `{ fps }`.
//!
//! ## Notifications (engine to host)
//!
//! - `label_changed { index, label }`: the displayed label changed.
//! - `batch_loaded { count, dimensions }`
//! - `batch_load_failed { code, kind, message }`
//! - `fps_update { fps }`, every half second.
//! - `debug_message { message }`
//!
//! Standard codes: `-32600` invalid request, `-32601` method not found,
//! `-32602` invalid params, `-32603` internal error.

/// Message queues, request dispatch and wasm `postMessage` plumbing.
pub mod web_rpc;
