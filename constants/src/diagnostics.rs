/// Log filter handed to the log plugin.
pub const LOG_FILTER: &str = "wgpu=error,naga=warn,embedding_render_engine=info";

/// Seconds between FPS notifications sent to the host page.
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;
