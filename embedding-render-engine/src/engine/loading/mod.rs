//! Startup loading of an optional demonstration batch.

/// Reads the batch file named in settings and submits it as a load request.
pub mod demo_batch;
