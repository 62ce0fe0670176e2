//! Library exports for reuse in integration tests.
/// Blocking REST client for the prediction gateway.
pub mod api;
/// Per-user config and log directory resolution.
pub mod app_dirs;
/// Bacteria traits, records, and prediction types.
pub mod bacteria;
/// Settings persistence.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared blocking HTTP agent.
pub mod http_client;
/// File logging setup.
pub mod logging;
/// Form input normalization.
pub mod normalize;
