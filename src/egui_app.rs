//! egui application split into controller, state, and renderer layers.

/// Application controller and background job handling.
pub mod controller;
/// Render-friendly state shared between controller and UI.
pub mod state;
/// egui widgets and panels.
pub mod ui;
