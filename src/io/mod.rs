/// Event-driven canvas rendering and PNG export
pub mod canvas;
/// Command-line interface and run orchestration
pub mod cli;
/// Algorithm constants and default values
pub mod configuration;
/// Error types and result handling
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// Progress bar for a running solve
pub mod progress;
/// Sprite directory loading
pub mod tileset;
