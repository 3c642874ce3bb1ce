/// Command-line parsing and the generation driver
pub mod cli;
/// Runtime defaults and the tileset configuration document
pub mod configuration;
/// Error types for validation, solving and output
pub mod error;
/// Snapshot rendering and PNG export
pub mod image;
/// Logger initialisation
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Sprite loading and rotation
pub mod sprites;
/// Frame capture and GIF export
pub mod visualization;
