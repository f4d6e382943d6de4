//! Solver constants and runtime configuration defaults

/// Number of sides in a tile descriptor (Up, Right, Down, Left)
pub const DESCRIPTOR_LENGTH: usize = 4;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Consecutive rollbacks tolerated before giving up
pub const DEFAULT_MAX_RETRIES: usize = 100;

// A 36x24 pixel canvas filled with 3x3 pixel tiles
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 12;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 8;

// Tile set and canvas settings
/// File extension of tile sprites
pub const SPRITE_EXTENSION: &str = "png";
/// Default canvas output path
pub const DEFAULT_OUTPUT: &str = "canvas.png";
/// Canvas color behind unresolved cells
pub const CANVAS_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tilecollapse=info";
