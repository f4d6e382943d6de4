//! RGBA canvas painted one collapse event at a time

use crate::algorithm::executor::CollapseEvent;
use crate::io::configuration::CANVAS_BACKGROUND;
use crate::io::error::{CollapseError, Result, illegal_state};
use crate::io::tileset::SpriteSet;
use image::{Rgba, RgbaImage, imageops};
use std::path::Path;

/// Canvas sized to a grid of uniform sprites
///
/// Unresolved cells keep the background color.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    tile_width: u32,
    tile_height: u32,
    painted: usize,
}

impl Canvas {
    /// Blank canvas for `cols` by `rows` cells of the given sprite size
    pub fn new(cols: usize, rows: usize, tile_width: u32, tile_height: u32) -> Self {
        let width = (cols as u32).saturating_mul(tile_width);
        let height = (rows as u32).saturating_mul(tile_height);

        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(CANVAS_BACKGROUND)),
            tile_width,
            tile_height,
            painted: 0,
        }
    }

    /// Blank canvas matching a sprite set
    pub fn for_sprites(cols: usize, rows: usize, sprites: &SpriteSet) -> Self {
        Self::new(cols, rows, sprites.tile_width(), sprites.tile_height())
    }

    /// Copy the event's sprite into its cell
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the event's tile has no sprite
    pub fn paint(&mut self, event: &CollapseEvent, sprites: &SpriteSet) -> Result<()> {
        let sprite = sprites.sprite(event.tile).ok_or_else(|| {
            illegal_state(
                "paint",
                [event.y, event.x],
                &format!("tile {} has no sprite", event.tile),
            )
        })?;

        let left = i64::from(self.tile_width) * event.x as i64;
        let top = i64::from(self.tile_height) * event.y as i64;
        imageops::replace(&mut self.image, sprite, left, top);
        self.painted += 1;
        Ok(())
    }

    /// Number of cells painted so far
    pub const fn painted(&self) -> usize {
        self.painted
    }

    /// Rendered pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the canvas as a PNG, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The image cannot be encoded or written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        self.image
            .save(path)
            .map_err(|e| CollapseError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
