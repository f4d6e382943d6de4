//! Tile sprites loaded from a directory of PNG files
//!
//! Each file's stem is the tile label, so `corner_AABB.png` becomes the tile
//! `corner_AABB` with descriptor `AABB`. Sprites must all share one size.

use crate::io::configuration::SPRITE_EXTENSION;
use crate::io::error::{CollapseError, Result, invalid_configuration};
use crate::spatial::{Alphabet, Tile, TileId};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Alphabet paired with one sprite per tile, in alphabet order
#[derive(Debug, Clone)]
pub struct SpriteSet {
    alphabet: Alphabet,
    sprites: Vec<RgbaImage>,
    tile_width: u32,
    tile_height: u32,
}

impl SpriteSet {
    /// Load every sprite in `directory`, sorted by file name
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be read
    /// - A sprite cannot be decoded
    /// - A file stem is not a valid tile label, or labels repeat
    /// - Sprites differ in size, or no sprite is found
    pub fn load(directory: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(directory).map_err(|e| CollapseError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read tile directory",
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CollapseError::FileSystem {
                    path: directory.to_path_buf(),
                    operation: "read tile directory",
                    source: e,
                })?
                .path();
            if is_sprite(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tiles = Vec::with_capacity(paths.len());
        let mut sprites = Vec::with_capacity(paths.len());
        for path in paths {
            let label = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            tiles.push(Tile::parse(&label)?);

            let sprite = image::open(&path)
                .map_err(|e| CollapseError::TileSetLoad {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgba8();
            sprites.push(sprite);
        }

        let alphabet = Alphabet::new(tiles)?;
        debug!(
            directory = %directory.display(),
            tiles = alphabet.len(),
            "tile set loaded"
        );
        Self::from_parts(alphabet, sprites)
    }

    /// Pair an alphabet with sprites already in memory
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the sprite count does not match the
    /// alphabet or the sprites differ in size
    pub fn from_parts(alphabet: Alphabet, sprites: Vec<RgbaImage>) -> Result<Self> {
        if sprites.len() != alphabet.len() {
            return Err(invalid_configuration(
                "tiles",
                &sprites.len(),
                &format!("expected one sprite per tile ({})", alphabet.len()),
            ));
        }

        let (tile_width, tile_height) = sprites.first().map_or((0, 0), RgbaImage::dimensions);
        if let Some((id, tile)) = alphabet.iter().find(|&(id, _)| {
            sprites
                .get(id.index())
                .is_some_and(|sprite| sprite.dimensions() != (tile_width, tile_height))
        }) {
            let (width, height) = sprites
                .get(id.index())
                .map_or((0, 0), RgbaImage::dimensions);
            return Err(invalid_configuration(
                "tiles",
                &tile.label(),
                &format!("sprite is {width}x{height}, expected {tile_width}x{tile_height}"),
            ));
        }

        Ok(Self {
            alphabet,
            sprites,
            tile_width,
            tile_height,
        })
    }

    /// Tiles described by the sprite names
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Sprite for a tile
    pub fn sprite(&self, tile: TileId) -> Option<&RgbaImage> {
        self.sprites.get(tile.index())
    }

    /// Sprite width in pixels
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Sprite height in pixels
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }
}

fn is_sprite(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SPRITE_EXTENSION))
}

/// Path a sprite for `label` would be loaded from
pub fn sprite_path(directory: &Path, label: &str) -> PathBuf {
    directory.join(format!("{label}.{SPRITE_EXTENSION}"))
}
