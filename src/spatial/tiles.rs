//! Tile identifiers, directional descriptors and the validated alphabet
//!
//! A tile label either is its descriptor (`"ABAB"`) or ends with it after an
//! underscore (`"corner_AABB"`). Descriptor components are single characters
//! ordered Up, Right, Down, Left. Everything downstream refers to tiles by
//! their dense [`TileId`] rather than by label.

use crate::io::configuration::DESCRIPTOR_LENGTH;
use crate::io::error::{Result, invalid_configuration};
use crate::spatial::direction::Direction;
use std::collections::HashSet;
use std::fmt;

/// Dense index of a tile within its alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(usize);

impl TileId {
    /// Wrap a raw alphabet index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw alphabet index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labelled tile with one socket character per side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    label: String,
    sides: [char; DESCRIPTOR_LENGTH],
}

impl Tile {
    /// Parse a tile from its label
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the descriptor part of the label does
    /// not have exactly one character per direction
    pub fn parse(label: &str) -> Result<Self> {
        let descriptor = label.rsplit('_').next().unwrap_or(label);
        Self::with_descriptor(label, descriptor)
    }

    /// Build a tile whose label and descriptor are given separately
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the label is empty or the descriptor
    /// does not have exactly one character per direction
    pub fn with_descriptor(label: &str, descriptor: &str) -> Result<Self> {
        if label.is_empty() {
            return Err(invalid_configuration(
                "alphabet",
                &label,
                &"tile labels must not be empty",
            ));
        }

        let chars: Vec<char> = descriptor.chars().collect();
        let sides: [char; DESCRIPTOR_LENGTH] = chars.try_into().map_err(|rejected: Vec<char>| {
            invalid_configuration(
                "alphabet",
                &label,
                &format!(
                    "descriptor '{descriptor}' has {} sides, expected {DESCRIPTOR_LENGTH}",
                    rejected.len()
                ),
            )
        })?;

        Ok(Self {
            label: label.to_string(),
            sides,
        })
    }

    /// Tile label as given at construction
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Socket character on the given side
    pub const fn side(&self, direction: Direction) -> char {
        match direction {
            Direction::Up => self.sides[0],
            Direction::Right => self.sides[1],
            Direction::Down => self.sides[2],
            Direction::Left => self.sides[3],
        }
    }

    /// Descriptor as a string in Up, Right, Down, Left order
    pub fn descriptor(&self) -> String {
        self.sides.iter().collect()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Finite, non-empty set of tiles with unique labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    tiles: Vec<Tile>,
}

impl Alphabet {
    /// Validate and wrap a list of tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the list is empty or two tiles share a label
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_configuration(
                "alphabet",
                &"[]",
                &"at least one tile is required",
            ));
        }

        if let Some(duplicate) = first_duplicate_label(&tiles) {
            return Err(invalid_configuration(
                "alphabet",
                &duplicate,
                &"tile labels must be unique",
            ));
        }

        Ok(Self { tiles })
    }

    /// Parse every label and build the alphabet
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any label is malformed, the list is
    /// empty, or labels repeat
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tiles = labels
            .into_iter()
            .map(|label| Tile::parse(label.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(tiles)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a validated alphabet
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Find the id of the tile with the given label
    pub fn find(&self, label: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .position(|tile| tile.label() == label)
            .map(TileId::new)
    }

    /// Iterate over `(id, tile)` pairs in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId::new(index), tile))
    }

    /// Label for a tile id, or `"?"` for ids outside the alphabet
    pub fn label(&self, id: TileId) -> &str {
        self.get(id).map_or("?", Tile::label)
    }
}

fn first_duplicate_label(tiles: &[Tile]) -> Option<String> {
    let mut seen = HashSet::with_capacity(tiles.len());
    tiles
        .iter()
        .find(|tile| !seen.insert(tile.label()))
        .map(|tile| tile.label().to_string())
}
