use crate::algorithm::bitset::CandidateSet;
use crate::spatial::direction::Direction;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::{Alphabet, Tile, TileId};

/// Whether `b` may sit next to `a` in `direction` (as seen from `a`)
///
/// The side of `a` facing `direction` must carry the same socket as the side
/// of `b` facing back.
pub const fn compatible(a: &Tile, b: &Tile, direction: Direction) -> bool {
    a.side(direction) == b.side(direction.opposite())
}

/// Precomputed compatibility table for one alphabet
///
/// For every tile and direction, stores the set of tiles allowed on that side
/// so that reducing a neighbor is a single bitset intersection instead of a
/// descriptor comparison per candidate.
#[derive(Debug, Clone)]
pub struct AdjacencyRule {
    allowed: Vec<[CandidateSet; 4]>,
    tile_count: usize,
}

impl AdjacencyRule {
    /// Build the table from an alphabet's descriptors
    pub fn new(alphabet: &Alphabet) -> Self {
        let tile_count = alphabet.len();
        let allowed = alphabet
            .iter()
            .map(|(_, a)| {
                Direction::ALL.map(|direction| {
                    CandidateSet::from_tiles(
                        tile_count,
                        alphabet
                            .iter()
                            .filter(|(_, b)| compatible(a, b, direction))
                            .map(|(id, _)| id),
                    )
                })
            })
            .collect();

        Self {
            allowed,
            tile_count,
        }
    }

    /// Alphabet size the table was built for
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles allowed next to `tile` in `direction`
    pub fn allowed(&self, tile: TileId, direction: Direction) -> Option<&CandidateSet> {
        self.allowed
            .get(tile.index())
            .and_then(|sides| sides.get(direction.index()))
    }

    /// Table lookup equivalent of [`compatible`]
    pub fn compatible(&self, a: TileId, b: TileId, direction: Direction) -> bool {
        self.allowed(a, direction)
            .is_some_and(|allowed| allowed.contains(b))
    }

    /// First pair of adjacent collapsed cells that violates the rule
    ///
    /// Each unordered pair is checked in both directions. Superposed cells are
    /// skipped, so a partially solved grid can be checked too.
    pub fn first_violation(&self, grid: &Grid) -> Option<([usize; 2], [usize; 2])> {
        for cell in grid.iter() {
            let Some(tile) = cell.tile() else {
                continue;
            };
            for direction in [Direction::Right, Direction::Down] {
                let Some((ny, nx)) = grid.neighbor(cell.y(), cell.x(), direction) else {
                    continue;
                };
                let Some(other) = grid.get(ny, nx).and_then(|neighbor| neighbor.tile()) else {
                    continue;
                };
                if !self.compatible(tile, other, direction)
                    || !self.compatible(other, tile, direction.opposite())
                {
                    return Some(([cell.y(), cell.x()], [ny, nx]));
                }
            }
        }
        None
    }
}
