use crate::errors::{MahjongError, MahjongResult};
use crate::tile::{TILE_KINDS, Tile};
use rand::Rng;
use rand::seq::SliceRandom;
use std::iter;

/// An ordered, shrink-only pile of tiles (the wall/deck). Created once,
/// shuffled, then consumed from the two ends; no insertion operation exists
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePile {
    tiles: Vec<Tile>,
}

impl TilePile {
    /// The standard 144-tile composition: every suit expanded as
    /// `numbers x typical_duplication`.
    #[must_use]
    pub fn standard() -> Self {
        let tiles = (0..TILE_KINDS as u8)
            .map(Tile::from_id)
            .flat_map(|t| iter::repeat_n(t, t.suit().typical_duplication() as usize))
            .collect();
        Self { tiles }
    }

    /// Uniform in-place permutation.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.tiles.shuffle(rng);
    }

    /// Remove `n` tiles from the back, the primary draw path.
    pub fn pop_back(&mut self, n: usize) -> MahjongResult<Vec<Tile>> {
        self.check(n)?;
        Ok(self.tiles.split_off(self.tiles.len() - n))
    }

    /// Remove `n` tiles from the front. Kept separate from [`pop_back`] for
    /// the lower-frequency replacement draws (flowers, quads).
    ///
    /// [`pop_back`]: TilePile::pop_back
    pub fn pop_front(&mut self, n: usize) -> MahjongResult<Vec<Tile>> {
        self.check(n)?;
        Ok(self.tiles.drain(..n).collect())
    }

    /// A non-mutating circular view, shifted right by `offset`. Used to
    /// locate a wall-break point without disturbing the stored order.
    pub fn rotated(&self, offset: isize) -> impl Iterator<Item = Tile> + '_ {
        let len = self.tiles.len();
        let split = if len == 0 {
            0
        } else {
            (len - offset.rem_euclid(len as isize) as usize) % len
        };
        self.tiles[split..]
            .iter()
            .chain(&self.tiles[..split])
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    fn check(&self, requested: usize) -> MahjongResult<()> {
        if requested > self.tiles.len() {
            return Err(MahjongError::InsufficientTiles {
                requested,
                remaining: self.tiles.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Tile>> for TilePile {
    fn from(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }
}
