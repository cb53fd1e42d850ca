use crate::tile::{STRUCTURAL_KINDS, Suit, TILE_KINDS, Tile};
use anyhow::{Result, bail, ensure};
use derivative::Derivative;
use std::fmt;
use std::iter;

/// A single player's hand: an unordered multiset of tiles kept as a count
/// table over the dense tile ids. The hand itself never enforces a maximum
/// size; legal-size rules belong to the surrounding turn logic.
#[derive(Debug, Clone, PartialEq, Eq, Derivative)]
#[derivative(Default)]
pub struct Hand {
    #[derivative(Default(value = "[0; TILE_KINDS]"))]
    counts: [u8; TILE_KINDS],
    len: usize,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut hand = Self::new();
        for tile in tiles {
            hand.push(tile);
        }
        hand
    }

    /// Add a drawn or claimed tile.
    pub fn push(&mut self, tile: Tile) {
        self.counts[tile.as_usize()] += 1;
        self.len += 1;
    }

    /// Remove one copy (discard/expose). Returns `false` when the hand holds
    /// no copy of the tile.
    pub fn remove(&mut self, tile: Tile) -> bool {
        if self.counts[tile.as_usize()] == 0 {
            return false;
        }
        self.counts[tile.as_usize()] -= 1;
        self.len -= 1;
        true
    }

    #[must_use]
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts[tile.as_usize()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-kind counts over all tile ids.
    #[must_use]
    pub fn counts(&self) -> &[u8; TILE_KINDS] {
        &self.counts
    }

    /// Counts restricted to the kinds that may form pairs and melds.
    #[must_use]
    pub fn structural_counts(&self) -> [u8; STRUCTURAL_KINDS] {
        let mut out = [0; STRUCTURAL_KINDS];
        out.copy_from_slice(&self.counts[..STRUCTURAL_KINDS]);
        out
    }

    /// One item per copy, in tile order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(id, &c)| iter::repeat_n(Tile::from_id(id as u8), c as usize))
    }

    /// Flowers and seasons held by the hand. These sit outside the pair/meld
    /// structure and are scored separately by the host.
    pub fn bonus_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.iter().filter(|t| t.is_bonus())
    }
}

impl FromIterator<Tile> for Hand {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self::from_tiles(iter)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for suit in Suit::ALL {
            let start = suit.start() as usize;
            let range = &self.counts[start..start + suit.max_number() as usize];
            if range.iter().all(|&c| c == 0) {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            for (i, &c) in range.iter().enumerate() {
                for _ in 0..c {
                    write!(f, "{}", i + 1)?;
                }
            }
            write!(f, "{}", suit.letter())?;
        }
        Ok(())
    }
}

/// Parse the compact hand notation used across the tests and docs, e.g.
/// `"123c 456b 789o 11w"`. Digits accumulate until a suit letter flushes
/// them.
pub fn hand(s: &str) -> Result<Hand> {
    let mut out = Hand::new();
    let mut digits: Vec<u8> = vec![];
    for ch in s.chars() {
        if ch.is_whitespace() {
            continue;
        }
        if let Some(d) = ch.to_digit(10) {
            digits.push(d as u8);
        } else if let Some(suit) = Suit::from_letter(ch) {
            ensure!(!digits.is_empty(), "suit '{ch}' with no numbers in '{s}'");
            for d in digits.drain(..) {
                out.push(Tile::new(suit, d)?);
            }
        } else {
            bail!("unexpected character '{ch}' in '{s}'");
        }
    }
    ensure!(digits.is_empty(), "trailing numbers without a suit in '{s}'");
    Ok(out)
}
