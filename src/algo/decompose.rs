//! Backtracking search for every pair+melds partition of a hand.
//!
//! Tiles are grouped by kind into a count table. The search fixes a pair
//! candidate, then repeatedly consumes the smallest remaining kind as a run,
//! a triplet or a quad, backtracking on dead ends. Sub-searches are memoized
//! on the remaining-count signature, which keeps the walk over a 14-tile
//! hand tightly bounded.
use crate::hand::Hand;
use crate::tile::{STRUCTURAL_KINDS, Tile};
use ahash::{AHashMap, AHashSet};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tinyvec::ArrayVec;

/// A complete hand holds one pair plus this many melds, exposed claims
/// included.
pub const REQUIRED_MELDS: u8 = 4;

/// A meld, keyed by its lowest tile. Derived order (runs, then sets, then
/// quads, each by tile) is the canonical order inside a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Meld {
    /// Three consecutive numbers in one sequential suit.
    Run(Tile),
    /// Three identical tiles.
    Set(Tile),
    /// Four identical tiles.
    Quad(Tile),
}

impl Default for Meld {
    fn default() -> Self {
        Meld::Run(Tile::default())
    }
}

impl Meld {
    #[must_use]
    pub fn key_tile(self) -> Tile {
        match self {
            Meld::Run(t) | Meld::Set(t) | Meld::Quad(t) => t,
        }
    }

    #[must_use]
    pub fn is_run(self) -> bool {
        matches!(self, Meld::Run(_))
    }
}

/// One valid partition of a hand's concealed structural tiles. Melds are
/// kept sorted, so equal partitions compare equal regardless of the order
/// the search discovered them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Decomposition {
    pub pair: Tile,
    pub melds: ArrayVec<[Meld; REQUIRED_MELDS as usize]>,
}

impl Decomposition {
    /// Lowest tiles of the run melds.
    pub fn runs(&self) -> impl Iterator<Item = Tile> + '_ {
        self.melds.iter().filter_map(|m| match m {
            Meld::Run(t) => Some(*t),
            _ => None,
        })
    }

    /// Tiles of the triplet and quad melds.
    pub fn sets(&self) -> impl Iterator<Item = Tile> + '_ {
        self.melds.iter().filter_map(|m| match m {
            Meld::Set(t) | Meld::Quad(t) => Some(*t),
            _ => None,
        })
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tile, copies) = match self {
            Meld::Run(t) => {
                let n = t.number();
                return write!(f, "{n}{}{}{}", n + 1, n + 2, t.suit().letter());
            }
            Meld::Set(t) => (t, 3),
            Meld::Quad(t) => (t, 4),
        };
        for _ in 0..copies {
            write!(f, "{}", tile.number())?;
        }
        write!(f, "{}", tile.suit().letter())
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.pair.number();
        write!(f, "{n}{n}{}", self.pair.suit().letter())?;
        for meld in &self.melds {
            write!(f, " {meld}")?;
        }
        Ok(())
    }
}

type Counts = [u8; STRUCTURAL_KINDS];
type Partition = ArrayVec<[Meld; REQUIRED_MELDS as usize]>;
type Memo = AHashMap<(Counts, u8), Rc<Vec<Partition>>>;

/// Return all structurally distinct decompositions of the hand's concealed
/// tiles into one pair plus `REQUIRED_MELDS - fixed_melds` melds.
///
/// `fixed_melds` counts already-exposed claims; those melds were validated
/// when claimed and are not re-checked here. Bonus tiles in the hand are
/// ignored. An empty result is the normal non-winning outcome.
#[must_use]
pub fn decompose(hand: &Hand, fixed_melds: u8) -> Vec<Decomposition> {
    assert!(
        fixed_melds <= REQUIRED_MELDS,
        "at most {REQUIRED_MELDS} melds can be fixed, got {fixed_melds}"
    );
    let needed = REQUIRED_MELDS - fixed_melds;
    let mut counts = hand.structural_counts();
    let mut memo = Memo::default();
    let mut out = vec![];
    for pair in 0..STRUCTURAL_KINDS {
        if counts[pair] < 2 {
            continue;
        }
        counts[pair] -= 2;
        let parts = partitions(&mut counts, needed, &mut memo);
        counts[pair] += 2;
        out.extend(parts.iter().map(|&melds| Decomposition {
            pair: Tile::from_id(pair as u8),
            melds,
        }));
    }
    debug!("{} decomposition(s) for [{hand}]", out.len());
    out
}

/// All distinct ways to split `counts` into exactly `needed` melds. Results
/// for a given remaining-count signature are computed once.
fn partitions(counts: &mut Counts, needed: u8, memo: &mut Memo) -> Rc<Vec<Partition>> {
    if let Some(hit) = memo.get(&(*counts, needed)) {
        return Rc::clone(hit);
    }
    let remaining: u16 = counts.iter().map(|&c| u16::from(c)).sum();
    let mut found = AHashSet::new();
    if needed == 0 {
        if remaining == 0 {
            found.insert(Partition::new());
        }
    } else if (3 * u16::from(needed)..=4 * u16::from(needed)).contains(&remaining) {
        // The smallest remaining kind must be consumed right now, one way or
        // another; anything it cannot join makes this branch a dead end.
        if let Some(k) = counts.iter().position(|&c| c > 0) {
            let tile = Tile::from_id(k as u8);
            if counts[k] >= 3 {
                counts[k] -= 3;
                collect(counts, needed, memo, Meld::Set(tile), &mut found);
                counts[k] += 3;
            }
            if counts[k] == 4 {
                counts[k] -= 4;
                collect(counts, needed, memo, Meld::Quad(tile), &mut found);
                counts[k] += 4;
            }
            let in_run_range = tile.suit().is_sequential() && tile.number() <= 7;
            if in_run_range && counts[k + 1] > 0 && counts[k + 2] > 0 {
                counts[k] -= 1;
                counts[k + 1] -= 1;
                counts[k + 2] -= 1;
                collect(counts, needed, memo, Meld::Run(tile), &mut found);
                counts[k] += 1;
                counts[k + 1] += 1;
                counts[k + 2] += 1;
            }
        }
    }
    let result = Rc::new(found.into_iter().collect::<Vec<_>>());
    memo.insert((*counts, needed), Rc::clone(&result));
    result
}

fn collect(
    counts: &mut Counts,
    needed: u8,
    memo: &mut Memo,
    meld: Meld,
    found: &mut AHashSet<Partition>,
) {
    for sub in partitions(counts, needed - 1, memo).iter() {
        let mut melds = *sub;
        melds.push(meld);
        melds.sort_unstable();
        found.insert(melds);
    }
}
