//! Primitives for tile-matching games: suits and tiles, shrink-only draw
//! piles, player hands, and the decomposition/scoring engine that decides
//! whether a hand is a legal win and how many points it earns under a
//! configurable rule set.
//!
//! Everything is a pure, synchronous in-process computation; the host
//! application owns turn sequencing, claims and I/O.
pub mod algo;
pub mod deal;
pub mod errors;
pub mod hand;
pub mod pile;
pub mod tile;

pub use errors::{MahjongError, MahjongResult};
pub use hand::Hand;
pub use pile::TilePile;
pub use tile::{Suit, Tile};
