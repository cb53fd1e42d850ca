//! Wall building and hand dealing on top of the pile primitives. Turn
//! sequencing and claim resolution stay with the host; these helpers only
//! cover the mechanical setup phase.
use crate::errors::MahjongResult;
use crate::hand::Hand;
use crate::pile::TilePile;
use crate::tile::Tile;
use log::debug;
use rand::Rng;

/// Build and shuffle a standard 144-tile wall.
pub fn build_wall(rng: &mut impl Rng) -> TilePile {
    let mut pile = TilePile::standard();
    pile.shuffle(rng);
    pile
}

/// Snapshot of the wall rotated to a die-roll break point, without
/// disturbing the stored order. The caller maps the two ends of the
/// returned sequence to the draw and replacement ends.
#[must_use]
pub fn wall_break(pile: &TilePile, roll: usize) -> Vec<Tile> {
    pile.rotated(roll as isize).collect()
}

/// Deal starting hands from the back of the pile: batches of four per
/// player, then the last tiles one by one.
pub fn deal(pile: &mut TilePile, players: usize, hand_size: usize) -> MahjongResult<Vec<Hand>> {
    let mut hands = vec![Hand::new(); players];
    let mut dealt = 0;
    while dealt < hand_size {
        let take = if hand_size - dealt >= 4 { 4 } else { 1 };
        for hand in &mut hands {
            for tile in pile.pop_back(take)? {
                hand.push(tile);
            }
        }
        dealt += take;
    }
    debug!(
        "dealt {players} hands of {hand_size}, {} tiles left in the wall",
        pile.len()
    );
    Ok(hands)
}
