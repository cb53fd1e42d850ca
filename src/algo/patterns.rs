//! Named hand-shape predicates.
//!
//! Global `is_*` predicates look at the whole hand; local `has_*` predicates
//! look for a qualifying sub-arrangement inside one decomposition. All of
//! them answer membership only; point values live in the rule configuration.
use super::decompose::Decomposition;
use crate::hand::Hand;
use crate::tile::{Suit, Tile};

#[derive(Clone, Copy)]
pub enum Predicate {
    Global(fn(&Hand) -> bool),
    Local(fn(&Decomposition) -> bool),
}

pub struct Pattern {
    pub id: &'static str,
    pub predicate: Predicate,
}

/// Every pattern the scoring engine can be configured with.
pub static CATALOG: &[Pattern] = &[
    Pattern {
        id: "pure",
        predicate: Predicate::Global(is_pure),
    },
    Pattern {
        id: "all_simples",
        predicate: Predicate::Global(is_all_simples),
    },
    Pattern {
        id: "one_suit",
        predicate: Predicate::Global(is_one_suit),
    },
    Pattern {
        id: "mixed_one_suit",
        predicate: Predicate::Global(is_mixed_one_suit),
    },
    Pattern {
        id: "all_terminals_honors",
        predicate: Predicate::Global(is_all_terminals_honors),
    },
    Pattern {
        id: "all_runs",
        predicate: Predicate::Local(has_all_runs),
    },
    Pattern {
        id: "all_sets",
        predicate: Predicate::Local(has_all_sets),
    },
    Pattern {
        id: "mixed_double_run",
        predicate: Predicate::Local(has_mixed_double_run),
    },
    Pattern {
        id: "triple_run",
        predicate: Predicate::Local(has_triple_run),
    },
    Pattern {
        id: "pure_double_run",
        predicate: Predicate::Local(has_pure_double_run),
    },
    Pattern {
        id: "full_straight",
        predicate: Predicate::Local(has_full_straight),
    },
    Pattern {
        id: "dragon_set",
        predicate: Predicate::Local(has_dragon_set),
    },
    Pattern {
        id: "wind_set",
        predicate: Predicate::Local(has_wind_set),
    },
];

#[must_use]
pub fn lookup(id: &str) -> Option<&'static Pattern> {
    CATALOG.iter().find(|p| p.id == id)
}

/// No tile belongs to the wind or dragon pseudo-suits.
#[must_use]
pub fn is_pure(hand: &Hand) -> bool {
    hand.iter().all(|t| !t.is_honor())
}

/// Every structural tile is a 2-8 of a sequential suit.
#[must_use]
pub fn is_all_simples(hand: &Hand) -> bool {
    hand.iter()
        .filter(|t| !t.is_bonus())
        .all(|t| t.suit().is_sequential() && (2..=8).contains(&t.number()))
}

fn sequential_suits(hand: &Hand) -> impl Iterator<Item = Suit> + '_ {
    hand.iter()
        .filter(|t| t.suit().is_sequential())
        .map(|t| t.suit())
}

/// All structural tiles come from a single sequential suit, no honors.
#[must_use]
pub fn is_one_suit(hand: &Hand) -> bool {
    let mut suits = sequential_suits(hand);
    match suits.next() {
        None => false,
        Some(first) => {
            suits.all(|s| s == first) && hand.iter().all(|t| !t.is_honor())
        }
    }
}

/// One sequential suit mixed with at least one wind or dragon.
#[must_use]
pub fn is_mixed_one_suit(hand: &Hand) -> bool {
    let mut suits = sequential_suits(hand);
    match suits.next() {
        None => false,
        Some(first) => suits.all(|s| s == first) && hand.iter().any(|t| t.is_honor()),
    }
}

/// Every structural tile is a terminal or an honor.
#[must_use]
pub fn is_all_terminals_honors(hand: &Hand) -> bool {
    let mut structural = hand.iter().filter(|t| !t.is_bonus()).peekable();
    structural.peek().is_some() && structural.all(|t| t.is_terminal() || t.is_honor())
}

/// Every meld of the decomposition is a run.
#[must_use]
pub fn has_all_runs(div: &Decomposition) -> bool {
    div.melds.iter().all(|m| m.is_run())
}

/// Every meld of the decomposition is a triplet or quad.
#[must_use]
pub fn has_all_sets(div: &Decomposition) -> bool {
    div.melds.iter().all(|m| !m.is_run())
}

// For each run start number, a bitmask of the sequential suits holding a
// run that starts there. Shared by the run-shape predicates below.
fn run_masks(div: &Decomposition) -> [u16; 9] {
    let mut masks = [0_u16; 9];
    for t in div.runs() {
        let kind = t.as_usize() / 9;
        masks[t.number() as usize - 1] |= 1 << kind;
    }
    masks
}

/// Two runs with the same starting number in two different sequential suits.
#[must_use]
pub fn has_mixed_double_run(div: &Decomposition) -> bool {
    run_masks(div).iter().any(|m| m.count_ones() >= 2)
}

/// Runs with the same starting number in all three sequential suits.
#[must_use]
pub fn has_triple_run(div: &Decomposition) -> bool {
    run_masks(div).contains(&0b111)
}

/// Two identical runs.
#[must_use]
pub fn has_pure_double_run(div: &Decomposition) -> bool {
    let runs: Vec<Tile> = div.runs().collect();
    runs.iter().enumerate().any(|(i, t)| runs[..i].contains(t))
}

/// Runs starting 1, 4 and 7 within one sequential suit.
#[must_use]
pub fn has_full_straight(div: &Decomposition) -> bool {
    let mut kinds = [0_u8; 3];
    for t in div.runs() {
        let kind = t.as_usize() / 9;
        match t.number() {
            1 => kinds[kind] |= 0b001,
            4 => kinds[kind] |= 0b010,
            7 => kinds[kind] |= 0b100,
            _ => {}
        }
    }
    kinds.contains(&0b111)
}

/// A triplet or quad of dragons.
#[must_use]
pub fn has_dragon_set(div: &Decomposition) -> bool {
    div.sets().any(|t| t.suit() == Suit::Dragon)
}

/// A triplet or quad of winds.
#[must_use]
pub fn has_wind_set(div: &Decomposition) -> bool {
    div.sets().any(|t| t.suit() == Suit::Wind)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::decompose::decompose;
    use crate::hand::{Hand, hand};
    use crate::tile::{EAST, character};

    fn first_div(s: &str, fixed: u8) -> Decomposition {
        let h = hand(s).unwrap();
        let divs = decompose(&h, fixed);
        assert!(!divs.is_empty(), "'{s}' should decompose");
        divs.into_iter().next().unwrap()
    }

    #[test]
    fn pure_examples() {
        let mixed = Hand::from_tiles([EAST, character(3).unwrap()]);
        assert!(!is_pure(&mixed));
        assert!(is_pure(&hand("8b 3c 1o").unwrap()));
        assert!(!is_pure(&hand("3c 2d").unwrap()));
    }

    #[test]
    fn simple_and_terminal_shapes() {
        assert!(is_all_simples(&hand("234c 567b 88o").unwrap()));
        assert!(!is_all_simples(&hand("123c").unwrap()));
        assert!(!is_all_simples(&hand("234c 1w").unwrap()));
        assert!(is_all_terminals_honors(&hand("111c 999b 11w 22d").unwrap()));
        assert!(!is_all_terminals_honors(&hand("111c 2c").unwrap()));
        assert!(!is_all_terminals_honors(&Hand::new()));
    }

    #[test]
    fn suit_uniformity() {
        assert!(is_one_suit(&hand("1234567c").unwrap()));
        assert!(!is_one_suit(&hand("123c 1b").unwrap()));
        assert!(!is_one_suit(&hand("123c 11w").unwrap()));
        assert!(!is_one_suit(&hand("11w").unwrap()));
        assert!(is_mixed_one_suit(&hand("123c 11w").unwrap()));
        assert!(!is_mixed_one_suit(&hand("123c").unwrap()));
        assert!(!is_mixed_one_suit(&hand("123c 1b 11w").unwrap()));
    }

    #[test]
    fn run_shapes() {
        let div = first_div("123c 123b 456b 789o 55o", 0);
        assert!(has_all_runs(&div));
        assert!(has_mixed_double_run(&div));
        assert!(!has_triple_run(&div));
        assert!(!has_pure_double_run(&div));

        let triple = first_div("123c 123b 123o 55o", 1);
        assert!(has_triple_run(&triple));
        assert!(has_mixed_double_run(&triple));

        let double = first_div("123123c 55o", 2);
        assert!(has_pure_double_run(&double));
        assert!(!has_mixed_double_run(&double));

        let straight = first_div("123456789c 55o", 1);
        assert!(has_full_straight(&straight));
    }

    #[test]
    fn set_shapes() {
        let div = first_div("111c 222b 111w 22d", 1);
        assert!(has_all_sets(&div));
        assert!(has_wind_set(&div));
        assert!(!has_dragon_set(&div));
        assert!(!has_all_runs(&div));

        let dragons = first_div("123c 111d 55c", 2);
        assert!(has_dragon_set(&dragons));
        assert!(!has_all_sets(&dragons));
    }
}
