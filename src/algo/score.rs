//! Turns decompositions, pattern matches and a rule configuration into a
//! win verdict and a point total.
use super::decompose::decompose;
use super::patterns::{CATALOG, Predicate, lookup};
use crate::errors::{MahjongError, MahjongResult};
use crate::hand::Hand;
use ahash::AHashMap;
use log::trace;
use serde::{Deserialize, Serialize};

/// Point values per pattern, the win threshold and the exclusivity table.
/// Plain data so hosts can ship variants as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Pattern id to point value. Only listed patterns are evaluated.
    pub points: AHashMap<String, i32>,
    /// Minimum point total for a structurally valid hand to count as a win.
    pub win_threshold: i32,
    /// Specific pattern id to the more general ids it suppresses when both
    /// are satisfied at once.
    #[serde(default)]
    pub exclusions: AHashMap<String, Vec<String>>,
}

impl RuleConfig {
    /// A conventional point-counting table over the full catalog.
    #[must_use]
    pub fn standard() -> Self {
        let points = [
            ("pure", 1),
            ("all_simples", 1),
            ("one_suit", 7),
            ("mixed_one_suit", 3),
            ("all_terminals_honors", 4),
            ("all_runs", 1),
            ("all_sets", 3),
            ("mixed_double_run", 1),
            ("triple_run", 2),
            ("pure_double_run", 1),
            ("full_straight", 2),
            ("dragon_set", 1),
            ("wind_set", 1),
        ]
        .into_iter()
        .map(|(id, v)| (id.to_owned(), v))
        .collect();
        let exclusions = [
            // A one-suit hand is pure by construction.
            ("one_suit", vec!["pure"]),
            ("triple_run", vec!["mixed_double_run"]),
            // Terminal-only melds cannot be runs.
            ("all_terminals_honors", vec!["all_sets"]),
        ]
        .into_iter()
        .map(|(id, v)| (id.to_owned(), v.into_iter().map(str::to_owned).collect()))
        .collect();
        Self {
            points,
            win_threshold: 3,
            exclusions,
        }
    }

    /// Reject any pattern id the catalog does not know.
    pub fn validate(&self) -> MahjongResult<()> {
        let ids = self
            .points
            .keys()
            .chain(self.exclusions.keys())
            .chain(self.exclusions.values().flatten());
        for id in ids {
            if lookup(id).is_none() {
                return Err(MahjongError::UnknownPattern {
                    pattern: id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The outcome of scoring one hand: whether it is a legal win, the point
/// total of its best decomposition and the patterns that decomposition
/// matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_winning: bool,
    pub points: i32,
    pub patterns: Vec<&'static str>,
}

/// Score a hand under a rule configuration. Every candidate decomposition is
/// evaluated against all configured patterns; the hand is scored by its best
/// reading. A hand with no decomposition at all, or one below the threshold,
/// is a normal non-winning verdict, not an error.
pub fn score(hand: &Hand, fixed_melds: u8, cfg: &RuleConfig) -> MahjongResult<Verdict> {
    cfg.validate()?;
    let mut divs = decompose(hand, fixed_melds);
    // Canonical order so ties between equal-scoring readings resolve the
    // same way on every call.
    divs.sort_unstable_by_key(|d| (d.pair, d.melds));
    let mut points = 0;
    let mut patterns = vec![];
    let mut is_winning = false;
    for div in divs {
        let mut matched: Vec<&'static str> = CATALOG
            .iter()
            .filter(|p| cfg.points.contains_key(p.id))
            .filter(|p| match p.predicate {
                Predicate::Global(f) => f(hand),
                Predicate::Local(f) => f(&div),
            })
            .map(|p| p.id)
            .collect();
        let suppressed: Vec<&str> = matched
            .iter()
            .filter_map(|id| cfg.exclusions.get(*id))
            .flatten()
            .map(String::as_str)
            .collect();
        matched.retain(|id| !suppressed.contains(id));
        let total: i32 = matched.iter().map(|id| cfg.points[*id]).sum();
        trace!("[{div}] scores {total} via {matched:?}");
        if !is_winning || total > points {
            points = total;
            patterns = matched;
            is_winning = true;
        }
    }
    if points < cfg.win_threshold {
        is_winning = false;
    }
    Ok(Verdict {
        is_winning,
        points,
        patterns,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hand::hand;

    fn flat_config(entries: &[(&str, i32)], threshold: i32) -> RuleConfig {
        RuleConfig {
            points: entries
                .iter()
                .map(|&(id, v)| (id.to_owned(), v))
                .collect(),
            win_threshold: threshold,
            exclusions: AHashMap::new(),
        }
    }

    #[test]
    fn non_winning_hand_is_not_an_error() {
        let h = hand("123c 456c 789c 111b 2b").unwrap();
        let verdict = score(&h, 0, &RuleConfig::standard()).unwrap();
        assert!(!verdict.is_winning);
        assert_eq!(verdict.points, 0);
        assert!(verdict.patterns.is_empty());
    }

    #[test]
    fn threshold_boundary() {
        let h = hand("123c 123b 456b 789o 55o").unwrap();
        // all_runs + mixed_double_run = 2 points.
        let cfg = flat_config(&[("all_runs", 1), ("mixed_double_run", 1)], 2);
        let verdict = score(&h, 0, &cfg).unwrap();
        assert!(verdict.is_winning);
        assert_eq!(verdict.points, 2);

        let below = flat_config(&[("all_runs", 1), ("mixed_double_run", 1)], 3);
        let verdict = score(&h, 0, &below).unwrap();
        assert!(!verdict.is_winning);
        assert_eq!(verdict.points, 2);
        assert_eq!(verdict.patterns, vec!["all_runs", "mixed_double_run"]);

        let above = flat_config(&[("all_runs", 1), ("mixed_double_run", 1)], 1);
        assert!(score(&h, 0, &above).unwrap().is_winning);
    }

    #[test]
    fn best_reading_governs() {
        // Sets reading: pure + all_simples = 2. Runs reading adds all_runs
        // and pure_double_run for 4.
        let h = hand("222333444c 567b 88o").unwrap();
        let verdict = score(&h, 0, &RuleConfig::standard()).unwrap();
        assert!(verdict.is_winning);
        assert_eq!(verdict.points, 4);
        assert!(verdict.patterns.contains(&"pure_double_run"));
        assert!(verdict.patterns.contains(&"all_runs"));
    }

    #[test]
    fn exclusions_suppress_general_patterns() {
        let h = hand("111222333444c 55c").unwrap();
        let verdict = score(&h, 0, &RuleConfig::standard()).unwrap();
        assert!(verdict.is_winning);
        assert!(verdict.patterns.contains(&"one_suit"));
        assert!(!verdict.patterns.contains(&"pure"));
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let h = hand("123c 456c 789c 111b 22b").unwrap();
        let mut cfg = RuleConfig::standard();
        cfg.points.insert("thirteen_orphans".to_owned(), 13);
        assert_eq!(
            score(&h, 0, &cfg),
            Err(MahjongError::UnknownPattern {
                pattern: "thirteen_orphans".to_owned(),
            })
        );

        let mut cfg = RuleConfig::standard();
        cfg.exclusions
            .insert("one_suit".to_owned(), vec!["nine_gates".to_owned()]);
        assert!(score(&h, 0, &cfg).is_err());
    }

    #[test]
    fn config_round_trips_as_json() {
        let json = r#"{
            "points": {"all_sets": 3, "dragon_set": 1},
            "win_threshold": 3
        }"#;
        let cfg: RuleConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.exclusions.is_empty());
        let h = hand("111c 999b 111d 111w 99o").unwrap();
        let verdict = score(&h, 0, &cfg).unwrap();
        assert!(verdict.is_winning);
        assert_eq!(verdict.points, 4);
    }

    #[test]
    fn zero_threshold_still_requires_a_decomposition() {
        // A structurally invalid hand never wins, no matter how low the bar.
        let h = hand("123c 456c 789c 111b 2b").unwrap();
        let cfg = flat_config(&[("all_runs", 1)], 0);
        let verdict = score(&h, 0, &cfg).unwrap();
        assert!(!verdict.is_winning);
        assert_eq!(verdict.points, 0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let h = hand("111222333c 44c 567b").unwrap();
        let cfg = RuleConfig::standard();
        let first = score(&h, 0, &cfg).unwrap();
        let second = score(&h, 0, &cfg).unwrap();
        assert_eq!(first, second);
    }
}
