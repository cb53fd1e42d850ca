//! The core engines: hand decomposition, the pattern catalog and scoring.
pub mod decompose;
pub mod patterns;
pub mod score;

pub use decompose::{Decomposition, Meld, decompose};
pub use patterns::{CATALOG, Pattern, Predicate};
pub use score::{RuleConfig, Verdict, score};
