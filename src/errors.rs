use std::fmt;

/// Error taxonomy of the library. All variants signal programmer or
/// configuration mistakes raised synchronously at the offending call; a hand
/// that simply fails to win is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MahjongError {
    /// Tile construction with an out-of-range number or unrecognized name.
    InvalidTile { message: String },
    /// A pile removal requested more tiles than remain.
    InsufficientTiles { requested: usize, remaining: usize },
    /// A rule configuration references a pattern id missing from the catalog.
    UnknownPattern { pattern: String },
}

impl fmt::Display for MahjongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MahjongError::InvalidTile { message } => {
                write!(f, "invalid tile: {message}")
            }
            MahjongError::InsufficientTiles {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "insufficient tiles: requested {requested} but only {remaining} remain"
                )
            }
            MahjongError::UnknownPattern { pattern } => {
                write!(f, "unknown pattern in rule configuration: '{pattern}'")
            }
        }
    }
}

impl std::error::Error for MahjongError {}

pub type MahjongResult<T> = Result<T, MahjongError>;
