use crate::errors::{MahjongError, MahjongResult};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct tile kinds, bonus tiles included.
pub const TILE_KINDS: usize = 42;
/// Kinds that may participate in pairs and melds (everything except
/// flowers and seasons).
pub const STRUCTURAL_KINDS: usize = 34;

const WIND_START: u8 = 27;
const DRAGON_START: u8 = 31;
const FLOWER_START: u8 = 34;
const SEASON_START: u8 = 38;

/// A suit or pseudo-suit. The set is closed; per-variant trait data is
/// answered by const lookups rather than dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Character,
    Bamboo,
    Circle,
    Wind,
    Dragon,
    Flower,
    Season,
}

impl Suit {
    /// All suits, pseudo-suits included, in tile-order rank.
    pub const ALL: [Suit; 7] = [
        Suit::Character,
        Suit::Bamboo,
        Suit::Circle,
        Suit::Wind,
        Suit::Dragon,
        Suit::Flower,
        Suit::Season,
    ];
    /// The three "normal" suits whose tiles can form runs.
    pub const SEQUENTIAL: [Suit; 3] = [Suit::Character, Suit::Bamboo, Suit::Circle];

    #[must_use]
    pub const fn is_sequential(self) -> bool {
        matches!(self, Suit::Character | Suit::Bamboo | Suit::Circle)
    }

    /// The highest 1-based number a tile of this suit can carry.
    #[must_use]
    pub const fn max_number(self) -> u8 {
        match self {
            Suit::Character | Suit::Bamboo | Suit::Circle => 9,
            Suit::Wind | Suit::Flower | Suit::Season => 4,
            Suit::Dragon => 3,
        }
    }

    /// How many copies of each tile a standard pile carries.
    #[must_use]
    pub const fn typical_duplication(self) -> u8 {
        match self {
            Suit::Flower | Suit::Season => 1,
            _ => 4,
        }
    }

    /// The Unicode mahjong character of this suit's number-1 tile. The rest
    /// of the suit is consecutive in Unicode.
    #[must_use]
    pub const fn first_glyph(self) -> char {
        match self {
            Suit::Character => '\u{1F007}',
            Suit::Bamboo => '\u{1F010}',
            Suit::Circle => '\u{1F019}',
            Suit::Wind => '\u{1F000}',
            Suit::Dragon => '\u{1F004}',
            Suit::Flower => '\u{1F022}',
            Suit::Season => '\u{1F026}',
        }
    }

    pub(crate) const fn start(self) -> u8 {
        match self {
            Suit::Character => 0,
            Suit::Bamboo => 9,
            Suit::Circle => 18,
            Suit::Wind => WIND_START,
            Suit::Dragon => DRAGON_START,
            Suit::Flower => FLOWER_START,
            Suit::Season => SEASON_START,
        }
    }

    pub(crate) const fn letter(self) -> char {
        match self {
            Suit::Character => 'c',
            Suit::Bamboo => 'b',
            Suit::Circle => 'o',
            Suit::Wind => 'w',
            Suit::Dragon => 'd',
            Suit::Flower => 'f',
            Suit::Season => 's',
        }
    }

    pub(crate) fn from_letter(c: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.letter() == c)
    }
}

/// An immutable tile value, stored as a dense id in `0..TILE_KINDS`.
/// Identical (suit, number) pairs are indistinguishable; the derived order
/// is suit rank first, number second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tile(u8);

pub const EAST: Tile = Tile(WIND_START);
pub const SOUTH: Tile = Tile(WIND_START + 1);
pub const WEST: Tile = Tile(WIND_START + 2);
pub const NORTH: Tile = Tile(WIND_START + 3);
pub const RED: Tile = Tile(DRAGON_START);
pub const GREEN: Tile = Tile(DRAGON_START + 1);
pub const WHITE: Tile = Tile(DRAGON_START + 2);

impl Tile {
    /// Construct from a suit and a 1-based number.
    pub fn new(suit: Suit, number: u8) -> MahjongResult<Self> {
        if number == 0 || number > suit.max_number() {
            return Err(MahjongError::InvalidTile {
                message: format!(
                    "number {number} out of range [1, {}] for {suit:?}",
                    suit.max_number()
                ),
            });
        }
        Ok(Tile(suit.start() + number - 1))
    }

    /// Look a tile up by its conventional English name, e.g. `"east"`,
    /// `"east wind"`, `"red"` or `"red dragon"`.
    pub fn from_name(name: &str) -> MahjongResult<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let bare = lower
            .strip_suffix(" wind")
            .or_else(|| lower.strip_suffix(" dragon"))
            .unwrap_or(&lower);
        match bare {
            "east" => Ok(EAST),
            "south" => Ok(SOUTH),
            "west" => Ok(WEST),
            "north" => Ok(NORTH),
            "red" => Ok(RED),
            "green" => Ok(GREEN),
            "white" => Ok(WHITE),
            _ => Err(MahjongError::InvalidTile {
                message: format!("unrecognized tile name '{name}'"),
            }),
        }
    }

    pub(crate) fn from_id(id: u8) -> Self {
        debug_assert!((id as usize) < TILE_KINDS);
        Tile(id)
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..9 => Suit::Character,
            9..18 => Suit::Bamboo,
            18..27 => Suit::Circle,
            27..31 => Suit::Wind,
            31..34 => Suit::Dragon,
            34..38 => Suit::Flower,
            _ => Suit::Season,
        }
    }

    /// 1-based number within the suit.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 - self.suit().start() + 1
    }

    /// Winds and dragons.
    #[must_use]
    pub const fn is_honor(self) -> bool {
        self.0 >= WIND_START && self.0 < FLOWER_START
    }

    /// Flowers and seasons. Bonus tiles never join pairs or melds.
    #[must_use]
    pub const fn is_bonus(self) -> bool {
        self.0 >= FLOWER_START
    }

    /// 1 or 9 of a sequential suit.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.suit().is_sequential() && matches!(self.number(), 1 | 9)
    }

    /// The Unicode mahjong character for this tile.
    #[must_use]
    pub fn glyph(self) -> char {
        char::from_u32(self.suit().first_glyph() as u32 + u32::from(self.number()) - 1)
            .unwrap_or('\u{FFFD}')
    }
}

/// Creates a tile of the character suit with the given number.
pub fn character(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Character, number)
}

/// Creates a tile of the bamboo suit with the given number.
pub fn bamboo(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Bamboo, number)
}

/// Creates a tile of the circle suit with the given number.
pub fn circle(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Circle, number)
}

/// Creates a wind tile in the standard ordering (1 east, 2 south, 3 west,
/// 4 north).
pub fn wind(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Wind, number)
}

/// Creates a dragon tile in the standard ordering (1 red, 2 green, 3 white).
pub fn dragon(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Dragon, number)
}

/// Creates a flower tile with the given number.
pub fn flower(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Flower, number)
}

/// Creates a season tile with the given number.
pub fn season(number: u8) -> MahjongResult<Tile> {
    Tile::new(Suit::Season, number)
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number(), self.suit().letter())
    }
}

impl FromStr for Tile {
    type Err = MahjongError;

    fn from_str(s: &str) -> MahjongResult<Self> {
        let invalid = || MahjongError::InvalidTile {
            message: format!("cannot parse tile notation '{s}'"),
        };
        let suit = s
            .chars()
            .next_back()
            .and_then(Suit::from_letter)
            .ok_or_else(invalid)?;
        let number: u8 = s[..s.len() - 1].parse().map_err(|_| invalid())?;
        Tile::new(suit, number)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn suit_metadata() {
        assert!(Suit::Character.is_sequential());
        assert!(!Suit::Wind.is_sequential());
        assert_eq!(Suit::Circle.max_number(), 9);
        assert_eq!(Suit::Wind.max_number(), 4);
        assert_eq!(Suit::Dragon.max_number(), 3);
        assert_eq!(Suit::Flower.typical_duplication(), 1);
        assert_eq!(Suit::Bamboo.typical_duplication(), 4);
        assert_eq!(Suit::Character.first_glyph(), '🀇');
    }

    #[test]
    fn construction_and_glyphs() {
        // Glyph vectors straight from the suit tables.
        assert_eq!(character(5).unwrap().glyph(), '🀋');
        assert_eq!(bamboo(2).unwrap().glyph(), '🀑');
        assert_eq!(circle(9).unwrap().glyph(), '🀡');
        assert_eq!(NORTH.glyph(), '🀃');
        assert_eq!(GREEN.glyph(), '🀅');
        assert_eq!(flower(2).unwrap().glyph(), '🀣');
        assert_eq!(season(4).unwrap().glyph(), '🀩');
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            character(10),
            Err(MahjongError::InvalidTile { .. })
        ));
        assert!(matches!(wind(5), Err(MahjongError::InvalidTile { .. })));
        assert!(matches!(dragon(0), Err(MahjongError::InvalidTile { .. })));
        assert!(matches!(
            Tile::from_name("blue dragon"),
            Err(MahjongError::InvalidTile { .. })
        ));
    }

    #[test]
    fn named_lookup() {
        assert_eq!(Tile::from_name("east").unwrap(), EAST);
        assert_eq!(Tile::from_name("East Wind").unwrap(), EAST);
        assert_eq!(Tile::from_name("red dragon").unwrap(), RED);
        assert_eq!(Tile::from_name("white").unwrap(), WHITE);
        assert_eq!(EAST, wind(1).unwrap());
        assert_eq!(WHITE, dragon(3).unwrap());
    }

    #[test]
    fn total_order() {
        assert!(character(9).unwrap() < bamboo(1).unwrap());
        assert!(bamboo(8).unwrap() < circle(1).unwrap());
        assert!(circle(3).unwrap() < circle(6).unwrap());
        assert!(circle(9).unwrap() < EAST);
        assert!(NORTH < RED);
        assert!(WHITE < flower(1).unwrap());
    }

    #[test]
    fn notation_round_trip() {
        for id in 0..TILE_KINDS as u8 {
            let tile = Tile::from_id(id);
            let back: Tile = tile.to_string().parse().unwrap();
            assert_eq!(back, tile);
        }
        assert_eq!("3c".parse::<Tile>().unwrap(), character(3).unwrap());
        assert_eq!("1w".parse::<Tile>().unwrap(), EAST);
        assert!("0c".parse::<Tile>().is_err());
        assert!("5x".parse::<Tile>().is_err());
        assert!("".parse::<Tile>().is_err());
    }

    #[test]
    fn serde_as_notation() {
        let tile = circle(7).unwrap();
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(json, "\"7o\"");
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
