//! Player record schema
//!
//! `PlayerRecord` is the typed shape of one rated player as it travels from the
//! federation feed into the store and back out over HTTP. Serialized names
//! match the feed tags (`fideid`, `w_title`, ...) so the JSON served by the
//! lookup API mirrors the feed one-to-one.

use serde::{Deserialize, Serialize};

/// One federation-rated individual
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    /// Stable FIDE identifier, primary key in the store
    #[serde(rename = "fideid")]
    pub fide_id: u64,

    pub name: String,
    pub country: String,
    pub sex: String,

    pub title: String,
    pub w_title: String,
    pub o_title: String,
    pub foa_title: String,

    /// Standard (classical) rating
    pub rating: u32,
    pub games: u32,
    pub k: u8,

    pub rapid_rating: u32,
    pub rapid_games: u32,
    pub rapid_k: u8,

    pub blitz_rating: u32,
    pub blitz_games: u32,
    pub blitz_k: u8,

    /// Birth year, 0 when unknown
    pub birthday: u16,
    /// Status marker such as `i` (inactive) or `w` (woman inactive)
    pub flag: String,
}

impl PlayerRecord {
    /// A record is admissible for loading when it names a player who has
    /// played at least one standard rated game.
    pub fn is_admissible(&self) -> bool {
        !self.name.is_empty() && self.games > 0
    }
}

/// All player records of one feed snapshot, in feed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFeedDocument {
    pub players: Vec<PlayerRecord>,
}

impl PlayerFeedDocument {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.players.iter()
    }
}

impl IntoIterator for PlayerFeedDocument {
    type Item = PlayerRecord;
    type IntoIter = std::vec::IntoIter<PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlayerFeedDocument {
    type Item = &'a PlayerRecord;
    type IntoIter = std::slice::Iter<'a, PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
