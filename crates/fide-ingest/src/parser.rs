//! Feed decoder for the federation XML player list
//!
//! The feed looks like:
//!
//! ```xml
//! <playerslist>
//!   <player>
//!     <fideid>1503014</fideid>
//!     <name>Carlsen, Magnus</name>
//!     <country>NOR</country>
//!     <rating>2830</rating>
//!     <k></k>
//!     ...
//!   </player>
//! </playerslist>
//! ```
//!
//! Unknown elements are ignored, at player level and between players. When a
//! player repeats an element the last one wins. Absent text fields decode as
//! `""`, absent or empty numeric fields as `0`. Surrounding whitespace is
//! trimmed from every value, so a blank `<name>` reads as empty. `fideid` is
//! required. Decoding is all or nothing: any error discards the whole
//! document.

use crate::error::{IngestError, Result};
use fide_common::{PlayerFeedDocument, PlayerRecord};
use quick_xml::events::Event;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::debug;

/// Name of the element wrapping all players
pub const ROOT_ELEMENT: &str = "playerslist";

pub struct FeedParser;

impl FeedParser {
    /// Decode raw feed bytes into a document, preserving feed order
    #[tracing::instrument(skip_all, fields(bytes = content.len()))]
    pub fn parse(content: &[u8]) -> Result<PlayerFeedDocument> {
        let text = std::str::from_utf8(content)?;

        let root = root_element(text)?;
        if root != ROOT_ELEMENT {
            return Err(IngestError::Parse(format!(
                "expected root element <{}>, found <{}>",
                ROOT_ELEMENT, root
            )));
        }

        let list: PlayersList = quick_xml::de::from_str(text)?;
        let players: Vec<PlayerRecord> = list.players.into_iter().map(|p| p.0).collect();

        debug!(players = players.len(), "Decoded player list");
        Ok(PlayerFeedDocument::new(players))
    }
}

/// Local name of the first element in the document
fn root_element(text: &str) -> Result<String> {
    let mut reader = quick_xml::Reader::from_str(text);

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            },
            Event::Eof => {
                return Err(IngestError::Parse("document has no root element".to_string()));
            },
            _ => continue,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayersList {
    #[serde(rename = "player", default)]
    players: Vec<FeedPlayer>,
}

/// Child elements of `<player>` that map onto record fields
const PLAYER_FIELDS: &[&str] = &[
    "fideid",
    "name",
    "country",
    "sex",
    "title",
    "w_title",
    "o_title",
    "foa_title",
    "rating",
    "games",
    "k",
    "rapid_rating",
    "rapid_games",
    "rapid_k",
    "blitz_rating",
    "blitz_games",
    "blitz_k",
    "birthday",
    "flag",
];

/// One `<player>` element as it appears on the wire
///
/// Unknown children are skipped whatever their content. A repeated known
/// child overrides the earlier one.
#[derive(Debug)]
struct FeedPlayer(PlayerRecord);

impl<'de> Deserialize<'de> for FeedPlayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_struct("player", PLAYER_FIELDS, FeedPlayerVisitor)
    }
}

struct FeedPlayerVisitor;

impl<'de> Visitor<'de> for FeedPlayerVisitor {
    type Value = FeedPlayer;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a <player> element")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<FeedPlayer, A::Error> {
        let mut fields: HashMap<String, String> = HashMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if PLAYER_FIELDS.contains(&key.as_str()) {
                let value = map.next_value::<String>()?;
                fields.insert(key, value);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        record_from_fields(fields)
            .map(FeedPlayer)
            .map_err(de::Error::custom)
    }
}

fn record_from_fields(mut fields: HashMap<String, String>) -> std::result::Result<PlayerRecord, String> {
    let fide_id = match fields.remove("fideid") {
        Some(raw) => required_number("fideid", &raw)?,
        None => return Err("missing field `fideid`".to_string()),
    };

    let mut text = |name: &str| fields.remove(name).unwrap_or_default();

    Ok(PlayerRecord {
        fide_id,
        name: text("name"),
        country: text("country"),
        sex: text("sex"),
        title: text("title"),
        w_title: text("w_title"),
        o_title: text("o_title"),
        foa_title: text("foa_title"),
        rating: lenient_number("rating", &text("rating"))?,
        games: lenient_number("games", &text("games"))?,
        k: lenient_number("k", &text("k"))?,
        rapid_rating: lenient_number("rapid_rating", &text("rapid_rating"))?,
        rapid_games: lenient_number("rapid_games", &text("rapid_games"))?,
        rapid_k: lenient_number("rapid_k", &text("rapid_k"))?,
        blitz_rating: lenient_number("blitz_rating", &text("blitz_rating"))?,
        blitz_games: lenient_number("blitz_games", &text("blitz_games"))?,
        blitz_k: lenient_number("blitz_k", &text("blitz_k"))?,
        birthday: lenient_number("birthday", &text("birthday"))?,
        flag: text("flag"),
    })
}

/// Numeric element whose empty text means zero (`<k></k>`, `<birthday/>`)
fn lenient_number<T>(field: &str, raw: &str) -> std::result::Result<T, String>
where
    T: FromStr + Default,
    T::Err: Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    parse_number(field, trimmed)
}

fn required_number<T>(field: &str, raw: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("empty value for required field `{}`", field));
    }
    parse_number(field, trimmed)
}

fn parse_number<T>(field: &str, text: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse()
        .map_err(|e| format!("invalid number '{}' in <{}>: {}", text, field, e))
}
