//! Decoding of the full-status payload.
//!
//! Layout after the echoed header: an 11 byte preamble, NUL separated
//! key/value tokens, the player section marker, NUL separated player names
//! and a 2 byte terminator.

use log::debug;

use super::packet::Opcode;
use crate::error::QueryError;
use crate::models::server::{ServerStatus, VANILLA_SOFTWARE};
use crate::utils::coerce_int;

pub const PREAMBLE_LEN: usize = 11;
pub const PLAYER_SECTION_MARKER: &[u8] = b"\x00\x00\x01player_\x00\x00";
pub const PLAYER_SECTION_TERMINATOR_LEN: usize = 2;

const SOFTWARE_SEPARATOR: &str = ": ";
const PLUGIN_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Motd,
    GameType,
    Version,
    Plugins,
    Map,
    Current,
    Max,
    Port,
    Host,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "hostname" => Some(Self::Motd),
            "gametype" => Some(Self::GameType),
            "version" => Some(Self::Version),
            "plugins" => Some(Self::Plugins),
            "map" => Some(Self::Map),
            "numplayers" => Some(Self::Current),
            "maxplayers" => Some(Self::Max),
            "hostport" => Some(Self::Port),
            "hostip" => Some(Self::Host),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Tracking(Field),
    Skipping,
}

/// Key/value fields as the server sent them, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub motd: Option<String>,
    pub game_type: Option<String>,
    pub version: Option<String>,
    pub plugins: Option<String>,
    pub map: Option<String>,
    pub current: Option<String>,
    pub max: Option<String>,
    pub port: Option<String>,
    pub host: Option<String>,
}

impl RawFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Motd => &mut self.motd,
            Field::GameType => &mut self.game_type,
            Field::Version => &mut self.version,
            Field::Plugins => &mut self.plugins,
            Field::Map => &mut self.map,
            Field::Current => &mut self.current,
            Field::Max => &mut self.max,
            Field::Port => &mut self.port,
            Field::Host => &mut self.host,
        }
    }
}

/// Walks a flat `key, value, key, value, ...` token list.
///
/// Even positions are keys. An allow-listed key resets its field to `""` and
/// the next value fills it; any other key puts the walker in `Skipping` until
/// a known key shows up again.
#[derive(Debug)]
pub struct KeyWalker {
    state: WalkState,
    fields: RawFields,
}

impl Default for KeyWalker {
    fn default() -> Self {
        Self {
            state: WalkState::Skipping,
            fields: RawFields::default(),
        }
    }
}

impl KeyWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    pub fn key(&mut self, token: &str) {
        self.state = match Field::from_key(token) {
            Some(field) => {
                *self.fields.slot(field) = Some(String::new());
                WalkState::Tracking(field)
            }
            None => {
                debug!("Skipping unknown status key {:?}", token);
                WalkState::Skipping
            }
        };
    }

    pub fn value(&mut self, token: &str) {
        if let WalkState::Tracking(field) = self.state {
            *self.fields.slot(field) = Some(token.to_string());
        }
    }

    pub fn walk<'a, I>(mut self, tokens: I) -> RawFields
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (index, token) in tokens.into_iter().enumerate() {
            if index % 2 == 0 {
                self.key(token);
            } else {
                self.value(token);
            }
        }
        self.fields
    }

    pub fn finish(self) -> RawFields {
        self.fields
    }
}

/// Non-overlapping split on a multi-byte delimiter.
pub fn split_on<'a>(haystack: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i + delimiter.len() <= haystack.len() {
        if &haystack[i..i + delimiter.len()] == delimiter {
            parts.push(&haystack[start..i]);
            i += delimiter.len();
            start = i;
        } else {
            i += 1;
        }
    }
    parts.push(&haystack[start..]);
    parts
}

fn tokens(section: &[u8]) -> Vec<String> {
    section
        .split(|b| *b == 0x00)
        .map(|token| String::from_utf8_lossy(token).into_owned())
        .collect()
}

/// Splits the payload (preamble removed) into key/value and player sections.
pub fn split_sections(data: &[u8]) -> Result<(&[u8], &[u8]), QueryError> {
    let parts = split_on(data, PLAYER_SECTION_MARKER);
    match parts.as_slice() {
        [key_values, players] => Ok((*key_values, *players)),
        _ => Err(QueryError::Parse {
            stage: Opcode::Status,
            reason: format!(
                "expected one player section marker, found {}",
                parts.len() - 1
            ),
        }),
    }
}

pub fn parse_players(section: &[u8]) -> Vec<String> {
    let end = section.len().saturating_sub(PLAYER_SECTION_TERMINATOR_LEN);
    let names = &section[..end];
    if names.is_empty() {
        return Vec::new();
    }
    tokens(names)
}

/// Fills `software`, `plugins` and `raw_plugins` from the raw `plugins` value.
pub fn apply_plugins(status: &mut ServerStatus, raw: Option<String>) {
    let raw = match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => raw,
        None => {
            status.software = VANILLA_SOFTWARE.to_string();
            return;
        }
    };

    match raw.split_once(SOFTWARE_SEPARATOR) {
        Some((software, plugins)) => {
            status.software = software.to_string();
            status.plugins = plugins.split(PLUGIN_SEPARATOR).map(str::to_string).collect();
        }
        None => status.software = raw.clone(),
    }
    status.raw_plugins = Some(raw);
}

fn coerce<T: TryFrom<i64>>(raw: Option<&str>) -> T
where
    T: Default,
{
    raw.map(coerce_int)
        .and_then(|value| T::try_from(value).ok())
        .unwrap_or_default()
}

pub fn decode_fields(fields: RawFields, players: Vec<String>) -> ServerStatus {
    let mut status = ServerStatus {
        current: coerce(fields.current.as_deref()),
        max: coerce(fields.max.as_deref()),
        port: coerce(fields.port.as_deref()),
        motd: fields.motd,
        game_type: fields.game_type,
        version: fields.version,
        map: fields.map,
        host: fields.host,
        players,
        ..ServerStatus::default()
    };
    apply_plugins(&mut status, fields.plugins);
    status
}

/// Decodes a full-status payload (echoed header already stripped).
pub fn parse_status(payload: &[u8]) -> Result<ServerStatus, QueryError> {
    let data = payload.get(PREAMBLE_LEN..).unwrap_or_default();
    let (key_values, player_section) = split_sections(data)?;

    let players = parse_players(player_section);
    let tokens = tokens(key_values);
    let fields = KeyWalker::new().walk(tokens.iter().map(String::as_str));

    Ok(decode_fields(fields, players))
}
