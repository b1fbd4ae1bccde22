//! Decoded SFO fields interpreted by the catalog

/// SFO key holding the human-readable title
pub const KEY_TITLE: &str = "TITLE";
/// SFO key holding the package class code (`gd`, `gp`, `ac`, ...)
pub const KEY_CATEGORY: &str = "CATEGORY";
/// SFO key holding the title identifier
pub const KEY_TITLE_ID: &str = "TITLE_ID";

/// The three SFO fields with catalog meaning
///
/// Every field is optional: a block may omit any key, and a partially
/// decodable block yields whatever was read before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfoFields {
    /// Human-readable title (`TITLE`)
    pub title: Option<String>,
    /// Package class code (`CATEGORY`): `gd`/`gde` base game data,
    /// `gp` patch, `ac` additional content
    pub category: Option<String>,
    /// Title identifier (`TITLE_ID`)
    pub title_id: Option<String>,
}

impl SfoFields {
    /// Store a decoded key/value pair, ignoring unknown keys
    pub(crate) fn set(&mut self, key: &str, value: String) {
        match key {
            KEY_TITLE => self.title = Some(value),
            KEY_CATEGORY => self.category = Some(value),
            KEY_TITLE_ID => self.title_id = Some(value),
            _ => {}
        }
    }

    /// True when no field was decoded
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.title_id.is_none()
    }
}
