use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::page::PageSnapshot;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Opaque character identifier, `char_<unix millis>_<9 base-36 chars>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id stamped with `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
            .collect();
        Self(format!("char_{}_{}", now.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A saved calculator profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(with = "timestamp")]
    pub date_saved: DateTime<Utc>,
    #[serde(default)]
    pub data: PageSnapshot,
}

impl Character {
    pub fn new(name: impl Into<String>, data: PageSnapshot) -> Self {
        let now = now();
        Self {
            id: CharacterId::generate(now),
            name: name.into(),
            date_saved: now,
            data,
        }
    }

    /// Replace the snapshot and refresh the save time.
    pub fn refresh(&mut self, data: PageSnapshot) {
        self.data = data;
        self.date_saved = now();
    }

    /// Case-insensitive name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Current time at millisecond precision, matching the stored format.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn generated_ids_follow_the_stored_format() {
        let now = now();
        let id = CharacterId::generate(now);
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "char");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_ne!(id, CharacterId::generate(now));
    }

    #[test]
    fn character_wire_format() {
        let value = json!({
            "id": "char_1700000000000_abc123xyz",
            "name": "Hero",
            "dateSaved": "2023-11-14T22:13:20.000Z",
            "data": { "equips": "{}" }
        });

        let character: Character = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(character.id.as_str(), "char_1700000000000_abc123xyz");
        assert_eq!(character.date_saved.timestamp(), 1_700_000_000);
        assert_eq!(serde_json::to_value(&character).unwrap(), value);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let character = Character::new("Hero", PageSnapshot::new());
        assert!(character.has_name("hERO"));
        assert!(!character.has_name("Heroine"));
    }
}
