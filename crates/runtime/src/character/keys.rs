//! Storage keys, canonical and legacy.

/// Canonical key for the character list.
pub const CHARACTERS_KEY: &str = "whackybeanz-characters";

/// Canonical key for the current-character pointer.
pub const CURRENT_CHARACTER_KEY: &str = "whackybeanz-current-character";

/// Mirror of the current pointer read by exports.
pub const LAST_LOADED_KEY: &str = "lastLoadedChar";

/// Alternate list keys written by older releases, in lookup order.
pub const LEGACY_CHARACTER_KEYS: [&str; 4] = [
    "whackybeanz_characters",
    "characters",
    "savedCharacters",
    "characterData",
];

/// Alternate pointer keys written by older releases, in lookup order.
pub const LEGACY_CURRENT_KEYS: [&str; 3] = [
    "whackybeanz_current_character",
    "currentCharacter",
    LAST_LOADED_KEY,
];

/// Every key read when the manager loads.
pub fn lookup_keys() -> Vec<&'static str> {
    std::iter::once(CHARACTERS_KEY)
        .chain(LEGACY_CHARACTER_KEYS)
        .chain(std::iter::once(CURRENT_CHARACTER_KEY))
        .chain(LEGACY_CURRENT_KEYS)
        .collect()
}
