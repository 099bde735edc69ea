//! Import and export of character data.
//!
//! Exports are a single JSON document:
//!
//! ```json
//! { "characters": [...], "expandFlames": false, "lastLoadedChar": "char_..." }
//! ```
//!
//! Imports also accept the older field names `characterManagement` and
//! `expandFlamesTable`. A document is fully validated before anything is
//! written, so a rejected import leaves the store untouched.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::character::{Character, CharacterError, CharacterId, CharacterManager};
use crate::page::{self, PageStorage};
use crate::repository::{KeyValueStore, RepositoryError, StoreMap};
use crate::settings;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid import document: {0}")]
    ImportFormat(String),

    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, TransferError>;

/// Exported character data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub characters: Vec<Character>,
    pub expand_flames: bool,
    /// Empty when no character is selected.
    pub last_loaded_char: String,
}

impl ExportDocument {
    /// Capture the manager's characters and selection with the page's
    /// expand-flames preference.
    pub fn capture<S, P>(manager: &CharacterManager<S, P>) -> Result<Self>
    where
        S: KeyValueStore,
        P: PageStorage,
    {
        Ok(Self {
            characters: manager.characters().to_vec(),
            expand_flames: settings::read_expand_flames(manager.page())?,
            last_loaded_char: manager
                .current_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| RepositoryError::from(err).into())
    }
}

/// Download name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("whackybeanz-data-{}.json", date.format("%Y-%m-%d"))
}

/// A validated import, ready to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportPlan {
    pub characters: Option<Vec<Character>>,
    pub expand_flames: Option<bool>,
    pub last_loaded_char: Option<CharacterId>,
}

impl ImportPlan {
    /// Validate an import document.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| TransferError::ImportFormat(format!("malformed JSON: {err}")))?;
        let Value::Object(mut doc) = value else {
            return Err(TransferError::ImportFormat(
                "top level must be an object".into(),
            ));
        };

        let characters = match take_either(&mut doc, "characters", "characterManagement") {
            None => None,
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .map(serde_json::from_value::<Character>)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|err| {
                        TransferError::ImportFormat(format!("invalid character entry: {err}"))
                    })?,
            ),
            Some(_) => {
                return Err(TransferError::ImportFormat(
                    "character list must be an array".into(),
                ));
            }
        };

        // Only a boolean flag is applied; other values are ignored.
        let expand_flames = match doc.get("expandFlames") {
            Some(value) => value.as_bool(),
            None => doc.get("expandFlamesTable").and_then(Value::as_bool),
        };

        if characters.is_none() && expand_flames.is_none() {
            return Err(TransferError::ImportFormat(
                "no characters or settings found".into(),
            ));
        }

        let last_loaded_char = doc
            .get("lastLoadedChar")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(CharacterId::from);

        Ok(Self {
            characters,
            expand_flames,
            last_loaded_char,
        })
    }

    /// Character selected after import. An exported selection is used only
    /// if it is part of the import; without one the first character is taken.
    pub fn selection(&self) -> Option<&Character> {
        let characters = self.characters.as_ref()?;
        match &self.last_loaded_char {
            Some(id) => characters.iter().find(|c| &c.id == id),
            None => characters.first(),
        }
    }
}

/// Outcome of an applied import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub selected: Option<String>,
    pub expand_flames: Option<bool>,
}

/// Parse and apply an import document.
pub async fn import<S, P>(manager: &mut CharacterManager<S, P>, text: &str) -> Result<ImportSummary>
where
    S: KeyValueStore,
    P: PageStorage,
{
    let plan = ImportPlan::parse(text)?;
    apply_import(manager, plan).await
}

/// Apply a validated import.
///
/// The page is written first and the store last. If either step fails the
/// page is put back, so a failed import changes nothing.
pub async fn apply_import<S, P>(
    manager: &mut CharacterManager<S, P>,
    plan: ImportPlan,
) -> Result<ImportSummary>
where
    S: KeyValueStore,
    P: PageStorage,
{
    let selected = plan.selection().cloned();
    let previous = page::snapshot(manager.page())?;

    if let Err(err) = write_page(manager.page(), &plan, selected.as_ref()) {
        page::roll_back(manager.page(), &previous);
        return Err(err);
    }

    let mut summary = ImportSummary {
        expand_flames: plan.expand_flames,
        ..ImportSummary::default()
    };

    if let Some(characters) = plan.characters {
        summary.imported = characters.len();
        let current = selected.as_ref().map(|c| c.id.clone());
        if let Err(err) = manager.replace_all(characters, current).await {
            page::roll_back(manager.page(), &previous);
            return Err(err.into());
        }
        summary.selected = selected.map(|c| c.name);
    }

    tracing::info!(
        "Imported {} characters (selected: {:?})",
        summary.imported,
        summary.selected
    );
    Ok(summary)
}

fn write_page(
    page: &impl PageStorage,
    plan: &ImportPlan,
    selected: Option<&Character>,
) -> Result<()> {
    if let Some(character) = selected {
        page::restore(page, &character.data)?;
    }
    if let Some(enable) = plan.expand_flames {
        settings::write_expand_flames(page, enable)?;
    }
    Ok(())
}

/// Replace the whole store with a raw backup object.
pub async fn restore_backup(store: &impl KeyValueStore, text: &str) -> Result<usize> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| TransferError::ImportFormat(format!("malformed JSON: {err}")))?;
    let Value::Object(entries) = value else {
        return Err(TransferError::ImportFormat(
            "backup must be a JSON object".into(),
        ));
    };

    let count = entries.len();
    store.clear().await?;
    store.set(entries).await?;

    tracing::info!("Restored backup with {} keys", count);
    Ok(count)
}

fn take_either(doc: &mut StoreMap, canonical: &str, legacy: &str) -> Option<Value> {
    match doc.remove(canonical) {
        Some(value) if !value.is_null() => Some(value),
        _ => doc.remove(legacy).filter(|value| !value.is_null()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "whackybeanz-data-2024-03-09.json");
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let doc = json!({
            "characterManagement": [{
                "id": "char_1_a", "name": "A", "dateSaved": "2024-01-01T00:00:00.000Z", "data": {}
            }],
            "expandFlamesTable": true
        });
        let plan = ImportPlan::parse(&doc.to_string()).unwrap();

        assert_eq!(plan.characters.as_ref().map(Vec::len), Some(1));
        assert_eq!(plan.expand_flames, Some(true));
        assert_eq!(plan.selection().map(|c| c.name.as_str()), Some("A"));
    }

    #[test]
    fn canonical_fields_win_over_legacy() {
        let doc = json!({
            "characters": [],
            "characterManagement": [{
                "id": "x", "name": "X", "dateSaved": "2024-01-01T00:00:00.000Z"
            }],
            "expandFlames": false,
            "expandFlamesTable": true
        });
        let plan = ImportPlan::parse(&doc.to_string()).unwrap();

        assert_eq!(plan.characters, Some(Vec::new()));
        assert_eq!(plan.expand_flames, Some(false));
    }

    #[test]
    fn unrecognized_documents_are_rejected() {
        for text in ["not json", "[1, 2]", "{}", r#"{"characters": {"a": 1}}"#] {
            assert!(
                matches!(ImportPlan::parse(text), Err(TransferError::ImportFormat(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn missing_selection_leaves_nothing_selected() {
        let doc = json!({
            "characters": [
                { "id": "a", "name": "A", "dateSaved": "2024-01-01T00:00:00.000Z" },
                { "id": "b", "name": "B", "dateSaved": "2024-01-01T00:00:00.000Z" }
            ],
            "lastLoadedChar": "gone"
        });
        let plan = ImportPlan::parse(&doc.to_string()).unwrap();
        assert_eq!(plan.selection(), None);
    }

    #[test]
    fn empty_selection_takes_the_first_character() {
        let doc = json!({
            "characters": [
                { "id": "a", "name": "A", "dateSaved": "2024-01-01T00:00:00.000Z" },
                { "id": "b", "name": "B", "dateSaved": "2024-01-01T00:00:00.000Z" }
            ],
            "lastLoadedChar": ""
        });
        let plan = ImportPlan::parse(&doc.to_string()).unwrap();
        assert_eq!(plan.selection().map(|c| c.name.as_str()), Some("A"));
    }
}
