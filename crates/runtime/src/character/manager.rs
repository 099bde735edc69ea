use serde_json::{Value, json};

use super::keys::{
    CHARACTERS_KEY, CURRENT_CHARACTER_KEY, LAST_LOADED_KEY, LEGACY_CHARACTER_KEYS,
    LEGACY_CURRENT_KEYS, lookup_keys,
};
use super::{AutoSaveTrigger, Character, CharacterError, CharacterId, Result};
use crate::page::{self, PageStorage};
use crate::repository::{KeyValueStore, RepositoryError, StoreMap};

/// In-memory cache of saved characters backed by a [`KeyValueStore`].
///
/// The store is the source of truth. Every mutation is computed on a copy,
/// persisted (list first, then the current pointer) and only then committed
/// to the cache, so a failed write leaves the cache matching the store.
pub struct CharacterManager<S, P> {
    store: S,
    page: P,
    characters: Vec<Character>,
    current: Option<CharacterId>,
    initialized: bool,
}

impl<S, P> CharacterManager<S, P>
where
    S: KeyValueStore,
    P: PageStorage,
{
    pub fn new(store: S, page: P) -> Self {
        Self {
            store,
            page,
            characters: Vec::new(),
            current: None,
            initialized: false,
        }
    }

    /// Load characters from the store, adopting legacy keys when the
    /// canonical ones are absent.
    pub async fn init(&mut self) -> Result<()> {
        self.reload_from_store().await?;
        self.initialized = true;
        tracing::info!(
            "Character manager ready with {} characters",
            self.characters.len()
        );
        Ok(())
    }

    /// Drop the cache. The manager must be initialized again before use.
    pub fn teardown(&mut self) {
        self.characters.clear();
        self.current = None;
        self.initialized = false;
        tracing::debug!("Character manager torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Re-read the store, replacing the cache.
    pub async fn reload_from_store(&mut self) -> Result<()> {
        let stored = self.store.get(&lookup_keys()).await?;

        let (characters, list_source) = read_characters(&stored);
        let (current, pointer_source) = read_current(&stored);

        let current = match current {
            Some(id) if characters.iter().any(|c| c.id == id) => Some(id),
            Some(id) => {
                tracing::warn!("Stored current character {} no longer exists", id);
                None
            }
            None => None,
        };

        let migrate_list = !characters.is_empty() && list_source != Some(CHARACTERS_KEY);
        let migrate_pointer = current.is_some() && pointer_source != Some(CURRENT_CHARACTER_KEY);
        if migrate_list || migrate_pointer {
            tracing::warn!(
                "Adopting legacy character data (list from {:?}, pointer from {:?})",
                list_source,
                pointer_source
            );
            self.persist(&characters, current.as_ref()).await?;
        }

        self.characters = characters;
        self.current = current;
        Ok(())
    }

    /// Characters in stored order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Characters ordered by name for display.
    pub fn characters_sorted(&self) -> Vec<&Character> {
        let mut sorted: Vec<&Character> = self.characters.iter().collect();
        sorted.sort_by_key(|c| c.name.to_lowercase());
        sorted
    }

    pub fn find(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn current_id(&self) -> Option<&CharacterId> {
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Character> {
        self.current.as_ref().and_then(|id| self.find(id))
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save the current page state as a new character and select it.
    pub async fn save(&mut self, name: &str) -> Result<Character> {
        self.ensure_initialized()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CharacterError::EmptyName);
        }
        if self.characters.iter().any(|c| c.has_name(name)) {
            return Err(CharacterError::DuplicateName(name.to_string()));
        }

        let character = Character::new(name, page::snapshot(&self.page)?);
        let mut next = self.characters.clone();
        next.push(character.clone());
        self.commit(next, Some(character.id.clone())).await?;

        tracing::info!("Saved character {} ({})", character.name, character.id);
        Ok(character)
    }

    /// Restore a character's snapshot onto the page, select it and request a
    /// page reload. If the selection cannot be persisted the page is put back.
    pub async fn load(&mut self, id: &CharacterId) -> Result<Character> {
        self.ensure_initialized()?;
        let character = self.require(id)?.clone();

        let previous = page::snapshot(&self.page)?;
        if let Err(err) = page::restore(&self.page, &character.data) {
            page::roll_back(&self.page, &previous);
            return Err(err.into());
        }
        if let Err(err) = self.commit(self.characters.clone(), Some(id.clone())).await {
            page::roll_back(&self.page, &previous);
            return Err(err);
        }
        self.page.request_reload();

        tracing::info!("Loaded character {} ({})", character.name, character.id);
        Ok(character)
    }

    /// Overwrite a character's snapshot with the current page state.
    pub async fn update(&mut self, id: &CharacterId) -> Result<Character> {
        self.ensure_initialized()?;
        self.require(id)?;

        let data = page::snapshot(&self.page)?;
        let mut next = self.characters.clone();
        let mut updated = None;
        for character in next.iter_mut().filter(|c| &c.id == id) {
            character.refresh(data.clone());
            updated = Some(character.clone());
        }
        let updated = updated.ok_or_else(|| CharacterError::NotFound(id.clone()))?;

        self.commit(next, self.current.clone()).await?;
        tracing::info!("Updated character {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Remove a character, clearing the selection if it was current.
    pub async fn delete(&mut self, id: &CharacterId) -> Result<Character> {
        self.ensure_initialized()?;
        let removed = self.require(id)?.clone();

        let next: Vec<Character> = self
            .characters
            .iter()
            .filter(|c| &c.id != id)
            .cloned()
            .collect();
        let current = self.current.clone().filter(|current| current != id);
        self.commit(next, current).await?;

        tracing::info!("Deleted character {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Update the current character after a calculator save action.
    ///
    /// Returns `None` without touching the store when nothing is selected.
    pub async fn auto_update(&mut self, trigger: AutoSaveTrigger) -> Result<Option<Character>> {
        self.ensure_initialized()?;
        let Some(id) = self.current.clone() else {
            return Ok(None);
        };
        if self.find(&id).is_none() {
            tracing::warn!("Current character {} not found for auto-update", id);
            return Ok(None);
        }

        let updated = self.update(&id).await?;
        tracing::debug!("Auto-saved {} data to {}", trigger, updated.name);
        Ok(Some(updated))
    }

    /// Replace every character and the selection at once.
    pub async fn replace_all(
        &mut self,
        characters: Vec<Character>,
        current: Option<CharacterId>,
    ) -> Result<()> {
        self.ensure_initialized()?;
        let current = current.filter(|id| characters.iter().any(|c| &c.id == id));
        self.commit(characters, current).await
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(CharacterError::NotInitialized)
        }
    }

    fn require(&self, id: &CharacterId) -> Result<&Character> {
        self.find(id)
            .ok_or_else(|| CharacterError::NotFound(id.clone()))
    }

    async fn commit(&mut self, characters: Vec<Character>, current: Option<CharacterId>) -> Result<()> {
        self.persist(&characters, current.as_ref()).await?;
        self.characters = characters;
        self.current = current;
        Ok(())
    }

    async fn persist(&self, characters: &[Character], current: Option<&CharacterId>) -> Result<()> {
        let list = serde_json::to_value(characters).map_err(RepositoryError::from)?;
        self.store.set_one(CHARACTERS_KEY, list).await?;

        match current {
            Some(id) => {
                let mut pointer = StoreMap::new();
                pointer.insert(CURRENT_CHARACTER_KEY.to_string(), json!(id));
                pointer.insert(LAST_LOADED_KEY.to_string(), json!(id));
                self.store.set(pointer).await?;
            }
            None => {
                self.store
                    .remove(&[CURRENT_CHARACTER_KEY, LAST_LOADED_KEY])
                    .await?;
            }
        }

        tracing::debug!("Persisted {} characters", characters.len());
        Ok(())
    }
}

/// First present list key, canonical before legacy.
fn read_characters(stored: &StoreMap) -> (Vec<Character>, Option<&'static str>) {
    for key in std::iter::once(CHARACTERS_KEY).chain(LEGACY_CHARACTER_KEYS) {
        let Some(value) = stored.get(key).filter(|v| !v.is_null()) else {
            continue;
        };
        match serde_json::from_value::<Vec<Character>>(value.clone()) {
            Ok(characters) => return (characters, Some(key)),
            Err(err) => tracing::warn!("Ignoring unreadable characters under {}: {}", key, err),
        }
    }
    (Vec::new(), None)
}

/// First non-empty pointer key, canonical before legacy.
fn read_current(stored: &StoreMap) -> (Option<CharacterId>, Option<&'static str>) {
    std::iter::once(CURRENT_CHARACTER_KEY)
        .chain(LEGACY_CURRENT_KEYS)
        .find_map(|key| match stored.get(key) {
            Some(Value::String(id)) if !id.is_empty() => Some((Some(CharacterId::new(id.as_str())), Some(key))),
            _ => None,
        })
        .unwrap_or((None, None))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::page::{InMemoryPage, PageSnapshot};
    use crate::repository::InMemoryStore;

    async fn manager_with(store: InMemoryStore) -> CharacterManager<InMemoryStore, InMemoryPage> {
        let page = InMemoryPage::with_entries(PageSnapshot::from([(
            "equips".to_string(),
            "{\"hat\":1}".to_string(),
        )]));
        let mut manager = CharacterManager::new(store, page);
        manager.init().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn operations_require_init() {
        let mut manager = CharacterManager::new(InMemoryStore::new(), InMemoryPage::new());
        assert!(matches!(
            manager.save("Hero").await,
            Err(CharacterError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn save_persists_list_and_pointer() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        let hero = manager.save("  Hero ").await.unwrap();

        assert_eq!(hero.name, "Hero");
        assert_eq!(manager.current_id(), Some(&hero.id));

        let stored = manager.store().dump().unwrap();
        assert_eq!(stored[CHARACTERS_KEY][0]["name"], json!("Hero"));
        assert_eq!(stored[CURRENT_CHARACTER_KEY], json!(hero.id.as_str()));
        assert_eq!(stored[LAST_LOADED_KEY], json!(hero.id.as_str()));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        assert!(matches!(
            manager.save("   ").await,
            Err(CharacterError::EmptyName)
        ));
        assert!(manager.characters().is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        let missing = CharacterId::from("char_0_missing");

        assert!(matches!(manager.load(&missing).await, Err(CharacterError::NotFound(_))));
        assert!(matches!(manager.update(&missing).await, Err(CharacterError::NotFound(_))));
        assert!(matches!(manager.delete(&missing).await, Err(CharacterError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_of_other_character_keeps_selection() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        let first = manager.save("First").await.unwrap();
        let second = manager.save("Second").await.unwrap();

        manager.delete(&first.id).await.unwrap();
        assert_eq!(manager.current_id(), Some(&second.id));
        assert_eq!(manager.characters().len(), 1);
    }

    #[tokio::test]
    async fn auto_update_without_selection_is_noop() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        let hero = manager.save("Hero").await.unwrap();
        manager.delete(&hero.id).await.unwrap();

        let result = manager.auto_update(AutoSaveTrigger::Equipment).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn legacy_keys_are_adopted_once() {
        let legacy = json!([{
            "id": "char_1_aaaaaaaaa",
            "name": "Old",
            "dateSaved": "2024-01-01T00:00:00.000Z",
            "data": {}
        }]);
        let store = InMemoryStore::new();
        store.set_one("savedCharacters", legacy.clone()).await.unwrap();
        store.set_one("currentCharacter", json!("char_1_aaaaaaaaa")).await.unwrap();

        let manager = manager_with(store).await;
        assert_eq!(manager.characters().len(), 1);
        assert_eq!(manager.current().map(|c| c.name.as_str()), Some("Old"));

        let stored = manager.store().dump().unwrap();
        assert_eq!(stored[CHARACTERS_KEY], legacy);
        assert_eq!(stored[CURRENT_CHARACTER_KEY], json!("char_1_aaaaaaaaa"));
    }

    #[tokio::test]
    async fn canonical_list_wins_over_legacy() {
        let store = InMemoryStore::new();
        store.set_one(CHARACTERS_KEY, json!([])).await.unwrap();
        store
            .set_one(
                "characters",
                json!([{ "id": "x", "name": "Ghost", "dateSaved": "2024-01-01T00:00:00Z" }]),
            )
            .await
            .unwrap();

        let manager = manager_with(store).await;
        assert!(manager.characters().is_empty());
    }

    #[tokio::test]
    async fn sorted_listing_ignores_case() {
        let mut manager = manager_with(InMemoryStore::new()).await;
        manager.save("zed").await.unwrap();
        manager.save("Alpha").await.unwrap();
        manager.save("beta").await.unwrap();

        let names: Vec<&str> = manager
            .characters_sorted()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "zed"]);
    }
}
