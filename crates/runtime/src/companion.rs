//! High-level companion orchestrator.
//!
//! The companion owns the character manager and the flame service, turns
//! every outcome into a status message, and exposes a builder-based API for
//! hosts to drive it. It is constructed explicitly and tied to the page
//! lifecycle through [`Companion::init`] and [`Companion::teardown`].

use std::time::Duration;

use flame_core::TargetVector;

use crate::api::{Request, Response, Result, RuntimeError, StatusLog, StatusMessage};
use crate::character::{AutoSaveTrigger, Character, CharacterId, CharacterManager};
use crate::flames::{CatalogSource, DEFAULT_APPLY_PAUSE, FlameOutcome, FlameService, SelectionSink};
use crate::page::{self, PageSnapshot, PageStorage};
use crate::popup::{ConfirmGate, PendingAction, PopupCommand, PopupEffect};
use crate::readiness::{Readiness, ReadinessPolicy, wait_until};
use crate::repository::KeyValueStore;
use crate::settings;
use crate::transfer::{self, ExportDocument, ImportSummary};

const EMPTY_TARGET_TEXT: &str = "Please enter at least one non-zero target value.";
const NO_SOLUTION_TEXT: &str =
    "No combination of flame lines can achieve the exact values you specified. Try adjusting your target values.";

/// Companion configuration.
#[derive(Debug, Clone)]
pub struct CompanionConfig {
    /// Pause between option board interactions.
    pub apply_pause: Duration,
    pub readiness: ReadinessPolicy,
    /// Number of status messages kept.
    pub status_capacity: usize,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            apply_pause: DEFAULT_APPLY_PAUSE,
            readiness: ReadinessPolicy::default(),
            status_capacity: 16,
        }
    }
}

/// Page companion: character profiles, flame solving and popup commands.
pub struct Companion<S, P, C, K> {
    config: CompanionConfig,
    characters: CharacterManager<S, P>,
    flames: FlameService<C, K>,
    status: StatusLog,
    gate: ConfirmGate,
    flames_expanded: bool,
}

impl<S, P, C, K> Companion<S, P, C, K>
where
    S: KeyValueStore,
    P: PageStorage,
    C: CatalogSource,
    K: SelectionSink,
{
    /// Create a new companion builder
    pub fn builder(store: S, page: P, source: C, sink: K) -> CompanionBuilder<S, P, C, K> {
        CompanionBuilder {
            config: CompanionConfig::default(),
            store,
            page,
            source,
            sink,
        }
    }

    /// Load persisted characters and page preferences.
    pub async fn init(&mut self) -> Result<()> {
        self.characters.init().await?;
        self.flames_expanded = settings::read_expand_flames(self.characters.page())?;
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.characters.teardown();
        self.gate = ConfirmGate::default();
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn characters(&self) -> &CharacterManager<S, P> {
        &self.characters
    }

    pub fn flames(&self) -> &FlameService<C, K> {
        &self.flames
    }

    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLog {
        &mut self.status
    }

    /// Whether the flames table is shown expanded.
    pub fn flames_expanded(&self) -> bool {
        self.flames_expanded
    }

    /// Wait for the page to render using the configured policy.
    pub async fn wait_for_page(&self, condition: impl FnMut() -> bool) -> Readiness {
        wait_until(condition, &self.config.readiness).await
    }

    /// Dispatch a popup request. Failures become [`Response::Failed`].
    pub async fn handle(&mut self, request: Request) -> Response {
        let result = match request {
            Request::GetLocalStorage => self
                .characters
                .page()
                .entries()
                .map(|data| Response::LocalStorage { data })
                .map_err(RuntimeError::from),
            Request::SetLocalStorage { data } => page::replace_all(self.characters.page(), &data)
                .map(|()| Response::Ok)
                .map_err(RuntimeError::from),
            Request::ToggleFlamesHeight { enable } => {
                self.flames_expanded = enable;
                Ok(Response::Ok)
            }
            Request::FlameSolver { data } => self.solve(&data).await.map(|outcome| match outcome {
                FlameOutcome::EmptyTarget => Response::Failed {
                    message: EMPTY_TARGET_TEXT.to_string(),
                },
                FlameOutcome::NoSolution => Response::NoSolution,
                FlameOutcome::Applied { solution, .. } => Response::Solved { solution },
            }),
        };

        result.unwrap_or_else(|err| Response::Failed {
            message: err.status_text(),
        })
    }

    /// Solve for `target` and apply the first solution to the board.
    pub async fn solve(&mut self, target: &TargetVector) -> Result<FlameOutcome> {
        let result = self.flames.solve_and_apply(target).await;
        let message = match &result {
            Ok(FlameOutcome::EmptyTarget) => StatusMessage::error(EMPTY_TARGET_TEXT),
            Ok(FlameOutcome::NoSolution) => StatusMessage::error(NO_SOLUTION_TEXT),
            Ok(FlameOutcome::Applied { solution, .. }) => {
                StatusMessage::success(format!("Applied flame lines: {solution}"))
            }
            Err(err) => {
                tracing::error!("Flame solver failed: {}", err);
                StatusMessage::error("An error occurred while solving. Please try again.")
            }
        };
        self.status.push(message);
        result.map_err(RuntimeError::from)
    }

    pub async fn save_character(&mut self, name: &str) -> Result<Character> {
        let result = self.characters.save(name).await.map_err(RuntimeError::from);
        self.report(result, |c| format!("Character \"{}\" saved successfully!", c.name))
    }

    pub async fn load_character(&mut self, id: &CharacterId) -> Result<Character> {
        let result = self.characters.load(id).await.map_err(RuntimeError::from);
        self.report(result, |c| format!("Character \"{}\" loaded successfully!", c.name))
    }

    pub async fn update_character(&mut self, id: &CharacterId) -> Result<Character> {
        let result = self.characters.update(id).await.map_err(RuntimeError::from);
        self.report(result, |c| format!("Character \"{}\" updated successfully!", c.name))
    }

    pub async fn delete_character(&mut self, id: &CharacterId) -> Result<Character> {
        let result = self.characters.delete(id).await.map_err(RuntimeError::from);
        self.report(result, |c| format!("Character \"{}\" deleted successfully.", c.name))
    }

    /// React to a clicked calculator button. Only save buttons with a
    /// character selected write anything.
    pub async fn on_button_click(&mut self, button_text: &str) -> Result<Option<Character>> {
        let Some(trigger) = AutoSaveTrigger::classify(button_text) else {
            return Ok(None);
        };

        match self.characters.auto_update(trigger).await {
            Ok(Some(character)) => {
                self.status.push(StatusMessage::success(format!(
                    "Auto-saved {} data to \"{}\"",
                    trigger, character.name
                )));
                Ok(Some(character))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                tracing::error!("Auto-update failed: {}", err);
                self.status
                    .push(StatusMessage::error("Error auto-saving character data"));
                Err(err.into())
            }
        }
    }

    pub fn export(&mut self) -> Result<ExportDocument> {
        let result = ExportDocument::capture(&self.characters).map_err(RuntimeError::from);
        self.report(result, |doc| {
            format!("Exported {} characters.", doc.characters.len())
        })
    }

    pub async fn import(&mut self, text: &str) -> Result<ImportSummary> {
        let result = transfer::import(&mut self.characters, text)
            .await
            .map_err(RuntimeError::from);
        if let Some(enable) = result.as_ref().ok().and_then(|summary| summary.expand_flames) {
            self.flames_expanded = enable;
        }
        self.report(result, |summary| match &summary.selected {
            Some(name) => format!(
                "Imported {} characters; \"{}\" is now loaded.",
                summary.imported, name
            ),
            None => format!("Imported {} characters.", summary.imported),
        })
    }

    /// Replace the whole store with a raw backup and reload characters.
    pub async fn restore_backup(&mut self, text: &str) -> Result<usize> {
        let result = match transfer::restore_backup(self.characters.store(), text).await {
            Ok(count) => self
                .characters
                .reload_from_store()
                .await
                .map(|()| count)
                .map_err(RuntimeError::from),
            Err(err) => Err(err.into()),
        };
        self.report(result, |_| "Imported backup successfully!".to_string())
    }

    /// Persist the expand-flames preference and apply it.
    pub fn set_expand_flames(&mut self, enable: bool) -> Result<()> {
        settings::write_expand_flames(self.characters.page(), enable)?;
        self.flames_expanded = enable;
        Ok(())
    }

    /// Run a popup command. Destructive commands only arm the confirm gate.
    pub async fn popup(&mut self, command: PopupCommand) -> Result<PopupEffect> {
        match command {
            PopupCommand::Open(page) => Ok(PopupEffect::OpenUrl(page.url())),
            PopupCommand::ClearPage => {
                self.gate.arm(PendingAction::ClearPage);
                Ok(PopupEffect::Armed(PendingAction::ClearPage))
            }
            PopupCommand::ResetAll => {
                self.gate.arm(PendingAction::ResetAll);
                Ok(PopupEffect::Armed(PendingAction::ResetAll))
            }
            PopupCommand::Cancel => match self.gate.cancel() {
                Some(action) => {
                    let text = match action {
                        PendingAction::ClearPage => "Clear localstorage cancelled.",
                        PendingAction::ResetAll => "Reset cancelled.",
                    };
                    self.status.push(StatusMessage::info(text));
                    Ok(PopupEffect::Cancelled(action))
                }
                None => Ok(PopupEffect::NothingPending),
            },
            PopupCommand::Confirm => match self.gate.confirm() {
                Some(action) => {
                    let result = self.execute(action).await;
                    self.report(result, |_| match action {
                        PendingAction::ClearPage => {
                            "Page localStorage cleared. Reloading in a moment...".to_string()
                        }
                        PendingAction::ResetAll => "All saved data cleared.".to_string(),
                    })?;
                    Ok(PopupEffect::Executed(action))
                }
                None => Ok(PopupEffect::NothingPending),
            },
        }
    }

    async fn execute(&mut self, action: PendingAction) -> Result<()> {
        match action {
            PendingAction::ClearPage => {
                page::replace_all(self.characters.page(), &PageSnapshot::new())?;
                self.characters.page().request_reload();
            }
            PendingAction::ResetAll => {
                self.characters.store().clear().await?;
                self.characters.reload_from_store().await?;
            }
        }
        tracing::info!("Executed popup action: {}", action);
        Ok(())
    }

    /// Record the outcome of an operation as a status message.
    fn report<T>(&mut self, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        let message = match &result {
            Ok(value) => StatusMessage::success(success(value)),
            Err(err) => {
                tracing::warn!("Operation failed ({}): {}", err.kind(), err);
                StatusMessage::error(err.status_text())
            }
        };
        self.status.push(message);
        result
    }
}

/// Builder for [`Companion`].
pub struct CompanionBuilder<S, P, C, K> {
    config: CompanionConfig,
    store: S,
    page: P,
    source: C,
    sink: K,
}

impl<S, P, C, K> CompanionBuilder<S, P, C, K>
where
    S: KeyValueStore,
    P: PageStorage,
    C: CatalogSource,
    K: SelectionSink,
{
    /// Override companion configuration
    pub fn config(mut self, config: CompanionConfig) -> Self {
        self.config = config;
        self
    }

    /// Pause between board interactions
    pub fn apply_pause(mut self, pause: Duration) -> Self {
        self.config.apply_pause = pause;
        self
    }

    /// Build the companion. Call [`Companion::init`] before use.
    pub fn build(self) -> Companion<S, P, C, K> {
        let status = StatusLog::new(self.config.status_capacity);
        let flames = FlameService::new(self.source, self.sink).with_pause(self.config.apply_pause);

        Companion {
            characters: CharacterManager::new(self.store, self.page),
            flames,
            status,
            gate: ConfirmGate::default(),
            flames_expanded: false,
            config: self.config,
        }
    }
}
