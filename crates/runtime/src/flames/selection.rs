//! Selection sinks: the calculator's flame option board.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use flame_core::{Catalog, Pick};

use super::{CatalogSource, FlameError, Result};

/// The calculator's option board.
///
/// Implementations drive whatever interaction the board needs for a change
/// to register as a user action; callers only see the outcome.
#[async_trait]
pub trait SelectionSink: Send + Sync {
    /// Options currently marked as selected.
    async fn selected(&self) -> Result<Vec<Pick>>;

    async fn deselect(&self, option: &Pick) -> Result<()>;

    /// Select the option matching `pick` exactly. Returns `false` when the
    /// board has no such option.
    async fn select(&self, pick: &Pick) -> Result<bool>;
}

#[async_trait]
impl<T> SelectionSink for Arc<T>
where
    T: SelectionSink + ?Sized,
{
    async fn selected(&self) -> Result<Vec<Pick>> {
        (**self).selected().await
    }

    async fn deselect(&self, option: &Pick) -> Result<()> {
        (**self).deselect(option).await
    }

    async fn select(&self, pick: &Pick) -> Result<bool> {
        (**self).select(pick).await
    }
}

/// One recorded board interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Deselect(Pick),
    Select(Pick),
}

#[derive(Debug, Default)]
struct Board {
    available: Catalog,
    selected: Vec<Pick>,
    history: Vec<(Instant, Interaction)>,
}

/// Option board held in memory.
///
/// Each line behaves like a radio group: selecting a tier replaces any
/// selection already on that line. Every interaction is recorded with the
/// time it happened.
#[derive(Debug, Default)]
pub struct InMemorySelection {
    board: Mutex<Board>,
}

impl InMemorySelection {
    pub fn new(available: Catalog) -> Self {
        Self {
            board: Mutex::new(Board {
                available,
                ..Board::default()
            }),
        }
    }

    /// Start with `picks` already selected, bypassing the history.
    pub fn with_selected(available: Catalog, picks: impl IntoIterator<Item = Pick>) -> Self {
        let selection = Self::new(available);
        if let Ok(mut board) = selection.board.lock() {
            board.selected.extend(picks);
        }
        selection
    }

    /// Snapshot of the current selection.
    pub fn current(&self) -> Result<Vec<Pick>> {
        Ok(self.lock()?.selected.clone())
    }

    /// Interactions in the order they happened.
    pub fn history(&self) -> Result<Vec<(Instant, Interaction)>> {
        Ok(self.lock()?.history.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Board>> {
        self.board.lock().map_err(|_| FlameError::LockPoisoned)
    }
}

impl CatalogSource for InMemorySelection {
    fn read_catalog(&self) -> Result<Catalog> {
        Ok(self.lock()?.available.clone())
    }
}

#[async_trait]
impl SelectionSink for InMemorySelection {
    async fn selected(&self) -> Result<Vec<Pick>> {
        self.current()
    }

    async fn deselect(&self, option: &Pick) -> Result<()> {
        let mut board = self.lock()?;
        board.selected.retain(|selected| selected != option);
        board.history.push((Instant::now(), Interaction::Deselect(*option)));
        Ok(())
    }

    async fn select(&self, pick: &Pick) -> Result<bool> {
        let mut board = self.lock()?;
        if !board.available.tiers(pick.line).contains(&pick.tier) {
            return Ok(false);
        }
        board.selected.retain(|selected| selected.line != pick.line);
        board.selected.push(*pick);
        board.history.push((Instant::now(), Interaction::Select(*pick)));
        Ok(true)
    }
}
