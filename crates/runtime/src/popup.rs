//! Popup commands and the inline confirm step for destructive actions.

use std::fmt;

/// Calculator pages the popup links to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownPage {
    EquipSetup,
    Flames,
    Symbols,
}

impl KnownPage {
    pub const ALL: [KnownPage; 3] = [KnownPage::EquipSetup, KnownPage::Flames, KnownPage::Symbols];

    pub const fn url(self) -> &'static str {
        match self {
            KnownPage::EquipSetup => "https://www.whackybeanz.com/calc/equips/setup",
            KnownPage::Flames => "https://www.whackybeanz.com/calc/equips/flames",
            KnownPage::Symbols => "https://www.whackybeanz.com/calc/symbols",
        }
    }
}

/// Actions that only run after an explicit confirm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the page state with an empty snapshot and reload.
    ClearPage,
    /// Clear every persisted key.
    ResetAll,
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::ClearPage => write!(f, "clear page"),
            PendingAction::ResetAll => write!(f, "reset all"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupCommand {
    Open(KnownPage),
    ClearPage,
    ResetAll,
    Confirm,
    Cancel,
}

/// What a popup command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupEffect {
    /// The host should open this URL in a new tab.
    OpenUrl(&'static str),
    /// A destructive action is waiting for confirmation.
    Armed(PendingAction),
    Executed(PendingAction),
    Cancelled(PendingAction),
    /// Confirm or cancel with nothing armed.
    NothingPending,
}

/// Holds at most one destructive action until it is confirmed or cancelled.
///
/// Arming a second action replaces the first.
#[derive(Debug, Default)]
pub struct ConfirmGate {
    armed: Option<PendingAction>,
}

impl ConfirmGate {
    pub fn arm(&mut self, action: PendingAction) {
        self.armed = Some(action);
    }

    pub fn armed(&self) -> Option<PendingAction> {
        self.armed
    }

    /// Disarm and return the action to run.
    pub fn confirm(&mut self) -> Option<PendingAction> {
        self.armed.take()
    }

    /// Disarm without running.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.armed.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_holds_one_action() {
        let mut gate = ConfirmGate::default();
        assert_eq!(gate.confirm(), None);

        gate.arm(PendingAction::ClearPage);
        gate.arm(PendingAction::ResetAll);
        assert_eq!(gate.armed(), Some(PendingAction::ResetAll));
        assert_eq!(gate.confirm(), Some(PendingAction::ResetAll));
        assert_eq!(gate.armed(), None);
    }

    #[test]
    fn known_pages_point_at_the_calculator() {
        for page in KnownPage::ALL {
            assert!(page.url().starts_with("https://www.whackybeanz.com/calc/"));
        }
    }
}
