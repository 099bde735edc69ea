use std::fmt;

/// Calculator actions that auto-save the current character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoSaveTrigger {
    /// A `Save to <item>` button on the equipment setup page.
    Equipment,
    /// The `Save Stat Equivalence Values` button.
    StatEquivalence,
}

impl AutoSaveTrigger {
    /// Classify a clicked button by its trimmed label.
    pub fn classify(button_text: &str) -> Option<Self> {
        let text = button_text.trim();
        if text.starts_with("Save to ") {
            Some(Self::Equipment)
        } else if text == "Save Stat Equivalence Values" {
            Some(Self::StatEquivalence)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::StatEquivalence => "stat equivalence",
        }
    }
}

impl fmt::Display for AutoSaveTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_buttons() {
        assert_eq!(
            AutoSaveTrigger::classify("  Save to Hat "),
            Some(AutoSaveTrigger::Equipment)
        );
        assert_eq!(
            AutoSaveTrigger::classify("Save Stat Equivalence Values"),
            Some(AutoSaveTrigger::StatEquivalence)
        );
        assert_eq!(AutoSaveTrigger::classify("Save"), None);
        assert_eq!(AutoSaveTrigger::classify("Save to"), None);
    }
}
