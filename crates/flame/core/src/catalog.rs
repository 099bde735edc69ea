//! Available tier values per line kind.
//!
//! A [`Catalog`] is rebuilt from the live page for every solve. Its iteration
//! order is the solver's search order, so it decides which solution is found
//! first when several exist.

use crate::line::LineKind;

/// Tier values currently selectable for one line kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub line: LineKind,
    pub tiers: Vec<i32>,
}

/// Ordered mapping from line kind to selectable tier values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog in canonical line order, asking `tiers_of` for each kind.
    pub fn canonical(mut tiers_of: impl FnMut(LineKind) -> Vec<i32>) -> Self {
        LineKind::ALL
            .into_iter()
            .map(|line| (line, tiers_of(line)))
            .collect()
    }

    /// Set the tiers of a line.
    ///
    /// A new line is appended; an existing line keeps its position and has its
    /// tiers replaced. Repeated tier values collapse onto their first occurrence.
    pub fn insert(&mut self, line: LineKind, tiers: impl IntoIterator<Item = i32>) {
        let mut unique = Vec::new();
        for tier in tiers {
            if !unique.contains(&tier) {
                unique.push(tier);
            }
        }

        match self.entries.iter_mut().find(|entry| entry.line == line) {
            Some(entry) => entry.tiers = unique,
            None => self.entries.push(CatalogEntry {
                line,
                tiers: unique,
            }),
        }
    }

    /// Tier values for `line`, or an empty slice when the line is absent.
    pub fn tiers(&self, line: LineKind) -> &[i32] {
        self.entries
            .iter()
            .find(|entry| entry.line == line)
            .map(|entry| entry.tiers.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (line, tier) options.
    pub fn option_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.tiers.len()).sum()
    }

    /// Returns true when any tier value is negative.
    ///
    /// The solver's overshoot pruning assumes non-negative contributions; a
    /// negative tier can make it discard branches that would have matched.
    pub fn has_negative_tiers(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.tiers.iter().any(|&tier| tier < 0))
    }
}

impl FromIterator<(LineKind, Vec<i32>)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (LineKind, Vec<i32>)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (line, tiers) in iter {
            catalog.insert(line, tiers);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = core::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
