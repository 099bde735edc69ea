//! Bounded exact-match search over flame line combinations.
//!
//! The search is a depth-first backtrack over catalog entries:
//!
//! ```text
//! visit(sum, picks, used):
//!   sum == target        -> record picks, backtrack
//!   picks.len() == 4     -> backtrack
//!   sum exceeds target   -> backtrack (contributions only grow)
//!   for line in catalog, line not used:
//!     for tier in line.tiers:
//!       skip if sum + project(line, tier) overflows
//!       push (line, tier); visit(sum + project(line, tier)); pop
//! ```
//!
//! Solutions come back in discovery order (catalog order, then tier order), and
//! callers use the first one. There is no closest-match fallback.

use core::fmt;

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::error::SolutionError;
use crate::line::LineKind;
use crate::stats::{StatVector, TargetVector};

/// Maximum number of flame lines a single item can roll.
pub const MAX_LINES: usize = 4;

/// One selected `(line, tier)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pick {
    #[cfg_attr(feature = "serde", serde(rename = "lineName"))]
    pub line: LineKind,
    #[cfg_attr(feature = "serde", serde(rename = "tierValue"))]
    pub tier: i32,
}

impl Pick {
    pub const fn new(line: LineKind, tier: i32) -> Self {
        Self { line, tier }
    }

    /// The stat contribution of this pick.
    pub fn contribution(&self) -> StatVector {
        self.line.project(self.tier)
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.tier)
    }
}

/// An ordered set of at most [`MAX_LINES`] picks with pairwise distinct lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Pick>", into = "Vec<Pick>")
)]
pub struct Solution {
    picks: ArrayVec<Pick, MAX_LINES>,
}

impl Solution {
    /// Validate and wrap a hand-built pick list.
    pub fn try_from_picks(picks: impl IntoIterator<Item = Pick>) -> Result<Self, SolutionError> {
        let picks: Vec<Pick> = picks.into_iter().collect();
        if picks.len() > MAX_LINES {
            return Err(SolutionError::TooManyPicks {
                max: MAX_LINES,
                actual: picks.len(),
            });
        }

        let mut solution = Solution::default();
        for pick in picks {
            if solution.contains(pick.line) {
                return Err(SolutionError::RepeatedLine(pick.line));
            }
            solution.picks.push(pick);
        }
        Ok(solution)
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn contains(&self, line: LineKind) -> bool {
        self.picks.iter().any(|pick| pick.line == line)
    }

    /// Sum of all pick contributions.
    pub fn total(&self) -> StatVector {
        self.picks.iter().map(Pick::contribution).sum()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, pick) in self.picks.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pick}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Pick>> for Solution {
    type Error = SolutionError;

    fn try_from(picks: Vec<Pick>) -> Result<Self, Self::Error> {
        Self::try_from_picks(picks)
    }
}

impl From<Solution> for Vec<Pick> {
    fn from(solution: Solution) -> Self {
        solution.picks.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a Pick;
    type IntoIter = core::slice::Iter<'a, Pick>;

    fn into_iter(self) -> Self::IntoIter {
        self.picks.iter()
    }
}

/// Find every combination of distinct lines (at most [`MAX_LINES`]) whose
/// contributions sum exactly to `target`.
///
/// A zero target matches before anything is picked and yields a single empty
/// solution; hosts refuse zero targets before calling this.
pub fn solve(target: &TargetVector, catalog: &Catalog) -> Vec<Solution> {
    let mut search = Search {
        target,
        catalog,
        picks: ArrayVec::new(),
        found: Vec::new(),
    };
    search.visit(StatVector::ZERO);
    search.found
}

/// The first solution in discovery order, if any.
pub fn first_solution(target: &TargetVector, catalog: &Catalog) -> Option<Solution> {
    solve(target, catalog).into_iter().next()
}

struct Search<'a> {
    target: &'a TargetVector,
    catalog: &'a Catalog,
    picks: ArrayVec<Pick, MAX_LINES>,
    found: Vec<Solution>,
}

impl Search<'_> {
    fn visit(&mut self, sum: StatVector) {
        if sum == *self.target {
            self.found.push(Solution {
                picks: self.picks.clone(),
            });
            return;
        }

        if self.picks.is_full() || sum.exceeds(self.target) {
            return;
        }

        let catalog = self.catalog;
        for entry in catalog {
            // A line already in the pick stack is "used" for this branch.
            if self.picks.iter().any(|pick| pick.line == entry.line) {
                continue;
            }

            for &tier in &entry.tiers {
                let pick = Pick::new(entry.line, tier);
                // An overflowing sum cannot equal any i32 target.
                let Some(next) = sum.checked_add(&pick.contribution()) else {
                    continue;
                };
                self.picks.push(pick);
                self.visit(next);
                self.picks.pop();
            }
        }
    }
}
