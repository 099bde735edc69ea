use std::time::Duration;

use flame_core::{Solution, TargetVector, first_solution};

use super::{ApplyReport, CatalogSource, DEFAULT_APPLY_PAUSE, Result, SelectionSink, apply_solution};

/// Result of a solve request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlameOutcome {
    /// Every target component was zero; nothing was solved.
    EmptyTarget,
    /// No exact combination exists for the current catalog.
    NoSolution,
    /// The first solution was applied to the board.
    Applied {
        solution: Solution,
        report: ApplyReport,
    },
}

/// Reads the catalog, solves, and applies the first solution.
pub struct FlameService<C, K> {
    source: C,
    sink: K,
    pause: Duration,
}

impl<C, K> FlameService<C, K>
where
    C: CatalogSource,
    K: SelectionSink,
{
    pub fn new(source: C, sink: K) -> Self {
        Self {
            source,
            sink,
            pause: DEFAULT_APPLY_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The solution that would be applied, without touching the board.
    pub fn plan(&self, target: &TargetVector) -> Result<Option<Solution>> {
        if target.is_zero() {
            return Ok(None);
        }
        let catalog = self.source.read_catalog()?;
        if catalog.has_negative_tiers() {
            tracing::warn!("Catalog has negative tier values; overshoot pruning may miss solutions");
        }
        Ok(first_solution(target, &catalog))
    }

    pub async fn solve_and_apply(&self, target: &TargetVector) -> Result<FlameOutcome> {
        if target.is_zero() {
            return Ok(FlameOutcome::EmptyTarget);
        }

        let Some(solution) = self.plan(target)? else {
            tracing::info!("No flame combination matches {:?}", target);
            return Ok(FlameOutcome::NoSolution);
        };

        let report = apply_solution(&self.sink, &solution, self.pause).await?;
        tracing::info!("Applied flame solution {}", solution);
        Ok(FlameOutcome::Applied { solution, report })
    }
}
