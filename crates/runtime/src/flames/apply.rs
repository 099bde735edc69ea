use std::time::Duration;

use tokio::time::sleep;

use flame_core::{Pick, Solution};

use super::{Result, SelectionSink};

/// Pause between board interactions when none is configured.
pub const DEFAULT_APPLY_PAUSE: Duration = Duration::from_millis(100);

/// What [`apply_solution`] did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub deselected: Vec<Pick>,
    pub selected: Vec<Pick>,
    /// Picks the board had no option for.
    pub skipped: Vec<Pick>,
}

/// Put `solution` on the board.
///
/// Every selected option is deselected first, then each pick is selected in
/// solution order. The board needs time to settle between interactions, so a
/// `pause` follows each deselect, the deselect phase, and each select.
pub async fn apply_solution(
    sink: &impl SelectionSink,
    solution: &Solution,
    pause: Duration,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for option in sink.selected().await? {
        sink.deselect(&option).await?;
        report.deselected.push(option);
        sleep(pause).await;
    }
    sleep(pause).await;

    for pick in solution {
        if sink.select(pick).await? {
            report.selected.push(*pick);
            sleep(pause).await;
        } else {
            tracing::warn!("No board option for {}, skipping", pick);
            report.skipped.push(*pick);
        }
    }

    Ok(report)
}
