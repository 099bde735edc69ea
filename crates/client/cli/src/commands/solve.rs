//! Flame solving command.
use anyhow::Result;
use clap::Parser;
use companion_bootstrap::FileCompanion;
use companion_runtime::FlameOutcome;
use console::style;
use flame_core::{Stat, TargetVector};

/// Solve flame targets and apply the first solution
#[derive(Parser, Debug)]
pub struct Solve {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub str: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub dex: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub int: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub luk: i32,

    /// All stats percent
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub all: i32,

    /// Weapon attack
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub att: i32,

    /// Magic attack
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub matt: i32,
}

impl Solve {
    fn target(&self) -> TargetVector {
        TargetVector::default()
            .with(Stat::Str, self.str)
            .with(Stat::Dex, self.dex)
            .with(Stat::Int, self.int)
            .with(Stat::Luk, self.luk)
            .with(Stat::All, self.all)
            .with(Stat::Att, self.att)
            .with(Stat::Matt, self.matt)
    }

    pub async fn execute(self, companion: &mut FileCompanion) -> Result<()> {
        // Failures are already reported through the status log.
        if let FlameOutcome::Applied { solution, report } = companion.solve(&self.target()).await? {
            for pick in solution.picks() {
                println!("  {:<16} {}", pick.line, style(pick.tier).bold());
            }
            for pick in &report.skipped {
                println!(
                    "  {} no option for {} {}",
                    style("!").yellow(),
                    pick.line,
                    pick.tier
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_stat_dimensions() {
        let solve = Solve::parse_from(["solve", "--str", "72", "--all", "6", "--matt", "-3"]);
        let expected = TargetVector::default()
            .with(Stat::Str, 72)
            .with(Stat::All, 6)
            .with(Stat::Matt, -3);
        assert_eq!(solve.target(), expected);
    }
}
