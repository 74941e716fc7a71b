//! Plain-text rendering of a run summary.

use std::fmt;

use combat_runtime::RunSummary;

/// Text layout of a [`RunSummary`].
pub struct Report<'a>(pub &'a RunSummary);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "scenario   {}", summary.scenario)?;
        writeln!(f, "frames     {}", summary.frames)?;
        writeln!(
            f,
            "shots      {} fired, {} bullets, {} rejected",
            summary.shots_fired, summary.bullets_spawned, summary.shots_rejected
        )?;
        writeln!(f, "hits       {}", summary.hits)?;
        writeln!(
            f,
            "kills      {} ({} still standing)",
            summary.kills, summary.surviving_enemies
        )?;
        writeln!(
            f,
            "buffs      {} activated, {} expired",
            summary.buffs_activated, summary.buffs_expired
        )?;
        writeln!(
            f,
            "reloads    {} (ammo left {})",
            summary.reloads, summary.ammo_remaining
        )?;

        for death in &summary.deaths {
            writeln!(
                f,
                "  frame {:>5}  enemy {:>3}  {}",
                death.frame, death.enemy_id, death.kind
            )?;
        }
        Ok(())
    }
}

pub fn render(summary: &RunSummary) -> String {
    Report(summary).to_string()
}
