use crate::models::{GoalDefinition, ProgressData, StatsSummary};

/// Aggregates over the whole catalog. The average clamps each goal to
/// 100% so an oversized blob cannot drag the mean above it, and a
/// non-positive target contributes 0.
pub fn build_stats(catalog: &[GoalDefinition], progress: &ProgressData) -> StatsSummary {
    let mut completed_count = 0;
    let mut in_progress_count = 0;
    let mut percent_sum = 0.0;

    for goal in catalog {
        let record = progress.goals.get(&goal.id).cloned().unwrap_or_default();
        if record.completed {
            completed_count += 1;
        } else if record.current > 0 {
            in_progress_count += 1;
        }

        if goal.target > 0 {
            let percent = record.current as f64 / goal.target as f64 * 100.0;
            percent_sum += percent.min(100.0);
        }
    }

    let average_progress_percent = if catalog.is_empty() {
        0
    } else {
        (percent_sum / catalog.len() as f64).round() as i64
    };

    StatsSummary {
        completed_count,
        in_progress_count,
        average_progress_percent,
        total_count: catalog.len(),
    }
}
