use crate::models::{
    GoalDefinition, GoalFilter, GoalQuery, GoalView, ProgressData, ProgressRecord, SortKey,
};
use chrono::{DateTime, Local};
use std::collections::HashSet;

/// Holds the fixed goal catalog and the mutable per-goal progress.
/// All mutations go through this type; readers get materialized views.
#[derive(Debug)]
pub struct GoalStore {
    catalog: Vec<GoalDefinition>,
    progress: ProgressData,
    // Per-id re-entrancy flag. Every operation here is synchronous, so
    // the flag can never be observed set, but it keeps the interface
    // ready for an async persistence backend.
    busy: HashSet<String>,
}

impl GoalStore {
    pub fn new(catalog: Vec<GoalDefinition>, progress: ProgressData) -> Self {
        Self {
            catalog,
            progress,
            busy: HashSet::new(),
        }
    }

    pub fn catalog(&self) -> &[GoalDefinition] {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressData {
        &self.progress
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.catalog
            .iter()
            .filter(|goal| seen.insert(goal.category.clone()))
            .map(|goal| goal.category.clone())
            .collect()
    }

    /// Applies `delta` to a goal's progress, clamping into
    /// `[0, target]` and re-deriving `completed`. Unknown ids are a
    /// silent no-op (`None`); the progress map is left untouched.
    ///
    /// `last_updated` is only stamped when `current` actually moves:
    /// decrementing at zero or incrementing at the target keeps the
    /// existing timestamp. `completed` is re-derived on every call.
    pub fn adjust_progress(&mut self, id: &str, delta: i64) -> Option<ProgressRecord> {
        self.adjust_progress_at(id, delta, Local::now())
    }

    pub fn adjust_progress_at(
        &mut self,
        id: &str,
        delta: i64,
        now: DateTime<Local>,
    ) -> Option<ProgressRecord> {
        let target = self.catalog.iter().find(|goal| goal.id == id)?.target;
        if !self.busy.insert(id.to_string()) {
            return None;
        }

        let record = self.progress.goals.entry(id.to_string()).or_default();
        let updated = record.current.saturating_add(delta).clamp(0, target);
        if updated != record.current {
            record.current = updated;
            record.last_updated = now.to_rfc3339();
        }
        // Re-derived even when the clamp produced no movement, so a
        // stale flag in a hand-edited blob gets repaired.
        record.completed = updated >= target;
        let snapshot = record.clone();

        self.busy.remove(id);
        Some(snapshot)
    }

    /// Forces a goal to its target and marks it completed, regardless
    /// of prior state. Meant for milestone goals but not enforced.
    pub fn mark_complete(&mut self, id: &str) -> Option<ProgressRecord> {
        self.mark_complete_at(id, Local::now())
    }

    pub fn mark_complete_at(&mut self, id: &str, now: DateTime<Local>) -> Option<ProgressRecord> {
        let target = self.catalog.iter().find(|goal| goal.id == id)?.target;
        if !self.busy.insert(id.to_string()) {
            return None;
        }

        let record = self.progress.goals.entry(id.to_string()).or_default();
        record.current = target;
        record.completed = true;
        record.last_updated = now.to_rfc3339();
        let snapshot = record.clone();

        self.busy.remove(id);
        Some(snapshot)
    }

    /// Filters (conjunction of status, category, and name search) and
    /// sorts the catalog into a materialized list of views.
    pub fn query(&self, params: &GoalQuery) -> Vec<GoalView> {
        let needle = params.search.to_lowercase();
        let category = params
            .category
            .as_deref()
            .filter(|value| !value.is_empty() && *value != "all");

        let mut views: Vec<GoalView> = self
            .catalog
            .iter()
            .map(|definition| self.view_of(definition))
            .filter(|view| match params.filter {
                GoalFilter::All => true,
                GoalFilter::Active => !view.completed,
                GoalFilter::Completed => view.completed,
            })
            .filter(|view| category.is_none_or(|cat| view.definition.category == cat))
            .filter(|view| {
                needle.is_empty() || view.definition.name.to_lowercase().contains(&needle)
            })
            .collect();

        match params.sort {
            // Catalog order already.
            SortKey::Id => {}
            SortKey::Progress => views.sort_by(|a, b| {
                b.percent
                    .partial_cmp(&a.percent)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortKey::Name => views.sort_by(|a, b| a.definition.name.cmp(&b.definition.name)),
        }

        views
    }

    fn view_of(&self, definition: &GoalDefinition) -> GoalView {
        let record = self
            .progress
            .goals
            .get(&definition.id)
            .cloned()
            .unwrap_or_default();
        GoalView {
            percent: raw_percent(record.current, definition.target),
            current: record.current,
            completed: record.completed,
            last_updated: record.last_updated,
            definition: definition.clone(),
        }
    }
}

/// Percentage without clamping; sorting wants the true ratio even past
/// 100. A non-positive target is treated as 0 to dodge division by zero.
pub fn raw_percent(current: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    current as f64 / target as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::models::GoalType;
    use chrono::TimeZone;

    fn test_store() -> GoalStore {
        GoalStore::new(default_catalog(), ProgressData::default())
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 23, 9, 30, 0).unwrap()
    }

    fn later() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 23, 10, 0, 0).unwrap()
    }

    #[test]
    fn adjust_increments_and_stamps() {
        let mut store = test_store();
        let record = store.adjust_progress_at("goal-3", 3, now()).unwrap();
        assert_eq!(record.current, 3);
        assert!(!record.completed);
        assert_eq!(record.last_updated, now().to_rfc3339());
    }

    #[test]
    fn adjust_clamps_to_target_and_completes() {
        let mut store = test_store();
        store.adjust_progress_at("goal-3", 3, now()).unwrap();
        let record = store.adjust_progress_at("goal-3", 100, now()).unwrap();
        assert_eq!(record.current, 24);
        assert!(record.completed);
    }

    #[test]
    fn adjust_clamps_to_zero_and_uncompletes() {
        let mut store = test_store();
        store.adjust_progress_at("goal-3", 24, now()).unwrap();
        let record = store.adjust_progress_at("goal-3", -100, later()).unwrap();
        assert_eq!(record.current, 0);
        assert!(!record.completed, "completed is re-derived, not sticky");
    }

    #[test]
    fn boundary_noop_leaves_record_untouched() {
        let mut store = test_store();
        store.adjust_progress_at("goal-3", 5, now()).unwrap();
        let before = store.adjust_progress_at("goal-3", -5, now()).unwrap();
        assert_eq!(before.current, 0);

        // Decrement at zero: no movement, no timestamp change.
        let after = store.adjust_progress_at("goal-3", -1, later()).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn boundary_noop_at_target_keeps_timestamp() {
        let mut store = test_store();
        store.adjust_progress_at("goal-3", 24, now()).unwrap();
        let record = store.adjust_progress_at("goal-3", 1, later()).unwrap();
        assert_eq!(record.current, 24);
        assert_eq!(record.last_updated, now().to_rfc3339());
    }

    #[test]
    fn unknown_id_is_silent_noop() {
        let mut store = test_store();
        store.adjust_progress_at("goal-1", 4, now()).unwrap();
        let before = store.progress().clone();

        assert!(store.adjust_progress_at("goal-999", 5, later()).is_none());
        assert!(store.mark_complete_at("goal-999", later()).is_none());

        let before_json = serde_json::to_vec(&before).unwrap();
        let after_json = serde_json::to_vec(store.progress()).unwrap();
        assert_eq!(before_json, after_json);
    }

    #[test]
    fn mark_complete_jumps_to_target() {
        let mut store = test_store();
        let record = store.mark_complete_at("goal-6", now()).unwrap();
        assert_eq!(record.current, 1);
        assert!(record.completed);

        // Unconditional: works from any prior state, milestone or not.
        store.adjust_progress_at("goal-1", 10, now()).unwrap();
        let record = store.mark_complete_at("goal-1", later()).unwrap();
        assert_eq!(record.current, 730);
        assert!(record.completed);
    }

    #[test]
    fn invariant_holds_over_random_walk() {
        let mut store = test_store();
        let deltas = [7, -3, 900, -12, 1, -1, 50, -2000, 13];
        for delta in deltas {
            let record = store.adjust_progress_at("goal-2", delta, now()).unwrap();
            assert!(record.current >= 0);
            assert!(record.current <= 260);
            assert_eq!(record.completed, record.current >= 260);
        }
    }

    #[test]
    fn query_completed_filter_returns_only_completed_in_catalog_order() {
        let mut store = test_store();
        store.mark_complete_at("goal-2", now()).unwrap();

        let views = store.query(&GoalQuery {
            filter: GoalFilter::Completed,
            ..GoalQuery::default()
        });
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].definition.id, "goal-2");
    }

    #[test]
    fn query_active_excludes_completed() {
        let mut store = test_store();
        store.mark_complete_at("goal-2", now()).unwrap();

        let views = store.query(&GoalQuery {
            filter: GoalFilter::Active,
            ..GoalQuery::default()
        });
        assert!(views.iter().all(|view| view.definition.id != "goal-2"));
        assert_eq!(views.len(), store.catalog().len() - 1);
    }

    #[test]
    fn query_search_is_case_insensitive_substring() {
        let store = test_store();
        let views = store.query(&GoalQuery {
            search: "boo".to_string(),
            sort: SortKey::Name,
            ..GoalQuery::default()
        });
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].definition.name, "Read 24 books");
    }

    #[test]
    fn query_category_is_exact_match() {
        let store = test_store();
        let views = store.query(&GoalQuery {
            category: Some("learning".to_string()),
            ..GoalQuery::default()
        });
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|view| view.definition.category == "learning"));

        let all = store.query(&GoalQuery {
            category: Some("all".to_string()),
            ..GoalQuery::default()
        });
        assert_eq!(all.len(), store.catalog().len());
    }

    #[test]
    fn query_filters_combine_as_conjunction() {
        let mut store = test_store();
        store.mark_complete_at("goal-1", now()).unwrap();
        store.mark_complete_at("goal-2", now()).unwrap();

        let views = store.query(&GoalQuery {
            filter: GoalFilter::Completed,
            category: Some("health".to_string()),
            search: "workout".to_string(),
            sort: SortKey::Id,
        });
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].definition.id, "goal-2");
    }

    #[test]
    fn query_sorts_by_descending_progress() {
        let mut store = test_store();
        store.adjust_progress_at("goal-3", 12, now()).unwrap(); // 50%
        store.adjust_progress_at("goal-5", 1000, now()).unwrap(); // 20%
        store.mark_complete_at("goal-6", now()).unwrap(); // 100%

        let views = store.query(&GoalQuery {
            sort: SortKey::Progress,
            ..GoalQuery::default()
        });
        assert_eq!(views[0].definition.id, "goal-6");
        assert_eq!(views[1].definition.id, "goal-3");
        assert_eq!(views[2].definition.id, "goal-5");
    }

    #[test]
    fn query_sorts_by_name_ascending() {
        let store = test_store();
        let views = store.query(&GoalQuery {
            sort: SortKey::Name,
            ..GoalQuery::default()
        });
        let names: Vec<_> = views.iter().map(|view| view.definition.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn adjust_saturates_instead_of_overflowing() {
        // A blob edited out of band can carry an arbitrarily large
        // current; adding to it must clamp, not wrap.
        let mut progress = ProgressData::default();
        progress.goals.insert(
            "goal-3".to_string(),
            ProgressRecord {
                current: i64::MAX,
                completed: true,
                last_updated: now().to_rfc3339(),
            },
        );
        let mut store = GoalStore::new(default_catalog(), progress);

        let record = store.adjust_progress_at("goal-3", 1, later()).unwrap();
        assert_eq!(record.current, 24);
        assert!(record.completed);

        let record = store.adjust_progress_at("goal-3", i64::MIN, later()).unwrap();
        assert_eq!(record.current, 0);
        assert!(!record.completed);
    }

    #[test]
    fn adjust_repairs_stale_completed_flag_without_stamping() {
        // current == target but completed was seeded false; a boundary
        // no-op still re-derives the flag, leaving the timestamp alone.
        let mut progress = ProgressData::default();
        progress.goals.insert(
            "goal-3".to_string(),
            ProgressRecord {
                current: 24,
                completed: false,
                last_updated: now().to_rfc3339(),
            },
        );
        let mut store = GoalStore::new(default_catalog(), progress);

        let record = store.adjust_progress_at("goal-3", 1, later()).unwrap();
        assert_eq!(record.current, 24);
        assert!(record.completed);
        assert_eq!(record.last_updated, now().to_rfc3339());
    }

    #[test]
    fn view_reports_raw_percent_past_100_for_oversized_blob() {
        // A blob edited out of band is loaded as-is; clamping happens
        // only on mutation.
        let mut progress = ProgressData::default();
        progress.goals.insert(
            "goal-3".to_string(),
            ProgressRecord {
                current: 30,
                completed: true,
                last_updated: now().to_rfc3339(),
            },
        );
        let store = GoalStore::new(default_catalog(), progress);

        let views = store.query(&GoalQuery::default());
        let book = views
            .iter()
            .find(|view| view.definition.id == "goal-3")
            .unwrap();
        assert_eq!(book.percent, 125.0);
    }

    #[test]
    fn categories_are_distinct_in_catalog_order() {
        let store = test_store();
        assert_eq!(
            store.categories(),
            vec!["learning", "health", "social", "finance", "career"]
        );
    }

    #[test]
    fn raw_percent_guards_non_positive_target() {
        assert_eq!(raw_percent(10, 0), 0.0);
        assert_eq!(raw_percent(10, -5), 0.0);
        assert_eq!(raw_percent(50, 200), 25.0);
    }

    #[test]
    fn milestone_stays_completed_after_mark() {
        let mut store = test_store();
        store.mark_complete_at("goal-6", now()).unwrap();
        let views = store.query(&GoalQuery::default());
        let milestone = views
            .iter()
            .find(|view| view.definition.kind == GoalType::Milestone)
            .unwrap();
        assert!(milestone.completed);
        assert_eq!(milestone.current, milestone.definition.target);
    }
}
