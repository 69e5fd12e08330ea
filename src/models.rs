use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of objective a goal tracks. Milestone goals are
/// all-or-nothing and are normally finished via "mark done" rather
/// than incremental adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Counter,
    Followers,
    Money,
    Milestone,
}

/// Static, configuration-supplied description of a trackable goal.
/// Never mutated at runtime; only progress records change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target: i64,
    pub unit: String,
    #[serde(default = "default_increment")]
    pub increment: i64,
    #[serde(rename = "type")]
    pub kind: GoalType,
    pub emoji: String,
    pub color: String,
}

fn default_increment() -> i64 {
    1
}

/// Mutable per-goal progress. A missing record is equivalent to the
/// default (nothing achieved, not completed, never updated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressRecord {
    pub current: i64,
    pub completed: bool,
    #[serde(default)]
    pub last_updated: String,
}

/// The persisted blob: a flat map from goal id to its progress.
/// No version field; a malformed blob degrades to empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProgressData {
    pub goals: BTreeMap<String, ProgressRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalFilter {
    #[default]
    All,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Stable catalog order.
    #[default]
    Id,
    /// Descending percentage.
    Progress,
    /// Lexicographic ascending by name.
    Name,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalQuery {
    #[serde(default)]
    pub filter: GoalFilter,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub id: String,
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub id: String,
}

/// One row of a query result: the definition, the (possibly default)
/// record, and the raw percentage. The percentage is not clamped here;
/// a hand-edited blob can put `current` past `target` and sorting
/// still wants the true ratio.
#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub definition: GoalDefinition,
    pub current: i64,
    pub completed: bool,
    pub last_updated: String,
    pub percent: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsSummary {
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub average_progress_percent: i64,
    pub total_count: usize,
}
