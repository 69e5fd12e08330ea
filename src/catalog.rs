use crate::models::{GoalDefinition, GoalType};
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

/// Loads the goal catalog. `GOAL_CATALOG_PATH` may point at a JSON
/// array of definitions; when unset or unreadable the built-in catalog
/// is used instead.
pub async fn load_catalog() -> Vec<GoalDefinition> {
    let Some(path) = catalog_path() else {
        return default_catalog();
    };

    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(catalog) => catalog,
            Err(err) => {
                error!("failed to parse catalog file: {err}");
                default_catalog()
            }
        },
        Err(err) => {
            error!("failed to read catalog file: {err}");
            default_catalog()
        }
    }
}

fn catalog_path() -> Option<PathBuf> {
    env::var("GOAL_CATALOG_PATH").ok().map(PathBuf::from)
}

pub fn default_catalog() -> Vec<GoalDefinition> {
    vec![
        goal("goal-1", "Study 2 hours daily", "learning", 730, "hours", 2, GoalType::Counter, "📚", "#4f8ef7"),
        goal("goal-2", "Workout 5x a week", "health", 260, "sessions", 1, GoalType::Counter, "💪", "#ff6b4a"),
        goal("goal-3", "Read 24 books", "learning", 24, "books", 1, GoalType::Counter, "📖", "#2d7a4b"),
        goal("goal-4", "Reach 1000 followers", "social", 1000, "followers", 25, GoalType::Followers, "🚀", "#9b59b6"),
        goal("goal-5", "Save $5000", "finance", 5000, "dollars", 100, GoalType::Money, "💰", "#e8b031"),
        goal("goal-6", "Launch side project", "career", 1, "launch", 1, GoalType::Milestone, "🎯", "#2f4858"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn goal(
    id: &str,
    name: &str,
    category: &str,
    target: i64,
    unit: &str,
    increment: i64,
    kind: GoalType,
    emoji: &str,
    color: &str,
) -> GoalDefinition {
    GoalDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        target,
        unit: unit.to_string(),
        increment,
        kind,
        emoji: emoji.to_string(),
        color: color.to_string(),
    }
}
