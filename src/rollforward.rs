//! Habit roll-forward: reconciling the master habit list against per-day
//! snapshots.
//!
//! The rules, per (user, day) snapshot:
//! - No snapshot yet → materialize one from the current master list, all
//!   incomplete. This holds for past days too: a past day visited for the
//!   first time gets today's list and is frozen from then on.
//! - Snapshot exists and the day is strictly before today → return it
//!   verbatim. History reflects what the list looked like when that day was
//!   first loaded, not the current master list.
//! - Snapshot exists and the day is today or later → append master habits
//!   not yet present by id (incomplete), leave everything already there
//!   untouched, including completion state.
//!
//! Only explicit per-day toggles and removals ever mutate a past snapshot.
//! The functions here are pure; the handler layer owns persistence.

use std::collections::HashMap;

use crate::models::habit::{builtin_by_id, HabitDefinition};
use crate::models::snapshot::DayHabit;

/// Resolve master-list ids against the built-in catalog and the user's
/// custom pool, in that order. Ids that resolve nowhere are skipped — a
/// stale master entry must not poison the day.
pub fn resolve_master(master_ids: &[String], custom_pool: &[HabitDefinition]) -> Vec<DayHabit> {
    let custom: HashMap<&str, &HabitDefinition> =
        custom_pool.iter().map(|h| (h.id.as_str(), h)).collect();

    master_ids
        .iter()
        .filter_map(|id| {
            if let Some(builtin) = builtin_by_id(id) {
                Some(DayHabit::from_definition(&builtin))
            } else if let Some(custom) = custom.get(id.as_str()) {
                Some(DayHabit::from_definition(custom))
            } else {
                tracing::warn!(habit_id = %id, "master list id resolves to no habit, skipping");
                None
            }
        })
        .collect()
}

/// Append-merge newly resolved master habits into an existing snapshot.
///
/// Returns `None` when nothing was appended (no write needed). Existing
/// entries are never removed or modified.
pub fn merge_master(existing: &[DayHabit], resolved_master: &[DayHabit]) -> Option<Vec<DayHabit>> {
    let additions: Vec<DayHabit> = resolved_master
        .iter()
        .filter(|m| !existing.iter().any(|e| e.id == m.id))
        .cloned()
        .collect();

    if additions.is_empty() {
        return None;
    }

    let mut merged = existing.to_vec();
    merged.extend(additions);
    Some(merged)
}

/// Flip completion for one habit in one day's snapshot. Returns `None` when
/// the habit is not in the snapshot.
pub fn toggle_completion(habits: &[DayHabit], habit_id: &str) -> Option<Vec<DayHabit>> {
    if !habits.iter().any(|h| h.id == habit_id) {
        return None;
    }
    Some(
        habits
            .iter()
            .map(|h| {
                let mut h = h.clone();
                if h.id == habit_id {
                    h.completed = !h.completed;
                }
                h
            })
            .collect(),
    )
}

/// Remove one habit from one day's snapshot ("not today"). Returns `None`
/// when the habit is not in the snapshot.
pub fn remove_for_day(habits: &[DayHabit], habit_id: &str) -> Option<Vec<DayHabit>> {
    if !habits.iter().any(|h| h.id == habit_id) {
        return None;
    }
    Some(habits.iter().filter(|h| h.id != habit_id).cloned().collect())
}

/// Ratio of completed habits for a day, for the completion trend. `None`
/// for an empty snapshot.
pub fn completion_ratio(habits: &[DayHabit]) -> Option<f64> {
    if habits.is_empty() {
        return None;
    }
    let done = habits.iter().filter(|h| h.completed).count();
    Some(done as f64 / habits.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(id: &str, name: &str) -> HabitDefinition {
        HabitDefinition {
            id: id.into(),
            name: name.into(),
            icon: "star".into(),
            is_custom: true,
        }
    }

    fn day_habit(id: &str, completed: bool) -> DayHabit {
        DayHabit {
            id: id.into(),
            name: id.into(),
            icon: "star".into(),
            is_custom: false,
            completed,
        }
    }

    #[test]
    fn resolve_prefers_builtin_then_custom_and_skips_unknown() {
        let pool = vec![custom("morning-pages", "Morning Pages")];
        let master = vec![
            "exercise".to_string(),
            "morning-pages".to_string(),
            "deleted-habit".to_string(),
        ];
        let resolved = resolve_master(&master, &pool);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id, "exercise");
        assert!(!resolved[0].is_custom);
        assert_eq!(resolved[1].id, "morning-pages");
        assert!(resolved[1].is_custom);
        assert!(resolved.iter().all(|h| !h.completed));
    }

    #[test]
    fn merge_appends_only_missing_ids() {
        let existing = vec![day_habit("habit-a", true)];
        let resolved = vec![day_habit("habit-a", false), day_habit("habit-b", false)];
        let merged = merge_master(&existing, &resolved).unwrap();
        assert_eq!(merged.len(), 2);
        // habit-a keeps its completion state, habit-b arrives incomplete.
        assert!(merged[0].completed);
        assert_eq!(merged[1].id, "habit-b");
        assert!(!merged[1].completed);
    }

    #[test]
    fn merge_with_nothing_new_is_a_noop() {
        let existing = vec![day_habit("habit-a", true)];
        let resolved = vec![day_habit("habit-a", false)];
        assert!(merge_master(&existing, &resolved).is_none());
    }

    #[test]
    fn merge_never_removes_existing_entries() {
        // habit-a was removed from the master list since this snapshot was
        // made; it must survive the merge anyway.
        let existing = vec![day_habit("habit-a", false), day_habit("habit-b", true)];
        let resolved = vec![day_habit("habit-c", false)];
        let merged = merge_master(&existing, &resolved).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].id, "habit-a");
        assert_eq!(merged[1].id, "habit-b");
    }

    #[test]
    fn toggle_flips_exactly_one() {
        let habits = vec![day_habit("habit-a", false), day_habit("habit-b", false)];
        let toggled = toggle_completion(&habits, "habit-b").unwrap();
        assert!(!toggled[0].completed);
        assert!(toggled[1].completed);
        let toggled_back = toggle_completion(&toggled, "habit-b").unwrap();
        assert!(!toggled_back[1].completed);
    }

    #[test]
    fn toggle_unknown_habit_is_an_error() {
        let habits = vec![day_habit("habit-a", false)];
        assert!(toggle_completion(&habits, "habit-z").is_none());
    }

    #[test]
    fn remove_touches_only_that_day() {
        let habits = vec![day_habit("habit-a", false), day_habit("habit-b", true)];
        let removed = remove_for_day(&habits, "habit-a").unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "habit-b");
        assert!(remove_for_day(&habits, "habit-z").is_none());
    }

    #[test]
    fn completion_ratio_handles_empty() {
        assert_eq!(completion_ratio(&[]), None);
        let habits = vec![
            day_habit("a", true),
            day_habit("b", false),
            day_habit("c", true),
            day_habit("d", false),
        ];
        assert_eq!(completion_ratio(&habits), Some(0.5));
    }
}
