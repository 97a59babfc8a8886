use serde::{Deserialize, Serialize};
use validator::Validate;

/// One trackable habit: either from the built-in catalog or a user's custom
/// pool. `id` is unique across the union of both for any given user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub is_custom: bool,
}

/// The compiled-in habit catalog. Immutable; custom habits live in the
/// per-user pool and must not collide with these ids.
pub fn builtin_catalog() -> Vec<HabitDefinition> {
    const BUILTINS: &[(&str, &str, &str)] = &[
        ("drink-water", "Drink Water", "droplet"),
        ("exercise", "Exercise", "activity"),
        ("meditate", "Meditate", "wind"),
        ("read", "Read", "book-open"),
        ("sleep-early", "Sleep Early", "moon"),
        ("journal", "Journal", "edit-3"),
        ("walk", "Go for a Walk", "map"),
        ("eat-healthy", "Eat Healthy", "apple"),
        ("gratitude", "Practice Gratitude", "heart"),
        ("no-social-media", "No Social Media", "smartphone-off"),
    ];

    BUILTINS
        .iter()
        .map(|(id, name, icon)| HabitDefinition {
            id: (*id).into(),
            name: (*name).into(),
            icon: (*icon).into(),
            is_custom: false,
        })
        .collect()
}

pub fn builtin_by_id(id: &str) -> Option<HabitDefinition> {
    builtin_catalog().into_iter().find(|h| h.id == id)
}

/// Derive a custom habit id from its user-entered name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomHabitRequest {
    #[validate(length(min = 1, max = 80, message = "Habit name must be 1-80 characters"))]
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MasterListMutation {
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct MasterListResponse {
    pub habit_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HabitCatalogResponse {
    pub builtin: Vec<HabitDefinition>,
    pub custom: Vec<HabitDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = builtin_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|h| h.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Morning Pages"), "morning-pages");
        assert_eq!(slugify("  Cold   Shower! "), "cold-shower");
        assert_eq!(slugify("10k steps"), "10k-steps");
    }

    #[test]
    fn slugify_can_collide_with_builtin() {
        // The collision the create handler must reject.
        assert_eq!(slugify("Drink Water"), "drink-water");
        assert!(builtin_by_id(&slugify("Drink Water")).is_some());
    }
}
