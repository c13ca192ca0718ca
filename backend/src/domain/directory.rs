//! Directory search over user profiles.

use super::User;

/// Filter `users` by a case-insensitive substring `term`.
///
/// A user matches when the lowercased term occurs in their name or in any
/// offered or wanted skill. An empty term matches everyone. The result keeps
/// the input order.
///
/// # Examples
/// ```
/// use backend::domain::search;
///
/// assert!(search(&[], "guitar").is_empty());
/// ```
pub fn search<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    if term.is_empty() {
        return users.iter().collect();
    }
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| matches_term(user, &needle))
        .collect()
}

fn matches_term(user: &User, needle: &str) -> bool {
    user.name().to_lowercase().contains(needle)
        || user.skills_offered().any_contains_lowercase(needle)
        || user.skills_wanted().any_contains_lowercase(needle)
}
