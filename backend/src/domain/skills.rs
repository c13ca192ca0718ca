//! Ordered skill lists attached to user profiles.

use serde::{Deserialize, Serialize};

/// Ordered list of free-text skill labels.
///
/// Order is significant and duplicates are preserved; the list is exactly
/// what the user typed, minus blank entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillList(Vec<String>);

impl SkillList {
    /// Build a list from already separated labels.
    pub fn new(skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(skills.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated input field.
    ///
    /// Each segment is trimmed and empty segments are dropped.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SkillList;
    ///
    /// let skills = SkillList::parse_comma_separated("a, b ,, c");
    /// assert_eq!(skills.as_slice(), ["a", "b", "c"]);
    /// ```
    pub fn parse_comma_separated(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Whether any label contains `needle`, which must already be lowercase.
    pub fn any_contains_lowercase(&self, needle: &str) -> bool {
        self.0
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
    }

    /// Labels in their stored order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SkillList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}
