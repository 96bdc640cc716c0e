//! Expense categories.
//!
//! Reports always list the canonical categories first, in the order given by
//! [`CanonicalCategory::ALL`]. Any other category name that survives entry
//! validation is tolerated and listed after them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Category::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("category name must not be empty")]
    Empty,
    #[error("category name may only contain lowercase letters, digits, '-' or '_'")]
    InvalidCharacters,
}

/// One of the fixed categories present in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalCategory {
    Food,
    Health,
    Housing,
    Sports,
    Education,
}

impl CanonicalCategory {
    /// Canonical categories in report order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Health,
        Self::Housing,
        Self::Sports,
        Self::Education,
    ];

    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Health => "health",
            Self::Housing => "housing",
            Self::Sports => "sports",
            Self::Education => "education",
        }
    }
}

impl FromStr for CanonicalCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or(())
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated category name attached to an expense entry.
///
/// # Examples
/// ```
/// use expense_reports::domain::{CanonicalCategory, Category};
///
/// let food = Category::new("food").expect("valid name");
/// assert_eq!(food.canonical(), Some(CanonicalCategory::Food));
/// assert!(Category::new("Food ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Validate and construct a category name.
    pub fn new(name: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(CategoryValidationError::InvalidCharacters);
        }
        Ok(Self(name))
    }

    /// The canonical variant this name denotes, if any.
    pub fn canonical(&self) -> Option<CanonicalCategory> {
        self.0.parse().ok()
    }

    /// Borrow the category name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalCategory> for Category {
    fn from(value: CanonicalCategory) -> Self {
        Self(value.as_str().to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

/// Set of categories accepted when new entries are recorded.
///
/// Always contains the canonical categories; deployments may register extra
/// names through configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    extra: Vec<Category>,
}

impl CategoryRegistry {
    /// Registry containing only the canonical categories.
    pub fn canonical_only() -> Self {
        Self::default()
    }

    /// Registry accepting the canonical categories plus `extra`.
    ///
    /// Duplicates and names that are already canonical are ignored.
    pub fn with_extra(extra: impl IntoIterator<Item = Category>) -> Self {
        let mut registry = Self::default();
        for category in extra {
            if category.canonical().is_none() && !registry.extra.contains(&category) {
                registry.extra.push(category);
            }
        }
        registry
    }

    /// Whether entries may be recorded under `category`.
    pub fn allows(&self, category: &Category) -> bool {
        category.canonical().is_some() || self.extra.contains(category)
    }

    /// Extra categories registered beyond the canonical set.
    pub fn extra(&self) -> &[Category] {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("food", Some(CanonicalCategory::Food))]
    #[case("education", Some(CanonicalCategory::Education))]
    #[case("travel", None)]
    fn canonical_lookup(#[case] name: &str, #[case] expected: Option<CanonicalCategory>) {
        let category = Category::new(name).expect("valid name");
        assert_eq!(category.canonical(), expected);
    }

    #[rstest]
    #[case("", CategoryValidationError::Empty)]
    #[case("Food", CategoryValidationError::InvalidCharacters)]
    #[case("eating out", CategoryValidationError::InvalidCharacters)]
    fn rejects_invalid_names(#[case] name: &str, #[case] expected: CategoryValidationError) {
        assert_eq!(Category::new(name), Err(expected));
    }

    #[rstest]
    fn canonical_order_is_fixed() {
        let names: Vec<_> = CanonicalCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["food", "health", "housing", "sports", "education"]);
    }

    #[rstest]
    fn registry_accepts_canonical_and_registered_extras() {
        let travel = Category::new("travel").expect("valid name");
        let registry = CategoryRegistry::with_extra([
            travel.clone(),
            travel.clone(),
            Category::from(CanonicalCategory::Food),
        ]);

        assert_eq!(registry.extra(), [travel.clone()]);
        assert!(registry.allows(&travel));
        assert!(registry.allows(&Category::from(CanonicalCategory::Sports)));
        assert!(!CategoryRegistry::canonical_only().allows(&travel));
    }
}
