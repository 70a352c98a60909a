use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Spending/income category. The set is closed; anything the server sends
/// that we don't know is folded into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Groceries,
    Transport,
    Restaurants,
    Entertainment,
    Utilities,
    Transfer,
    Salary,
    Shopping,
    Health,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Groceries,
        Category::Transport,
        Category::Restaurants,
        Category::Entertainment,
        Category::Utilities,
        Category::Transfer,
        Category::Salary,
        Category::Shopping,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Transport => "transport",
            Category::Restaurants => "restaurants",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Transfer => "transfer",
            Category::Salary => "salary",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Education => "education",
            Category::Other => "other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Groceries => "🛒",
            Category::Transport => "🚌",
            Category::Restaurants => "🍽️",
            Category::Entertainment => "🎬",
            Category::Utilities => "💡",
            Category::Transfer => "↔️",
            Category::Salary => "💼",
            Category::Shopping => "🛍️",
            Category::Health => "🏥",
            Category::Education => "📚",
            Category::Other => "💰",
        }
    }

    /// Capitalized name, e.g. "Groceries"
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Icon and name together, as shown in pickers and badges
    pub fn badge(&self) -> String {
        format!("{} {}", self.icon(), self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Category::Other))
    }
}

/// Category selection in the transaction filter chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }

    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All categories".to_string(),
            CategoryFilter::Only(category) => category.badge(),
        }
    }

    /// "all" followed by every category, in chip order
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.iter().copied().map(CategoryFilter::Only))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(
            "fuel".parse::<Category>().unwrap_err().to_string(),
            "Unknown category: fuel"
        );
    }

    #[test]
    fn test_unknown_wire_category_becomes_other() {
        let category: Category = serde_json::from_str(r#""crypto""#).unwrap();
        assert_eq!(category, Category::Other);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Groceries.label(), "Groceries");
        assert_eq!(Category::Transport.badge(), "🚌 transport");
    }

    #[test]
    fn test_filter_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 12);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[0].category(), None);
        assert_eq!(options[1].category(), Some(Category::Groceries));
    }
}
