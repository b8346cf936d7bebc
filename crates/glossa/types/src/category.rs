use serde::{Deserialize, Serialize};

/// The ontological category of a term.
///
/// Every term resolves to exactly one category; the classifier never
/// fails to pick one (absence of signal degrades to low confidence
/// instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// A kind or sort of thing (genus).
    Type,
    /// An activity or course of action.
    Proces,
    /// The outcome a process produces.
    Resultaat,
    /// A concrete instance of a type.
    Exemplaar,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Type,
        Category::Proces,
        Category::Resultaat,
        Category::Exemplaar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Type => "TYPE",
            Category::Proces => "PROCES",
            Category::Resultaat => "RESULTAAT",
            Category::Exemplaar => "EXEMPLAAR",
        }
    }

    /// Parse from the upper-case wire form used in configuration files.
    pub fn parse(s: &str) -> Option<Category> {
        match s.trim().to_uppercase().as_str() {
            "TYPE" => Some(Category::Type),
            "PROCES" => Some(Category::Proces),
            "RESULTAAT" => Some(Category::Resultaat),
            "EXEMPLAAR" => Some(Category::Exemplaar),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
