//! Local text and status filtering

use std::fmt;
use std::str::FromStr;

use shared::models::AppointmentStatus;
use shared::ModelError;

/// Case-insensitive substring search over `fields`
///
/// An empty (or blank) query matches everything.
pub fn matches_search(fields: &[&str], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&query))
}

/// Status filter chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("todos"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todos" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}
