use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbeads_core::{DomainError, DomainResult};

/// Category record. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl NewCategory {
    pub fn from_parts(name: Option<String>, description: Option<String>) -> DomainResult<Self> {
        let name = name.ok_or_else(|| DomainError::missing_field("name"))?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            name,
            description: description.unwrap_or_default(),
        })
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let err = NewCategory::from_parts(None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: name");

        let err = NewCategory::from_parts(Some("   ".into()), None).unwrap_err();
        assert_eq!(err.to_string(), "name cannot be empty");
    }

    #[test]
    fn description_defaults_to_empty() {
        let c = NewCategory::from_parts(Some("Seed beads".into()), None).unwrap();
        assert_eq!(c.description, "");
    }
}
