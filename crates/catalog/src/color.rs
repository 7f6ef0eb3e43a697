use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbeads_core::{DomainError, DomainResult};

/// Color record. Declared as part of the catalog domain; not wired to
/// products in the current data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColor {
    pub name: String,
}

impl NewColor {
    pub fn from_parts(name: Option<String>) -> DomainResult<Self> {
        let name = name.ok_or_else(|| DomainError::validation("Name is required"))?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        Ok(Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert!(NewColor::from_parts(None).is_err());
        assert!(NewColor::from_parts(Some("".into())).is_err());
        assert!(NewColor::from_parts(Some("turquoise".into())).is_ok());
    }
}
