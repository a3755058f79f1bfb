//! Query filters.
//!
//! The store's filter language is richer than what this workspace needs;
//! the only shape we ever send is a single-field string equality (the
//! deletion guard's `category == id` existence probe), so that is all the
//! type models.

use std::fmt;

/// A single-field equality filter, `field = "value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: String,
    value: String,
}

impl Filter {
    /// Match records whose `field` equals `value` exactly.
    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Filter {
    /// Render in the store's filter syntax. Quotes and backslashes in the
    /// value are escaped so an id can never break out of the string literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        write!(f, "{} = \"{}\"", self.field, escaped)
    }
}
