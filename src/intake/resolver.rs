//! Field resolution
//!
//! Each logical field accepts several input names: the camelCase name the
//! HTML form posts, the snake_case name the database stores, and sometimes
//! a generic shorthand. The alias order encodes precedence and is part of
//! the contract; a generic name like `email` is only consulted after the
//! form-specific names.

use super::body::FieldMap;

/// A logical field's resolution contract: the canonical storage name, the
/// ordered list of accepted input names, and the value used when no alias
/// carries a non-blank value.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(
        canonical: &'static str,
        aliases: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            canonical,
            aliases,
            default,
        }
    }

    /// First alias present with a non-blank trimmed value, else the
    /// default. A fully absent field is not an error here; whether that
    /// matters is the validator's call.
    pub fn resolve(&self, fields: &FieldMap) -> String {
        for alias in self.aliases {
            if let Some(value) = fields.get(*alias) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
        self.default.to_string()
    }
}
