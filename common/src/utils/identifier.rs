//! Oracle identifier validator.
//!
//! Table names end up as bind values in the catalog query, but they are
//! still checked against the unquoted identifier rules so a typo in the
//! configuration is reported instead of silently matching nothing.

use crate::errors::AppError;

/// Maximum identifier length since Oracle 12.2.
const MAX_IDENTIFIER_LEN: usize = 128;

/// Validates unquoted Oracle identifiers.
pub struct IdentifierValidator;

impl IdentifierValidator {
    /// Normalizes a table name to upper case and validates it.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the name is empty, too long, does not
    /// start with a letter, or contains characters other than `A-Z`, `0-9`,
    /// `_`, `$` and `#`.
    pub fn normalize(name: &str) -> Result<String, AppError> {
        let upper = name.trim().to_uppercase();
        if upper.is_empty() {
            return Err(AppError::Validation("table name must not be empty".into()));
        }
        if upper.len() > MAX_IDENTIFIER_LEN {
            return Err(AppError::Validation(format!(
                "table name too long ({} > {}): {}",
                upper.len(),
                MAX_IDENTIFIER_LEN,
                upper
            )));
        }
        if !Self::is_valid(&upper) {
            return Err(AppError::Validation(format!(
                "invalid table name: {}",
                name.trim()
            )));
        }
        Ok(upper)
    }

    /// Checks an already upper-cased identifier.
    pub fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_uppercase() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '_' | '$' | '#'))
    }

    /// Parses a comma-separated table list, dropping blanks and duplicates.
    /// Order of first appearance is preserved.
    pub fn parse_list(raw: &str) -> Result<Vec<String>, AppError> {
        let mut tables: Vec<String> = Vec::new();
        for part in raw.split(',').filter(|s| !s.trim().is_empty()) {
            let name = Self::normalize(part)?;
            if !tables.contains(&name) {
                tables.push(name);
            }
        }
        Ok(tables)
    }
}
