//! Structural checks run on a tag payload before it is allowed anywhere near the store.
//!
//! The single-value validators are pure: they only look at the value passed to them and return
//! the reason it was rejected. [`validate_tag`] composes them over a whole payload and reports
//! the first failure.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::error::tag_errors::ValidationError;
use crate::tags::models::{ParamPayload, TagPayload};

const TAG_NAME_MIN_LENGTH: usize = 2;
const TAG_NAME_MAX_LENGTH: usize = 100;
const DB_COLUMN_MAX_LENGTH: usize = 100;
const DISPLAY_NAME_MAX_LENGTH: usize = 200;

/// a non-empty query must start with one of these (case-insensitive)
pub const SQL_KEYWORDS: [&str; 16] = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "WITH", "CREATE", "ALTER", "DROP", "TRUNCATE", "MERGE",
    "CALL", "EXEC", "EXECUTE", "EXPLAIN", "DESCRIBE", "SHOW",
];

//language=RegExp
static TAG_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9_-]+$").unwrap());
//language=RegExp
static DB_COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
//language=RegExp
static QUERY_STRUCTURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(SELECT\s+.+\s+FROM|INSERT\s+INTO|UPDATE\s+.+\s+SET|DELETE\s+FROM|WITH\s+.+\s+AS|CREATE|ALTER|DROP|TRUNCATE|MERGE|CALL|EXEC|EXECUTE|EXPLAIN|DESCRIBE|SHOW)",
    )
    .unwrap()
});

/// checks that a tag name is 2-100 characters of letters, digits, `_` and `-`
pub fn validate_tag_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Tag name is required".to_string());
    }
    let length = name.chars().count();
    if !(TAG_NAME_MIN_LENGTH..=TAG_NAME_MAX_LENGTH).contains(&length) {
        return Err(format!(
            "Tag name must be between {TAG_NAME_MIN_LENGTH} and {TAG_NAME_MAX_LENGTH} characters"
        ));
    }
    if !TAG_NAME_PATTERN.is_match(name) {
        return Err(
            "Tag name can only contain letters, numbers, underscores and hyphens".to_string(),
        );
    }
    Ok(())
}

/// shallow, keyword-based check of a query. This does not parse the sql, it only makes sure the
/// query starts with a known statement keyword and that a `SELECT` has a `FROM` after it.
///
/// An empty or all-whitespace query is always valid since the field is optional
pub fn validate_query(query: &str) -> Result<(), String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    let upper = trimmed.to_uppercase();
    if !SQL_KEYWORDS.iter().any(|keyword| upper.starts_with(keyword)) {
        return Err(format!(
            "Query must start with a valid SQL keyword ({}, etc.)",
            SQL_KEYWORDS[..5].join(", ")
        ));
    }
    if upper.starts_with("SELECT") && !QUERY_STRUCTURE_PATTERN.is_match(&upper) {
        return Err("SELECT query must include FROM clause".to_string());
    }
    Ok(())
}

/// checks that a column name is a plain sql identifier
pub fn validate_db_column(column: &str) -> Result<(), String> {
    if column.is_empty() {
        return Err("DB column is required".to_string());
    }
    if column.chars().count() > DB_COLUMN_MAX_LENGTH {
        return Err(format!(
            "DB column must be at most {DB_COLUMN_MAX_LENGTH} characters"
        ));
    }
    if !DB_COLUMN_PATTERN.is_match(column) {
        return Err("DB column must start with a letter or underscore, and contain only letters, numbers and underscores"
            .to_string());
    }
    Ok(())
}

pub fn validate_display_name(display_name: &str) -> Result<(), String> {
    if display_name.is_empty() {
        return Err("Display name is required".to_string());
    }
    if display_name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
        return Err(format!(
            "Display name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"
        ));
    }
    Ok(())
}

/// runs every validator over the passed payload, returning the first failure along with the field
/// it happened on
pub fn validate_tag(payload: &TagPayload) -> Result<(), ValidationError> {
    validate_tag_name(&payload.tag).map_err(|reason| ValidationError::new("tag", reason))?;
    validate_query(&payload.query).map_err(|reason| ValidationError::new("query", reason))?;
    for (index, param) in payload.params.iter().enumerate() {
        validate_param(index, param)?;
    }
    Ok(())
}

fn validate_param(index: usize, param: &ParamPayload) -> Result<(), ValidationError> {
    validate_db_column(&param.db_column)
        .map_err(|reason| ValidationError::new(format!("params[{index}].db_column"), reason))?;
    validate_display_name(&param.display_name)
        .map_err(|reason| ValidationError::new(format!("params[{index}].display_name"), reason))
}
