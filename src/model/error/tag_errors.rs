use std::fmt;

/// a payload failed one of the structural rules in [`crate::tags::validation`].
/// The store is never touched when one of these is returned
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ValidationError {
    /// the payload field that failed, e.g. `tag` or `params[0].db_column`
    pub field: String,
    /// human-readable reason, safe to show to the user
    pub reason: String,
}

#[derive(Debug, PartialEq)]
pub enum CreateTagError {
    /// the payload is invalid
    Validation(ValidationError),
    /// the caller gave up before the tag was stored
    Cancelled,
}

#[derive(Debug, PartialEq)]
pub enum GetTagError {
    /// the caller gave up before the store was read
    Cancelled,
}

#[derive(Debug, PartialEq)]
pub enum UpdateTagError {
    /// the payload is invalid
    Validation(ValidationError),
    /// no tag with that id can be found
    TagNotFound,
    /// the caller gave up before the tag was replaced
    Cancelled,
}

#[derive(Debug, PartialEq)]
pub enum DeleteTagError {
    /// no tag with that id can be found
    TagNotFound,
    /// the caller gave up before the tag was removed
    Cancelled,
}

// ----------------------------------

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl From<ValidationError> for CreateTagError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ValidationError> for UpdateTagError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
