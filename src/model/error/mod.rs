pub mod tag_errors;
