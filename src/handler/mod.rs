pub mod api_handler;
pub mod cors;
