// Presentation layer - page host, documents and markup
pub mod app_state;
pub mod document;
pub mod errors;
pub mod handlers;
pub mod report_document;
pub mod router;
pub mod routes;
pub mod templates;
