//! LinkedIn profile PDF import for the resume editor.
//!
//! The parser in [`import`] turns flattened PDF text into a [`models::resume::ParsedResume`];
//! everything else is the HTTP service that hosts it.

pub mod config;
pub mod errors;
pub mod import;
pub mod linkedin;
pub mod models;
pub mod routes;
pub mod state;
