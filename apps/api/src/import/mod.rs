// LinkedIn profile import.
// classifier -> sections -> builder form the parser: pure, total, no I/O, no logging.
// extractor, review and handlers belong to the hosting service around it.

pub mod builder;
pub mod classifier;
pub mod dates;
pub mod extractor;
pub mod handlers;
pub mod review;
pub mod sections;

pub use builder::{parse, parse_linkedin_text, ImportOptions};
