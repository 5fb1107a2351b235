//! Generates GoFrame logic-layer and model boilerplate from database tables.
//!
//! For every table the columns are introspected, the base columns are dropped,
//! the rest are rendered into aligned field blocks and substituted into the
//! model and logic templates. Files that already exist are never touched, so
//! hand edits survive regeneration.

pub mod column_mapping;
pub mod config;
pub mod database_schema;
pub mod error;
pub mod field_filter;
pub mod field_renderer;
pub mod file_writer;
pub mod go_mod;
pub mod logic_generator;
pub mod naming;
pub mod table_writer;
pub mod template;
pub mod types;

pub use error::GenerationError;
pub use logic_generator::{GenerationReport, LogicGenerator, TableReport};
