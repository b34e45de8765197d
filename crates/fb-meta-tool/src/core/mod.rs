//! Core abstractions shared by drivers and pipelines.
//!
//! - [`schema`]: domain, table and procedure metadata
//! - [`traits`]: [`MetadataSource`] for reading a schema and
//!   [`ScriptExecutor`] for transactional statement execution
//!
//! Drivers (`drivers/firebird`) implement the traits; the renderer and the
//! applier only see the traits, so both are testable with in-memory
//! implementations.

pub mod schema;
pub mod traits;

pub use schema::{Column, Domain, Parameter, Procedure, Schema, Table};
pub use traits::{MetadataSource, ScriptExecutor};
