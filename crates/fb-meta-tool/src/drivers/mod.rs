//! Database driver implementations.
//!
//! - [`firebird`]: Firebird driver (feature `firebird`)
//!
//! Each driver implements the core traits: `MetadataSource` for export and
//! `ScriptExecutor` for applying scripts.

pub mod firebird;

pub use firebird::{create_database, FirebirdReader, FirebirdWriter};
