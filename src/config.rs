//! Configuration loader and schema types.
//!
//! Settings come from struct defaults, an optional TOML file and
//! `TAPEDECK__*` environment variables, in increasing precedence.

mod load;
mod schema;

pub use load::{default_config_path, default_log_path, resolve_config_path};
pub use schema::*;
