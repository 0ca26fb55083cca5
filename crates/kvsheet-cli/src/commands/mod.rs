pub mod config;
pub mod export;
pub mod parse;

use kvsheet_core::config::{load_config, Config};
use kvsheet_core::error::KvsheetError;
use std::path::Path;

/// Config from `--config`, or the defaults.
fn resolve_config(path: Option<&Path>) -> Result<Config, KvsheetError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}
