use anyhow::{Result, bail};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const SOURCES_ENV: &str = "JAVADOC_INDEX_SOURCES";
pub const LOG_LEVEL_ENV: &str = "JAVADOC_INDEX_LOG";
pub const DEFAULT_SOURCE_ROOT: &str = "src/main/java";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Source roots from the command line, then `JAVADOC_INDEX_SOURCES`, then
/// `src/main/java` when it exists.
pub fn resolve_source_roots(explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    source_roots_from(explicit, env::var_os(SOURCES_ENV), Path::new(DEFAULT_SOURCE_ROOT))
}

fn source_roots_from(
    explicit: &[PathBuf],
    from_env: Option<OsString>,
    fallback: &Path,
) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    if let Some(value) = from_env.filter(|v| !v.is_empty()) {
        return Ok(env::split_paths(&value).collect());
    }

    if fallback.is_dir() {
        return Ok(vec![fallback.to_path_buf()]);
    }

    bail!(
        "No source paths given: pass them as arguments, set {SOURCES_ENV}, or run from a project with {}",
        fallback.display()
    );
}

pub fn resolve_log_level(cli: &Cli) -> String {
    log_level_from(cli.log_level.clone(), env::var(LOG_LEVEL_ENV).ok())
}

fn log_level_from(explicit: Option<String>, from_env: Option<String>) -> String {
    explicit
        .or(from_env)
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
