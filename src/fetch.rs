//! Registry download and cache.
//!
//! `gl.xml` weighs a few megabytes and changes rarely, so fetched copies are
//! kept under the user cache directory (`<cache>/glgen/gl.xml`) and reused
//! until a refresh is forced. Cache trouble (no cache dir, unwritable path)
//! degrades to a plain fetch; only a failed download is fatal. Retry policy
//! belongs to the caller, not here.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/KhronosGroup/OpenGL-Registry/main/xml/gl.xml";

const CACHE_SUBDIR: &str = "glgen";
const CACHE_FILE: &str = "gl.xml";

/// Return the registry document text, from cache when possible.
pub fn load_registry(force_update: bool) -> Result<String> {
    let Some(path) = cache_path() else {
        debug!("no user cache directory; fetching registry directly");
        return fetch_registry();
    };

    if !force_update && path.is_file() {
        debug!(path = %path.display(), "using cached registry");
        return fs::read_to_string(&path)
            .with_context(|| format!("reading cached registry {}", path.display()));
    }

    let data = fetch_registry()?;
    if let Some(dir) = path.parent() {
        if let Err(err) = fs::create_dir_all(dir).and_then(|()| fs::write(&path, &data)) {
            warn!(path = %path.display(), "failed to cache registry: {err}");
        }
    }
    Ok(data)
}

fn cache_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join(CACHE_SUBDIR).join(CACHE_FILE))
}

fn fetch_registry() -> Result<String> {
    info!(url = REGISTRY_URL, "fetching OpenGL registry");
    let response = reqwest::blocking::get(REGISTRY_URL)
        .with_context(|| format!("fetching registry from {REGISTRY_URL}"))?
        .error_for_status()
        .context("registry server returned an error status")?;
    response.text().context("reading registry response body")
}
