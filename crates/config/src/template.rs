//! Template directory resolution
//!
//! The template directory lives next to the installed program. Its location
//! is resolved once per process from the running executable and cached.

use crate::constants::TEMPLATES_DIR_NAME;
use espa_types::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static TEMPLATE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Resolve the absolute path of the bundled template directory.
///
/// The first call locates the running executable, resolves symlinks and
/// appends [`TEMPLATES_DIR_NAME`] to its parent directory. Later calls return
/// the cached path. Whether the directory exists is not checked here.
pub fn resolve_template_dir() -> Result<&'static Path, ConfigError> {
    if let Some(dir) = TEMPLATE_DIR.get() {
        return Ok(dir.as_path());
    }

    let dir = template_dir_for(&install_dir()?)?;
    tracing::debug!(template_dir = %dir.display(), "Resolved template directory");

    // A concurrent caller may have won the race; both computed the same path.
    Ok(TEMPLATE_DIR.get_or_init(|| dir).as_path())
}

/// Directory containing the running executable, with symlinks resolved
pub fn install_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| ConfigError::ResolutionFailed {
        message: format!("cannot locate current executable: {}", e),
    })?;

    let exe = exe.canonicalize().map_err(|e| ConfigError::ResolutionFailed {
        message: format!("cannot canonicalize {}: {}", exe.display(), e),
    })?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::ResolutionFailed {
            message: format!("executable {} has no parent directory", exe.display()),
        })
}

/// Template directory for a given install directory
pub fn template_dir_for(install_dir: &Path) -> Result<PathBuf, ConfigError> {
    if !install_dir.is_absolute() {
        return Err(ConfigError::ResolutionFailed {
            message: format!("install directory {} is not absolute", install_dir.display()),
        });
    }

    Ok(install_dir.join(TEMPLATES_DIR_NAME))
}
