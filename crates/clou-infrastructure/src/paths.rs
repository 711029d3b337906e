//! Unified path management for clou configuration files.
//!
//! All clou configuration and credential data live under a single per-user
//! config directory, resolved the same way on every platform.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for clou.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/clou/              # Config directory
/// ├── config.toml              # Transport configuration (base URL, timeout)
/// └── credentials.json         # Persisted token + user record
/// ```
pub struct ClouPaths;

impl ClouPaths {
    /// Returns the clou configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/clou/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("clou"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the transport configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted credentials file.
    ///
    /// # Security Note
    ///
    /// The file holds a live API token; it should carry restrictive
    /// permissions (e.g., 600) on Unix systems.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        if let Ok(dir) = ClouPaths::config_dir() {
            assert!(ClouPaths::config_file().unwrap().starts_with(&dir));
            assert!(ClouPaths::credentials_file().unwrap().starts_with(&dir));
        }
    }
}
