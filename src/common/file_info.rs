//! Paths handed to the engine at startup.

use std::io;
use std::path::{Path, PathBuf};

/// The package, data and cache locations of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    package_path: PathBuf,
    data_directory: PathBuf,
    cache_directory: PathBuf,
}

impl FileInfo {
    /// Bundle explicit paths.
    pub fn new(
        package_path: impl Into<PathBuf>,
        data_directory: impl Into<PathBuf>,
        cache_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_path: package_path.into(),
            data_directory: data_directory.into(),
            cache_directory: cache_directory.into(),
        }
    }

    /// Resolve the platform locations for `app_name`.
    ///
    /// The package path is the running executable. Data and cache fall back
    /// to the temp directory when the platform has no such location.
    pub fn discover(app_name: &str) -> Self {
        let package_path = std::env::current_exe().unwrap_or_else(|_| PathBuf::from(app_name));
        let data_directory = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(app_name);
        let cache_directory = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(app_name);

        Self::new(package_path, data_directory, cache_directory)
    }

    /// Create the data and cache directories if they are missing.
    pub fn ensure_directories(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)?;
        std::fs::create_dir_all(&self.cache_directory)
    }

    /// Path of the application package (the executable).
    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Directory for persistent engine files such as logs.
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// Directory for disposable files.
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }
}
