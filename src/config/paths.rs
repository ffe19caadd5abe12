//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings + user question list):
//!   Windows: %APPDATA%\interview-practice\
//!   macOS:   ~/Library/Application Support/interview-practice/
//!   Linux:   ~/.config/interview-practice/
//!
//! Data dir (recorded answers):
//!   Windows: %LOCALAPPDATA%\interview-practice\
//!   macOS:   ~/Library/Application Support/interview-practice/
//!   Linux:   ~/.local/share/interview-practice/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `questions.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the optional user question list.
    pub questions_file: PathBuf,
    /// Directory for recorded answer WAV files.
    pub recordings_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "interview-practice";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let questions_file = config_dir.join("questions.json");
        let recordings_dir = data_dir.join("recordings");

        Self {
            config_dir,
            settings_file,
            questions_file,
            recordings_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths.recordings_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .questions_file
            .file_name()
            .is_some_and(|n| n == "questions.json"));
    }
}
