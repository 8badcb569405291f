use std::path::PathBuf;

/// Directory under the user config dir holding per-plugin settings.
pub const SETTINGS_DIR_NAME: &str = "harmoniq-standalone";

/// Presentation and storage settings for a host window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostWindowOptions {
    pub title: String,
    /// File extension, without the dot, offered by the state dialogs.
    pub state_extension: String,
    /// File name of the per-plugin default state under the settings root.
    pub default_state_file: String,
    /// Overrides the platform config directory when set.
    pub settings_root: Option<PathBuf>,
}

impl HostWindowOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_settings_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.settings_root = Some(root.into());
        self
    }

    /// Settings root, or `None` when no config directory can be determined.
    pub fn resolve_settings_root(&self) -> Option<PathBuf> {
        self.settings_root
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME)))
    }
}

impl Default for HostWindowOptions {
    fn default() -> Self {
        Self {
            title: "Harmoniq Standalone".to_string(),
            state_extension: "clapwrapper".to_string(),
            default_state_file: "defaults.clapwrapper".to_string(),
            settings_root: None,
        }
    }
}
