use crate::error::{Result, WikiError};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "plainwiki.json";
const DEFAULT_FILE_EXT: &str = ".txt";

/// Configuration for plainwiki, stored in `plainwiki.json`.
///
/// Every field has a default, so a partial file (or none at all) is fine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WikiConfig {
    /// Directory holding one file per page
    pub data_dir: PathBuf,

    /// Directory served under `/static/`
    pub static_dir: PathBuf,

    /// Directory with `home.html`, `view.html`, `edit.html` and `new.html`.
    /// When unset, the built-in templates are used.
    pub templates_dir: Option<PathBuf>,

    /// File extension for page files (e.g. ".txt")
    pub file_ext: String,

    pub bind: String,

    pub port: u16,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
            templates_dir: None,
            file_ext: DEFAULT_FILE_EXT.to_string(),
            bind: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl WikiConfig {
    /// Load config from the given file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(WikiError::Io)?;
        let mut config: WikiConfig =
            serde_json::from_str(&content).map_err(WikiError::Serialization)?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    /// Find and load the config file.
    ///
    /// An explicit path must exist. Otherwise `plainwiki.json` is looked up in
    /// `cwd`, then in the user config directory, falling back to defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(WikiError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let local = cwd.join(CONFIG_FILENAME);
        if local.exists() {
            return Self::load(local);
        }

        match user_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "plainwiki").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
