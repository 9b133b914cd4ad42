use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Album password. Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"********\"")
    }
}

/// CSS selectors and attribute names for the album page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Password input of the login gate.
    pub password_input: String,
    /// One element per thumbnail in the album grid.
    pub thumbnail: String,
    /// Full-size `<img>` shown by the viewer.
    pub viewer_image: String,
    /// Control that closes the viewer.
    pub viewer_close: String,
    /// Thumbnail attribute with a stable id, used in log lines.
    pub thumbnail_id_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            password_input: "#indexlock__input".to_string(),
            thumbnail: "div.showalbum__children.image__main".to_string(),
            viewer_image: "img.viewer__img".to_string(),
            viewer_close: "#viewer__close".to_string(),
            thumbnail_id_attribute: "data-id".to_string(),
        }
    }
}

/// Wait limits and settling delays (optional `[timeouts]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long to wait for the password input after opening the album.
    pub login_gate_secs: u64,
    /// How long to wait for the thumbnail grid after submitting the password.
    pub album_grid_secs: u64,
    /// How long to wait for the viewer to open or close.
    pub viewer_secs: u64,
    /// Pause after submitting the password.
    pub login_settle_ms: u64,
    /// Pause after the viewer image appears.
    pub viewer_settle_ms: u64,
    /// Pause after the viewer closes.
    pub close_settle_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            login_gate_secs: 60,
            album_grid_secs: 120,
            viewer_secs: 180,
            login_settle_ms: 3000,
            viewer_settle_ms: 2000,
            close_settle_ms: 500,
        }
    }
}

impl TimeoutConfig {
    pub fn login_gate(&self) -> Duration {
        Duration::from_secs(self.login_gate_secs)
    }

    pub fn album_grid(&self) -> Duration {
        Duration::from_secs(self.album_grid_secs)
    }

    pub fn viewer(&self) -> Duration {
        Duration::from_secs(self.viewer_secs)
    }

    pub fn login_settle(&self) -> Duration {
        Duration::from_millis(self.login_settle_ms)
    }

    pub fn viewer_settle(&self) -> Duration {
        Duration::from_millis(self.viewer_settle_ms)
    }

    pub fn close_settle(&self) -> Duration {
        Duration::from_millis(self.close_settle_ms)
    }
}

/// Configuration loaded from `~/.config/albumgrab/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfig {
    /// Album page behind the password gate.
    pub album_url: Option<String>,
    pub password: Option<Password>,
    /// Directory receiving the images; created if absent.
    pub dest_folder: PathBuf,
    /// First part of every output filename.
    pub file_prefix: String,
    /// Run the browser without a window.
    pub headless: bool,
    pub selectors: SelectorConfig,
    pub timeouts: TimeoutConfig,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            album_url: None,
            password: None,
            dest_folder: PathBuf::from("downloaded_images"),
            file_prefix: "image".to_string(),
            headless: false,
            selectors: SelectorConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("albumgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AlbumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AlbumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: AlbumConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub album_url: Option<String>,
    pub password: Option<Password>,
    pub dest_folder: Option<PathBuf>,
    pub file_prefix: Option<String>,
    pub headless: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no album URL given (pass one on the command line or set album_url in the config)")]
    MissingAlbumUrl,
    #[error("no password given (use --password, ALBUMGRAB_PASSWORD, or password in the config)")]
    MissingPassword,
    #[error("invalid album URL `{url}`: {source}")]
    InvalidAlbumUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Effective settings for one run: config file merged with overrides.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub album_url: String,
    pub password: Password,
    pub dest_folder: PathBuf,
    pub file_prefix: String,
    pub headless: bool,
    pub selectors: SelectorConfig,
    pub timeouts: TimeoutConfig,
}

impl RunSettings {
    /// Merges `overrides` over `cfg` and checks the album URL and password.
    pub fn resolve(cfg: &AlbumConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let album_url = overrides
            .album_url
            .or_else(|| cfg.album_url.clone())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingAlbumUrl)?;
        url::Url::parse(&album_url).map_err(|source| ConfigError::InvalidAlbumUrl {
            url: album_url.clone(),
            source,
        })?;

        let password = overrides
            .password
            .or_else(|| cfg.password.clone())
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPassword)?;

        Ok(Self {
            album_url,
            password,
            dest_folder: overrides
                .dest_folder
                .unwrap_or_else(|| cfg.dest_folder.clone()),
            file_prefix: overrides
                .file_prefix
                .unwrap_or_else(|| cfg.file_prefix.clone()),
            headless: overrides.headless.unwrap_or(cfg.headless),
            selectors: cfg.selectors.clone(),
            timeouts: cfg.timeouts.clone(),
        })
    }
}
