//! Shared integration-test helpers.

#![allow(dead_code)]

pub mod fake_session;
pub mod image_server;

use albumgrab_core::config::{Password, RunSettings, SelectorConfig, TimeoutConfig};
use std::path::Path;

/// Settings pointing at `dest` with zero settle delays and short waits.
pub fn test_settings(dest: &Path) -> RunSettings {
    RunSettings {
        album_url: fake_session::ALBUM_URL.to_string(),
        password: Password::new(fake_session::PASSWORD),
        dest_folder: dest.to_path_buf(),
        file_prefix: "album".to_string(),
        headless: true,
        selectors: SelectorConfig::default(),
        timeouts: TimeoutConfig {
            login_gate_secs: 1,
            album_grid_secs: 1,
            viewer_secs: 1,
            login_settle_ms: 0,
            viewer_settle_ms: 0,
            close_settle_ms: 0,
        },
    }
}
