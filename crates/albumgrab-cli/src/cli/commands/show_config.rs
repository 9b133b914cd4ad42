//! `albumgrab config` – print config path and effective values.

use albumgrab_core::config::{self, AlbumConfig};
use anyhow::Result;

pub fn run_show_config(cfg: &AlbumConfig) -> Result<()> {
    println!("Config file: {}", config::config_path()?.display());
    println!(
        "album_url:   {}",
        cfg.album_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "password:    {}",
        if cfg.password.is_some() { "(set)" } else { "(not set)" }
    );
    println!("dest_folder: {}", cfg.dest_folder.display());
    println!("file_prefix: {}", cfg.file_prefix);
    println!("headless:    {}", cfg.headless);
    println!("selectors:   {:?}", cfg.selectors);
    println!("timeouts:    {:?}", cfg.timeouts);
    Ok(())
}
