//! `albumgrab fetch` – log in and download every image of the album.

use albumgrab_core::config::{AlbumConfig, Overrides, RunSettings};
use albumgrab_core::login::login;
use albumgrab_core::session::{ChromeSession, LaunchSettings};
use albumgrab_core::storage;
use albumgrab_core::walker::{walk_album, ItemOutcome};
use anyhow::{Context, Result};

pub fn run_fetch(cfg: &AlbumConfig, overrides: Overrides) -> Result<()> {
    let settings = RunSettings::resolve(cfg, overrides)?;
    storage::ensure_dest_dir(&settings.dest_folder)?;

    let session = ChromeSession::launch(&LaunchSettings {
        headless: settings.headless,
        ..Default::default()
    })
    .context("failed to launch browser")?;

    login(&session, &settings).context("login failed")?;

    let summary = walk_album(&session, &settings, print_item)
        .context("could not enumerate thumbnails")?;
    println!("{summary}");
    println!("Images in {}", settings.dest_folder.display());
    Ok(())
}

fn print_item(item: &ItemOutcome) {
    match &item.result {
        Ok(saved) => println!(
            "[{}] saved {} ({} bytes)",
            item.label(),
            saved.path.display(),
            saved.bytes
        ),
        Err(e) => println!("[{}] skipped: {}", item.label(), e),
    }
}
