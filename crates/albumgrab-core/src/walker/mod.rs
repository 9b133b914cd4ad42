//! Album walk: open each thumbnail's viewer, resolve, fetch, save, close.
//!
//! Strictly sequential; the session shows one viewer at a time. A failed
//! thumbnail is recorded and skipped, it never stops the walk.

mod outcome;

pub use outcome::{FailureKind, ItemError, ItemOutcome, RunSummary, SavedImage};

use crate::config::RunSettings;
use crate::fetcher;
use crate::resolver::{self, ImageCandidateSet};
use crate::session::{BrowsingSession, ElementRef, WaitState};
use crate::storage;
use crate::url_model::image_filename;
use std::panic::{self, AssertUnwindSafe};

/// One thumbnail of the grid, enumerated at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRef {
    pub element: ElementRef,
    /// 1-based document position.
    pub ordinal: usize,
    /// Stable id attribute, for logging only.
    pub id: Option<String>,
}

/// Lists the thumbnails in document order.
pub fn enumerate_thumbnails<S>(
    session: &S,
    settings: &RunSettings,
) -> Result<Vec<ThumbnailRef>, crate::session::SessionError>
where
    S: BrowsingSession + ?Sized,
{
    let elements = session.query_all(&settings.selectors.thumbnail)?;
    let mut thumbs = Vec::with_capacity(elements.len());
    for (i, element) in elements.into_iter().enumerate() {
        // The id only labels log lines; an unreadable one must not end the walk.
        let id = session
            .attribute(&element, &settings.selectors.thumbnail_id_attribute)
            .unwrap_or_else(|e| {
                tracing::debug!(ordinal = i + 1, "thumbnail id unreadable: {}", e);
                None
            })
            .filter(|v| !v.is_empty());
        thumbs.push(ThumbnailRef {
            element,
            ordinal: i + 1,
            id,
        });
    }
    Ok(thumbs)
}

/// Walks the whole album on an authenticated `session`, writing images to
/// `settings.dest_folder` (which must exist). `on_item` sees every outcome as
/// soon as it is known.
pub fn walk_album<S, F>(
    session: &S,
    settings: &RunSettings,
    mut on_item: F,
) -> Result<RunSummary, crate::session::SessionError>
where
    S: BrowsingSession + ?Sized,
    F: FnMut(&ItemOutcome),
{
    let thumbs = enumerate_thumbnails(session, settings)?;
    let total = thumbs.len();
    tracing::info!(total, "thumbnails found");

    let mut summary = RunSummary::new(total);
    for thumb in thumbs {
        let result = match panic::catch_unwind(AssertUnwindSafe(|| {
            process_thumbnail(session, settings, &thumb, total)
        })) {
            Ok(result) => result,
            Err(payload) => Err(ItemError::Unexpected(panic_message(payload.as_ref()))),
        };
        close_viewer(session, settings, &thumb);

        let outcome = ItemOutcome {
            ordinal: thumb.ordinal,
            id: thumb.id,
            result,
        };
        match &outcome.result {
            Ok(saved) => tracing::info!(
                item = %outcome.label(),
                ordinal = outcome.ordinal,
                path = %saved.path.display(),
                bytes = saved.bytes,
                "image saved"
            ),
            Err(e) => tracing::warn!(
                item = %outcome.label(),
                ordinal = outcome.ordinal,
                kind = ?e.kind(),
                "skipped: {}",
                e
            ),
        }
        on_item(&outcome);
        summary.record(outcome);
    }

    tracing::info!("{}", summary);
    Ok(summary)
}

/// Opens the viewer for `thumb` and saves its image. Leaves the viewer open.
fn process_thumbnail<S>(
    session: &S,
    settings: &RunSettings,
    thumb: &ThumbnailRef,
    total: usize,
) -> Result<SavedImage, ItemError>
where
    S: BrowsingSession + ?Sized,
{
    let selectors = &settings.selectors;
    let timeouts = &settings.timeouts;

    session.click(&thumb.element)?;
    session.wait_for(
        &selectors.viewer_image,
        WaitState::Visible,
        timeouts.viewer(),
    )?;
    session.settle(timeouts.viewer_settle());

    let viewer_image = ElementRef::new(selectors.viewer_image.as_str(), 0);
    let candidates = ImageCandidateSet::capture(session, &viewer_image)?;
    let source = resolver::resolve(&candidates);
    if source.is_unresolved() {
        return Err(ItemError::Resolution);
    }

    let page_url = session.current_url()?;
    let image = fetcher::fetch(source, session, &page_url)?;

    let name = image_filename(&settings.file_prefix, thumb.ordinal, total, &image.extension);
    let path = storage::write_image(&settings.dest_folder, &name, &image.bytes).map_err(
        |source| ItemError::Write {
            path: settings.dest_folder.join(&name),
            source,
        },
    )?;

    Ok(SavedImage {
        path,
        bytes: image.len(),
        url: image.url,
    })
}

/// Closes the viewer after every item, successful or not, so the next click
/// starts from the grid. Failures are logged only.
fn close_viewer<S>(session: &S, settings: &RunSettings, thumb: &ThumbnailRef)
where
    S: BrowsingSession + ?Sized,
{
    let selectors = &settings.selectors;
    let close = ElementRef::new(selectors.viewer_close.as_str(), 0);
    let closed = session.click(&close).and_then(|()| {
        session.wait_for(
            &selectors.viewer_close,
            WaitState::Hidden,
            settings.timeouts.viewer(),
        )
    });
    if let Err(e) = closed {
        tracing::warn!(ordinal = thumb.ordinal, "could not close viewer: {}", e);
    }
    session.settle(settings.timeouts.close_settle());
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_extracts_text() {
        let payload = panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload = panic::catch_unwind(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 1");
    }
}
