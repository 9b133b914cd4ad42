//! Password gate: open the album, submit the password, wait for the grid.
//!
//! Any failure here ends the run; there is nothing to walk without a session.

use crate::config::RunSettings;
use crate::session::{BrowsingSession, SessionError, WaitState};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("could not open album page {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: SessionError,
    },
    #[error("password gate not reached: {0}")]
    GateNotReached(#[source] SessionError),
    #[error("could not submit password: {0}")]
    Submit(#[source] SessionError),
    /// The grid never appeared after submitting, typically a wrong password.
    #[error("album not shown after submitting the password: {0}")]
    AlbumNotShown(#[source] SessionError),
}

/// Authenticates `session` against the album's password gate.
///
/// On success the session holds the authenticated cookies and the page shows
/// the thumbnail grid.
pub fn login<S>(session: &S, settings: &RunSettings) -> Result<(), LoginError>
where
    S: BrowsingSession + ?Sized,
{
    let selectors = &settings.selectors;
    let timeouts = &settings.timeouts;

    tracing::info!(url = %settings.album_url, "opening album");
    session
        .navigate(&settings.album_url)
        .map_err(|source| LoginError::Navigation {
            url: settings.album_url.clone(),
            source,
        })?;

    session
        .wait_for(
            &selectors.password_input,
            WaitState::Visible,
            timeouts.login_gate(),
        )
        .map_err(LoginError::GateNotReached)?;

    session
        .fill(&selectors.password_input, settings.password.expose())
        .and_then(|()| session.press_enter(&selectors.password_input))
        .map_err(LoginError::Submit)?;
    session.settle(timeouts.login_settle());

    session
        .wait_for(
            &selectors.thumbnail,
            WaitState::Visible,
            timeouts.album_grid(),
        )
        .map_err(LoginError::AlbumNotShown)?;

    tracing::info!("password accepted, album grid visible");
    Ok(())
}
