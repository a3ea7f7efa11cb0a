//! Leaving owner views and previews.

use axum::response::Redirect;
use tower_sessions::Session;
use tracing::instrument;

use super::handle;
use crate::error::Result;
use crate::mode::Event;

/// Back to the main menu, dropping the preview draft.
#[instrument(skip_all)]
pub async fn main_menu(session: Session) -> Result<Redirect> {
    handle(&session, Event::ReturnToLanding).await?;
    Ok(Redirect::to("/"))
}

/// Leave the preview, dropping the preview draft.
#[instrument(skip_all)]
pub async fn exit_preview(session: Session) -> Result<Redirect> {
    handle(&session, Event::ExitPreview).await?;
    Ok(Redirect::to("/"))
}
