//! Owner view handlers: login, signup, and the draft editor.
//!
//! Account handling belongs to the auth service; these views only move the
//! visitor between owner screens and carry their draft.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use shopifake_core::{SiteDraft, Values};
use tower_sessions::Session;
use tracing::instrument;

use super::handle;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::mode::{Event, OwnerView};
use crate::storefront_config::demo_draft;

// =============================================================================
// Form Types
// =============================================================================

/// Draft editor form data.
///
/// The four value statements arrive as `value1`..`value4`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftForm {
    pub name: String,
    pub tagline: String,
    pub banner_url: String,
    pub logo_url: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub about_portrait_url: String,
    pub about_secondary_portrait_url: String,
    pub about_title: String,
    pub about_story: String,
    pub value1: String,
    pub value2: String,
    pub value3: String,
    pub value4: String,
    pub contact_heading: String,
    pub contact_description: String,
    pub contact_details: String,
    pub contact_note: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl From<DraftForm> for SiteDraft {
    fn from(form: DraftForm) -> Self {
        Self {
            name: form.name,
            tagline: form.tagline,
            banner_url: form.banner_url,
            logo_url: form.logo_url,
            hero_title: form.hero_title,
            hero_subtitle: form.hero_subtitle,
            hero_description: form.hero_description,
            about_portrait_url: form.about_portrait_url,
            about_secondary_portrait_url: form.about_secondary_portrait_url,
            about_title: form.about_title,
            about_story: form.about_story,
            values: Values::from_iter_padded([form.value1, form.value2, form.value3, form.value4]),
            contact_heading: form.contact_heading,
            contact_description: form.contact_description,
            contact_details: form.contact_details,
            contact_note: form.contact_note,
            primary_color: form.primary_color,
            secondary_color: form.secondary_color,
        }
    }
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub saved: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "owner/login.html")]
pub struct LoginTemplate {
    pub has_draft: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "owner/signup.html")]
pub struct SignupTemplate {
    pub has_draft: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "owner/dashboard.html")]
pub struct DashboardTemplate {
    pub draft: SiteDraft,
    pub saved: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login view.
#[instrument(skip_all)]
pub async fn login(session: Session) -> Result<impl IntoResponse> {
    let app = handle(&session, Event::OpenOwner(OwnerView::Login)).await?;
    Ok(LoginTemplate {
        has_draft: app.draft.is_some(),
    })
}

/// Display the signup view.
#[instrument(skip_all)]
pub async fn signup(session: Session) -> Result<impl IntoResponse> {
    let app = handle(&session, Event::OpenOwner(OwnerView::Signup)).await?;
    Ok(SignupTemplate {
        has_draft: app.draft.is_some(),
    })
}

/// Display the draft editor, starting from the demo draft.
#[instrument(skip_all)]
pub async fn dashboard(
    Query(query): Query<DashboardQuery>,
    session: Session,
) -> Result<impl IntoResponse> {
    let app = handle(&session, Event::OpenOwner(OwnerView::Dashboard)).await?;
    Ok(DashboardTemplate {
        draft: app.draft.unwrap_or_else(demo_draft),
        saved: query.saved.is_some(),
    })
}

/// Keep the edited draft in the session.
#[instrument(skip_all)]
pub async fn update_draft(session: Session, Form(form): Form<DraftForm>) -> Result<Redirect> {
    handle(&session, Event::EditDraft(form.into())).await?;
    Ok(Redirect::to("/owner/dashboard?saved=1"))
}

/// Save the edited draft for preview and send the new tab to it.
#[instrument(skip_all)]
pub async fn preview(session: Session, Form(form): Form<DraftForm>) -> Result<Redirect> {
    handle(&session, Event::EditDraft(form.into())).await?;
    handle(&session, Event::RequestPreview).await?;
    add_breadcrumb("owner", "Requested draft preview");
    Ok(Redirect::to("/?preview=1"))
}

/// Drop every draft and return to the main menu.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    handle(&session, Event::Logout).await?;
    add_breadcrumb("owner", "Logged out");
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values_land_in_order() {
        let form = DraftForm {
            value1: "one".to_string(),
            value3: "three".to_string(),
            ..DraftForm::default()
        };
        let draft = SiteDraft::from(form);
        assert_eq!(
            draft.values.as_array(),
            &[
                "one".to_string(),
                String::new(),
                "three".to_string(),
                String::new()
            ]
        );
    }

    #[test]
    fn test_form_keeps_empty_colors() {
        let draft = SiteDraft::from(DraftForm::default());
        assert_eq!(draft.primary_color, "");
    }
}
