use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use super::{issue_token, redirect, show};
use crate::{
    AppState,
    error::AppError,
    models::{HOME_SLOTS, ManageCategoryForm, SAVE_FAILED},
    session::VisitorSession,
};

const VIEW: &str = "category/manage.html";

/// form
///
/// One select per home-page slot, preselected with the category currently holding it.
pub async fn form(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let mut selected: Vec<Option<i32>> = vec![None; HOME_SLOTS];
    for category in state.repo.home_categories(HOME_SLOTS as i64).await {
        if let Some(slot) = usize::try_from(category.home_order - 1)
            .ok()
            .and_then(|index| selected.get_mut(index))
        {
            *slot = Some(category.id);
        }
    }

    render(&state, &session, &mut visitor, &selected, &[]).await
}

/// save
///
/// Clears every home order, then gives the category in slot N home order N.
pub async fn save(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ManageCategoryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let errors = match form.validate() {
        Ok(placements) => {
            let mut saved = state.repo.reset_home_order().await;
            for (category_id, home_order) in &placements {
                saved &= state.repo.set_home_order(*category_id, *home_order).await;
            }
            if saved {
                tracing::info!(slots = placements.len(), "home categories updated");
                return redirect(&state, "manage-category", &[]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    // Echo the submitted choices back, keeping unparsable slots empty.
    let selected: Vec<Option<i32>> = [&form.slot1, &form.slot2, &form.slot3, &form.slot4, &form.slot5]
        .iter()
        .map(|raw| raw.trim().parse::<i32>().ok())
        .collect();
    let page = render(&state, &session, &mut visitor, &selected, &errors).await?;
    Ok(page.into_response())
}

async fn render(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    selected: &[Option<i32>],
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let categories = state.repo.list_categories().await;
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        VIEW,
        json!({
            "categories": categories,
            "selected": selected,
            "errors": errors,
            "token": token,
        }),
    )
}
