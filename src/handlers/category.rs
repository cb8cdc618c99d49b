use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use super::{issue_token, not_found, redirect, show};
use crate::{
    AppState,
    error::AppError,
    models::{CategoryForm, SAVE_FAILED},
    session::VisitorSession,
};

const LIST_VIEW: &str = "category/list.html";
const FORM_VIEW: &str = "category/form.html";

/// Lists every category. The page holds the delete forms, so it issues a token.
pub async fn list(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let token = issue_token(&session, &mut visitor).await?;
    let categories = state.repo.list_categories().await;

    show(
        &state,
        &visitor,
        LIST_VIEW,
        json!({ "categories": categories, "token": token }),
    )
}

pub async fn add(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    render_form(&state, &session, &mut visitor, None, &CategoryForm::default(), &[]).await
}

pub async fn add_post(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let errors = match form.validate() {
        Ok(input) => match state.repo.insert_category(&input).await {
            Some(category_id) => {
                tracing::info!(category_id, "category created");
                return redirect(&state, "category-list", &[]);
            }
            None => vec![SAVE_FAILED.to_string()],
        },
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, None, &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let Some(category) = state.repo.find_category(category_id).await else {
        return not_found(&state, &visitor);
    };

    let form = CategoryForm::from(&category);
    let page = render_form(&state, &session, &mut visitor, Some(category_id), &form, &[]).await?;
    Ok(page.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    if state.repo.find_category(category_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    let errors = match form.validate() {
        Ok(input) => {
            if state.repo.update_category(category_id, &input).await {
                tracing::info!(category_id, "category updated");
                let id = category_id.to_string();
                return redirect(&state, "category-update", &[("category_id", &id)]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, Some(category_id), &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    if state.repo.find_category(category_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    if state.repo.delete_category(category_id).await {
        tracing::info!(category_id, "category deleted");
    } else {
        tracing::warn!(category_id, "category delete affected no rows");
    }
    redirect(&state, "category-list", &[])
}

async fn render_form(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    category_id: Option<i32>,
    form: &CategoryForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        FORM_VIEW,
        json!({
            "category_id": category_id,
            "form": form,
            "errors": errors,
            "token": token,
        }),
    )
}
