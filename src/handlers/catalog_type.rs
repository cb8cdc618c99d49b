//! Product types. Shown in the storefront footer in `footer_order`.

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
    models::{FooterEntryForm, SAVE_FAILED},
    session::VisitorSession,
};

const LIST_VIEW: &str = "type/list.html";
const FORM_VIEW: &str = "type/form.html";

pub async fn list(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let token = issue_token(&session, &mut visitor).await?;
    let types = state.repo.list_types().await;

    show(&state, &visitor, LIST_VIEW, json!({ "types": types, "token": token }))
}

pub async fn add(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    render_form(&state, &session, &mut visitor, None, &FooterEntryForm::default(), &[]).await
}

pub async fn add_post(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FooterEntryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let errors = match form.validate() {
        Ok(input) => match state.repo.insert_type(&input).await {
            Some(type_id) => {
                tracing::info!(type_id, "product type created");
                return redirect(&state, "type-list", &[]);
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
    Path(type_id): Path<i32>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let Some(product_type) = state.repo.find_type(type_id).await else {
        return not_found(&state, &visitor);
    };

    let form = FooterEntryForm::from_parts(&product_type.name, product_type.footer_order);
    let page = render_form(&state, &session, &mut visitor, Some(type_id), &form, &[]).await?;
    Ok(page.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(type_id): Path<i32>,
    Form(form): Form<FooterEntryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    if state.repo.find_type(type_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    let errors = match form.validate() {
        Ok(input) => {
            if state.repo.update_type(type_id, &input).await {
                tracing::info!(type_id, "product type updated");
                let id = type_id.to_string();
                return redirect(&state, "type-update", &[("type_id", &id)]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, Some(type_id), &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(type_id): Path<i32>,
) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    if state.repo.find_type(type_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    if state.repo.delete_type(type_id).await {
        tracing::info!(type_id, "product type deleted");
    } else {
        tracing::warn!(type_id, "product type delete affected no rows");
    }
    redirect(&state, "type-list", &[])
}

async fn render_form(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    type_id: Option<i32>,
    form: &FooterEntryForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        FORM_VIEW,
        json!({
            "type_id": type_id,
            "form": form,
            "errors": errors,
            "token": token,
        }),
    )
}
