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

pub async fn list(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let token = issue_token(&session, &mut visitor).await?;
    let brands = state.repo.list_brands().await;

    show(
        &state,
        &visitor,
        "brand/list.html",
        json!({ "brands": brands, "token": token }),
    )
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
        Ok(input) => match state.repo.insert_brand(&input).await {
            Some(brand_id) => {
                tracing::info!(brand_id, "brand created");
                return redirect(&state, "brand-list", &[]);
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
    Path(brand_id): Path<i32>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let Some(brand) = state.repo.find_brand(brand_id).await else {
        return not_found(&state, &visitor);
    };

    let form = FooterEntryForm::from_parts(&brand.name, brand.footer_order);
    let page = render_form(&state, &session, &mut visitor, Some(brand_id), &form, &[]).await?;
    Ok(page.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(brand_id): Path<i32>,
    Form(form): Form<FooterEntryForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    if state.repo.find_brand(brand_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    let errors = match form.validate() {
        Ok(input) => {
            if state.repo.update_brand(brand_id, &input).await {
                tracing::info!(brand_id, "brand updated");
                let id = brand_id.to_string();
                return redirect(&state, "brand-update", &[("brand_id", &id)]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, Some(brand_id), &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(brand_id): Path<i32>,
) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    if state.repo.find_brand(brand_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    if !state.repo.delete_brand(brand_id).await {
        tracing::warn!(brand_id, "brand delete affected no rows");
    }
    redirect(&state, "brand-list", &[])
}

async fn render_form(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    brand_id: Option<i32>,
    form: &FooterEntryForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        "brand/form.html",
        json!({
            "brand_id": brand_id,
            "form": form,
            "errors": errors,
            "token": token,
        }),
    )
}
