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
    models::{ProductForm, SAVE_FAILED},
    session::VisitorSession,
};

const LIST_VIEW: &str = "product/list.html";
const FORM_VIEW: &str = "product/form.html";

pub async fn list(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let token = issue_token(&session, &mut visitor).await?;
    let products = state.repo.list_products().await;

    show(
        &state,
        &visitor,
        LIST_VIEW,
        json!({ "products": products, "token": token }),
    )
}

pub async fn add(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    render_form(&state, &session, &mut visitor, None, &ProductForm::default(), &[]).await
}

pub async fn add_post(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let errors = match form.validate() {
        Ok(input) => match state.repo.insert_product(&input).await {
            Some(product_id) => {
                tracing::info!(product_id, "product created");
                return redirect(&state, "product-list", &[]);
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
    Path(product_id): Path<i32>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let Some(product) = state.repo.find_product(product_id).await else {
        return not_found(&state, &visitor);
    };

    let form = ProductForm::from(&product);
    let page = render_form(&state, &session, &mut visitor, Some(product_id), &form, &[]).await?;
    Ok(page.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    if state.repo.find_product(product_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    let errors = match form.validate() {
        Ok(input) => {
            if state.repo.update_product(product_id, &input).await {
                tracing::info!(product_id, "product updated");
                let id = product_id.to_string();
                return redirect(&state, "product-update", &[("product_id", &id)]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, Some(product_id), &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    if state.repo.find_product(product_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    if state.repo.delete_product(product_id).await {
        tracing::info!(product_id, "product deleted");
    } else {
        tracing::warn!(product_id, "product delete affected no rows");
    }
    redirect(&state, "product-list", &[])
}

// The form offers a select for each of the product's foreign keys.
async fn render_form(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    product_id: Option<i32>,
    form: &ProductForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let brands = state.repo.list_brands().await;
    let categories = state.repo.list_categories().await;
    let types = state.repo.list_types().await;
    let token = issue_token(session, visitor).await?;

    show(
        state,
        visitor,
        FORM_VIEW,
        json!({
            "product_id": product_id,
            "form": form,
            "errors": errors,
            "token": token,
            "brands": brands,
            "categories": categories,
            "types": types,
        }),
    )
}
