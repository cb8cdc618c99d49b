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
    auth::{self, roles},
    error::AppError,
    models::{LoginForm, SAVE_FAILED, UserDraft, UserForm, UserInput},
    session::{SessionUser, VisitorSession},
};

const LOGIN_VIEW: &str = "user/login.html";
const LIST_VIEW: &str = "user/list.html";
const FORM_VIEW: &str = "user/form.html";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

// --- Login / logout ---

pub async fn login(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    render_login(&state, &session, &mut visitor, &LoginForm::default(), &[]).await
}

/// login_post
///
/// On success the session id is cycled before the user snapshot is stored, so a
/// session id planted before login is worthless afterwards.
pub async fn login_post(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let mut errors = form.validate();
    if errors.is_empty() {
        match auth::authenticate(&state.repo, form.email.trim(), &form.password).await {
            Some(user) => {
                session.cycle_id().await?;
                VisitorSession::authenticated(SessionUser::from(&user))
                    .persist(&session)
                    .await?;
                tracing::info!(user_id = user.id, role = %user.role, "user logged in");
                return redirect(&state, "main-home", &[]);
            }
            None => {
                tracing::info!("login rejected");
                errors.push(INVALID_CREDENTIALS.to_string());
            }
        }
    }

    let page = render_login(&state, &session, &mut visitor, &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    session.flush().await?;
    redirect(&state, "user-login", &[])
}

async fn render_login(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    form: &LoginForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        LOGIN_VIEW,
        json!({ "form": form, "errors": errors, "token": token }),
    )
}

// --- Account management ---

pub async fn list(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let token = issue_token(&session, &mut visitor).await?;
    let users = state.repo.list_users().await;

    show(&state, &visitor, LIST_VIEW, json!({ "users": users, "token": token }))
}

pub async fn add(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    render_form(&state, &session, &mut visitor, None, &UserForm::default(), &[]).await
}

pub async fn add_post(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;

    let errors = match form.validate() {
        Ok(draft) => match state.repo.insert_user(&hashed(draft)?).await {
            Some(user_id) => {
                tracing::info!(user_id, "user created");
                return redirect(&state, "user-list", &[]);
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
    Path(user_id): Path<i32>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    let Some(user) = state.repo.find_user(user_id).await else {
        return not_found(&state, &visitor);
    };

    let form = UserForm::from(&user);
    let page = render_form(&state, &session, &mut visitor, Some(user_id), &form, &[]).await?;
    Ok(page.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let mut visitor = VisitorSession::load(&session).await?;
    if state.repo.find_user(user_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    let errors = match form.validate() {
        Ok(draft) => {
            if state.repo.update_user(user_id, &hashed(draft)?).await {
                tracing::info!(user_id, "user updated");
                let id = user_id.to_string();
                return redirect(&state, "user-update", &[("user_id", &id)]);
            }
            vec![SAVE_FAILED.to_string()]
        }
        Err(errors) => errors,
    };

    let page = render_form(&state, &session, &mut visitor, Some(user_id), &form, &errors).await?;
    Ok(page.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    if state.repo.find_user(user_id).await.is_none() {
        return not_found(&state, &visitor);
    }

    if state.repo.delete_user(user_id).await {
        tracing::info!(user_id, "user deleted");
    } else {
        tracing::warn!(user_id, "user delete affected no rows");
    }
    redirect(&state, "user-list", &[])
}

fn hashed(draft: UserDraft) -> Result<UserInput, AppError> {
    let hash = auth::hash_password(&draft.password)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(draft.into_input(hash))
}

async fn render_form(
    state: &AppState,
    session: &Session,
    visitor: &mut VisitorSession,
    user_id: Option<i32>,
    form: &UserForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let token = issue_token(session, visitor).await?;
    show(
        state,
        visitor,
        FORM_VIEW,
        json!({
            "user_id": user_id,
            "form": form,
            "errors": errors,
            "token": token,
            "roles": roles::ALL,
        }),
    )
}
