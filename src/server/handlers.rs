//! Request handlers and the submission pipeline behind them.

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::flash::{self, FlashMessage};
use crate::form::FormData;
use crate::render::FormPage;
use crate::state_machine::{SubmissionFlow, SubmissionState};
use crate::validation::{validate_submission, ValidationErrors};

use super::AppContext;

/// Flash shown after a stored submission.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
/// Shown when storage fails. The underlying error is only logged.
pub const SAVE_FAILED_MESSAGE: &str = "We could not save your submission. Please try again.";

/// How one POST ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stored under `id`.
    Persisted { id: i64 },
    /// Failed validation; nothing stored.
    Rejected(ValidationErrors),
    /// Passed validation but the insert failed and was rolled back.
    StorageFailed,
}

impl Outcome {
    /// Final state of the submission flow.
    pub fn state(&self) -> SubmissionState {
        match self {
            Outcome::Persisted { .. } => SubmissionState::Persisted,
            Outcome::Rejected(_) | Outcome::StorageFailed => SubmissionState::Rejected,
        }
    }
}

/// Validate `form` and store it if every check passes.
///
/// Blocks on the repository; call from `spawn_blocking` inside the runtime.
pub fn process_submission(ctx: &AppContext, form: &FormData) -> Result<Outcome> {
    let mut flow = SubmissionFlow::new();
    flow.transition(SubmissionState::Validating)?;

    let submission = match validate_submission(ctx.profile, &ctx.rules, form) {
        Ok(submission) => submission,
        Err(errors) => {
            flow.transition(SubmissionState::Rejected)?;
            debug!(profile = %ctx.profile, errors = errors.len(), "submission rejected");
            return Ok(Outcome::Rejected(errors));
        }
    };

    match ctx.repository.insert(&submission) {
        Ok(id) => {
            flow.transition(SubmissionState::Persisted)?;
            info!(id, profile = %ctx.profile, summary = %submission.summary(), "submission stored");
            Ok(Outcome::Persisted { id })
        }
        Err(e) => {
            flow.transition(SubmissionState::Rejected)?;
            error!(profile = %ctx.profile, "failed to store submission: {:#}", e);
            Ok(Outcome::StorageFailed)
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn show_form(State(ctx): State<Arc<AppContext>>, headers: HeaderMap) -> Response {
    let cookie_header = cookie_header(&headers);
    let mut flashes = Vec::new();
    let mut clear_flash = false;

    if let Some(decoded) = ctx.flash.read_cookie_header(&cookie_header) {
        clear_flash = true;
        match decoded {
            Ok(messages) => flashes.extend(messages),
            Err(e) => warn!("ignoring flash cookie: {}", e),
        }
    }
    if let Some(notice) = &ctx.intro_notice {
        flashes.push(FlashMessage::warning(notice.clone()));
    }

    let page = FormPage {
        flashes,
        values: HashMap::new(),
    };
    let mut response = render_page(&ctx, StatusCode::OK, &page);
    if clear_flash {
        append_cookie(&mut response, &flash::clear_cookie());
    }
    response
}

pub async fn submit_form(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let form = FormData::parse(&body);
    let values = form.scalars();

    let worker = Arc::clone(&ctx);
    let outcome = match tokio::task::spawn_blocking(move || process_submission(&worker, &form)).await
    {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            error!("submission pipeline failed: {:#}", e);
            Outcome::StorageFailed
        }
        Err(e) => {
            error!("submission task failed: {}", e);
            Outcome::StorageFailed
        }
    };

    match outcome {
        Outcome::Persisted { .. } => {
            let mut response = Redirect::to("/").into_response();
            match ctx.flash.set_cookie(&[FlashMessage::success(SUCCESS_MESSAGE)]) {
                Ok(cookie) => append_cookie(&mut response, &cookie),
                Err(e) => warn!("could not set success flash: {:#}", e),
            }
            response
        }
        Outcome::Rejected(errors) => {
            let page = FormPage {
                flashes: errors
                    .iter()
                    .map(|e| FlashMessage::danger(e.message.clone()))
                    .collect(),
                values,
            };
            render_page(&ctx, StatusCode::OK, &page)
        }
        Outcome::StorageFailed => {
            let page = FormPage {
                flashes: vec![FlashMessage::danger(SAVE_FAILED_MESSAGE)],
                values,
            };
            render_page(&ctx, StatusCode::INTERNAL_SERVER_ERROR, &page)
        }
    }
}

fn render_page(ctx: &AppContext, status: StatusCode, page: &FormPage) -> Response {
    match ctx.renderer.render(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("failed to render form: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// All `Cookie` headers joined into one.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

fn append_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => warn!("invalid Set-Cookie value: {}", e),
    }
}
