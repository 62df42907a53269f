//! HTTP front end.
//!
//! One [`AppContext`] is built at startup and shared with every handler
//! through axum state. Routes:
//!
//! - `GET /` renders the form with pending flash messages
//! - `POST /` validates and stores a submission
//! - `GET /healthz` returns `ok`

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::flash::FlashCodec;
use crate::profile::{Profile, ValidationRules};
use crate::render::FormRenderer;
use crate::repository::{SqliteSubmissionRepository, SubmissionRepository};

pub mod handlers;

pub use handlers::{process_submission, Outcome, SAVE_FAILED_MESSAGE, SUCCESS_MESSAGE};

/// Everything a request needs, built once per server.
pub struct AppContext {
    pub profile: Profile,
    pub rules: ValidationRules,
    pub intro_notice: Option<String>,
    pub renderer: FormRenderer,
    pub flash: FlashCodec,
    pub repository: Arc<dyn SubmissionRepository>,
}

impl AppContext {
    /// Build a context backed by the SQLite database named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let repository = SqliteSubmissionRepository::open(&config.database.path)?;
        Self::new(config, Arc::new(repository))
    }

    /// Build a context over an existing repository.
    pub fn new(config: &Config, repository: Arc<dyn SubmissionRepository>) -> Result<Self> {
        let profile = config.profile();
        let rules = config.rules();
        let renderer = FormRenderer::new(
            profile,
            config.title(),
            rules.max_reasons,
            config.form.theme_dir.as_deref(),
        )?;
        let flash = FlashCodec::new(&config.session.secret_key)?;

        Ok(Self {
            profile,
            rules,
            intro_notice: config.intro_notice(),
            renderer,
            flash,
            repository,
        })
    }
}

/// Routes for the intake form.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::show_form).post(handlers::submit_form))
        .route("/healthz", get(handlers::healthz))
        .with_state(ctx)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, ctx: Arc<AppContext>) -> Result<()> {
    serve_with_shutdown(listener, ctx, async {
        // A failed signal hookup leaves the server running until killed.
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
        }
    })
    .await
}

/// Serve until `shutdown` completes.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    ctx: Arc<AppContext>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!(%addr, profile = %ctx.profile, "intake listening");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}
