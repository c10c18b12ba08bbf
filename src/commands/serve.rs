//! HTTP copy form
//!
//! `GET /` serves a form, `POST /copy` runs one replication with the
//! submitted `source_id` / `dest_id` and answers with an HTML summary.
//! Only one run may use the checkpoint at a time.

use super::{require_folder_ids, run_job, CopyReport, JobHooks};
use crate::config::ServeArgs;
use crate::remote::{DriveClient, RemoteTree};
use crate::store::{FailureLog, FATAL_PATH};
use crate::types::ForkError;
use crate::Config;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Opens an authenticated remote tree for one run.
pub type RemoteConnector =
    dyn Fn() -> Result<Box<dyn RemoteTree + Send>, ForkError> + Send + Sync;

/// Shared server state
pub struct AppState {
    config: Config,
    connector: Option<Arc<RemoteConnector>>,

    /// Held by the blocking job for as long as the engine runs
    running: Arc<Mutex<()>>,
}

impl AppState {
    /// `connector` is `None` when no credential is configured; `/copy` then
    /// answers 401.
    pub fn new(config: Config, connector: Option<Arc<RemoteConnector>>) -> Self {
        Self {
            config,
            connector,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// State backed by the Drive API using the configured credential.
    pub fn for_drive(config: Config) -> Self {
        let connector = config.credentials.clone().map(|credentials| {
            let api_base = config.api_base.clone();
            let connect: Arc<RemoteConnector> =
                Arc::new(move || -> Result<Box<dyn RemoteTree + Send>, ForkError> {
                    let client = DriveClient::new(credentials.clone(), &api_base)?;
                    Ok(Box::new(client) as Box<dyn RemoteTree + Send>)
                });
            connect
        });
        Self::new(config, connector)
    }
}

/// Form fields posted to `/copy`
#[derive(Debug, Default, Deserialize)]
pub struct CopyForm {
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub dest_id: Option<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/copy", post(copy))
        .with_state(state)
}

/// Start the HTTP driver and block until Ctrl-C.
pub fn run(args: ServeArgs, config: Config) -> Result<(), ForkError> {
    let bind = args.bind.unwrap_or(config.bind);
    if config.credentials.is_none() {
        warn!("no access token configured; POST /copy will answer 401");
    }
    let state = Arc::new(AppState::for_drive(config));

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(bind).await?;
        info!("listening on http://{}", bind);
        axum::serve(listener, router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
        Ok::<(), ForkError>(())
    })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

async fn copy(State(state): State<Arc<AppState>>, Form(form): Form<CopyForm>) -> Response {
    let Some(connector) = state.connector.clone() else {
        return (StatusCode::UNAUTHORIZED, "User not authenticated").into_response();
    };

    let (source, destination) =
        match require_folder_ids(form.source_id.as_deref(), form.dest_id.as_deref()) {
            Ok(ids) => ids,
            Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        };

    let Ok(guard) = Arc::clone(&state.running).try_lock_owned() else {
        return (StatusCode::CONFLICT, "A copy operation is already running").into_response();
    };

    info!(source = %source, destination = %destination, "copy requested");
    let job_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || -> Result<CopyReport, ForkError> {
        // Released when the job ends, even if the client has gone away.
        let _guard = guard;
        let config = &job_state.config;
        let mut remote = connector().inspect_err(|e| {
            FailureLog::new(&config.failure_log).append(FATAL_PATH, e);
        })?;
        run_job(&mut *remote, config, &source, &destination, JobHooks::default())
    })
    .await;

    match result {
        Ok(Ok(report)) => Html(render_report(&report)).into_response(),
        Ok(Err(ForkError::Unauthenticated(message))) => {
            (StatusCode::UNAUTHORIZED, message).into_response()
        }
        Ok(Err(err)) if err.is_validation_error() => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Ok(Err(err)) => {
            error!("copy operation failed: {}", err);
            render_failure(&err.to_string())
        }
        Err(join_err) => {
            error!("copy task aborted: {}", join_err);
            FailureLog::new(&state.config.failure_log).append(FATAL_PATH, &join_err);
            render_failure(&join_err.to_string())
        }
    }
}

fn render_report(report: &CopyReport) -> String {
    let notice = if report.has_failures {
        "<div class=\"warning\"><h3>Processing Notice</h3><p>Some items could not be \
         processed. Review the failure log for details.</p></div>"
    } else {
        "<div class=\"success\"><h3>Complete Success</h3><p>All items have been copied to \
         the destination.</p></div>"
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <title>Operation Complete - dfork</title></head><body>\
         <h1>Operation Completed</h1>\
         <ul>\
         <li>Files Processed: {files}</li>\
         <li>Folders Created: {folders}</li>\
         <li>Copied This Run: {run_files}</li>\
         <li>Failures This Run: {run_failures}</li>\
         </ul>\
         <p><strong>Source:</strong> {source}</p>\
         <p><strong>Destination:</strong> {destination}</p>\
         {notice}\
         <p><a href=\"/\">Initiate New Operation</a></p>\
         </body></html>",
        files = report.total_files_copied,
        folders = report.total_folders_created,
        run_files = report.stats.files_copied,
        run_failures = report.stats.failures,
        source = escape_html(&report.source),
        destination = escape_html(&report.destination),
        notice = notice,
    )
}

fn render_failure(message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <title>Operation Failed - dfork</title></head><body>\
         <h1>Operation Failed</h1>\
         <p><strong>Error Message:</strong> {}</p>\
         <p>Progress has been saved; submitting the same folders again resumes the copy.</p>\
         <p><a href=\"/\">Return to Main Interface</a></p>\
         </body></html>",
        escape_html(message)
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>dfork</title></head>
<body>
<h1>Copy a Drive folder</h1>
<form method="post" action="/copy">
  <label>Source folder ID or URL <input name="source_id" required></label><br>
  <label>Destination folder ID or URL <input name="dest_id" required></label><br>
  <button type="submit">Start copy</button>
</form>
<p>Interrupted copies resume where they stopped when the same folders are submitted again.</p>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("ABC123"), "ABC123");
    }

    #[test]
    fn test_render_report_escapes_ids() {
        let report = CopyReport {
            source: "<script>".to_string(),
            destination: "D".to_string(),
            stats: Default::default(),
            total_files_copied: 4,
            total_folders_created: 2,
            failure_log: "failed_files.log".into(),
            has_failures: false,
        };

        let html = render_report(&report);
        assert!(html.contains("Files Processed: 4"));
        assert!(html.contains("Folders Created: 2"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Complete Success"));
    }
}
