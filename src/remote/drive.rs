//! Google Drive v3 client
//!
//! Thin blocking REST client implementing [`RemoteTree`]. Authentication is
//! handled elsewhere; the client only needs a bearer token wrapped in
//! [`Credentials`].

use super::{ListPage, ProviderError, RemoteTree};
use crate::types::{ForkError, TreeItem};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Public Drive v3 endpoint
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// MIME type Drive uses to mark folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType)";

/// OAuth access token for the Drive API
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(alias = "token")]
    access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Read a token file containing `{"access_token": "..."}` (or `token`).
    pub fn from_token_file(path: &Path) -> Result<Self, ForkError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForkError::Config(format!("Cannot read token file {}: {}", path.display(), e))
        })?;
        let credentials: Credentials = serde_json::from_str(&content).map_err(|e| {
            ForkError::Config(format!("Invalid token file {}: {}", path.display(), e))
        })?;
        if credentials.access_token.trim().is_empty() {
            return Err(ForkError::Unauthenticated(format!(
                "token file {} has an empty access token",
                path.display()
            )));
        }
        Ok(credentials)
    }

    fn bearer(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Blocking Drive v3 client
pub struct DriveClient {
    http: Client,
    api_base: String,
    credentials: Credentials,
}

impl DriveClient {
    /// Build a client for `api_base` (normally [`DEFAULT_API_BASE`]).
    ///
    /// Must not be called from inside an async runtime; drivers running on
    /// tokio construct it inside `spawn_blocking`.
    pub fn new(credentials: Credentials, api_base: &str) -> Result<Self, ForkError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ForkError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = request
            .bearer_auth(self.credentials.bearer())
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ProviderError::new(format!("request failed: {e}")))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().unwrap_or_default();
        Err(provider_error(status, &body))
    }
}

impl RemoteTree for DriveClient {
    fn list_children(
        &mut self,
        folder_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<ListPage, ProviderError> {
        let query = format!(
            "'{}' in parents and trashed=false",
            escape_query_literal(folder_id)
        );
        let page_size = page_size.to_string();
        let mut params = vec![
            ("q", query.as_str()),
            ("fields", LIST_FIELDS),
            ("pageSize", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let request = self
            .http
            .get(format!("{}/files", self.api_base))
            .query(&params);
        let payload: FileListDto = self
            .send(request)?
            .json()
            .map_err(|e| ProviderError::new(format!("failed to parse file list: {e}")))?;

        Ok(ListPage {
            items: payload.files.into_iter().map(TreeItem::from).collect(),
            next_page_token: payload.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    fn create_folder(&mut self, name: &str, parent_id: &str) -> Result<String, ProviderError> {
        let request = self
            .http
            .post(format!("{}/files", self.api_base))
            .query(&[("fields", "id")])
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME_TYPE,
                "parents": [parent_id],
            }));
        let created: CreatedDto = self
            .send(request)?
            .json()
            .map_err(|e| ProviderError::new(format!("failed to parse created folder: {e}")))?;
        Ok(created.id)
    }

    fn copy_file(&mut self, file_id: &str, new_parent_id: &str) -> Result<(), ProviderError> {
        let request = self
            .http
            .post(format!("{}/files/{}/copy", self.api_base, file_id))
            .query(&[("fields", "id")])
            .json(&json!({ "parents": [new_parent_id] }));
        self.send(request)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListDto {
    next_page_token: Option<String>,
    #[serde(default)]
    files: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDto {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
}

impl From<FileDto> for TreeItem {
    fn from(value: FileDto) -> Self {
        if value.mime_type == FOLDER_MIME_TYPE {
            TreeItem::folder(value.id, value.name)
        } else {
            TreeItem::file(value.id, value.name)
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedDto {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    reason: Option<String>,
}

/// Escape a value for use inside a single-quoted Drive query string.
fn escape_query_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Turn a non-2xx Drive response into a [`ProviderError`].
///
/// The reason code comes from `error.errors[0].reason`. A bare 429 is
/// reported as `rateLimitExceeded`.
fn provider_error(status: StatusCode, body: &str) -> ProviderError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = envelope
        .error
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    let reason = envelope
        .error
        .errors
        .into_iter()
        .next()
        .and_then(|item| item.reason)
        .or_else(|| {
            (status == StatusCode::TOO_MANY_REQUESTS).then(|| "rateLimitExceeded".to_string())
        });

    let mut error = ProviderError::new(message).with_status(status.as_u16());
    if let Some(reason) = reason {
        error = error.with_reason(reason);
    }
    error
}
