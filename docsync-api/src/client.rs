//! HTTP client for the sync service
//!
//! Thin typed wrappers over the service's REST endpoints. Every call logs
//! what it does; a non-success response is returned as
//! [`ApiError::Status`] with the raw body so the UI can surface the
//! service's own wording.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::browser::{DriveItem, LoadRequest};
use crate::document::{DashboardStats, DocumentCard};
use crate::error::{ApiError, Result};
use crate::mapping::{PathMapping, PathMappingDetails, PathMappingForm};

/// Body for `POST /get-user-drive-items`
#[derive(Debug, Clone, Serialize)]
pub struct DriveItemsRequest {
    #[serde(rename = "folderID")]
    pub folder_id: Option<String>,
    #[serde(rename = "driveID")]
    pub drive_id: Option<String>,
    #[serde(rename = "isSharedWithMe")]
    pub is_shared_with_me: bool,
    #[serde(rename = "onedriveDirLevel")]
    pub dir_level: u32,
}

impl From<&LoadRequest> for DriveItemsRequest {
    fn from(request: &LoadRequest) -> Self {
        Self {
            folder_id: request.folder_id.clone(),
            drive_id: request.drive_id.clone(),
            is_shared_with_me: request.is_shared_with_me,
            dir_level: request.dir_level,
        }
    }
}

/// Form state for `POST /api/ollama-settings`
#[derive(Debug, Clone, Serialize)]
pub struct OllamaSettingsForm {
    pub ollama_server_scheme: String,
    pub ollama_server_address: String,
    pub ollama_server_port: String,
    pub ollama_model_select: String,
}

/// What a reachable Ollama server reported
#[derive(Debug, Clone)]
pub struct OllamaProbe {
    pub version: String,
    pub models: Vec<OllamaModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub details: Option<OllamaModelDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OllamaModelDetails {
    #[serde(default)]
    pub parameter_size: Option<String>,
}

impl OllamaModel {
    /// "llama3 (8B)" style label for the model dropdown
    pub fn label(&self) -> String {
        let size = self
            .details
            .as_ref()
            .and_then(|details| details.parameter_size.as_deref())
            .unwrap_or("n/a");
        format!("{} ({})", self.name, size)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaVersion {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

/// Success filter for the file-naming log listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Success,
    Failed,
}

impl LogFilter {
    pub fn as_query(&self) -> &'static str {
        match self {
            LogFilter::All => "all",
            LogFilter::Success => "success",
            LogFilter::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogFilter::All => "All",
            LogFilter::Success => "Success",
            LogFilter::Failed => "Failed",
        }
    }
}

/// One page of file-naming job logs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileNamingLogs {
    #[serde(default)]
    pub logs: Vec<FileNamingLogEntry>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileNamingLogEntry {
    pub id: i64,
    #[serde(default)]
    pub file_naming_status: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub finished: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// `{message}` / `{error}` envelope most endpoints answer with
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    success: Option<bool>,
}

/// Typed client for the sync service's REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Initial card snapshot, oldest first
    pub async fn fetch_documents(&self, limit: usize) -> Result<Vec<DocumentCard>> {
        debug!("Fetching document snapshot (limit {})", limit);
        let response = self
            .http
            .get(self.url("/api/documents"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// Aggregate dashboard counters
    pub async fn fetch_status(&self) -> Result<DashboardStats> {
        debug!("Fetching dashboard status");
        let response = self.http.get(self.url("/api/status")).send().await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// Raw bytes of a card preview image
    pub async fn fetch_preview(&self, path: &str) -> Result<Vec<u8>> {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            self.url(path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        debug!("Fetching preview image from {}", url);
        let response = self.http.get(url).send().await?;
        Ok(expect_ok(response).await?.bytes().await?.to_vec())
    }

    /// Children of a remote drive folder
    pub async fn list_drive_items(&self, request: &DriveItemsRequest) -> Result<Vec<DriveItem>> {
        debug!(
            "Listing drive items for folder {} at level {}",
            request.folder_id.as_deref().unwrap_or("<root>"),
            request.dir_level
        );
        let response = self
            .http
            .post(self.url("/get-user-drive-items"))
            .json(request)
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// All configured path mappings
    pub async fn fetch_path_mappings(&self) -> Result<Vec<PathMapping>> {
        debug!("Fetching path mappings");
        let response = self.http.get(self.url("/api/path-mappings")).send().await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// Adds a mapping, or edits one when `old_smb_id` is set
    pub async fn add_path_mapping(&self, form: &PathMappingForm) -> Result<()> {
        info!("Submitting path mapping for share {}", form.smb_name);
        let response = self
            .http
            .post(self.url("/add-path-mapping"))
            .form(form)
            .send()
            .await?;
        let envelope: ApiMessage = expect_ok(response).await?.json().await?;
        if envelope.success == Some(false) {
            return Err(ApiError::Status {
                status: 200,
                body: envelope
                    .error
                    .unwrap_or_else(|| "Unknown error while submitting".to_string()),
            });
        }
        Ok(())
    }

    pub async fn delete_path_mapping(&self, id: i64) -> Result<()> {
        info!("Deleting path mapping {}", id);
        let response = self
            .http
            .post(self.url("/delete-path-mapping"))
            .json(&serde_json::json!({ "smb_id": id }))
            .send()
            .await?;
        expect_ok(response).await?;
        Ok(())
    }

    /// Folder/drive/web-url details used to preload the edit form
    pub async fn path_mapping_details(&self, id: i64) -> Result<PathMappingDetails> {
        debug!("Fetching path mapping details for {}", id);
        let response = self
            .http
            .get(self.url(&format!("/get-path-mapping-details/{id}")))
            .send()
            .await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    pub async fn save_onedrive_settings(&self, client_id: &str) -> Result<String> {
        info!("Saving OneDrive settings");
        let response = self
            .http
            .post(self.url("/api/onedrive-settings"))
            .json(&serde_json::json!({ "clientID": client_id }))
            .send()
            .await?;
        message_of(response, "Settings saved successfully.").await
    }

    /// Saves the OpenAI key; the service validates it before accepting
    pub async fn save_openai_settings(&self, api_key: &str) -> Result<String> {
        info!("Saving OpenAI settings");
        let response = self
            .http
            .post(self.url("/api/openai-settings"))
            .json(&serde_json::json!({ "openai_key": api_key }))
            .send()
            .await?;
        message_of(response, "OpenAI settings saved successfully.").await
    }

    pub async fn delete_openai_settings(&self) -> Result<String> {
        info!("Deleting OpenAI settings");
        let response = self
            .http
            .delete(self.url("/api/openai-settings"))
            .send()
            .await?;
        message_of(response, "OpenAI settings deleted successfully.").await
    }

    pub async fn save_ollama_settings(&self, form: &OllamaSettingsForm) -> Result<String> {
        info!("Saving Ollama settings with model {}", form.ollama_model_select);
        let response = self
            .http
            .post(self.url("/api/ollama-settings"))
            .json(form)
            .send()
            .await?;
        message_of(response, "Ollama settings saved successfully.").await
    }

    pub async fn delete_ollama_settings(&self) -> Result<String> {
        info!("Deleting Ollama settings");
        let response = self
            .http
            .delete(self.url("/api/ollama-settings"))
            .send()
            .await?;
        message_of(response, "Ollama settings deleted successfully.").await
    }

    /// Disables AI file naming; the body text explains which case applied
    pub async fn disable_file_naming(&self) -> Result<String> {
        info!("Disabling file naming");
        let response = self
            .http
            .post(self.url("/api/disable-file-naming"))
            .send()
            .await?;
        let response = expect_ok(response).await?;
        Ok(response.text().await.unwrap_or_default())
    }

    /// One page of file-naming logs
    pub async fn file_naming_logs(
        &self,
        page: u32,
        per_page: u32,
        filter: LogFilter,
    ) -> Result<FileNamingLogs> {
        debug!("Fetching file naming logs page {} (filter {})", page, filter.as_query());
        let mut request = self
            .http
            .get(self.url("/api/file-naming-logs"))
            .query(&[("page", page), ("per_page", per_page)]);
        if filter != LogFilter::All {
            request = request.query(&[("filter", filter.as_query())]);
        }
        let response = request.send().await?;
        Ok(expect_ok(response).await?.json().await?)
    }

    /// Probes an Ollama server directly: version first, then its models
    pub async fn probe_ollama(
        &self,
        scheme: &str,
        address: &str,
        port: &str,
    ) -> Result<OllamaProbe> {
        let base = format!("{}://{}:{}", scheme, address.trim_end_matches('/'), port);
        info!("Probing Ollama server at {}", base);

        let response = self.http.get(format!("{base}/api/version")).send().await?;
        let version: OllamaVersion = expect_ok(response).await?.json().await?;

        let response = self.http.get(format!("{base}/api/tags")).send().await?;
        let tags: OllamaTags = expect_ok(response).await?.json().await?;
        if tags.models.is_empty() {
            return Err(ApiError::Status {
                status: 200,
                body: "No models found on Ollama server.".to_string(),
            });
        }

        Ok(OllamaProbe {
            version: version.version.unwrap_or_else(|| "unknown".to_string()),
            models: tags.models,
        })
    }
}

/// Passes a success response through, turns anything else into
/// [`ApiError::Status`] with the body text
async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Extracts the `{message}` of a success envelope, or the `{error}` of a
/// failure one, falling back to a default
async fn message_of(response: reqwest::Response, fallback: &str) -> Result<String> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let envelope: ApiMessage = serde_json::from_str(&body).unwrap_or_default();
    if status.is_success() {
        Ok(envelope.message.unwrap_or_else(|| fallback.to_string()))
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            body: envelope.error.unwrap_or(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://sync.local:5001/");
        assert_eq!(client.base_url(), "http://sync.local:5001");
        assert_eq!(client.url("/stream"), "http://sync.local:5001/stream");
    }

    #[test]
    fn drive_items_request_uses_service_field_names() {
        let request = DriveItemsRequest {
            folder_id: Some("f1".into()),
            drive_id: None,
            is_shared_with_me: true,
            dir_level: 2,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["folderID"], "f1");
        assert_eq!(body["driveID"], serde_json::Value::Null);
        assert_eq!(body["isSharedWithMe"], true);
        assert_eq!(body["onedriveDirLevel"], 2);
    }

    #[test]
    fn load_request_converts_to_body() {
        let load = LoadRequest {
            token: 4,
            folder_id: Some("abc".into()),
            is_shared_with_me: false,
            drive_id: Some("d1".into()),
            dir_level: 3,
        };
        let body = DriveItemsRequest::from(&load);
        assert_eq!(body.folder_id.as_deref(), Some("abc"));
        assert_eq!(body.drive_id.as_deref(), Some("d1"));
        assert_eq!(body.dir_level, 3);
    }

    #[test]
    fn ollama_model_label_includes_parameter_size() {
        let model = OllamaModel {
            name: "llama3".into(),
            model: None,
            modified_at: None,
            details: Some(OllamaModelDetails {
                parameter_size: Some("8B".into()),
            }),
        };
        assert_eq!(model.label(), "llama3 (8B)");

        let bare = OllamaModel {
            name: "mistral".into(),
            model: None,
            modified_at: None,
            details: None,
        };
        assert_eq!(bare.label(), "mistral (n/a)");
    }
}
