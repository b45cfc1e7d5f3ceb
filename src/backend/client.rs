//! HTTP client for the hosted CloneAI backend
//!
//! All calls are plain JSON request/response bodies; uploads go through a
//! multipart storage endpoint that answers with a public URL.

use async_trait::async_trait;
use serde::Deserialize;

use super::traits::BackendService;
use super::types::{
    BackendError, ChatRequest, ChatResponse, CloneDraft, CloneRecord, DocumentRow,
    KnowledgeRequest, KnowledgeResponse, QaEntry,
};
use crate::config::AppConfig;
use crate::state::CloneSummary;

/// Default backend address
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client for the CloneAI backend services
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CloneListResponse {
    clones: Vec<CloneSummary>,
}

impl HttpBackend {
    /// Build a client from config, with environment overrides
    pub fn new(config: &AppConfig) -> Self {
        let base_url = std::env::var("CLONEAI_API_URL")
            .ok()
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("CLONEAI_API_KEY").ok();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    /// Map non-2xx responses to an API error carrying the body text
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BackendService for HttpBackend {
    async fn check_connection(&self) -> bool {
        let request = self.authed(self.http.get(self.url("/health")));
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_clones(&mut self, owner_id: &str) -> Result<Vec<CloneSummary>, BackendError> {
        let request = self
            .authed(self.http.get(self.url("/rest/clones")))
            .query(&[("owner_id", owner_id)]);
        let response = Self::check_status(request.send().await?).await?;
        let list: CloneListResponse = response.json().await?;
        Ok(list.clones)
    }

    async fn get_clone(&mut self, clone_id: &str) -> Result<CloneRecord, BackendError> {
        let request = self.authed(self.http.get(self.url(&format!("/rest/clones/{clone_id}"))));
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create_clone(&mut self, draft: &CloneDraft) -> Result<String, BackendError> {
        let request = self.authed(self.http.post(self.url("/rest/clones")).json(draft));
        let response = Self::check_status(request.send().await?).await?;
        let created: CreatedResponse = response.json().await?;
        if created.id.is_empty() {
            return Err(BackendError::Decode("create returned an empty id".to_string()));
        }
        tracing::info!(clone_id = %created.id, "created clone record");
        Ok(created.id)
    }

    async fn update_clone(
        &mut self,
        clone_id: &str,
        draft: &CloneDraft,
    ) -> Result<(), BackendError> {
        let request = self.authed(
            self.http
                .patch(self.url(&format!("/rest/clones/{clone_id}")))
                .json(draft),
        );
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn delete_clone(&mut self, clone_id: &str) -> Result<(), BackendError> {
        let request = self.authed(self.http.delete(self.url(&format!("/rest/clones/{clone_id}"))));
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn upsert_qa(
        &mut self,
        clone_id: &str,
        entries: &[QaEntry],
    ) -> Result<(), BackendError> {
        let request = self.authed(
            self.http
                .put(self.url(&format!("/rest/clones/{clone_id}/qa")))
                .json(&entries),
        );
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn insert_document(
        &mut self,
        clone_id: &str,
        row: &DocumentRow,
    ) -> Result<(), BackendError> {
        let request = self.authed(
            self.http
                .post(self.url(&format!("/rest/clones/{clone_id}/documents")))
                .json(row),
        );
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn insert_link(&mut self, clone_id: &str, url: &str) -> Result<(), BackendError> {
        let request = self.authed(
            self.http
                .post(self.url(&format!("/rest/clones/{clone_id}/links")))
                .json(&serde_json::json!({ "url": url })),
        );
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn upload_object(
        &mut self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let file_name = path
            .rsplit('/')
            .next()
            .unwrap_or("object")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self.authed(
            self.http
                .post(self.url(&format!("/storage/{path}")))
                .multipart(form),
        );
        let response = Self::check_status(request.send().await?).await?;
        let uploaded: UploadResponse = response.json().await?;
        tracing::info!(path, url = %uploaded.url, "uploaded object");
        Ok(uploaded.url)
    }

    async fn chat(&mut self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        let request = self.authed(self.http.post(self.url("/ai/chat")).json(request));
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn process_knowledge(
        &mut self,
        request: &KnowledgeRequest,
    ) -> Result<KnowledgeResponse, BackendError> {
        let request = self.authed(
            self.http
                .post(self.url("/ai/knowledge/process"))
                .json(request),
        );
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}
