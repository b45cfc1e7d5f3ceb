//! Trait abstraction for the backend client to enable mocking in tests

use async_trait::async_trait;

use super::types::{
    BackendError, ChatRequest, ChatResponse, CloneDraft, CloneRecord, DocumentRow,
    KnowledgeRequest, KnowledgeResponse, QaEntry,
};
use crate::state::CloneSummary;

/// Trait for backend operations, enabling mocking in tests
#[allow(dead_code)]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendService: Send + Sync {
    /// Check if the backend is reachable
    async fn check_connection(&self) -> bool;

    /// List clones owned by the given expert
    async fn list_clones(&mut self, owner_id: &str) -> Result<Vec<CloneSummary>, BackendError>;

    /// Fetch a full clone record
    async fn get_clone(&mut self, clone_id: &str) -> Result<CloneRecord, BackendError>;

    /// Create a new clone record, returning its id
    async fn create_clone(&mut self, draft: &CloneDraft) -> Result<String, BackendError>;

    /// Update an existing clone record
    async fn update_clone(
        &mut self,
        clone_id: &str,
        draft: &CloneDraft,
    ) -> Result<(), BackendError>;

    /// Delete a clone record
    async fn delete_clone(&mut self, clone_id: &str) -> Result<(), BackendError>;

    /// Replace the one-row-per-clone Q&A blob
    async fn upsert_qa(
        &mut self,
        clone_id: &str,
        entries: &[QaEntry],
    ) -> Result<(), BackendError>;

    /// Insert one training-document row
    async fn insert_document(
        &mut self,
        clone_id: &str,
        row: &DocumentRow,
    ) -> Result<(), BackendError>;

    /// Insert one training-link row
    async fn insert_link(&mut self, clone_id: &str, url: &str) -> Result<(), BackendError>;

    /// Upload an object to storage, returning its public URL
    async fn upload_object(
        &mut self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError>;

    /// One chat completion round with a clone
    async fn chat(&mut self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    /// Submit documents and links for knowledge processing and await the
    /// job's single status response
    async fn process_knowledge(
        &mut self,
        request: &KnowledgeRequest,
    ) -> Result<KnowledgeResponse, BackendError>;
}
