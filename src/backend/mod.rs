//! Backend client module for the hosted CloneAI services

mod client;
mod traits;
mod types;

pub use client::HttpBackend;
pub use traits::BackendService;
pub use types::{
    BackendError, ChatRequest, ChatResponse, ChatTurnDto, CloneDraft, CloneRecord, DocumentRow,
    KnowledgeRequest, KnowledgeResponse, KnowledgeStatus, QaEntry,
};

#[cfg(test)]
pub use traits::MockBackendService;
