//! Wire types exchanged with the hosted backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::wizard::{CloneStatus, PersonalityProfile, Pricing};

/// Failures surfaced by the backend seam. None of these are fatal: every
/// one returns control to an interactive, retryable state.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Payload for creating or updating a clone record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneDraft {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub personality: PersonalityProfile,
    pub communication_style: Option<String>,
    pub response_length: Option<String>,
    pub pricing: Pricing,
    pub enable_audio: bool,
    pub enable_video: bool,
    pub status: CloneStatus,
}

/// One fixed training question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

/// A stored training document reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub name: String,
    pub url: String,
}

/// A full clone record as returned by the row store
#[derive(Debug, Clone, Deserialize)]
pub struct CloneRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub category: String,
    #[serde(default)]
    pub custom_domain: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub personality: PersonalityProfile,
    #[serde(default)]
    pub communication_style: Option<String>,
    #[serde(default)]
    pub response_length: Option<String>,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub enable_audio: bool,
    #[serde(default)]
    pub enable_video: bool,
    #[serde(default)]
    pub status: CloneStatus,
    #[serde(default)]
    pub qa: Vec<QaEntry>,
    #[serde(default)]
    pub documents: Vec<DocumentRow>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for the chat completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub history: Vec<ChatTurnDto>,
}

/// One prior conversation turn carried with a chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnDto {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Request body for the knowledge processing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeRequest {
    pub clone_id: String,
    pub documents: Vec<String>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeResponse {
    pub overall_status: KnowledgeStatus,
}

/// Status of the opaque knowledge processing job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeStatus {
    Pending,
    Processing,
    Completed,
    Partial,
    Failed,
}

impl KnowledgeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Partial => "Partially processed",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_status_roundtrips_lowercase() {
        for (status, wire) in [
            (KnowledgeStatus::Pending, "\"pending\""),
            (KnowledgeStatus::Processing, "\"processing\""),
            (KnowledgeStatus::Completed, "\"completed\""),
            (KnowledgeStatus::Partial, "\"partial\""),
            (KnowledgeStatus::Failed, "\"failed\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let parsed: KnowledgeStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_clone_record_tolerates_sparse_json() {
        let json = r#"{
            "id": "clone-1",
            "name": "Dr. Chen",
            "title": "Coach",
            "bio": "Bio",
            "category": "coaching",
            "unknown_field": 42
        }"#;
        let record: CloneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "clone-1");
        assert_eq!(record.status, CloneStatus::Draft);
        assert!(record.qa.is_empty());
        assert!(record.custom_domain.is_none());
        assert_eq!(record.personality.warmth, 50);
    }

    #[test]
    fn test_clone_draft_omits_absent_optionals() {
        let draft = CloneDraft {
            name: "N".to_string(),
            title: "T".to_string(),
            bio: "B".to_string(),
            category: "legal".to_string(),
            custom_domain: None,
            avatar_url: None,
            personality: PersonalityProfile::default(),
            communication_style: None,
            response_length: None,
            pricing: Pricing::default(),
            enable_audio: false,
            enable_video: false,
            status: CloneStatus::Draft,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("custom_domain"));
        assert!(!json.contains("avatar_url"));
        assert!(json.contains("\"status\":\"draft\""));
    }
}
