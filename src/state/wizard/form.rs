//! Wizard form state: every field collected across the seven steps

use serde::{Deserialize, Serialize};

use crate::backend::{CloneDraft, CloneRecord, QaEntry};

/// The five fixed training questions answered in the Q&A step
pub const QA_QUESTIONS: [&str; 5] = [
    "What is your area of expertise and how did you develop it?",
    "What are the most common questions people ask you?",
    "What advice do you give someone just starting out in your field?",
    "What misconceptions do people have about your domain?",
    "How do you explain a complex topic to a complete beginner?",
];

/// Number of fixed training questions
pub const QA_QUESTION_COUNT: usize = QA_QUESTIONS.len();

/// Expertise category chosen in the basic-info step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpertiseCategory {
    Coaching,
    Consulting,
    Finance,
    Fitness,
    Legal,
    Marketing,
    Medical,
    Other,
}

impl ExpertiseCategory {
    pub const ALL: [Self; 8] = [
        Self::Coaching,
        Self::Consulting,
        Self::Finance,
        Self::Fitness,
        Self::Legal,
        Self::Marketing,
        Self::Medical,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coaching => "coaching",
            Self::Consulting => "consulting",
            Self::Finance => "finance",
            Self::Fitness => "fitness",
            Self::Legal => "legal",
            Self::Marketing => "marketing",
            Self::Medical => "medical",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Coaching => "Coaching",
            Self::Consulting => "Consulting",
            Self::Finance => "Finance",
            Self::Fitness => "Fitness",
            Self::Legal => "Legal",
            Self::Marketing => "Marketing",
            Self::Medical => "Medical",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Next category in display order (wraps around)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous category in display order (wraps around)
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How the clone phrases its responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationStyle {
    Friendly,
    Professional,
    Casual,
    Direct,
    Empathetic,
}

impl CommunicationStyle {
    pub const ALL: [Self; 5] = [
        Self::Friendly,
        Self::Professional,
        Self::Casual,
        Self::Direct,
        Self::Empathetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Direct => "direct",
            Self::Empathetic => "empathetic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Direct => "Direct",
            Self::Empathetic => "Empathetic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

/// How long the clone's answers should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLength {
    Concise,
    Balanced,
    Detailed,
}

impl ResponseLength {
    pub const ALL: [Self; 3] = [Self::Concise, Self::Balanced, Self::Detailed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Balanced => "balanced",
            Self::Detailed => "detailed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Concise => "Concise",
            Self::Balanced => "Balanced",
            Self::Detailed => "Detailed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

/// Publication state of a clone record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneStatus {
    #[default]
    Draft,
    Published,
}

impl CloneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }
}

/// Personality trait index, in the order the sliders are shown
pub const PERSONALITY_TRAITS: [&str; 5] =
    ["Warmth", "Formality", "Humor", "Empathy", "Assertiveness"];

/// The five personality sliders, each 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub warmth: u8,
    pub formality: u8,
    pub humor: u8,
    pub empathy: u8,
    pub assertiveness: u8,
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self {
            warmth: 50,
            formality: 50,
            humor: 50,
            empathy: 50,
            assertiveness: 50,
        }
    }
}

impl PersonalityProfile {
    /// Get a trait value by slider index
    pub fn get(&self, index: usize) -> u8 {
        match index {
            0 => self.warmth,
            1 => self.formality,
            2 => self.humor,
            3 => self.empathy,
            _ => self.assertiveness,
        }
    }

    /// Adjust a trait by a signed delta, clamping to 0..=100
    pub fn adjust(&mut self, index: usize, delta: i16) {
        let slot = match index {
            0 => &mut self.warmth,
            1 => &mut self.formality,
            2 => &mut self.humor,
            3 => &mut self.empathy,
            _ => &mut self.assertiveness,
        };
        *slot = (i16::from(*slot) + delta).clamp(0, 100) as u8;
    }
}

/// A per-session rate range for one conversation channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    /// A range is usable when the minimum is positive and the maximum
    /// does not undercut it
    pub fn is_valid(&self) -> bool {
        self.min > 0 && self.max >= self.min
    }
}

/// Rates for the three conversation channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pricing {
    pub text: PriceRange,
    pub voice: PriceRange,
    pub video: PriceRange,
}

impl Pricing {
    pub fn is_valid(&self) -> bool {
        self.text.is_valid() && self.voice.is_valid() && self.video.is_valid()
    }

    /// Mutable access by channel index (0=text, 1=voice, 2=video)
    pub fn range_mut(&mut self, channel: usize) -> &mut PriceRange {
        match channel {
            0 => &mut self.text,
            1 => &mut self.voice,
            _ => &mut self.video,
        }
    }

    pub fn range(&self, channel: usize) -> &PriceRange {
        match channel {
            0 => &self.text,
            1 => &self.voice,
            _ => &self.video,
        }
    }
}

/// Audio/video conversation toggles from the media-training step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaPrefs {
    pub enable_audio: bool,
    pub enable_video: bool,
}

/// A training document attached in the knowledge-transfer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Display name (file name)
    pub name: String,
    /// Local path the file will be uploaded from, if added this session
    pub source_path: Option<String>,
    /// Public URL once object storage accepted the upload
    pub url: Option<String>,
}

impl DocumentRef {
    pub fn from_path(path: &str) -> Self {
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_string();
        Self {
            name,
            source_path: Some(path.to_string()),
            url: None,
        }
    }
}

/// Everything the wizard collects, across all seven steps
#[derive(Debug, Clone, Default)]
pub struct WizardForm {
    // Step 1: basic info
    pub name: String,
    pub title: String,
    pub category: Option<ExpertiseCategory>,
    pub custom_domain: String,
    pub bio: String,
    pub avatar_path: String,
    pub avatar_url: Option<String>,

    // Step 2: Q&A training, one answer per fixed question
    pub qa_answers: [String; QA_QUESTION_COUNT],

    // Step 3: knowledge transfer (optional)
    pub documents: Vec<DocumentRef>,
    pub links: Vec<String>,

    // Step 4: persona style
    pub personality: PersonalityProfile,
    pub communication_style: Option<CommunicationStyle>,
    pub response_length: Option<ResponseLength>,

    // Step 5: media training (optional)
    pub media: MediaPrefs,

    // Step 7: pricing
    pub pricing: Pricing,

    pub status: CloneStatus,
    /// Set on the first successful create and stable for the session;
    /// every later save is an update against this id
    created_clone_id: Option<String>,
}

impl WizardForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the form from a fetched record (edit flow)
    pub fn from_record(record: &CloneRecord) -> Self {
        let mut qa_answers: [String; QA_QUESTION_COUNT] = Default::default();
        for entry in &record.qa {
            if let Some(idx) = QA_QUESTIONS.iter().position(|q| *q == entry.question) {
                qa_answers[idx] = entry.answer.clone();
            }
        }

        Self {
            name: record.name.clone(),
            title: record.title.clone(),
            category: ExpertiseCategory::parse(&record.category),
            custom_domain: record.custom_domain.clone().unwrap_or_default(),
            bio: record.bio.clone(),
            avatar_path: String::new(),
            avatar_url: record.avatar_url.clone(),
            qa_answers,
            documents: record
                .documents
                .iter()
                .map(|d| DocumentRef {
                    name: d.name.clone(),
                    source_path: None,
                    url: Some(d.url.clone()),
                })
                .collect(),
            links: record.links.clone(),
            personality: record.personality,
            communication_style: record
                .communication_style
                .as_deref()
                .and_then(CommunicationStyle::parse),
            response_length: record
                .response_length
                .as_deref()
                .and_then(ResponseLength::parse),
            media: MediaPrefs {
                enable_audio: record.enable_audio,
                enable_video: record.enable_video,
            },
            pricing: record.pricing,
            status: record.status,
            created_clone_id: Some(record.id.clone()),
        }
    }

    /// The persisted record id, if this session has saved at least once
    pub fn created_clone_id(&self) -> Option<&str> {
        self.created_clone_id.as_deref()
    }

    /// Record the id returned by the first successful create. Later calls
    /// keep the original id; it never changes within a session.
    pub fn record_saved(&mut self, id: String) {
        if self.created_clone_id.is_none() {
            self.created_clone_id = Some(id);
        }
    }

    /// Number of training questions with a non-blank answer
    pub fn answered_count(&self) -> usize {
        self.qa_answers
            .iter()
            .filter(|a| !a.trim().is_empty())
            .count()
    }

    /// Non-blank Q&A pairs, in question order
    pub fn qa_entries(&self) -> Vec<QaEntry> {
        QA_QUESTIONS
            .iter()
            .zip(self.qa_answers.iter())
            .filter(|(_, a)| !a.trim().is_empty())
            .map(|(q, a)| QaEntry {
                question: (*q).to_string(),
                answer: a.trim().to_string(),
            })
            .collect()
    }

    // Section completeness, recomputed on demand. These feed both the
    // validator and the progress calculator.

    pub fn basic_info_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.title.trim().is_empty()
            && self.category.is_some()
            && !self.bio.trim().is_empty()
            && (self.category != Some(ExpertiseCategory::Other)
                || !self.custom_domain.trim().is_empty())
    }

    pub fn qa_complete(&self) -> bool {
        self.answered_count() >= QA_QUESTION_COUNT
    }

    pub fn style_complete(&self) -> bool {
        self.communication_style.is_some() && self.response_length.is_some()
    }

    pub fn pricing_complete(&self) -> bool {
        self.pricing.is_valid()
    }

    /// Produce the persistence payload for a create or update
    pub fn to_draft(&self) -> CloneDraft {
        CloneDraft {
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            bio: self.bio.trim().to_string(),
            category: self
                .category
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            custom_domain: if self.category == Some(ExpertiseCategory::Other)
                && !self.custom_domain.trim().is_empty()
            {
                Some(self.custom_domain.trim().to_string())
            } else {
                None
            },
            avatar_url: self.avatar_url.clone(),
            personality: self.personality,
            communication_style: self.communication_style.map(|s| s.as_str().to_string()),
            response_length: self.response_length.map(|l| l.as_str().to_string()),
            pricing: self.pricing,
            enable_audio: self.media.enable_audio,
            enable_video: self.media.enable_video,
            status: self.status,
        }
    }

    /// Synthesize the chat system prompt from the profile fields
    pub fn system_prompt(&self) -> String {
        let domain = match self.category {
            Some(ExpertiseCategory::Other) => self.custom_domain.trim().to_string(),
            Some(c) => c.label().to_string(),
            None => String::new(),
        };

        let mut prompt = format!(
            "You are {}, {}. Your field of expertise is {}.",
            self.name.trim(),
            self.title.trim(),
            domain
        );
        if !self.bio.trim().is_empty() {
            prompt.push_str(&format!(" Background: {}", self.bio.trim()));
        }
        if let Some(style) = self.communication_style {
            prompt.push_str(&format!(" Communicate in a {} manner.", style.as_str()));
        }
        if let Some(length) = self.response_length {
            prompt.push_str(&format!(" Keep responses {}.", length.as_str()));
        }
        for entry in self.qa_entries() {
            prompt.push_str(&format!(" Q: {} A: {}", entry.question, entry.answer));
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_basic_info() -> WizardForm {
        let mut form = WizardForm::new();
        form.name = "Dr. Chen".to_string();
        form.title = "Coach".to_string();
        form.category = Some(ExpertiseCategory::Coaching);
        form.bio = "Twenty years of executive coaching.".to_string();
        form
    }

    mod categories {
        use super::*;

        #[test]
        fn test_parse_roundtrip() {
            for cat in ExpertiseCategory::ALL {
                assert_eq!(ExpertiseCategory::parse(cat.as_str()), Some(cat));
            }
            assert_eq!(ExpertiseCategory::parse("astrology"), None);
        }

        #[test]
        fn test_next_wraps() {
            assert_eq!(ExpertiseCategory::Other.next(), ExpertiseCategory::Coaching);
            assert_eq!(ExpertiseCategory::Coaching.prev(), ExpertiseCategory::Other);
        }
    }

    mod personality {
        use super::*;

        #[test]
        fn test_defaults_to_midpoint() {
            let p = PersonalityProfile::default();
            for idx in 0..PERSONALITY_TRAITS.len() {
                assert_eq!(p.get(idx), 50);
            }
        }

        #[test]
        fn test_adjust_clamps_low() {
            let mut p = PersonalityProfile::default();
            p.adjust(0, -200);
            assert_eq!(p.warmth, 0);
        }

        #[test]
        fn test_adjust_clamps_high() {
            let mut p = PersonalityProfile::default();
            p.adjust(4, 75);
            assert_eq!(p.assertiveness, 100);
        }
    }

    mod pricing {
        use super::*;

        #[test]
        fn test_zero_min_is_invalid() {
            let range = PriceRange { min: 0, max: 10 };
            assert!(!range.is_valid());
        }

        #[test]
        fn test_max_below_min_is_invalid() {
            let range = PriceRange { min: 30, max: 20 };
            assert!(!range.is_valid());
        }

        #[test]
        fn test_equal_min_max_is_valid() {
            let range = PriceRange { min: 25, max: 25 };
            assert!(range.is_valid());
        }

        #[test]
        fn test_all_channels_must_be_valid() {
            let mut pricing = Pricing::default();
            pricing.text = PriceRange { min: 5, max: 10 };
            pricing.voice = PriceRange { min: 10, max: 20 };
            assert!(!pricing.is_valid());
            pricing.video = PriceRange { min: 20, max: 40 };
            assert!(pricing.is_valid());
        }
    }

    mod completeness {
        use super::*;

        #[test]
        fn test_empty_form_has_no_complete_required_sections() {
            let form = WizardForm::new();
            assert!(!form.basic_info_complete());
            assert!(!form.qa_complete());
            assert!(!form.style_complete());
            assert!(!form.pricing_complete());
        }

        #[test]
        fn test_basic_info_requires_custom_domain_only_for_other() {
            let mut form = filled_basic_info();
            assert!(form.basic_info_complete());

            form.category = Some(ExpertiseCategory::Other);
            assert!(!form.basic_info_complete());

            form.custom_domain = "Beekeeping".to_string();
            assert!(form.basic_info_complete());
        }

        #[test]
        fn test_whitespace_answers_do_not_count() {
            let mut form = WizardForm::new();
            for answer in form.qa_answers.iter_mut() {
                *answer = "   ".to_string();
            }
            assert_eq!(form.answered_count(), 0);
            assert!(!form.qa_complete());
        }

        #[test]
        fn test_qa_complete_needs_all_five() {
            let mut form = WizardForm::new();
            for answer in form.qa_answers.iter_mut().take(4) {
                *answer = "An answer".to_string();
            }
            assert_eq!(form.answered_count(), 4);
            assert!(!form.qa_complete());

            form.qa_answers[4] = "The last answer".to_string();
            assert!(form.qa_complete());
        }
    }

    mod record_id {
        use super::*;

        #[test]
        fn test_record_saved_sets_id_once() {
            let mut form = WizardForm::new();
            assert!(form.created_clone_id().is_none());

            form.record_saved("clone-1".to_string());
            assert_eq!(form.created_clone_id(), Some("clone-1"));

            // A second save must never replace the id
            form.record_saved("clone-2".to_string());
            assert_eq!(form.created_clone_id(), Some("clone-1"));
        }
    }

    mod draft {
        use super::*;

        #[test]
        fn test_custom_domain_only_serialized_for_other() {
            let mut form = filled_basic_info();
            form.custom_domain = "ignored".to_string();
            assert_eq!(form.to_draft().custom_domain, None);

            form.category = Some(ExpertiseCategory::Other);
            assert_eq!(form.to_draft().custom_domain.as_deref(), Some("ignored"));
        }

        #[test]
        fn test_draft_trims_identity_fields() {
            let mut form = filled_basic_info();
            form.name = "  Dr. Chen  ".to_string();
            let draft = form.to_draft();
            assert_eq!(draft.name, "Dr. Chen");
            assert_eq!(draft.category, "coaching");
        }
    }

    mod system_prompt {
        use super::*;

        #[test]
        fn test_prompt_contains_profile_fields() {
            let mut form = filled_basic_info();
            form.communication_style = Some(CommunicationStyle::Direct);
            form.response_length = Some(ResponseLength::Concise);
            form.qa_answers[0] = "Executive coaching since 2004.".to_string();

            let prompt = form.system_prompt();
            assert!(prompt.contains("Dr. Chen"));
            assert!(prompt.contains("Coaching"));
            assert!(prompt.contains("direct"));
            assert!(prompt.contains("concise"));
            assert!(prompt.contains("Executive coaching since 2004."));
        }

        #[test]
        fn test_prompt_uses_custom_domain_for_other() {
            let mut form = filled_basic_info();
            form.category = Some(ExpertiseCategory::Other);
            form.custom_domain = "Beekeeping".to_string();
            assert!(form.system_prompt().contains("Beekeeping"));
        }
    }

    mod hydration {
        use super::*;
        use crate::backend::DocumentRow;

        #[test]
        fn test_from_record_roundtrips_to_equivalent_draft() {
            let record = CloneRecord {
                id: "clone-9".to_string(),
                name: "Dr. Chen".to_string(),
                title: "Coach".to_string(),
                bio: "Bio".to_string(),
                category: "coaching".to_string(),
                custom_domain: None,
                avatar_url: Some("https://cdn.example/avatar.png".to_string()),
                personality: PersonalityProfile::default(),
                communication_style: Some("friendly".to_string()),
                response_length: Some("balanced".to_string()),
                pricing: Pricing {
                    text: PriceRange { min: 10, max: 20 },
                    voice: PriceRange { min: 20, max: 40 },
                    video: PriceRange { min: 40, max: 80 },
                },
                enable_audio: true,
                enable_video: false,
                status: CloneStatus::Published,
                qa: vec![QaEntry {
                    question: QA_QUESTIONS[1].to_string(),
                    answer: "Pricing questions, mostly.".to_string(),
                }],
                documents: vec![DocumentRow {
                    name: "notes.pdf".to_string(),
                    url: "https://cdn.example/notes.pdf".to_string(),
                }],
                links: vec!["https://example.com/blog".to_string()],
                created_at: None,
                updated_at: None,
            };

            let form = WizardForm::from_record(&record);
            assert_eq!(form.created_clone_id(), Some("clone-9"));
            assert_eq!(form.qa_answers[1], "Pricing questions, mostly.");
            assert_eq!(form.answered_count(), 1);
            assert_eq!(form.documents.len(), 1);
            assert_eq!(
                form.documents[0].url.as_deref(),
                Some("https://cdn.example/notes.pdf")
            );
            assert!(form.media.enable_audio);

            let draft = form.to_draft();
            assert_eq!(draft.name, record.name);
            assert_eq!(draft.category, record.category);
            assert_eq!(draft.status, CloneStatus::Published);
            assert_eq!(draft.pricing, record.pricing);
        }

        #[test]
        fn test_from_record_ignores_unknown_questions() {
            let record = CloneRecord {
                id: "clone-1".to_string(),
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
                qa: vec![QaEntry {
                    question: "A question that is not in the fixed set?".to_string(),
                    answer: "dropped".to_string(),
                }],
                documents: vec![],
                links: vec![],
                created_at: None,
                updated_at: None,
            };

            let form = WizardForm::from_record(&record);
            assert_eq!(form.answered_count(), 0);
        }
    }
}
