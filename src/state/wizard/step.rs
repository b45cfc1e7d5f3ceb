//! The seven fixed wizard steps

/// One of the seven wizard stages, in flow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    QaTraining,
    Knowledge,
    PersonaStyle,
    MediaTraining,
    TestChat,
    Pricing,
}

impl WizardStep {
    pub const ALL: [Self; 7] = [
        Self::BasicInfo,
        Self::QaTraining,
        Self::Knowledge,
        Self::PersonaStyle,
        Self::MediaTraining,
        Self::TestChat,
        Self::Pricing,
    ];

    /// 1-based step number shown to the user
    pub fn number(&self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::QaTraining => 2,
            Self::Knowledge => 3,
            Self::PersonaStyle => 4,
            Self::MediaTraining => 5,
            Self::TestChat => 6,
            Self::Pricing => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::QaTraining => "Q&A Training",
            Self::Knowledge => "Knowledge Transfer",
            Self::PersonaStyle => "Persona & Style",
            Self::MediaTraining => "Media Training",
            Self::TestChat => "Test Your Clone",
            Self::Pricing => "Pricing",
        }
    }

    /// Following step, clamped at the last
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::Pricing)
    }

    /// Preceding step, clamped at the first
    pub fn prev(&self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::BasicInfo)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Pricing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_cover_one_through_seven() {
        for (idx, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.number() as usize, idx + 1);
            assert_eq!(WizardStep::from_number(step.number()), Some(*step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(8), None);
    }

    #[test]
    fn test_next_clamps_at_pricing() {
        assert_eq!(WizardStep::TestChat.next(), WizardStep::Pricing);
        assert_eq!(WizardStep::Pricing.next(), WizardStep::Pricing);
    }

    #[test]
    fn test_prev_clamps_at_basic_info() {
        assert_eq!(WizardStep::QaTraining.prev(), WizardStep::BasicInfo);
        assert_eq!(WizardStep::BasicInfo.prev(), WizardStep::BasicInfo);
    }
}
