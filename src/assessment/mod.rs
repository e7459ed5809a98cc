mod policy;
mod questionnaire;
mod scoring;
mod wizard;

pub use policy::RiskTier;
pub use questionnaire::{AnswerOption, AnswerSet, Question, Questionnaire, QuestionnaireError};
pub use wizard::{AssessmentWizard, WizardStep};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The questionnaire's attainable maximum score is zero, so no
    /// percentage can be computed. A configuration fault, not user input.
    #[error("questionnaire has a zero attainable maximum score")]
    InvalidQuestionnaire,
}

/// Stateless scorer over a fixed questionnaire.
pub struct AssessmentEngine {
    questionnaire: Questionnaire,
}

impl AssessmentEngine {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn standard() -> Self {
        Self::new(Questionnaire::standard())
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Scores a (possibly partial) answer set against the questionnaire.
    ///
    /// Pure apart from the `completed_at` timestamp: identical inputs yield
    /// identical scores, tiers, and recommendations.
    pub fn score(&self, answers: &AnswerSet) -> Result<AssessmentResult, AssessmentError> {
        let tally = scoring::tally(&self.questionnaire, answers);
        if tally.max_score == 0 {
            return Err(AssessmentError::InvalidQuestionnaire);
        }

        let percentage = scoring::percentage(&tally);
        let risk_tier = RiskTier::classify(percentage);

        Ok(AssessmentResult {
            raw_score: tally.raw_score,
            max_score: tally.max_score,
            percentage,
            risk_tier,
            recommendations: policy::recommendations_for(risk_tier),
            completed_at: Utc::now(),
        })
    }
}

/// Immutable outcome of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub raw_score: u32,
    pub max_score: u32,
    pub percentage: u8,
    pub risk_tier: RiskTier,
    pub recommendations: Vec<String>,
    pub completed_at: DateTime<Utc>,
}
