use super::questionnaire::{AnswerSet, Question};
use super::{AssessmentEngine, AssessmentError, AssessmentResult};

/// Outcome of advancing the wizard by one step.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Still answering; the index of the question now in front of the user.
    Question(usize),
    Completed(AssessmentResult),
}

/// Linear question-by-question flow wrapped around the engine.
///
/// The position moves forward and backward within the questionnaire;
/// advancing past the last question invokes scoring exactly once and
/// freezes the wizard until `restart`.
pub struct AssessmentWizard {
    engine: AssessmentEngine,
    position: usize,
    answers: AnswerSet,
    result: Option<AssessmentResult>,
}

impl AssessmentWizard {
    pub fn new(engine: AssessmentEngine) -> Self {
        Self {
            engine,
            position: 0,
            answers: AnswerSet::new(),
            result: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn question_count(&self) -> usize {
        self.engine.questionnaire().question_count()
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.result.is_some() {
            return None;
        }
        self.engine.questionnaire().questions().get(self.position)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    /// Whether the question in front of the user has an answer recorded.
    pub fn can_proceed(&self) -> bool {
        self.current_question()
            .map(|question| self.answers.choice(&question.id).is_some())
            .unwrap_or(false)
    }

    /// Records a choice for the current question, overwriting any earlier
    /// one. Returns false once the wizard has completed.
    pub fn select(&mut self, option_value: impl Into<String>) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let id = question.id.clone();
        self.answers.select(id, option_value);
        true
    }

    /// Moves to the next question, or scores the answer set when the last
    /// question is confirmed.
    pub fn advance(&mut self) -> Result<WizardStep, AssessmentError> {
        if let Some(result) = &self.result {
            return Ok(WizardStep::Completed(result.clone()));
        }

        if self.position + 1 < self.question_count() {
            self.position += 1;
            return Ok(WizardStep::Question(self.position));
        }

        let result = self.engine.score(&self.answers)?;
        self.result = Some(result.clone());
        Ok(WizardStep::Completed(result))
    }

    /// Steps back one question; a no-op at the first question or after
    /// completion.
    pub fn back(&mut self) -> usize {
        if self.result.is_none() && self.position > 0 {
            self.position -= 1;
        }
        self.position
    }

    /// Discards all answers and any result, returning to the first question.
    pub fn restart(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::RiskTier;

    fn wizard() -> AssessmentWizard {
        AssessmentWizard::new(AssessmentEngine::standard())
    }

    #[test]
    fn starts_at_the_first_question_with_no_answers() {
        let wizard = wizard();
        assert_eq!(wizard.position(), 0);
        assert!(wizard.answers().is_empty());
        assert!(!wizard.is_completed());
        assert!(!wizard.can_proceed());
    }

    #[test]
    fn back_is_a_no_op_at_the_first_question() {
        let mut wizard = wizard();
        assert_eq!(wizard.back(), 0);
    }

    #[test]
    fn advancing_past_the_last_question_scores_once() {
        let mut wizard = wizard();
        let total = wizard.question_count();

        for _ in 0..total - 1 {
            let step = wizard.advance().expect("advances");
            assert!(matches!(step, WizardStep::Question(_)));
        }

        let step = wizard.advance().expect("completes");
        let WizardStep::Completed(result) = step else {
            panic!("expected completion at the last question");
        };
        assert_eq!(result.raw_score, 0);
        assert_eq!(result.risk_tier, RiskTier::Low);
        assert!(wizard.is_completed());
        assert!(wizard.current_question().is_none());
    }

    #[test]
    fn advancing_after_completion_returns_the_same_result() {
        let mut wizard = wizard();
        for _ in 0..wizard.question_count() {
            wizard.advance().expect("advances");
        }
        let first = wizard.result().expect("result stored").clone();

        let step = wizard.advance().expect("still completed");
        let WizardStep::Completed(second) = step else {
            panic!("expected completed step");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn select_targets_the_question_in_front_of_the_user() {
        let mut wizard = wizard();
        assert!(wizard.select("18-25"));
        assert!(wizard.can_proceed());
        assert_eq!(wizard.answers().choice("age"), Some("18-25"));

        wizard.advance().expect("advances");
        assert!(wizard.select("college"));
        assert_eq!(wizard.answers().choice("education"), Some("college"));
    }

    #[test]
    fn revisiting_a_question_overwrites_the_answer() {
        let mut wizard = wizard();
        wizard.select("18-25");
        wizard.advance().expect("advances");
        wizard.back();
        wizard.select("36-50");
        assert_eq!(wizard.answers().choice("age"), Some("36-50"));
    }

    #[test]
    fn restart_clears_answers_and_result() {
        let mut wizard = wizard();
        wizard.select("18-25");
        for _ in 0..wizard.question_count() {
            wizard.advance().expect("advances");
        }
        assert!(wizard.is_completed());

        wizard.restart();
        assert_eq!(wizard.position(), 0);
        assert!(wizard.answers().is_empty());
        assert!(wizard.result().is_none());
        assert!(!wizard.is_completed());
    }

    #[test]
    fn select_is_rejected_after_completion() {
        let mut wizard = wizard();
        for _ in 0..wizard.question_count() {
            wizard.advance().expect("advances");
        }
        assert!(!wizard.select("18-25"));
    }
}
