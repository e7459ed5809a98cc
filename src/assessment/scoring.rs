use super::questionnaire::{AnswerSet, Questionnaire};

pub(crate) struct ScoreTally {
    pub raw_score: u32,
    pub max_score: u32,
}

/// Accumulates the attainable maximum and the achieved score.
///
/// Unanswered questions contribute nothing. An answer value that matches no
/// option of its question also contributes nothing; that is a data-integrity
/// fault upstream and must never block scoring.
pub(crate) fn tally(questionnaire: &Questionnaire, answers: &AnswerSet) -> ScoreTally {
    let mut raw_score = 0;
    let mut max_score = 0;

    for question in questionnaire.questions() {
        max_score += question.max_option_score();

        if let Some(value) = answers.choice(&question.id) {
            if let Some(option) = question.option(value) {
                raw_score += option.score;
            }
        }
    }

    ScoreTally {
        raw_score,
        max_score,
    }
}

/// Rounded percentage of the attainable maximum. Callers guarantee
/// `max_score > 0`.
pub(crate) fn percentage(tally: &ScoreTally) -> u8 {
    (f64::from(tally.raw_score) * 100.0 / f64::from(tally.max_score)).round() as u8
}
