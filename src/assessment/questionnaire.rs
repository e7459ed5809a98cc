use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// A selectable choice with its fraud-exposure weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    pub score: u32,
}

/// One questionnaire entry. Prompt and labels are opaque display text;
/// only `id`, option `value`, and option `score` matter to scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn max_option_score(&self) -> u32 {
        self.options.iter().map(|option| option.score).max().unwrap_or(0)
    }

    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionnaireError {
    #[error("questionnaire must contain at least one question")]
    Empty,
    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),
    #[error("question '{0}' has no options")]
    QuestionWithoutOptions(String),
    #[error("question '{question}' repeats option value '{value}'")]
    DuplicateOptionValue { question: String, value: String },
}

/// Ordered, build-time-fixed questionnaire. Structure is validated at
/// construction so the scoring path never has to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::Empty);
        }

        let mut seen_ids = BTreeSet::new();
        for question in &questions {
            if !seen_ids.insert(question.id.clone()) {
                return Err(QuestionnaireError::DuplicateQuestionId(question.id.clone()));
            }
            if question.options.is_empty() {
                return Err(QuestionnaireError::QuestionWithoutOptions(
                    question.id.clone(),
                ));
            }
            let mut seen_values = BTreeSet::new();
            for option in &question.options {
                if !seen_values.insert(option.value.clone()) {
                    return Err(QuestionnaireError::DuplicateOptionValue {
                        question: question.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    /// The fixed eight-question exposure survey used by the platform.
    pub fn standard() -> Self {
        fn option(value: &str, label: &str, score: u32) -> AnswerOption {
            AnswerOption {
                value: value.to_string(),
                label: label.to_string(),
                score,
            }
        }

        fn question(id: &str, prompt: &str, options: Vec<AnswerOption>) -> Question {
            Question {
                id: id.to_string(),
                prompt: prompt.to_string(),
                options,
            }
        }

        Self {
            questions: vec![
                question(
                    "age",
                    "Which age group are you in?",
                    vec![
                        option("18-25", "18 to 25", 3),
                        option("26-35", "26 to 35", 2),
                        option("36-50", "36 to 50", 1),
                        option("50+", "Over 50", 2),
                    ],
                ),
                question(
                    "education",
                    "What is your highest level of education?",
                    vec![
                        option("high-school", "High school or below", 2),
                        option("college", "Undergraduate degree", 1),
                        option("graduate", "Graduate degree or above", 0),
                    ],
                ),
                question(
                    "internet-usage",
                    "How much time do you spend online each day?",
                    vec![
                        option("1-3", "1 to 3 hours", 1),
                        option("3-6", "3 to 6 hours", 2),
                        option("6+", "More than 6 hours", 3),
                    ],
                ),
                question(
                    "online-shopping",
                    "How often do you shop online?",
                    vec![
                        option("rarely", "Rarely", 0),
                        option("monthly", "A few times a month", 1),
                        option("weekly", "A few times a week", 2),
                        option("daily", "Almost every day", 3),
                    ],
                ),
                question(
                    "social-media",
                    "Which kind of social platform do you use the most?",
                    vec![
                        option("messaging", "Private messaging apps", 1),
                        option("lifestyle", "Lifestyle and shopping communities", 3),
                        option("microblog", "Microblogging feeds", 2),
                        option("forums", "Chat rooms and forums", 2),
                    ],
                ),
                question(
                    "verification-codes",
                    "A caller claiming to be customer service asks for a verification code. You would:",
                    vec![
                        option("provide", "Provide it right away", 3),
                        option("hesitate", "Hesitate, then provide it", 2),
                        option("verify", "Verify their identity first", 1),
                        option("refuse", "Refuse outright", 0),
                    ],
                ),
                question(
                    "investment-experience",
                    "How much investment experience do you have?",
                    vec![
                        option("none", "I never invest", 1),
                        option("beginner", "Beginner", 3),
                        option("intermediate", "Some experience", 2),
                        option("expert", "Experienced", 0),
                    ],
                ),
                question(
                    "fraud-awareness",
                    "How familiar are you with common scam tactics?",
                    vec![
                        option("very-familiar", "Very familiar", 0),
                        option("somewhat", "Somewhat familiar", 1),
                        option("little", "Only slightly", 2),
                        option("not-at-all", "Not at all", 3),
                    ],
                ),
            ],
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Partial-or-complete record of the user's chosen options, keyed by
/// question id. Re-answering a question overwrites the earlier choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    choices: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, question_id: impl Into<String>, option_value: impl Into<String>) {
        self.choices.insert(question_id.into(), option_value.into());
    }

    pub fn choice(&self, question_id: &str) -> Option<&str> {
        self.choices.get(question_id).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn answered_count(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl FromIterator<(String, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            choices: iter.into_iter().collect(),
        }
    }
}
