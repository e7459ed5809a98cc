mod scenarios;

pub use scenarios::{preset_scenarios, PresetScenario, ScenarioKind};

use scenarios::{FALLBACK_RESPONSE, KEYWORD_RULES, REPLY_INTRO};
use serde::Serialize;

/// Canned advisory text selected for one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisorReply {
    /// The matched scenario, or `None` when the generic fallback applied.
    pub scenario: Option<ScenarioKind>,
    pub reply: String,
}

/// Keyword-matched canned-response advisor. No inference, no state: every
/// reply is a substring lookup over a fixed rule table.
#[derive(Debug, Default)]
pub struct ChatAdvisor;

impl ChatAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, message: &str) -> AdvisorReply {
        let normalized = message.to_lowercase();

        for rule in KEYWORD_RULES {
            if rule
                .triggers
                .iter()
                .any(|keyword| normalized.contains(keyword))
            {
                return AdvisorReply {
                    scenario: Some(rule.kind),
                    reply: format!("{REPLY_INTRO}{}", rule.response),
                };
            }
        }

        AdvisorReply {
            scenario: None,
            reply: format!("{REPLY_INTRO}{FALLBACK_RESPONSE}"),
        }
    }
}
