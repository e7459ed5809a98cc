use serde::{Deserialize, Serialize};

/// Ordinal fraud-susceptibility bucket derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Thresholds are inclusive upper bounds: 30 is still low, 60 is
    /// still medium.
    pub(crate) fn classify(percentage: u8) -> Self {
        if percentage <= 30 {
            RiskTier::Low
        } else if percentage <= 60 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk",
            RiskTier::Medium => "Medium risk",
            RiskTier::High => "High risk",
        }
    }
}

pub(crate) fn recommendations_for(tier: RiskTier) -> Vec<String> {
    let lines: &[&str] = match tier {
        RiskTier::Low => &[
            "Keep up your habit of verifying before you act",
            "Check newly reported scam tactics from time to time",
            "Help the people around you build scam awareness",
        ],
        RiskTier::Medium => &[
            "Spend more time studying common scam playbooks",
            "Treat financial requests from strangers with caution",
            "Verify suspicious claims through official channels",
            "Avoid transactions on unofficial platforms",
        ],
        RiskTier::High => &[
            "Start learning scam-prevention basics immediately and stay alert",
            "Never trust messages that ask you to transfer money",
            "Confirm every financial operation through a second channel",
            "Stay away from investments promising high returns at low risk",
            "Do not conduct large transactions over social platforms",
        ],
    };

    lines.iter().map(|line| line.to_string()).collect()
}
