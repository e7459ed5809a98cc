use serde::{Deserialize, Serialize};

/// Scam scenario categories the advisor can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    ShoppingRefund,
    Investment,
    Impersonation,
    PartTimeJob,
}

impl ScenarioKind {
    pub fn title(&self) -> &'static str {
        match self {
            ScenarioKind::ShoppingRefund => "Online refund scam",
            ScenarioKind::Investment => "Investment platform scam",
            ScenarioKind::Impersonation => "Law-enforcement impersonation scam",
            ScenarioKind::PartTimeJob => "Order-rebate job scam",
        }
    }
}

pub(crate) struct KeywordRule {
    pub kind: ScenarioKind,
    pub triggers: &'static [&'static str],
    pub response: &'static str,
}

/// Rules in match priority order. The order is load-bearing: when a message
/// contains keywords from several categories, the first rule wins.
pub(crate) const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        kind: ScenarioKind::ShoppingRefund,
        triggers: &["refund", "customer service"],
        response: "This is very likely a scam. Legitimate platforms handle refunds through their official process.\n\nWarning signs:\n- Real customer service never asks you to move to a private messaging account\n- Refunds are processed inside the official platform, not over the phone\n- No refund ever requires your card password or a verification code\n\nWhat to do:\n1. Hang up and check the order status in the official app\n2. Call the platform's published support line to verify\n3. If a refund is due, complete it inside the official platform\n4. Do not share personal information with the caller",
    },
    KeywordRule {
        kind: ScenarioKind::Investment,
        triggers: &["investment", "wealth management", "returns"],
        response: "This is a classic investment scam pattern. Stop participating now.\n\nWarning signs:\n- Promises of high returns at low risk defy how markets work\n- Group chats are seeded with shills to build excitement\n- The platform holds no financial license\n- The mentor's identity cannot be verified\n\nWhat to do:\n1. Remember that high returns always come with high risk\n2. Use only licensed financial institutions\n3. Ignore insider tips and expert guidance from strangers\n4. Invest rationally and within your means",
    },
    KeywordRule {
        kind: ScenarioKind::Impersonation,
        triggers: &["police", "law enforcement", "money laundering"],
        response: "This is a serious law-enforcement impersonation scam. Stop cooperating immediately.\n\nHow to recognize it:\n- Police and prosecutors never handle cases over the phone\n- There is no such thing as a safe account\n- Real investigations follow formal legal procedure\n- No authority will ever ask you to transfer money\n\nWhat to do:\n1. Hang up immediately\n2. Call the official police number yourself to verify\n3. Do not move any funds\n4. Keep the call records as evidence\n5. Report the call to the police",
    },
    KeywordRule {
        kind: ScenarioKind::PartTimeJob,
        triggers: &["order rebate", "part-time", "advance payment"],
        response: "This is a typical order-rebate job trap. Stop now.\n\nHow the trap works:\n- Paid fake-order tasks are themselves illegal\n- A legitimate job never asks you to pay money up front\n- Small early payouts exist only to win your trust\n- The large advance payment is the point where the money disappears\n\nWhat to do:\n1. Stop taking any further tasks\n2. Do not pay anything more up front\n3. Look for work through legitimate job platforms\n4. If you already paid, report it to the police\n5. Warn the people around you about this scheme",
    },
];

pub(crate) const REPLY_INTRO: &str =
    "I understand your concern. Based on what you have described, here is my read on the situation:\n\n";

pub(crate) const FALLBACK_RESPONSE: &str = "From your description, it pays to stay cautious:\n\nPoints to check:\n- Any request for money up front deserves suspicion\n- Promised returns that sound too good usually are\n- Verify claims through official channels before acting\n- Keep your personal and financial details private\n\nIf you are unsure, consult a professional or the relevant authority. Missing an opportunity is always better than being defrauded.";

/// A ready-made conversation opener shown beside the chat box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetScenario {
    pub id: ScenarioKind,
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub fn preset_scenarios() -> Vec<PresetScenario> {
    vec![
        PresetScenario {
            id: ScenarioKind::ShoppingRefund,
            title: ScenarioKind::ShoppingRefund.title(),
            description: "A fake customer-service call about a defective order",
            prompt: "I just got a call saying an item I bought online has a quality problem and I can get a refund if I add the agent on a messaging app. The caller claimed to be customer service. Is this real?",
        },
        PresetScenario {
            id: ScenarioKind::Investment,
            title: ScenarioKind::Investment.title(),
            description: "Spotting a fake investment platform",
            prompt: "Someone in a group chat shared an investment platform that promises very high returns, with a mentor offering guidance. Should I give it a try?",
        },
        PresetScenario {
            id: ScenarioKind::Impersonation,
            title: ScenarioKind::Impersonation.title(),
            description: "Handling a caller who claims to be the police",
            prompt: "I received a call from someone claiming to be the police, saying I am suspected of money laundering and must transfer my funds to a safe account for review. What should I do?",
        },
        PresetScenario {
            id: ScenarioKind::PartTimeJob,
            title: ScenarioKind::PartTimeJob.title(),
            description: "Recognizing the paid-task job trap",
            prompt: "I saw an ad for a part-time job doing order rebates from home. The first payouts arrived, but now they want a much larger advance payment from me. Is that normal?",
        },
    ]
}
