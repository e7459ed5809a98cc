use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scam families the catalog is organized around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FraudCategory {
    OnlineShopping,
    Impersonation,
    OrderBrushing,
    Investment,
    Gaming,
}

impl FraudCategory {
    pub const ALL: [FraudCategory; 5] = [
        FraudCategory::OnlineShopping,
        FraudCategory::Impersonation,
        FraudCategory::OrderBrushing,
        FraudCategory::Investment,
        FraudCategory::Gaming,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FraudCategory::OnlineShopping => "Online shopping scam",
            FraudCategory::Impersonation => "Impersonation scam",
            FraudCategory::OrderBrushing => "Order-rebate scam",
            FraudCategory::Investment => "Investment scam",
            FraudCategory::Gaming => "Gaming scam",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online-shopping" => Some(FraudCategory::OnlineShopping),
            "impersonation" => Some(FraudCategory::Impersonation),
            "order-brushing" => Some(FraudCategory::OrderBrushing),
            "investment" => Some(FraudCategory::Investment),
            "gaming" => Some(FraudCategory::Gaming),
            _ => None,
        }
    }
}

/// A documented scam incident with its prevention checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCase {
    pub id: String,
    pub title: String,
    pub category: FraudCategory,
    pub region: String,
    pub target: String,
    /// Reported loss, in whole yuan.
    pub amount: u64,
    pub description: String,
    pub prevention: Vec<String>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Conjunctive case filter; absent fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilter {
    pub search: Option<String>,
    pub category: Option<FraudCategory>,
    pub region: Option<String>,
}

impl CaseFilter {
    fn matches(&self, case: &FraudCase) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = case.title.to_lowercase().contains(&term)
                || case.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category {
            if case.category != category {
                return false;
            }
        }

        if let Some(region) = &self.region {
            if !case.region.eq_ignore_ascii_case(region) {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: FraudCategory,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Aggregates feeding the landing-page charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStatistics {
    pub total: usize,
    pub by_category: Vec<CategoryCount>,
    pub by_region: Vec<RegionCount>,
}

/// In-memory case library. Ordering is the curated publication order.
#[derive(Debug)]
pub struct CaseCatalog {
    cases: Vec<FraudCase>,
}

impl CaseCatalog {
    pub fn from_cases(cases: Vec<FraudCase>) -> Self {
        Self { cases }
    }

    /// The built-in case studies shipped with the platform.
    pub fn standard() -> Self {
        fn case(
            id: &str,
            title: &str,
            category: FraudCategory,
            region: &str,
            target: &str,
            amount: u64,
            description: &str,
            prevention: &[&str],
            date: (i32, u32, u32),
            platform: Option<&str>,
        ) -> FraudCase {
            FraudCase {
                id: id.to_string(),
                title: title.to_string(),
                category,
                region: region.to_string(),
                target: target.to_string(),
                amount,
                description: description.to_string(),
                prevention: prevention.iter().map(|step| step.to_string()).collect(),
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                    .unwrap_or(NaiveDate::MIN),
                platform: platform.map(str::to_string),
            }
        }

        Self::from_cases(vec![
            case(
                "case-refund-callback",
                "Fake customer service offers a refund over a private chat",
                FraudCategory::OnlineShopping,
                "Shanghai",
                "Frequent online shoppers",
                12800,
                "A caller posing as e-commerce customer service claimed a purchased item failed quality checks and walked the victim through a 'refund' that required sharing card details and verification codes in a private messaging app.",
                &[
                    "Handle refunds only inside the official platform",
                    "Never share verification codes with a caller",
                    "Verify claims through the platform's published support line",
                ],
                (2024, 3, 18),
                Some("Phone call"),
            ),
            case(
                "case-safe-account",
                "Caller impersonating police demands a transfer to a safe account",
                FraudCategory::Impersonation,
                "Beijing",
                "Retirees",
                260000,
                "The victim was told they were implicated in a money-laundering case and had to move their savings to a supervised 'safe account' while the investigation ran. The caller faxed forged arrest documents to add pressure.",
                &[
                    "Police never handle cases or collect money by phone",
                    "There is no such thing as a safe account",
                    "Hang up and dial the official police number yourself",
                ],
                (2024, 1, 9),
                None,
            ),
            case(
                "case-rebate-ladder",
                "Order-rebate side job escalates into large advance payments",
                FraudCategory::OrderBrushing,
                "Zhejiang",
                "Students and job seekers",
                45000,
                "A work-from-home ad promised commissions for completing shopping tasks. Small tasks paid out quickly, then batched tasks required advance payments that were never returned.",
                &[
                    "Paid fake-order tasks are illegal to begin with",
                    "Legitimate jobs never require up-front payments",
                    "Treat small early payouts as bait, not proof",
                ],
                (2024, 5, 2),
                Some("Short-video ads"),
            ),
            case(
                "case-mentor-platform",
                "Group-chat mentor steers savers into a fake investment platform",
                FraudCategory::Investment,
                "Guangdong",
                "New investors",
                380000,
                "A 'wealth management mentor' shared daily profit screenshots in a group chat and guided members onto an unlicensed platform. Withdrawals were frozen once deposits grew large enough.",
                &[
                    "Check the platform's financial license before depositing",
                    "Profit screenshots from strangers prove nothing",
                    "High returns at low risk do not exist",
                ],
                (2023, 11, 21),
                Some("Group chat"),
            ),
            case(
                "case-skin-trade",
                "Cheap game-skin trade conducted outside the official market",
                FraudCategory::Gaming,
                "Jiangsu",
                "Teenage players",
                3200,
                "A buyer offered above-market prices for in-game skins but insisted on an off-platform escrow site, which swallowed the items and demanded an 'unfreezing fee' to release payment.",
                &[
                    "Trade in-game items only through official markets",
                    "Unfreezing fees are always part of the scam",
                    "Be wary of buyers who rush you off-platform",
                ],
                (2024, 6, 14),
                Some("In-game chat"),
            ),
            case(
                "case-delivery-compensation",
                "Courier-compensation phishing page harvests card credentials",
                FraudCategory::OnlineShopping,
                "Zhejiang",
                "Frequent online shoppers",
                8600,
                "A text message claimed a parcel was lost and linked to a compensation page that mimicked a well-known courier. The page collected card numbers and codes, then drained the account.",
                &[
                    "Claim compensation inside the courier's official app",
                    "Never enter card credentials from a text-message link",
                    "Check the parcel status with the merchant first",
                ],
                (2024, 2, 27),
                Some("SMS link"),
            ),
        ])
    }

    pub fn cases(&self) -> &[FraudCase] {
        &self.cases
    }

    pub fn search(&self, filter: &CaseFilter) -> Vec<&FraudCase> {
        self.cases
            .iter()
            .filter(|case| filter.matches(case))
            .collect()
    }

    pub fn statistics(&self) -> CaseStatistics {
        let by_category = FraudCategory::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                label: category.label(),
                count: self
                    .cases
                    .iter()
                    .filter(|case| case.category == category)
                    .count(),
            })
            .collect();

        let mut regions: BTreeMap<&str, usize> = BTreeMap::new();
        for case in &self.cases {
            *regions.entry(case.region.as_str()).or_default() += 1;
        }
        let mut by_region: Vec<RegionCount> = regions
            .into_iter()
            .map(|(region, count)| RegionCount {
                region: region.to_string(),
                count,
            })
            .collect();
        by_region.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));

        CaseStatistics {
            total: self.cases.len(),
            by_category,
            by_region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_returns_every_case() {
        let catalog = CaseCatalog::standard();
        assert_eq!(
            catalog.search(&CaseFilter::default()).len(),
            catalog.cases().len()
        );
    }

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        let catalog = CaseCatalog::standard();
        let filter = CaseFilter {
            search: Some("SAFE ACCOUNT".to_string()),
            ..Default::default()
        };
        let hits = catalog.search(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "case-safe-account");
    }

    #[test]
    fn filters_combine_conjunctively() {
        let catalog = CaseCatalog::standard();
        let filter = CaseFilter {
            search: None,
            category: Some(FraudCategory::OnlineShopping),
            region: Some("Zhejiang".to_string()),
        };
        let hits = catalog.search(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "case-delivery-compensation");
    }

    #[test]
    fn category_filter_excludes_other_families() {
        let catalog = CaseCatalog::standard();
        let filter = CaseFilter {
            category: Some(FraudCategory::Gaming),
            ..Default::default()
        };
        let hits = catalog.search(&filter);
        assert!(hits.iter().all(|case| case.category == FraudCategory::Gaming));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn statistics_cover_every_category_and_sort_regions_by_count() {
        let catalog = CaseCatalog::standard();
        let stats = catalog.statistics();

        assert_eq!(stats.total, catalog.cases().len());
        assert_eq!(stats.by_category.len(), FraudCategory::ALL.len());
        let shopping = stats
            .by_category
            .iter()
            .find(|entry| entry.category == FraudCategory::OnlineShopping)
            .expect("shopping bucket present");
        assert_eq!(shopping.count, 2);

        assert_eq!(stats.by_region.first().map(|r| r.region.as_str()), Some("Zhejiang"));
        for pair in stats.by_region.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn category_parse_round_trips_known_labels() {
        for category in FraudCategory::ALL {
            let raw = serde_json::to_string(&category).expect("serializes");
            let raw = raw.trim_matches('"');
            assert_eq!(FraudCategory::parse(raw), Some(category));
        }
        assert_eq!(FraudCategory::parse("romance"), None);
    }
}
