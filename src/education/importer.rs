use super::catalog::{CaseCatalog, FraudCase, FraudCategory};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CaseImportError {
    #[error("failed to read case export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid case CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("case '{id}': {problem}")]
    Row { id: String, problem: String },
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    id: String,
    title: String,
    category: String,
    region: String,
    target: String,
    amount: u64,
    description: String,
    /// Semicolon-separated prevention steps.
    prevention: String,
    date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    platform: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

impl CaseRow {
    fn into_case(self) -> Result<FraudCase, CaseImportError> {
        let category =
            FraudCategory::parse(&self.category).ok_or_else(|| CaseImportError::Row {
                id: self.id.clone(),
                problem: format!("unknown category '{}'", self.category),
            })?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|err| {
            CaseImportError::Row {
                id: self.id.clone(),
                problem: format!("invalid date '{}' ({err})", self.date),
            }
        })?;

        let prevention = self
            .prevention
            .split(';')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();

        Ok(FraudCase {
            id: self.id,
            title: self.title,
            category,
            region: self.region,
            target: self.target,
            amount: self.amount,
            description: self.description,
            prevention,
            date,
            platform: self.platform,
        })
    }
}

/// Builds a case catalog from a curated CSV export.
pub struct CaseCatalogImporter;

impl CaseCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CaseCatalog, CaseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CaseCatalog, CaseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut cases = Vec::new();
        for record in csv_reader.deserialize::<CaseRow>() {
            cases.push(record?.into_case()?);
        }

        Ok(CaseCatalog::from_cases(cases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,title,category,region,target,amount,description,prevention,date,platform\n";

    #[test]
    fn imports_a_well_formed_export() {
        let csv = format!(
            "{HEADER}case-1,Fake refund call,online-shopping,Shanghai,Shoppers,9000,A caller posed as support staff.,Use official channels;Never share codes,2024-04-01,Phone call\n"
        );
        let catalog = CaseCatalogImporter::from_reader(Cursor::new(csv)).expect("imports");

        assert_eq!(catalog.cases().len(), 1);
        let case = &catalog.cases()[0];
        assert_eq!(case.category, FraudCategory::OnlineShopping);
        assert_eq!(case.prevention.len(), 2);
        assert_eq!(case.platform.as_deref(), Some("Phone call"));
    }

    #[test]
    fn empty_platform_column_becomes_none() {
        let csv = format!(
            "{HEADER}case-2,Safe account call,impersonation,Beijing,Retirees,50000,Caller claimed to be police.,Hang up and verify,2024-01-15,\n"
        );
        let catalog = CaseCatalogImporter::from_reader(Cursor::new(csv)).expect("imports");
        assert!(catalog.cases()[0].platform.is_none());
    }

    #[test]
    fn unknown_category_is_reported_with_the_case_id() {
        let csv = format!(
            "{HEADER}case-3,Mystery,romance,Beijing,Anyone,100,Text.,Step,2024-01-15,\n"
        );
        let err = CaseCatalogImporter::from_reader(Cursor::new(csv)).expect_err("must fail");
        match err {
            CaseImportError::Row { id, problem } => {
                assert_eq!(id, "case-3");
                assert!(problem.contains("romance"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_date_is_rejected() {
        let csv = format!(
            "{HEADER}case-4,Bad date,gaming,Jiangsu,Players,100,Text.,Step,15-01-2024,\n"
        );
        let err = CaseCatalogImporter::from_reader(Cursor::new(csv)).expect_err("must fail");
        assert!(matches!(err, CaseImportError::Row { .. }));
    }
}
