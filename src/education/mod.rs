mod catalog;
mod importer;

pub use catalog::{
    CaseCatalog, CaseFilter, CaseStatistics, CategoryCount, FraudCase, FraudCategory, RegionCount,
};
pub use importer::{CaseCatalogImporter, CaseImportError};
