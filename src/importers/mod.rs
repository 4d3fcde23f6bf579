// 📥 Record Importers - one importer per file category
//
// Same shape as a parser registry: classify the file by name, get the
// importer for its category, feed it rows. Adding a category means adding
// a FileCategory variant and one RecordImporter impl.
//
// Shared contract for every importer:
// 1. Skip rows without their identifying field (counted in rows_skipped)
// 2. Resolve the person through the EntityResolver
// 3. Build the typed record through alias chains (crate::columns)
// 4. Hand it to the repository (upsert for pay, append for the rest)

mod director;
mod executive;
mod manifest;
mod ownership;

pub use director::{DirectorCompensationImporter, DirectorPolicyImporter, DirectorProfilesImporter};
pub use executive::{EquityGrantsImporter, ExecutiveCompensationImporter};
pub use manifest::{manifest_company_attributes, ManifestImporter};
pub use ownership::BeneficialOwnershipImporter;

use crate::coercion::year_end;
use crate::repository::LeagueRepository;
use crate::resolver::EntityResolver;
use crate::rows::Row;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

// ============================================================================
// CORE TYPES
// ============================================================================

/// FileCategory - which importer a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Manifest,
    ExecutiveCompensation,
    EquityGrants,
    BeneficialOwnership,
    DirectorCompensation,
    DirectorPolicy,
    DirectorProfiles,
}

impl FileCategory {
    /// Classify an object by its (case-insensitive) file name.
    ///
    /// Returns None for anything that is not a recognized `.csv`.
    /// The policy patterns are tested before `director_compensation`
    /// because "director_compensation_policy" contains it.
    pub fn classify(file_name: &str) -> Option<FileCategory> {
        let name = file_name.to_lowercase();
        if !name.ends_with(".csv") {
            return None;
        }

        if name.ends_with("_manifest.csv") {
            return Some(FileCategory::Manifest);
        }
        if name.contains("executive_compensation") {
            return Some(FileCategory::ExecutiveCompensation);
        }
        if name.contains("executive_equity_grants") {
            return Some(FileCategory::EquityGrants);
        }
        if name.contains("beneficial_ownership") {
            return Some(FileCategory::BeneficialOwnership);
        }
        if name.contains("director_comp_policy") || name.contains("director_compensation_policy") {
            return Some(FileCategory::DirectorPolicy);
        }
        if name.contains("director_compensation") {
            return Some(FileCategory::DirectorCompensation);
        }
        if name.contains("directors_profiles") || name.contains("director_profiles") {
            return Some(FileCategory::DirectorProfiles);
        }
        None
    }

    pub fn name(&self) -> &str {
        match self {
            FileCategory::Manifest => "manifest",
            FileCategory::ExecutiveCompensation => "executive compensation",
            FileCategory::EquityGrants => "equity grants",
            FileCategory::BeneficialOwnership => "beneficial ownership",
            FileCategory::DirectorCompensation => "director compensation",
            FileCategory::DirectorPolicy => "director compensation policy",
            FileCategory::DirectorProfiles => "director profiles",
        }
    }
}

/// Per-file import counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub rows_read: usize,
    /// Rows without an identifying field
    pub rows_skipped: usize,
    pub records_added: usize,
    /// Present cells that could not be parsed and fell back to a default
    pub fallback_fields: usize,
}

impl AddAssign for ImportStats {
    fn add_assign(&mut self, other: ImportStats) {
        self.rows_read += other.rows_read;
        self.rows_skipped += other.rows_skipped;
        self.records_added += other.records_added;
        self.fallback_fields += other.fallback_fields;
    }
}

/// Everything an importer may touch while importing one file
pub struct ImportContext<'a> {
    pub repo: &'a mut LeagueRepository,
    pub resolver: &'a mut EntityResolver,
    pub company_id: &'a str,
    /// Folder year ("2024" → 2024)
    pub year: i32,
    /// Object name of the file being imported
    pub source: &'a str,
}

impl<'a> ImportContext<'a> {
    /// Fiscal-year end of the current company (Dec 31 of the folder year
    /// if the company has not been resolved yet)
    pub fn company_fiscal_year_end(&self) -> NaiveDate {
        self.repo
            .get_company(self.company_id)
            .map(|c| c.fiscal_year_end)
            .unwrap_or_else(|| year_end(self.year))
    }
}

// ============================================================================
// CORE TRAIT
// ============================================================================

/// RecordImporter - turns parsed rows of one category into repository records
pub trait RecordImporter: Send + Sync {
    fn category(&self) -> FileCategory;

    /// Import every row; never fails, degraded rows show up in the stats
    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats;
}

/// Importer for a category
pub fn importer_for(category: FileCategory) -> Box<dyn RecordImporter> {
    match category {
        FileCategory::Manifest => Box::new(ManifestImporter),
        FileCategory::ExecutiveCompensation => Box::new(ExecutiveCompensationImporter),
        FileCategory::EquityGrants => Box::new(EquityGrantsImporter),
        FileCategory::BeneficialOwnership => Box::new(BeneficialOwnershipImporter),
        FileCategory::DirectorCompensation => Box::new(DirectorCompensationImporter),
        FileCategory::DirectorPolicy => Box::new(DirectorPolicyImporter),
        FileCategory::DirectorProfiles => Box::new(DirectorProfilesImporter),
    }
}

// ============================================================================
// TESTS
// ============================================================================
