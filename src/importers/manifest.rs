// 🧾 Manifest importer - provenance entries + company attributes
//
// The first manifest row doubles as the company description
// (name, ticker, fiscal-year end, market cap, budget, ...).

use super::{FileCategory, ImportContext, ImportStats, RecordImporter};
use crate::coercion::FieldReader;
use crate::columns::{company, manifest};
use crate::entities::{CompanyAttributes, SourceManifestEntry};
use crate::rows::Row;
use chrono::Utc;

pub struct ManifestImporter;

impl RecordImporter for ManifestImporter {
    fn category(&self) -> FileCategory {
        FileCategory::Manifest
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };
        let today = Utc::now().date_naive();

        for row in rows {
            let mut fields = FieldReader::new(row);
            let entry = SourceManifestEntry {
                company_id: ctx.company_id.to_string(),
                file_path: fields.text_or(manifest::FILE_PATH, ""),
                description: fields.text_or(manifest::DESCRIPTION, ""),
                last_updated: fields.date(manifest::LAST_UPDATED, today),
            };
            ctx.repo.add_source_manifest_entry(entry);

            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

/// Company attributes carried by a manifest row
///
/// Returns the attributes and the number of cells that failed to parse.
pub fn manifest_company_attributes(row: &Row) -> (CompanyAttributes, usize) {
    let mut fields = FieldReader::new(row);
    let attrs = CompanyAttributes {
        company_name: fields.text(company::NAME),
        ticker: fields.text(company::TICKER),
        fiscal_year_end: fields.date_opt(company::FISCAL_YEAR_END),
        sector: fields.text(company::SECTOR),
        market_cap_usd: fields.float_opt(company::MARKET_CAP),
        revenue_usd: fields.float_opt(company::REVENUE),
        cap_budget_usd: fields.float_opt(company::CAP_BUDGET),
        founded_year: fields.int_opt(company::FOUNDED_YEAR).and_then(|y| i32::try_from(y).ok()),
        notes: fields.text(company::NOTES),
        source_url: fields.text(company::SOURCE_URL),
    };
    (attrs, fields.fallback_count())
}
