// 💼 Executive importers - Summary Compensation Table + plan-based awards

use super::{FileCategory, ImportContext, ImportStats, RecordImporter};
use crate::coercion::{year_end, FieldReader};
use crate::columns::{equity_grants as grant, executive_compensation as exec, person};
use crate::entities::{
    CompanyAttributes, ExecutiveCompensation, ExecutiveEquityGrant, PersonAttributes,
};
use crate::rows::Row;
use chrono::Datelike;

// ============================================================================
// EXECUTIVE COMPENSATION
// ============================================================================

/// Upserts one pay record per (company, person, fiscal-year-end).
///
/// Rows that repeat company columns (company_name, ticker, source_url,
/// fiscal_year_end) refine the company as a side effect.
pub struct ExecutiveCompensationImporter;

impl RecordImporter for ExecutiveCompensationImporter {
    fn category(&self) -> FileCategory {
        FileCategory::ExecutiveCompensation
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };
        let default_source = format!("{} Proxy Statement", ctx.year);

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(full_name) = fields.text(exec::FULL_NAME) else {
                stats.rows_skipped += 1;
                continue;
            };

            let attrs = PersonAttributes {
                current_title: fields.text(exec::TITLE),
                is_executive: true,
                is_director: false,
                bio_short: fields.text(person::BIO_SHORT),
                linkedin_url: fields.text(person::LINKEDIN_URL),
                photo_url: fields.text(person::PHOTO_URL),
                years_experience: fields.int_opt(person::YEARS_EXPERIENCE),
                education: fields.text(person::EDUCATION),
                status: fields.text(person::STATUS),
            };
            let explicit_id = fields.text(person::PERSON_ID);
            let person_id = ctx
                .resolver
                .resolve_person(ctx.repo, explicit_id.as_deref(), &full_name, &attrs, ctx.source)
                .person_id
                .clone();

            let row_fiscal_year_end = fields.date_opt(exec::FISCAL_YEAR_END);
            let company_attrs = CompanyAttributes {
                company_name: fields.text(exec::COMPANY_NAME),
                ticker: fields.text(exec::TICKER),
                source_url: fields.text(exec::SOURCE_URL),
                fiscal_year_end: row_fiscal_year_end,
                ..Default::default()
            };
            if !company_attrs.is_empty() {
                ctx.resolver
                    .resolve_company(ctx.repo, ctx.company_id, &company_attrs, ctx.year);
            }

            let mut record = ExecutiveCompensation {
                company_id: ctx.company_id.to_string(),
                person_id,
                fiscal_year_end: row_fiscal_year_end.unwrap_or_else(|| year_end(ctx.year)),
                salary_usd: fields.float(exec::SALARY),
                bonus_usd: fields.float(exec::BONUS),
                stock_awards_usd: fields.float(exec::STOCK_AWARDS),
                option_awards_usd: fields.float(exec::OPTION_AWARDS),
                non_equity_incentive_usd: fields.float(exec::NON_EQUITY_INCENTIVE),
                pension_change_usd: fields.float(exec::PENSION_CHANGE),
                all_other_comp_usd: fields.float(exec::ALL_OTHER),
                total_comp_usd: fields.float(exec::TOTAL),
                source: fields.text_or(exec::SOURCE, &default_source),
            };
            if record.total_comp_usd == 0.0 {
                record.total_comp_usd = record.components_sum();
            }

            ctx.repo.add_executive_comp(record);
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

// ============================================================================
// EQUITY GRANTS
// ============================================================================

/// Appends every grant row (no natural key: re-imports duplicate)
pub struct EquityGrantsImporter;

impl RecordImporter for EquityGrantsImporter {
    fn category(&self) -> FileCategory {
        FileCategory::EquityGrants
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(full_name) = fields.text(grant::FULL_NAME) else {
                stats.rows_skipped += 1;
                continue;
            };

            let mut attrs = PersonAttributes::executive();
            attrs.current_title = fields.text(grant::TITLE);
            let explicit_id = fields.text(person::PERSON_ID);
            let person_id = ctx
                .resolver
                .resolve_person(ctx.repo, explicit_id.as_deref(), &full_name, &attrs, ctx.source)
                .person_id
                .clone();

            let fiscal_year_end = ctx.company_fiscal_year_end();
            let award_type = fields.text_or(grant::AWARD_TYPE, "");
            let mut target_units = fields.int(grant::TARGET_UNITS);
            if target_units == 0 && award_type.eq_ignore_ascii_case("rsu") {
                target_units = fields.int(grant::RSU_UNITS);
            }

            let record = ExecutiveEquityGrant {
                company_id: ctx.company_id.to_string(),
                person_id,
                grant_date: fields.date(grant::GRANT_DATE, fiscal_year_end),
                award_type,
                threshold_units: fields.int(grant::THRESHOLD_UNITS),
                target_units,
                max_units: fields.int(grant::MAX_UNITS),
                grant_date_fair_value_usd: fields.float(grant::FAIR_VALUE),
                vesting_schedule_short: fields.text(grant::VESTING),
                source: fields.text_or(
                    grant::SOURCE,
                    &format!("{} Plan-Based Awards", fiscal_year_end.year()),
                ),
            };

            ctx.repo.add_equity_grant(record);
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

// ============================================================================
// TESTS
// ============================================================================
