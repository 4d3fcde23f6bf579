// 🪑 Board importers - director pay, governance profiles, pay policy

use super::{FileCategory, ImportContext, ImportStats, RecordImporter};
use crate::coercion::FieldReader;
use crate::columns::{
    director_compensation as dir_comp, director_policy as policy, director_profiles as profile,
    person,
};
use crate::entities::{DirectorCompPolicy, DirectorCompensation, DirectorProfile, PersonAttributes};
use crate::rows::Row;
use chrono::Datelike;

/// Title given to board members whose row names no role
pub const DEFAULT_DIRECTOR_TITLE: &str = "Director";

/// Resolve the director a row describes, returning (person_id, current_title)
fn resolve_director(
    ctx: &mut ImportContext<'_>,
    fields: &FieldReader<'_>,
    full_name: &str,
    title: String,
) -> (String, String) {
    let attrs = PersonAttributes::director().with_title(title);
    let explicit_id = fields.text(person::PERSON_ID);
    let person = ctx.resolver.resolve_person(
        ctx.repo,
        explicit_id.as_deref(),
        full_name,
        &attrs,
        ctx.source,
    );
    (person.person_id.clone(), person.current_title.clone())
}

// ============================================================================
// DIRECTOR COMPENSATION
// ============================================================================

/// Upserts one board pay record per (company, person, fiscal-year-end)
pub struct DirectorCompensationImporter;

impl RecordImporter for DirectorCompensationImporter {
    fn category(&self) -> FileCategory {
        FileCategory::DirectorCompensation
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(full_name) = fields.text(dir_comp::FULL_NAME) else {
                stats.rows_skipped += 1;
                continue;
            };

            let title = fields.text_or(dir_comp::TITLE, DEFAULT_DIRECTOR_TITLE);
            let (person_id, _) = resolve_director(ctx, &fields, &full_name, title);

            let company_fye = ctx.company_fiscal_year_end();
            let mut record = DirectorCompensation {
                company_id: ctx.company_id.to_string(),
                person_id,
                fiscal_year_end: fields.date(dir_comp::FISCAL_YEAR_END, company_fye),
                fees_cash_usd: fields.float(dir_comp::FEES_CASH),
                stock_awards_usd: fields.float(dir_comp::STOCK_AWARDS),
                all_other_comp_usd: fields.float(dir_comp::ALL_OTHER),
                total_usd: fields.float(dir_comp::TOTAL),
                source: fields.text_or(
                    dir_comp::SOURCE,
                    &format!("{} Director Compensation", company_fye.year()),
                ),
            };
            if record.total_usd == 0.0 {
                record.total_usd = record.components_sum();
            }

            ctx.repo.add_director_comp(record);
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

// ============================================================================
// DIRECTOR PROFILES
// ============================================================================

/// Appends governance profiles; duplicates are tolerated
pub struct DirectorProfilesImporter;

impl RecordImporter for DirectorProfilesImporter {
    fn category(&self) -> FileCategory {
        FileCategory::DirectorProfiles
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(full_name) = fields.text(profile::FULL_NAME) else {
                stats.rows_skipped += 1;
                continue;
            };

            let role = fields.text(profile::ROLE);
            let title = role.clone().unwrap_or_else(|| DEFAULT_DIRECTOR_TITLE.to_string());
            let (person_id, current_title) = resolve_director(ctx, &fields, &full_name, title);

            let record = DirectorProfile {
                company_id: ctx.company_id.to_string(),
                person_id,
                role: role.unwrap_or(current_title),
                // Absent means independent
                independent: fields.flag_or(profile::INDEPENDENT, true),
                director_since: fields.int_opt(profile::DIRECTOR_SINCE),
                lead_independent_director: fields.flag(profile::LEAD_INDEPENDENT),
                committees: fields.text(profile::COMMITTEES),
                primary_occupation: fields.text(profile::PRIMARY_OCCUPATION),
                other_public_boards: fields.text(profile::OTHER_PUBLIC_BOARDS),
            };

            ctx.repo.add_director_profile(record);
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

// ============================================================================
// DIRECTOR PAY POLICY
// ============================================================================

/// Appends policy lines; rows without a component are skipped
pub struct DirectorPolicyImporter;

impl RecordImporter for DirectorPolicyImporter {
    fn category(&self) -> FileCategory {
        FileCategory::DirectorPolicy
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(component) = fields.text(policy::COMPONENT) else {
                stats.rows_skipped += 1;
                continue;
            };

            ctx.repo.add_director_policy(DirectorCompPolicy {
                company_id: ctx.company_id.to_string(),
                component,
                amount_usd: fields.float(policy::AMOUNT),
                unit: fields.text(policy::UNIT),
                notes: fields.text(policy::NOTES),
            });
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Company;
    use crate::repository::LeagueRepository;
    use crate::resolver::EntityResolver;
    use chrono::NaiveDate;

    fn run(importer: &dyn RecordImporter, repo: &mut LeagueRepository, rows: &[Row]) -> ImportStats {
        let mut resolver = EntityResolver::new();
        let mut ctx = ImportContext {
            repo,
            resolver: &mut resolver,
            company_id: "acme",
            year: 2024,
            source: "companies/acme/2024/board.csv",
        };
        importer.import(&mut ctx, rows)
    }

    fn repo() -> LeagueRepository {
        let mut repo = LeagueRepository::new();
        let mut company = Company::new("acme", 2024);
        company.fiscal_year_end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        repo.add_company(company);
        repo
    }

    #[test]
    fn test_director_comp_defaults() {
        let mut repo = repo();
        let rows = vec![Row::new()
            .set("director_name", "Bob Board")
            .set("cash_fees_usd", "100,000")
            .set("stock_grant_usd", "150,000")];

        run(&DirectorCompensationImporter, &mut repo, &rows);

        let record = &repo.director_comp()[0];
        assert_eq!(record.fiscal_year_end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(record.total_usd, 250_000.0);
        assert_eq!(record.source, "2024 Director Compensation");

        let bob = repo.get_person("bob_board").unwrap();
        assert!(bob.is_director);
        assert!(!bob.is_executive);
        assert_eq!(bob.current_title, "Director");
    }

    #[test]
    fn test_director_comp_upserts() {
        let mut repo = repo();
        let first = vec![Row::new().set("name", "Bob Board").set("total_usd", "10")];
        let second = vec![Row::new().set("name", "Bob Board").set("total_usd", "20")];

        run(&DirectorCompensationImporter, &mut repo, &first);
        run(&DirectorCompensationImporter, &mut repo, &second);

        assert_eq!(repo.director_comp().len(), 1);
        assert_eq!(repo.director_comp()[0].total_usd, 20.0);
    }

    #[test]
    fn test_profiles_independent_defaults_true() {
        let mut repo = repo();
        let rows = vec![
            Row::new()
                .set("full_name", "Bob Board")
                .set("director_since", "2015")
                .set("committees", "Audit; Compensation"),
            Row::new()
                .set("full_name", "Carol Chair")
                .set("role", "Chair")
                .set("independent", "No")
                .set("lead_independent", "y")
                .set("occupation", "Retired CEO"),
        ];

        let stats = run(&DirectorProfilesImporter, &mut repo, &rows);
        assert_eq!(stats.records_added, 2);

        let bob = repo.latest_director_profile("acme", "bob_board").unwrap();
        assert!(bob.independent);
        assert_eq!(bob.role, "Director");
        assert_eq!(bob.director_since, Some(2015));

        let carol = repo.latest_director_profile("acme", "carol_chair").unwrap();
        assert!(!carol.independent);
        assert!(carol.lead_independent_director);
        assert_eq!(carol.primary_occupation.as_deref(), Some("Retired CEO"));
        assert_eq!(repo.get_person("carol_chair").unwrap().current_title, "Chair");

        run(&DirectorProfilesImporter, &mut repo, &rows);
        assert_eq!(repo.get_director_profiles("acme").len(), 4);
    }

    #[test]
    fn test_policy_rows() {
        let mut repo = repo();
        let rows = vec![
            Row::new()
                .set("component", "Annual Cash Retainer")
                .set("amount_usd", "$100,000")
                .set("unit", "USD/yr"),
            Row::new().set("policy_item", "Chair Premium").set("value_usd", "25000"),
            Row::new().set("amount_usd", "1"),
        ];

        let stats = run(&DirectorPolicyImporter, &mut repo, &rows);
        assert_eq!(stats.records_added, 2);
        assert_eq!(stats.rows_skipped, 1);

        let lines = repo.get_director_policy("acme");
        assert_eq!(lines[0].amount_usd, 100_000.0);
        assert_eq!(lines[1].component, "Chair Premium");
        assert_eq!(lines[1].unit, None);
    }
}
