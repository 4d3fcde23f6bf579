// 📊 Beneficial ownership importer

use super::{FileCategory, ImportContext, ImportStats, RecordImporter};
use crate::coercion::FieldReader;
use crate::columns::{beneficial_ownership as own, person};
use crate::entities::{BeneficialOwnershipRecord, PersonAttributes};
use crate::rows::Row;

/// Appends one holding per row; the person's role flags come from the
/// row's is_executive / is_director columns
pub struct BeneficialOwnershipImporter;

impl RecordImporter for BeneficialOwnershipImporter {
    fn category(&self) -> FileCategory {
        FileCategory::BeneficialOwnership
    }

    fn import(&self, ctx: &mut ImportContext<'_>, rows: &[Row]) -> ImportStats {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let mut fields = FieldReader::new(row);
            let Some(full_name) = fields.text(own::FULL_NAME) else {
                stats.rows_skipped += 1;
                continue;
            };

            let attrs = PersonAttributes {
                current_title: fields.text(own::TITLE),
                is_executive: fields.flag(person::IS_EXECUTIVE),
                is_director: fields.flag(person::IS_DIRECTOR),
                ..Default::default()
            };
            let explicit_id = fields.text(person::PERSON_ID);
            let resolved = ctx.resolver.resolve_person(
                ctx.repo,
                explicit_id.as_deref(),
                &full_name,
                &attrs,
                ctx.source,
            );
            let person_id = resolved.person_id.clone();
            let current_title = resolved.current_title.clone();

            let record = BeneficialOwnershipRecord {
                company_id: ctx.company_id.to_string(),
                person_id,
                role: fields.text_or(own::ROLE, &current_title),
                total_shares: fields.int(own::TOTAL_SHARES),
                sole_voting_power: fields.int(own::SOLE_VOTING),
                shared_voting_power: fields.int(own::SHARED_VOTING),
                percent_of_class: fields.float(own::PERCENT_OF_CLASS),
                as_of_date: fields.date(own::AS_OF_DATE, ctx.company_fiscal_year_end()),
                notes: fields.text(own::NOTES),
            };

            ctx.repo.add_beneficial_ownership(record);
            stats.records_added += 1;
            stats.fallback_fields += fields.fallback_count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Company;
    use crate::repository::LeagueRepository;
    use crate::resolver::EntityResolver;
    use chrono::NaiveDate;

    fn import(repo: &mut LeagueRepository, rows: &[Row]) -> ImportStats {
        let mut resolver = EntityResolver::new();
        let mut ctx = ImportContext {
            repo,
            resolver: &mut resolver,
            company_id: "acme",
            year: 2024,
            source: "companies/acme/2024/acme_beneficial_ownership.csv",
        };
        BeneficialOwnershipImporter.import(&mut ctx, rows)
    }

    #[test]
    fn test_ownership_rows() {
        let mut repo = LeagueRepository::new();
        repo.add_company(Company::new("acme", 2024));
        let rows = vec![
            Row::new()
                .set("name", "Jane Doe")
                .set("current_title", "CEO")
                .set("is_executive", "Yes")
                .set("total_shares_owned", "1,200,000")
                .set("ownership_of_common_stock", "1,000,000")
                .set("percent_class", "1.5%")
                .set("as_of_date", "2024-02-01"),
            Row::new()
                .set("name", "Bob Board")
                .set("is_director", "true")
                .set("role", "Director")
                .set("total_shares", "500"),
            Row::new().set("total_shares", "9"),
        ];

        let stats = import(&mut repo, &rows);
        assert_eq!(stats.records_added, 2);
        assert_eq!(stats.rows_skipped, 1);

        let holdings = repo.get_beneficial_ownership("acme");
        assert_eq!(holdings[0].person_id, "jane_doe");
        assert_eq!(holdings[0].total_shares, 1_200_000);
        assert_eq!(holdings[0].sole_voting_power, 1_000_000);
        assert_eq!(holdings[0].percent_of_class, 1.5);
        // Role falls back to the person's title
        assert_eq!(holdings[0].role, "CEO");
        assert_eq!(holdings[1].as_of_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        assert!(repo.get_person("jane_doe").unwrap().is_executive);
        let bob = repo.get_person("bob_board").unwrap();
        assert!(bob.is_director && !bob.is_executive);
    }

    #[test]
    fn test_reimport_appends() {
        let mut repo = LeagueRepository::new();
        let rows = vec![Row::new().set("full_name", "Jane Doe").set("total_shares", "10")];

        import(&mut repo, &rows);
        import(&mut repo, &rows);
        assert_eq!(repo.beneficial_ownership().len(), 2);
        assert_eq!(repo.person_count(), 1);
    }
}
