// 🔗 Entity Resolver - one identity per company/person across many files
//
// Every row that mentions a person goes through resolve_person; every
// company-bearing row through resolve_company. The first mention creates the
// entity, later mentions merge into it (see Company::merge / Person::merge).
//
// Slugs are lossy: "José Smith" and "Jos Smith" land on the same id. The
// resolver remembers the display name each id was first seen with and
// records a SlugCollision the first time each different name shows up.
// Company ids come from folder names, so only manifests claim a company
// name; pay rows renaming a company are plain enrichment.

use crate::entities::{
    Company, CompanyAttributes, EntityKind, Person, PersonAttributes, SlugCollision,
};
use crate::repository::LeagueRepository;
use std::collections::{HashMap, HashSet};

/// Identifier used when a name has no ASCII letters or digits at all
pub const UNKNOWN_SLUG: &str = "unknown";

/// "Jane Q. Doe" → "jane_q_doe"
///
/// Lower-case, every run of characters outside `[a-z0-9]` becomes a single
/// `_`, leading/trailing `_` removed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}

/// Case-folded, whitespace-collapsed name used for collision checks
fn fold_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// RESOLVER
// ============================================================================

/// First display name per identifier, plus the (id, folded name) pairs
/// already reported as collisions
#[derive(Debug, Default)]
struct NameRegistry {
    first: HashMap<String, (String, String)>,
    reported: HashSet<(String, String)>,
}

impl NameRegistry {
    /// Remember the first name per id; report each later, different one once
    fn check(
        &mut self,
        kind: EntityKind,
        identifier: &str,
        name: &str,
        source: &str,
    ) -> Option<SlugCollision> {
        let folded = fold_name(name);
        if folded.is_empty() {
            return None;
        }

        let Some((existing_folded, existing_name)) = self.first.get(identifier) else {
            self.first
                .insert(identifier.to_string(), (folded, name.trim().to_string()));
            return None;
        };
        if *existing_folded == folded
            || !self.reported.insert((identifier.to_string(), folded))
        {
            return None;
        }

        tracing::warn!(
            kind = ?kind,
            identifier,
            existing = %existing_name,
            incoming = name.trim(),
            "identifier collision"
        );
        Some(SlugCollision {
            kind,
            identifier: identifier.to_string(),
            existing_name: existing_name.clone(),
            incoming_name: name.trim().to_string(),
            source: source.to_string(),
        })
    }
}

/// Resolves rows to entities for one load pass.
#[derive(Debug, Default)]
pub struct EntityResolver {
    company_names: NameRegistry,
    person_names: NameRegistry,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or refine the company `company_id` from its manifest.
    ///
    /// A manifest naming the company differently from an earlier manifest
    /// for the same folder is recorded as a collision.
    pub fn resolve_manifest_company<'r>(
        &mut self,
        repo: &'r mut LeagueRepository,
        company_id: &str,
        attrs: &CompanyAttributes,
        year: i32,
        source: &str,
    ) -> &'r Company {
        if let Some(name) = attrs.company_name.as_deref() {
            if let Some(collision) =
                self.company_names.check(EntityKind::Company, company_id, name, source)
            {
                repo.record_collision(collision);
            }
        }
        self.resolve_company(repo, company_id, attrs, year)
    }

    /// Create or refine the company `company_id`.
    ///
    /// `year` seeds the default fiscal-year end (Dec 31) for new companies.
    pub fn resolve_company<'r>(
        &mut self,
        repo: &'r mut LeagueRepository,
        company_id: &str,
        attrs: &CompanyAttributes,
        year: i32,
    ) -> &'r Company {
        let company = repo.company_entry(company_id, || Company::new(company_id, year));
        company.merge(attrs);
        company
    }

    /// Create or refine a person.
    ///
    /// The id is `explicit_id` when the row carries one, else the slug of
    /// `full_name`.
    pub fn resolve_person<'r>(
        &mut self,
        repo: &'r mut LeagueRepository,
        explicit_id: Option<&str>,
        full_name: &str,
        attrs: &PersonAttributes,
        source: &str,
    ) -> &'r Person {
        let full_name = full_name.trim();
        let person_id = explicit_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slugify(full_name));

        if let Some(collision) =
            self.person_names.check(EntityKind::Person, &person_id, full_name, source)
        {
            repo.record_collision(collision);
        }

        let person = repo.person_entry(&person_id, || Person::new(person_id.as_str(), full_name));
        person.merge(attrs);
        person
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Jane Doe"), "jane_doe");
        assert_eq!(slugify("  Jane  Q. Doe, Jr. "), "jane_q_doe_jr");
        assert_eq!(slugify("O'Brien"), "o_brien");
        assert_eq!(slugify("A1--B2"), "a1_b2");
        assert_eq!(slugify("!!!"), "unknown");
        assert_eq!(slugify(""), "unknown");
    }

    #[test]
    fn test_resolve_person_creates_then_merges() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();

        let created = resolver.resolve_person(
            &mut repo,
            None,
            "Jane Doe",
            &PersonAttributes::executive().with_title("CFO"),
            "a.csv",
        );
        assert_eq!(created.person_id, "jane_doe");
        assert_eq!(created.full_name, "Jane Doe");

        let merged = resolver.resolve_person(
            &mut repo,
            None,
            "jane  doe",
            &PersonAttributes::director().with_title("CEO"),
            "b.csv",
        );
        assert!(merged.is_executive && merged.is_director);
        assert_eq!(merged.current_title, "CEO");
        assert_eq!(repo.person_count(), 1);
        assert!(repo.collisions().is_empty());
    }

    #[test]
    fn test_explicit_person_id_wins() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();

        let person = resolver.resolve_person(
            &mut repo,
            Some(" p-001 "),
            "Jane Doe",
            &PersonAttributes::default(),
            "a.csv",
        );
        assert_eq!(person.person_id, "p-001");

        let blank = resolver.resolve_person(&mut repo, Some(""), "Jane Doe", &PersonAttributes::default(), "a.csv");
        assert_eq!(blank.person_id, "jane_doe");
    }

    #[test]
    fn test_person_collision_is_recorded() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();

        resolver.resolve_person(&mut repo, None, "José Smith", &PersonAttributes::executive(), "a.csv");
        resolver.resolve_person(&mut repo, None, "Jos Smith", &PersonAttributes::director(), "b.csv");

        assert_eq!(repo.person_count(), 1);
        let collisions = repo.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].kind, EntityKind::Person);
        assert_eq!(collisions[0].identifier, "jos_smith");
        assert_eq!(collisions[0].existing_name, "José Smith");
        assert_eq!(collisions[0].incoming_name, "Jos Smith");
        assert_eq!(collisions[0].source, "b.csv");

        // Still merged
        let person = repo.get_person("jos_smith").unwrap();
        assert!(person.is_executive && person.is_director);
    }

    #[test]
    fn test_resolve_company_defaults_and_merge() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();

        let company = resolver.resolve_company(&mut repo, "acme", &CompanyAttributes::default(), 2024);
        assert_eq!(company.company_name, "Acme");
        assert_eq!(company.ticker, "UNK");
        assert_eq!(company.fiscal_year_end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let attrs = CompanyAttributes {
            company_name: Some("Acme Corp".into()),
            market_cap_usd: Some(5.0e9),
            ..Default::default()
        };
        let company = resolver.resolve_company(&mut repo, "acme", &attrs, 2023);
        assert_eq!(company.company_name, "Acme Corp");
        assert_eq!(company.market_cap_usd, Some(5.0e9));
        // Year only seeds new companies
        assert_eq!(company.fiscal_year_end.to_string(), "2024-12-31");
    }

    #[test]
    fn test_repeated_person_collision_recorded_once() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();

        for name in ["José Smith", "Jos Smith", "Jos Smith", "JOS  smith"] {
            resolver.resolve_person(&mut repo, None, name, &PersonAttributes::default(), "a.csv");
        }
        assert_eq!(repo.collisions().len(), 1);

        // A third distinct spelling is a new collision
        resolver.resolve_person(&mut repo, None, "Jos-Smith", &PersonAttributes::default(), "b.csv");
        assert_eq!(repo.collisions().len(), 2);
    }

    #[test]
    fn test_manifest_company_name_collision() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();
        let named = |n: &str| CompanyAttributes {
            company_name: Some(n.into()),
            ..Default::default()
        };

        resolver.resolve_manifest_company(&mut repo, "acme", &named("Acme Corp"), 2023, "a.csv");
        resolver.resolve_manifest_company(&mut repo, "acme", &named("ACME  corp"), 2024, "b.csv");
        assert!(repo.collisions().is_empty());

        resolver.resolve_manifest_company(&mut repo, "acme", &named("Acme Holdings"), 2024, "c.csv");
        resolver.resolve_manifest_company(&mut repo, "acme", &named("Acme Holdings"), 2024, "c.csv");
        assert_eq!(repo.collisions().len(), 1);
        assert_eq!(repo.collisions()[0].kind, EntityKind::Company);
    }

    #[test]
    fn test_company_enrichment_is_not_a_collision() {
        let mut repo = LeagueRepository::new();
        let mut resolver = EntityResolver::new();
        let named = |n: &str| CompanyAttributes {
            company_name: Some(n.into()),
            ..Default::default()
        };

        resolver.resolve_manifest_company(&mut repo, "acme", &named("Acme Corp"), 2024, "m.csv");
        let company = resolver.resolve_company(&mut repo, "acme", &named("Acme Corporation"), 2024);
        assert_eq!(company.company_name, "Acme Corporation");
        assert!(repo.collisions().is_empty());
    }
}
