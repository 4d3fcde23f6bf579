// 🏆 League Repository - the in-memory entity graph and its queries
//
// Owns every company, person and record produced by one load pass.
// Built mutably by the loader, then published behind an Arc and only read.
//
// Fiscal-year filters take a date and match on its calendar year, so
// 2024-12-31 and 2024-06-30 both select fiscal year 2024.

use crate::entities::{
    BeneficialOwnershipRecord, Company, CompensationKey, DirectorCompPolicy, DirectorCompensation,
    DirectorProfile, ExecutiveCompensation, ExecutiveEquityGrant, Person, SlugCollision,
    SourceManifestEntry,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ============================================================================
// QUERY RESULTS
// ============================================================================

/// Outcome of a keyed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Budget position of one company for one fiscal year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapSnapshot {
    pub company_id: String,
    /// Fiscal year the snapshot covers (None: company has no pay records)
    pub fiscal_year: Option<i32>,
    pub total_spent: f64,
    /// Declared budget, or total_spent when none was declared
    pub budget: f64,
    pub remaining: f64,
    pub utilization_pct: f64,
    pub budget_declared: bool,
    pub executive_count: usize,
}

impl CapSnapshot {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStatistics {
    pub total_companies: usize,
    pub total_people: usize,
    pub executive_comp_records: usize,
    pub director_comp_records: usize,
    pub free_agents_count: usize,
    pub companies_over_budget: usize,
    pub total_league_spending: f64,
    pub total_league_budget: f64,
    pub avg_cap_utilization: f64,
}

/// One league-wide top-earner line
#[derive(Debug, Clone, Serialize)]
pub struct TopEarner<'a> {
    pub person: &'a Person,
    pub company: &'a Company,
    pub compensation: &'a ExecutiveCompensation,
}

// ============================================================================
// REPOSITORY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct LeagueRepository {
    companies: BTreeMap<String, Company>,
    people: BTreeMap<String, Person>,

    executive_comp: Vec<ExecutiveCompensation>,
    executive_comp_index: HashMap<CompensationKey, usize>,
    director_comp: Vec<DirectorCompensation>,
    director_comp_index: HashMap<CompensationKey, usize>,

    equity_grants: Vec<ExecutiveEquityGrant>,
    beneficial_ownership: Vec<BeneficialOwnershipRecord>,
    director_profiles: Vec<DirectorProfile>,
    director_policy: Vec<DirectorCompPolicy>,
    source_manifest: Vec<SourceManifestEntry>,

    collisions: Vec<SlugCollision>,
}

impl LeagueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // WRITES (load pass only)
    // ========================================================================

    /// Insert or replace a company by id
    pub fn add_company(&mut self, company: Company) {
        self.companies.insert(company.company_id.clone(), company);
    }

    pub fn add_person(&mut self, person: Person) {
        self.people.insert(person.person_id.clone(), person);
    }

    /// Existing company, or a new one from `create`
    pub fn company_entry(&mut self, company_id: &str, create: impl FnOnce() -> Company) -> &mut Company {
        self.companies
            .entry(company_id.to_string())
            .or_insert_with(create)
    }

    /// Existing person, or a new one from `create`
    pub fn person_entry(&mut self, person_id: &str, create: impl FnOnce() -> Person) -> &mut Person {
        self.people
            .entry(person_id.to_string())
            .or_insert_with(create)
    }

    /// Last-write-wins on (company, person, fiscal-year-end)
    pub fn add_executive_comp(&mut self, record: ExecutiveCompensation) -> Upsert {
        upsert(
            &mut self.executive_comp,
            &mut self.executive_comp_index,
            record.key(),
            record,
        )
    }

    /// Last-write-wins on (company, person, fiscal-year-end)
    pub fn add_director_comp(&mut self, record: DirectorCompensation) -> Upsert {
        upsert(
            &mut self.director_comp,
            &mut self.director_comp_index,
            record.key(),
            record,
        )
    }

    pub fn add_equity_grant(&mut self, grant: ExecutiveEquityGrant) {
        self.equity_grants.push(grant);
    }

    pub fn add_beneficial_ownership(&mut self, record: BeneficialOwnershipRecord) {
        self.beneficial_ownership.push(record);
    }

    pub fn add_director_profile(&mut self, profile: DirectorProfile) {
        self.director_profiles.push(profile);
    }

    pub fn add_director_policy(&mut self, policy: DirectorCompPolicy) {
        self.director_policy.push(policy);
    }

    pub fn add_source_manifest_entry(&mut self, entry: SourceManifestEntry) {
        self.source_manifest.push(entry);
    }

    pub fn record_collision(&mut self, collision: SlugCollision) {
        self.collisions.push(collision);
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn get_company(&self, company_id: &str) -> Option<&Company> {
        self.companies.get(company_id)
    }

    pub fn get_person(&self, person_id: &str) -> Option<&Person> {
        self.people.get(person_id)
    }

    /// Companies in id order
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    /// People in id order
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn executive_comp(&self) -> &[ExecutiveCompensation] {
        &self.executive_comp
    }

    pub fn director_comp(&self) -> &[DirectorCompensation] {
        &self.director_comp
    }

    pub fn equity_grants(&self) -> &[ExecutiveEquityGrant] {
        &self.equity_grants
    }

    pub fn beneficial_ownership(&self) -> &[BeneficialOwnershipRecord] {
        &self.beneficial_ownership
    }

    pub fn director_profiles(&self) -> &[DirectorProfile] {
        &self.director_profiles
    }

    pub fn director_policy(&self) -> &[DirectorCompPolicy] {
        &self.director_policy
    }

    pub fn source_manifest(&self) -> &[SourceManifestEntry] {
        &self.source_manifest
    }

    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    // ========================================================================
    // COMPENSATION QUERIES
    // ========================================================================

    /// Executive pay at one company, highest total first
    pub fn get_company_compensation(
        &self,
        company_id: &str,
        fiscal_year: Option<NaiveDate>,
    ) -> Vec<&ExecutiveCompensation> {
        let mut records: Vec<&ExecutiveCompensation> = self
            .executive_comp
            .iter()
            .filter(|r| r.company_id == company_id && in_fiscal_year(r.fiscal_year_end, fiscal_year))
            .collect();
        records.sort_by(|a, b| {
            b.total_comp_usd
                .total_cmp(&a.total_comp_usd)
                .then_with(|| a.person_id.cmp(&b.person_id))
        });
        records
    }

    /// Executive pay for one person across companies, most recent year first
    pub fn get_compensation_for_person(
        &self,
        person_id: &str,
        fiscal_year: Option<NaiveDate>,
    ) -> Vec<&ExecutiveCompensation> {
        let mut records: Vec<&ExecutiveCompensation> = self
            .executive_comp
            .iter()
            .filter(|r| r.person_id == person_id && in_fiscal_year(r.fiscal_year_end, fiscal_year))
            .collect();
        records.sort_by(|a, b| {
            b.fiscal_year_end
                .cmp(&a.fiscal_year_end)
                .then_with(|| a.company_id.cmp(&b.company_id))
        });
        records
    }

    /// Board pay at one company, highest total first
    pub fn get_director_compensation(
        &self,
        company_id: &str,
        fiscal_year: Option<NaiveDate>,
    ) -> Vec<&DirectorCompensation> {
        let mut records: Vec<&DirectorCompensation> = self
            .director_comp
            .iter()
            .filter(|r| r.company_id == company_id && in_fiscal_year(r.fiscal_year_end, fiscal_year))
            .collect();
        records.sort_by(|a, b| {
            b.total_usd
                .total_cmp(&a.total_usd)
                .then_with(|| a.person_id.cmp(&b.person_id))
        });
        records
    }

    /// Highest-paid executives league-wide
    pub fn get_top_earners(&self, limit: usize, fiscal_year: Option<NaiveDate>) -> Vec<TopEarner<'_>> {
        let mut earners: Vec<TopEarner<'_>> = self
            .executive_comp
            .iter()
            .filter(|r| in_fiscal_year(r.fiscal_year_end, fiscal_year))
            .filter_map(|r| {
                Some(TopEarner {
                    person: self.people.get(&r.person_id)?,
                    company: self.companies.get(&r.company_id)?,
                    compensation: r,
                })
            })
            .collect();
        earners.sort_by(|a, b| {
            b.compensation
                .total_comp_usd
                .total_cmp(&a.compensation.total_comp_usd)
        });
        earners.truncate(limit);
        earners
    }

    /// Distinct fiscal years with executive pay on file, newest first
    pub fn get_available_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self
            .executive_comp
            .iter()
            .map(|r| r.fiscal_year_end.year())
            .collect();
        years.into_iter().rev().collect()
    }

    /// Newest fiscal-year-end with executive pay for a company
    pub fn latest_fiscal_year(&self, company_id: &str) -> Option<NaiveDate> {
        self.executive_comp
            .iter()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.fiscal_year_end)
            .max()
    }

    // ========================================================================
    // CAP / BUDGET QUERIES
    // ========================================================================

    /// Spend vs. budget for one company
    ///
    /// With no fiscal year, the company's latest year on file is used. With
    /// no declared budget the budget is the spend itself: utilization reads
    /// 100% and remaining 0, never a division by zero.
    pub fn get_company_cap_snapshot(
        &self,
        company_id: &str,
        fiscal_year: Option<NaiveDate>,
    ) -> Option<CapSnapshot> {
        let company = self.companies.get(company_id)?;
        let year = fiscal_year.or_else(|| self.latest_fiscal_year(company_id));

        let records = match year {
            Some(y) => self.get_company_compensation(company_id, Some(y)),
            None => Vec::new(),
        };
        let total_spent: f64 = records.iter().map(|r| r.total_comp_usd).sum();
        let executive_count = records
            .iter()
            .map(|r| r.person_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let declared = company.declared_budget();
        let budget = declared.unwrap_or(total_spent);
        let utilization_pct = if budget > 0.0 {
            total_spent / budget * 100.0
        } else {
            0.0
        };

        Some(CapSnapshot {
            company_id: company_id.to_string(),
            fiscal_year: year.map(|d| d.year()),
            total_spent,
            budget,
            remaining: budget - total_spent,
            utilization_pct,
            budget_declared: declared.is_some(),
            executive_count,
        })
    }

    pub fn get_companies_over_budget(&self, fiscal_year: Option<NaiveDate>) -> Vec<&Company> {
        self.companies
            .values()
            .filter(|c| {
                self.get_company_cap_snapshot(&c.company_id, fiscal_year)
                    .is_some_and(|s| s.is_over_budget())
            })
            .collect()
    }

    // ========================================================================
    // LEAGUE QUERIES
    // ========================================================================

    /// Companies by market cap, largest first (unset counts as zero)
    pub fn get_league_standings(&self) -> Vec<&Company> {
        let mut companies: Vec<&Company> = self.companies.values().collect();
        companies.sort_by(|a, b| {
            b.market_cap_or_zero()
                .total_cmp(&a.market_cap_or_zero())
                .then_with(|| a.company_id.cmp(&b.company_id))
        });
        companies
    }

    /// Executives/directors whose status is "retired"
    pub fn get_free_agents(&self) -> Vec<&Person> {
        self.people.values().filter(|p| p.is_free_agent()).collect()
    }

    pub fn get_league_statistics(&self, fiscal_year: Option<NaiveDate>) -> LeagueStatistics {
        let snapshots: Vec<CapSnapshot> = self
            .companies
            .keys()
            .filter_map(|id| self.get_company_cap_snapshot(id, fiscal_year))
            .collect();

        let total_league_spending: f64 = snapshots.iter().map(|s| s.total_spent).sum();
        let total_league_budget: f64 = snapshots.iter().map(|s| s.budget).sum();

        LeagueStatistics {
            total_companies: self.companies.len(),
            total_people: self.people.len(),
            executive_comp_records: self
                .executive_comp
                .iter()
                .filter(|r| in_fiscal_year(r.fiscal_year_end, fiscal_year))
                .count(),
            director_comp_records: self
                .director_comp
                .iter()
                .filter(|r| in_fiscal_year(r.fiscal_year_end, fiscal_year))
                .count(),
            free_agents_count: self.get_free_agents().len(),
            companies_over_budget: snapshots.iter().filter(|s| s.is_over_budget()).count(),
            total_league_spending,
            total_league_budget,
            avg_cap_utilization: if total_league_budget > 0.0 {
                total_league_spending / total_league_budget * 100.0
            } else {
                0.0
            },
        }
    }

    // ========================================================================
    // GOVERNANCE / OWNERSHIP / PROVENANCE QUERIES
    // ========================================================================

    pub fn get_director_profiles(&self, company_id: &str) -> Vec<&DirectorProfile> {
        self.director_profiles
            .iter()
            .filter(|p| p.company_id == company_id)
            .collect()
    }

    /// Most relevant profile when duplicates exist: latest `director_since`,
    /// then the one imported last
    pub fn latest_director_profile(&self, company_id: &str, person_id: &str) -> Option<&DirectorProfile> {
        self.director_profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.company_id == company_id && p.person_id == person_id)
            .max_by_key(|(idx, p)| (p.director_since.unwrap_or(i64::MIN), *idx))
            .map(|(_, p)| p)
    }

    pub fn get_director_policy(&self, company_id: &str) -> Vec<&DirectorCompPolicy> {
        self.director_policy
            .iter()
            .filter(|p| p.company_id == company_id)
            .collect()
    }

    /// Holders at one company, largest position first
    pub fn get_beneficial_ownership(&self, company_id: &str) -> Vec<&BeneficialOwnershipRecord> {
        let mut records: Vec<&BeneficialOwnershipRecord> = self
            .beneficial_ownership
            .iter()
            .filter(|r| r.company_id == company_id)
            .collect();
        records.sort_by(|a, b| b.total_shares.cmp(&a.total_shares));
        records
    }

    /// Grants at one company (optionally for one person), newest first
    pub fn get_equity_grants(&self, company_id: &str, person_id: Option<&str>) -> Vec<&ExecutiveEquityGrant> {
        let mut grants: Vec<&ExecutiveEquityGrant> = self
            .equity_grants
            .iter()
            .filter(|g| g.company_id == company_id)
            .filter(|g| person_id.map_or(true, |p| g.person_id == p))
            .collect();
        grants.sort_by(|a, b| b.grant_date.cmp(&a.grant_date));
        grants
    }

    pub fn get_source_manifest(&self, company_id: &str) -> Vec<&SourceManifestEntry> {
        self.source_manifest
            .iter()
            .filter(|e| e.company_id == company_id)
            .collect()
    }
}

fn upsert<T>(
    records: &mut Vec<T>,
    index: &mut HashMap<CompensationKey, usize>,
    key: CompensationKey,
    record: T,
) -> Upsert {
    match index.get(&key) {
        Some(&slot) => {
            records[slot] = record;
            Upsert::Replaced
        }
        None => {
            index.insert(key, records.len());
            records.push(record);
            Upsert::Inserted
        }
    }
}

fn in_fiscal_year(date: NaiveDate, filter: Option<NaiveDate>) -> bool {
    filter.map_or(true, |f| f.year() == date.year())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CompanyAttributes, PersonAttributes};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn exec(company: &str, person: &str, fye: NaiveDate, total: f64) -> ExecutiveCompensation {
        ExecutiveCompensation {
            company_id: company.into(),
            person_id: person.into(),
            fiscal_year_end: fye,
            salary_usd: total,
            bonus_usd: 0.0,
            stock_awards_usd: 0.0,
            option_awards_usd: 0.0,
            non_equity_incentive_usd: 0.0,
            pension_change_usd: 0.0,
            all_other_comp_usd: 0.0,
            total_comp_usd: total,
            source: "test".into(),
        }
    }

    fn repo_with_company(id: &str, budget: Option<f64>, market_cap: Option<f64>) -> LeagueRepository {
        let mut repo = LeagueRepository::new();
        let mut company = Company::new(id, 2024);
        company.merge(&CompanyAttributes {
            cap_budget_usd: budget,
            market_cap_usd: market_cap,
            ..Default::default()
        });
        repo.add_company(company);
        repo
    }

    #[test]
    fn test_executive_comp_upsert_replaces() {
        let mut repo = LeagueRepository::new();
        let fye = date(2024, 12, 31);

        assert_eq!(repo.add_executive_comp(exec("acme", "jane", fye, 100.0)), Upsert::Inserted);
        assert_eq!(repo.add_executive_comp(exec("acme", "jane", fye, 250.0)), Upsert::Replaced);
        assert_eq!(repo.add_executive_comp(exec("acme", "jane", date(2023, 12, 31), 1.0)), Upsert::Inserted);

        assert_eq!(repo.executive_comp().len(), 2);
        let current = repo.get_company_compensation("acme", Some(fye));
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].total_comp_usd, 250.0);
    }

    #[test]
    fn test_company_compensation_sorted_by_total() {
        let mut repo = repo_with_company("acme", None, None);
        let fye = date(2024, 12, 31);
        repo.add_executive_comp(exec("acme", "a", fye, 10.0));
        repo.add_executive_comp(exec("acme", "b", fye, 30.0));
        repo.add_executive_comp(exec("acme", "c", fye, 20.0));
        repo.add_executive_comp(exec("other", "d", fye, 99.0));

        let totals: Vec<f64> = repo
            .get_company_compensation("acme", None)
            .iter()
            .map(|r| r.total_comp_usd)
            .collect();
        assert_eq!(totals, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_fiscal_year_filter_matches_calendar_year() {
        let mut repo = LeagueRepository::new();
        repo.add_executive_comp(exec("acme", "a", date(2024, 6, 30), 10.0));
        repo.add_executive_comp(exec("acme", "a", date(2023, 6, 30), 10.0));

        assert_eq!(repo.get_company_compensation("acme", Some(date(2024, 12, 31))).len(), 1);
        assert_eq!(repo.get_company_compensation("acme", None).len(), 2);
    }

    #[test]
    fn test_person_compensation_sorted_by_year_desc() {
        let mut repo = LeagueRepository::new();
        repo.add_executive_comp(exec("acme", "jane", date(2022, 12, 31), 1.0));
        repo.add_executive_comp(exec("beta", "jane", date(2024, 12, 31), 1.0));
        repo.add_executive_comp(exec("acme", "jane", date(2023, 12, 31), 1.0));

        let years: Vec<i32> = repo
            .get_compensation_for_person("jane", None)
            .iter()
            .map(|r| r.fiscal_year_end.year())
            .collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
    }

    #[test]
    fn test_cap_snapshot_without_budget_reads_full() {
        let mut repo = repo_with_company("acme", None, None);
        repo.add_executive_comp(exec("acme", "jane", date(2024, 12, 31), 600_000.0));

        let snap = repo.get_company_cap_snapshot("acme", Some(date(2024, 12, 31))).unwrap();
        assert_eq!(snap.total_spent, 600_000.0);
        assert_eq!(snap.budget, 600_000.0);
        assert_eq!(snap.remaining, 0.0);
        assert_eq!(snap.utilization_pct, 100.0);
        assert!(!snap.budget_declared);
        assert!(!snap.is_over_budget());
    }

    #[test]
    fn test_cap_snapshot_with_budget() {
        let mut repo = repo_with_company("acme", Some(1_000_000.0), None);
        repo.add_executive_comp(exec("acme", "a", date(2024, 12, 31), 900_000.0));
        repo.add_executive_comp(exec("acme", "b", date(2024, 12, 31), 300_000.0));
        repo.add_executive_comp(exec("acme", "a", date(2023, 12, 31), 100.0));

        let snap = repo.get_company_cap_snapshot("acme", None).unwrap();
        assert_eq!(snap.fiscal_year, Some(2024));
        assert_eq!(snap.executive_count, 2);
        assert_eq!(snap.remaining, -200_000.0);
        assert!((snap.utilization_pct - 120.0).abs() < 1e-9);
        assert!(snap.is_over_budget());
        assert_eq!(repo.get_companies_over_budget(None).len(), 1);
    }

    #[test]
    fn test_cap_snapshot_empty_company() {
        let repo = repo_with_company("acme", None, None);
        let snap = repo.get_company_cap_snapshot("acme", None).unwrap();

        assert_eq!(snap.fiscal_year, None);
        assert_eq!(snap.total_spent, 0.0);
        assert_eq!(snap.utilization_pct, 0.0);
        assert!(repo.get_company_cap_snapshot("nobody", None).is_none());
    }

    #[test]
    fn test_league_standings_unset_market_cap_sorts_as_zero() {
        let mut repo = repo_with_company("small", None, Some(10.0));
        repo.add_company(Company::new("unset", 2024));
        let mut big = Company::new("big", 2024);
        big.market_cap_usd = Some(1000.0);
        repo.add_company(big);

        let order: Vec<&str> = repo
            .get_league_standings()
            .iter()
            .map(|c| c.company_id.as_str())
            .collect();
        assert_eq!(order, vec!["big", "small", "unset"]);
    }

    #[test]
    fn test_free_agents() {
        let mut repo = LeagueRepository::new();
        repo.add_person(Person::from_attributes(
            "old",
            "Old Timer",
            &PersonAttributes::executive().with_status("Retired"),
        ));
        repo.add_person(Person::from_attributes(
            "new",
            "New Hire",
            &PersonAttributes::executive().with_status("Active"),
        ));

        let agents = repo.get_free_agents();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].person_id, "old");
    }

    #[test]
    fn test_league_statistics_over_budget_count() {
        let mut repo = repo_with_company("tight", Some(100.0), None);
        let mut loose = Company::new("loose", 2024);
        loose.cap_budget_usd = Some(1_000.0);
        repo.add_company(loose);
        repo.add_company(Company::new("nobudget", 2024));

        let fye = date(2024, 12, 31);
        repo.add_executive_comp(exec("tight", "a", fye, 150.0));
        repo.add_executive_comp(exec("loose", "b", fye, 500.0));
        repo.add_executive_comp(exec("nobudget", "c", fye, 50.0));

        let stats = repo.get_league_statistics(Some(fye));
        assert_eq!(stats.total_companies, 3);
        assert_eq!(stats.executive_comp_records, 3);
        assert_eq!(stats.companies_over_budget, 1);
        assert_eq!(stats.total_league_spending, 700.0);
        assert_eq!(stats.total_league_budget, 1_150.0);
    }

    #[test]
    fn test_top_earners_and_available_years() {
        let mut repo = repo_with_company("acme", None, None);
        repo.add_person(Person::new("a", "A"));
        repo.add_person(Person::new("b", "B"));
        repo.add_executive_comp(exec("acme", "a", date(2024, 12, 31), 5.0));
        repo.add_executive_comp(exec("acme", "b", date(2024, 12, 31), 9.0));
        repo.add_executive_comp(exec("acme", "a", date(2022, 12, 31), 50.0));

        let top = repo.get_top_earners(1, Some(date(2024, 1, 1)));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].person.person_id, "b");
        assert_eq!(repo.get_available_years(), vec![2024, 2022]);
    }

    #[test]
    fn test_latest_director_profile_prefers_recent() {
        let mut repo = LeagueRepository::new();
        let profile = |since: Option<i64>, role: &str| DirectorProfile {
            company_id: "acme".into(),
            person_id: "d".into(),
            role: role.into(),
            independent: true,
            director_since: since,
            lead_independent_director: false,
            committees: None,
            primary_occupation: None,
            other_public_boards: None,
        };
        repo.add_director_profile(profile(Some(2015), "Director"));
        repo.add_director_profile(profile(Some(2019), "Chair"));
        repo.add_director_profile(profile(None, "Unknown"));

        assert_eq!(repo.get_director_profiles("acme").len(), 3);
        assert_eq!(repo.latest_director_profile("acme", "d").unwrap().role, "Chair");
        assert!(repo.latest_director_profile("acme", "x").is_none());
    }
}
