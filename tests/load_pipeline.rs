// End-to-end load passes over an in-memory bucket

use chrono::NaiveDate;
use execap::{
    EntityKind, FileCategory, LoadOrchestrator, LoadOutcome, LoadRequest, LoadState, LoadStatus,
    MemoryBlobStore, RepositoryHandle,
};
use std::sync::Arc;

const ACME: &str = "companies/acme/2024/";

fn acme_store() -> MemoryBlobStore {
    MemoryBlobStore::new()
        .with(
            format!("{ACME}acme_manifest.csv"),
            "company_name,ticker,fiscal_year_end,market_cap_usd\nAcme Corp,ACM,2024-12-31,\"1,000,000,000\"\n",
        )
        .with(
            format!("{ACME}acme_executive_compensation.csv"),
            "full_name,title,salary_usd,bonus_usd\nJane Doe,CEO,500000,100000\n",
        )
}

fn load(store: MemoryBlobStore, request: &LoadRequest) -> LoadOutcome {
    LoadOrchestrator::new(store).load(request)
}

fn fy(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

#[test]
fn test_acme_end_to_end() {
    let outcome = load(acme_store(), &LoadRequest::latest());
    let report = &outcome.report;
    assert_eq!(report.status, LoadStatus::Success);
    assert_eq!(report.companies_loaded, vec!["acme"]);
    assert_eq!(report.executive_comp_count, 1);
    assert_eq!(report.years_loaded, vec!["2024"]);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let repo = outcome.repository.expect("repository");
    let company = repo.get_company("acme").unwrap();
    assert_eq!(company.company_name, "Acme Corp");
    assert_eq!(company.ticker, "ACM");
    assert_eq!(company.market_cap_usd, Some(1.0e9));

    let pay = repo.get_company_compensation("acme", fy(2024));
    assert_eq!(pay.len(), 1);
    assert_eq!(pay[0].person_id, "jane_doe");
    assert_eq!(pay[0].total_comp_usd, 600_000.0);

    let snapshot = repo.get_company_cap_snapshot("acme", fy(2024)).unwrap();
    assert_eq!(snapshot.total_spent, 600_000.0);
    assert_eq!(snapshot.utilization_pct, 100.0);
    assert_eq!(snapshot.remaining, 0.0);
}

#[test]
fn test_reimport_keeps_pay_stable_and_appends_the_rest() {
    let exec = "full_name,total_comp_usd\nJane Doe,100\nJohn Roe,200\n";
    let grants = "full_name,grant_date,award_type,target_units\nJane Doe,2024-02-01,PSU,100\n";
    let ownership = "full_name,total_shares\nJane Doe,1000\n";
    let profiles = "full_name,director_since\nBob Board,2015\n";
    let director_pay = "full_name,total_usd\nBob Board,250000\n";

    let store = MemoryBlobStore::new()
        .with(format!("{ACME}acme_manifest.csv"), "company_name\nAcme\n")
        .with(format!("{ACME}acme_executive_compensation.csv"), exec)
        .with(format!("{ACME}acme_executive_compensation_copy.csv"), exec)
        .with(format!("{ACME}acme_executive_equity_grants.csv"), grants)
        .with(format!("{ACME}acme_executive_equity_grants_copy.csv"), grants)
        .with(format!("{ACME}acme_beneficial_ownership.csv"), ownership)
        .with(format!("{ACME}acme_beneficial_ownership_copy.csv"), ownership)
        .with(format!("{ACME}acme_director_profiles.csv"), profiles)
        .with(format!("{ACME}acme_directors_profiles.csv"), profiles)
        .with(format!("{ACME}acme_director_compensation.csv"), director_pay)
        .with(format!("{ACME}acme_director_compensation_copy.csv"), director_pay);

    let outcome = load(store, &LoadRequest::latest());
    let repo = outcome.repository.unwrap();

    assert_eq!(repo.executive_comp().len(), 2);
    let total: f64 = repo.executive_comp().iter().map(|r| r.total_comp_usd).sum();
    assert_eq!(total, 300.0);
    assert_eq!(repo.director_comp().len(), 1);

    assert_eq!(repo.equity_grants().len(), 2);
    assert_eq!(repo.beneficial_ownership().len(), 2);
    assert_eq!(repo.director_profiles().len(), 2);
    assert_eq!(repo.person_count(), 3);
}

#[test]
fn test_free_agents() {
    let store = acme_store().with(
        format!("{ACME}acme_executive_compensation.csv"),
        "full_name,status,salary_usd\nOld Timer,Retired,1\nNew Hire,Active,1\n",
    );

    let repo = load(store, &LoadRequest::latest()).repository.unwrap();
    let agents: Vec<&str> = repo
        .get_free_agents()
        .iter()
        .map(|p| p.person_id.as_str())
        .collect();
    assert_eq!(agents, vec!["old_timer"]);
}

#[test]
fn test_year_folder_filter_and_selection() {
    let store = MemoryBlobStore::new()
        .with("companies/acme/2023/acme_executive_compensation.csv", "full_name,total_comp_usd\nA,1\n")
        .with("companies/acme/2024/acme_executive_compensation.csv", "full_name,total_comp_usd\nA,2\n")
        .with("companies/acme/notayear/acme_executive_compensation.csv", "full_name,total_comp_usd\nA,3\n");

    let latest = load(store.clone(), &LoadRequest::latest()).repository.unwrap();
    assert_eq!(latest.get_available_years(), vec![2024]);

    let all = load(store.clone(), &LoadRequest::all_years()).repository.unwrap();
    assert_eq!(all.get_available_years(), vec![2024, 2023]);
    assert_eq!(all.executive_comp().len(), 2);

    let specific = load(store, &LoadRequest::year("2023")).repository.unwrap();
    assert_eq!(specific.get_available_years(), vec![2023]);
}

#[test]
fn test_read_failure_becomes_warning() {
    let mut store = acme_store().with(
        format!("{ACME}acme_beneficial_ownership.csv"),
        "full_name,total_shares\nJane Doe,10\n",
    );
    store.fail_reads_of(format!("{ACME}acme_beneficial_ownership.csv"));

    let outcome = load(store, &LoadRequest::latest());
    assert!(outcome.report.is_success());
    assert!(outcome
        .report
        .warnings
        .iter()
        .any(|w| w.starts_with("Failed to download companies/acme/2024/acme_beneficial_ownership.csv")));

    let repo = outcome.repository.unwrap();
    assert!(repo.beneficial_ownership().is_empty());
    assert_eq!(repo.executive_comp().len(), 1);
}

#[test]
fn test_missing_manifest_and_unrecognized_files() {
    let store = MemoryBlobStore::new()
        .with(format!("{ACME}acme_executive_compensation.csv"), "full_name,total_comp_usd\nA,1\n")
        .with(format!("{ACME}acme_notes.csv"), "a\n1\n")
        .with(format!("{ACME}readme.txt"), "hello")
        .with(format!("{ACME}acme_director_profiles.csv"), "full_name\n");

    let outcome = load(store, &LoadRequest::latest());
    let warnings = &outcome.report.warnings;

    assert!(warnings.contains(&"Manifest not found for acme 2024; using defaults".to_string()));
    assert!(warnings.contains(&format!("Unrecognized file {ACME}acme_notes.csv")));
    assert!(warnings.contains(&format!("No rows found in {ACME}acme_director_profiles.csv")));
    assert!(!warnings.iter().any(|w| w.contains("readme.txt")));

    let repo = outcome.repository.unwrap();
    let company = repo.get_company("acme").unwrap();
    assert_eq!(company.company_name, "Acme");
    assert_eq!(company.ticker, "UNK");
}

#[test]
fn test_no_recognized_files_warning() {
    let store = MemoryBlobStore::new()
        .with(format!("{ACME}acme_manifest.csv"), "company_name\nAcme\n")
        .with(format!("{ACME}notes.txt"), "x");

    let outcome = load(store, &LoadRequest::latest());
    assert!(outcome
        .report
        .warnings
        .contains(&"No recognized CSVs for acme 2024".to_string()));
    assert_eq!(outcome.report.companies_count, 1);
}

#[test]
fn test_collisions_are_reported() {
    let store = acme_store().with(
        format!("{ACME}acme_director_compensation.csv"),
        "full_name,total_usd\nJosé Smith,10\nJos Smith,20\n",
    );

    let outcome = load(store, &LoadRequest::latest());
    let report = &outcome.report;
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(report.collisions[0].kind, EntityKind::Person);
    assert_eq!(report.collisions[0].identifier, "jos_smith");
    assert!(report.warnings.iter().any(|w| w.contains("jos_smith")));

    // Merged: second row upserts the first
    let repo = outcome.repository.unwrap();
    assert_eq!(repo.director_comp().len(), 1);
    assert_eq!(repo.director_comp()[0].total_usd, 20.0);
}

#[test]
fn test_each_collision_reported_once_and_renames_are_enrichment() {
    let store = acme_store().with(
        format!("{ACME}acme_executive_compensation.csv"),
        "full_name,company_name,total_comp_usd\n\
         José Smith,Acme Corporation,10\n\
         Jos Smith,Acme Corporation,20\n\
         Jos Smith,Acme Corporation,30\n\
         A B,Acme Corporation,40\n",
    );

    let outcome = load(store, &LoadRequest::latest());
    let report = &outcome.report;
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(report.collisions[0].kind, EntityKind::Person);
    assert_eq!(report.warnings.iter().filter(|w| w.contains("jos_smith")).count(), 1);
    assert!(!report.warnings.iter().any(|w| w.contains("Company id")));

    let repo = outcome.repository.unwrap();
    assert_eq!(repo.get_company("acme").unwrap().company_name, "Acme Corporation");
}

#[test]
fn test_windows_1252_export() {
    let mut store = acme_store();
    let mut bytes = b"full_name,total_usd\nJos".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" Smith,10\n");
    store.insert(format!("{ACME}acme_director_compensation.csv"), bytes);

    let repo = load(store, &LoadRequest::latest()).repository.unwrap();
    assert_eq!(repo.get_person("jos_smith").unwrap().full_name, "José Smith");
}

#[test]
fn test_file_reports() {
    let store = acme_store().with(
        format!("{ACME}acme_executive_equity_grants.csv"),
        "full_name,target_units\nJane Doe,lots\n,5\n",
    );

    let report = load(store, &LoadRequest::latest()).report;
    let grants = report
        .files
        .iter()
        .find(|f| f.category == FileCategory::EquityGrants)
        .unwrap();
    assert_eq!(grants.stats.rows_read, 2);
    assert_eq!(grants.stats.rows_skipped, 1);
    assert_eq!(grants.stats.records_added, 1);
    assert_eq!(grants.stats.fallback_fields, 1);
    assert!(report.files.iter().any(|f| f.category == FileCategory::Manifest));
}

#[test]
fn test_discovery_failure_keeps_previous_repository() {
    let handle = RepositoryHandle::default();
    let report = handle.reload(&mut LoadOrchestrator::new(acme_store()), &LoadRequest::latest());
    assert!(report.is_success());
    let before = handle.current();
    assert_eq!(before.company_count(), 1);

    let mut broken = acme_store();
    broken.set_listing_unavailable(true);
    let mut orchestrator = LoadOrchestrator::new(broken);
    let report = handle.reload(&mut orchestrator, &LoadRequest::latest());

    assert_eq!(orchestrator.state(), &LoadState::Failed);
    assert_eq!(report.status, LoadStatus::Error);
    assert!(Arc::ptr_eq(&before, &handle.current()));
    assert!(handle.current().get_company("acme").is_some());
}

#[test]
fn test_successful_reload_swaps() {
    let handle = RepositoryHandle::default();
    handle.reload(&mut LoadOrchestrator::new(acme_store()), &LoadRequest::latest());
    let first = handle.current();

    let bigger = acme_store().with(
        "companies/beta/2024/beta_manifest.csv",
        "company_name\nBeta Inc\n",
    );
    handle.reload(&mut LoadOrchestrator::new(bigger), &LoadRequest::latest());

    let second = handle.current();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.company_count(), 1);
    assert_eq!(second.company_count(), 2);
}

#[test]
fn test_report_serializes_to_json() {
    let report = load(acme_store(), &LoadRequest::latest()).report;
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["companies_count"], 1);
    assert_eq!(value["files"][0]["category"], "manifest");
}
