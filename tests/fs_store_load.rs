// Load pass against a local directory mirroring the bucket layout

use execap::{FsBlobStore, LoadOrchestrator, LoadRequest, LoadStatus};
use std::fs;
use std::path::Path;

fn write(root: &Path, name: &str, contents: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "companies/acme/2024/acme_manifest.csv",
        "company_name,ticker,cap_budget_usd\nAcme Corp,ACM,500000\n",
    );
    write(
        root,
        "companies/acme/2024/acme_executive_compensation.csv",
        "\u{feff}full_name , salary_usd\nJane Doe,\"$600,000\"\n",
    );
    write(
        root,
        "companies/acme/2024/acme_director_comp_policy.csv",
        "component,amount_usd,unit\nAnnual Cash Retainer,100000,USD/yr\n",
    );
    write(root, "companies/beta/notayear/beta_manifest.csv", "company_name\nBeta\n");

    let outcome = LoadOrchestrator::new(FsBlobStore::new(root)).load(&LoadRequest::latest());
    assert_eq!(outcome.report.status, LoadStatus::Success);

    let repo = outcome.repository.unwrap();
    // beta has a folder but no year folders: nothing to load for it
    assert!(repo.get_company("beta").is_none());

    let snapshot = repo.get_company_cap_snapshot("acme", None).unwrap();
    assert_eq!(snapshot.total_spent, 600_000.0);
    assert_eq!(snapshot.budget, 500_000.0);
    assert!(snapshot.is_over_budget());
    assert_eq!(repo.get_companies_over_budget(None).len(), 1);

    let policy = repo.get_director_policy("acme");
    assert_eq!(policy.len(), 1);
    assert_eq!(policy[0].unit.as_deref(), Some("USD/yr"));
}

#[test]
fn test_missing_root_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path().join("does-not-exist"));

    let mut orchestrator = LoadOrchestrator::new(store);
    let outcome = orchestrator.load(&LoadRequest::latest());

    assert_eq!(outcome.report.status, LoadStatus::Error);
    assert!(outcome.repository.is_none());
}
