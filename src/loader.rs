// 🚚 Load Orchestrator - one full pass from blob store to repository
//
// Idle → Discovering → Importing{company, year}* → Aggregating → Done | Failed
//
// Only discovery can fail a pass. Everything after it degrades to a warning
// and the pass keeps going. A pass always builds a brand-new repository;
// RepositoryHandle publishes it only when the pass reached Done.

use crate::blob_store::BlobStore;
use crate::discovery::{file_name, FolderDiscovery};
use crate::entities::{CompanyAttributes, SlugCollision};
use crate::error::LoadError;
use crate::importers::{
    importer_for, manifest_company_attributes, FileCategory, ImportContext, ImportStats,
};
use crate::repository::LeagueRepository;
use crate::resolver::EntityResolver;
use crate::rows::{parse_csv, Row};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

// ============================================================================
// STATE / REQUEST / REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Discovering,
    Importing { company: String, year: String },
    Aggregating,
    Done,
    Failed,
}

/// Which years to load per company
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Load exactly this year for companies that have it
    pub specific_year: Option<String>,
    /// Otherwise load every year (default: only the latest)
    pub load_all_years: bool,
}

impl LoadRequest {
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn year(year: impl Into<String>) -> Self {
        LoadRequest {
            specific_year: Some(year.into()),
            load_all_years: false,
        }
    }

    pub fn all_years() -> Self {
        LoadRequest {
            specific_year: None,
            load_all_years: true,
        }
    }

    /// Years to import for a company that has `available` year folders
    ///
    /// The requested year when present; else all years when asked;
    /// else the latest; nothing when the company has no years.
    pub fn select_years(&self, available: &BTreeSet<String>) -> Vec<String> {
        if let Some(year) = self.specific_year.as_ref().filter(|y| available.contains(*y)) {
            return vec![year.clone()];
        }
        if self.load_all_years {
            return available.iter().cloned().collect();
        }
        available.iter().next_back().cloned().into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Success,
    Error,
}

/// What happened to one object during the pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub category: FileCategory,
    pub stats: ImportStats,
    /// CSV records the reader could not decode
    pub malformed_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub load_id: Uuid,
    pub status: LoadStatus,
    pub message: Option<String>,
    pub companies_loaded: Vec<String>,
    pub companies_count: usize,
    pub people_count: usize,
    pub executive_comp_count: usize,
    pub director_comp_count: usize,
    pub years_loaded: Vec<String>,
    pub warnings: Vec<String>,
    pub files: Vec<FileReport>,
    pub collisions: Vec<SlugCollision>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }

    /// Totals across every imported file
    pub fn import_totals(&self) -> ImportStats {
        let mut totals = ImportStats::default();
        for file in &self.files {
            totals += file.stats;
        }
        totals
    }
}

/// Report plus the freshly built repository (only when the pass succeeded)
#[derive(Debug)]
pub struct LoadOutcome {
    pub report: LoadReport,
    pub repository: Option<LeagueRepository>,
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

pub struct LoadOrchestrator<S: BlobStore> {
    store: S,
    state: LoadState,
}

impl<S: BlobStore> LoadOrchestrator<S> {
    pub fn new(store: S) -> Self {
        LoadOrchestrator {
            store,
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Run one full pass
    pub fn load(&mut self, request: &LoadRequest) -> LoadOutcome {
        let load_id = Uuid::new_v4();
        let span = tracing::info_span!("load", %load_id);
        let _guard = span.enter();

        let mut pass = LoadPass::default();

        self.transition(LoadState::Discovering);
        let plan = match self.discover(request) {
            Ok(plan) => plan,
            Err(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "load failed");
                self.transition(LoadState::Failed);
                return LoadOutcome {
                    report: pass.report(load_id, LoadStatus::Error, Some(message)),
                    repository: None,
                };
            }
        };

        for (company, years) in plan {
            for year in years {
                self.transition(LoadState::Importing {
                    company: company.clone(),
                    year: year.clone(),
                });
                tracing::info!(company = %company, year = %year, "loading company year");
                pass.load_company_year(&self.store, &company, &year);
            }
        }

        self.transition(LoadState::Aggregating);
        let report = pass.report(load_id, LoadStatus::Success, None);
        tracing::info!(
            companies = report.companies_count,
            people = report.people_count,
            executive_comp = report.executive_comp_count,
            warnings = report.warnings.len(),
            "load finished"
        );

        self.transition(LoadState::Done);
        LoadOutcome {
            report,
            repository: Some(pass.repo),
        }
    }

    /// Companies and their target years; any store failure aborts the pass
    fn discover(&self, request: &LoadRequest) -> Result<Vec<(String, Vec<String>)>, LoadError> {
        let discovery = FolderDiscovery::new(&self.store);
        let mut plan = Vec::new();
        for company in discovery.list_companies()? {
            let years = discovery.list_years(&company)?;
            let targets = request.select_years(&years);
            if targets.is_empty() {
                tracing::debug!(company = %company, "no year folders");
            }
            plan.push((company, targets));
        }
        Ok(plan)
    }

    fn transition(&mut self, next: LoadState) {
        tracing::debug!(from = ?self.state, to = ?next, "load state");
        self.state = next;
    }
}

// ============================================================================
// ONE PASS
// ============================================================================

#[derive(Default)]
struct LoadPass {
    repo: LeagueRepository,
    resolver: EntityResolver,
    warnings: Vec<String>,
    files: Vec<FileReport>,
    collisions_reported: usize,
}

impl LoadPass {
    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    fn load_company_year<S: BlobStore + ?Sized>(&mut self, store: &S, company: &str, year: &str) {
        let Ok(year_number) = year.parse::<i32>() else {
            self.warn(format!("Invalid year folder {year} for {company}"));
            return;
        };

        let files = match FolderDiscovery::new(store).list_files(company, year) {
            Ok(files) => files,
            Err(err) => {
                self.warn(format!("Failed to list files for {company} {year}: {err}"));
                return;
            }
        };
        if files.is_empty() {
            self.warn(format!("No files found for {company} {year}"));
            return;
        }

        // Manifest first: it describes the company
        let manifest = files
            .iter()
            .find(|name| FileCategory::classify(file_name(name)) == Some(FileCategory::Manifest));

        let mut company_attrs = CompanyAttributes::default();
        let mut manifest_rows = Vec::new();
        let mut manifest_fallbacks = 0;
        match manifest {
            Some(name) => {
                let (rows, _) = self.read_rows(store, name);
                if let Some(first) = rows.first() {
                    let (attrs, fallbacks) = manifest_company_attributes(first);
                    company_attrs = attrs;
                    manifest_fallbacks = fallbacks;
                }
                manifest_rows = rows;
            }
            None => self.warn(format!("Manifest not found for {company} {year}; using defaults")),
        }

        let manifest_source = manifest.map(String::as_str).unwrap_or("");
        self.resolver.resolve_manifest_company(
            &mut self.repo,
            company,
            &company_attrs,
            year_number,
            manifest_source,
        );
        if let Some(name) = manifest {
            let mut stats = self.import(FileCategory::Manifest, company, year_number, name, &manifest_rows);
            stats.fallback_fields += manifest_fallbacks;
            self.files.push(FileReport {
                name: name.clone(),
                category: FileCategory::Manifest,
                stats,
                malformed_rows: 0,
            });
        }
        self.report_collisions();

        let mut recognized = 0;
        for name in &files {
            let short_name = file_name(name);
            if !short_name.to_lowercase().ends_with(".csv") {
                tracing::debug!(file = %name, "skipping non-csv object");
                continue;
            }

            let category = match FileCategory::classify(short_name) {
                Some(FileCategory::Manifest) => continue,
                Some(category) => category,
                None => {
                    self.warn(format!("Unrecognized file {name}"));
                    continue;
                }
            };

            recognized += 1;
            let (rows, malformed) = self.read_rows(store, name);
            let stats = self.import(category, company, year_number, name, &rows);
            tracing::debug!(
                file = %name,
                category = category.name(),
                rows = stats.rows_read,
                added = stats.records_added,
                skipped = stats.rows_skipped,
                "imported file"
            );
            self.files.push(FileReport {
                name: name.clone(),
                category,
                stats,
                malformed_rows: malformed,
            });
            self.report_collisions();
        }

        if recognized == 0 {
            self.warn(format!("No recognized CSVs for {company} {year}"));
        }
    }

    fn import(
        &mut self,
        category: FileCategory,
        company: &str,
        year: i32,
        source: &str,
        rows: &[Row],
    ) -> ImportStats {
        let mut ctx = ImportContext {
            repo: &mut self.repo,
            resolver: &mut self.resolver,
            company_id: company,
            year,
            source,
        };
        importer_for(category).import(&mut ctx, rows)
    }

    /// Read and parse one object. Read failures and empty files become
    /// warnings and yield no rows.
    fn read_rows<S: BlobStore + ?Sized>(&mut self, store: &S, name: &str) -> (Vec<Row>, usize) {
        let text = match store.read_text(name) {
            Ok(text) => text,
            Err(err) => {
                self.warn(format!("Failed to download {name}: {err}"));
                return (Vec::new(), 0);
            }
        };

        let parsed = parse_csv(&text);
        if parsed.rows.is_empty() {
            self.warn(format!("No rows found in {name}"));
        } else {
            tracing::debug!(file = %name, rows = parsed.rows.len(), "read rows");
        }
        (parsed.rows, parsed.malformed)
    }

    /// Turn collisions recorded since the last call into warnings
    fn report_collisions(&mut self) {
        let fresh: Vec<String> = self.repo.collisions()[self.collisions_reported..]
            .iter()
            .map(SlugCollision::describe)
            .collect();
        self.collisions_reported = self.repo.collisions().len();
        for message in fresh {
            self.warn(message);
        }
    }

    fn report(&self, load_id: Uuid, status: LoadStatus, message: Option<String>) -> LoadReport {
        let years: BTreeSet<String> = self
            .repo
            .executive_comp()
            .iter()
            .map(|r| r.fiscal_year_end.year().to_string())
            .collect();

        LoadReport {
            load_id,
            status,
            message,
            companies_loaded: self.repo.companies().map(|c| c.company_id.clone()).collect(),
            companies_count: self.repo.company_count(),
            people_count: self.repo.person_count(),
            executive_comp_count: self.repo.executive_comp().len(),
            director_comp_count: self.repo.director_comp().len(),
            years_loaded: years.into_iter().collect(),
            warnings: self.warnings.clone(),
            files: self.files.clone(),
            collisions: self.repo.collisions().to_vec(),
        }
    }
}

// ============================================================================
// REPOSITORY HANDLE
// ============================================================================

/// The currently published repository.
///
/// Readers take an `Arc` snapshot and query it without holding any lock;
/// the lock only guards the pointer swap.
#[derive(Debug, Default)]
pub struct RepositoryHandle {
    current: RwLock<Arc<LeagueRepository>>,
    last_report: RwLock<Option<LoadReport>>,
}

impl RepositoryHandle {
    pub fn new(repository: LeagueRepository) -> Self {
        RepositoryHandle {
            current: RwLock::new(Arc::new(repository)),
            last_report: RwLock::new(None),
        }
    }

    /// Snapshot of the published repository
    pub fn current(&self) -> Arc<LeagueRepository> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the published repository
    pub fn publish(&self, repository: LeagueRepository) {
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(repository);
    }

    /// Report of the most recent reload (successful or not)
    pub fn last_report(&self) -> Option<LoadReport> {
        self.last_report
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Run a pass and publish its repository only if it succeeded
    pub fn reload<S: BlobStore>(
        &self,
        orchestrator: &mut LoadOrchestrator<S>,
        request: &LoadRequest,
    ) -> LoadReport {
        let outcome = orchestrator.load(request);
        self.apply(outcome)
    }

    /// Publish a finished pass; failed passes leave the current repository
    pub fn apply(&self, outcome: LoadOutcome) -> LoadReport {
        match outcome.repository {
            Some(repository) => self.publish(repository),
            None => tracing::warn!("load did not complete, keeping previous repository"),
        }
        *self
            .last_report
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(outcome.report.clone());
        outcome.report
    }
}

// ============================================================================
// TESTS
// ============================================================================
