// execap - Web Server
// JSON API over the published league repository, with a reload trigger

use anyhow::Context as _;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use clap::Parser;
use execap::coercion::year_end;
use execap::config::{self, Settings};
use execap::{
    BeneficialOwnershipRecord, CapSnapshot, Company, DirectorCompPolicy, DirectorCompensation,
    DirectorProfile, ExecutiveCompensation, ExecutiveEquityGrant, FsBlobStore, LeagueStatistics,
    LoadOrchestrator, LoadReport, LoadRequest, Person, RepositoryHandle, SourceManifestEntry,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "execap-server", version = execap::VERSION, about = "execap JSON API")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    handle: Arc<RepositoryHandle>,
    settings: Arc<Settings>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

#[derive(Debug, Default, Deserialize)]
struct FiscalYearQuery {
    fiscal_year: Option<i32>,
}

impl FiscalYearQuery {
    fn date(&self) -> Option<NaiveDate> {
        self.fiscal_year.map(year_end)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RefreshQuery {
    year: Option<String>,
    all_years: Option<bool>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct TopEarnerResponse {
    person_id: String,
    full_name: String,
    company_id: String,
    company_name: String,
    fiscal_year: i32,
    total_comp_usd: f64,
}

#[derive(Serialize)]
struct LeagueStatsResponse {
    statistics: LeagueStatistics,
    top_earners: Vec<TopEarnerResponse>,
}

#[derive(Serialize)]
struct CompanyResponse {
    company: Company,
    cap: Option<CapSnapshot>,
    director_profiles: Vec<DirectorProfile>,
    director_policy: Vec<DirectorCompPolicy>,
    beneficial_ownership: Vec<BeneficialOwnershipRecord>,
    equity_grants: Vec<ExecutiveEquityGrant>,
    source_manifest: Vec<SourceManifestEntry>,
}

#[derive(Serialize)]
struct CompensationResponse {
    executives: Vec<ExecutiveCompensation>,
    directors: Vec<DirectorCompensation>,
}

#[derive(Serialize)]
struct PersonResponse {
    person: Person,
    compensation: Vec<ExecutiveCompensation>,
}

#[derive(Serialize)]
struct DiagnosticResponse {
    data_root: String,
    companies_count: usize,
    people_count: usize,
    executive_comp_count: usize,
    director_comp_count: usize,
    available_years: Vec<i32>,
    last_load: Option<LoadReport>,
}

fn owned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Response {
    ApiResponse::ok(HealthResponse {
        status: "OK",
        version: execap::VERSION,
    })
}

/// GET /api/league-stats?fiscal_year=YYYY
async fn league_stats(State(state): State<AppState>, Query(query): Query<FiscalYearQuery>) -> Response {
    let repo = state.handle.current();
    let top_earners = repo
        .get_top_earners(10, query.date())
        .into_iter()
        .map(|e| TopEarnerResponse {
            person_id: e.person.person_id.clone(),
            full_name: e.person.full_name.clone(),
            company_id: e.company.company_id.clone(),
            company_name: e.company.company_name.clone(),
            fiscal_year: chrono::Datelike::year(&e.compensation.fiscal_year_end),
            total_comp_usd: e.compensation.total_comp_usd,
        })
        .collect();

    ApiResponse::ok(LeagueStatsResponse {
        statistics: repo.get_league_statistics(query.date()),
        top_earners,
    })
}

/// GET /api/standings - Companies by market cap
async fn standings(State(state): State<AppState>) -> Response {
    let repo = state.handle.current();
    ApiResponse::ok(owned(repo.get_league_standings()))
}

/// GET /api/free-agents
async fn free_agents(State(state): State<AppState>) -> Response {
    let repo = state.handle.current();
    ApiResponse::ok(owned(repo.get_free_agents()))
}

/// GET /api/years - Fiscal years with executive pay, newest first
async fn years(State(state): State<AppState>) -> Response {
    ApiResponse::ok(state.handle.current().get_available_years())
}

/// GET /api/companies/:id
async fn company_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FiscalYearQuery>,
) -> Response {
    let repo = state.handle.current();
    let Some(company) = repo.get_company(&id) else {
        return api_error(StatusCode::NOT_FOUND, format!("company not found: {id}"));
    };

    ApiResponse::ok(CompanyResponse {
        company: company.clone(),
        cap: repo.get_company_cap_snapshot(&id, query.date()),
        director_profiles: owned(repo.get_director_profiles(&id)),
        director_policy: owned(repo.get_director_policy(&id)),
        beneficial_ownership: owned(repo.get_beneficial_ownership(&id)),
        equity_grants: owned(repo.get_equity_grants(&id, None)),
        source_manifest: owned(repo.get_source_manifest(&id)),
    })
}

/// GET /api/companies/:id/compensation?fiscal_year=YYYY
async fn company_compensation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FiscalYearQuery>,
) -> Response {
    let repo = state.handle.current();
    if repo.get_company(&id).is_none() {
        return api_error(StatusCode::NOT_FOUND, format!("company not found: {id}"));
    }

    ApiResponse::ok(CompensationResponse {
        executives: owned(repo.get_company_compensation(&id, query.date())),
        directors: owned(repo.get_director_compensation(&id, query.date())),
    })
}

/// GET /api/companies/:id/cap?fiscal_year=YYYY
async fn company_cap(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FiscalYearQuery>,
) -> Response {
    match state.handle.current().get_company_cap_snapshot(&id, query.date()) {
        Some(snapshot) => ApiResponse::ok(snapshot),
        None => api_error(StatusCode::NOT_FOUND, format!("company not found: {id}")),
    }
}

/// GET /api/people/:id
async fn person_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let repo = state.handle.current();
    match repo.get_person(&id) {
        Some(person) => ApiResponse::ok(PersonResponse {
            person: person.clone(),
            compensation: owned(repo.get_compensation_for_person(&id, None)),
        }),
        None => api_error(StatusCode::NOT_FOUND, format!("person not found: {id}")),
    }
}

/// GET /api/diagnostic - What is loaded and how the last load went
async fn diagnostic(State(state): State<AppState>) -> Response {
    let repo = state.handle.current();
    ApiResponse::ok(DiagnosticResponse {
        data_root: state.settings.data_root.display().to_string(),
        companies_count: repo.company_count(),
        people_count: repo.person_count(),
        executive_comp_count: repo.executive_comp().len(),
        director_comp_count: repo.director_comp().len(),
        available_years: repo.get_available_years(),
        last_load: state.handle.last_report(),
    })
}

/// POST /api/refresh?year=YYYY&all_years=true - Reload, swap on success
async fn refresh(State(state): State<AppState>, Query(query): Query<RefreshQuery>) -> Response {
    let request = LoadRequest {
        specific_year: query.year.or_else(|| state.settings.default_year.clone()),
        load_all_years: query.all_years.unwrap_or(state.settings.load_all_years),
    };

    match run_load(state.clone(), request).await {
        Ok(report) if report.is_success() => ApiResponse::ok(report),
        Ok(report) => api_error(
            StatusCode::BAD_GATEWAY,
            report.message.unwrap_or_else(|| "load failed".to_string()),
        ),
        Err(err) => api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Run a load on a blocking thread and publish it if it succeeded
async fn run_load(state: AppState, request: LoadRequest) -> anyhow::Result<LoadReport> {
    tokio::task::spawn_blocking(move || {
        let mut orchestrator = LoadOrchestrator::new(FsBlobStore::new(&state.settings.data_root));
        state.handle.reload(&mut orchestrator, &request)
    })
    .await
    .context("load task panicked")
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    println!("🌐 execap - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState {
        handle: Arc::new(RepositoryHandle::default()),
        settings: Arc::new(settings),
    };

    let request = LoadRequest {
        specific_year: state.settings.default_year.clone(),
        load_all_years: state.settings.load_all_years,
    };
    let report = run_load(state.clone(), request).await?;
    if report.is_success() {
        println!(
            "✓ Loaded {} companies, {} people ({} warnings)",
            report.companies_count,
            report.people_count,
            report.warnings.len()
        );
    } else {
        eprintln!(
            "❌ Initial load failed: {}",
            report.message.as_deref().unwrap_or("unknown error")
        );
        eprintln!("   Serving an empty league; POST /api/refresh to retry.");
    }

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/league-stats", get(league_stats))
        .route("/standings", get(standings))
        .route("/free-agents", get(free_agents))
        .route("/years", get(years))
        .route("/companies/:id", get(company_detail))
        .route("/companies/:id/compensation", get(company_compensation))
        .route("/companies/:id/cap", get(company_cap))
        .route("/people/:id", get(person_detail))
        .route("/diagnostic", get(diagnostic))
        .route("/refresh", post(refresh))
        .with_state(state.clone());

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let address = state.settings.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    println!("\n🚀 Server running on http://{address}");
    println!("   API: http://{address}/api/league-stats");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
