// 🏈 execap CLI - load proxy-statement exports and query the league
//
// Nothing is persisted: every command runs a fresh load against the local
// mirror (data_root/companies/<company>/<year>/*.csv) and then queries it.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use execap::coercion::year_end;
use execap::config::{self, Settings};
use execap::{FsBlobStore, LeagueRepository, LoadOrchestrator, LoadReport, LoadRequest};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "execap")]
#[command(version = execap::VERSION)]
#[command(about = "Executive compensation league - load proxy data and query it")]
#[command(long_about = r#"
Loads per-company, per-year CSV exports (executive pay, director pay,
ownership, board profiles) and answers league queries over them.

Example usage:
  execap load --root ./data --all-years
  execap stats --year 2024
  execap company acme
  execap person jane_doe
"#)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where to load from and which years
#[derive(Args, Clone, Default)]
struct SourceArgs {
    /// Directory containing companies/ (overrides data_root)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Year folder to load; query commands also filter to this fiscal year
    #[arg(short, long)]
    year: Option<String>,

    /// Load every year folder instead of only the latest
    #[arg(long)]
    all_years: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a load and print its report
    Load {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// League-wide statistics and top earners
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of top earners to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Companies ranked by market cap
    Standings {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// One company: cap snapshot, executive and board pay
    Company {
        /// Company id (folder name)
        id: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// One person: roles and pay history
    Person {
        /// Person id (slug of the full name, or explicit person_id)
        id: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Retired executives and directors
    FreeAgents {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> Result<()> {
    config::init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Load { source, json } => run_load(&settings, &source, json),
        Commands::Stats { source, limit } => {
            let repo = load_repository(&settings, &source)?;
            show_stats(&repo, fiscal_filter(&settings, &source)?, limit);
            Ok(())
        }
        Commands::Standings { source } => {
            let repo = load_repository(&settings, &source)?;
            show_standings(&repo);
            Ok(())
        }
        Commands::Company { id, source } => {
            let repo = load_repository(&settings, &source)?;
            show_company(&repo, &id, fiscal_filter(&settings, &source)?)
        }
        Commands::Person { id, source } => {
            let repo = load_repository(&settings, &source)?;
            show_person(&repo, &id)
        }
        Commands::FreeAgents { source } => {
            let repo = load_repository(&settings, &source)?;
            show_free_agents(&repo);
            Ok(())
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

fn load(settings: &Settings, source: &SourceArgs) -> (LoadReport, Option<LeagueRepository>) {
    let root = source.root.clone().unwrap_or_else(|| settings.data_root.clone());
    let request = LoadRequest {
        specific_year: requested_year(settings, source),
        load_all_years: source.all_years || settings.load_all_years,
    };

    let mut orchestrator = LoadOrchestrator::new(FsBlobStore::new(root));
    let outcome = orchestrator.load(&request);
    (outcome.report, outcome.repository)
}

fn load_repository(settings: &Settings, source: &SourceArgs) -> Result<LeagueRepository> {
    let (report, repo) = load(settings, source);
    match repo {
        Some(repo) => {
            if !report.warnings.is_empty() {
                eprintln!("⚠️  {} load warnings (run `execap load` for details)", report.warnings.len());
            }
            Ok(repo)
        }
        None => bail!(
            "load failed: {}",
            report.message.unwrap_or_else(|| "unknown error".to_string())
        ),
    }
}

fn run_load(settings: &Settings, source: &SourceArgs, json: bool) -> Result<()> {
    let (report, _) = load(settings, source);

    if json {
        let text = serde_json::to_string_pretty(&report).context("failed to serialize load report")?;
        println!("{text}");
    } else {
        print_report(&report);
    }

    if !report.is_success() {
        bail!(
            "load failed: {}",
            report.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }
    Ok(())
}

fn print_report(report: &LoadReport) {
    println!("🗄️  Load {}", report.load_id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if !report.is_success() {
        println!("❌ Load failed: {}", report.message.as_deref().unwrap_or("unknown error"));
    }

    let totals = report.import_totals();
    println!("✓ Companies:            {}", report.companies_count);
    println!("✓ People:               {}", report.people_count);
    println!("✓ Executive pay rows:   {}", report.executive_comp_count);
    println!("✓ Director pay rows:    {}", report.director_comp_count);
    println!("✓ Fiscal years:         {}", report.years_loaded.join(", "));
    println!(
        "✓ Files: {} ({} rows read, {} skipped, {} degraded cells)",
        report.files.len(),
        totals.rows_read,
        totals.rows_skipped,
        totals.fallback_fields
    );

    if !report.collisions.is_empty() {
        println!("\n🔀 Identifier collisions:");
        for collision in &report.collisions {
            println!("   {}", collision.describe());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n⚠️  Warnings:");
        for warning in &report.warnings {
            println!("   {warning}");
        }
    }
}

/// `--year`, else the configured default year
fn requested_year(settings: &Settings, source: &SourceArgs) -> Option<String> {
    source.year.clone().or_else(|| settings.default_year.clone())
}

/// The loaded year doubles as the fiscal-year filter for queries
fn fiscal_filter(settings: &Settings, source: &SourceArgs) -> Result<Option<NaiveDate>> {
    requested_year(settings, source)
        .as_deref()
        .map(|y| {
            y.parse::<i32>()
                .map(year_end)
                .with_context(|| format!("invalid year {y:?}"))
        })
        .transpose()
}

// ============================================================================
// QUERIES
// ============================================================================

fn show_stats(repo: &LeagueRepository, fiscal_year: Option<NaiveDate>, limit: usize) {
    let stats = repo.get_league_statistics(fiscal_year);

    println!("📊 League statistics");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Companies:            {}", stats.total_companies);
    println!("People:               {}", stats.total_people);
    println!("Executive pay rows:   {}", stats.executive_comp_records);
    println!("Director pay rows:    {}", stats.director_comp_records);
    println!("Free agents:          {}", stats.free_agents_count);
    println!("Over budget:          {}", stats.companies_over_budget);
    println!("Total spending:       {}", usd(stats.total_league_spending));
    println!("Total budget:         {}", usd(stats.total_league_budget));
    println!("Avg cap utilization:  {:.1}%", stats.avg_cap_utilization);

    let earners = repo.get_top_earners(limit, fiscal_year);
    if !earners.is_empty() {
        println!("\n💰 Top earners");
        for (rank, earner) in earners.iter().enumerate() {
            println!(
                "{:>3}. {:<28} {:<20} {:>16}  (FY{})",
                rank + 1,
                earner.person.full_name,
                earner.company.company_name,
                usd(earner.compensation.total_comp_usd),
                earner.compensation.fiscal_year_end.format("%Y")
            );
        }
    }
}

fn show_standings(repo: &LeagueRepository) {
    println!("🏆 League standings (by market cap)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (rank, company) in repo.get_league_standings().iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:<6} {:>20}",
            rank + 1,
            company.company_name,
            company.ticker,
            company.market_cap_usd.map(usd).unwrap_or_else(|| "-".to_string())
        );
    }
}

fn show_company(repo: &LeagueRepository, id: &str, fiscal_year: Option<NaiveDate>) -> Result<()> {
    let Some(company) = repo.get_company(id) else {
        bail!("company not found: {id}");
    };

    println!("🏢 {} ({})", company.company_name, company.ticker);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Fiscal year end:  {}", company.fiscal_year_end);
    if let Some(sector) = &company.sector {
        println!("Sector:           {sector}");
    }
    if let Some(cap) = company.market_cap_usd {
        println!("Market cap:       {}", usd(cap));
    }

    if let Some(snapshot) = repo.get_company_cap_snapshot(id, fiscal_year) {
        let year = snapshot
            .fiscal_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("\n💵 Cap (FY{year})");
        println!("Spent:        {}", usd(snapshot.total_spent));
        println!(
            "Budget:       {}{}",
            usd(snapshot.budget),
            if snapshot.budget_declared { "" } else { " (not declared)" }
        );
        println!("Remaining:    {}", usd(snapshot.remaining));
        println!("Utilization:  {:.1}%", snapshot.utilization_pct);
        if snapshot.is_over_budget() {
            println!("⚠️  Over budget");
        }
    }

    let year = fiscal_year.or_else(|| repo.latest_fiscal_year(id));
    let executives = repo.get_company_compensation(id, year);
    if !executives.is_empty() {
        println!("\n👔 Executives");
        for record in executives {
            let name = repo
                .get_person(&record.person_id)
                .map(|p| p.full_name.as_str())
                .unwrap_or(record.person_id.as_str());
            println!("   {:<28} {:>16}", name, usd(record.total_comp_usd));
        }
    }

    let directors = repo.get_director_compensation(id, fiscal_year);
    if !directors.is_empty() {
        println!("\n🪑 Directors");
        for record in directors {
            let name = repo
                .get_person(&record.person_id)
                .map(|p| p.full_name.as_str())
                .unwrap_or(record.person_id.as_str());
            let independent = repo
                .latest_director_profile(id, &record.person_id)
                .map(|p| if p.independent { "independent" } else { "" })
                .unwrap_or("");
            println!("   {:<28} {:>16}  {}", name, usd(record.total_usd), independent);
        }
    }

    Ok(())
}

fn show_person(repo: &LeagueRepository, id: &str) -> Result<()> {
    let Some(person) = repo.get_person(id) else {
        bail!("person not found: {id}");
    };

    let mut roles = Vec::new();
    if person.is_executive {
        roles.push("executive");
    }
    if person.is_director {
        roles.push("director");
    }

    println!("👤 {}", person.full_name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Title:   {}", person.current_title);
    println!("Roles:   {}", roles.join(", "));
    if let Some(status) = &person.status {
        println!("Status:  {status}");
    }

    let history = repo.get_compensation_for_person(id, None);
    if !history.is_empty() {
        println!("\n💰 Pay history");
        for record in history {
            println!(
                "   FY{}  {:<24} {:>16}",
                record.fiscal_year_end.format("%Y"),
                record.company_id,
                usd(record.total_comp_usd)
            );
        }
    }
    Ok(())
}

fn show_free_agents(repo: &LeagueRepository) {
    let agents = repo.get_free_agents();
    println!("🆓 Free agents: {}", agents.len());
    for person in agents {
        println!("   {:<28} {}", person.full_name, person.current_title);
    }
}

/// 1234567.8 → "$1,234,568"
fn usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
