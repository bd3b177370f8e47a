mod cli;
mod config;
mod datasources;
mod db;
mod engine;
mod error;
mod models;
mod report;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, LogCommands};
use config::Config;
use datasources::OpenWeatherMapClient;
use db::Database;
use engine::ComplianceEngine;
use error::{Result, RoofOpsError};
use models::{WorkLogEntry, WorkStatus};
use report::ComplianceReport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v flags override the environment filter
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Init) => {
            if Config::exists(cli.config.as_ref()) {
                println!("Existing configuration will be overwritten.");
            }
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => run_check(cli.config, cli.data_dir).await,
        Some(Commands::Log { command }) => run_log(cli.data_dir, command),
        Some(Commands::Report { json, assembly }) => {
            run_report(cli.config, json, assembly).await
        }
        None => run_report(cli.config, false, None).await,
    }
}

fn load_config(config_override: Option<PathBuf>) -> Config {
    match Config::load(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `roofops init` to set up.");
            std::process::exit(1);
        }
    }
}

async fn run_check(config_override: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_override);

    if config.openweathermap.enabled && !config.openweathermap.api_key.is_empty() {
        let client = OpenWeatherMapClient::new(config.openweathermap.clone());
        match client.test_connection().await {
            Ok(true) => println!("OpenWeatherMap: OK"),
            Ok(false) => println!("OpenWeatherMap: FAILED (bad response)"),
            Err(e) => println!("OpenWeatherMap: FAILED ({})", e),
        }
    } else {
        println!("OpenWeatherMap: not configured");
    }

    let db_path = Config::db_path(data_dir.as_ref())?;
    match Database::open(&db_path) {
        Ok(db) => println!("Database: OK ({})", db.path().display()),
        Err(e) => println!("Database: FAILED ({})", e),
    }

    let engine = ComplianceEngine::with_standard_catalog();
    println!("Catalog: {} assemblies", engine.assemblies().len());
    for assembly in engine.assemblies() {
        println!(
            "  {:<18} {:<32} [{}] {} components, {}h window, {}d lead",
            assembly.id,
            assembly.name,
            assembly.scope_type,
            assembly.components.len(),
            assembly.min_work_window_hours,
            assembly.min_lead_time_days
        );
    }

    Ok(())
}

async fn run_report(
    config_override: Option<PathBuf>,
    json: bool,
    assembly_filter: Option<String>,
) -> Result<()> {
    let config = load_config(config_override);

    if !config.openweathermap.enabled || config.openweathermap.api_key.is_empty() {
        return Err(RoofOpsError::Config(
            "OpenWeatherMap is not configured; run `roofops init`".into(),
        ));
    }

    let client = OpenWeatherMapClient::new(config.openweathermap.clone());
    let feed = client.fetch_feed().await?;

    let engine = ComplianceEngine::with_standard_catalog();
    let current = engine::normalize_current(&feed.current, &feed.hourly);
    let hourly = if feed.hourly.is_empty() {
        None
    } else {
        Some(feed.hourly.as_slice())
    };

    let results = match &assembly_filter {
        Some(id) => vec![engine.evaluate(id, &current, hourly)],
        None => engine.evaluate_all(&current, hourly),
    };
    let risks = engine::generate_risk_assessments(feed.next_days(5));
    let recommendations = engine.schedule_recommendations(&feed.daily_summary);
    let insights = engine.insights(&current, &results, &risks, &recommendations);

    let location = if feed.location.city.is_empty() {
        format!("{:.2}, {:.2}", feed.location.latitude, feed.location.longitude)
    } else {
        format!("{}, {}", feed.location.city, feed.location.country)
    };

    let report = ComplianceReport {
        generated_at: Utc::now(),
        project: config.project.name,
        site: config.project.site,
        job_number: config.project.job_number,
        location,
        current,
        results,
        risks,
        recommendations,
        insights,
    };

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

fn run_log(data_dir: Option<PathBuf>, command: LogCommands) -> Result<()> {
    let db = Database::open(&Config::db_path(data_dir.as_ref())?)?;

    match command {
        LogCommands::Add {
            date,
            assembly,
            crew,
            hours,
            status,
            notes,
        } => {
            let status = WorkStatus::from_str(&status).ok_or_else(|| {
                RoofOpsError::InvalidData(format!(
                    "unknown status '{}' (expected Completed, PartialDay, RainedOut, or Standby)",
                    status
                ))
            })?;
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut entry = WorkLogEntry::new(date, assembly, crew, hours, status);
            if let Some(notes) = notes {
                entry = entry.with_notes(notes);
            }
            let id = db.insert_work_log(&entry)?;
            println!(
                "Logged {} on {} ({}h, crew of {}) as entry {}",
                entry.assembly_id, entry.date, entry.hours_worked, entry.crew_size, id
            );
        }
        LogCommands::List { limit } => {
            let entries = db.recent_work_logs(limit)?;
            if entries.is_empty() {
                println!("No work log entries.");
            }
            for entry in entries {
                println!(
                    "{}  {:<16} crew {:>2}  {:>5.1}h  {:<11} {}",
                    entry.date,
                    entry.assembly_id,
                    entry.crew_size,
                    entry.hours_worked,
                    entry.status.as_str(),
                    entry.notes.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
