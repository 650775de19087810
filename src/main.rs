use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobtrack_insights::config::{self, Config};
use jobtrack_insights::models::{JobRecord, Summary};
use jobtrack_insights::{input, report};
use jobtrack_insights::{career_health, coaching_tip, generate_insights, rank_companies, Clock};

#[derive(Parser)]
#[command(name = "jobtrack-insights")]
#[command(about = "Streaks, health scores and coaching insights for a job search", long_about = None)]
struct Cli {
    /// Pin the reference time (RFC 3339 or YYYY-MM-DD); overrides JOBTRACK_NOW
    #[arg(long, global = true)]
    now: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the career health score
    Score {
        #[arg(long)]
        jobs: PathBuf,
        /// Daily activity counts; aggregated from the job records when omitted
        #[arg(long)]
        activity: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List coaching insights
    Insights {
        #[arg(long)]
        jobs: PathBuf,
        #[arg(long)]
        activity: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Rank tracked companies by engagement signal
    Companies {
        #[arg(long)]
        visits: PathBuf,
        #[arg(long)]
        jobs: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown digest
    Report {
        #[arg(long)]
        jobs: PathBuf,
        #[arg(long)]
        activity: Option<PathBuf>,
        #[arg(long)]
        visits: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_summary(activity: Option<&Path>, jobs: &[JobRecord]) -> anyhow::Result<Summary> {
    match activity {
        Some(path) => Ok(Summary {
            by_day: input::load_activity(path)?,
        }),
        None => Ok(Summary::from_jobs(jobs)),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let pinned = cli.now.as_deref().map(config::parse_now).transpose()?;
    let config = Config::from_env()?.with_now(pinned);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("jobtrack_insights={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let now = config.clock().now();
    info!(%now, pinned = config.now.is_some(), "reference time");

    match cli.command {
        Commands::Score {
            jobs,
            activity,
            json,
        } => {
            let jobs = input::load_jobs(&jobs)?;
            let summary = load_summary(activity.as_deref(), &jobs)?;
            let health = career_health(Some(&summary), Some(&jobs[..]), now);

            if json {
                return print_json(&health);
            }

            println!(
                "Career health {}/100 ({}-day streak)",
                health.score, health.streak
            );
            for factor in health.breakdown.values() {
                match &factor.value {
                    Some(value) => println!(
                        "- {}: {}/{} ({})",
                        factor.label, factor.score, factor.max, value
                    ),
                    None => println!("- {}: {}/{}", factor.label, factor.score, factor.max),
                }
            }
            println!("Tip: {}", coaching_tip(&health));
        }
        Commands::Insights {
            jobs,
            activity,
            json,
        } => {
            let jobs = input::load_jobs(&jobs)?;
            let summary = load_summary(activity.as_deref(), &jobs)?;
            let insights = generate_insights(Some(&summary), Some(&jobs[..]), now);

            if json {
                return print_json(&insights);
            }

            if insights.is_empty() {
                println!("No insights yet. Keep tracking your search.");
                return Ok(());
            }

            for insight in insights.iter() {
                println!("- {}: {}", insight.title, insight.body);
                if let Some(action) = &insight.action {
                    println!("  -> {} ({})", action.label, action.anchor);
                }
            }
        }
        Commands::Companies { visits, jobs, json } => {
            let visits = input::load_visits(&visits)?;
            let jobs = match jobs {
                Some(path) => input::load_jobs(&path)?,
                None => Vec::new(),
            };
            let ranked = rank_companies(&visits, &jobs, now);

            if json {
                return print_json(&ranked);
            }

            if ranked.is_empty() {
                println!("No tracked company visits.");
                return Ok(());
            }

            println!("Tracked companies by signal:");
            for company in ranked.iter() {
                println!(
                    "- {} ({}, priority {}) across {} visits",
                    company.company_name,
                    company.signal.label,
                    company.signal.priority,
                    company.visits
                );
            }
        }
        Commands::Report {
            jobs,
            activity,
            visits,
            out,
        } => {
            let jobs = input::load_jobs(&jobs)?;
            let summary = load_summary(activity.as_deref(), &jobs)?;
            let visits = match visits {
                Some(path) => input::load_visits(&path)?,
                None => Vec::new(),
            };
            let snapshot = report::build_snapshot(&summary, &jobs, &visits, now);
            std::fs::write(&out, report::build_report(&snapshot))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
