use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::{peak_apply_day, weekday_name};
use crate::age::age_badge;
use crate::health::{career_health, coaching_tip};
use crate::insights::generate_insights;
use crate::models::{
    AgeBadge, CareerHealthScore, CompanyVisit, Insight, JobRecord, RankedCompany, Stage, Summary,
};
use crate::signals::rank_companies;

#[derive(Debug, Clone, Serialize)]
pub struct SavedJobAge {
    pub company: String,
    pub position: String,
    pub badge: AgeBadge,
}

/// Everything the dashboard renders, computed against one reference instant.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub health: CareerHealthScore,
    pub tip: &'static str,
    pub peak_day: Option<&'static str>,
    pub insights: Vec<Insight>,
    pub companies: Vec<RankedCompany>,
    pub saved_jobs: Vec<SavedJobAge>,
}

pub fn build_snapshot(
    summary: &Summary,
    jobs: &[JobRecord],
    visits: &[CompanyVisit],
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let health = career_health(Some(summary), Some(jobs), now);
    let tip = coaching_tip(&health);

    let mut saved_jobs: Vec<SavedJobAge> = jobs
        .iter()
        .filter(|job| job.status == Stage::Saved)
        .map(|job| SavedJobAge {
            company: job.company.clone(),
            position: job.position.clone(),
            badge: age_badge(job.created_at.as_deref(), now),
        })
        .collect();
    saved_jobs.sort_by(|a, b| b.badge.days.cmp(&a.badge.days));

    DashboardSnapshot {
        generated_at: now,
        health,
        tip,
        peak_day: peak_apply_day(&summary.by_day).map(weekday_name),
        insights: generate_insights(Some(summary), Some(jobs), now),
        companies: rank_companies(visits, jobs, now),
        saved_jobs,
    }
}

pub fn build_report(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Job Search Digest");
    let _ = writeln!(
        output,
        "Generated {}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Career Health");

    if snapshot.health.breakdown.is_empty() {
        let _ = writeln!(output, "Not enough data to score yet.");
    } else {
        let _ = writeln!(
            output,
            "Score {}/100 with a {}-day streak.",
            snapshot.health.score, snapshot.health.streak
        );
        for factor in snapshot.health.breakdown.values() {
            match &factor.value {
                Some(value) => {
                    let _ = writeln!(
                        output,
                        "- {}: {}/{} ({})",
                        factor.label, factor.score, factor.max, value
                    );
                }
                None => {
                    let _ = writeln!(output, "- {}: {}/{}", factor.label, factor.score, factor.max);
                }
            }
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "Tip: {}", snapshot.tip);

    if let Some(day) = snapshot.peak_day {
        let _ = writeln!(output);
        let _ = writeln!(output, "Peak application day: {day}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");

    if snapshot.insights.is_empty() {
        let _ = writeln!(output, "No insights yet. Keep tracking your search.");
    } else {
        for insight in snapshot.insights.iter() {
            let _ = writeln!(output, "- **{}**: {}", insight.title, insight.body);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Company Signals");

    if snapshot.companies.is_empty() {
        let _ = writeln!(output, "No tracked company visits.");
    } else {
        for company in snapshot.companies.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}) across {} visits",
                company.company_name, company.signal.label, company.visits
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Saved Jobs");

    if snapshot.saved_jobs.is_empty() {
        let _ = writeln!(output, "No saved jobs waiting.");
    } else {
        for saved in snapshot.saved_jobs.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} at {}: {} ({} days)",
                saved.position, saved.company, saved.badge.label, saved.badge.days
            );
        }
    }

    output
}
