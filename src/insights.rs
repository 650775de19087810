use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::activity::{peak_apply_day, weekday_name};
use crate::age::age_badge;
use crate::models::{Insight, InsightAction, InsightKind, JobRecord, Stage, Summary};
use crate::status::StageCounts;
use crate::streak::calculate_streak;

pub const MAX_INSIGHTS: usize = 3;

const SAVED_JOBS_ANCHOR: &str = "#saved-jobs";

fn insight(kind: InsightKind, title: String, body: String) -> Insight {
    Insight {
        kind,
        title,
        body,
        action: None,
    }
}

fn saved_jobs_action(label: &str) -> Option<InsightAction> {
    Some(InsightAction {
        label: label.to_string(),
        anchor: SAVED_JOBS_ANCHOR.to_string(),
    })
}

/// Runs every coaching rule in a fixed order and keeps the first three hits.
///
/// Rules are not ranked by severity; a later rule that fires is dropped once
/// three earlier ones have.
pub fn generate_insights(
    summary: Option<&Summary>,
    jobs: Option<&[JobRecord]>,
    now: DateTime<Utc>,
) -> Vec<Insight> {
    let by_day = summary.map(|s| s.by_day.as_slice()).unwrap_or_default();
    let jobs = jobs.unwrap_or_default();

    let counts = StageCounts::tally(jobs);
    let streak = calculate_streak(by_day, now);
    let peak = peak_apply_day(by_day);
    let conversion = counts.conversion_ratio();
    let response = counts.response_ratio();
    let stale_saved = jobs
        .iter()
        .filter(|job| job.status == Stage::Saved)
        .filter(|job| age_badge(job.created_at.as_deref(), now).days > 21)
        .count();

    let mut insights = Vec::new();

    if streak >= 3 {
        insights.push(insight(
            InsightKind::Streak,
            format!("{streak}-day streak"),
            format!("You've applied {streak} days in a row. Keep the momentum going!"),
        ));
    }

    match peak {
        Some(day) if day == now.weekday() => insights.push(insight(
            InsightKind::Pattern,
            "Today is your best day".to_string(),
            format!(
                "You send more applications on {}s than any other day. Make it count.",
                weekday_name(day)
            ),
        )),
        Some(day) => insights.push(insight(
            InsightKind::Pattern,
            format!("{}s are your peak day", weekday_name(day)),
            format!(
                "Historically you apply most on {}s. Plan your heavier sessions around it.",
                weekday_name(day)
            ),
        )),
        None => {}
    }

    if conversion < 0.5 && counts.saved >= 3 {
        let mut entry = insight(
            InsightKind::Coaching,
            "Saved jobs are piling up".to_string(),
            format!(
                "You have {} saved jobs and have applied to {}% of what you track. Pick a few and send them out.",
                counts.saved,
                (conversion * 100.0).round()
            ),
        );
        entry.action = saved_jobs_action("Review saved jobs");
        insights.push(entry);
    }

    if stale_saved > 0 {
        let noun = if stale_saved == 1 { "job has" } else { "jobs have" };
        let mut entry = insight(
            InsightKind::Warning,
            "Stale saved jobs".to_string(),
            format!(
                "{stale_saved} saved {noun} been sitting for over three weeks. Apply or clear them out."
            ),
        );
        entry.action = saved_jobs_action("Clean up saved jobs");
        insights.push(entry);
    }

    if counts.applied >= 5 && response < 0.1 {
        insights.push(insight(
            InsightKind::Coaching,
            "Low response rate".to_string(),
            format!(
                "Only {}% of your applications have reached an interview. Try tailoring your resume to each posting.",
                (response * 100.0).round()
            ),
        ));
    }

    if response >= 0.2 && counts.applied >= 3 {
        insights.push(insight(
            InsightKind::Positive,
            "Strong response rate".to_string(),
            format!(
                "{}% of your applications are turning into interviews. Whatever you're doing, it's working.",
                (response * 100.0).round()
            ),
        ));
    }

    if insights.len() > MAX_INSIGHTS {
        debug!(
            generated = insights.len(),
            kept = MAX_INSIGHTS,
            "truncating insights"
        );
        insights.truncate(MAX_INSIGHTS);
    }
    insights
}
