//! Career health: a 0-100 composite of five weighted, capped factors.
//!
//! Each factor contributes `min(raw / target, 1) * weight`. The total is the
//! sum of the unrounded contributions, rounded once and clamped to [0, 100].

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::{CareerHealthScore, Factor, FactorScore, JobRecord, Summary};
use crate::status::{is_applied_stage, StageCounts};
use crate::streak::calculate_streak;

const GENERIC_TIP: &str = "You're doing great across the board. Keep up the great work!";

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Factor::Volume => "Applications",
            Factor::Streak => "Streak",
            Factor::Diversity => "Companies",
            Factor::Conversion => "Conversion",
            Factor::Response => "Response Rate",
        }
    }

    /// Raw value at which the factor earns its full weight.
    pub fn target(self) -> f64 {
        match self {
            Factor::Volume => 30.0,
            Factor::Streak => 7.0,
            Factor::Diversity => 10.0,
            Factor::Conversion => 0.7,
            Factor::Response => 0.2,
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Factor::Volume => 20,
            Factor::Streak => 15,
            Factor::Diversity => 15,
            Factor::Conversion => 25,
            Factor::Response => 25,
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            Factor::Volume => {
                "Volume is your biggest lever. Aim for a few more applications each week."
            }
            Factor::Streak => {
                "Consistency matters. Try sending at least one application every day."
            }
            Factor::Diversity => {
                "Spread your search. Apply to a wider range of companies to improve your odds."
            }
            Factor::Conversion => {
                "You have saved jobs waiting. Turn a few of them into applications this week."
            }
            Factor::Response => {
                "Responses are low. Tailor your resume and cover letter to each role."
            }
        }
    }

    /// Weighted contribution of a raw metric, capped at the factor's weight.
    pub fn contribution(self, raw: f64) -> f64 {
        (raw / self.target()).min(1.0) * f64::from(self.weight())
    }
}

fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round())
}

fn distinct_applied_companies(jobs: &[JobRecord]) -> usize {
    jobs.iter()
        .filter(|job| is_applied_stage(job.status))
        .map(|job| job.company.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

/// Scores the search. Missing activity or job data yields an empty score.
pub fn career_health(
    summary: Option<&Summary>,
    jobs: Option<&[JobRecord]>,
    now: DateTime<Utc>,
) -> CareerHealthScore {
    let (Some(summary), Some(jobs)) = (summary, jobs) else {
        return CareerHealthScore::default();
    };

    let counts = StageCounts::tally(jobs);
    let streak = calculate_streak(&summary.by_day, now);
    let conversion = counts.conversion_ratio();
    let response = counts.response_ratio();

    let raw = [
        (Factor::Volume, counts.applied as f64, None),
        (Factor::Streak, f64::from(streak), None),
        (
            Factor::Diversity,
            distinct_applied_companies(jobs) as f64,
            None,
        ),
        (Factor::Conversion, conversion, Some(percent(conversion))),
        (Factor::Response, response, Some(percent(response))),
    ];

    let mut total = 0.0;
    let mut breakdown = BTreeMap::new();
    for (factor, value, formatted) in raw {
        let contribution = factor.contribution(value);
        total += contribution;
        breakdown.insert(
            factor,
            FactorScore {
                score: contribution.round() as u32,
                max: factor.weight(),
                label: factor.label(),
                value: formatted,
            },
        );
    }

    CareerHealthScore {
        score: total.round().clamp(0.0, 100.0) as u32,
        breakdown,
        streak,
    }
}

/// Tip for the weakest factor. Ties keep the factor listed first.
pub fn coaching_tip(health: &CareerHealthScore) -> &'static str {
    let mut weakest: Option<(Factor, f64)> = None;

    for (factor, entry) in &health.breakdown {
        let ratio = f64::from(entry.score) / f64::from(entry.max);
        match weakest {
            Some((_, lowest)) if ratio >= lowest => {}
            _ => weakest = Some((*factor, ratio)),
        }
    }

    weakest.map_or(GENERIC_TIP, |(factor, _)| factor.tip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;
    use crate::status::tests::job;
    use crate::streak::tests::day;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn missing_inputs_score_zero() {
        let jobs = vec![job("Acme", Stage::Applied, None)];
        for health in [
            career_health(None, Some(jobs.as_slice()), now()),
            career_health(Some(&Summary::default()), None, now()),
            career_health(None, None, now()),
        ] {
            assert_eq!(health.score, 0);
            assert!(health.breakdown.is_empty());
            assert_eq!(health.streak, 0);
        }
    }

    #[test]
    fn thirty_applications_across_ten_companies_score_sixty() {
        let jobs: Vec<_> = (0..30)
            .map(|i| job(&format!("Company {}", i % 10), Stage::Applied, None))
            .collect();
        let health = career_health(Some(&Summary::default()), Some(jobs.as_slice()), now());

        let scores: Vec<u32> = health.breakdown.values().map(|f| f.score).collect();
        assert_eq!(scores, vec![20, 0, 15, 25, 0]);
        assert_eq!(health.score, 60);
        assert_eq!(health.streak, 0);
        assert_eq!(
            health.breakdown[&Factor::Conversion].value.as_deref(),
            Some("100%")
        );
        assert_eq!(health.breakdown[&Factor::Response].value.as_deref(), Some("0%"));
        assert_eq!(health.breakdown[&Factor::Volume].value, None);
    }

    #[test]
    fn total_sums_unrounded_contributions() {
        // 1 applied of 3 tracked: volume 0.67, conversion 11.90; 1 interview: response 25.
        let jobs = vec![
            job("Acme", Stage::Interview, None),
            job("Globex", Stage::Saved, None),
            job("Initech", Stage::Saved, None),
        ];
        let summary = Summary {
            by_day: vec![day("2024-01-10", 1)],
        };
        let health = career_health(Some(&summary), Some(jobs.as_slice()), now());

        // streak 1 -> 2.14, diversity 1 -> 1.5
        assert_eq!(health.streak, 1);
        assert_eq!(health.breakdown[&Factor::Volume].score, 1);
        assert_eq!(health.breakdown[&Factor::Streak].score, 2);
        assert_eq!(health.breakdown[&Factor::Diversity].score, 2);
        assert_eq!(health.breakdown[&Factor::Conversion].score, 12);
        assert_eq!(health.breakdown[&Factor::Response].score, 25);
        assert_eq!(health.score, 41);
        assert_eq!(
            health.breakdown[&Factor::Conversion].value.as_deref(),
            Some("33%")
        );
    }

    #[test]
    fn diversity_ignores_case_and_saved_jobs() {
        let jobs = vec![
            job("Acme", Stage::Applied, None),
            job("ACME ", Stage::Offer, None),
            job("Globex", Stage::Saved, None),
        ];
        assert_eq!(distinct_applied_companies(&jobs), 1);
    }

    #[test]
    fn factor_scores_never_exceed_their_max() {
        let jobs: Vec<_> = (0..80)
            .map(|i| job(&format!("Co {i}"), Stage::Interview, None))
            .collect();
        let summary = Summary {
            by_day: (1..=20)
                .map(|d| day(&format!("2024-01-{d:02}"), 3))
                .collect(),
        };
        let health = career_health(Some(&summary), Some(jobs.as_slice()), now());
        for entry in health.breakdown.values() {
            assert!(entry.score <= entry.max);
        }
        assert_eq!(health.score, 100);
    }

    #[test]
    fn tip_targets_weakest_factor() {
        let jobs: Vec<_> = (0..30)
            .map(|i| job(&format!("Company {}", i % 10), Stage::Applied, None))
            .collect();
        let health = career_health(Some(&Summary::default()), Some(jobs.as_slice()), now());
        // streak and response both sit at zero; streak is listed first
        assert_eq!(coaching_tip(&health), Factor::Streak.tip());
    }

    #[test]
    fn empty_breakdown_gets_generic_tip() {
        assert_eq!(coaching_tip(&CareerHealthScore::default()), GENERIC_TIP);
    }
}
