use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::clock::{parse_timestamp, whole_days_since};
use crate::models::{BadgeColor, CompanySignal, CompanyVisit, EngagementTier, JobRecord, RankedCompany};
use crate::status::is_applied_stage;

/// Classifies engagement with a tracked company. Rules are checked in tier order
/// and the first match wins.
pub fn company_signal(
    visits: u32,
    has_applied: bool,
    last_visit: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CompanySignal {
    let days_since_visit = last_visit
        .map(|visited| whole_days_since(visited, now))
        .unwrap_or(0);

    let tier = if has_applied {
        EngagementTier::Applied
    } else if visits >= 3 && days_since_visit <= 7 {
        EngagementTier::HighInterest
    } else if days_since_visit <= 7 {
        EngagementTier::Active
    } else if days_since_visit <= 14 {
        EngagementTier::GoingCold
    } else {
        EngagementTier::Cold
    };

    tier.signal()
}

impl EngagementTier {
    pub fn label(self) -> &'static str {
        match self {
            EngagementTier::Applied => "Applied",
            EngagementTier::HighInterest => "High Interest",
            EngagementTier::Active => "Active",
            EngagementTier::GoingCold => "Going Cold",
            EngagementTier::Cold => "Cold",
        }
    }

    pub fn color(self) -> BadgeColor {
        match self {
            EngagementTier::Applied => BadgeColor::Green,
            EngagementTier::HighInterest => BadgeColor::Red,
            EngagementTier::Active => BadgeColor::Purple,
            EngagementTier::GoingCold => BadgeColor::Amber,
            EngagementTier::Cold => BadgeColor::Gray,
        }
    }

    /// 0 is reserved for companies already applied to.
    pub fn priority(self) -> u8 {
        match self {
            EngagementTier::Applied => 0,
            EngagementTier::HighInterest => 1,
            EngagementTier::Active => 2,
            EngagementTier::GoingCold => 3,
            EngagementTier::Cold => 4,
        }
    }

    pub fn signal(self) -> CompanySignal {
        CompanySignal {
            tier: self,
            label: self.label(),
            color: self.color(),
            priority: self.priority(),
        }
    }
}

impl CompanyVisit {
    /// `visit_count`, else 1.
    pub fn resolved_visits(&self) -> u32 {
        self.visit_count.unwrap_or(1)
    }

    /// `last_visited_at`, else `created_at`, else now. Unparsable values count as missing.
    pub fn resolved_last_visit(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_visited_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.created_at.as_deref().and_then(parse_timestamp))
            .unwrap_or(now)
    }

    pub fn signal(&self, has_applied: bool, now: DateTime<Utc>) -> CompanySignal {
        company_signal(
            self.resolved_visits(),
            has_applied,
            Some(self.resolved_last_visit(now)),
            now,
        )
    }
}

fn company_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Tracked companies ordered by signal priority, then by visit count.
pub fn rank_companies(
    visits: &[CompanyVisit],
    jobs: &[JobRecord],
    now: DateTime<Utc>,
) -> Vec<RankedCompany> {
    let applied: HashSet<String> = jobs
        .iter()
        .filter(|job| is_applied_stage(job.status))
        .map(|job| company_key(&job.company))
        .collect();

    let mut ranked: Vec<RankedCompany> = visits
        .iter()
        .map(|visit| RankedCompany {
            company_name: visit.company_name.clone(),
            visits: visit.resolved_visits(),
            signal: visit.signal(applied.contains(&company_key(&visit.company_name)), now),
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.signal
            .priority
            .cmp(&b.signal.priority)
            .then_with(|| b.visits.cmp(&a.visits))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;
    use crate::status::tests::job;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::days(days))
    }

    fn visit(name: &str, count: Option<u32>, last: Option<String>) -> CompanyVisit {
        CompanyVisit {
            company_name: name.to_string(),
            visit_count: count,
            last_visited_at: last,
            created_at: None,
        }
    }

    #[test]
    fn frequent_recent_visits_are_high_interest() {
        let signal = company_signal(3, false, days_ago(5), now());
        assert_eq!(signal.priority, 1);
        assert_eq!(signal.label, "High Interest");
        assert_eq!(signal.color, BadgeColor::Red);
    }

    #[test]
    fn applied_wins_regardless_of_activity() {
        for (visits, last) in [(0, days_ago(90)), (12, days_ago(1)), (1, None)] {
            let signal = company_signal(visits, true, last, now());
            assert_eq!(signal.tier, EngagementTier::Applied);
            assert_eq!(signal.priority, 0);
        }
    }

    #[test]
    fn recency_tiers() {
        assert_eq!(company_signal(1, false, days_ago(7), now()).tier, EngagementTier::Active);
        assert_eq!(company_signal(5, false, days_ago(8), now()).tier, EngagementTier::GoingCold);
        assert_eq!(company_signal(1, false, days_ago(14), now()).tier, EngagementTier::GoingCold);
        assert_eq!(company_signal(1, false, days_ago(15), now()).tier, EngagementTier::Cold);
        assert_eq!(company_signal(1, false, None, now()).tier, EngagementTier::Active);
    }

    #[test]
    fn visit_fields_resolve_in_order() {
        let mut entry = visit("Acme", None, Some("garbage".to_string()));
        entry.created_at = Some((now() - Duration::days(10)).to_rfc3339());
        assert_eq!(entry.resolved_visits(), 1);
        assert_eq!(entry.resolved_last_visit(now()), now() - Duration::days(10));

        entry.created_at = None;
        assert_eq!(entry.resolved_last_visit(now()), now());
    }

    #[test]
    fn ranking_puts_applied_first_then_busiest() {
        let recent = Some((now() - Duration::days(2)).to_rfc3339());
        let old = Some((now() - Duration::days(30)).to_rfc3339());
        let visits = vec![
            visit("Cold Co", Some(9), old),
            visit("Active A", Some(1), recent.clone()),
            visit("Active B", Some(2), recent.clone()),
            visit(" acme ", Some(1), recent.clone()),
            visit("Hot Co", Some(4), recent),
        ];
        let jobs = vec![
            job("ACME", Stage::Interview, None),
            job("Active A", Stage::Saved, None),
        ];

        let ranked = rank_companies(&visits, &jobs, now());
        let names: Vec<&str> = ranked.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec![" acme ", "Hot Co", "Active B", "Active A", "Cold Co"]);
        assert_eq!(ranked[0].signal.tier, EngagementTier::Applied);
    }
}
