use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::clock::{parse_date, parse_timestamp};
use crate::models::{DailyActivityCount, JobRecord, Summary};
use crate::status::is_applied_stage;

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Weekday with the highest total activity; ties go to the earliest day from Sunday.
pub fn peak_apply_day(by_day: &[DailyActivityCount]) -> Option<Weekday> {
    let mut buckets = [0u64; 7];

    for day in by_day {
        if day.count == 0 {
            continue;
        }
        let Some(date) = day.date.as_deref().and_then(parse_date) else {
            continue;
        };
        buckets[date.weekday().num_days_from_sunday() as usize] += u64::from(day.count);
    }

    let mut best = 0;
    for index in 1..buckets.len() {
        if buckets[index] > buckets[best] {
            best = index;
        }
    }

    if buckets[best] == 0 {
        None
    } else {
        Some(SUNDAY_FIRST[best])
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl Summary {
    /// Builds the per-day series from applied-stage records, keyed by creation date.
    pub fn from_jobs(jobs: &[JobRecord]) -> Summary {
        let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();

        for job in jobs.iter().filter(|job| is_applied_stage(job.status)) {
            let Some(created) = job.created_at.as_deref().and_then(parse_timestamp) else {
                continue;
            };
            *counts.entry(created.date_naive()).or_insert(0) += 1;
        }

        Summary {
            by_day: counts
                .into_iter()
                .map(|(date, count)| DailyActivityCount {
                    date: Some(date.format("%Y-%m-%d").to_string()),
                    count,
                })
                .collect(),
        }
    }
}
