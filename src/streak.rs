use chrono::{DateTime, Utc};
use tracing::debug;

use crate::clock::parse_date;
use crate::models::DailyActivityCount;

/// Length of the run of active days ending today.
///
/// Days are walked newest first. An active day within one day of the cursor
/// extends the run and moves the cursor onto it. A zero-count day is skipped
/// without moving the cursor, so the next active day is still measured from the
/// last active one. Any other active day ends the run.
pub fn calculate_streak(by_day: &[DailyActivityCount], now: DateTime<Utc>) -> u32 {
    let mut days: Vec<&DailyActivityCount> = by_day.iter().collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));

    let mut cursor = now.date_naive();
    let mut streak = 0;

    for day in days {
        let Some(date) = day.date.as_deref().and_then(parse_date) else {
            continue;
        };

        let gap = (cursor - date).num_days();
        if gap <= 1 && day.count > 0 {
            streak += 1;
            cursor = date;
        } else if day.count == 0 {
            continue;
        } else {
            debug!(%date, gap, streak, "application streak broken");
            break;
        }
    }

    streak
}
