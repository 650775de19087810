use chrono::{DateTime, Utc};

use crate::clock::{parse_timestamp, whole_days_since};
use crate::models::{AgeBadge, AgeTier, BadgeColor};

/// Age assigned to records whose creation time cannot be read.
pub const UNKNOWN_AGE_DAYS: i64 = 999;

pub fn age_badge(created_at: Option<&str>, now: DateTime<Utc>) -> AgeBadge {
    let days = created_at
        .and_then(parse_timestamp)
        .map(|created| whole_days_since(created, now))
        .unwrap_or(UNKNOWN_AGE_DAYS);

    let tier = match days {
        d if d <= 7 => AgeTier::Fresh,
        d if d <= 21 => AgeTier::Aging,
        _ => AgeTier::Stale,
    };

    AgeBadge {
        tier,
        label: tier.label(),
        color: tier.color(),
        days,
    }
}

impl AgeTier {
    pub fn label(self) -> &'static str {
        match self {
            AgeTier::Fresh => "Fresh",
            AgeTier::Aging => "Aging",
            AgeTier::Stale => "Stale",
        }
    }

    pub fn color(self) -> BadgeColor {
        match self {
            AgeTier::Fresh => BadgeColor::Green,
            AgeTier::Aging => BadgeColor::Amber,
            AgeTier::Stale => BadgeColor::Red,
        }
    }
}
