use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of a job record in the application pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Stage {
    #[default]
    Saved,
    Applied,
    Interview,
    Offer,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub status: Stage,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivityCount {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyVisit {
    pub company_name: String,
    #[serde(default)]
    pub visit_count: Option<u32>,
    #[serde(default)]
    pub last_visited_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Aggregated activity the dashboard hands to the scorer and insight generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub by_day: Vec<DailyActivityCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Red,
    Purple,
    Amber,
    Gray,
}

/// Career health factors, declared in scoring-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Volume,
    Streak,
    Diversity,
    Conversion,
    Response,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub score: u32,
    pub max: u32,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CareerHealthScore {
    pub score: u32,
    pub breakdown: BTreeMap<Factor, FactorScore>,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTier {
    Applied,
    HighInterest,
    Active,
    GoingCold,
    Cold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySignal {
    pub tier: EngagementTier,
    pub label: &'static str,
    pub color: BadgeColor,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCompany {
    pub company_name: String,
    pub visits: u32,
    pub signal: CompanySignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeTier {
    Fresh,
    Aging,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBadge {
    pub tier: AgeTier,
    pub label: &'static str,
    pub color: BadgeColor,
    pub days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Streak,
    Pattern,
    Coaching,
    Warning,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightAction {
    pub label: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<InsightAction>,
}
