use crate::models::{JobRecord, Stage};

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Saved,
        Stage::Applied,
        Stage::Interview,
        Stage::Offer,
        Stage::Closed,
    ];

    /// Unknown or missing statuses fall back to `Saved`.
    pub fn parse(raw: Option<&str>) -> Stage {
        let Some(raw) = raw else {
            return Stage::Saved;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "applied" => Stage::Applied,
            "interview" => Stage::Interview,
            "offer" => Stage::Offer,
            "closed" => Stage::Closed,
            _ => Stage::Saved,
        }
    }
}

impl From<Option<String>> for Stage {
    fn from(raw: Option<String>) -> Self {
        Stage::parse(raw.as_deref())
    }
}

pub fn is_applied_stage(stage: Stage) -> bool {
    matches!(
        stage,
        Stage::Applied | Stage::Interview | Stage::Offer | Stage::Closed
    )
}

/// Per-stage totals over a set of job records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub saved: usize,
    /// Every record past `Saved`, including interviews, offers and closed ones.
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub closed: usize,
}

impl StageCounts {
    pub fn tally(jobs: &[JobRecord]) -> Self {
        let mut counts = StageCounts::default();

        for job in jobs {
            if is_applied_stage(job.status) {
                counts.applied += 1;
            }
            match job.status {
                Stage::Saved => counts.saved += 1,
                Stage::Interview => counts.interview += 1,
                Stage::Offer => counts.offer += 1,
                Stage::Closed => counts.closed += 1,
                Stage::Applied => {}
            }
        }

        counts
    }

    /// applied / (saved + applied), 0 when nothing is tracked.
    pub fn conversion_ratio(&self) -> f64 {
        let denominator = self.saved + self.applied;
        if denominator == 0 {
            0.0
        } else {
            self.applied as f64 / denominator as f64
        }
    }

    /// interview / applied, 0 before the first application.
    pub fn response_ratio(&self) -> f64 {
        if self.applied == 0 {
            0.0
        } else {
            self.interview as f64 / self.applied as f64
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use uuid::Uuid;

    pub(crate) fn job(company: &str, status: Stage, created_at: Option<&str>) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            company: company.to_string(),
            position: "Backend Engineer".to_string(),
            status,
            created_at: created_at.map(str::to_string),
            url: None,
            location: None,
        }
    }

    #[test]
    fn applied_stage_excludes_saved_only() {
        assert!(!is_applied_stage(Stage::Saved));
        for stage in &Stage::ORDER[1..] {
            assert!(is_applied_stage(*stage), "{stage:?}");
        }
    }

    #[test]
    fn unknown_statuses_read_as_saved() {
        assert_eq!(Stage::parse(None), Stage::Saved);
        assert_eq!(Stage::parse(Some("ghosted")), Stage::Saved);
        assert_eq!(Stage::parse(Some(" Interview ")), Stage::Interview);
        assert_eq!(Stage::from(Some("OFFER".to_string())), Stage::Offer);
    }

    #[test]
    fn stage_deserializes_leniently() {
        let stage: Stage = serde_json::from_str("\"wishlist\"").unwrap();
        assert_eq!(stage, Stage::Saved);
        let stage: Stage = serde_json::from_str("null").unwrap();
        assert_eq!(stage, Stage::Saved);
        let stage: Stage = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(stage, Stage::Closed);
        assert_eq!(serde_json::to_string(&Stage::Interview).unwrap(), "\"interview\"");
    }

    #[test]
    fn tally_counts_each_stage() {
        let jobs = vec![
            job("Acme", Stage::Saved, None),
            job("Acme", Stage::Applied, None),
            job("Globex", Stage::Interview, None),
            job("Initech", Stage::Offer, None),
            job("Umbrella", Stage::Closed, None),
        ];
        let counts = StageCounts::tally(&jobs);
        assert_eq!(
            counts,
            StageCounts {
                saved: 1,
                applied: 4,
                interview: 1,
                offer: 1,
                closed: 1,
            }
        );
        assert!((counts.conversion_ratio() - 0.8).abs() < 1e-9);
        assert!((counts.response_ratio() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ratios_are_zero_without_records() {
        let counts = StageCounts::tally(&[]);
        assert_eq!(counts.conversion_ratio(), 0.0);
        assert_eq!(counts.response_ratio(), 0.0);
    }
}
