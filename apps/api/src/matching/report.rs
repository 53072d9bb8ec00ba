//! Result table: per-pair match records, CSV export, ranking data.

use std::collections::BTreeSet;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// CSV header row, in output column order.
pub const CSV_HEADERS: [&str; 7] = [
    "Resume",
    "Job Description",
    "Match Score (%)",
    "Skill Match Score (%)",
    "Matched Skills",
    "Resume Skills",
    "JD Skills",
];

/// One résumé/job-description pair's combined scoring result.
///
/// Skill sets are `BTreeSet`s so comma-joined output and CSV export are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub resume: String,
    pub job_description: String,
    /// Semantic score, 0-100, two decimals.
    pub match_score: f64,
    /// |matched| / |jd skills| as a percentage; 0.0 when the JD has no
    /// recognized skills.
    pub skill_match_score: f64,
    pub matched_skills: BTreeSet<String>,
    pub resume_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
}

/// Ordered sequence of match records, one per (résumé, JD) pair,
/// résumé-major.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    pub records: Vec<MatchRecord>,
}

/// One bar of the top-5 ranking charts drawn by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub resume: String,
    pub job_description: String,
    pub score: f64,
}

impl ResultTable {
    /// Top `n` records by semantic score, highest first.
    pub fn top_by_match_score(&self, n: usize) -> Vec<RankingEntry> {
        self.ranked(n, |r| r.match_score)
    }

    /// Top `n` records by skill-overlap score, highest first.
    pub fn top_by_skill_score(&self, n: usize) -> Vec<RankingEntry> {
        self.ranked(n, |r| r.skill_match_score)
    }

    fn ranked(&self, n: usize, score: fn(&MatchRecord) -> f64) -> Vec<RankingEntry> {
        let mut sorted: Vec<&MatchRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| score(b).total_cmp(&score(a)));
        sorted
            .into_iter()
            .take(n)
            .map(|r| RankingEntry {
                resume: r.resume.clone(),
                job_description: r.job_description.clone(),
                score: score(r),
            })
            .collect()
    }

    /// Serializes the table to UTF-8 CSV: header row included, no index
    /// column, skill sets comma-joined.
    pub fn to_csv(&self) -> Result<String, AppError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for record in &self.records {
            let match_score = format!("{:.2}", record.match_score);
            let skill_score = format!("{:.2}", record.skill_match_score);
            let matched = join_skills(&record.matched_skills);
            let resume_skills = join_skills(&record.resume_skills);
            let jd_skills = join_skills(&record.jd_skills);
            writer.write_record([
                record.resume.as_str(),
                record.job_description.as_str(),
                match_score.as_str(),
                skill_score.as_str(),
                matched.as_str(),
                resume_skills.as_str(),
                jd_skills.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(anyhow!("CSV writer flush failed: {e}")))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(anyhow!(e)))
    }
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    skills.iter().cloned().collect::<Vec<_>>().join(", ")
}
