//! The matching run: résumés × job descriptions → result table.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::matching::extract::extract_text_from_file;
use crate::matching::report::{MatchRecord, ResultTable};
use crate::matching::scoring::{round2, SimilarityScorer};
use crate::matching::skills::extract_skills;

/// An uploaded file written out for the duration of one run. `name` is the
/// original filename as reported to the client.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

struct PreparedDocument {
    name: String,
    text: String,
    skills: BTreeSet<String>,
}

/// Scores every résumé against every job description.
///
/// Each file is extracted and skill-scanned exactly once; records come out
/// résumé-major, JD-minor. The first extraction or scoring failure aborts
/// the whole run with the offending file named. No partial results.
pub fn run_matching(
    resumes: &[SourceFile],
    jds: &[SourceFile],
    scorer: &dyn SimilarityScorer,
) -> Result<ResultTable, AppError> {
    if resumes.is_empty() {
        return Err(AppError::EmptyInput("resumes"));
    }
    if jds.is_empty() {
        return Err(AppError::EmptyInput("job descriptions"));
    }

    let resumes = prepare_documents(resumes)?;
    let jds = prepare_documents(jds)?;

    let mut records = Vec::with_capacity(resumes.len() * jds.len());
    for resume in &resumes {
        for jd in &jds {
            let match_score = scorer.similarity(&resume.text, &jd.text)?;

            let matched_skills: BTreeSet<String> = resume
                .skills
                .intersection(&jd.skills)
                .cloned()
                .collect();
            let skill_match_score = if jd.skills.is_empty() {
                0.0
            } else {
                round2(matched_skills.len() as f64 / jd.skills.len() as f64 * 100.0)
            };

            records.push(MatchRecord {
                resume: resume.name.clone(),
                job_description: jd.name.clone(),
                match_score,
                skill_match_score,
                matched_skills,
                resume_skills: resume.skills.clone(),
                jd_skills: jd.skills.clone(),
            });
        }
    }

    Ok(ResultTable { records })
}

fn prepare_documents(sources: &[SourceFile]) -> Result<Vec<PreparedDocument>, AppError> {
    sources
        .iter()
        .map(|source| {
            let text = extract_text_from_file(&source.path)?;
            let skills = extract_skills(&text);
            Ok(PreparedDocument {
                name: source.name.clone(),
                text,
                skills,
            })
        })
        .collect()
}
