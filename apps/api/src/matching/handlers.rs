//! HTTP intake for matching runs: multipart upload in, table out.
//!
//! All matching logic lives below `run_matching`; these handlers only move
//! bytes into a run-scoped temp directory and shape the response.

use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tempfile::TempDir;

use crate::errors::AppError;
use crate::matching::matcher::{run_matching, SourceFile};
use crate::matching::report::{MatchRecord, RankingEntry, ResultTable};
use crate::matching::scoring::SimilarityScorer;
use crate::state::AppState;

/// Number of entries in each ranking list.
const TOP_N: usize = 5;

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub records: Vec<MatchRecord>,
    /// Top matches by semantic score, for the frontend's bar chart.
    pub top_semantic: Vec<RankingEntry>,
    /// Top matches by skill-overlap score.
    pub top_skill: Vec<RankingEntry>,
}

struct NamedBlob {
    name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadSet {
    resumes: Vec<NamedBlob>,
    jds: Vec<NamedBlob>,
}

/// POST /api/v1/match
/// Multipart form with repeated `resumes` and `jds` file parts.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let table = run_upload(state, multipart).await?;
    Ok(Json(MatchResponse {
        top_semantic: table.top_by_match_score(TOP_N),
        top_skill: table.top_by_skill_score(TOP_N),
        records: table.records,
    }))
}

/// POST /api/v1/match/csv
/// Same form as `/api/v1/match`; responds with the CSV export.
pub async fn handle_match_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let table = run_upload(state, multipart).await?;
    let csv = table.to_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"matches.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

async fn run_upload(state: AppState, multipart: Multipart) -> Result<ResultTable, AppError> {
    let uploads = collect_uploads(multipart).await?;
    tracing::info!(
        "matching {} resumes against {} job descriptions",
        uploads.resumes.len(),
        uploads.jds.len()
    );

    // The run is synchronous and blocking (file IO + model inference), so it
    // leaves the async runtime for its duration.
    let scorer = Arc::clone(&state.scorer);
    tokio::task::spawn_blocking(move || execute_run(scorer.as_ref(), &uploads))
        .await
        .map_err(|e| AppError::Internal(anyhow!("matching task failed: {e}")))?
}

async fn collect_uploads(mut multipart: Multipart) -> Result<UploadSet, AppError> {
    let mut uploads = UploadSet::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        let Some(part) = field.name().map(str::to_string) else {
            continue;
        };
        if part != "resumes" && part != "jds" {
            continue; // unknown parts are ignored
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Upload(format!("file part '{part}' is missing a filename")))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let blob = NamedBlob { name, bytes };
        if part == "resumes" {
            uploads.resumes.push(blob);
        } else {
            uploads.jds.push(blob);
        }
    }

    Ok(uploads)
}

/// Runs one matching batch over files written into a run-scoped temp
/// directory. The directory is removed when `dir` drops, on success and
/// failure alike.
fn execute_run(
    scorer: &dyn SimilarityScorer,
    uploads: &UploadSet,
) -> Result<ResultTable, AppError> {
    let dir = tempfile::tempdir()
        .map_err(|e| AppError::Internal(anyhow!("failed to create scratch directory: {e}")))?;
    let resumes = write_blobs(&dir, "resumes", &uploads.resumes)?;
    let jds = write_blobs(&dir, "jds", &uploads.jds)?;
    run_matching(&resumes, &jds, scorer)
}

fn write_blobs(
    dir: &TempDir,
    subdir: &str,
    blobs: &[NamedBlob],
) -> Result<Vec<SourceFile>, AppError> {
    let root = dir.path().join(subdir);
    std::fs::create_dir_all(&root)
        .map_err(|e| AppError::Internal(anyhow!("failed to create {subdir} directory: {e}")))?;

    blobs
        .iter()
        .map(|blob| {
            // Keep only the final path component of the client-supplied name.
            let file_name = Path::new(&blob.name)
                .file_name()
                .ok_or_else(|| AppError::Upload(format!("invalid filename: {}", blob.name)))?;
            let path = root.join(file_name);
            std::fs::write(&path, &blob.bytes)
                .map_err(|e| AppError::Internal(anyhow!("failed to store {}: {e}", blob.name)))?;
            Ok(SourceFile {
                name: blob.name.clone(),
                path,
            })
        })
        .collect()
}
