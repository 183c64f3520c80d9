//! Crop processing: Probe -> Mapper -> Planner -> Executor -> Store.

use std::path::Path;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use mcrop_media::{map_crop, probe_dimensions, run_transform, TransformPlan};
use mcrop_models::{
    kind::{extension_of, IMAGE_EXTS},
    CropRequest, MediaKind,
};
use mcrop_storage::StorageError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// The path /preview handed out
    pub upload_path: String,
    pub original_name: Option<String>,
    #[serde(flatten)]
    pub crop: CropRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub url: String,
    pub original_url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// POST /process — map the client crop into source space and run it.
///
/// Any failure deletes the consumed upload (and a partial output, if the
/// transform started) before the error surfaces. Errors are terminal for the
/// request; nothing is retried.
pub async fn process(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    let upload = match state.store.resolve_upload(&req.upload_path).await {
        Ok(path) => path,
        Err(StorageError::NotFound(_)) | Err(StorageError::InvalidName(_)) => {
            return Err(ApiError::bad_request("Upload not found. Please re-upload."));
        }
        Err(e) => return Err(e.into()),
    };

    match run_pipeline(&state, &upload, &req).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            state.store.discard_upload(&upload).await;
            Err(e)
        }
    }
}

async fn run_pipeline(
    state: &AppState,
    upload: &Path,
    req: &ProcessRequest,
) -> ApiResult<ProcessResponse> {
    let ext = req
        .original_name
        .as_deref()
        .and_then(extension_of)
        .unwrap_or_else(|| ".mp4".to_string());
    let kind = if IMAGE_EXTS.contains(&ext.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Video
    };

    // The probe is skipped when the browser reported natural dimensions;
    // those already reflect EXIF orientation and win over stream metadata.
    let probed = if req.crop.reported_source().is_some() {
        None
    } else {
        Some(probe_dimensions(upload).await?)
    };

    let mapped = map_crop(&req.crop, probed)?;
    let plan = TransformPlan::build(kind, &mapped, &ext);

    let pending = state.store.allocate_output(&plan.output_ext);
    if let Err(e) = run_transform(upload, &plan, &pending.path, state.config.ffmpeg_timeout_secs).await
    {
        state.store.discard_output(&pending).await;
        return Err(e.into());
    }

    let artifact = state
        .store
        .finalize_output(pending, upload, &ext, kind)
        .await?;

    info!(
        kind = %artifact.kind,
        filename = %artifact.filename,
        rect = ?mapped.rect,
        "processed"
    );

    Ok(ProcessResponse {
        url: format!("/output/{}", artifact.filename),
        original_url: format!("/output/{}", artifact.original_filename),
        filename: artifact.filename,
        kind: artifact.kind,
    })
}
