//! Upload preview: accept a file, return a representative frame and the
//! probed source dimensions.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use mcrop_media::{extract_poster_frame, probe_dimensions};
use mcrop_models::{kind::extension_of, MediaKind};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// URL of the preview frame under /thumbs
    pub thumb: String,
    /// Probed source width
    pub width: u32,
    /// Probed source height
    pub height: u32,
    /// Opaque path the client echoes back to /process
    pub upload_path: String,
    pub original_name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// POST /preview — multipart upload with a `file` field.
///
/// Images are copied into the thumbs directory as-is (the source is its own
/// preview); videos get their first frame extracted. Any failure after the
/// upload is persisted deletes it again — no orphaned temp files.
pub async fn preview(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PreviewResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let original_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            file = Some((original_name, bytes.to_vec()));
            break;
        }
    }

    let (original_name, bytes) =
        file.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let kind = MediaKind::from_filename(&original_name)
        .ok_or_else(|| ApiError::bad_request(format!("Unsupported file type: {original_name}")))?;

    let upload = state.store.save_upload(&bytes).await?;

    match build_preview(&state, &upload, &original_name, kind).await {
        Ok(resp) => {
            info!(kind = %kind, name = %original_name, "preview ready");
            Ok(Json(resp))
        }
        Err(e) => {
            state.store.discard_upload(&upload).await;
            Err(e)
        }
    }
}

async fn build_preview(
    state: &AppState,
    upload: &Path,
    original_name: &str,
    kind: MediaKind,
) -> ApiResult<PreviewResponse> {
    let dims = probe_dimensions(upload).await?;

    let thumb = if kind.is_image() {
        let ext = extension_of(original_name).unwrap_or_else(|| ".jpg".to_string());
        state.store.copy_to_thumbnail(upload, &ext).await?
    } else {
        let slot = state.store.allocate_thumbnail(".jpg");
        extract_poster_frame(upload, &slot.path).await?;
        slot
    };

    Ok(PreviewResponse {
        thumb: format!("/thumbs/{}", thumb.filename),
        width: dims.width,
        height: dims.height,
        upload_path: upload.display().to_string(),
        original_name: original_name.to_string(),
        kind,
    })
}
