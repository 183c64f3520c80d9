//! FFprobe stream inspection.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};
use mcrop_models::PixelDimensions;

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a media file for the native pixel dimensions of its primary visual
/// stream.
///
/// The primary stream is the first stream whose `codec_type` is `video` in
/// container order; still images expose their frame the same way. Fails with
/// [`MediaError::NoVisualStream`] when no such stream exists or it carries no
/// usable dimensions. Read-only; never touches the file contents beyond what
/// ffprobe reads.
pub async fn probe_dimensions(path: impl AsRef<Path>) -> MediaResult<PixelDimensions> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    select_visual_stream(&probe).ok_or_else(|| MediaError::NoVisualStream(path.to_path_buf()))
}

/// Pick the primary visual stream and extract its dimensions.
fn select_visual_stream(probe: &FfprobeOutput) -> Option<PixelDimensions> {
    let stream = probe.streams.iter().find(|s| s.codec_type == "video")?;
    match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(PixelDimensions::new(w, h)),
        _ => None,
    }
}
