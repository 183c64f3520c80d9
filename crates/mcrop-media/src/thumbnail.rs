//! Poster frame extraction for video previews.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract the first frame of a video as a full-size JPEG.
///
/// The preview is served at native resolution so the client can report the
/// rendered dimensions it scales the frame to.
pub async fn extract_poster_frame(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(video_path, output_path.as_ref())
        .seek(0.0)
        .single_frame()
        .log_level("error");

    FfmpegRunner::new().run(&cmd).await
}
