//! Transform execution: one FFmpeg invocation per plan.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::plan::{AudioPolicy, TransformPlan};

/// Execute a transform plan against a source file, writing `dest`.
///
/// The filter expression and frame/audio policy are passed to FFmpeg
/// verbatim; the child's completion signal is the sole success determinant.
/// On failure a partially-written `dest` may remain — the caller's cleanup
/// path removes it.
pub async fn run_transform(
    source: impl AsRef<Path>,
    plan: &TransformPlan,
    dest: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !source.exists() {
        return Err(MediaError::FileNotFound(source.to_path_buf()));
    }

    let mut cmd = FfmpegCommand::new(source, dest).video_filter(&plan.filter);
    if plan.single_frame {
        cmd = cmd.single_frame();
    }
    if plan.audio == AudioPolicy::Passthrough {
        cmd = cmd.audio_codec("copy");
    }

    info!(
        kind = %plan.kind,
        filter = %plan.filter,
        dest = %dest.display(),
        "running transform"
    );

    FfmpegRunner::new().with_timeout(timeout_secs).run(&cmd).await
}
