//! Request-scoped orchestration: decode, sample, encode, analyze, and
//! optionally transcribe. Everything created here lives exactly as long as
//! one analysis.

use std::path::Path;

use tempfile::TempDir;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::prompt::{self, AnalysisStyle, Substyle};
use crate::sampler::{self, SamplingPolicy};
use crate::{ai, audio, capture, encode, request, transcript};

pub const DEFAULT_MAX_FRAMES: usize = 10;

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub style: AnalysisStyle,
    pub substyle: Option<Substyle>,
    pub max_frames: usize,
    pub policy: SamplingPolicy,
    pub transcribe: bool,
    pub caption_segments: usize,
}

impl AnalysisOptions {
    pub fn new(style: AnalysisStyle) -> Self {
        Self {
            style,
            substyle: None,
            max_frames: DEFAULT_MAX_FRAMES,
            policy: SamplingPolicy::Stride,
            transcribe: false,
            caption_segments: transcript::DEFAULT_SEGMENTS,
        }
    }
}

#[derive(Debug)]
pub struct VideoAnalysis {
    pub analysis: String,
    pub frames_sent: usize,
    pub frames_total: i64,
    pub transcript: Option<String>,
    pub captions: Option<String>,
}

pub async fn analyze_image(
    config: &ApiConfig,
    path: &Path,
    style: AnalysisStyle,
    substyle: Option<Substyle>,
) -> Result<String> {
    let instruction = prompt::select(style, substyle)?;
    let frame = capture::image_frame(path)?;
    info!(
        width = frame.width,
        height = frame.height,
        "analyzing image"
    );

    let attachment = encode::to_data_uri(&frame)?;
    let analysis_request = request::build(instruction, vec![attachment], request::ATTACHMENT_CEILING)?;
    ai::analyze(config, analysis_request).await
}

pub async fn analyze_video(
    config: &ApiConfig,
    path: &Path,
    options: &AnalysisOptions,
) -> Result<VideoAnalysis> {
    let instruction = prompt::select(options.style, options.substyle)?;

    let media_info = capture::probe(path)?;
    info!(
        total_frames = media_info.total_frames,
        duration_secs = media_info.duration_secs,
        "probed video"
    );

    let indices = sampler::sample(media_info.total_frames, options.max_frames, options.policy)?;
    let frames = capture::video_frames(path, &indices)?;
    if frames.is_empty() {
        return Err(Error::NoFrames);
    }

    let attachments = frames
        .iter()
        .map(encode::to_data_uri)
        .collect::<Result<Vec<_>>>()?;
    let frames_sent = attachments.len();
    let instruction = prompt::with_frame_note(instruction, frames_sent, media_info.total_frames);

    let analysis_request = request::build(instruction, attachments, options.max_frames)?;
    let analysis = ai::analyze(config, analysis_request).await?;

    let (transcript_text, captions) = if options.transcribe {
        // The scratch directory is removed when this binding drops, on every
        // exit path.
        let scratch = TempDir::new()?;
        let wav_path = scratch.path().join("audio.wav");
        audio::extract_wav(path, &wav_path)?;

        let text = ai::transcribe(config, &wav_path).await?;
        let segments =
            transcript::segment(&text, media_info.duration_secs, options.caption_segments)?;
        (Some(text), Some(transcript::to_vtt(&segments)))
    } else {
        (None, None)
    };

    Ok(VideoAnalysis {
        analysis,
        frames_sent,
        frames_total: media_info.total_frames,
        transcript: transcript_text,
        captions,
    })
}
