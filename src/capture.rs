use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Once;

use ffmpeg_next::util::frame::video::Video;
use ffmpeg_next::{self as ffmpeg, codec, decoder, format, media, rescale, software};
use tracing::{debug, warn};

use crate::error::{Error, Result};

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        ffmpeg::init().unwrap();
    });
}

/// A decoded raster frame, RGB24, row-major with no stride padding.
/// Request-scoped; consumed by the encoder and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub total_frames: i64,
    pub duration_secs: f64,
}

pub fn probe(path: &Path) -> Result<MediaInfo> {
    let input = format::input(&path)?;
    let stream = input
        .streams()
        .best(media::Type::Video)
        .ok_or_else(|| Error::MediaDecode("no video stream in container".to_owned()))?;

    let mut duration_secs = input.duration() as f64 * f64::from(rescale::TIME_BASE);
    if duration_secs <= 0.0 {
        duration_secs = stream.duration() as f64 * f64::from(stream.time_base());
    }

    // Some containers do not record a frame count; estimate from the rate.
    let mut total_frames = stream.frames();
    if total_frames <= 0 {
        let rate = f64::from(stream.avg_frame_rate());
        if rate > 0.0 && duration_secs > 0.0 {
            total_frames = (duration_secs * rate).round() as i64;
        }
    }

    Ok(MediaInfo {
        total_frames,
        duration_secs,
    })
}

/// Decodes the frames at the given positions, in order. A frame that fails to
/// decode or scale at a wanted position is omitted rather than failing the
/// whole extraction.
pub fn video_frames(path: &Path, indices: &[i64]) -> Result<Vec<Frame>> {
    let wanted: BTreeSet<i64> = indices.iter().copied().collect();
    let Some(last_wanted) = wanted.iter().next_back().copied() else {
        return Ok(Vec::new());
    };

    let mut input = format::input(&path)?;
    let stream = input
        .streams()
        .best(media::Type::Video)
        .ok_or_else(|| Error::MediaDecode("no video stream in container".to_owned()))?;
    let stream_index = stream.index();
    let codec_params = stream.parameters();

    let mut video_decoder = codec::context::Context::from_parameters(codec_params)?
        .decoder()
        .video()?;

    let mut scaler = software::scaling::context::Context::get(
        video_decoder.format(),
        video_decoder.width(),
        video_decoder.height(),
        format::Pixel::RGB24,
        video_decoder.width(),
        video_decoder.height(),
        software::scaling::Flags::BILINEAR,
    )?;

    let position = std::cell::Cell::new(0i64);
    let mut frames = Vec::with_capacity(wanted.len());
    let mut receive_and_collect = |decoder: &mut decoder::Video| -> Result<bool> {
        let mut decoded = Video::empty();
        while decoder.receive_frame(&mut decoded).is_ok() {
            if wanted.contains(&position.get()) {
                let mut rgb = Video::empty();
                match scaler.run(&decoded, &mut rgb) {
                    Ok(()) => frames.push(packed_rgb(&rgb)),
                    Err(err) => {
                        warn!(position = position.get(), %err, "skipping frame that failed to scale")
                    }
                }
            }
            position.set(position.get() + 1);
            if position.get() > last_wanted {
                return Ok(true);
            }
        }
        Ok(false)
    };

    let mut done = false;
    for (stream, packet) in input.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(err) = video_decoder.send_packet(&packet) {
            warn!(position = position.get(), %err, "skipping packet that failed to decode");
            continue;
        }
        if receive_and_collect(&mut video_decoder)? {
            done = true;
            break;
        }
    }
    if !done {
        video_decoder.send_eof()?;
        receive_and_collect(&mut video_decoder)?;
    }

    debug!(
        requested = wanted.len(),
        decoded = frames.len(),
        "extracted video frames"
    );
    Ok(frames)
}

pub fn image_frame(path: &Path) -> Result<Frame> {
    let image = image::open(path)
        .map_err(|err| Error::MediaDecode(err.to_string()))?
        .to_rgb8();
    Ok(Frame {
        width: image.width(),
        height: image.height(),
        data: image.into_raw(),
    })
}

// Scaled frames carry per-row padding; copy row by row to a packed buffer.
fn packed_rgb(frame: &Video) -> Frame {
    let width = frame.width();
    let height = frame.height();
    let stride = frame.stride(0);
    let row = width as usize * 3;
    let source = frame.data(0);

    let mut data = Vec::with_capacity(row * height as usize);
    for y in 0..height as usize {
        let offset = y * stride;
        data.extend_from_slice(&source[offset..offset + row]);
    }

    Frame {
        width,
        height,
        data,
    }
}
