use std::path::Path;

use ffmpeg_next::util::frame::audio::Audio;
use ffmpeg_next::{channel_layout::ChannelLayout, codec, decoder, format, media, software};
use tracing::debug;

use crate::error::{Error, Result};

// 16 kHz mono s16 is what the transcription model expects.
const TARGET_RATE: u32 = 16_000;

/// Decodes the best audio stream and writes it as a WAV file, resampled to
/// 16 kHz mono. The output lives in the caller's request-scoped directory.
pub fn extract_wav(video_path: &Path, out_path: &Path) -> Result<()> {
    let mut input = format::input(&video_path)?;
    let stream = input
        .streams()
        .best(media::Type::Audio)
        .ok_or_else(|| Error::MediaDecode("no audio stream in container".to_owned()))?;
    let stream_index = stream.index();
    let codec_params = stream.parameters();

    let mut audio_decoder = codec::context::Context::from_parameters(codec_params)?
        .decoder()
        .audio()?;

    let in_layout = if audio_decoder.channel_layout().is_empty() {
        ChannelLayout::default(i32::from(audio_decoder.channels()))
    } else {
        audio_decoder.channel_layout()
    };

    let mut resampler = software::resampling::context::Context::get(
        audio_decoder.format(),
        in_layout,
        audio_decoder.rate(),
        format::Sample::I16(format::sample::Type::Packed),
        ChannelLayout::MONO,
        TARGET_RATE,
    )?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: TARGET_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(out_path, spec)
        .map_err(|err| Error::MediaDecode(err.to_string()))?;

    let mut write_samples = |resampled: &Audio| -> Result<()> {
        if resampled.samples() > 0 {
            for sample in resampled.plane::<i16>(0) {
                writer
                    .write_sample(*sample)
                    .map_err(|err| Error::MediaDecode(err.to_string()))?;
            }
        }
        Ok(())
    };

    let mut receive_and_resample = |decoder: &mut decoder::Audio| -> Result<()> {
        let mut decoded = Audio::empty();
        while decoder.receive_frame(&mut decoded).is_ok() {
            let mut resampled = Audio::empty();
            resampler.run(&decoded, &mut resampled)?;
            write_samples(&resampled)?;
        }
        Ok(())
    };

    for (stream, packet) in input.packets() {
        if stream.index() != stream_index {
            continue;
        }
        audio_decoder.send_packet(&packet)?;
        receive_and_resample(&mut audio_decoder)?;
    }
    audio_decoder.send_eof()?;
    receive_and_resample(&mut audio_decoder)?;

    // Drain whatever the resampler still buffers.
    loop {
        let mut resampled = Audio::empty();
        let delay = resampler.flush(&mut resampled)?;
        write_samples(&resampled)?;
        if delay.is_none() {
            break;
        }
    }

    let samples_written = writer.len();
    writer
        .finalize()
        .map_err(|err| Error::MediaDecode(err.to_string()))?;
    debug!(
        samples = samples_written,
        path = %out_path.display(),
        "extracted audio track"
    );
    Ok(())
}
