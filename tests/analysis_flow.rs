//! Drives the sample -> encode -> build chain on synthetic frames, the way
//! the video pipeline composes it, without touching a real container or the
//! network.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageContent,
    ChatCompletionRequestUserMessageContentPart,
};
use lensai::capture::Frame;
use lensai::sampler::SamplingPolicy;
use lensai::{encode, prompt, request, sampler, transcript};

fn synthetic_frame(seed: u8) -> Frame {
    let data: Vec<u8> = (0..12).map(|i| seed.wrapping_add(i)).collect();
    Frame {
        width: 2,
        height: 2,
        data,
    }
}

#[test]
fn three_second_video_at_thirty_fps() {
    // 90 frames, budget of 5: evenly spaced positions over the whole clip.
    let indices = sampler::sample(90, 5, SamplingPolicy::Stride).unwrap();
    assert_eq!(indices, vec![0, 18, 36, 54, 72]);

    let frames: Vec<Frame> = indices
        .iter()
        .map(|&index| synthetic_frame(index as u8))
        .collect();
    let attachments: Vec<String> = frames
        .iter()
        .map(|frame| encode::to_data_uri(frame).unwrap())
        .collect();
    assert!(attachments
        .iter()
        .all(|uri| uri.starts_with("data:image/png;base64,")));

    let instruction = prompt::select(prompt::AnalysisStyle::Professional, None).unwrap();
    let instruction = prompt::with_frame_note(instruction, attachments.len(), 90);
    assert!(instruction.ends_with("(analyzing 5 of 90 frames)"));

    let analysis_request = request::build(instruction, attachments.clone(), 10).unwrap();
    assert_eq!(analysis_request.attachments, attachments);

    let chat = analysis_request
        .into_chat_request("gpt-4o-mini", 1000)
        .unwrap();
    let ChatCompletionRequestMessage::User(user) = &chat.messages[0] else {
        panic!("expected a user message");
    };
    let ChatCompletionRequestUserMessageContent::Array(parts) = &user.content else {
        panic!("expected a content array");
    };
    // One text block followed by the five frames.
    assert_eq!(parts.len(), 6);
    assert!(matches!(
        parts[0],
        ChatCompletionRequestUserMessageContentPart::Text(_)
    ));
    for (part, uri) in parts[1..].iter().zip(&attachments) {
        let ChatCompletionRequestUserMessageContentPart::ImageUrl(image) = part else {
            panic!("expected an image part");
        };
        assert_eq!(&image.image_url.url, uri);
    }
}

#[test]
fn sampled_frames_survive_the_data_uri_round_trip() {
    for seed in [0u8, 7, 200] {
        let frame = synthetic_frame(seed);
        let uri = encode::to_data_uri(&frame).unwrap();
        let png = BASE64_STANDARD
            .decode(uri.strip_prefix("data:image/png;base64,").unwrap())
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), frame.data);
    }
}

#[test]
fn caption_track_covers_the_whole_clip() {
    let segments = transcript::segment(
        "the quick brown fox jumps over the lazy sleeping dog",
        100.0,
        5,
    )
    .unwrap();
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[2].start, 40.0);
    assert_eq!(segments[2].end, 60.0);
    assert_eq!(segments[2].text, "jumps over");

    let track = transcript::to_vtt(&segments);
    assert!(track.starts_with("WEBVTT\n\n"));
    assert!(track.contains("00:00:40.000 --> 00:01:00.000"));
    assert!(track.ends_with("sleeping dog\n\n"));
}
