use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::capture::Frame;
use crate::error::{Error, Result};

/// Losslessly encodes a frame as PNG and wraps it as a base64 data URI
/// suitable for attaching to a chat request.
pub fn to_data_uri(frame: &Frame) -> Result<String> {
    if frame.width == 0 || frame.height == 0 {
        return Err(Error::Encode("frame has zero-sized dimensions".to_owned()));
    }
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.data.len() != expected {
        return Err(Error::Encode(format!(
            "pixel buffer holds {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|err| Error::Encode(err.to_string()))?;

    Ok("data:image/png;base64,".to_owned() + &BASE64_STANDARD.encode(png))
}
