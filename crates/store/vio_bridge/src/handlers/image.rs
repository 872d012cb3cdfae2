//! Image handler: Cap'n Proto `Image` → Rerun `Image` / `EncodedImage`.

use rerun::archetypes::{EncodedImage, Image, Scalars};
use rerun::{ChannelDatatype, ColorModel, RecordingStream};

use vio_msgs::{decode_image, ImageEncoding, ImageFrame};

use crate::convert::yuv420_to_rgb;
use crate::handler::TopicHandler;

const MAX_IMAGE_DIM: u32 = 8192;

/// Streams decoded camera frames to a Rerun recording.
pub struct ImageHandler {
    rec: RecordingStream,
    entity_path: String,
}

impl ImageHandler {
    /// Create a handler logging under `<entity_prefix>/<topic_name>`.
    pub fn new(rec: RecordingStream, entity_prefix: &str, topic_name: &str) -> Self {
        Self {
            rec,
            entity_path: entity_path(entity_prefix, topic_name),
        }
    }

    fn log_frame(&self, frame: &ImageFrame) -> anyhow::Result<()> {
        let dimensions = [frame.width, frame.height];
        let (width, height) = (frame.width as usize, frame.height as usize);

        match frame.encoding {
            ImageEncoding::Mono8 => {
                expect_len(frame, width * height)?;
                self.rec.log(
                    self.entity_path.as_str(),
                    &Image::from_color_model_and_bytes(
                        frame.data.clone(),
                        dimensions,
                        ColorModel::L,
                        ChannelDatatype::U8,
                    ),
                )?;
            }
            ImageEncoding::Yuv420 => {
                if frame.width % 2 != 0 || frame.height % 2 != 0 {
                    anyhow::bail!(
                        "yuv420 image has odd dimensions {}x{}",
                        frame.width,
                        frame.height
                    );
                }
                expect_len(frame, width * height * 3 / 2)?;
                let rgb = yuv420_to_rgb(&frame.data, width, height);
                self.rec.log(
                    self.entity_path.as_str(),
                    &Image::from_color_model_and_bytes(
                        rgb,
                        dimensions,
                        ColorModel::RGB,
                        ChannelDatatype::U8,
                    ),
                )?;
            }
            ImageEncoding::Bgr8 => {
                expect_len(frame, width * height * 3)?;
                self.rec.log(
                    self.entity_path.as_str(),
                    &Image::from_color_model_and_bytes(
                        frame.data.clone(),
                        dimensions,
                        ColorModel::BGR,
                        ChannelDatatype::U8,
                    ),
                )?;
            }
            ImageEncoding::Jpeg => {
                // the viewer decodes; width/height describe the decoded frame
                self.rec.log(
                    self.entity_path.as_str(),
                    &EncodedImage::from_file_contents(frame.data.clone())
                        .with_media_type("image/jpeg"),
                )?;
            }
        }

        Ok(())
    }
}

impl TopicHandler for ImageHandler {
    fn handle_message(&mut self, payload: &[u8], receive_time_ns: i64) -> anyhow::Result<()> {
        let frame = decode_image(payload)?;

        if frame.width > MAX_IMAGE_DIM || frame.height > MAX_IMAGE_DIM {
            anyhow::bail!(
                "Image dimensions {}x{} exceed limit {MAX_IMAGE_DIM}",
                frame.width,
                frame.height
            );
        }

        tracing::debug!(
            seq = frame.header.seq,
            encoding = frame.encoding.as_str(),
            latency_device_ms = frame.header.latency_device as f64 / 1e6,
            latency_host_ms = frame.header.latency_host as f64 / 1e6,
            "camera frame"
        );

        self.rec
            .set_time_sequence("frame", frame.header.seq as i64);
        self.rec
            .set_timestamp_nanos_since_epoch("capture_time", frame.header.stamp as i64);
        self.rec
            .set_timestamp_nanos_since_epoch("receive_time", receive_time_ns);

        self.log_frame(&frame)?;

        self.rec.log(
            format!("{}/exposure_usec", self.entity_path),
            &Scalars::single(f64::from(frame.exposure_usec)),
        )?;
        self.rec.log(
            format!("{}/gain", self.entity_path),
            &Scalars::single(f64::from(frame.gain)),
        )?;

        Ok(())
    }

    fn schema_name(&self) -> &'static str {
        "Image"
    }
}

/// Map a topic name to its entity path under the prefix.
fn entity_path(prefix: &str, topic_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let topic = topic_name.trim_start_matches('/');
    if prefix.is_empty() {
        topic.to_owned()
    } else {
        format!("{prefix}/{topic}")
    }
}

/// Check the pixel buffer length implied by the encoding and dimensions.
fn expect_len(frame: &ImageFrame, expected: usize) -> anyhow::Result<()> {
    if frame.data.len() != expected {
        anyhow::bail!(
            "{} payload of {} bytes does not match {}x{} (expected {expected})",
            frame.encoding.as_str(),
            frame.data.len(),
            frame.width,
            frame.height
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vio_msgs::Header;

    fn frame(encoding: ImageEncoding, width: u32, height: u32, len: usize) -> ImageFrame {
        ImageFrame {
            header: Header::default(),
            encoding,
            width,
            height,
            exposure_usec: 0,
            gain: 0,
            data: vec![0; len],
        }
    }

    #[test]
    fn test_entity_path() {
        assert_eq!(
            entity_path("vio", "raw_fisheye_image"),
            "vio/raw_fisheye_image"
        );
        assert_eq!(entity_path("vio", "S0/camd"), "vio/S0/camd");
        assert_eq!(entity_path("", "S0/camd"), "S0/camd");
    }

    #[test]
    fn test_expect_len() {
        assert!(expect_len(&frame(ImageEncoding::Mono8, 4, 2, 8), 8).is_ok());
        assert!(expect_len(&frame(ImageEncoding::Mono8, 4, 2, 7), 8).is_err());
    }
}
