//! Cap'n Proto schemas for the sensor-rig topics, plus typed decode helpers.
//!
//! The schemas under `capnp/` describe the wire format of the camera and
//! odometry topics. The generated readers/builders are re-exported in the
//! `*_capnp` modules; [`decode_image`] and [`decode_odometry`] turn a raw
//! payload into owned Rust structs so downstream code never touches the
//! generated API directly.

pub mod header_capnp {
    include!(concat!(env!("OUT_DIR"), "/header_capnp.rs"));
}

pub mod image_capnp {
    include!(concat!(env!("OUT_DIR"), "/image_capnp.rs"));
}

pub mod odometry3d_capnp {
    include!(concat!(env!("OUT_DIR"), "/odometry3d_capnp.rs"));
}

use capnp::message::ReaderOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed message: {0}")]
    Malformed(#[from] capnp::Error),
    #[error("enum value not in schema: {0}")]
    NotInSchema(#[from] capnp::NotInSchema),
}

/// Common header carried by every topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Monotonic per-topic sequence number.
    pub seq: u64,
    /// Capture time in nanoseconds, device clock.
    pub stamp: u64,
    /// Nanoseconds between capture and publication on the device.
    pub latency_device: u64,
    /// Nanoseconds between device publication and host receipt.
    pub latency_host: u64,
}

/// Pixel encoding tag of an [`ImageFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Mono8,
    Yuv420,
    Bgr8,
    Jpeg,
}

impl ImageEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mono8 => "mono8",
            Self::Yuv420 => "yuv420",
            Self::Bgr8 => "bgr8",
            Self::Jpeg => "jpeg",
        }
    }
}

impl From<image_capnp::image::Encoding> for ImageEncoding {
    fn from(e: image_capnp::image::Encoding) -> Self {
        use image_capnp::image::Encoding;
        match e {
            Encoding::Mono8 => Self::Mono8,
            Encoding::Yuv420 => Self::Yuv420,
            Encoding::Bgr8 => Self::Bgr8,
            Encoding::Jpeg => Self::Jpeg,
        }
    }
}

impl From<ImageEncoding> for image_capnp::image::Encoding {
    fn from(e: ImageEncoding) -> Self {
        match e {
            ImageEncoding::Mono8 => Self::Mono8,
            ImageEncoding::Yuv420 => Self::Yuv420,
            ImageEncoding::Bgr8 => Self::Bgr8,
            ImageEncoding::Jpeg => Self::Jpeg,
        }
    }
}

/// Coordinate-convention tag of an odometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameConvention {
    /// North-East-Down.
    Ned,
    /// North-West-Up.
    Nwu,
    /// Forward-Right-Down, body-fixed.
    Frd,
}

impl FrameConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ned => "ned",
            Self::Nwu => "nwu",
            Self::Frd => "frd",
        }
    }
}

impl From<odometry3d_capnp::Frame> for FrameConvention {
    fn from(f: odometry3d_capnp::Frame) -> Self {
        use odometry3d_capnp::Frame;
        match f {
            Frame::Ned => Self::Ned,
            Frame::Nwu => Self::Nwu,
            Frame::Frd => Self::Frd,
        }
    }
}

impl From<FrameConvention> for odometry3d_capnp::Frame {
    fn from(f: FrameConvention) -> Self {
        match f {
            FrameConvention::Ned => Self::Ned,
            FrameConvention::Nwu => Self::Nwu,
            FrameConvention::Frd => Self::Frd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

/// A decoded camera frame.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    pub header: Header,
    pub encoding: ImageEncoding,
    pub width: u32,
    pub height: u32,
    /// Sensor exposure time in microseconds.
    pub exposure_usec: u32,
    /// Sensor analog gain, sensor-specific units.
    pub gain: u32,
    pub data: Vec<u8>,
}

/// A decoded odometry sample.
#[derive(Debug, Clone)]
pub struct OdometrySample {
    pub header: Header,
    pub body_frame: FrameConvention,
    pub reference_frame: FrameConvention,
    pub velocity_frame: FrameConvention,
    /// Position of the body frame in the reference frame.
    pub position: Vec3,
    /// Orientation of the body frame in the reference frame.
    pub orientation: Quat,
    /// Linear velocity in the velocity frame.
    pub linear_velocity: Vec3,
    /// Angular velocity in the velocity frame.
    pub angular_velocity: Vec3,
}

fn read_header(reader: header_capnp::header::Reader<'_>) -> Header {
    Header {
        seq: reader.get_seq(),
        stamp: reader.get_stamp(),
        latency_device: reader.get_latency_device(),
        latency_host: reader.get_latency_host(),
    }
}

fn read_vector3(reader: odometry3d_capnp::vector3::Reader<'_>) -> Vec3 {
    Vec3 {
        x: reader.get_x(),
        y: reader.get_y(),
        z: reader.get_z(),
    }
}

/// Decode a raw `Image` payload.
pub fn decode_image(payload: &[u8]) -> Result<ImageFrame, DecodeError> {
    let reader = capnp::serialize::read_message(&mut &payload[..], ReaderOptions::new())?;
    let image = reader.get_root::<image_capnp::image::Reader<'_>>()?;

    Ok(ImageFrame {
        header: read_header(image.get_header()?),
        encoding: image.get_encoding()?.into(),
        width: image.get_width(),
        height: image.get_height(),
        exposure_usec: image.get_exposure_u_sec(),
        gain: image.get_gain(),
        data: image.get_data()?.to_vec(),
    })
}

/// Decode a raw `Odometry3d` payload.
pub fn decode_odometry(payload: &[u8]) -> Result<OdometrySample, DecodeError> {
    let reader = capnp::serialize::read_message(&mut &payload[..], ReaderOptions::new())?;
    let odom = reader.get_root::<odometry3d_capnp::odometry3d::Reader<'_>>()?;

    let pose = odom.get_pose()?;
    let orientation = pose.get_orientation()?;
    let twist = odom.get_twist()?;

    Ok(OdometrySample {
        header: read_header(odom.get_header()?),
        body_frame: odom.get_body_frame()?.into(),
        reference_frame: odom.get_reference_frame()?.into(),
        velocity_frame: odom.get_velocity_frame()?.into(),
        position: read_vector3(pose.get_position()?),
        orientation: Quat {
            w: orientation.get_w(),
            x: orientation.get_x(),
            y: orientation.get_y(),
            z: orientation.get_z(),
        },
        linear_velocity: read_vector3(twist.get_linear()?),
        angular_velocity: read_vector3(twist.get_angular()?),
    })
}

fn write_header(mut builder: header_capnp::header::Builder<'_>, header: &Header) {
    builder.set_seq(header.seq);
    builder.set_stamp(header.stamp);
    builder.set_latency_device(header.latency_device);
    builder.set_latency_host(header.latency_host);
}

fn write_vector3(mut builder: odometry3d_capnp::vector3::Builder<'_>, v: &Vec3) {
    builder.set_x(v.x);
    builder.set_y(v.y);
    builder.set_z(v.z);
}

/// Encode an [`ImageFrame`] into a flat message payload.
pub fn encode_image(frame: &ImageFrame) -> Result<Vec<u8>, DecodeError> {
    let mut message = capnp::message::Builder::new_default();
    {
        let mut image = message.init_root::<image_capnp::image::Builder<'_>>();
        write_header(image.reborrow().init_header(), &frame.header);
        image.set_encoding(frame.encoding.into());
        image.set_width(frame.width);
        image.set_height(frame.height);
        image.set_exposure_u_sec(frame.exposure_usec);
        image.set_gain(frame.gain);
        image.set_data(&frame.data);
    }

    let mut buffer = Vec::new();
    capnp::serialize::write_message(&mut buffer, &message)?;
    Ok(buffer)
}

/// Encode an [`OdometrySample`] into a flat message payload.
pub fn encode_odometry(sample: &OdometrySample) -> Result<Vec<u8>, DecodeError> {
    let mut message = capnp::message::Builder::new_default();
    {
        let mut odom = message.init_root::<odometry3d_capnp::odometry3d::Builder<'_>>();
        write_header(odom.reborrow().init_header(), &sample.header);
        odom.set_body_frame(sample.body_frame.into());
        odom.set_reference_frame(sample.reference_frame.into());
        odom.set_velocity_frame(sample.velocity_frame.into());

        {
            let mut pose = odom.reborrow().init_pose();
            write_vector3(pose.reborrow().init_position(), &sample.position);
            let mut orientation = pose.init_orientation();
            orientation.set_w(sample.orientation.w);
            orientation.set_x(sample.orientation.x);
            orientation.set_y(sample.orientation.y);
            orientation.set_z(sample.orientation.z);
        }

        {
            let mut twist = odom.init_twist();
            write_vector3(twist.reborrow().init_linear(), &sample.linear_velocity);
            write_vector3(twist.init_angular(), &sample.angular_velocity);
        }
    }

    let mut buffer = Vec::new();
    capnp::serialize::write_message(&mut buffer, &message)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_roundtrip() {
        let frame = ImageFrame {
            header: Header {
                seq: 42,
                stamp: 1_700_000_000_000_000_000,
                latency_device: 2_500_000,
                latency_host: 800_000,
            },
            encoding: ImageEncoding::Mono8,
            width: 640,
            height: 480,
            exposure_usec: 5000,
            gain: 12,
            data: vec![0x7f; 640 * 480],
        };

        let payload = encode_image(&frame).expect("encode");
        let decoded = decode_image(&payload).expect("decode");

        assert_eq!(decoded.header, frame.header);
        assert_eq!(decoded.encoding, ImageEncoding::Mono8);
        assert_eq!(decoded.width, 640);
        assert_eq!(decoded.height, 480);
        assert_eq!(decoded.exposure_usec, 5000);
        assert_eq!(decoded.gain, 12);
        assert_eq!(decoded.data.len(), 640 * 480);
    }

    #[test]
    fn test_odometry_roundtrip() {
        let sample = OdometrySample {
            header: Header {
                seq: 7,
                stamp: 123_456_789,
                ..Header::default()
            },
            body_frame: FrameConvention::Frd,
            reference_frame: FrameConvention::Ned,
            velocity_frame: FrameConvention::Frd,
            position: Vec3 {
                x: 1.5,
                y: -2.0,
                z: 0.25,
            },
            orientation: Quat {
                w: 0.5,
                x: 0.5,
                y: -0.5,
                z: 0.5,
            },
            linear_velocity: Vec3 {
                x: 0.1,
                y: 0.0,
                z: -0.3,
            },
            angular_velocity: Vec3::default(),
        };

        let payload = encode_odometry(&sample).expect("encode");
        let decoded = decode_odometry(&payload).expect("decode");

        assert_eq!(decoded.header.seq, 7);
        assert_eq!(decoded.body_frame, FrameConvention::Frd);
        assert_eq!(decoded.reference_frame, FrameConvention::Ned);
        assert_eq!(decoded.velocity_frame, FrameConvention::Frd);
        assert_eq!(decoded.position, sample.position);
        assert_eq!(decoded.orientation, sample.orientation);
        assert_eq!(decoded.linear_velocity, sample.linear_velocity);
        assert_eq!(decoded.angular_velocity, sample.angular_velocity);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[0xde, 0xad, 0xbe, 0xef]).is_err());
        assert!(decode_odometry(&[]).is_err());
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(ImageEncoding::Mono8.as_str(), "mono8");
        assert_eq!(ImageEncoding::Yuv420.as_str(), "yuv420");
        assert_eq!(ImageEncoding::Bgr8.as_str(), "bgr8");
        assert_eq!(ImageEncoding::Jpeg.as_str(), "jpeg");
        assert_eq!(FrameConvention::Ned.as_str(), "ned");
    }
}
