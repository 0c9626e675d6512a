//! IIDC video frame adapter.
//!
//! Wraps the demosaicing functions for frames as delivered by a camera:
//! the raw samples come as bytes together with their geometry, colour
//! coding and bookkeeping.  The output frame carries interleaved RGB.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::demosaic::{run_demosaic, Demosaic};
use crate::raster::BayerImage;
use crate::{BayerError, BayerResult, CFA};

/// IIDC colour codings.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ColorCoding {
    MONO8 = 352,
    YUV411 = 353,
    YUV422 = 354,
    YUV444 = 355,
    RGB8 = 356,
    MONO16 = 357,
    RGB16 = 358,
    MONO16S = 359,
    RGB16S = 360,
    RAW8 = 361,
    RAW16 = 362,
}

impl ColorCoding {
    const ALL: [ColorCoding; 11] = [
        ColorCoding::MONO8,
        ColorCoding::YUV411,
        ColorCoding::YUV422,
        ColorCoding::YUV444,
        ColorCoding::RGB8,
        ColorCoding::MONO16,
        ColorCoding::RGB16,
        ColorCoding::MONO16S,
        ColorCoding::RGB16S,
        ColorCoding::RAW8,
        ColorCoding::RAW16,
    ];

    /// The IIDC numeric value.
    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn from_raw(v: u32) -> Option<Self> {
        ColorCoding::ALL.iter().copied().find(|&c| c.raw() == v)
    }

    /// Storage size of one pixel.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            ColorCoding::MONO8 | ColorCoding::RAW8 => 8,
            ColorCoding::YUV411 => 12,
            ColorCoding::YUV422 | ColorCoding::MONO16 | ColorCoding::MONO16S | ColorCoding::RAW16 => 16,
            ColorCoding::YUV444 | ColorCoding::RGB8 => 24,
            ColorCoding::RGB16 | ColorCoding::RGB16S => 48,
        }
    }
}

/// A captured frame.
///
/// `image` holds `image_bytes` of pixel data followed by
/// `padding_bytes` of padding.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
    pub image: Vec<u8>,
    /// Width and height in pixels.
    pub size: (u32, u32),
    /// Origin of the region of interest.
    pub position: (u32, u32),
    pub color_coding: ColorCoding,
    pub color_filter: Option<CFA>,
    /// Active bits per sample.
    pub data_depth: u32,
    /// Bytes per row.
    pub stride: u32,
    pub video_mode: u32,
    pub image_bytes: usize,
    pub padding_bytes: usize,
    pub total_bytes: usize,
    pub packet_size: u32,
    pub packets_per_frame: u32,
    pub timestamp: u64,
    pub frames_behind: u32,
    pub id: u32,
    /// Byte order of 16-bit samples.
    pub little_endian: bool,
    pub data_in_padding: bool,
}

/// Demosaic a RAW or MONO frame into an RGB frame.
///
/// 8-bit frames give RGB8; 16-bit frames give big-endian RGB16 with the
/// input's data depth.  Downsampling halves both the size and the
/// position.  Padding and the transport bookkeeping are carried over.
pub fn debayer_frame(input: &VideoFrame, method: Demosaic) -> BayerResult<VideoFrame> {
    let cfa = input.color_filter.ok_or(BayerError::InvalidColorFilter)?;
    let (w, h) = (input.size.0 as usize, input.size.1 as usize);

    let wide = match input.color_coding {
        ColorCoding::RAW8 | ColorCoding::MONO8 => false,
        ColorCoding::RAW16 | ColorCoding::MONO16 => true,
        coding => return Err(BayerError::UnsupportedColorCoding(coding)),
    };

    let padding_end = input
        .image_bytes
        .checked_add(input.padding_bytes)
        .ok_or(BayerError::WrongResolution)?;
    let padding = input
        .image
        .get(input.image_bytes..padding_end)
        .ok_or(BayerError::BufferTooSmall(padding_end, input.image.len()))?;

    let (rgb, color_coding, data_depth) = if wide {
        let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
        let bytes = input
            .image
            .get(..2 * len)
            .ok_or(BayerError::BufferTooSmall(2 * len, input.image.len()))?;
        let mut samples = vec![0u16; len];
        if input.little_endian {
            LittleEndian::read_u16_into(bytes, &mut samples);
        } else {
            BigEndian::read_u16_into(bytes, &mut samples);
        }

        let src = BayerImage::new(&samples[..], w, h, input.data_depth, cfa)?;
        let dst = run_demosaic(&src, method)?;
        (dst.to_bytes(), ColorCoding::RGB16, input.data_depth)
    } else {
        let src = BayerImage::new(&input.image[..], w, h, 8, cfa)?;
        let dst = run_demosaic(&src, method)?;
        (dst.into_vec(), ColorCoding::RGB8, 8)
    };

    let (mut size, mut position) = (input.size, input.position);
    if method == Demosaic::Downsample {
        size = (size.0 / 2, size.1 / 2);
        position = (position.0 / 2, position.1 / 2);
    }

    let bpp = color_coding.bits_per_pixel() as usize;
    let image_bytes = size.0 as usize * size.1 as usize * bpp / 8;
    debug_assert_eq!(image_bytes, rgb.len());

    let mut image = rgb;
    image.extend_from_slice(padding);

    Ok(VideoFrame {
        image,
        size,
        position,
        color_coding,
        color_filter: input.color_filter,
        data_depth,
        stride: size.0 * (bpp / 8) as u32,
        video_mode: input.video_mode,
        image_bytes,
        padding_bytes: input.padding_bytes,
        total_bytes: image_bytes + input.padding_bytes,
        packet_size: input.packet_size,
        packets_per_frame: input.packets_per_frame,
        timestamp: input.timestamp,
        frames_behind: input.frames_behind,
        id: input.id,
        little_endian: false,
        data_in_padding: input.data_in_padding,
    })
}
