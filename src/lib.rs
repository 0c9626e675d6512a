//! This crate provides the Bayer demosaicing routines used with IIDC
//! (IEEE-1394) digital cameras.
//!
//! A raw mosaic is wrapped in a [`BayerImage`] and decoded into an
//! interleaved RGB [`Raster`] by one of the [`Demosaic`] methods.  8-bit
//! samples are stored as `u8`; anything deeper is stored as `u16` with
//! the active bit depth given separately.
//!
//! ```
//! use dc1394_bayer::{demosaic_u16, Demosaic, CFA};
//!
//! let raw = vec![2048u16; 16 * 12];
//! let rgb = demosaic_u16(&raw, 16, 12, 12, CFA::GBRG, Demosaic::VNG).unwrap();
//! assert_eq!(rgb.pixel(8, 6), [2048, 2048, 2048]);
//! ```

pub use bayer::read_exact_u16be;
pub use bayer::read_exact_u16le;
pub use bayer::read_exact_u8;
pub use bayer::read_mosaic_u16;
pub use bayer::read_mosaic_u8;
pub use bayer::BayerDepth;
pub use bayer::CFA;
pub use border::{clear_border, clear_trailing_edge};
pub use demosaic::demosaic_u16;
pub use demosaic::demosaic_u8;
pub use demosaic::run_demosaic;
pub use demosaic::Demosaic;
pub use errcode::BayerError;
pub use errcode::BayerResult;
pub use frame::{debayer_frame, ColorCoding, VideoFrame};
pub use raster::{BayerImage, Raster};
pub use sample::Sample;

pub mod demosaic;
pub mod ffi;

mod bayer;
mod border;
mod errcode;
mod frame;
mod raster;
mod sample;
