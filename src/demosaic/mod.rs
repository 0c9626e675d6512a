//! Collection of demosaicing algorithms.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use tracing::debug;

use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::{BayerError, BayerResult, CFA};

/// The demosaicing algorithm to use to fill in the missing data.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Demosaic {
    Nearest,
    Simple,
    Bilinear,
    HQLinear,
    Downsample,
    EdgeSense,
    VNG,
}

macro_rules! rotate {
    ($v0:ident <- $v1:ident <- $v2:ident) => {{
        std::mem::swap(&mut $v0, &mut $v1);
        std::mem::swap(&mut $v1, &mut $v2);
    }};
}

pub mod downsample;
pub mod edgesense;
pub mod hqlinear;
pub mod linear;
pub mod nearestneighbour;
pub mod simple;
pub mod vng;

impl Demosaic {
    pub const ALL: [Demosaic; 7] = [
        Demosaic::Nearest,
        Demosaic::Simple,
        Demosaic::Bilinear,
        Demosaic::HQLinear,
        Demosaic::Downsample,
        Demosaic::EdgeSense,
        Demosaic::VNG,
    ];

    /// Output dimensions for a `w` x `h` mosaic.
    pub fn output_size(self, w: usize, h: usize) -> (usize, usize) {
        match self {
            Demosaic::Downsample => (w / 2, h / 2),
            _ => (w, h),
        }
    }
}

impl TryFrom<u32> for Demosaic {
    type Error = BayerError;

    fn try_from(v: u32) -> BayerResult<Self> {
        Demosaic::ALL
            .get(v as usize)
            .copied()
            .ok_or(BayerError::InvalidBayerMethod)
    }
}

impl fmt::Display for Demosaic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Demosaic::Nearest => "Nearest",
            Demosaic::Simple => "Simple",
            Demosaic::Bilinear => "Bilinear",
            Demosaic::HQLinear => "HQLinear",
            Demosaic::Downsample => "Downsample",
            Demosaic::EdgeSense => "EdgeSense",
            Demosaic::VNG => "VNG",
        };
        f.write_str(s)
    }
}

/// Demosaic `src` with the given algorithm.
///
/// The result has the dimensions of `src`, except for
/// [`Demosaic::Downsample`], which halves both.
pub fn run_demosaic<T: Sample>(src: &BayerImage<T>, alg: Demosaic) -> BayerResult<Raster<T>> {
    debug!(
        method = %alg,
        cfa = %src.cfa(),
        width = src.width(),
        height = src.height(),
        depth = src.depth(),
        "demosaicing"
    );

    match alg {
        Demosaic::Nearest => nearestneighbour::run(src),
        Demosaic::Simple => simple::run(src),
        Demosaic::Bilinear => linear::run(src),
        Demosaic::HQLinear => hqlinear::run(src),
        Demosaic::Downsample => downsample::run(src),
        Demosaic::EdgeSense => edgesense::run(src),
        Demosaic::VNG => vng::run(src),
    }
}

/// Demosaic an 8-bit mosaic.
///
/// # Examples
///
/// ```
/// use dc1394_bayer::{demosaic_u8, Demosaic, CFA};
///
/// let src = [128u8; 8 * 8];
/// let rgb = demosaic_u8(&src, 8, 8, CFA::RGGB, Demosaic::Bilinear).unwrap();
/// assert_eq!(rgb.pixel(3, 3), [128, 128, 128]);
/// ```
pub fn demosaic_u8(data: &[u8], w: usize, h: usize, cfa: CFA, alg: Demosaic) -> BayerResult<Raster<u8>> {
    let src = BayerImage::new(data, w, h, 8, cfa)?;
    run_demosaic(&src, alg)
}

/// Demosaic a 16-bit mosaic with `depth` active bits per sample.
pub fn demosaic_u16(
    data: &[u16],
    w: usize,
    h: usize,
    depth: u32,
    cfa: CFA,
    alg: Demosaic,
) -> BayerResult<Raster<u16>> {
    let src = BayerImage::new(data, w, h, depth, cfa)?;
    run_demosaic(&src, alg)
}

/// Reject images smaller than the kernel's minimum.
fn check_size<T: Sample>(src: &BayerImage<T>, min: usize) -> BayerResult<()> {
    if src.width() < min || src.height() < min {
        return Err(BayerError::WrongResolution);
    }
    Ok(())
}

/// Evaluate `kernel` for every output row in `rows`.  Rows are
/// independent, so they may be evaluated in parallel.
#[cfg(feature = "rayon")]
fn for_each_row<T, F>(dst: &mut Raster<T>, rows: Range<usize>, kernel: F)
where
    T: Sample,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let stride = dst.stride();
    dst.as_mut_slice()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(rows.start)
        .take(rows.len())
        .for_each(|(y, row)| kernel(y, row));
}

#[cfg(not(feature = "rayon"))]
fn for_each_row<T, F>(dst: &mut Raster<T>, rows: Range<usize>, kernel: F)
where
    T: Sample,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let stride = dst.stride();
    dst.as_mut_slice()
        .chunks_mut(stride)
        .enumerate()
        .skip(rows.start)
        .take(rows.len())
        .for_each(|(y, row)| kernel(y, row));
}

#[cfg(test)]
mod tests {
    use super::{demosaic_u16, demosaic_u8, Demosaic};
    use crate::{BayerError, CFA};

    #[test]
    fn test_try_from() {
        assert_eq!(Demosaic::try_from(0).ok(), Some(Demosaic::Nearest));
        assert_eq!(Demosaic::try_from(3).ok(), Some(Demosaic::HQLinear));
        assert_eq!(Demosaic::try_from(6).ok(), Some(Demosaic::VNG));
        assert!(matches!(
            Demosaic::try_from(7),
            Err(BayerError::InvalidBayerMethod)
        ));
    }

    #[test]
    fn test_output_size() {
        assert_eq!(Demosaic::Downsample.output_size(640, 480), (320, 240));
        assert_eq!(Demosaic::VNG.output_size(640, 480), (640, 480));
    }

    #[test]
    fn test_minimum_size() {
        let src = [0u8; 4 * 4];
        assert!(demosaic_u8(&src, 4, 4, CFA::RGGB, Demosaic::HQLinear).is_ok());
        assert!(matches!(
            demosaic_u8(&src, 4, 4, CFA::RGGB, Demosaic::EdgeSense),
            Err(BayerError::WrongResolution)
        ));

        let src = [0u8; 2 * 2];
        assert!(demosaic_u8(&src, 2, 2, CFA::RGGB, Demosaic::Bilinear).is_ok());
        assert!(demosaic_u8(&src, 2, 2, CFA::RGGB, Demosaic::HQLinear).is_err());
        assert!(demosaic_u8(&src, 2, 2, CFA::RGGB, Demosaic::VNG).is_err());
    }

    #[test]
    fn test_u16_depth() {
        let src = [0u16; 8 * 8];
        assert!(demosaic_u16(&src, 8, 8, 12, CFA::GBRG, Demosaic::Simple).is_ok());
        assert!(matches!(
            demosaic_u16(&src, 8, 8, 20, CFA::GBRG, Demosaic::Simple),
            Err(BayerError::WrongDepth)
        ));
    }
}
