//! Bayer image definitions.

use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::{BayerError, BayerResult};

/// Channel offsets inside an interleaved RGB pixel.
pub(crate) const RED: usize = 0;
pub(crate) const GREEN: usize = 1;
pub(crate) const BLUE: usize = 2;

/// The 2x2 colour filter array (CFA) pattern.
///
/// The sequence of R, G, B describe the colours of the top-left,
/// top-right, bottom-left, and bottom-right pixels in the 2x2 block,
/// in that order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CFA {
    RGGB,
    GBRG,
    GRBG,
    BGGR,
}

/// The depth and endianness of the raw image.
///
/// Note that many cameras only capture 12-bits per pixel, but still
/// store the data as 16-bits per pixel.  These should be treated as
/// 16-bits per pixel for the purposes of reading the data; the active
/// bit depth is given separately when demosaicing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BayerDepth {
    Depth8,
    Depth16BE,
    Depth16LE,
}

/// Scan-loop control derived from a CFA pattern.
///
/// `blue` is +1 when the non-green sample of the current row is
/// written to the red side of the pixel (offset `1 - blue`), and -1 when
/// it is written to the blue side.  `start_with_green` tells whether the
/// first pixel of the row is green.  Both flip on every row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScanParams {
    pub blue: i32,
    pub start_with_green: bool,
}

impl ScanParams {
    /// Parameters for the row `y` rows further down.
    pub fn row(self, y: usize) -> Self {
        if y % 2 == 0 {
            self
        } else {
            ScanParams {
                blue: -self.blue,
                start_with_green: !self.start_with_green,
            }
        }
    }

    pub fn flip_blue(self) -> Self {
        ScanParams {
            blue: -self.blue,
            ..self
        }
    }

    /// Whether the `x`th pixel of the row sits on a green sample.
    #[inline(always)]
    pub fn is_green(self, x: usize) -> bool {
        (x % 2 == 0) == self.start_with_green
    }

    /// Channel offsets `(1 - blue, 1 + blue)`.
    #[inline(always)]
    pub fn sides(self) -> (usize, usize) {
        if self.blue > 0 {
            (RED, BLUE)
        } else {
            (BLUE, RED)
        }
    }
}

/// Read the exact number of bytes required to fill buf.
/// For u8 source data.
pub fn read_exact_u8(r: &mut dyn Read, buf: &mut [u8]) -> BayerResult<()> {
    r.read_exact(buf)?;
    Ok(())
}

/// Read the exact number of bytes required to fill buf.
/// For u16 big-endian source data.
pub fn read_exact_u16be(r: &mut dyn Read, buf: &mut [u16]) -> BayerResult<()> {
    r.read_u16_into::<BigEndian>(buf)?;
    Ok(())
}

/// Read the exact number of bytes required to fill buf.
/// For u16 little-endian source data.
pub fn read_exact_u16le(r: &mut dyn Read, buf: &mut [u16]) -> BayerResult<()> {
    r.read_u16_into::<LittleEndian>(buf)?;
    Ok(())
}

/// Read a `w` x `h` 8-bit mosaic from a byte stream.
pub fn read_mosaic_u8(r: &mut dyn Read, w: usize, h: usize) -> BayerResult<Vec<u8>> {
    let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
    let mut data = vec![0u8; len];
    read_exact_u8(r, &mut data)?;
    Ok(data)
}

/// Read a `w` x `h` 16-bit mosaic from a byte stream.
///
/// # Errors
///
/// Returns [`BayerError::WrongDepth`] for [`BayerDepth::Depth8`].
pub fn read_mosaic_u16(
    r: &mut dyn Read,
    w: usize,
    h: usize,
    depth: BayerDepth,
) -> BayerResult<Vec<u16>> {
    let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
    let mut data = vec![0u16; len];
    match depth {
        BayerDepth::Depth8 => return Err(BayerError::WrongDepth),
        BayerDepth::Depth16BE => read_exact_u16be(r, &mut data)?,
        BayerDepth::Depth16LE => read_exact_u16le(r, &mut data)?,
    }
    Ok(data)
}

impl CFA {
    /// The 2x2 pixel block obtained when moving right 1 column.
    pub fn next_x(self) -> Self {
        match self {
            CFA::BGGR => CFA::GBRG,
            CFA::GBRG => CFA::BGGR,
            CFA::GRBG => CFA::RGGB,
            CFA::RGGB => CFA::GRBG,
        }
    }

    /// The 2x2 pixel block obtained when moving down 1 row.
    pub fn next_y(self) -> Self {
        match self {
            CFA::BGGR => CFA::GRBG,
            CFA::GBRG => CFA::RGGB,
            CFA::GRBG => CFA::BGGR,
            CFA::RGGB => CFA::GBRG,
        }
    }

    /// Channel offset (0 = R, 1 = G, 2 = B) of the top-left sample.
    fn top_left(self) -> usize {
        match self {
            CFA::RGGB => RED,
            CFA::BGGR => BLUE,
            CFA::GBRG | CFA::GRBG => GREEN,
        }
    }

    /// Channel offset (0 = R, 1 = G, 2 = B) of the sample at (x, y).
    #[inline]
    pub fn color_at(self, x: usize, y: usize) -> usize {
        let cfa = if y % 2 == 0 { self } else { self.next_y() };
        let cfa = if x % 2 == 0 { cfa } else { cfa.next_x() };
        cfa.top_left()
    }

    pub(crate) fn scan_params(self) -> ScanParams {
        ScanParams {
            blue: match self {
                CFA::BGGR | CFA::GBRG => -1,
                CFA::RGGB | CFA::GRBG => 1,
            },
            start_with_green: matches!(self, CFA::GBRG | CFA::GRBG),
        }
    }

    /// The pattern packed as eight rows of 2-bit colour codes, two
    /// columns per row.
    pub(crate) fn filters(self) -> u32 {
        match self {
            CFA::BGGR => 0x1616_1616,
            CFA::GRBG => 0x6161_6161,
            CFA::RGGB => 0x9494_9494,
            CFA::GBRG => 0x4949_4949,
        }
    }
}

impl TryFrom<u32> for CFA {
    type Error = BayerError;

    /// Decode the IIDC colour filter value.
    fn try_from(v: u32) -> BayerResult<Self> {
        match v {
            512 => Ok(CFA::RGGB),
            513 => Ok(CFA::GBRG),
            514 => Ok(CFA::GRBG),
            515 => Ok(CFA::BGGR),
            _ => Err(BayerError::InvalidColorFilter),
        }
    }
}

impl fmt::Display for CFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CFA::RGGB => "RGGB",
            CFA::GBRG => "GBRG",
            CFA::GRBG => "GRBG",
            CFA::BGGR => "BGGR",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{read_mosaic_u16, BayerDepth, ScanParams, BLUE, CFA, GREEN, RED};
    use std::io::Cursor;

    const ALL: [CFA; 4] = [CFA::RGGB, CFA::GBRG, CFA::GRBG, CFA::BGGR];

    #[test]
    fn test_color_at() {
        assert_eq!(CFA::RGGB.color_at(0, 0), RED);
        assert_eq!(CFA::RGGB.color_at(1, 0), GREEN);
        assert_eq!(CFA::RGGB.color_at(0, 1), GREEN);
        assert_eq!(CFA::RGGB.color_at(1, 1), BLUE);
        assert_eq!(CFA::GBRG.color_at(1, 0), BLUE);
        assert_eq!(CFA::GBRG.color_at(0, 1), RED);
        assert_eq!(CFA::GRBG.color_at(3, 2), RED);
        assert_eq!(CFA::BGGR.color_at(5, 7), RED);
    }

    #[test]
    fn test_filters_match_color_at() {
        for &cfa in ALL.iter() {
            let filters = cfa.filters();
            for y in 0..8usize {
                for x in 0..2usize {
                    let shift = (((y << 1) & 14) + (x & 1)) << 1;
                    assert_eq!(((filters >> shift) & 3) as usize, cfa.color_at(x, y));
                }
            }
        }
    }

    #[test]
    fn test_scan_params_follow_next_y() {
        for &cfa in ALL.iter() {
            assert_eq!(cfa.scan_params().row(1), cfa.next_y().scan_params());
            assert_eq!(cfa.scan_params().row(2), cfa.scan_params());
        }
    }

    #[test]
    fn test_scan_params() {
        let p = CFA::GRBG.scan_params();
        assert_eq!(p, ScanParams { blue: 1, start_with_green: true });
        assert!(p.is_green(0));
        assert!(!p.is_green(1));
        assert_eq!(p.sides(), (RED, BLUE));
        assert_eq!(p.flip_blue().sides(), (BLUE, RED));
    }

    #[test]
    fn test_try_from() {
        assert_eq!(CFA::try_from(512).ok(), Some(CFA::RGGB));
        assert_eq!(CFA::try_from(515).ok(), Some(CFA::BGGR));
        assert!(CFA::try_from(516).is_err());
        assert!(CFA::try_from(0).is_err());
    }

    #[test]
    fn test_read_mosaic_u16() {
        let src = [0x01, 0x02, 0x03, 0x04];
        let be = read_mosaic_u16(&mut Cursor::new(&src[..]), 2, 1, BayerDepth::Depth16BE);
        assert_eq!(be.ok(), Some(vec![0x0102, 0x0304]));
        let le = read_mosaic_u16(&mut Cursor::new(&src[..]), 2, 1, BayerDepth::Depth16LE);
        assert_eq!(le.ok(), Some(vec![0x0201, 0x0403]));
        let short = read_mosaic_u16(&mut Cursor::new(&src[..]), 2, 2, BayerDepth::Depth16LE);
        assert!(short.is_err());
    }
}
