//! Raster implementation.

use byteorder::{BigEndian, ByteOrder};

use crate::sample::{max_value, Sample};
use crate::{BayerError, BayerResult, CFA};

/// Borrowed single-channel mosaic, as delivered by the camera.
#[derive(Clone, Copy, Debug)]
pub struct BayerImage<'a, T> {
    w: usize,
    h: usize,
    depth: u32,
    cfa: CFA,
    data: &'a [T],
}

/// Owned interleaved RGB raster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Raster<T> {
    w: usize,
    h: usize,
    depth: u32,
    buf: Vec<T>,
}

impl<'a, T: Sample> BayerImage<'a, T> {
    /// Wrap a row-major `w` x `h` mosaic with `depth` active bits per
    /// sample.
    ///
    /// # Examples
    ///
    /// ```
    /// const IMG_W: usize = 320;
    /// const IMG_H: usize = 200;
    /// let buf = [0u16; IMG_W * IMG_H];
    ///
    /// let img = dc1394_bayer::BayerImage::new(&buf, IMG_W, IMG_H, 12, dc1394_bayer::CFA::RGGB);
    /// assert!(img.is_ok());
    /// ```
    pub fn new(data: &'a [T], w: usize, h: usize, depth: u32, cfa: CFA) -> BayerResult<Self> {
        if w < 2 || h < 2 || w % 2 != 0 || h % 2 != 0 {
            return Err(BayerError::WrongResolution);
        }
        let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
        if data.len() < len {
            return Err(BayerError::BufferTooSmall(len, data.len()));
        }
        if depth == 0 || depth > T::BITS || (T::BITS == 8 && depth != 8) {
            return Err(BayerError::WrongDepth);
        }

        Ok(BayerImage {
            w,
            h,
            depth,
            cfa,
            data: &data[..len],
        })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn cfa(&self) -> CFA {
        self.cfa
    }

    /// Largest valid sample value for this image's depth.
    pub fn max(&self) -> i32 {
        max_value(self.depth)
    }

    /// Sample at column `x`, row `y`.
    #[inline(always)]
    pub fn at(&self, x: usize, y: usize) -> i32 {
        self.data[y * self.w + x].to_i32()
    }
}

impl<T: Sample> Raster<T> {
    /// Allocate a zeroed `w` x `h` raster.
    pub fn new(w: usize, h: usize, depth: u32) -> Self {
        let len = w.checked_mul(h).and_then(|n| n.checked_mul(3)).expect("overflow");
        Raster {
            w,
            h,
            depth,
            buf: vec![T::default(); len],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of samples per row.
    pub fn stride(&self) -> usize {
        3 * self.w
    }

    pub fn max(&self) -> i32 {
        max_value(self.depth)
    }

    pub fn pixel(&self, x: usize, y: usize) -> [T; 3] {
        let i = 3 * (y * self.w + x);
        [self.buf[i], self.buf[i + 1], self.buf[i + 2]]
    }

    /// Channel `c` of the pixel at (x, y).
    #[inline(always)]
    pub(crate) fn get(&self, x: usize, y: usize, c: usize) -> i32 {
        self.buf[3 * (y * self.w + x) + c].to_i32()
    }

    /// Store `v` into channel `c` of the pixel at (x, y), clipped.
    #[inline(always)]
    pub(crate) fn set(&mut self, x: usize, y: usize, c: usize, v: i32) {
        let max = self.max();
        self.buf[3 * (y * self.w + x) + c] = T::from_i32(v, max);
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [T] {
        let stride = self.stride();
        &mut self.buf[y * stride..(y + 1) * stride]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buf
    }
}

impl Raster<u16> {
    /// Serialise the samples as big-endian bytes, the IIDC byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; 2 * self.buf.len()];
        BigEndian::write_u16_into(&self.buf, &mut out);
        out
    }
}

impl Raster<u8> {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{BayerImage, Raster};
    use crate::{BayerError, CFA};

    #[test]
    fn test_bayer_image_validation() {
        let buf = [0u8; 16];
        assert!(BayerImage::new(&buf, 4, 4, 8, CFA::RGGB).is_ok());
        assert!(matches!(
            BayerImage::new(&buf, 3, 4, 8, CFA::RGGB),
            Err(BayerError::WrongResolution)
        ));
        assert!(matches!(
            BayerImage::new(&buf, 4, 6, 8, CFA::RGGB),
            Err(BayerError::BufferTooSmall(24, 16))
        ));
        assert!(matches!(
            BayerImage::new(&buf, 4, 4, 7, CFA::RGGB),
            Err(BayerError::WrongDepth)
        ));

        let buf16 = [0u16; 16];
        assert!(BayerImage::new(&buf16, 4, 4, 12, CFA::RGGB).is_ok());
        assert!(BayerImage::new(&buf16, 4, 4, 17, CFA::RGGB).is_err());
        assert!(BayerImage::new(&buf16, 4, 4, 0, CFA::RGGB).is_err());
    }

    #[test]
    fn test_raster_set_clips() {
        let mut dst = Raster::<u16>::new(2, 2, 10);
        dst.set(1, 1, 2, 5000);
        dst.set(0, 1, 0, -3);
        assert_eq!(dst.pixel(1, 1), [0, 0, 1023]);
        assert_eq!(dst.pixel(0, 1), [0, 0, 0]);
    }

    #[test]
    fn test_to_bytes() {
        let mut dst = Raster::<u16>::new(1, 1, 16);
        dst.as_mut_slice().copy_from_slice(&[0x0102, 0x0304, 0x0506]);
        assert_eq!(dst.to_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_row_mut() {
        let mut dst = Raster::<u8>::new(2, 2, 8);
        dst.row_mut(1).copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(dst.pixel(0, 1), [1, 2, 3]);
        assert_eq!(dst.pixel(1, 1), [4, 5, 6]);
        assert_eq!(dst.pixel(0, 0), [0, 0, 0]);
    }
}
