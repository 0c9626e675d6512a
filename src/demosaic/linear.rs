//! Demosaicing using linear interpolation.
//!
//! ```text
//!   green_kernel = (1 / 4) *
//!       [ 0 1 0
//!       ; 1 4 1
//!       ; 0 1 0 ];
//!
//!   red/blue_kernel = (1 / 4) *
//!       [ 1 2 1
//!       ; 2 4 2
//!       ; 1 2 1 ];
//! ```
//!
//! Means are rounded to nearest: `(a + b + 1) >> 1` for two terms and
//! `(a + b + c + d + 2) >> 2` for four.  A 1-pixel border is left black.

use crate::bayer::{ScanParams, GREEN};
use crate::border::clear_border;
use crate::demosaic::{check_size, for_each_row};
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::BayerResult;

const PADDING: usize = 1;

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 2 * PADDING)?;

    let (w, h) = (src.width(), src.height());
    let mut dst = Raster::new(w, h, src.depth());
    interpolate(src, &mut dst);
    Ok(dst)
}

/// Bilinear pass into an existing raster of the same size.
pub(crate) fn interpolate<T: Sample>(src: &BayerImage<T>, dst: &mut Raster<T>) {
    let (w, h) = (src.width(), src.height());
    let max = src.max();
    let params = src.cfa().scan_params();

    clear_border(dst, PADDING);
    for_each_row(dst, PADDING..(h - PADDING), |cy, row| {
        // Window origin is one row up and one column left of the output.
        let y = cy - PADDING;
        let p = params.row(y);

        for x in 0..(w - 2 * PADDING) {
            let px = &mut row[3 * (x + PADDING)..3 * (x + PADDING) + 3];
            apply_kernel(src, p, x, y, max, px);
        }
    });
}

#[inline(always)]
fn apply_kernel<T: Sample>(src: &BayerImage<T>, p: ScanParams, x: usize, y: usize, max: i32, px: &mut [T]) {
    let s = |dx: usize, dy: usize| src.at(x + dx, y + dy);
    let (minus, plus) = p.sides();

    if p.is_green(x) {
        let t0 = (s(1, 0) + s(1, 2) + 1) >> 1;
        let t1 = (s(0, 1) + s(2, 1) + 1) >> 1;
        px[minus] = T::from_i32(t0, max);
        px[GREEN] = T::from_i32(s(1, 1), max);
        px[plus] = T::from_i32(t1, max);
    } else {
        let t0 = (s(0, 0) + s(2, 0) + s(0, 2) + s(2, 2) + 2) >> 2;
        let t1 = (s(1, 0) + s(0, 1) + s(2, 1) + s(1, 2) + 2) >> 2;
        px[minus] = T::from_i32(t0, max);
        px[GREEN] = T::from_i32(t1, max);
        px[plus] = T::from_i32(s(1, 1), max);
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::raster::BayerImage;
    use crate::CFA;

    #[test]
    fn test_even() {
        // R: set.seed(0); matrix(floor(runif(n=16, min=0, max=256)), nrow=4, byrow=TRUE)
        let src: [u8; 16] = [
            229, 67, 95,146,
            232, 51,229,241,
            169,161, 15, 52,
             45,175, 98,197 ];

        let expected = [
              0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0,
              0,  0,  0,  127,172, 51,   55,229,146,    0,  0,  0,
              0,  0,  0,   92,161,113,   15,135,166,    0,  0,  0,
              0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0 ];

        let img = BayerImage::new(&src[..], 4, 4, 8, CFA::RGGB).unwrap();
        let dst = run(&img).unwrap();
        assert_eq!(dst.as_slice(), &expected[..]);
    }

    #[test]
    fn test_gbrg() {
        let src: [u8; 16] = [
            229, 67, 95,146,
            232, 51,229,241,
            169,161, 15, 52,
             45,175, 98,197 ];

        let expected = [
              0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0,
              0,  0,  0,  231, 51,114,  229,101,107,    0,  0,  0,
              0,  0,  0,  151,103,161,  164, 15,107,    0,  0,  0,
              0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0 ];

        let img = BayerImage::new(&src[..], 4, 4, 8, CFA::GBRG).unwrap();
        let dst = run(&img).unwrap();
        assert_eq!(dst.as_slice(), &expected[..]);
    }

    #[test]
    fn test_u16_rounding() {
        // Diagonal mean of 1, 2, 2, 2 rounds up; axial mean of 0, 0, 1, 1 rounds up.
        let src: [u16; 16] = [
            1, 0, 2, 0,
            0, 9, 1, 0,
            2, 1, 2, 0,
            0, 0, 0, 0 ];

        let img = BayerImage::new(&src[..], 4, 4, 10, CFA::RGGB).unwrap();
        let dst = run(&img).unwrap();
        assert_eq!(dst.pixel(1, 1), [2, 1, 9]);
    }
}
