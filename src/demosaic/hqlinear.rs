//! Demosaicing using high-quality linear interpolation.
//!
//! H.S. Malvar, L. He, R. Cutler, "High-Quality Linear Interpolation for
//! Demosaicing of Bayer-Patterned Color Images", ICASSP 2004.
//!
//! ```text
//!   G at R/B = (1 / 8) *           R/B at G, same row = (1 / 8) *
//!       [  0  0 -1  0  0               [  0   0  1/2  0   0
//!       ;  0  0  2  0  0               ;  0  -1   0  -1   0
//!       ; -1  2  4  2 -1               ; -1   4   5   4  -1
//!       ;  0  0  2  0  0               ;  0  -1   0  -1   0
//!       ;  0  0 -1  0  0 ];            ;  0   0  1/2  0   0 ];
//!
//!   B at R, R at B = (1 / 8) *
//!       [    0  0 -3/2  0    0
//!       ;    0  2   0   2    0
//!       ; -3/2  0   6   0 -3/2
//!       ;    0  2   0   2    0
//!       ;    0  0 -3/2  0    0 ];
//! ```
//!
//! Sums are accumulated in `i32`, divided by 8 with round-to-nearest,
//! then clipped.  A 2-pixel border is left black.

use crate::bayer::{ScanParams, GREEN};
use crate::border::clear_border;
use crate::demosaic::{check_size, for_each_row};
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::BayerResult;

const PADDING: usize = 2;

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 2 * PADDING)?;

    let (w, h) = (src.width(), src.height());
    let max = src.max();
    // The window is one tile further in than for bilinear decoding,
    // which swaps the side the non-green sample lands on.
    let params = src.cfa().scan_params().flip_blue();
    let mut dst = Raster::new(w, h, src.depth());

    clear_border(&mut dst, PADDING);
    for_each_row(&mut dst, PADDING..(h - PADDING), |cy, row| {
        let y = cy - PADDING;
        let p = params.row(y);

        for x in 0..(w - 2 * PADDING) {
            let px = &mut row[3 * (x + PADDING)..3 * (x + PADDING) + 3];
            apply_kernel(src, p, x, y, max, px);
        }
    });

    Ok(dst)
}

#[inline(always)]
fn apply_kernel<T: Sample>(src: &BayerImage<T>, p: ScanParams, x: usize, y: usize, max: i32, px: &mut [T]) {
    let s = |dx: usize, dy: usize| src.at(x + dx, y + dy);
    let (minus, plus) = p.sides();
    let c = s(2, 2);
    let diag = s(1, 1) + s(3, 1) + s(1, 3) + s(3, 3);

    if p.is_green(x) {
        let t0 = c * 5 + ((s(2, 1) + s(2, 3)) << 2) - s(2, 0) - diag - s(2, 4)
            + ((s(0, 2) + s(4, 2) + 1) >> 1);
        let t1 = c * 5 + ((s(1, 2) + s(3, 2)) << 2) - s(0, 2) - diag - s(4, 2)
            + ((s(2, 0) + s(2, 4) + 1) >> 1);

        px[minus] = T::from_i32((t0 + 4) >> 3, max);
        px[GREEN] = T::from_i32(c, max);
        px[plus] = T::from_i32((t1 + 4) >> 3, max);
    } else {
        let far = s(2, 0) + s(0, 2) + s(4, 2) + s(2, 4);
        let axial = s(2, 1) + s(1, 2) + s(3, 2) + s(2, 3);
        let t0 = (diag << 1) - ((far * 3 + 1) >> 1) + c * 6;
        let t1 = (axial << 1) - far + (c << 2);

        px[minus] = T::from_i32((t0 + 4) >> 3, max);
        px[GREEN] = T::from_i32((t1 + 4) >> 3, max);
        px[plus] = T::from_i32(c, max);
    }
}
