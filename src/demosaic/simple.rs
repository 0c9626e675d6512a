//! Demosaicing by averaging within a 2x2 window.
//!
//! Like nearest neighbour, but green is the rounded mean of the two green
//! samples of the window instead of a copy of one of them.

use crate::bayer::GREEN;
use crate::border::clear_trailing_edge;
use crate::demosaic::{check_size, for_each_row};
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::BayerResult;

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 2)?;

    let (w, h) = (src.width(), src.height());
    let max = src.max();
    let params = src.cfa().scan_params();
    let mut dst = Raster::new(w, h, src.depth());

    for_each_row(&mut dst, 0..(h - 1), |y, row| {
        let p = params.row(y);
        let (minus, plus) = p.sides();

        for x in 0..(w - 1) {
            let s = |dx: usize, dy: usize| src.at(x + dx, y + dy);
            let px = &mut row[3 * x..3 * x + 3];

            if p.is_green(x) {
                px[minus] = T::from_i32(s(1, 0), max);
                px[GREEN] = T::from_i32((s(0, 0) + s(1, 1) + 1) >> 1, max);
                px[plus] = T::from_i32(s(0, 1), max);
            } else {
                px[minus] = T::from_i32(s(0, 0), max);
                px[GREEN] = T::from_i32((s(1, 0) + s(0, 1) + 1) >> 1, max);
                px[plus] = T::from_i32(s(1, 1), max);
            }
        }
    });

    clear_trailing_edge(&mut dst);
    Ok(dst)
}
