//! Demosaicing by collapsing each 2x2 tile into one pixel.
//!
//! The red and blue samples of the tile are copied, and green is the
//! mean of the two green samples rounded to nearest.  The result is half the
//! width and half the height of the mosaic.

use crate::bayer::GREEN;
use crate::demosaic::{check_size, for_each_row};
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::BayerResult;

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 2)?;

    let (w, h) = (src.width() / 2, src.height() / 2);
    let max = src.max();
    let cfa = src.cfa();
    let mut dst = Raster::new(w, h, src.depth());

    for_each_row(&mut dst, 0..h, |ty, row| {
        for tx in 0..w {
            let px = &mut row[3 * tx..3 * tx + 3];
            let mut green = 0;

            for &(dx, dy) in [(0usize, 0usize), (1, 0), (0, 1), (1, 1)].iter() {
                let (x, y) = (2 * tx + dx, 2 * ty + dy);
                match cfa.color_at(x, y) {
                    GREEN => green += src.at(x, y),
                    c => px[c] = T::from_i32(src.at(x, y), max),
                }
            }

            px[GREEN] = T::from_i32((green + 1) >> 1, max);
        }
    });

    Ok(dst)
}
