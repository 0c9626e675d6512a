//! Demosaicing using nearest neighbour interpolation.
//!
//! Every output pixel takes its three channels from the 2x2 window whose
//! top-left corner it occupies.  The last row and column have no such
//! window and are left black.

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
                px[GREEN] = T::from_i32(s(1, 1), max);
                px[plus] = T::from_i32(s(0, 1), max);
            } else {
                px[minus] = T::from_i32(s(0, 0), max);
                px[GREEN] = T::from_i32(s(1, 0), max);
                px[plus] = T::from_i32(s(1, 1), max);
            }
        }
    });

    clear_trailing_edge(&mut dst);
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::raster::BayerImage;
    use crate::CFA;

    #[test]
    fn test_even() {
        let src: [u8; 16] = [
            10, 20, 10, 20,
            30, 40, 30, 40,
            10, 20, 10, 20,
            30, 40, 30, 40 ];

        let expected = [
            10, 20, 40,   10, 30, 40,   10, 20, 40,    0,  0,  0,
            10, 20, 40,   10, 30, 40,   10, 20, 40,    0,  0,  0,
            10, 20, 40,   10, 30, 40,   10, 20, 40,    0,  0,  0,
             0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0 ];

        let img = BayerImage::new(&src[..], 4, 4, 8, CFA::RGGB).unwrap();
        let dst = run(&img).unwrap();
        assert_eq!(dst.as_slice(), &expected[..]);
    }

    #[test]
    fn test_random() {
        // R: set.seed(0); matrix(floor(runif(n=16, min=0, max=256)), nrow=4, byrow=TRUE)
        let src: [u8; 16] = [
            229, 67, 95,146,
            232, 51,229,241,
            169,161, 15, 52,
             45,175, 98,197 ];

        let expected = [
            229, 67, 51,   95,229, 51,   95,146,241,    0,  0,  0,
            169,161, 51,   15,229, 51,   15, 52,241,    0,  0,  0,
            169,161,175,   15, 98,175,   15, 52,197,    0,  0,  0,
              0,  0,  0,    0,  0,  0,    0,  0,  0,    0,  0,  0 ];

        let img = BayerImage::new(&src[..], 4, 4, 8, CFA::RGGB).unwrap();
        let dst = run(&img).unwrap();
        assert_eq!(dst.as_slice(), &expected[..]);
    }
}
