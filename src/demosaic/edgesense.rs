//! Demosaicing using edge-sensing interpolation.
//!
//! Green is interpolated first, along whichever axis the local
//! red/blue gradient is flatter:
//!
//! ```text
//!   dh = | (X[x-2] + X[x+2]) / 2 - X[x] |
//!   dv = | (X[y-2] + X[y+2]) / 2 - X[y] |
//! ```
//!
//! Red and blue are then reconstructed from colour differences to the
//! now complete green plane.  A 3-pixel border is left black.

use crate::bayer::{BLUE, GREEN, RED};
use crate::border::clear_border;
use crate::demosaic::check_size;
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::BayerResult;

const PADDING: usize = 3;

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 2 * PADDING)?;

    let (w, h) = (src.width(), src.height());
    let cfa = src.cfa();
    let mut dst = Raster::new(w, h, src.depth());

    for y in 0..h {
        for x in 0..w {
            dst.set(x, y, cfa.color_at(x, y), src.at(x, y));
        }
    }

    interpolate_green(src, &mut dst);
    interpolate_chroma(src, &mut dst, RED);
    interpolate_chroma(src, &mut dst, BLUE);

    clear_border(&mut dst, PADDING);
    Ok(dst)
}

fn interpolate_green<T: Sample>(src: &BayerImage<T>, dst: &mut Raster<T>) {
    let (w, h) = (src.width(), src.height());
    let cfa = src.cfa();

    for y in 2..(h - 2) {
        for x in 2..(w - 2) {
            let c = cfa.color_at(x, y);
            if c == GREEN {
                continue;
            }

            let here = dst.get(x, y, c);
            let dh = (((dst.get(x - 2, y, c) + dst.get(x + 2, y, c)) >> 1) - here).abs();
            let dv = (((dst.get(x, y - 2, c) + dst.get(x, y + 2, c)) >> 1) - here).abs();

            let left = dst.get(x - 1, y, GREEN);
            let right = dst.get(x + 1, y, GREEN);
            let up = dst.get(x, y - 1, GREEN);
            let down = dst.get(x, y + 1, GREEN);

            let t = if dh < dv {
                (left + right) >> 1
            } else if dh > dv {
                (up + down) >> 1
            } else {
                (left + right + up + down) >> 2
            };
            dst.set(x, y, GREEN, t);
        }
    }
}

/// Fill channel `k` (red or blue) from the colour difference `k - G`.
fn interpolate_chroma<T: Sample>(src: &BayerImage<T>, dst: &mut Raster<T>, k: usize) {
    let (w, h) = (src.width(), src.height());
    let cfa = src.cfa();

    for y in 1..(h - 1) {
        for x in 1..(w - 1) {
            let c = cfa.color_at(x, y);
            if c == k {
                continue;
            }

            let img: &Raster<T> = dst;
            let diff = |x: usize, y: usize| img.get(x, y, k) - img.get(x, y, GREEN);
            let green = img.get(x, y, GREEN);

            let t = if c != GREEN {
                let d = diff(x - 1, y - 1) + diff(x + 1, y - 1) + diff(x - 1, y + 1) + diff(x + 1, y + 1);
                green + (d >> 2)
            } else if cfa.color_at(x - 1, y) == k {
                green + ((diff(x - 1, y) + diff(x + 1, y)) >> 1)
            } else {
                green + ((diff(x, y - 1) + diff(x, y + 1)) >> 1)
            };
            dst.set(x, y, k, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::raster::BayerImage;
    use crate::CFA;

    // Python: random.seed(3); [random.randrange(256) for _ in range(64)]
    const SRC: [u8; 64] = [
        121, 66,189,242, 33,  6,240,132,
        119, 98,240,243,203, 77,118, 77,
        199,  7, 32, 81, 21,154, 15,137,
        242,198,218,202,227, 68,187, 49,
         18, 69,253,111,132,223,154,215,
        197,179,208,118,172, 14,143, 83,
        167, 53,108,136,145, 63, 32,246,
        247, 45,176, 34,210, 77, 10,150 ];

    fn interior(src: &[u8], cfa: CFA) -> Vec<[u8; 3]> {
        let img = BayerImage::new(src, 8, 8, 8, cfa).unwrap();
        let dst = run(&img).unwrap();
        vec![dst.pixel(3, 3), dst.pixel(4, 3), dst.pixel(3, 4), dst.pixel(4, 4)]
    }

    #[test]
    fn test_rggb() {
        let expected = vec![[93, 96, 202], [145, 227, 220], [159, 111, 161], [132, 199, 162]];
        assert_eq!(interior(&SRC, CFA::RGGB), expected);
    }

    #[test]
    fn test_gbrg() {
        let expected = vec![[255, 202, 205], [227, 135, 177], [235, 160, 111], [231, 132, 147]];
        assert_eq!(interior(&SRC, CFA::GBRG), expected);
    }

    #[test]
    fn test_vertical_edge_is_kept() {
        let mut src = [0u8; 64];
        for (i, v) in src.iter_mut().enumerate() {
            *v = if i % 8 >= 4 { 200 } else { 20 };
        }

        let expected = vec![[20, 20, 20], [200, 200, 200], [20, 20, 20], [200, 200, 200]];
        assert_eq!(interior(&src, CFA::RGGB), expected);
    }

    #[test]
    fn test_border_is_black() {
        let img = BayerImage::new(&SRC[..], 8, 8, 8, CFA::GRBG).unwrap();
        let dst = run(&img).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                if !(3..5).contains(&x) || !(3..5).contains(&y) {
                    assert_eq!(dst.pixel(x, y), [0, 0, 0], "pixel ({}, {})", x, y);
                }
            }
        }
    }
}
