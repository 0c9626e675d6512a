//! Border policy.
//!
//! Kernels that cannot be evaluated near the edge of the image leave
//! those pixels black.  If `n` is the border width, the zeroed region of
//! a raster looks like this:
//!
//! ```text
//!   0 0 0 0 0 0 0 0
//!   0 0 x x x x 0 0     n = 2
//!   0 0 x x x x 0 0
//!   0 0 0 0 0 0 0 0
//! ```

use crate::raster::Raster;
use crate::sample::Sample;

/// Zero the outermost `n` rows and columns of `dst`.
pub fn clear_border<T: Sample>(dst: &mut Raster<T>, n: usize) {
    let (w, h) = (dst.width(), dst.height());
    let n_x = n.min(w);
    let n_y = n.min(h);

    for y in 0..h {
        let row = dst.row_mut(y);
        if y < n_y || y >= h - n_y {
            row.iter_mut().for_each(|e| *e = T::default());
        } else {
            row[..3 * n_x].iter_mut().for_each(|e| *e = T::default());
            row[3 * (w - n_x)..].iter_mut().for_each(|e| *e = T::default());
        }
    }
}

/// Zero the last row and the last column of `dst`.
pub fn clear_trailing_edge<T: Sample>(dst: &mut Raster<T>) {
    let (w, h) = (dst.width(), dst.height());
    if w == 0 || h == 0 {
        return;
    }

    for y in 0..h - 1 {
        let row = dst.row_mut(y);
        row[3 * (w - 1)..].iter_mut().for_each(|e| *e = T::default());
    }
    dst.row_mut(h - 1).iter_mut().for_each(|e| *e = T::default());
}

#[cfg(test)]
mod tests {
    use super::{clear_border, clear_trailing_edge};
    use crate::raster::Raster;

    fn filled(w: usize, h: usize) -> Raster<u8> {
        let mut dst = Raster::new(w, h, 8);
        dst.as_mut_slice().iter_mut().for_each(|e| *e = 9);
        dst
    }

    #[test]
    fn test_clear_border() {
        let mut dst = filled(6, 5);
        clear_border(&mut dst, 2);

        for y in 0..5 {
            for x in 0..6 {
                let inside = (2..4).contains(&x) && y == 2;
                let expected = if inside { [9, 9, 9] } else { [0, 0, 0] };
                assert_eq!(dst.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_clear_border_wider_than_image() {
        let mut dst = filled(4, 4);
        clear_border(&mut dst, 3);
        assert!(dst.as_slice().iter().all(|&e| e == 0));
    }

    #[test]
    fn test_clear_trailing_edge() {
        let mut dst = filled(3, 3);
        clear_trailing_edge(&mut dst);

        let expected = [
            9, 9, 9, 9, 9, 9, 0, 0, 0, //
            9, 9, 9, 9, 9, 9, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(dst.as_slice(), &expected[..]);
    }
}
