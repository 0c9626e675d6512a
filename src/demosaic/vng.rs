//! Demosaicing using threshold-based variable number of gradients.
//!
//! E. Chang, S. Cheung, D. Pan, "Color filter array recovery using a
//! threshold-based variable number of gradients", Proc. SPIE 3650, 1999.
//! The gradient tables follow the layout of Dave Coffin's dcraw.
//!
//! The image is first decoded with bilinear interpolation.  For every
//! pixel at least two pixels from the edge, eight directional gradients
//! are then measured on that estimate, and the directions whose gradient
//! is at most `min + (max - min) / 2` are averaged.  Results go through a
//! three-row window so that the rows still being read stay untouched.

use std::sync::OnceLock;

use tracing::trace;

use crate::demosaic::{check_size, linear};
use crate::raster::{BayerImage, Raster};
use crate::sample::Sample;
use crate::{BayerResult, CFA};

/// `(y1, x1, y2, x2, weight, gradient bits)` for every candidate
/// gradient term inside the 5x5 window.
#[rustfmt::skip]
const TERMS: [[i32; 6]; 64] = [
    [-2,-2, 0,-1, 0,0x01], [-2,-2, 0, 0, 1,0x01], [-2,-1,-1, 0, 0,0x01],
    [-2,-1, 0,-1, 0,0x02], [-2,-1, 0, 0, 0,0x03], [-2,-1, 0, 1, 1,0x01],
    [-2, 0, 0,-1, 0,0x06], [-2, 0, 0, 0, 1,0x02], [-2, 0, 0, 1, 0,0x03],
    [-2, 1,-1, 0, 0,0x04], [-2, 1, 0,-1, 1,0x04], [-2, 1, 0, 0, 0,0x06],
    [-2, 1, 0, 1, 0,0x02], [-2, 2, 0, 0, 1,0x04], [-2, 2, 0, 1, 0,0x04],
    [-1,-2,-1, 0, 0,0x80], [-1,-2, 0,-1, 0,0x01], [-1,-2, 1,-1, 0,0x01],
    [-1,-2, 1, 0, 1,0x01], [-1,-1,-1, 1, 0,0x88], [-1,-1, 1,-2, 0,0x40],
    [-1,-1, 1,-1, 0,0x22], [-1,-1, 1, 0, 0,0x33], [-1,-1, 1, 1, 1,0x11],
    [-1, 0,-1, 2, 0,0x08], [-1, 0, 0,-1, 0,0x44], [-1, 0, 0, 1, 0,0x11],
    [-1, 0, 1,-2, 1,0x40], [-1, 0, 1,-1, 0,0x66], [-1, 0, 1, 0, 1,0x22],
    [-1, 0, 1, 1, 0,0x33], [-1, 0, 1, 2, 1,0x10], [-1, 1, 1,-1, 1,0x44],
    [-1, 1, 1, 0, 0,0x66], [-1, 1, 1, 1, 0,0x22], [-1, 1, 1, 2, 0,0x10],
    [-1, 2, 0, 1, 0,0x04], [-1, 2, 1, 0, 1,0x04], [-1, 2, 1, 1, 0,0x04],
    [ 0,-2, 0, 0, 1,0x80], [ 0,-1, 0, 1, 1,0x88], [ 0,-1, 1,-2, 0,0x40],
    [ 0,-1, 1, 0, 0,0x11], [ 0,-1, 2,-2, 0,0x40], [ 0,-1, 2,-1, 0,0x20],
    [ 0,-1, 2, 0, 0,0x30], [ 0,-1, 2, 1, 1,0x10], [ 0, 0, 0, 2, 1,0x08],
    [ 0, 0, 2,-2, 1,0x40], [ 0, 0, 2,-1, 0,0x60], [ 0, 0, 2, 0, 1,0x20],
    [ 0, 0, 2, 1, 0,0x30], [ 0, 0, 2, 2, 1,0x10], [ 0, 1, 1, 0, 0,0x44],
    [ 0, 1, 1, 2, 0,0x10], [ 0, 1, 2,-1, 1,0x40], [ 0, 1, 2, 0, 0,0x60],
    [ 0, 1, 2, 1, 0,0x20], [ 0, 1, 2, 2, 0,0x10], [ 1,-2, 1, 0, 0,0x80],
    [ 1,-1, 1, 1, 0,0x88], [ 1, 0, 1, 2, 0,0x08], [ 1, 0, 2,-1, 0,0x40],
    [ 1, 0, 2, 1, 0,0x10],
];

/// The eight neighbour directions, clockwise from the top-left.
const CHOOD: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1),
];

/// One `|a - b| << weight` contribution to a set of gradients.
#[derive(Clone, Copy, Debug)]
struct Term {
    a: (isize, isize),
    b: (isize, isize),
    color: usize,
    weight: u32,
    grads: u8,
}

/// Neighbour in one direction, with the same-colour sample two steps
/// out when the direct neighbour is of a different colour.
#[derive(Clone, Copy, Debug)]
struct Neighbour {
    d: (isize, isize),
    pair: Option<(isize, isize)>,
}

#[derive(Debug)]
struct Cell {
    color: usize,
    terms: Vec<Term>,
    neighbours: [Neighbour; 8],
}

/// Gradient program for each position of the 8x2 filter tile.
#[derive(Debug)]
pub(crate) struct GradientTable {
    cells: Vec<Cell>,
}

static TABLES: [OnceLock<GradientTable>; 4] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

impl GradientTable {
    /// The table for `cfa`, built on first use.
    pub(crate) fn for_cfa(cfa: CFA) -> &'static GradientTable {
        let slot = match cfa {
            CFA::RGGB => 0,
            CFA::GBRG => 1,
            CFA::GRBG => 2,
            CFA::BGGR => 3,
        };
        TABLES[slot].get_or_init(|| GradientTable::build(cfa))
    }

    fn build(cfa: CFA) -> Self {
        let filters = cfa.filters();
        let fc = |row: isize, col: isize| -> usize {
            ((filters >> ((((row << 1) & 14) + (col & 1)) << 1)) & 3) as usize
        };

        let mut cells = Vec::with_capacity(16);
        for row in 0..8isize {
            for col in 0..2isize {
                let mut terms = Vec::new();
                for &[y1, x1, y2, x2, weight, grads] in TERMS.iter() {
                    let (y1, x1, y2, x2) = (y1 as isize, x1 as isize, y2 as isize, x2 as isize);
                    let color = fc(row + y1, col + x1);
                    if fc(row + y2, col + x2) != color {
                        continue;
                    }
                    let diag = if fc(row, col + 1) == color && fc(row + 1, col) == color {
                        2
                    } else {
                        1
                    };
                    if (y1 - y2).abs() == diag && (x1 - x2).abs() == diag {
                        continue;
                    }
                    terms.push(Term {
                        a: (y1, x1),
                        b: (y2, x2),
                        color,
                        weight: weight as u32,
                        grads: grads as u8,
                    });
                }

                let color = fc(row, col);
                let mut neighbours = [Neighbour { d: (0, 0), pair: None }; 8];
                for (n, &(y, x)) in neighbours.iter_mut().zip(CHOOD.iter()) {
                    let (y, x) = (y as isize, x as isize);
                    let pair = fc(row + y, col + x) != color && fc(row + 2 * y, col + 2 * x) == color;
                    *n = Neighbour {
                        d: (y, x),
                        pair: if pair { Some((2 * y, 2 * x)) } else { None },
                    };
                }

                cells.push(Cell { color, terms, neighbours });
            }
        }

        trace!(
            cfa = %cfa,
            terms = cells.iter().map(|c| c.terms.len()).sum::<usize>(),
            "built VNG gradient table"
        );
        GradientTable { cells }
    }

    fn cell(&self, y: usize, x: usize) -> &Cell {
        &self.cells[(y & 7) * 2 + (x & 1)]
    }
}

pub fn run<T: Sample>(src: &BayerImage<T>) -> BayerResult<Raster<T>> {
    check_size(src, 4)?;

    let (w, h) = (src.width(), src.height());
    let table = GradientTable::for_cfa(src.cfa());
    let mut dst = Raster::new(w, h, src.depth());
    linear::interpolate(src, &mut dst);

    let stride = dst.stride();
    let mut prv2 = vec![T::default(); stride];
    let mut prv1 = vec![T::default(); stride];
    let mut curr = vec![T::default(); stride];
    let span = 3 * 2..3 * (w - 2);

    for y in 2..(h - 2) {
        for x in 2..(w - 2) {
            interpolate_pixel(&dst, table.cell(y, x), x, y, &mut curr[3 * x..3 * x + 3]);
        }

        if y > 3 {
            dst.row_mut(y - 2)[span.clone()].copy_from_slice(&prv2[span.clone()]);
        }
        rotate!(prv2 <- prv1 <- curr);
    }

    if h > 4 {
        dst.row_mut(h - 4)[span.clone()].copy_from_slice(&prv2[span.clone()]);
        dst.row_mut(h - 3)[span.clone()].copy_from_slice(&prv1[span]);
    }

    Ok(dst)
}

fn interpolate_pixel<T: Sample>(img: &Raster<T>, cell: &Cell, x: usize, y: usize, out: &mut [T]) {
    let at = |(dy, dx): (isize, isize), c: usize| {
        img.get((x as isize + dx) as usize, (y as isize + dy) as usize, c)
    };

    let mut gval = [0i32; 8];
    for term in cell.terms.iter() {
        let diff = (at(term.a, term.color) - at(term.b, term.color)).abs() << term.weight;
        for (g, v) in gval.iter_mut().enumerate() {
            if term.grads & (1 << g) != 0 {
                *v += diff;
            }
        }
    }

    let pix = [img.get(x, y, 0), img.get(x, y, 1), img.get(x, y, 2)];
    let gmin = gval.iter().copied().min().unwrap_or(0);
    let gmax = gval.iter().copied().max().unwrap_or(0);
    if gmax == 0 {
        for (o, &p) in out.iter_mut().zip(pix.iter()) {
            *o = T::from_i32(p, img.max());
        }
        return;
    }

    let thold = gmin + (gmax - gmin) / 2;
    let color = cell.color;
    let mut sum = [0i32; 3];
    let mut num = 0;

    for (n, _) in cell.neighbours.iter().zip(gval.iter()).filter(|&(_, &g)| g <= thold) {
        for (c, s) in sum.iter_mut().enumerate() {
            *s += match n.pair {
                Some(pair) if c == color => (pix[c] + at(pair, c)) >> 1,
                _ => at(n.d, c),
            };
        }
        num += 1;
    }

    for (c, o) in out.iter_mut().enumerate() {
        let mut t = pix[color];
        if c != color {
            t += (sum[c] - sum[color]) / num;
        }
        *o = T::from_i32(t, img.max());
    }
}
