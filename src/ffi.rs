//! Foreign function interface.
//!
//! Selectors are passed as their IIDC numeric values: the colour filter
//! as 512..=515 (RGGB, GBRG, GRBG, BGGR) and the method as 0..=6 in
//! [`Demosaic`] order.  The functions return 0 on success and a negative
//! [`BayerError::code`] otherwise.  The output buffer must hold
//! `sx * sy * 3` samples, or a quarter of that when downsampling.

use std::slice;

use libc::{c_int, c_uchar, c_uint, c_ushort};
use tracing::warn;

use crate::demosaic::{run_demosaic, Demosaic};
use crate::raster::BayerImage;
use crate::sample::Sample;
use crate::{BayerError, BayerResult, CFA};

/// Demosaic an 8-bit mosaic.
///
/// # Safety
///
/// `bayer` must point to `sx * sy` readable samples and `rgb` to
/// `3 * ow * oh` writable samples, where `(ow, oh)` is `(sx, sy)`, or
/// `(sx / 2, sy / 2)` for [`Demosaic::Downsample`].  The buffers must
/// not overlap.
#[no_mangle]
pub unsafe extern "C" fn bayerrs_decode_8bit(
        bayer: *const c_uchar, rgb: *mut c_uchar,
        sx: c_uint, sy: c_uint, tile: c_uint, method: c_uint)
        -> c_int {
    to_code(decode(bayer, rgb, sx, sy, 8, tile, method))
}

/// Demosaic a 16-bit mosaic with `bits` active bits per sample.
///
/// # Safety
///
/// Same buffer contract as [`bayerrs_decode_8bit`], counted in 16-bit
/// samples.
#[no_mangle]
pub unsafe extern "C" fn bayerrs_decode_16bit(
        bayer: *const c_ushort, rgb: *mut c_ushort,
        sx: c_uint, sy: c_uint, tile: c_uint, method: c_uint, bits: c_uint)
        -> c_int {
    to_code(decode(bayer, rgb, sx, sy, bits, tile, method))
}

/// # Safety
///
/// `bayer` and `rgb` must satisfy the buffer contract of the exported
/// functions.
unsafe fn decode<T: Sample>(
        bayer: *const T, rgb: *mut T,
        sx: c_uint, sy: c_uint, bits: c_uint, tile: c_uint, method: c_uint)
        -> BayerResult<()> {
    let cfa = CFA::try_from(tile)?;
    let method = Demosaic::try_from(method)?;
    let (w, h) = (sx as usize, sy as usize);
    let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
    let (ow, oh) = method.output_size(w, h);
    let out_len = ow
        .checked_mul(oh)
        .and_then(|n| n.checked_mul(3))
        .ok_or(BayerError::WrongResolution)?;

    if bayer.is_null() {
        return Err(BayerError::BufferTooSmall(len, 0));
    }
    if rgb.is_null() {
        return Err(BayerError::BufferTooSmall(out_len, 0));
    }

    let src = slice::from_raw_parts(bayer, len);
    let img = BayerImage::new(src, w, h, bits, cfa)?;
    let dst = run_demosaic(&img, method)?;

    let out = slice::from_raw_parts_mut(rgb, out_len);
    out.copy_from_slice(dst.as_slice());
    Ok(())
}

fn to_code(result: BayerResult<()>) -> c_int {
    match result {
        Ok(()) => 0,
        Err(e) => {
            warn!(error = %e, "rejected decode request");
            e.code()
        }
    }
}
