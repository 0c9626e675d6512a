//! Sample types.
//!
//! Every algorithm is generic over the width of a sample.  Intermediate
//! values are computed in an `i32` accumulator and clipped back into
//! `0..=max`, where `max` is `(1 << depth) - 1` for the active bit depth.

/// A single mosaic or RGB sample.
pub trait Sample: Copy + Default + Send + Sync + 'static {
    /// Width of the storage type in bits.
    const BITS: u32;

    fn to_i32(self) -> i32;

    /// Store `v`, clamping it into `0..=max`.
    fn from_i32(v: i32, max: i32) -> Self;
}

impl Sample for u8 {
    const BITS: u32 = 8;

    #[inline(always)]
    fn to_i32(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_i32(v: i32, max: i32) -> Self {
        clip(v, max) as u8
    }
}

impl Sample for u16 {
    const BITS: u32 = 16;

    #[inline(always)]
    fn to_i32(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_i32(v: i32, max: i32) -> Self {
        clip(v, max) as u16
    }
}

/// Clamp `v` into `0..=max`.
#[inline(always)]
pub fn clip(v: i32, max: i32) -> i32 {
    if v < 0 {
        0
    } else if v > max {
        max
    } else {
        v
    }
}

/// Largest sample value representable with `depth` active bits.
#[inline]
pub fn max_value(depth: u32) -> i32 {
    ((1u32 << depth) - 1) as i32
}

#[cfg(test)]
mod tests {
    use super::{clip, max_value, Sample};

    #[test]
    fn test_clip() {
        assert_eq!(clip(-7, 255), 0);
        assert_eq!(clip(300, 255), 255);
        assert_eq!(clip(128, 255), 128);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(max_value(8), 255);
        assert_eq!(max_value(12), 4095);
        assert_eq!(max_value(16), 65535);
    }

    #[test]
    fn test_from_i32() {
        assert_eq!(u8::from_i32(256, 255), 255);
        assert_eq!(u16::from_i32(5000, max_value(12)), 4095);
        assert_eq!(u16::from_i32(-1, max_value(12)), 0);
    }
}
