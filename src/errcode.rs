//! Bayer error codes.

use quick_error::quick_error;
use std::io;

use crate::frame::ColorCoding;

pub type BayerResult<T> = Result<T, BayerError>;

quick_error! {
    #[derive(Debug)]
    pub enum BayerError {
        InvalidBayerMethod {
            display("Invalid Bayer method")
        }
        InvalidColorFilter {
            display("Invalid color filter")
        }

        WrongResolution {
            display("Wrong resolution")
        }
        WrongDepth {
            display("Wrong depth")
        }
        BufferTooSmall(expected: usize, got: usize) {
            display("Buffer too small: expected {} samples, got {}", expected, got)
        }

        UnsupportedColorCoding(coding: ColorCoding) {
            display("Unsupported color coding: {:?}", coding)
        }

        Io(err: io::Error) {
            from()
            display("IO error: {}", err)
        }
    }
}

impl BayerError {
    /// Stable integer code handed across the C interface.
    pub fn code(&self) -> i32 {
        match self {
            BayerError::InvalidBayerMethod => -1,
            BayerError::InvalidColorFilter => -2,
            BayerError::WrongResolution => -3,
            BayerError::WrongDepth => -4,
            BayerError::BufferTooSmall(..) => -5,
            BayerError::UnsupportedColorCoding(_) => -6,
            BayerError::Io(_) => -7,
        }
    }
}
