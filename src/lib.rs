//! A base-10 floating point library. Numbers are represented as a 224-bit
//! signed mantissa and a 32-bit signed exponent, `mantissa × 10^exponent`,
//! and can be packed into a single 32-byte word.
//!
//! ```
//! use decfloat::Float;
//!
//! let a = Float::parse("3.14").unwrap();
//! let b = Float::parse("2.0").unwrap();
//! assert_eq!(a.div(&b).unwrap().to_string(), "1.57");
//! assert_eq!(a.floor().to_string(), "3");
//! ```

mod arithmetic;
mod cast;
mod error;
mod float;
mod operations;
mod packed;
mod string;
mod utils;

pub use self::cast::LossyConversion;
pub use self::error::{ErrorKind, FloatError, Result};
pub use self::float::{Float, EXPONENT_BITS, MANTISSA_BITS, PACKED_BYTES};
pub use self::string::FormatOptions;
pub use num_bigint::BigInt;
