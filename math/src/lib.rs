//! Number theory behind the NTT header: an NTT-friendly prime, a generator of
//! its unit group, the dyadic root-of-unity ladders, a division-free Barrett
//! reduction constant and the radix split used by the multiplication kernel.
//!
//! Everything here is a deterministic function of the requested widths and is
//! computed on arbitrary-precision integers, so the same code path serves
//! 8-bit test digits as well as 64- or 128-bit production digits.

pub mod dft;
pub mod error;
pub mod modulus;
pub mod radix;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
