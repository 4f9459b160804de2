//! # qrlite
//!
//! A small QR code matrix encoder. It turns a short byte payload into a
//! finished module grid using Reed-Solomon error correction over GF(2^8).
//!
//! The encoder deliberately supports a narrow configuration:
//!
//! - **Versions**: 5 (37x37) for payloads of up to 84 bytes, 7 (45x45) for
//!   payloads of up to 122 bytes
//! - **Error correction level**: M
//! - **Mask pattern**: 3, `(r + c) % 3 == 0`
//! - **Encoding mode**: a single byte mode segment. Spare capacity is filled by
//!   repeating the framed segment instead of the standard pad codewords
//!
//! ## Quick Start
//!
//! ```rust
//! use qrlite::QRGenerator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut generator = QRGenerator::new();
//! let code = generator.generate(b"Hello, World!")?;
//!
//! assert_eq!(code.qr_size(), 37);
//! assert_eq!(code.data().len(), 37 * 37);
//! print!("{}", code.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! A generator keeps its module grid between calls, so reuse one per thread
//! when encoding many payloads.
//!
//! ```rust
//! use qrlite::{QRError, QRGenerator};
//!
//! let mut generator = QRGenerator::new();
//! assert_eq!(generator.generate(&[0; 85]).map(|c| c.qr_size()), Ok(45));
//! assert_eq!(generator.generate(&[0; 123]).unwrap_err(), QRError::DataTooLong);
//! ```
//!
//! Rendering the grid to an image is left to the caller; `GeneratedCode::data`
//! holds one byte per module in row-major order, 1 for dark.

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;

pub use builder::{GeneratedCode, QRGenerator};
pub use common::ec::{ecc, gf_multiply};
pub use common::error::{QRError, QRResult};
pub use common::version_db::{version_info, VersionInfo};
