//! Patched frame-of-reference compression for arrays of `u32`.
//!
//! Two codecs share one cursor-based interface:
//!
//! * [`FastPfor`] packs each 128-value block at a cost-chosen width and
//!   gathers exception high bits into per-width buckets at the end of each
//!   page.
//! * [`OptPfd`] packs each block at a width from a fixed table and stores
//!   exceptions inline per block, compressed with Simple16.
//!
//! Both operate on whole blocks of 128 values; a trailing partial block is
//! left for the caller to encode separately. Decompression assumes input
//! produced by the matching compressor, but malformed streams are rejected
//! with [`errors::PforError`] rather than decoded into nonsense.
//!
//! ```
//! use pfor::{simple_compress, simple_decompress, FastPfor};
//!
//! let nums: Vec<u32> = (0..1024).map(|i| i % 1000).collect();
//! let mut codec = FastPfor::default();
//! let compressed = simple_compress(&mut codec, &nums)?;
//! let recovered = simple_decompress(&mut codec, &compressed)?;
//! assert_eq!(recovered, nums);
//! # Ok::<(), pfor::errors::PforError>(())
//! ```

pub use codec::{compressed_size_bound, simple_compress, simple_decompress, Codec};
pub use constants::{BLOCK_SIZE, DEFAULT_PAGE_SIZE};
pub use fastpfor::FastPfor;
pub use optpfd::OptPfd;

pub mod errors;

mod bit_packing;
mod bits;
mod codec;
mod constants;
mod fastpfor;
mod optpfd;
mod simple16;

#[cfg(test)]
mod tests;
