use crate::constants::Bitlen;
use crate::errors::{PforError, PforResult};

// Simple16: each output word holds a 4-bit selector plus 28 data bits. The
// selector picks one of 16 slot configurations; encoding greedily takes the
// first configuration whose slots fit the next run of values. Values of 29
// or more bits are not representable.

const DATA_BITS: Bitlen = 28;
const N_SELECTORS: usize = 16;

// how many values each selector packs into one word
const SELECTOR_N: [usize; N_SELECTORS] = [28, 21, 21, 21, 14, 9, 8, 7, 6, 6, 5, 5, 4, 3, 2, 1];

// per-slot widths for each selector; rows are zero-padded past SELECTOR_N
#[rustfmt::skip]
const SELECTOR_WIDTHS: [[Bitlen; 28]; N_SELECTORS] = [
  [1; 28],
  [2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
  [1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
  [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0],
  [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [3, 4, 4, 4, 4, 3, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 4, 4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [5, 5, 5, 5, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 4, 5, 5, 5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [6, 6, 6, 5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [5, 5, 6, 6, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [7, 7, 7, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [10, 9, 9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [14, 14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
  [28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

// first selector whose slots fit a prefix of `src`, and how many values it takes
fn choose_selector(src: &[u32]) -> PforResult<(usize, usize)> {
  for selector in 0..N_SELECTORS {
    let n = SELECTOR_N[selector].min(src.len());
    let widths = &SELECTOR_WIDTHS[selector];
    let mut j = 0;
    while j < n && src[j] < (1 << widths[j]) {
      j += 1;
    }
    if j == n {
      return Ok((selector, n));
    }
  }
  Err(PforError::invalid_argument(
    "simple16 cannot represent values of 29 or more bits",
  ))
}

/// Returns the number of words `compress` would write for `src`.
pub fn estimate(src: &[u32]) -> PforResult<usize> {
  let mut words = 0;
  let mut pos = 0;
  while pos < src.len() {
    let (_, n) = choose_selector(&src[pos..])?;
    pos += n;
    words += 1;
  }
  Ok(words)
}

/// Compresses `src` into the front of `dst`, returning the word count.
pub fn compress(src: &[u32], dst: &mut [u32]) -> PforResult<usize> {
  let mut words = 0;
  let mut pos = 0;
  while pos < src.len() {
    let (selector, n) = choose_selector(&src[pos..])?;
    if words >= dst.len() {
      return Err(PforError::invalid_argument(
        "destination too small for simple16 words",
      ));
    }
    let widths = &SELECTOR_WIDTHS[selector];
    let mut word = (selector as u32) << DATA_BITS;
    let mut offset: Bitlen = 0;
    for j in 0..n {
      word |= src[pos + j] << offset;
      offset += widths[j];
    }
    dst[words] = word;
    words += 1;
    pos += n;
  }
  Ok(words)
}

/// Fills all of `dst` from the words of `src`.
pub fn uncompress(src: &[u32], dst: &mut [u32]) -> PforResult<()> {
  let mut src_idx = 0;
  let mut produced = 0;
  while produced < dst.len() {
    if src_idx >= src.len() {
      return Err(PforError::insufficient_data(format!(
        "simple16 input ended after {} of {} values",
        produced,
        dst.len(),
      )));
    }
    let word = src[src_idx];
    src_idx += 1;
    let selector = (word >> DATA_BITS) as usize;
    let widths = &SELECTOR_WIDTHS[selector];
    let n = SELECTOR_N[selector].min(dst.len() - produced);
    let mut offset: Bitlen = 0;
    for j in 0..n {
      dst[produced + j] = (word >> offset) & ((1 << widths[j]) - 1);
      offset += widths[j];
    }
    produced += n;
  }
  Ok(())
}
