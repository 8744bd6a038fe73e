use crate::constants::BLOCK_SIZE;
use crate::errors::{PforError, PforResult};

/// A patched frame-of-reference codec over `u32` slices.
///
/// Both operations advance their cursors in place: `src_pos` past the words
/// consumed and `dst_pos` past the words produced. Codecs own reusable
/// scratch buffers, so the methods take `&mut self` and an instance must not
/// be shared across threads; pool one per worker instead.
pub trait Codec {
  /// Compresses `src_len` values starting at `src[*src_pos]`.
  ///
  /// The length is truncated down to a multiple of 128; leftover values are
  /// not consumed (chain a tail codec at a higher layer). Compressing zero
  /// whole blocks writes nothing and leaves both cursors unchanged.
  fn compress(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    src_len: usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
  ) -> PforResult<()>;

  /// Decompresses one stream starting at `src[*src_pos]`.
  ///
  /// `src_len` is informational; the words actually consumed are determined
  /// by offsets embedded in the stream. The destination must have room for
  /// the value count recorded in the stream's first word.
  fn uncompress(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    src_len: usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
  ) -> PforResult<()>;
}

/// A safe destination size in words for compressing `n` values.
///
/// Covers the worst case of incompressible data plus per-block and per-page
/// framing overhead.
pub const fn compressed_size_bound(n: usize) -> usize {
  n + n / BLOCK_SIZE * 8 + 1024
}

/// Compresses a whole slice, returning freshly allocated output words.
///
/// Values past the last whole block of 128 are dropped, matching
/// [`Codec::compress`].
pub fn simple_compress<C: Codec>(codec: &mut C, src: &[u32]) -> PforResult<Vec<u32>> {
  let mut dst = vec![0; compressed_size_bound(src.len())];
  let mut src_pos = 0;
  let mut dst_pos = 0;
  codec.compress(src, &mut src_pos, src.len(), &mut dst, &mut dst_pos)?;
  dst.truncate(dst_pos);
  Ok(dst)
}

/// Decompresses a whole stream, returning freshly allocated values.
///
/// The output length comes from the stream's own count word, so this should
/// only be handed trusted input; a corrupt count allocates accordingly.
pub fn simple_decompress<C: Codec>(codec: &mut C, src: &[u32]) -> PforResult<Vec<u32>> {
  if src.is_empty() {
    return Ok(Vec::new());
  }
  let mut dst = vec![0; src[0] as usize];
  let mut src_pos = 0;
  let mut dst_pos = 0;
  codec.uncompress(src, &mut src_pos, src.len(), &mut dst, &mut dst_pos)?;
  dst.truncate(dst_pos);
  Ok(dst)
}

pub(crate) fn read_word(src: &[u32], pos: usize) -> PforResult<u32> {
  src.get(pos).copied().ok_or_else(|| {
    PforError::insufficient_data(format!(
      "source ended before word {}",
      pos
    ))
  })
}

pub(crate) fn ensure_dst(dst: &[u32], pos: usize, needed: usize) -> PforResult<()> {
  if pos + needed > dst.len() {
    return Err(PforError::invalid_argument(format!(
      "destination too small: need {} words at position {} of {}",
      needed,
      pos,
      dst.len(),
    )));
  }
  Ok(())
}
