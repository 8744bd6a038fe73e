use crate::bit_packing;
use crate::bits;
use crate::codec::{ensure_dst, read_word, Codec};
use crate::constants::{Bitlen, BLOCK_SIZE, MAX_EXCEPTS_PER_BLOCK, PACK_GROUP_SIZE};
use crate::errors::{PforError, PforResult};
use crate::simple16;

const PAGE_SIZE: usize = 65536;

// the widths a block may be packed at
const PACKED_WIDTHS: [Bitlen; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 16, 20, 32];
const WIDEST: usize = PACKED_WIDTHS.len() - 1;

// smallest index i with PACKED_WIDTHS[i] >= max width, for each max width
#[rustfmt::skip]
const INV_WIDTHS: [usize; 33] = [
  0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13,
  14, 14, 14,
  15, 15, 15, 15,
  16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
];

// simple16 codes at most 28 bits per value, so exception payloads force a
// floor on the packed width
const S16_MAX_WIDTH: Bitlen = 28;

/// The OptPFD codec.
///
/// Like [`FastPfor`](crate::FastPfor), but each block is self-contained: a
/// header word carries the width index, exception count, and the word count
/// of a Simple16-compressed side payload holding the exception high bits and
/// positions. The width is chosen from a fixed table by jointly minimizing
/// packed size and the Simple16 payload size.
pub struct OptPfd {
  except_buffer: Vec<u32>,
}

impl Default for OptPfd {
  fn default() -> Self {
    Self {
      except_buffer: vec![0; 2 * BLOCK_SIZE],
    }
  }
}

impl OptPfd {
  // Stages the exceptions of `block` at width index `i` into the buffer:
  // high-bit payloads in the first n slots, positions in the next n.
  fn stage_exceptions(&mut self, block: &[u32], i: usize) -> usize {
    let width = PACKED_WIDTHS[i];
    let mut n = 0;
    for &x in block {
      if x >> width != 0 {
        n += 1;
      }
    }
    let mut c = 0;
    for (k, &x) in block.iter().enumerate() {
      let high = x >> width;
      if high != 0 {
        self.except_buffer[c] = high;
        self.except_buffer[n + c] = k as u32;
        c += 1;
      }
    }
    n
  }

  // cost in words of packing at PACKED_WIDTHS[i]: the low bits plus the
  // simple16 payload (the header word is common to all candidates)
  fn choose_width(&mut self, block: &[u32]) -> PforResult<(usize, usize)> {
    let mb = bits::max_width(block) as usize;
    let floor = PACKED_WIDTHS[INV_WIDTHS[mb]].saturating_sub(S16_MAX_WIDTH) as usize;

    let mut best_i = WIDEST;
    let mut best_cost = PACKED_WIDTHS[WIDEST] as usize * 4;
    let mut best_cexcept = 0;
    for i in floor..WIDEST {
      let n = self.stage_exceptions(block, i);
      if n == BLOCK_SIZE {
        continue;
      }
      let cost =
        PACKED_WIDTHS[i] as usize * 4 + simple16::estimate(&self.except_buffer[..2 * n])?;
      if cost <= best_cost {
        best_cost = cost;
        best_i = i;
        best_cexcept = n;
      }
    }
    Ok((best_i, best_cexcept))
  }

  fn encode_page(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    this_size: usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
  ) -> PforResult<()> {
    let mut pos = *src_pos;
    let mut out_pos = *dst_pos;
    let page_end = pos + this_size;
    while pos < page_end {
      let block = &src[pos..pos + BLOCK_SIZE];
      let (best_i, cexcept) = self.choose_width(block)?;
      let width = PACKED_WIDTHS[best_i];
      ensure_dst(dst, out_pos, 1)?;
      let mut except_size = 0;
      if cexcept > 0 {
        debug_assert!(cexcept <= MAX_EXCEPTS_PER_BLOCK);
        self.stage_exceptions(block, best_i);
        let staged = 2 * cexcept;
        except_size = simple16::compress(
          &self.except_buffer[..staged],
          &mut dst[out_pos + 1..],
        )?;
      }
      dst[out_pos] = best_i as u32 | (cexcept as u32) << 8 | (except_size as u32) << 16;
      out_pos += 1 + except_size;
      ensure_dst(dst, out_pos, 4 * width as usize)?;
      for group in block.chunks_exact(PACK_GROUP_SIZE) {
        bit_packing::pack32(group, &mut dst[out_pos..], width);
        out_pos += width as usize;
      }
      pos += BLOCK_SIZE;
    }
    *src_pos = pos;
    *dst_pos = out_pos;
    Ok(())
  }

  fn decode_page(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
    this_size: usize,
  ) -> PforResult<()> {
    let mut in_pos = *src_pos;
    let mut out_pos = *dst_pos;
    for _ in 0..this_size / BLOCK_SIZE {
      let header = read_word(src, in_pos)?;
      in_pos += 1;
      let best_i = (header & 0xff) as usize;
      let cexcept = (header >> 8 & 0xff) as usize;
      let except_size = (header >> 16) as usize;
      if best_i > WIDEST {
        return Err(PforError::corruption(format!(
          "block width index {} out of range",
          best_i,
        )));
      }
      let width = PACKED_WIDTHS[best_i];
      if cexcept > 0 {
        if cexcept > MAX_EXCEPTS_PER_BLOCK {
          return Err(PforError::corruption(format!(
            "block claims {} exceptions; the limit is {}",
            cexcept, MAX_EXCEPTS_PER_BLOCK,
          )));
        }
        if width == 32 {
          return Err(PforError::corruption(
            "full-width block cannot have exceptions",
          ));
        }
        if in_pos + except_size > src.len() {
          return Err(PforError::insufficient_data(
            "source ended inside a simple16 payload",
          ));
        }
        simple16::uncompress(
          &src[in_pos..in_pos + except_size],
          &mut self.except_buffer[..2 * cexcept],
        )?;
        in_pos += except_size;
      }
      if in_pos + 4 * width as usize > src.len() {
        return Err(PforError::insufficient_data(
          "source ended inside a block's packed low bits",
        ));
      }
      for k in (0..BLOCK_SIZE).step_by(PACK_GROUP_SIZE) {
        bit_packing::unpack32(&src[in_pos..], &mut dst[out_pos + k..], width);
        in_pos += width as usize;
      }
      for k in 0..cexcept {
        let pos = self.except_buffer[cexcept + k] as usize;
        if pos >= BLOCK_SIZE {
          return Err(PforError::corruption(format!(
            "exception position {} outside the block",
            pos,
          )));
        }
        dst[out_pos + pos] |= self.except_buffer[k] << width;
      }
      out_pos += BLOCK_SIZE;
    }
    *src_pos = in_pos;
    *dst_pos = out_pos;
    Ok(())
  }
}

impl Codec for OptPfd {
  fn compress(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    src_len: usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
  ) -> PforResult<()> {
    let src_len = src_len - src_len % BLOCK_SIZE;
    if src_len == 0 {
      return Ok(());
    }
    if *src_pos + src_len > src.len() {
      return Err(PforError::invalid_argument(format!(
        "cannot compress {} values at position {} of {}",
        src_len,
        *src_pos,
        src.len(),
      )));
    }
    if src_len > u32::MAX as usize {
      return Err(PforError::invalid_argument(
        "cannot compress more than u32::MAX values per call",
      ));
    }
    ensure_dst(dst, *dst_pos, 1)?;
    dst[*dst_pos] = src_len as u32;
    *dst_pos += 1;
    let src_end = *src_pos + src_len;
    while *src_pos < src_end {
      let this_size = PAGE_SIZE.min(src_end - *src_pos);
      self.encode_page(src, src_pos, this_size, dst, dst_pos)?;
    }
    Ok(())
  }

  fn uncompress(
    &mut self,
    src: &[u32],
    src_pos: &mut usize,
    src_len: usize,
    dst: &mut [u32],
    dst_pos: &mut usize,
  ) -> PforResult<()> {
    if src_len == 0 {
      return Ok(());
    }
    let n_values = read_word(src, *src_pos)? as usize;
    if n_values % BLOCK_SIZE != 0 {
      return Err(PforError::corruption(format!(
        "value count {} is not a multiple of {}",
        n_values, BLOCK_SIZE,
      )));
    }
    if *dst_pos + n_values > dst.len() {
      return Err(PforError::invalid_argument(format!(
        "destination too small for {} values at position {} of {}",
        n_values,
        *dst_pos,
        dst.len(),
      )));
    }
    *src_pos += 1;
    let dst_end = *dst_pos + n_values;
    while *dst_pos < dst_end {
      let this_size = PAGE_SIZE.min(dst_end - *dst_pos);
      self.decode_page(src, src_pos, dst, dst_pos, this_size)?;
    }
    Ok(())
  }
}
