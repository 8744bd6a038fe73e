//! Exact stream layouts for small hand-checkable inputs. These pin the wire
//! format: a change that still round-trips but moves words will fail here.

use crate::codec::{simple_compress, simple_decompress};
use crate::constants::BLOCK_SIZE;
use crate::errors::PforResult;
use crate::{FastPfor, OptPfd};

#[test]
fn test_fastpfor_zero_block() -> PforResult<()> {
  let nums = [0_u32; BLOCK_SIZE];
  let mut codec = FastPfor::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  // count, meta offset, byte count, bytes {b=0, cexcept=0, pad, pad},
  // empty bucket bitmap
  assert_eq!(compressed, vec![128, 1, 2, 0, 0]);
  assert_eq!(simple_decompress(&mut codec, &compressed)?, nums);
  Ok(())
}

#[test]
fn test_fastpfor_lone_one() -> PforResult<()> {
  let mut nums = [0_u32; BLOCK_SIZE];
  nums[0] = 1;
  let mut codec = FastPfor::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  let expected = vec![
    128,
    1,                            // meta directly after the head word: b = 0 packs no low bits
    4,                            // byte buffer length
    u32::from_le_bytes([0, 1, 1, 0]), // b = 0, cexcept = 1, maxb = 1, position 0
    1,                            // bitmap: only bucket 1 present
    1,                            // bucket 1 holds one exception
    1,                            // its value, packed at width 1
  ];
  assert_eq!(compressed, expected);
  let recovered = simple_decompress(&mut codec, &compressed)?;
  assert_eq!(recovered[0], 1);
  assert_eq!(recovered[..], nums[..]);
  Ok(())
}

#[test]
fn test_fastpfor_ramp_packs_dense() -> PforResult<()> {
  let nums: Vec<u32> = (0..BLOCK_SIZE as u32).collect();
  let mut codec = FastPfor::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  // count + meta offset + 4 * 7 low-bit words + byte count + 1 byte word
  // + empty bitmap
  assert_eq!(compressed.len(), 33);
  assert_eq!(compressed[1], 29);
  assert_eq!(compressed[30], 2);
  assert_eq!(*compressed.last().unwrap(), 0);
  assert_eq!(simple_decompress(&mut codec, &compressed)?, nums);
  Ok(())
}

#[test]
fn test_fastpfor_uniform_wide_has_no_buckets() -> PforResult<()> {
  let nums = [(1 << 20) - 1_u32; BLOCK_SIZE];
  let mut codec = FastPfor::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  // 80 low-bit words, no exception buckets
  assert_eq!(compressed.len(), 1 + 1 + 80 + 1 + 1 + 1);
  assert_eq!(compressed[1], 81);
  assert_eq!(*compressed.last().unwrap(), 0);
  assert_eq!(simple_decompress(&mut codec, &compressed)?, nums);
  Ok(())
}

#[test]
fn test_optpfd_wide_outlier_stream() -> PforResult<()> {
  let mut nums = [0_u32; BLOCK_SIZE];
  nums[BLOCK_SIZE - 1] = 1 << 31;
  let mut codec = OptPfd::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  let mut expected = vec![
    128,
    4 | 1 << 8 | 2 << 16,     // width index 4, one exception, two s16 words
    15 << 28 | 1 << 27,       // payload: the high 28 bits of 1 << 31 at width 4
    12 << 28 | 127,           // position 127 in a 7-bit slot
  ];
  expected.extend(vec![0_u32; 16]); // low bits: 128 values at width 4, all zero
  assert_eq!(compressed, expected);
  let recovered = simple_decompress(&mut codec, &compressed)?;
  assert_eq!(recovered[BLOCK_SIZE - 1], 1 << 31);
  assert_eq!(recovered[..], nums[..]);
  Ok(())
}

#[test]
fn test_optpfd_plain_block_stream() -> PforResult<()> {
  let nums = [6_u32; BLOCK_SIZE];
  let mut codec = OptPfd::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  // header declares width 3 with no exceptions, then 12 packed words
  assert_eq!(compressed.len(), 1 + 1 + 12);
  assert_eq!(compressed[1], 3);
  // 0b110 repeated LSB-first
  assert_eq!(compressed[2], 0xb6db_6db6);
  assert_eq!(simple_decompress(&mut codec, &compressed)?, nums);
  Ok(())
}

#[test]
fn test_two_page_fives() -> PforResult<()> {
  // 70,000 fives truncate to 69,888 values over two pages
  let nums = vec![5_u32; 70_000];
  let mut codec = FastPfor::default();
  let compressed = simple_compress(&mut codec, &nums)?;
  assert_eq!(compressed[0], 69_888);
  // every block packs at width 3 with no exceptions
  let decompressed = simple_decompress(&mut codec, &compressed)?;
  assert_eq!(decompressed.len(), 69_888);
  assert!(decompressed.iter().all(|&x| x == 5));
  Ok(())
}
