// Bit widths fit in a u8, but u32 avoids casts in shift expressions.
pub type Bitlen = u32;

// block and page geometry
pub const BLOCK_SIZE: usize = 128;
pub const PACK_GROUP_SIZE: usize = 32;
pub const DEFAULT_PAGE_SIZE: usize = 65536;

// cost model
pub const OVERHEAD_OF_EACH_EXCEPT: usize = 8;
pub const MAX_EXCEPTS_PER_BLOCK: usize = 127;
