/// Prefix band bases. Each category owns 64 consecutive prefix values.
pub const INT_BASE: u8    = 0x00;
pub const STRING_BASE: u8 = 0x40;
pub const LIST_BASE: u8   = 0x80;
/// First reserved prefix; 0xC0..=0xFF never start a valid item.
pub const RESERVED_BASE: u8 = 0xC0;

/// Low 6 bits of a prefix hold the count field or the length-of-length marker.
pub const COUNT_MASK: u8 = 0x3f;

/// Largest count that fits directly in the prefix (0..=55).
pub const MAX_DIRECT_COUNT: usize = 0x37;

/// Integers below this value are the prefix byte itself.
pub const DIRECT_INT_LIMIT: u8 = 0x18;

/// Indirect-value integers carry `prefix - 0x17` payload bytes.
pub const INDIRECT_VALUE_BIAS: u8 = 0x17;

/// First indirect-addressed integer prefix (length-of-length form).
pub const ADDRESSED_INT_BASE: u8 = 0x38;

/// Integers with prefix below this fit a machine word (at most 8 payload bytes).
pub const SLIM_INT_LIMIT: u8 = 0x20;

/// Length-of-length fields are 1..=8 bytes.
pub const MAX_LENGTH_BYTES: usize = 8;

/// Largest payload an indirect-value integer can carry.
pub const MAX_FIXED_INT_BYTES: usize = 32;

/// Largest payload a narrow (`u64`) read accepts.
pub const MAX_SLIM_INT_BYTES: usize = 8;

/// Nesting bound when walking untrusted lists.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Encoding of the empty string.
pub const RLP_NULL: [u8; 1] = [STRING_BASE];

/// Encoding of the empty list.
pub const RLP_EMPTY_LIST: [u8; 1] = [LIST_BASE];
