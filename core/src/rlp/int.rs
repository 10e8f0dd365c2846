//! Integer precision tiers.
//!
//! The codec only needs "shift left by 8, OR a byte" to read and the minimal
//! big-endian byte form to write, so one accumulation loop serves every tier:
//!
//! - narrow: `u64`
//! - wide: `ethereum_types::U256`
//! - arbitrary: `malachite::Natural`

use ethereum_types::U256;
use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::Natural;

use crate::constants::{MAX_FIXED_INT_BYTES, MAX_SLIM_INT_BYTES};

pub trait RlpInt: Sized + Clone + PartialEq + PartialOrd {
    /// Largest payload this type holds without losing high bytes; `None` if unbounded.
    const MAX_BYTES: Option<usize>;

    fn zero() -> Self;

    /// `(self << 8) | byte`
    fn push_byte(self, byte: u8) -> Self;

    /// Minimal big-endian bytes; empty for zero.
    fn to_be_bytes_min(&self) -> Vec<u8>;

    /// Big-endian accumulation over `bytes`.
    fn from_be_slice(bytes: &[u8]) -> Self {
        bytes.iter().fold(Self::zero(), |acc, &b| acc.push_byte(b))
    }

    fn from_byte(byte: u8) -> Self {
        Self::zero().push_byte(byte)
    }
}

impl RlpInt for u64 {
    const MAX_BYTES: Option<usize> = Some(MAX_SLIM_INT_BYTES);

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn push_byte(self, byte: u8) -> Self {
        (self << 8) | byte as u64
    }

    fn to_be_bytes_min(&self) -> Vec<u8> {
        let bytes = self.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        bytes[skip..].to_vec()
    }
}

impl RlpInt for U256 {
    const MAX_BYTES: Option<usize> = Some(MAX_FIXED_INT_BYTES);

    #[inline]
    fn zero() -> Self {
        U256::zero()
    }

    #[inline]
    fn push_byte(self, byte: u8) -> Self {
        (self << 8usize) | U256::from(byte)
    }

    fn to_be_bytes_min(&self) -> Vec<u8> {
        let len = (self.bits() + 7) / 8;
        (0..len).rev().map(|i| self.byte(i)).collect()
    }
}

impl RlpInt for Natural {
    const MAX_BYTES: Option<usize> = None;

    fn zero() -> Self {
        Natural::ZERO
    }

    fn push_byte(self, byte: u8) -> Self {
        (self << 8u32) | Natural::from(byte)
    }

    fn to_be_bytes_min(&self) -> Vec<u8> {
        // base-256 digits, most significant first; zero has none
        PowerOf2Digits::<u8>::to_power_of_2_digits_desc(self, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_bytes_agree_across_tiers() {
        for v in [0u64, 1, 0x17, 0xff, 0x100, 0xdead_beef, u64::MAX] {
            let narrow = v.to_be_bytes_min();
            assert_eq!(U256::from(v).to_be_bytes_min(), narrow);
            assert_eq!(Natural::from(v).to_be_bytes_min(), narrow);
        }
    }

    #[test]
    fn accumulation_is_big_endian() {
        let bytes = [0x01, 0x02, 0x03];
        assert_eq!(u64::from_be_slice(&bytes), 0x010203);
        assert_eq!(U256::from_be_slice(&bytes), U256::from(0x010203u64));
        assert_eq!(Natural::from_be_slice(&bytes), Natural::from(0x010203u64));
    }

    #[test]
    fn arbitrary_tier_minimal_bytes() {
        assert!(Natural::ZERO.to_be_bytes_min().is_empty());
        let v = Natural::from(1u32) << 256u32;
        let bytes = v.to_be_bytes_min();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 0x01);
        assert!(bytes[1..].iter().all(|b| *b == 0));
        assert_eq!(Natural::from_be_slice(&bytes), v);
    }

    #[test]
    fn narrow_accumulation_drops_high_bytes() {
        let bytes = [0xAAu8; 9];
        assert_eq!(u64::from_be_slice(&bytes), u64::from_be_bytes([0xAA; 8]));
    }
}
