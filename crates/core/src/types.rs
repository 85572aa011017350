//! Identity types for event streams
//!
//! This module defines the two identity values used throughout the system:
//! - [`AccountAddress`]: the actor that owns streams
//! - [`Guid`]: the globally unique identifier of a single stream

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Length of the canonical [`Guid`] key encoding (8 + 32 bytes)
pub const GUID_KEY_LENGTH: usize = 8 + AccountAddress::LENGTH;

/// Address of an actor in the shared ledger state
///
/// Every stream is owned by exactly one address. The address is part of the
/// stream identity, so two owners can never collide even when their
/// creation numbers coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    /// Number of bytes in an address
    pub const LENGTH: usize = 32;

    /// The all-zero address
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    /// The address `0x1`
    pub const ONE: Self = Self::one();

    const fn one() -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[Self::LENGTH - 1] = 1;
        Self(bytes)
    }

    /// Create an address from raw bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_core::AccountAddress;
    ///
    /// let addr = AccountAddress::new([7u8; 32]);
    /// assert_eq!(addr.as_bytes(), &[7u8; 32]);
    /// ```
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes representation
    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Parse an address from hex, with or without a `0x` prefix
    ///
    /// Short forms are left-padded with zeros, so `0x1` parses to [`AccountAddress::ONE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_core::AccountAddress;
    ///
    /// let addr = AccountAddress::from_hex("0x1").unwrap();
    /// assert_eq!(addr, AccountAddress::ONE);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(Error::InvalidKey(format!("bad address length: {:?}", s)));
        }

        // Odd-length input is padded to a whole number of bytes first
        let padded = format!("{:0>width$}", digits, width = Self::LENGTH * 2);
        let mut bytes = [0u8; Self::LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| Error::InvalidKey(format!("bad address {:?}: {}", s, e)))?;
        Ok(Self(bytes))
    }

    /// Short hex form without leading zeros, e.g. `0x1`
    pub fn short_str(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl Default for AccountAddress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Globally unique stream identifier
///
/// A GUID is the pair `(creation_num, addr)`. The owner never hands out the
/// same creation number twice, so the pair is unique across every stream ever
/// created.
///
/// A `Guid` is a plain value: observers can decode one from the log and use
/// it to look entries up. Holding a `Guid` never grants the right to emit;
/// that right lives only in the `EventHandle` the identity was allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guid {
    creation_num: u64,
    addr: AccountAddress,
}

impl Guid {
    /// Create a GUID from its parts
    pub const fn new(addr: AccountAddress, creation_num: u64) -> Self {
        Self { creation_num, addr }
    }

    /// Address of the actor that created this stream
    pub fn creator_address(&self) -> AccountAddress {
        self.addr
    }

    /// Per-owner creation number of this stream
    pub fn creation_num(&self) -> u64 {
        self.creation_num
    }

    /// Canonical key encoding: creation number (little-endian) then address
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_core::{AccountAddress, Guid};
    ///
    /// let guid = Guid::new(AccountAddress::ONE, 2);
    /// let bytes = guid.to_bytes();
    /// assert_eq!(bytes[0], 2);
    /// assert_eq!(Guid::from_bytes(&bytes).unwrap(), guid);
    /// ```
    pub fn to_bytes(&self) -> [u8; GUID_KEY_LENGTH] {
        let mut out = [0u8; GUID_KEY_LENGTH];
        out[..8].copy_from_slice(&self.creation_num.to_le_bytes());
        out[8..].copy_from_slice(self.addr.as_bytes());
        out
    }

    /// Decode the canonical key encoding
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != GUID_KEY_LENGTH {
            return Err(Error::InvalidKey(format!(
                "event key must be {} bytes, got {}",
                GUID_KEY_LENGTH,
                bytes.len()
            )));
        }
        let mut num = [0u8; 8];
        num.copy_from_slice(&bytes[..8]);
        let mut addr = [0u8; AccountAddress::LENGTH];
        addr.copy_from_slice(&bytes[8..]);
        Ok(Self::new(AccountAddress::new(addr), u64::from_le_bytes(num)))
    }
}

impl std::fmt::Display for Guid {
    /// Display as `creation_num:address`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.creation_num, self.addr.short_str())
    }
}

// Orders by owner first, then creation number, so one owner's streams are adjacent
impl Ord for Guid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.addr
            .cmp(&other.addr)
            .then(self.creation_num.cmp(&other.creation_num))
    }
}

impl PartialOrd for Guid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
