//! Typed network and token records.
//!
//! Records are immutable once built. Builtin entries borrow `'static`
//! strings; remote entries own theirs.

use alloc::borrow::Cow;

use thiserror::Error;

/// Size of an account or contract address.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bolero", derive(bolero::generator::TypeGenerator))]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0; ADDRESS_SIZE]);

    /// Create an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a compile-time hex literal.
    ///
    /// # Panics
    ///
    /// Panics (at compile time, when used in a `const`) if `hex` is not
    /// exactly 40 hex digits.
    #[must_use]
    pub const fn from_hex_literal(hex: &str) -> Self {
        const fn nibble(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit in address literal"),
            }
        }

        let src = hex.as_bytes();
        assert!(src.len() == ADDRESS_SIZE * 2, "address literal must be 40 hex digits");

        let mut bytes = [0u8; ADDRESS_SIZE];
        let mut i = 0;
        while i < ADDRESS_SIZE {
            bytes[i] = (nibble(src[2 * i]) << 4) | nibble(src[2 * i + 1]);
            i += 1;
        }
        Self(bytes)
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = InvalidAddress;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_SIZE] = bytes
            .try_into()
            .map_err(|_| InvalidAddress::WrongLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl core::str::FromStr for Address {
    type Err = InvalidAddress;

    /// Parse 40 hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_SIZE * 2 {
            return Err(InvalidAddress::WrongLength(digits.len() / 2));
        }
        let mut bytes = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| InvalidAddress::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Address({self})")
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error parsing an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAddress {
    /// The input does not hold 20 bytes.
    #[error("invalid address: expected {ADDRESS_SIZE} bytes, got {0}")]
    WrongLength(usize),

    /// The input is not hex.
    #[error("invalid address: not a hex string")]
    InvalidHex,
}

/// Metadata describing a network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NetworkInfo {
    chain_id: u64,
    symbol: Cow<'static, str>,
    slip44: u32,
    name: Cow<'static, str>,
}

impl NetworkInfo {
    /// Create a network record.
    #[must_use]
    pub fn new(
        chain_id: u64,
        symbol: impl Into<Cow<'static, str>>,
        slip44: u32,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            chain_id,
            symbol: symbol.into(),
            slip44,
            name: name.into(),
        }
    }

    /// Create a network record from static data, usable in `const` tables.
    #[must_use]
    pub const fn from_static(
        chain_id: u64,
        symbol: &'static str,
        slip44: u32,
        name: &'static str,
    ) -> Self {
        Self {
            chain_id,
            symbol: Cow::Borrowed(symbol),
            slip44,
            name: Cow::Borrowed(name),
        }
    }

    /// Chain id.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Ticker symbol of the native coin.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// SLIP-44 coin type used for key derivation.
    #[must_use]
    pub const fn slip44(&self) -> u32 {
        self.slip44
    }

    /// Human-readable network name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Metadata describing a token contract on a network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenInfo {
    address: Address,
    chain_id: u64,
    symbol: Cow<'static, str>,
    decimals: u32,
    name: Cow<'static, str>,
}

/// Returned whenever no trusted token record matches.
pub static UNKNOWN_TOKEN: TokenInfo =
    TokenInfo::from_static(Address::ZERO, 0, "Wei UNKN", 0, "Unknown token");

impl TokenInfo {
    /// Create a token record.
    #[must_use]
    pub fn new(
        address: Address,
        chain_id: u64,
        symbol: impl Into<Cow<'static, str>>,
        decimals: u32,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            address,
            chain_id,
            symbol: symbol.into(),
            decimals,
            name: name.into(),
        }
    }

    /// Create a token record from static data, usable in `const` tables.
    #[must_use]
    pub const fn from_static(
        address: Address,
        chain_id: u64,
        symbol: &'static str,
        decimals: u32,
        name: &'static str,
    ) -> Self {
        Self {
            address,
            chain_id,
            symbol: Cow::Borrowed(symbol),
            decimals,
            name: Cow::Borrowed(name),
        }
    }

    /// Contract address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Chain the contract lives on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of decimals in the smallest unit.
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Human-readable token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the [`UNKNOWN_TOKEN`] sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == UNKNOWN_TOKEN
    }
}
