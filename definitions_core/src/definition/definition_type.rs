//! Kind of record carried by a definition.

/// The kind of record a definition payload decodes to.
///
/// The discriminant is the type byte on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bolero", derive(bolero::generator::TypeGenerator))]
#[repr(u8)]
pub enum DefinitionType {
    /// A network (chain) definition.
    Network = 0,

    /// A token contract definition.
    Token = 1,
}

impl DefinitionType {
    /// The wire tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a wire tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Network),
            1 => Some(Self::Token),
            _ => None,
        }
    }
}

impl core::fmt::Display for DefinitionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Token => write!(f, "token"),
        }
    }
}
