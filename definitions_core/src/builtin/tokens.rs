//! Compiled-in tokens.

use crate::info::{Address, TokenInfo};

/// Tokens trusted without a signed definition.
pub static TOKENS: [TokenInfo; 4] = [
    TokenInfo::from_static(
        Address::from_hex_literal("dac17f958d2ee523a2206206994597c13d831ec7"),
        1,
        "USDT",
        6,
        "Tether",
    ),
    TokenInfo::from_static(
        Address::from_hex_literal("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
        1,
        "USDC",
        6,
        "USD Coin",
    ),
    TokenInfo::from_static(
        Address::from_hex_literal("6b175474e89094c44da98b954eedeac495271d0f"),
        1,
        "DAI",
        18,
        "Dai Stablecoin",
    ),
    TokenInfo::from_static(
        Address::from_hex_literal("2260fac5e5542a773aa44fbcfedf7c193bc2c599"),
        1,
        "WBTC",
        8,
        "Wrapped BTC",
    ),
];
