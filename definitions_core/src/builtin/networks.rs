//! Compiled-in networks.

use crate::info::NetworkInfo;

/// Networks trusted without a signed definition, ordered by chain id.
pub static NETWORKS: [NetworkInfo; 7] = [
    NetworkInfo::from_static(1, "ETH", 60, "Ethereum"),
    NetworkInfo::from_static(5, "tGOR", 1, "Goerli"),
    NetworkInfo::from_static(56, "BNB", 714, "BNB Smart Chain"),
    NetworkInfo::from_static(61, "ETC", 61, "Ethereum Classic"),
    NetworkInfo::from_static(137, "MATIC", 966, "Polygon"),
    NetworkInfo::from_static(17000, "tHOL", 1, "Holesky"),
    NetworkInfo::from_static(11_155_111, "tSEP", 1, "Sepolia"),
];
