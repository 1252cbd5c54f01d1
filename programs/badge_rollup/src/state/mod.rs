// =============================================================================
// BADGE ROLLUP STATE MODULE
// =============================================================================
//
// Every table lives in a program-derived account; the PDA seeds are the
// primary key.
//
// - Config / AuthTable: program-wide admin, policy and action allow-lists
// - Organization: org code used to check asset ownership
// - ActiveLookup: asset -> active emissions, one per organization
// - Emission / AccountProgress: rollup emission definitions and per-account credit
// - Aggregation / Sequence: bounded aggregation sequences and badge membership
// =============================================================================

pub mod config;
pub mod organization;
pub mod emission;
pub mod progress;
pub mod lookup;
pub mod aggregation;

pub use config::*;
pub use organization::*;
pub use emission::*;
pub use progress::*;
pub use lookup::*;
pub use aggregation::*;

/// Maximum bytes in an organization or emission name (also a PDA seed)
pub const MAX_NAME_LEN: usize = 16;

/// Maximum bytes in an asset / badge identifier
pub const MAX_ASSET_LEN: usize = 12;

/// Maximum bytes in a free-form description
pub const MAX_DESCRIPTION_LEN: usize = 64;

/// Borsh size of a `String` holding at most `max` bytes
pub const fn string_size(max: usize) -> usize {
    4 + max
}
