use anchor_lang::prelude::*;
use crate::state::ProgressStatus;

/// A simple-badge issuance requested by a satisfied emission
#[event]
pub struct BadgeIssueRequested {
    pub org: Pubkey,
    pub to: Pubkey,
    pub badge: String,
    pub quantity: u64,
    pub memo: String,
}

/// A claim-capacity increase granted by a satisfied emission
#[event]
pub struct ClaimCapacityGranted {
    pub org: Pubkey,
    pub account: Pubkey,
    pub asset: String,
    pub capacity_increase: u64,
    pub memo: String,
}

/// Progress persisted after a credit event
#[event]
pub struct ProgressRecorded {
    pub emission: Pubkey,
    pub account: Pubkey,
    pub asset: String,
    pub quantity: u64,
    pub factor: u64,
    pub status: ProgressStatus,
}
