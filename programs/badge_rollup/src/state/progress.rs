use anchor_lang::prelude::*;
use std::collections::BTreeMap;
use super::{string_size, MAX_ASSET_LEN, MAX_CRITERIA};

/// Where an account stands on one emission
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProgressStatus {
    CyclicInProgress,
    NonCyclicInProgress,
    /// Terminal: a one-shot emission already fired for this account
    NonCyclicEmitted,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct AssetCredit {
    pub asset: String,
    pub quantity: u64,
}

impl AssetCredit {
    pub const SIZE: usize = string_size(MAX_ASSET_LEN) + 8;
}

/// Accumulated, not yet consumed credit of one account toward one emission.
///
/// `account` sits right after `emission` so off-chain readers can list every
/// record of an account with a memcmp filter at `ACCOUNT_OFFSET`.
#[account]
pub struct AccountProgress {
    pub emission: Pubkey,
    pub account: Pubkey,
    pub org: Pubkey,
    pub status: ProgressStatus,
    pub credit: Vec<AssetCredit>,
    /// Sum of every factor this record has emitted
    pub emitted_total: u64,
    pub last_updated: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl AccountProgress {
    pub const ACCOUNT_OFFSET: usize = 8 + 32;

    pub const SIZE: usize = 8 +                          // discriminator
        32 +                                             // emission
        32 +                                             // account
        32 +                                             // org
        1 +                                              // status
        4 + AssetCredit::SIZE * MAX_CRITERIA +           // credit
        8 +                                              // emitted_total
        8 +                                              // last_updated
        1;                                               // bump

    /// A freshly allocated record has never been written
    pub fn is_new(&self) -> bool {
        self.emission == Pubkey::default()
    }

    pub fn credit_map(&self) -> BTreeMap<String, u64> {
        self.credit
            .iter()
            .map(|entry| (entry.asset.clone(), entry.quantity))
            .collect()
    }

    pub fn set_credit(&mut self, credit: &BTreeMap<String, u64>) {
        self.credit = credit
            .iter()
            .map(|(asset, quantity)| AssetCredit {
                asset: asset.clone(),
                quantity: *quantity,
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_round_trips_through_map() {
        let mut progress = AccountProgress {
            emission: Pubkey::default(),
            account: Pubkey::new_unique(),
            org: Pubkey::new_unique(),
            status: ProgressStatus::NonCyclicInProgress,
            credit: Vec::new(),
            emitted_total: 0,
            last_updated: 0,
            bump: 255,
        };
        assert!(progress.is_new());

        let credit = BTreeMap::from([("GLDB".to_string(), 3), ("GLDA".to_string(), 1)]);
        progress.set_credit(&credit);

        assert_eq!(progress.credit[0].asset, "GLDA");
        assert_eq!(progress.credit_map(), credit);
    }
}
