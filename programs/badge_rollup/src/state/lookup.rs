use anchor_lang::prelude::*;
use crate::errors::RollupError;
use super::{string_size, MAX_ASSET_LEN, MAX_NAME_LEN};

/// Maximum distinct assets tracked by one organization's lookup
pub const MAX_LOOKUP_ASSETS: usize = 24;

/// Maximum active emissions referencing the same asset
pub const MAX_EMISSIONS_PER_ASSET: usize = 8;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct LookupEntry {
    pub asset: String,
    pub emissions: Vec<String>,
}

impl LookupEntry {
    pub const SIZE: usize = string_size(MAX_ASSET_LEN) +
        4 + string_size(MAX_NAME_LEN) * MAX_EMISSIONS_PER_ASSET;
}

/// Asset -> names of ACTIVE emissions that require it.
/// Written only by activate / deactivate; read on every credit event.
#[account]
pub struct ActiveLookup {
    pub org: Pubkey,
    pub entries: Vec<LookupEntry>,
    /// PDA bump seed
    pub bump: u8,
}

impl ActiveLookup {
    pub const SIZE: usize = 8 +                          // discriminator
        32 +                                             // org
        4 + LookupEntry::SIZE * MAX_LOOKUP_ASSETS +      // entries
        1;                                               // bump

    pub fn emissions_for(&self, asset: &str) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.asset == asset)
            .map(|entry| entry.emissions.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_active_for(&self, asset: &str, emission: &str) -> bool {
        self.emissions_for(asset).iter().any(|name| name == emission)
    }

    /// Adds `emission` under `asset`; adding twice is a no-op
    pub fn insert(&mut self, asset: &str, emission: &str) -> Result<()> {
        match self.entries.iter_mut().find(|entry| entry.asset == asset) {
            Some(entry) => {
                if entry.emissions.iter().any(|name| name == emission) {
                    return Ok(());
                }
                require!(
                    entry.emissions.len() < MAX_EMISSIONS_PER_ASSET,
                    RollupError::LookupFull
                );
                entry.emissions.push(emission.to_string());
            }
            None => {
                require!(
                    self.entries.len() < MAX_LOOKUP_ASSETS,
                    RollupError::LookupFull
                );
                self.entries.push(LookupEntry {
                    asset: asset.to_string(),
                    emissions: vec![emission.to_string()],
                });
            }
        }
        Ok(())
    }

    /// Removes `emission` from `asset`, dropping the entry once empty
    pub fn remove(&mut self, asset: &str, emission: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.asset == asset) {
            entry.emissions.retain(|name| name != emission);
        }
        self.entries.retain(|entry| !entry.emissions.is_empty());
    }
}
