use anchor_lang::prelude::*;
use crate::errors::RollupError;
use super::{string_size, MAX_ASSET_LEN, MAX_NAME_LEN};

/// Organization scope for emissions and aggregations
#[account]
pub struct Organization {
    /// Human-readable name (PDA seed)
    pub name: String,
    /// Prefix every asset of this organization carries
    pub org_code: String,
    /// Who registered the organization
    pub authority: Pubkey,
    /// When the organization was registered
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Organization {
    pub const SIZE: usize = 8 +          // discriminator
        string_size(MAX_NAME_LEN) +      // name
        string_size(MAX_ASSET_LEN) +     // org_code
        32 +                             // authority
        8 +                              // created_at
        1;                               // bump

    /// An asset belongs to the organization when its identifier starts with
    /// the org code, compared case-insensitively.
    pub fn owns_asset(&self, asset: &str) -> bool {
        let code = self.org_code.as_bytes();
        let asset = asset.as_bytes();
        asset.len() >= code.len() && asset[..code.len()].eq_ignore_ascii_case(code)
    }

    pub fn require_owns_asset(&self, asset: &str) -> Result<()> {
        validate_asset_id(asset)?;
        if !self.owns_asset(asset) {
            msg!(
                "Asset {} does not belong to organization {} ({})",
                asset,
                self.name,
                self.org_code
            );
            return err!(RollupError::AssetNotInOrg);
        }
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    require!(
        !name.is_empty() && name.len() <= MAX_NAME_LEN,
        RollupError::NameTooLong
    );
    Ok(())
}

pub fn validate_asset_id(asset: &str) -> Result<()> {
    require!(
        !asset.is_empty() && asset.len() <= MAX_ASSET_LEN,
        RollupError::AssetIdTooLong
    );
    Ok(())
}
