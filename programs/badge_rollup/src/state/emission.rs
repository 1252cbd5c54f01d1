use anchor_lang::prelude::*;
use std::collections::BTreeMap;
use crate::errors::RollupError;
use super::{string_size, validate_name, Organization, MAX_ASSET_LEN, MAX_NAME_LEN};

// =============================================================================
// ROLLUP EMISSION DEFINITION
// =============================================================================
//
// An emission maps prerequisite asset quantities ("criteria") to reward
// effects ("emit assets"). Once activated the definition is locked; it can be
// rewritten only in INIT, or after deactivation when the config policy allows.
// =============================================================================

/// Maximum criteria per emission
pub const MAX_CRITERIA: usize = 8;

/// Maximum emit assets per emission
pub const MAX_EMIT_ASSETS: usize = 8;

/// Lifecycle of an emission definition
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum EmissionStatus {
    Init,
    Active,
    Deactivated,
}

/// Which downstream subsystem an emit asset is issued through
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum EffectKind {
    /// Direct badge issuance
    SimpleBadge,
    /// Claim capacity grant on a claimable asset
    ClaimAsset,
}

/// One required asset and how many units complete a bundle
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct Criterion {
    pub asset: String,
    pub quantity: u64,
}

impl Criterion {
    pub const SIZE: usize = string_size(MAX_ASSET_LEN) + 8;
}

/// One reward issued per completed bundle, scaled by the emission factor
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct EmitAsset {
    pub kind: EffectKind,
    pub asset: String,
    pub quantity: u64,
}

impl EmitAsset {
    pub const SIZE: usize = 1 + string_size(MAX_ASSET_LEN) + 8;
}

#[account]
pub struct Emission {
    /// Owning organization
    pub org: Pubkey,
    /// Emission name, unique within the organization (PDA seed)
    pub name: String,
    /// Required asset -> quantity per bundle
    pub criteria: Vec<Criterion>,
    /// Rewards per completed bundle
    pub emit_assets: Vec<EmitAsset>,
    pub status: EmissionStatus,
    /// Cyclic emissions may fire repeatedly; one-shot emissions fire once per account
    pub cyclic: bool,
    pub created_at: i64,
    pub updated_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Emission {
    pub const SIZE: usize = 8 +                              // discriminator
        32 +                                                 // org
        string_size(MAX_NAME_LEN) +                          // name
        4 + Criterion::SIZE * MAX_CRITERIA +                 // criteria
        4 + EmitAsset::SIZE * MAX_EMIT_ASSETS +              // emit_assets
        1 +                                                  // status
        1 +                                                  // cyclic
        8 +                                                  // created_at
        8 +                                                  // updated_at
        1;                                                   // bump

    /// Criteria as an ordered asset -> quantity map
    pub fn criteria_map(&self) -> BTreeMap<String, u64> {
        self.criteria
            .iter()
            .map(|criterion| (criterion.asset.clone(), criterion.quantity))
            .collect()
    }

    pub fn requires(&self, asset: &str) -> bool {
        self.criteria.iter().any(|criterion| criterion.asset == asset)
    }

    /// Whether criteria and emit assets may be rewritten right now
    pub fn is_redefinable(&self, allow_after_deactivate: bool) -> bool {
        match self.status {
            EmissionStatus::Init => true,
            EmissionStatus::Deactivated => allow_after_deactivate,
            EmissionStatus::Active => false,
        }
    }
}

/// Checks a definition before it is written or (re)activated
pub fn validate_definition(
    org: &Organization,
    name: &str,
    criteria: &[Criterion],
    emit_assets: &[EmitAsset],
) -> Result<()> {
    validate_name(name)?;

    require!(!criteria.is_empty(), RollupError::EmptyCriteria);
    require!(criteria.len() <= MAX_CRITERIA, RollupError::TooManyAssets);
    require!(emit_assets.len() <= MAX_EMIT_ASSETS, RollupError::TooManyAssets);

    for (index, criterion) in criteria.iter().enumerate() {
        org.require_owns_asset(&criterion.asset)?;
        // zero would divide by zero in the criteria engine
        require!(criterion.quantity > 0, RollupError::ZeroQuantity);
        require!(
            criteria[..index].iter().all(|other| other.asset != criterion.asset),
            RollupError::DuplicateAsset
        );
    }

    for (index, emit) in emit_assets.iter().enumerate() {
        org.require_owns_asset(&emit.asset)?;
        require!(emit.quantity > 0, RollupError::ZeroQuantity);
        require!(
            emit_assets[..index]
                .iter()
                .all(|other| (other.kind, &other.asset) != (emit.kind, &emit.asset)),
            RollupError::DuplicateAsset
        );
    }

    Ok(())
}
