use anchor_lang::prelude::*;
use crate::errors::RollupError;
use crate::events::{BadgeIssueRequested, ClaimCapacityGranted};
use crate::state::{EffectKind, EmitAsset};

/// Memo attached to every effect issued by a rollup emission
pub const EFFECT_MEMO: &str = "issued from rollup emission";

/// One outbound, fire-and-forget issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    IssueBadge {
        org: Pubkey,
        to: Pubkey,
        badge: String,
        quantity: u64,
        memo: String,
    },
    GrantClaimCapacity {
        org: Pubkey,
        account: Pubkey,
        asset: String,
        capacity_increase: u64,
        memo: String,
    },
}

/// Expands `factor` into one effect per emit asset, quantities scaled by the factor.
/// A zero factor yields no effects at all.
pub fn plan_effects(
    org: Pubkey,
    account: Pubkey,
    emit_assets: &[EmitAsset],
    factor: u64,
) -> Result<Vec<Effect>> {
    if factor == 0 {
        return Ok(Vec::new());
    }

    emit_assets
        .iter()
        .map(|emit| -> Result<Effect> {
            let quantity = emit
                .quantity
                .checked_mul(factor)
                .ok_or(RollupError::QuantityOverflow)?;
            Ok(match emit.kind {
                EffectKind::SimpleBadge => Effect::IssueBadge {
                    org,
                    to: account,
                    badge: emit.asset.clone(),
                    quantity,
                    memo: EFFECT_MEMO.to_string(),
                },
                EffectKind::ClaimAsset => Effect::GrantClaimCapacity {
                    org,
                    account,
                    asset: emit.asset.clone(),
                    capacity_increase: quantity,
                    memo: EFFECT_MEMO.to_string(),
                },
            })
        })
        .collect()
}

/// Delivers effects to the downstream issuance subsystems
pub trait EffectSender {
    fn send(&mut self, effect: &Effect) -> Result<()>;
}

/// Sends every effect on its own; a failed send is logged and skipped so the
/// remaining effects still go out. Returns how many were sent.
pub fn deliver<S: EffectSender + ?Sized>(sender: &mut S, effects: &[Effect]) -> usize {
    let mut sent = 0;
    for effect in effects {
        match sender.send(effect) {
            Ok(()) => sent += 1,
            Err(error) => msg!("Effect dispatch failed, continuing: {}", error),
        }
    }
    sent
}

/// Publishes effects as program events for the off-chain relayer
pub struct EventSender;

impl EffectSender for EventSender {
    fn send(&mut self, effect: &Effect) -> Result<()> {
        match effect.clone() {
            Effect::IssueBadge { org, to, badge, quantity, memo } => {
                emit!(BadgeIssueRequested { org, to, badge, quantity, memo });
            }
            Effect::GrantClaimCapacity { org, account, asset, capacity_increase, memo } => {
                emit!(ClaimCapacityGranted { org, account, asset, capacity_increase, memo });
            }
        }
        Ok(())
    }
}
