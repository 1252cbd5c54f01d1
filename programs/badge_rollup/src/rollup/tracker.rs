use anchor_lang::prelude::*;
use crate::state::{EmitAsset, ProgressStatus};
use super::criteria::{fold, retain_required, CreditMap};
use super::dispatch::{plan_effects, Effect};

/// The parts of an emission definition a credit event is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct EmissionRules<'a> {
    pub criteria: &'a CreditMap,
    pub emit_assets: &'a [EmitAsset],
    pub cyclic: bool,
}

/// An asset credited to an account within an organization
#[derive(Debug, Clone, Copy)]
pub struct CreditEvent<'a> {
    pub org: Pubkey,
    pub account: Pubkey,
    pub asset: &'a str,
    pub quantity: u64,
}

/// What to persist and dispatch after a credit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: ProgressStatus,
    pub credit: CreditMap,
    pub factor: u64,
    pub effects: Vec<Effect>,
}

pub fn next_status(cyclic: bool, factor: u64) -> ProgressStatus {
    match (cyclic, factor) {
        (true, _) => ProgressStatus::CyclicInProgress,
        (false, 0) => ProgressStatus::NonCyclicInProgress,
        (false, _) => ProgressStatus::NonCyclicEmitted,
    }
}

/// Computes the next progress record for one credit event.
///
/// `current` is `None` when the account has no record for this emission yet.
/// Returns `None` when a one-shot emission's record is in the terminal
/// `NonCyclicEmitted` state: the event is absorbed and nothing is written or
/// dispatched. A record left `NonCyclicEmitted` by an emission since redefined
/// as cyclic is folded like any other.
///
/// Stored credit for assets outside the current criteria is dropped first.
pub fn apply_credit(
    current: Option<(ProgressStatus, CreditMap)>,
    rules: &EmissionRules,
    event: &CreditEvent,
) -> Result<Option<Transition>> {
    let mut credit = match current {
        Some((ProgressStatus::NonCyclicEmitted, _)) if !rules.cyclic => return Ok(None),
        Some((_, credit)) => credit,
        None => CreditMap::new(),
    };
    retain_required(&mut credit, rules.criteria);

    let folded = fold(credit, event.asset, event.quantity, rules.criteria, rules.cyclic);
    let effects = plan_effects(event.org, event.account, rules.emit_assets, folded.factor)?;

    Ok(Some(Transition {
        status: next_status(rules.cyclic, folded.factor),
        credit: folded.credit,
        factor: folded.factor,
        effects,
    }))
}
