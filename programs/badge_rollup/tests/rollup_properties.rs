use anchor_lang::prelude::*;
use badge_rollup::errors::RollupError;
use badge_rollup::rollup::{
    apply_credit, deliver, fold, CreditEvent, CreditMap, Effect, EffectSender, EmissionRules,
    Transition, EFFECT_MEMO,
};
use badge_rollup::state::{
    ActiveLookup, AccountProgress, Criterion, EffectKind, EmitAsset, Emission, EmissionStatus,
    ProgressStatus,
};

fn map(pairs: &[(&str, u64)]) -> CreditMap {
    pairs.iter().map(|(asset, qty)| (asset.to_string(), *qty)).collect()
}

fn badge(asset: &str, quantity: u64) -> EmitAsset {
    EmitAsset { kind: EffectKind::SimpleBadge, asset: asset.to_string(), quantity }
}

fn claim(asset: &str, quantity: u64) -> EmitAsset {
    EmitAsset { kind: EffectKind::ClaimAsset, asset: asset.to_string(), quantity }
}

/// Replays credit events against one (account, emission) record, the way
/// `on_badge_issued` reads and writes it.
struct Ledger {
    org: Pubkey,
    account: Pubkey,
    record: Option<(ProgressStatus, CreditMap)>,
    dispatched: Vec<Effect>,
}

impl Ledger {
    fn new() -> Self {
        Self {
            org: Pubkey::new_unique(),
            account: Pubkey::new_unique(),
            record: None,
            dispatched: Vec::new(),
        }
    }

    fn credit(&mut self, rules: &EmissionRules, asset: &str, quantity: u64) -> Option<Transition> {
        let event = CreditEvent { org: self.org, account: self.account, asset, quantity };
        let transition = apply_credit(self.record.clone(), rules, &event).unwrap()?;
        self.record = Some((transition.status, transition.credit.clone()));
        self.dispatched.extend(transition.effects.iter().cloned());
        Some(transition)
    }

    fn status(&self) -> Option<ProgressStatus> {
        self.record.as_ref().map(|(status, _)| *status)
    }

    fn credit_of(&self, asset: &str) -> u64 {
        self.record
            .as_ref()
            .and_then(|(_, credit)| credit.get(asset).copied())
            .unwrap_or(0)
    }
}

#[test]
fn one_shot_dispatches_exactly_once_and_then_absorbs() {
    let criteria = map(&[("GLDA", 1)]);
    let emit = [badge("GLDX", 2)];
    let rules = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: false };
    let mut ledger = Ledger::new();

    let first = ledger.credit(&rules, "GLDA", 5).unwrap();
    assert_eq!(first.factor, 1);
    assert_eq!(first.status, ProgressStatus::NonCyclicEmitted);
    // consumed only one bundle despite 5 on hand
    assert_eq!(ledger.credit_of("GLDA"), 4);

    for _ in 0..3 {
        assert!(ledger.credit(&rules, "GLDA", 10).is_none());
    }
    assert_eq!(ledger.status(), Some(ProgressStatus::NonCyclicEmitted));
    assert_eq!(ledger.credit_of("GLDA"), 4);
    assert_eq!(
        ledger.dispatched,
        vec![Effect::IssueBadge {
            org: ledger.org,
            to: ledger.account,
            badge: "GLDX".to_string(),
            quantity: 2,
            memo: EFFECT_MEMO.to_string(),
        }]
    );
}

#[test]
fn cyclic_scales_effects_by_bundle_count() {
    let criteria = map(&[("GLDA", 2), ("GLDB", 3)]);
    let emit = [badge("GLDX", 1), claim("GLDC", 5)];
    let rules = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: true };
    let mut ledger = Ledger::new();

    let partial = ledger.credit(&rules, "GLDA", 4).unwrap();
    assert_eq!(partial.factor, 0);
    assert!(partial.effects.is_empty());
    assert_eq!(partial.status, ProgressStatus::CyclicInProgress);

    let full = ledger.credit(&rules, "GLDB", 6).unwrap();
    assert_eq!(full.factor, 2);
    assert_eq!(full.credit, map(&[("GLDA", 0), ("GLDB", 0)]));
    assert_eq!(full.status, ProgressStatus::CyclicInProgress);
    assert!(matches!(&full.effects[0], Effect::IssueBadge { quantity: 2, .. }));
    assert!(matches!(
        &full.effects[1],
        Effect::GrantClaimCapacity { capacity_increase: 10, .. }
    ));
}

#[test]
fn cyclic_never_reaches_terminal_state() {
    let criteria = map(&[("GLDA", 3)]);
    let emit = [badge("GLDX", 1)];
    let rules = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: true };
    let mut ledger = Ledger::new();

    for round in 1..=20u64 {
        ledger.credit(&rules, "GLDA", round).unwrap();
        assert_eq!(ledger.status(), Some(ProgressStatus::CyclicInProgress));
        assert!(ledger.credit_of("GLDA") < 3);
    }
    // 210 credited in total, every complete bundle of 3 dispatched
    let issued: u64 = ledger
        .dispatched
        .iter()
        .map(|effect| match effect {
            Effect::IssueBadge { quantity, .. } => *quantity,
            _ => 0,
        })
        .sum();
    assert_eq!(issued, 70);
}

#[test]
fn consumption_never_exceeds_credit() {
    let criteria = map(&[("GLDA", 2), ("GLDB", 5)]);
    let sequence = [("GLDA", 3), ("GLDB", 4), ("GLDB", 9), ("GLDA", 1), ("GLDZ", 7), ("GLDA", 8)];

    let mut credit = CreditMap::new();
    for (asset, quantity) in sequence {
        let mut before = credit.clone();
        *before.entry(asset.to_string()).or_insert(0) += quantity;

        let folded = fold(credit, asset, quantity, &criteria, true);
        for (required_asset, required) in &criteria {
            let had = before.get(required_asset).copied().unwrap_or(0);
            let left = folded.credit.get(required_asset).copied().unwrap_or(0);
            assert_eq!(had - left, required * folded.factor);
        }
        // assets outside the criteria are carried untouched
        assert_eq!(folded.credit.get("GLDZ"), before.get("GLDZ"));
        credit = folded.credit;
    }
}

#[test]
fn one_shot_fold_stays_within_consumption_bounds() {
    let criteria = map(&[("GLDA", 2), ("GLDB", 3)]);
    let before = map(&[("GLDA", 9), ("GLDB", 14)]);

    // enough for four bundles, but a one-shot consumes exactly one
    let folded = fold(before.clone(), "GLDB", 0, &criteria, false);
    assert_eq!(folded.factor, 1);

    for (asset, required) in &criteria {
        let had = before[asset];
        let left = folded.credit[asset];
        assert!(left < required + had);
        assert_eq!(left, had - required);
    }
    assert_eq!(folded.credit, map(&[("GLDA", 7), ("GLDB", 11)]));
}

#[test]
fn exact_bundle_consumes_down_to_zero() {
    let criteria = map(&[("GLDA", 3)]);
    for cyclic in [false, true] {
        let folded = fold(map(&[("GLDA", 2)]), "GLDA", 1, &criteria, cyclic);
        assert_eq!(folded.factor, 1);
        assert_eq!(folded.credit, map(&[("GLDA", 0)]));
    }
}

#[test]
fn redefined_emission_turning_cyclic_keeps_accruing() {
    let criteria = map(&[("GLDA", 1)]);
    let emit = [badge("GLDX", 1)];
    let one_shot = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: false };
    let cyclic = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: true };
    let mut ledger = Ledger::new();

    ledger.credit(&one_shot, "GLDA", 1).unwrap();
    assert_eq!(ledger.status(), Some(ProgressStatus::NonCyclicEmitted));
    assert!(ledger.credit(&one_shot, "GLDA", 1).is_none());

    let transition = ledger.credit(&cyclic, "GLDA", 5).unwrap();
    assert_eq!(transition.factor, 5);
    assert_eq!(ledger.status(), Some(ProgressStatus::CyclicInProgress));
    assert_eq!(ledger.dispatched.len(), 2);
}

#[test]
fn stale_credit_from_dropped_criteria_cannot_complete_a_bundle() {
    let emit = [badge("GLDX", 1)];
    let both = map(&[("GLDA", 1), ("GLDB", 1)]);
    let only_a = map(&[("GLDA", 1)]);
    let mut ledger = Ledger::new();

    let original = EmissionRules { criteria: &both, emit_assets: &emit, cyclic: true };
    ledger.credit(&original, "GLDB", 5).unwrap();
    assert_eq!(ledger.credit_of("GLDB"), 5);

    // redefined to {A}: stale B is pruned on the next event
    let narrowed = EmissionRules { criteria: &only_a, emit_assets: &emit, cyclic: true };
    let transition = ledger.credit(&narrowed, "GLDA", 1).unwrap();
    assert_eq!(transition.factor, 1);
    assert_eq!(transition.credit, map(&[("GLDA", 0)]));

    // redefined back to {A, B}: the pruned B no longer counts
    let widened = EmissionRules { criteria: &both, emit_assets: &emit, cyclic: true };
    let transition = ledger.credit(&widened, "GLDA", 1).unwrap();
    assert_eq!(transition.factor, 0);
    assert_eq!(ledger.credit_of("GLDB"), 0);
}

#[test]
fn surplus_of_one_asset_cannot_cover_a_missing_one() {
    let criteria = map(&[("GLDA", 1), ("GLDB", 1)]);
    let rules = EmissionRules { criteria: &criteria, emit_assets: &[], cyclic: true };
    let mut ledger = Ledger::new();

    let transition = ledger.credit(&rules, "GLDA", 1_000).unwrap();
    assert_eq!(transition.factor, 0);
    assert_eq!(ledger.credit_of("GLDA"), 1_000);
    assert_eq!(ledger.credit_of("GLDB"), 0);
}

#[test]
fn oversized_reward_is_rejected_instead_of_wrapping() {
    let criteria = map(&[("GLDA", 1)]);
    let emit = [badge("GLDX", u64::MAX)];
    let rules = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: true };
    let event = CreditEvent {
        org: Pubkey::new_unique(),
        account: Pubkey::new_unique(),
        asset: "GLDA",
        quantity: 2,
    };

    assert_eq!(
        apply_credit(None, &rules, &event).unwrap_err(),
        RollupError::QuantityOverflow.into()
    );
}

struct Flaky {
    fail_badge: &'static str,
    sent: Vec<Effect>,
}

impl EffectSender for Flaky {
    fn send(&mut self, effect: &Effect) -> Result<()> {
        if let Effect::IssueBadge { badge, .. } = effect {
            if badge == self.fail_badge {
                return err!(RollupError::Unauthorized);
            }
        }
        self.sent.push(effect.clone());
        Ok(())
    }
}

#[test]
fn failed_effect_does_not_block_the_rest() {
    let criteria = map(&[("GLDA", 1)]);
    let emit = [badge("GLDX", 1), badge("GLDY", 1), claim("GLDC", 1)];
    let rules = EmissionRules { criteria: &criteria, emit_assets: &emit, cyclic: false };
    let mut ledger = Ledger::new();

    let transition = ledger.credit(&rules, "GLDA", 1).unwrap();
    let mut sender = Flaky { fail_badge: "GLDY", sent: Vec::new() };

    assert_eq!(deliver(&mut sender, &transition.effects), 2);
    assert_eq!(sender.sent.len(), 2);
    // progress already recorded regardless of delivery
    assert_eq!(ledger.status(), Some(ProgressStatus::NonCyclicEmitted));
}

#[test]
fn emissions_sharing_an_asset_keep_separate_progress() {
    let org = Pubkey::new_unique();
    let account = Pubkey::new_unique();

    let emission = |name: &str, criteria: Vec<Criterion>, cyclic: bool| Emission {
        org,
        name: name.to_string(),
        criteria,
        emit_assets: vec![badge("GLDX", 1)],
        status: EmissionStatus::Active,
        cyclic,
        created_at: 0,
        updated_at: 0,
        bump: 255,
    };
    let pair = emission(
        "pair",
        vec![
            Criterion { asset: "GLDA".to_string(), quantity: 1 },
            Criterion { asset: "GLDB".to_string(), quantity: 1 },
        ],
        false,
    );
    let solo = emission("solo", vec![Criterion { asset: "GLDA".to_string(), quantity: 2 }], true);

    let mut lookup = ActiveLookup { org, entries: Vec::new(), bump: 255 };
    for emission in [&pair, &solo] {
        for criterion in &emission.criteria {
            lookup.insert(&criterion.asset, &emission.name).unwrap();
        }
    }
    assert_eq!(lookup.emissions_for("GLDA").len(), 2);
    assert!(lookup.is_active_for("GLDB", "pair"));
    assert!(!lookup.is_active_for("GLDB", "solo"));

    let mut records: Vec<AccountProgress> = Vec::new();
    for name in lookup.emissions_for("GLDA").to_vec() {
        let emission = if name == "pair" { &pair } else { &solo };
        let criteria = emission.criteria_map();
        let rules = EmissionRules {
            criteria: &criteria,
            emit_assets: &emission.emit_assets,
            cyclic: emission.cyclic,
        };
        let event = CreditEvent { org, account, asset: "GLDA", quantity: 2 };
        let transition = apply_credit(None, &rules, &event).unwrap().unwrap();

        let mut progress = AccountProgress {
            emission: Pubkey::new_unique(),
            account,
            org,
            status: transition.status,
            credit: Vec::new(),
            emitted_total: transition.factor,
            last_updated: 0,
            bump: 255,
        };
        progress.set_credit(&transition.credit);
        records.push(progress);
    }

    let pair_progress = &records[0];
    assert_eq!(pair_progress.status, ProgressStatus::NonCyclicInProgress);
    assert_eq!(pair_progress.credit_map(), map(&[("GLDA", 2)]));

    let solo_progress = &records[1];
    assert_eq!(solo_progress.status, ProgressStatus::CyclicInProgress);
    assert_eq!(solo_progress.emitted_total, 1);
    assert_eq!(solo_progress.credit_map(), map(&[("GLDA", 0)]));

    lookup.remove("GLDA", "pair");
    lookup.remove("GLDB", "pair");
    assert_eq!(lookup.emissions_for("GLDA"), &["solo".to_string()]);
    assert!(lookup.emissions_for("GLDB").is_empty());
}
