use std::collections::BTreeMap;

/// Asset identifier -> quantity
pub type CreditMap = BTreeMap<String, u64>;

/// Result of folding one credit event into an account's credit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub credit: CreditMap,
    /// Completed bundles consumed by this fold; 0 or 1 for one-shot emissions
    pub factor: u64,
}

/// How many complete copies of `criteria` the credit covers.
///
/// The minimum over every required asset of `held / required`; an asset
/// missing from `credit` contributes 0.
pub fn raw_factor(credit: &CreditMap, criteria: &CreditMap) -> u64 {
    criteria
        .iter()
        .map(|(asset, required)| {
            let held = credit.get(asset).copied().unwrap_or(0);
            held.checked_div(*required).unwrap_or(0)
        })
        .min()
        .unwrap_or(0)
}

/// Drops credit for assets the criteria no longer require, e.g. after a
/// redefinition removed them. Such credit can never complete a bundle.
pub fn retain_required(credit: &mut CreditMap, criteria: &CreditMap) {
    credit.retain(|asset, _| criteria.contains_key(asset));
}

/// Adds `quantity` of `asset` to `credit`, computes the emission factor and
/// consumes `factor * criteria[a]` from every required asset.
///
/// Assets that are not part of `criteria` are carried through untouched.
pub fn fold(
    mut credit: CreditMap,
    asset: &str,
    quantity: u64,
    criteria: &CreditMap,
    cyclic: bool,
) -> Fold {
    let held = credit.entry(asset.to_string()).or_insert(0);
    *held = held.saturating_add(quantity);

    let raw = raw_factor(&credit, criteria);
    let factor = if cyclic { raw } else { raw.min(1) };

    if factor > 0 {
        for (required_asset, required) in criteria {
            if let Some(held) = credit.get_mut(required_asset) {
                // clamp at zero on duplicate or drifted credit
                *held = held.saturating_sub(required.saturating_mul(factor));
            }
        }
    }

    Fold { credit, factor }
}
