// =============================================================================
// ROLLUP EMISSION CORE
// =============================================================================
//
// Pure state transitions behind `on_badge_issued`:
//
// 1. criteria: fold new credit in, compute the emission factor, consume bundles
// 2. tracker:  per (account, emission) status machine, terminal one-shot guard
// 3. dispatch: expand the factor into typed effects and hand them to a sender
//
// Nothing here touches accounts; handlers read a record once, call
// `apply_credit`, write the result once and deliver the returned effects.
// =============================================================================

pub mod criteria;
pub mod dispatch;
pub mod tracker;

pub use criteria::{fold, raw_factor, retain_required, CreditMap, Fold};
pub use dispatch::{deliver, plan_effects, Effect, EffectSender, EventSender, EFFECT_MEMO};
pub use tracker::{apply_credit, next_status, CreditEvent, EmissionRules, Transition};
