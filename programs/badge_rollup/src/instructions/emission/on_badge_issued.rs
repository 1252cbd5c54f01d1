use anchor_lang::prelude::*;
use crate::errors::RollupError;
use crate::events::ProgressRecorded;
use crate::rollup::{apply_credit, deliver, CreditEvent, EmissionRules, EventSender};
use crate::state::{
    actions, authorize, AccountProgress, ActiveLookup, AuthTable, Emission, EmissionStatus,
    Organization,
};

// =============================================================================
// BADGE ISSUED NOTIFICATION
// =============================================================================
//
// Folds one issued badge into the recipient's progress on one active emission.
// Each (emission, recipient) pair has its own progress account, so the
// notifier sends one instruction per emission listed in the active lookup for
// the asset, bundled in a single transaction.
//
// The program cannot see the other instructions of that transaction: covering
// every listed emission is the notifier's job, and an emission it skips gets
// no credit for this issuance. Only callers in the `on_badge_issued`
// allow-list may notify, and each call logs how many emissions the asset
// fans out to so relayers can be audited against the lookup.
//
// Flow: read progress once -> apply_credit -> write progress once -> dispatch.
// =============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct BadgeIssuedParams {
    /// Badge or asset that was issued
    pub asset: String,
    /// Account that received it
    pub recipient: Pubkey,
    /// Account that issued it
    pub issuer: Pubkey,
    pub quantity: u64,
    pub memo: String,
    pub notify_accounts: Vec<Pubkey>,
}

#[derive(Accounts)]
#[instruction(params: BadgeIssuedParams)]
pub struct OnBadgeIssued<'info> {
    /// Notifier relaying the issuance; pays for a first-time progress record
    #[account(mut)]
    pub notifier: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub organization: Account<'info, Organization>,

    #[account(
        seeds = [b"lookup", organization.key().as_ref()],
        bump = active_lookup.bump,
    )]
    pub active_lookup: Account<'info, ActiveLookup>,

    #[account(
        constraint = emission.org == organization.key() @ RollupError::EmissionNotFound,
    )]
    pub emission: Account<'info, Emission>,

    #[account(
        init_if_needed,
        payer = notifier,
        space = AccountProgress::SIZE,
        seeds = [b"progress", emission.key().as_ref(), params.recipient.as_ref()],
        bump
    )]
    pub progress: Account<'info, AccountProgress>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<OnBadgeIssued>, params: BadgeIssuedParams) -> Result<()> {
    let bump = ctx.bumps.progress;
    let accounts = ctx.accounts;

    authorize(&*accounts.auth_table, actions::BADGE_ISSUED, &accounts.notifier.key())?;
    accounts.organization.require_owns_asset(&params.asset)?;

    let lookup = &accounts.active_lookup;
    let emission = &accounts.emission;
    let fan_out = lookup.emissions_for(&params.asset).len();
    require!(fan_out > 0, RollupError::NoActiveEmission);
    require!(
        emission.status == EmissionStatus::Active
            && lookup.is_active_for(&params.asset, &emission.name),
        RollupError::InvalidEmissionStatus
    );

    let criteria = emission.criteria_map();
    let progress = &mut accounts.progress;
    // the PDA seeds bind this record to (emission, recipient)
    let current = if progress.is_new() {
        None
    } else {
        Some((progress.status, progress.credit_map()))
    };

    let rules = EmissionRules {
        criteria: &criteria,
        emit_assets: &emission.emit_assets,
        cyclic: emission.cyclic,
    };
    let event = CreditEvent {
        org: accounts.organization.key(),
        account: params.recipient,
        asset: &params.asset,
        quantity: params.quantity,
    };

    let Some(transition) = apply_credit(current, &rules, &event)? else {
        msg!(
            "Emission {} already emitted for {}, credit of {} {} ignored",
            emission.name,
            params.recipient,
            params.quantity,
            params.asset
        );
        return Ok(());
    };

    if progress.is_new() {
        progress.emission = emission.key();
        progress.account = params.recipient;
        progress.org = accounts.organization.key();
        progress.emitted_total = 0;
        progress.bump = bump;
    }
    progress.status = transition.status;
    progress.set_credit(&transition.credit);
    progress.emitted_total = progress.emitted_total.saturating_add(transition.factor);
    progress.last_updated = Clock::get()?.unix_timestamp;

    msg!(
        "Credit folded: {} {} from {} to {} on {} (factor {}, status {:?}, {} emission(s) for asset)",
        params.quantity,
        params.asset,
        params.issuer,
        params.recipient,
        emission.name,
        transition.factor,
        transition.status,
        fan_out
    );

    emit!(ProgressRecorded {
        emission: emission.key(),
        account: params.recipient,
        asset: params.asset.clone(),
        quantity: params.quantity,
        factor: transition.factor,
        status: transition.status,
    });

    let sent = deliver(&mut EventSender, &transition.effects);
    if !transition.effects.is_empty() {
        msg!("Dispatched {}/{} effect(s)", sent, transition.effects.len());
    }

    Ok(())
}
