use anchor_lang::prelude::*;
use crate::errors::RollupError;
use crate::state::{
    actions, authorize, validate_definition, ActiveLookup, AuthTable, Emission, EmissionStatus,
    Organization,
};

#[derive(Accounts)]
pub struct SetEmissionStatus<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub organization: Account<'info, Organization>,

    #[account(
        mut,
        seeds = [b"lookup", organization.key().as_ref()],
        bump = active_lookup.bump,
    )]
    pub active_lookup: Account<'info, ActiveLookup>,

    #[account(
        mut,
        constraint = emission.org == organization.key() @ RollupError::EmissionNotFound,
    )]
    pub emission: Account<'info, Emission>,
}

/// INIT | DEACTIVATE -> ACTIVE; indexes the emission under every criterion asset
pub fn activate(ctx: Context<SetEmissionStatus>) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::ACTIVATE, &ctx.accounts.authority.key())?;

    let emission = &mut ctx.accounts.emission;
    require!(
        matches!(emission.status, EmissionStatus::Init | EmissionStatus::Deactivated),
        RollupError::InvalidEmissionStatus
    );
    validate_definition(
        &ctx.accounts.organization,
        &emission.name,
        &emission.criteria,
        &emission.emit_assets,
    )?;

    let active_lookup = &mut ctx.accounts.active_lookup;
    for criterion in &emission.criteria {
        active_lookup.insert(&criterion.asset, &emission.name)?;
    }

    emission.status = EmissionStatus::Active;
    emission.updated_at = Clock::get()?.unix_timestamp;

    msg!(
        "Activated emission {} on {} asset(s)",
        emission.name,
        emission.criteria.len()
    );
    Ok(())
}

/// ACTIVE -> DEACTIVATE; removes the emission from the lookup index
pub fn deactivate(ctx: Context<SetEmissionStatus>) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::DEACTIVATE, &ctx.accounts.authority.key())?;

    let emission = &mut ctx.accounts.emission;
    require!(
        emission.status == EmissionStatus::Active,
        RollupError::InvalidEmissionStatus
    );
    validate_definition(
        &ctx.accounts.organization,
        &emission.name,
        &emission.criteria,
        &emission.emit_assets,
    )?;

    let active_lookup = &mut ctx.accounts.active_lookup;
    for criterion in &emission.criteria {
        active_lookup.remove(&criterion.asset, &emission.name);
    }

    emission.status = EmissionStatus::Deactivated;
    emission.updated_at = Clock::get()?.unix_timestamp;

    msg!("Deactivated emission {}", emission.name);
    Ok(())
}
