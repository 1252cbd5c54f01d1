use anchor_lang::prelude::*;
use crate::errors::RollupError;
use crate::state::{actions, authorize, validate_definition, AuthTable, Config, Emission, Organization};
use super::define_emission::EmissionParams;

#[derive(Accounts)]
#[instruction(params: EmissionParams)]
pub struct UpdateEmission<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub organization: Account<'info, Organization>,

    #[account(
        mut,
        seeds = [b"emission", organization.key().as_ref(), params.name.as_bytes()],
        bump = emission.bump,
    )]
    pub emission: Account<'info, Emission>,
}

/// Rewrites criteria, emit assets and the cyclic flag. Active emissions are
/// locked; deactivated ones follow the config policy.
pub fn handler(ctx: Context<UpdateEmission>, params: EmissionParams) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::UPDATE_EMISSION, &ctx.accounts.authority.key())?;

    let emission = &mut ctx.accounts.emission;
    require!(
        emission.is_redefinable(ctx.accounts.config.allow_redefine_after_deactivate),
        RollupError::EmissionLocked
    );
    validate_definition(
        &ctx.accounts.organization,
        &params.name,
        &params.criteria,
        &params.emit_assets,
    )?;

    emission.criteria = params.criteria;
    emission.emit_assets = params.emit_assets;
    emission.cyclic = params.cyclic;
    emission.updated_at = Clock::get()?.unix_timestamp;

    msg!(
        "Updated emission {} ({} criteria, {} emit assets, cyclic: {})",
        emission.name,
        emission.criteria.len(),
        emission.emit_assets.len(),
        emission.cyclic
    );

    Ok(())
}
