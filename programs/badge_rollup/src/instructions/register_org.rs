use anchor_lang::prelude::*;
use crate::errors::RollupError;
use crate::state::{
    actions, authorize, validate_name, ActiveLookup, AuthTable, Organization, MAX_ASSET_LEN,
};

#[derive(Accounts)]
#[instruction(name: String)]
pub struct RegisterOrg<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    #[account(
        init,
        payer = authority,
        space = Organization::SIZE,
        seeds = [b"org", name.as_bytes()],
        bump,
    )]
    pub organization: Account<'info, Organization>,

    #[account(
        init,
        payer = authority,
        space = ActiveLookup::SIZE,
        seeds = [b"lookup", organization.key().as_ref()],
        bump,
    )]
    pub active_lookup: Account<'info, ActiveLookup>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RegisterOrg>, name: String, org_code: String) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::REGISTER_ORG, &ctx.accounts.authority.key())?;
    validate_name(&name)?;
    require!(
        !org_code.is_empty() && org_code.len() <= MAX_ASSET_LEN,
        RollupError::AssetIdTooLong
    );

    let organization = &mut ctx.accounts.organization;
    organization.name = name;
    organization.org_code = org_code.to_ascii_uppercase();
    organization.authority = ctx.accounts.authority.key();
    organization.created_at = Clock::get()?.unix_timestamp;
    organization.bump = ctx.bumps.organization;

    let active_lookup = &mut ctx.accounts.active_lookup;
    active_lookup.org = organization.key();
    active_lookup.entries = Vec::new();
    active_lookup.bump = ctx.bumps.active_lookup;

    msg!(
        "Registered organization {} with code {}",
        organization.name,
        organization.org_code
    );

    Ok(())
}
