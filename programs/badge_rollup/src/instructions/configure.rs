use anchor_lang::prelude::*;
use crate::state::{AuthTable, Config};
use crate::errors::RollupError;

#[derive(Accounts)]
pub struct Configure<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ RollupError::NotAdmin,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,
}

pub fn set_admin(ctx: Context<Configure>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), RollupError::InvalidAuthority);

    ctx.accounts.config.admin = new_admin;

    msg!("Set admin to {}", new_admin);
    Ok(())
}

pub fn set_policy(ctx: Context<Configure>, allow_redefine_after_deactivate: bool) -> Result<()> {
    ctx.accounts.config.allow_redefine_after_deactivate = allow_redefine_after_deactivate;

    msg!(
        "Redefinition after deactivate {}",
        if allow_redefine_after_deactivate { "allowed" } else { "denied" }
    );
    Ok(())
}

pub fn set_action_auth(ctx: Context<Configure>, action: String, callers: Vec<Pubkey>) -> Result<()> {
    let count = callers.len();
    ctx.accounts.auth_table.set_callers(&action, callers)?;

    msg!("Authorized {} caller(s) for action {}", count, action);
    Ok(())
}
