use anchor_lang::prelude::*;
use crate::state::{AuthTable, Config};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = Config::SIZE,
        seeds = [b"config"],
        bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = AuthTable::SIZE,
        seeds = [b"auth"],
        bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.allow_redefine_after_deactivate = false;
    config.bump = ctx.bumps.config;

    let auth_table = &mut ctx.accounts.auth_table;
    auth_table.entries = Vec::new();
    auth_table.bump = ctx.bumps.auth_table;

    msg!("Initialized badge rollup with admin {}", config.admin);

    Ok(())
}
