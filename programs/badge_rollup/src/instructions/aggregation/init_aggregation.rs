use anchor_lang::prelude::*;
use crate::errors::AggregationError;
use crate::state::{
    actions, authorize, Aggregation, AuthTable, Organization, MAX_DESCRIPTION_LEN,
};

#[derive(Accounts)]
#[instruction(symbol: String)]
pub struct InitAggregation<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub organization: Account<'info, Organization>,

    #[account(
        init,
        payer = authority,
        space = Aggregation::SIZE,
        seeds = [b"aggregation", organization.key().as_ref(), symbol.as_bytes()],
        bump,
    )]
    pub aggregation: Account<'info, Aggregation>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitAggregation>, symbol: String, description: String) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::INIT_AGGREGATION, &ctx.accounts.authority.key())?;

    let organization = &ctx.accounts.organization;
    organization.require_owns_asset(&symbol)?;
    require!(
        description.len() <= MAX_DESCRIPTION_LEN,
        AggregationError::DescriptionTooLong
    );

    let aggregation = &mut ctx.accounts.aggregation;
    aggregation.org = organization.key();
    aggregation.symbol = symbol;
    aggregation.description = description;
    aggregation.next_seq_id = 1;
    aggregation.last_init_seq_id = 0;
    aggregation.last_active_seq_id = 0;
    aggregation.last_pause_seq_id = 0;
    aggregation.last_end_seq_id = 0;
    aggregation.created_at = Clock::get()?.unix_timestamp;
    aggregation.bump = ctx.bumps.aggregation;

    msg!(
        "Initialized aggregation {} for {}",
        aggregation.symbol,
        organization.name
    );

    Ok(())
}
