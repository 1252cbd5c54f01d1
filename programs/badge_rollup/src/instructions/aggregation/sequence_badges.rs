use anchor_lang::prelude::*;
use crate::errors::AggregationError;
use crate::state::{
    actions, authorize, Aggregation, AuthTable, Organization, Sequence, SequenceStatus,
};

#[derive(Accounts)]
pub struct SequenceBadges<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub organization: Account<'info, Organization>,

    #[account(
        constraint = aggregation.org == organization.key() @ AggregationError::AggregationNotFound,
    )]
    pub aggregation: Account<'info, Aggregation>,

    #[account(
        mut,
        constraint = sequence.aggregation == aggregation.key() @ AggregationError::SequenceNotFound,
    )]
    pub sequence: Account<'info, Sequence>,
}

/// Adds badges to the sequence; each membership starts with the sequence's status
pub fn add_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
    add(ctx, badges)
}

/// Adds badges to the sequence initialized most recently
pub fn add_badges_latest_init(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.aggregation.require_latest(SequenceStatus::Init, accounts.sequence.seq_id)?;
    add(ctx, badges)
}

fn add(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::ADD_BADGES, &ctx.accounts.authority.key())?;

    for badge in &badges {
        ctx.accounts.organization.require_owns_asset(badge)?;
    }

    let sequence = &mut ctx.accounts.sequence;
    sequence.add_badges(&badges)?;

    msg!(
        "Added {} badge(s) to sequence {} as {:?}",
        badges.len(),
        sequence.seq_id,
        sequence.status
    );
    Ok(())
}

/// Pauses the named badges, or all of them when `badges` is empty
pub fn pause_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::SET_BADGE_STATUS, &ctx.accounts.authority.key())?;

    let sequence = &mut ctx.accounts.sequence;
    let changed = sequence.pause_badges(&badges)?;

    msg!("Paused {} badge(s) in sequence {}", changed, sequence.seq_id);
    Ok(())
}

/// Resumes the named badges, or every paused badge when `badges` is empty
pub fn resume_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::SET_BADGE_STATUS, &ctx.accounts.authority.key())?;

    let sequence = &mut ctx.accounts.sequence;
    let changed = sequence.resume_badges(&badges)?;

    msg!("Resumed {} badge(s) in sequence {}", changed, sequence.seq_id);
    Ok(())
}
