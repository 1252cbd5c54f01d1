use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use crate::errors::AggregationError;
use crate::state::{actions, authorize, Aggregation, AuthTable, Sequence, SequenceStatus};

type Apply = fn(&mut Sequence, i64) -> Result<()>;

#[derive(Accounts)]
pub struct SetSequenceStatus<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    #[account(mut)]
    pub aggregation: Account<'info, Aggregation>,

    #[account(
        mut,
        constraint = sequence.aggregation == aggregation.key() @ AggregationError::SequenceNotFound,
    )]
    pub sequence: Account<'info, Sequence>,
}

/// Same transition over several sequences, passed as writable remaining accounts
#[derive(Accounts)]
pub struct SetSequencesStatus<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    #[account(mut)]
    pub aggregation: Account<'info, Aggregation>,
}

pub fn activate_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
    transition(ctx, "activated", Sequence::activate)
}

pub fn pause_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
    transition(ctx, "paused", Sequence::pause)
}

pub fn end_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
    transition(ctx, "ended", Sequence::end)
}

/// Activates the sequence initialized most recently
pub fn activate_latest_init(ctx: Context<SetSequenceStatus>) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.aggregation.require_latest(SequenceStatus::Init, accounts.sequence.seq_id)?;
    transition(ctx, "activated", Sequence::activate)
}

/// Reactivates the sequence paused most recently
pub fn activate_latest_paused(ctx: Context<SetSequenceStatus>) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.aggregation.require_latest(SequenceStatus::Paused, accounts.sequence.seq_id)?;
    transition(ctx, "activated", Sequence::activate)
}

/// Ends the sequence activated most recently
pub fn end_latest_active(ctx: Context<SetSequenceStatus>) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.aggregation.require_latest(SequenceStatus::Active, accounts.sequence.seq_id)?;
    transition(ctx, "ended", Sequence::end)
}

pub fn activate_sequences<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
) -> Result<()> {
    transition_many(ctx, "activated", Sequence::activate)
}

pub fn pause_sequences<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
) -> Result<()> {
    transition_many(ctx, "paused", Sequence::pause)
}

pub fn end_sequences<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
) -> Result<()> {
    transition_many(ctx, "ended", Sequence::end)
}

fn transition(ctx: Context<SetSequenceStatus>, verb: &str, apply: Apply) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::SET_SEQUENCE_STATUS, &ctx.accounts.authority.key())?;

    let now = Clock::get()?.unix_timestamp;
    let sequence = &mut ctx.accounts.sequence;
    apply(&mut **sequence, now)?;

    let aggregation = &mut ctx.accounts.aggregation;
    aggregation.note_transition(sequence.seq_id, sequence.status);

    msg!(
        "Sequence {} of {} {} ({} badge(s))",
        sequence.seq_id,
        aggregation.symbol,
        verb,
        sequence.badges.len()
    );
    Ok(())
}

/// All or nothing: one sequence in the wrong state aborts the whole batch
fn transition_many<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
    verb: &str,
    apply: Apply,
) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::SET_SEQUENCE_STATUS, &ctx.accounts.authority.key())?;
    require!(!ctx.remaining_accounts.is_empty(), AggregationError::NoSequences);

    let now = Clock::get()?.unix_timestamp;
    let aggregation = &mut ctx.accounts.aggregation;
    let aggregation_key = aggregation.key();

    for info in ctx.remaining_accounts.iter() {
        let mut sequence = Account::<Sequence>::try_from(info)?;
        require_keys_eq!(
            sequence.aggregation,
            aggregation_key,
            AggregationError::SequenceNotFound
        );

        apply(&mut *sequence, now)?;
        aggregation.note_transition(sequence.seq_id, sequence.status);
        // remaining accounts are not serialized by the accounts struct
        sequence.exit(&crate::ID)?;

        msg!("Sequence {} of {} {}", sequence.seq_id, aggregation.symbol, verb);
    }

    msg!("{} sequence(s) {}", ctx.remaining_accounts.len(), verb);
    Ok(())
}
