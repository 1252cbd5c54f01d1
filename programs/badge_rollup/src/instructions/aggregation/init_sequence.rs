use anchor_lang::prelude::*;
use crate::errors::AggregationError;
use crate::state::{
    actions, authorize, Aggregation, AuthTable, Sequence, SequenceStatus, MAX_DESCRIPTION_LEN,
};

#[derive(Accounts)]
pub struct InitSequence<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    #[account(mut)]
    pub aggregation: Account<'info, Aggregation>,

    #[account(
        init,
        payer = authority,
        space = Sequence::SIZE,
        seeds = [
            b"sequence",
            aggregation.key().as_ref(),
            &aggregation.next_seq_id.to_le_bytes()
        ],
        bump,
    )]
    pub sequence: Account<'info, Sequence>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitSequence>, description: String) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::INIT_SEQUENCE, &ctx.accounts.authority.key())?;
    require!(
        description.len() <= MAX_DESCRIPTION_LEN,
        AggregationError::DescriptionTooLong
    );

    let aggregation = &mut ctx.accounts.aggregation;
    let sequence = &mut ctx.accounts.sequence;
    let seq_id = aggregation.next_seq_id;

    sequence.aggregation = aggregation.key();
    sequence.seq_id = seq_id;
    sequence.status = SequenceStatus::Init;
    sequence.description = description;
    sequence.init_time = Clock::get()?.unix_timestamp;
    sequence.active_time = None;
    sequence.pause_time = None;
    sequence.end_time = None;
    sequence.badges = Vec::new();
    sequence.bump = ctx.bumps.sequence;

    aggregation.note_transition(seq_id, SequenceStatus::Init);
    aggregation.next_seq_id += 1;

    msg!("Initialized sequence {} of {}", seq_id, aggregation.symbol);

    Ok(())
}
