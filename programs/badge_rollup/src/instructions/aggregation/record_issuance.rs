use anchor_lang::prelude::*;
use crate::errors::AggregationError;
use crate::state::{actions, authorize, Aggregation, AuthTable, Sequence};

#[derive(Accounts)]
pub struct RecordIssuance<'info> {
    pub notifier: Signer<'info>,

    #[account(
        seeds = [b"auth"],
        bump = auth_table.bump,
    )]
    pub auth_table: Account<'info, AuthTable>,

    pub aggregation: Account<'info, Aggregation>,

    #[account(
        mut,
        constraint = sequence.aggregation == aggregation.key() @ AggregationError::SequenceNotFound,
    )]
    pub sequence: Account<'info, Sequence>,
}

/// Counts an issued badge toward its sequence membership
pub fn handler(ctx: Context<RecordIssuance>, badge: String, quantity: u64) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::RECORD_ISSUANCE, &ctx.accounts.notifier.key())?;

    let sequence = &mut ctx.accounts.sequence;
    if sequence.record_issuance(&badge, quantity)? {
        msg!(
            "Recorded {} {} in sequence {} of {}",
            quantity,
            badge,
            sequence.seq_id,
            ctx.accounts.aggregation.symbol
        );
    } else {
        msg!(
            "Sequence {} or badge {} not active, issuance not counted",
            sequence.seq_id,
            badge
        );
    }
    Ok(())
}
