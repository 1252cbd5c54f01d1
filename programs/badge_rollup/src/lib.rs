use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod rollup;
pub mod state;

use instructions::*;

declare_id!("7TJUR6p1No6cXbDkiRz5mfPpe9JhVpWRBCH6f54Wjtj5");

#[program]
pub mod badge_rollup {
    use super::*;

    // === Configuration ===

    /// Create the config and auth table, with the signer as admin
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Hand the admin role to another key
    pub fn set_admin(ctx: Context<Configure>, new_admin: Pubkey) -> Result<()> {
        instructions::configure::set_admin(ctx, new_admin)
    }

    /// Allow or forbid redefining deactivated emissions
    pub fn set_policy(
        ctx: Context<Configure>,
        allow_redefine_after_deactivate: bool,
    ) -> Result<()> {
        instructions::configure::set_policy(ctx, allow_redefine_after_deactivate)
    }

    /// Replace the callers allowed to invoke `action`; an empty list clears it
    pub fn set_action_auth(
        ctx: Context<Configure>,
        action: String,
        callers: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::configure::set_action_auth(ctx, action, callers)
    }

    // === Organizations ===

    /// Register an organization and its active-emission lookup
    pub fn register_org(ctx: Context<RegisterOrg>, name: String, org_code: String) -> Result<()> {
        instructions::register_org::handler(ctx, name, org_code)
    }

    // === Emission Lifecycle ===

    /// Define a new emission in Init status
    pub fn define_emission(ctx: Context<DefineEmission>, params: EmissionParams) -> Result<()> {
        instructions::emission::define_emission::handler(ctx, params)
    }

    /// Redefine an emission that has not been activated
    pub fn update_emission(ctx: Context<UpdateEmission>, params: EmissionParams) -> Result<()> {
        instructions::emission::update_emission::handler(ctx, params)
    }

    /// Activate an emission and index it under each criterion asset
    pub fn activate(ctx: Context<SetEmissionStatus>) -> Result<()> {
        instructions::emission::set_emission_status::activate(ctx)
    }

    /// Deactivate an emission and drop it from the lookup
    pub fn deactivate(ctx: Context<SetEmissionStatus>) -> Result<()> {
        instructions::emission::set_emission_status::deactivate(ctx)
    }

    // === Rollup ===

    /// Credit an issued badge toward one active emission for the recipient
    pub fn on_badge_issued(ctx: Context<OnBadgeIssued>, params: BadgeIssuedParams) -> Result<()> {
        instructions::emission::on_badge_issued::handler(ctx, params)
    }

    // === Aggregations ===

    /// Create an aggregation for one of the organization's symbols
    pub fn init_aggregation(
        ctx: Context<InitAggregation>,
        symbol: String,
        description: String,
    ) -> Result<()> {
        instructions::aggregation::init_aggregation::handler(ctx, symbol, description)
    }

    /// Open the next sequence of an aggregation
    pub fn init_sequence(ctx: Context<InitSequence>, description: String) -> Result<()> {
        instructions::aggregation::init_sequence::handler(ctx, description)
    }

    pub fn activate_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::activate_sequence(ctx)
    }

    pub fn pause_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::pause_sequence(ctx)
    }

    pub fn end_sequence(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::end_sequence(ctx)
    }

    /// Activate the sequence initialized most recently
    pub fn activate_latest_init(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::activate_latest_init(ctx)
    }

    /// Reactivate the sequence paused most recently
    pub fn activate_latest_paused(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::activate_latest_paused(ctx)
    }

    /// End the sequence activated most recently
    pub fn end_latest_active(ctx: Context<SetSequenceStatus>) -> Result<()> {
        instructions::aggregation::set_sequence_status::end_latest_active(ctx)
    }

    /// Activate every sequence passed as a remaining account
    pub fn activate_sequences<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
    ) -> Result<()> {
        instructions::aggregation::set_sequence_status::activate_sequences(ctx)
    }

    pub fn pause_sequences<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
    ) -> Result<()> {
        instructions::aggregation::set_sequence_status::pause_sequences(ctx)
    }

    pub fn end_sequences<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetSequencesStatus<'info>>,
    ) -> Result<()> {
        instructions::aggregation::set_sequence_status::end_sequences(ctx)
    }

    // === Sequence Badges ===

    pub fn add_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
        instructions::aggregation::sequence_badges::add_badges(ctx, badges)
    }

    /// Add badges to the sequence initialized most recently
    pub fn add_badges_latest_init(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
        instructions::aggregation::sequence_badges::add_badges_latest_init(ctx, badges)
    }

    /// Pause badges in a sequence (all of them if `badges` is empty)
    pub fn pause_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
        instructions::aggregation::sequence_badges::pause_badges(ctx, badges)
    }

    /// Resume badges in a sequence (all paused ones if `badges` is empty)
    pub fn resume_badges(ctx: Context<SequenceBadges>, badges: Vec<String>) -> Result<()> {
        instructions::aggregation::sequence_badges::resume_badges(ctx, badges)
    }

    /// Count an issuance against an active badge of an active sequence
    pub fn record_issuance(
        ctx: Context<RecordIssuance>,
        badge: String,
        quantity: u64,
    ) -> Result<()> {
        instructions::aggregation::record_issuance::handler(ctx, badge, quantity)
    }
}
