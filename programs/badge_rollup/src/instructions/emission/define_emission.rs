use anchor_lang::prelude::*;
use crate::state::{
    actions, authorize, validate_definition, AuthTable, Criterion, EmitAsset, Emission,
    EmissionStatus, Organization,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct EmissionParams {
    /// Emission name, unique within the organization
    pub name: String,
    /// Required asset quantities per bundle
    pub criteria: Vec<Criterion>,
    /// Rewards per completed bundle
    pub emit_assets: Vec<EmitAsset>,
    /// Whether the emission may fire repeatedly
    pub cyclic: bool,
}

#[derive(Accounts)]
#[instruction(params: EmissionParams)]
pub struct DefineEmission<'info> {
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
        space = Emission::SIZE,
        seeds = [b"emission", organization.key().as_ref(), params.name.as_bytes()],
        bump,
    )]
    pub emission: Account<'info, Emission>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<DefineEmission>, params: EmissionParams) -> Result<()> {
    authorize(&*ctx.accounts.auth_table, actions::DEFINE_EMISSION, &ctx.accounts.authority.key())?;

    let organization = &ctx.accounts.organization;
    validate_definition(organization, &params.name, &params.criteria, &params.emit_assets)?;

    let now = Clock::get()?.unix_timestamp;
    let emission = &mut ctx.accounts.emission;
    emission.org = organization.key();
    emission.name = params.name;
    emission.criteria = params.criteria;
    emission.emit_assets = params.emit_assets;
    emission.status = EmissionStatus::Init;
    emission.cyclic = params.cyclic;
    emission.created_at = now;
    emission.updated_at = now;
    emission.bump = ctx.bumps.emission;

    msg!(
        "Defined {} emission {} for {} ({} criteria, {} emit assets)",
        if emission.cyclic { "cyclic" } else { "one-shot" },
        emission.name,
        organization.name,
        emission.criteria.len(),
        emission.emit_assets.len()
    );

    Ok(())
}
