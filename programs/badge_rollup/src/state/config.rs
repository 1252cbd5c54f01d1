use anchor_lang::prelude::*;
use crate::errors::RollupError;
use super::{string_size, MAX_NAME_LEN};

/// Maximum distinct actions in the authority table
pub const MAX_AUTH_ACTIONS: usize = 24;

/// Maximum callers allowed per action
pub const MAX_CALLERS_PER_ACTION: usize = 8;

/// Action names checked against the authority table
pub mod actions {
    pub const REGISTER_ORG: &str = "register_org";
    pub const DEFINE_EMISSION: &str = "define_emission";
    pub const UPDATE_EMISSION: &str = "update_emission";
    pub const ACTIVATE: &str = "activate";
    pub const DEACTIVATE: &str = "deactivate";
    pub const BADGE_ISSUED: &str = "on_badge_issued";
    pub const INIT_AGGREGATION: &str = "init_aggregation";
    pub const INIT_SEQUENCE: &str = "init_sequence";
    pub const SET_SEQUENCE_STATUS: &str = "set_sequence_status";
    pub const ADD_BADGES: &str = "add_badges";
    pub const SET_BADGE_STATUS: &str = "set_badge_status";
    pub const RECORD_ISSUANCE: &str = "record_issuance";
}

// =============================================================================
// CONFIG
// =============================================================================

/// Program-wide configuration singleton
#[account]
pub struct Config {
    /// Admin who maintains the authority table and policy
    pub admin: Pubkey,
    /// Whether a deactivated emission may have its criteria rewritten before
    /// it is activated again
    pub allow_redefine_after_deactivate: bool,
    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // admin
        1 +                      // allow_redefine_after_deactivate
        1;                       // bump
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

/// Answers "may this caller run this action"
pub trait Authorizer {
    fn is_authorized(&self, action: &str, caller: &Pubkey) -> bool;
}

/// Aborts with `Unauthorized` unless the oracle allows `caller` to run `action`
pub fn authorize<A: Authorizer + ?Sized>(oracle: &A, action: &str, caller: &Pubkey) -> Result<()> {
    if oracle.is_authorized(action, caller) {
        return Ok(());
    }
    msg!("Caller {} not authorized for action {}", caller, action);
    err!(RollupError::Unauthorized)
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct AuthEntry {
    pub action: String,
    pub callers: Vec<Pubkey>,
}

impl AuthEntry {
    pub const SIZE: usize = string_size(MAX_ACTION_LEN) + 4 + 32 * MAX_CALLERS_PER_ACTION;
}

/// Maximum bytes in an action name
pub const MAX_ACTION_LEN: usize = 2 * MAX_NAME_LEN;

/// Allow-list of callers per action
#[account]
pub struct AuthTable {
    pub entries: Vec<AuthEntry>,
    /// PDA bump seed
    pub bump: u8,
}

impl AuthTable {
    pub const SIZE: usize = 8 +                          // discriminator
        4 + AuthEntry::SIZE * MAX_AUTH_ACTIONS +         // entries
        1;                                               // bump

    /// Replace the callers for `action`; an empty list removes the entry
    pub fn set_callers(&mut self, action: &str, callers: Vec<Pubkey>) -> Result<()> {
        require!(
            !action.is_empty() && action.len() <= MAX_ACTION_LEN,
            RollupError::NameTooLong
        );
        require!(
            callers.len() <= MAX_CALLERS_PER_ACTION,
            RollupError::TooManyCallers
        );
        require!(
            callers.iter().all(|caller| *caller != Pubkey::default()),
            RollupError::InvalidAuthority
        );

        let position = self.entries.iter().position(|entry| entry.action == action);
        match (position, callers.is_empty()) {
            (Some(index), true) => {
                self.entries.remove(index);
            }
            (Some(index), false) => {
                self.entries[index].callers = callers;
            }
            (None, true) => {}
            (None, false) => {
                require!(
                    self.entries.len() < MAX_AUTH_ACTIONS,
                    RollupError::AuthTableFull
                );
                self.entries.push(AuthEntry {
                    action: action.to_string(),
                    callers,
                });
            }
        }
        Ok(())
    }
}

impl Authorizer for AuthTable {
    fn is_authorized(&self, action: &str, caller: &Pubkey) -> bool {
        self.entries
            .iter()
            .find(|entry| entry.action == action)
            .map(|entry| entry.callers.contains(caller))
            .unwrap_or(false)
    }
}
