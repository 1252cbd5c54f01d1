use anchor_lang::prelude::*;
use crate::errors::AggregationError;
use super::{string_size, MAX_ASSET_LEN, MAX_DESCRIPTION_LEN};

// =============================================================================
// BOUNDED AGGREGATION SEQUENCES
// =============================================================================
//
// An aggregation is a named series of numbered sequences (phases).
// Sequence lifecycle: init -> active <-> pause, active|pause -> end (terminal).
//
// The Sequence account is keyed by (aggregation, seq_id) and owns its badge
// memberships, so a bulk update over "every badge in this sequence" is a scan
// of one account in insertion order. Membership status is copied from the
// sequence when a badge is added and changes independently afterwards.
// =============================================================================

/// Maximum badges per sequence
pub const MAX_SEQUENCE_BADGES: usize = 16;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SequenceStatus {
    Init,
    Active,
    Paused,
    Ended,
}

#[account]
pub struct Aggregation {
    pub org: Pubkey,
    /// Aggregation symbol (PDA seed)
    pub symbol: String,
    pub description: String,
    /// Id the next initialized sequence receives
    pub next_seq_id: u64,
    pub last_init_seq_id: u64,
    pub last_active_seq_id: u64,
    pub last_pause_seq_id: u64,
    pub last_end_seq_id: u64,
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Aggregation {
    pub const SIZE: usize = 8 +              // discriminator
        32 +                                 // org
        string_size(MAX_ASSET_LEN) +         // symbol
        string_size(MAX_DESCRIPTION_LEN) +   // description
        8 +                                  // next_seq_id
        8 +                                  // last_init_seq_id
        8 +                                  // last_active_seq_id
        8 +                                  // last_pause_seq_id
        8 +                                  // last_end_seq_id
        8 +                                  // created_at
        1;                                   // bump

    /// Records a sequence transition in the "last ... seq id" bookkeeping
    pub fn note_transition(&mut self, seq_id: u64, status: SequenceStatus) {
        match status {
            SequenceStatus::Init => self.last_init_seq_id = seq_id,
            SequenceStatus::Active => self.last_active_seq_id = seq_id,
            SequenceStatus::Paused => self.last_pause_seq_id = seq_id,
            SequenceStatus::Ended => self.last_end_seq_id = seq_id,
        }
    }

    /// Id of the sequence that most recently entered `status`
    pub fn latest(&self, status: SequenceStatus) -> Result<u64> {
        let seq_id = match status {
            SequenceStatus::Init => self.last_init_seq_id,
            SequenceStatus::Active => self.last_active_seq_id,
            SequenceStatus::Paused => self.last_pause_seq_id,
            SequenceStatus::Ended => self.last_end_seq_id,
        };
        // seq ids start at 1
        require!(seq_id != 0, AggregationError::NoLatestSequence);
        Ok(seq_id)
    }

    /// Fails unless `seq_id` is the latest sequence to enter `status`
    pub fn require_latest(&self, status: SequenceStatus, seq_id: u64) -> Result<()> {
        let latest = self.latest(status)?;
        if latest != seq_id {
            msg!(
                "Sequence {} is not the latest {:?} sequence of {} ({})",
                seq_id,
                status,
                self.symbol,
                latest
            );
            return err!(AggregationError::NotLatestSequence);
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct BadgeMembership {
    pub badge: String,
    pub status: SequenceStatus,
    /// Units issued while both the sequence and this membership were active
    pub issued_count: u64,
}

impl BadgeMembership {
    pub const SIZE: usize = string_size(MAX_ASSET_LEN) + 1 + 8;
}

#[account]
pub struct Sequence {
    pub aggregation: Pubkey,
    pub seq_id: u64,
    pub status: SequenceStatus,
    pub description: String,
    pub init_time: i64,
    pub active_time: Option<i64>,
    pub pause_time: Option<i64>,
    pub end_time: Option<i64>,
    pub badges: Vec<BadgeMembership>,
    /// PDA bump seed
    pub bump: u8,
}

impl Sequence {
    pub const SIZE: usize = 8 +                                  // discriminator
        32 +                                                     // aggregation
        8 +                                                      // seq_id
        1 +                                                      // status
        string_size(MAX_DESCRIPTION_LEN) +                       // description
        8 +                                                      // init_time
        9 +                                                      // active_time
        9 +                                                      // pause_time
        9 +                                                      // end_time
        4 + BadgeMembership::SIZE * MAX_SEQUENCE_BADGES +        // badges
        1;                                                       // bump

    pub fn activate(&mut self, now: i64) -> Result<()> {
        require!(
            matches!(self.status, SequenceStatus::Init | SequenceStatus::Paused),
            AggregationError::NotActivatable
        );
        self.status = SequenceStatus::Active;
        self.active_time = Some(now);
        Ok(())
    }

    pub fn pause(&mut self, now: i64) -> Result<()> {
        require!(self.status == SequenceStatus::Active, AggregationError::NotPausable);
        self.status = SequenceStatus::Paused;
        self.pause_time = Some(now);
        Ok(())
    }

    pub fn end(&mut self, now: i64) -> Result<()> {
        require!(
            matches!(self.status, SequenceStatus::Active | SequenceStatus::Paused),
            AggregationError::NotEndable
        );
        self.status = SequenceStatus::Ended;
        self.end_time = Some(now);
        Ok(())
    }

    pub fn membership(&self, badge: &str) -> Option<&BadgeMembership> {
        self.badges.iter().find(|member| member.badge == badge)
    }

    /// Adds badges with the sequence's current status copied in
    pub fn add_badges(&mut self, badges: &[String]) -> Result<()> {
        require!(self.status != SequenceStatus::Ended, AggregationError::SequenceEnded);
        for badge in badges {
            require!(
                self.membership(badge).is_none(),
                AggregationError::BadgeAlreadyInSequence
            );
            require!(
                self.badges.len() < MAX_SEQUENCE_BADGES,
                AggregationError::SequenceFull
            );
            self.badges.push(BadgeMembership {
                badge: badge.clone(),
                status: self.status,
                issued_count: 0,
            });
        }
        Ok(())
    }

    /// Pauses the named badges, or every non-ended badge when `badges` is empty.
    /// Returns how many memberships changed.
    pub fn pause_badges(&mut self, badges: &[String]) -> Result<usize> {
        self.update_badges(badges, |status| {
            (status != SequenceStatus::Ended).then_some(SequenceStatus::Paused)
        })
    }

    /// Resumes the named badges, or every paused badge when `badges` is empty
    pub fn resume_badges(&mut self, badges: &[String]) -> Result<usize> {
        self.update_badges(badges, |status| {
            (status == SequenceStatus::Paused).then_some(SequenceStatus::Active)
        })
    }

    fn update_badges<F>(&mut self, badges: &[String], next: F) -> Result<usize>
    where
        F: Fn(SequenceStatus) -> Option<SequenceStatus>,
    {
        for badge in badges {
            require!(
                self.membership(badge).is_some(),
                AggregationError::BadgeNotInSequence
            );
        }

        let mut changed = 0;
        for member in self
            .badges
            .iter_mut()
            .filter(|member| badges.is_empty() || badges.contains(&member.badge))
        {
            if let Some(status) = next(member.status) {
                if status != member.status {
                    member.status = status;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Counts an issuance when both the sequence and the membership are active.
    /// Returns whether the issuance was counted.
    pub fn record_issuance(&mut self, badge: &str, quantity: u64) -> Result<bool> {
        let sequence_active = self.status == SequenceStatus::Active;
        let member = self
            .badges
            .iter_mut()
            .find(|member| member.badge == badge)
            .ok_or(AggregationError::BadgeNotInSequence)?;

        if !sequence_active || member.status != SequenceStatus::Active {
            return Ok(false);
        }
        member.issued_count = member.issued_count.saturating_add(quantity);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> Sequence {
        Sequence {
            aggregation: Pubkey::new_unique(),
            seq_id: 1,
            status: SequenceStatus::Init,
            description: String::new(),
            init_time: 10,
            active_time: None,
            pause_time: None,
            end_time: None,
            badges: Vec::new(),
            bump: 255,
        }
    }

    fn names(badges: &[&str]) -> Vec<String> {
        badges.iter().map(|badge| badge.to_string()).collect()
    }

    #[test]
    fn lifecycle_follows_allowed_transitions() {
        let mut seq = sequence();
        assert_eq!(seq.pause(11).unwrap_err(), AggregationError::NotPausable.into());
        assert_eq!(seq.end(11).unwrap_err(), AggregationError::NotEndable.into());

        seq.activate(12).unwrap();
        seq.pause(13).unwrap();
        seq.activate(14).unwrap();
        assert_eq!(seq.active_time, Some(14));
        assert_eq!(seq.pause_time, Some(13));

        seq.end(15).unwrap();
        assert_eq!(seq.status, SequenceStatus::Ended);
        assert_eq!(seq.activate(16).unwrap_err(), AggregationError::NotActivatable.into());
        assert_eq!(seq.end(16).unwrap_err(), AggregationError::NotEndable.into());
    }

    fn aggregation() -> Aggregation {
        Aggregation {
            org: Pubkey::new_unique(),
            symbol: "GLDAGG".to_string(),
            description: String::new(),
            next_seq_id: 1,
            last_init_seq_id: 0,
            last_active_seq_id: 0,
            last_pause_seq_id: 0,
            last_end_seq_id: 0,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn latest_sequence_tracks_each_status() {
        let mut agg = aggregation();
        assert_eq!(
            agg.latest(SequenceStatus::Init).unwrap_err(),
            AggregationError::NoLatestSequence.into()
        );

        agg.note_transition(1, SequenceStatus::Init);
        agg.note_transition(2, SequenceStatus::Init);
        agg.note_transition(1, SequenceStatus::Active);
        agg.note_transition(1, SequenceStatus::Paused);
        agg.note_transition(1, SequenceStatus::Ended);

        assert_eq!(agg.latest(SequenceStatus::Init).unwrap(), 2);
        assert_eq!(agg.latest(SequenceStatus::Active).unwrap(), 1);
        assert_eq!(agg.latest(SequenceStatus::Paused).unwrap(), 1);
        assert_eq!(agg.latest(SequenceStatus::Ended).unwrap(), 1);
    }

    #[test]
    fn only_the_latest_sequence_passes() {
        let mut agg = aggregation();
        agg.note_transition(1, SequenceStatus::Init);
        agg.note_transition(2, SequenceStatus::Init);

        assert!(agg.require_latest(SequenceStatus::Init, 2).is_ok());
        assert_eq!(
            agg.require_latest(SequenceStatus::Init, 1).unwrap_err(),
            AggregationError::NotLatestSequence.into()
        );
        assert_eq!(
            agg.require_latest(SequenceStatus::Paused, 2).unwrap_err(),
            AggregationError::NoLatestSequence.into()
        );
    }

    #[test]
    fn membership_copies_status_then_diverges() {
        let mut seq = sequence();
        seq.add_badges(&names(&["GLDA"])).unwrap();
        seq.activate(12).unwrap();
        seq.add_badges(&names(&["GLDB"])).unwrap();

        assert_eq!(seq.membership("GLDA").unwrap().status, SequenceStatus::Init);
        assert_eq!(seq.membership("GLDB").unwrap().status, SequenceStatus::Active);

        assert_eq!(seq.pause_badges(&names(&["GLDB"])).unwrap(), 1);
        assert_eq!(seq.status, SequenceStatus::Active);
        assert_eq!(seq.membership("GLDB").unwrap().status, SequenceStatus::Paused);
    }

    #[test]
    fn empty_badge_list_updates_whole_sequence() {
        let mut seq = sequence();
        seq.activate(12).unwrap();
        seq.add_badges(&names(&["GLDA", "GLDB", "GLDC"])).unwrap();

        assert_eq!(seq.pause_badges(&[]).unwrap(), 3);
        assert_eq!(seq.resume_badges(&names(&["GLDA"])).unwrap(), 1);
        assert_eq!(seq.resume_badges(&[]).unwrap(), 2);
        assert!(seq.badges.iter().all(|member| member.status == SequenceStatus::Active));
    }

    #[test]
    fn rejects_duplicates_unknown_and_ended() {
        let mut seq = sequence();
        seq.add_badges(&names(&["GLDA"])).unwrap();
        assert_eq!(
            seq.add_badges(&names(&["GLDA"])).unwrap_err(),
            AggregationError::BadgeAlreadyInSequence.into()
        );
        assert_eq!(
            seq.pause_badges(&names(&["GLDZ"])).unwrap_err(),
            AggregationError::BadgeNotInSequence.into()
        );

        seq.activate(12).unwrap();
        seq.end(13).unwrap();
        assert_eq!(
            seq.add_badges(&names(&["GLDB"])).unwrap_err(),
            AggregationError::SequenceEnded.into()
        );
    }

    #[test]
    fn issuance_counts_only_when_both_active() {
        let mut seq = sequence();
        seq.add_badges(&names(&["GLDA"])).unwrap();
        assert!(!seq.record_issuance("GLDA", 2).unwrap());

        seq.activate(12).unwrap();
        // membership still carries the copied init status
        assert!(!seq.record_issuance("GLDA", 2).unwrap());

        seq.pause_badges(&[]).unwrap();
        seq.resume_badges(&[]).unwrap();
        assert!(seq.record_issuance("GLDA", 2).unwrap());
        assert!(seq.record_issuance("GLDA", 3).unwrap());
        assert_eq!(seq.membership("GLDA").unwrap().issued_count, 5);
    }
}
