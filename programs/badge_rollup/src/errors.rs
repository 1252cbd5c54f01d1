use anchor_lang::prelude::*;

#[error_code]
pub enum RollupError {
    #[msg("Unauthorized: caller is not in the allow-list for this action")]
    Unauthorized,

    #[msg("Authority table is full")]
    AuthTableFull,

    #[msg("Too many callers for a single action")]
    TooManyCallers,

    #[msg("Only the config admin can perform this operation")]
    NotAdmin,

    #[msg("Invalid authority: cannot set zero address")]
    InvalidAuthority,

    #[msg("Name is empty or too long")]
    NameTooLong,

    #[msg("Asset identifier is empty or too long")]
    AssetIdTooLong,

    #[msg("Asset does not belong to the organization")]
    AssetNotInOrg,

    #[msg("Emission criteria must not be empty")]
    EmptyCriteria,

    #[msg("Quantities must be at least 1")]
    ZeroQuantity,

    #[msg("Duplicate asset in definition")]
    DuplicateAsset,

    #[msg("Too many assets in definition")]
    TooManyAssets,

    #[msg("Emission is not in a status that allows this operation")]
    InvalidEmissionStatus,

    #[msg("Emission is locked: criteria and emit assets cannot change")]
    EmissionLocked,

    #[msg("Emission does not belong to this organization")]
    EmissionNotFound,

    #[msg("No active emissions for this asset")]
    NoActiveEmission,

    #[msg("Active lookup index is full")]
    LookupFull,

    #[msg("Issued quantity overflows")]
    QuantityOverflow,
}

#[error_code(offset = 6100)]
pub enum AggregationError {
    #[msg("Aggregation does not belong to this organization")]
    AggregationNotFound,

    #[msg("Sequence does not belong to this aggregation")]
    SequenceNotFound,

    #[msg("Sequence must be in 'init' or 'pause' status to activate")]
    NotActivatable,

    #[msg("Sequence must be 'active' to pause")]
    NotPausable,

    #[msg("Sequence must be 'active' or 'pause' to end")]
    NotEndable,

    #[msg("Sequence has ended")]
    SequenceEnded,

    #[msg("Badge is already part of this sequence")]
    BadgeAlreadyInSequence,

    #[msg("Badge is not part of this sequence")]
    BadgeNotInSequence,

    #[msg("Sequence has reached maximum badges")]
    SequenceFull,

    #[msg("Description is too long")]
    DescriptionTooLong,

    #[msg("No sequence has entered the requested status yet")]
    NoLatestSequence,

    #[msg("Sequence is not the latest one in the requested status")]
    NotLatestSequence,

    #[msg("No sequences passed to a multi-sequence transition")]
    NoSequences,
}
