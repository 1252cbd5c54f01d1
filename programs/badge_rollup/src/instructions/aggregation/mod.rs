pub mod init_aggregation;
pub mod init_sequence;
pub mod set_sequence_status;
pub mod sequence_badges;
pub mod record_issuance;

pub use init_aggregation::*;
pub use init_sequence::*;
pub use set_sequence_status::*;
pub use sequence_badges::*;
pub use record_issuance::*;
