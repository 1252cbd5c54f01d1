pub mod initialize;
pub mod configure;
pub mod register_org;

pub mod emission;
pub mod aggregation;

pub use initialize::*;
pub use configure::*;
pub use register_org::*;
pub use emission::*;
pub use aggregation::*;
