pub mod define_emission;
pub mod update_emission;
pub mod set_emission_status;
pub mod on_badge_issued;

pub use define_emission::*;
pub use update_emission::*;
pub use set_emission_status::*;
pub use on_badge_issued::*;
