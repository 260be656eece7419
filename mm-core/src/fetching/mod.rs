pub mod fleets;
pub mod freights;
pub mod industry;
