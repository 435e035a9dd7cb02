//! Broadside AI for BROADSIDE.
//!
//! Steers an autonomous ship so its loaded broadside bears on a target,
//! while a pair of forward feelers keeps it from ramming other hulls.
//! Pure decision logic over plain data and the core collaborator traits;
//! no ECS dependency.

pub mod broadside;
pub mod profile;
pub mod sensing;

pub use broadside::{BroadsideAi, BroadsideContext, TargetInfo};
pub use broadside_core as core;
pub use profile::BroadsideProfile;
