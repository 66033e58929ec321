//! Database models and queries

pub mod fees;
pub mod init;
pub mod models;
pub mod universities;

pub use fees::*;
pub use init::*;
pub use models::*;
pub use universities::*;
