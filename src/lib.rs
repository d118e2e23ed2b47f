pub mod error;
pub use error::OcsError;

pub mod ids;
pub mod serde;

pub mod ocs;
pub use ocs::{Ocs, OcsMeta, SUCCESS_CODE};

pub mod folders;

#[cfg(feature = "client")]
pub mod client;
