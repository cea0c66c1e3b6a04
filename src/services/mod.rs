//! External collaborators: catalog, identity provider, order persistence and navigation.
//!
//! Each is an async trait with a simulated implementation that waits a configurable
//! delay, standing in for the hosted services a production deployment would call.

pub mod catalog;
pub mod identity;
pub mod navigation;
pub mod persistence;

pub use catalog::*;
pub use identity::*;
pub use navigation::*;
pub use persistence::*;
