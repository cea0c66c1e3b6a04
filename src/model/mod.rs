//! Storefront data types.
//!
//! [`Cart`], [`Session`] and [`Order`] are the resources kept by the stores; the
//! `ActorEntity` impls for them live in the matching `*_actor` modules.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use user::*;
