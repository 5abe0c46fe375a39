//! # Repository Layer
//!
//! One repository per aggregate, each a thin struct over the shared pool.
//! Repositories execute SQL and return kirana-core domain types; business
//! rules are enforced by calling into kirana-core before writes.

pub mod analytics;
pub mod bill;
pub mod catalog;
pub mod employee;
pub mod inventory;
pub mod product;
pub mod settings;
pub mod supplier;
