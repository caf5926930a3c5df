//! Core business rules for Peachtree.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing and verification
//! - `ledger` - Transaction types, amount and debit rules, listing options,
//!   and the status transition policy

pub mod auth;
pub mod ledger;
