//! Go Marketplace Core - Shared cart types.
//!
//! This crate provides the types shared by the cart library and the CLI:
//! - `cart` - Cart state container, persistence and summary view
//! - `cli` - Command-line front end over a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart transitions - no I/O, no
//! storage access, no HTTP clients. Everything here is synchronous and
//! deterministic, which keeps the cart rules testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, line items and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
