//! Tavolo Core - Shared types library.
//!
//! This crate provides the domain types and pure state containers used by
//! the `web` binary:
//! - [`types`] - catalog, identity, and order types matching the gateway's
//!   wire shapes
//! - [`cart`] - the in-memory shopping cart
//! - [`access`] - the role-gated navigation policy
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Everything durable lives behind the remote gateway;
//! this crate models the state the application itself owns.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod cart;
pub mod types;

pub use cart::{Cart, LineItem};
pub use types::*;
