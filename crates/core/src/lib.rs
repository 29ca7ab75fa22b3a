//! Bazaar Core - in-memory storefront domain model.
//!
//! This crate provides the domain types used by the `bazaar` CLI:
//! - a product catalog, carts, orders, and pluggable payment methods
//! - PIN-protected bank accounts
//! - vehicles assembled from components
//! - plane shapes and vectors
//! - smaller object-design lessons: animals, a validated person, a counter,
//!   and the composition/aggregation contrast of houses and universities
//!
//! # Architecture
//!
//! The core crate holds state and rules only: no I/O, no global state. IDs
//! are issued by an [`IdSequence`] owned by the caller, and every fallible
//! operation returns a module error whose [`ErrorKind`] says whether the
//! input was bad or the operation was not allowed in the current state.
//!
//! # Modules
//!
//! - [`types`] - Value types: money, addresses, emails, IDs, credentials, statuses
//! - [`product`] - Catalog items and discounts
//! - [`user`] - Customer accounts
//! - [`cart`] - Shopping carts
//! - [`payment`] - Payment strategies
//! - [`order`] - Orders, pricing, and the order lifecycle
//! - [`bank`] - Bank accounts
//! - [`vehicle`] - Vehicles and their components
//! - [`shape`] - Shapes
//! - [`vector`] - 2D vectors and their operators
//! - [`animal`] - Animals and the daily routine template
//! - [`person`] - A person with validated fields
//! - [`counter`] - A counter with history
//! - [`house`] - Houses that own their rooms
//! - [`university`] - Universities that refer to independent students

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod animal;
pub mod bank;
pub mod cart;
pub mod counter;
pub mod error;
pub mod house;
pub mod order;
pub mod payment;
pub mod person;
pub mod product;
pub mod shape;
pub mod types;
pub mod university;
pub mod user;
pub mod vector;
pub mod vehicle;

pub use error::{Error, ErrorKind, Result};
pub use types::*;
