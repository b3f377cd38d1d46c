//! Vinsara Storefront library.
//!
//! Client-side state for the storefront: the shopping cart, catalog
//! sections, and the account area. The backend API and durable client
//! storage are reached through the [`api::StoreApi`] and
//! [`storage::ClientStorage`] traits so hosts can supply their own
//! transports and tests can supply fakes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod views;
