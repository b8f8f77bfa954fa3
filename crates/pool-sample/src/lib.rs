//! # Pool Sample Library
//!
//! A simulated database connection pool built on `actor-pool`. This library exposes the
//! sample's modules for integration testing and for the `pool-sample` binary.

pub mod clients;
pub mod connection_pool;
pub mod lifecycle;
pub mod model;
