//! # Auth API
//!
//! actix-web transport for the session service: request decoding, response
//! encoding, error mapping and process wiring helpers.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;
