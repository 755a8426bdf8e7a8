//! Application layer - Use cases over the event log
//!
//! This layer contains:
//! - Ports: inbound fact listener, outbound store/game/scenario/clock interfaces
//! - Services: event logging, log reading and retention
//! - DTOs: admin list rows

pub mod dto;
pub mod ports;
pub mod services;
