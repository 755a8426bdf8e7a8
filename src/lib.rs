//! Condottieri event log
//!
//! Records what happens in a game of Machiavelli as typed events, renders
//! them as log lines for players and sweeps the logs of long finished games.

pub mod application;
pub mod domain;
pub mod infrastructure;
