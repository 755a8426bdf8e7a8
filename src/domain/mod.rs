//! Domain layer - Core game log model with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: Event and its kind payloads, Game, scenario Area/Country
//! - Value Objects: ids, calendar, unit types, order and message codes
//! - Domain Events: facts reported by the game engine
//! - Domain Services: log rendering

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;
