//! Domain services - Pure operations over domain entities

mod event_renderer;

pub use event_renderer::{event_class, season_class, unit_string, EventRenderer, RenderedEvent};
