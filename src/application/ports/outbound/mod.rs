//! Outbound ports - Interfaces that the application requires from external systems

mod clock_port;
mod error;
mod repository_port;

pub use clock_port::{ClockPort, SystemClock};
pub use error::StoreError;
pub use repository_port::{
    EventFilter, EventStorePort, GameRepositoryPort, ScenarioRepositoryPort,
};

#[cfg(test)]
pub use clock_port::MockClockPort;
#[cfg(test)]
pub use repository_port::{MockEventStorePort, MockScenarioRepositoryPort};
