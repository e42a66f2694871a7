//! Event publisher adapters.
//!
//! Production deployments publish lifecycle reports to a Redis pub/sub
//! channel; when no transport is configured the logging publisher records
//! reports through tracing instead, so the service runs unchanged without
//! a metrics pipeline attached.

mod in_memory;
mod logging;
mod redis;

pub use in_memory::InMemoryEventPublisher;
pub use logging::LoggingEventPublisher;
pub use redis::RedisEventPublisher;
