//! Trainings Service - CRUD backend for workout training plans
//!
//! Authenticated users create, list, filter, patch, block, score, and
//! favorite trainings. The domain layer owns the lifecycle invariants
//! (title uniqueness, ownership-gated mutation, scaled-integer score
//! aggregation); adapters wire it to PostgreSQL, Redis, and HTTP.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
