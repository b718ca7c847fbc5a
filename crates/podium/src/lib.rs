//! Contest results and award engine.
//!
//! The pipeline is a synchronous batch transform: a data-source adapter
//! produces a [`contest::ContestSnapshot`], [`contest::enrich`] resolves one
//! verdict per submission, [`ranking`] derives the tie-broken scoreboard,
//! [`awards`] allocates the layered award set, and [`export`] serializes the
//! resolver document plus the audit roster.

pub mod awards;
pub mod config;
pub mod contest;
pub mod error;
pub mod export;
pub mod ranking;
pub mod telemetry;
