// Composition statistics: ranking of the team line-ups users end up with.

pub mod client;
pub mod composition;

pub use client::StatsClient;
pub use composition::{
    aggregate_all, aggregate_compositions, composition_key, AllStats, CompositionStat,
    DEFAULT_RANKING_LIMIT,
};
