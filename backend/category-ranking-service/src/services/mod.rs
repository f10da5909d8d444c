pub mod aggregator;
pub mod pipeline;
pub mod ranker;

pub use aggregator::EngagementAggregator;
pub use pipeline::RankingPipeline;
pub use ranker::{CategoryRanker, RankingPolicy};
