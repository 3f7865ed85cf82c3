//! Single-bet scoring pipeline
//!
//! Aggregation -> context adjustment -> distribution-blended hit rate ->
//! role classification -> reliability composite and recommendation.

pub mod aggregator;
pub mod context;
pub mod distribution;
pub mod reliability;
pub mod role;

pub use aggregator::project;
pub use context::{adjust_projection, ContextAdjustment};
pub use distribution::{adjust_hit_rate, normal_cdf, normal_sf, HitRateEstimate};
pub use reliability::{consistency_score, recommend};
pub use role::{classify, RoleCall};
