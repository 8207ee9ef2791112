/// Business logic layer
pub mod enrichment;
pub mod posts;
pub mod rate_limit;

pub use enrichment::FeedAssembler;
pub use posts::PostService;
pub use rate_limit::{RateLimiter, RedisRateLimiter};
