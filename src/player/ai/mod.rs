pub mod config;
pub mod heuristics;
pub mod search;
pub mod time;

pub use config::AIConfig;
pub use heuristics::{
    DifferentialReachScore, Heuristic, HeuristicKind, ImprovedScore, NullScore, OpenMoveScore,
    ReachScore, RolloutScore,
};
pub use search::{SearchMethod, SearchPlayer, SearchResult};
pub use time::{TimeManager, TimedOut};
