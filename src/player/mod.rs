pub mod ai;
pub mod controller;
pub mod greedy;
pub mod random;

pub use controller::PlayerController;
pub use greedy::GreedyPlayer;
pub use random::RandomPlayer;
