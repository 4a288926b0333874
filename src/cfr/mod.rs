/// CFR 自我对弈训练
///
/// 遗憾匹配、训练配置和递归求解器

pub mod config;
pub mod regret;
pub mod solver;

pub use config::{Sampling, SolverConfig};
pub use regret::{regret_match, regret_match_masked};
pub use solver::{CfrSolver, NodeValue, TrainStats};
