//! Subcommand handlers. Each takes its parsed arguments and the output
//! stream, and reports failure as a [`CliError`](crate::CliError).

pub mod cfg;
pub mod deal;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::handle_sim_command;

/// The explicit seed, else the configured one, else a fresh random seed.
pub(crate) fn resolve_seed(explicit: Option<u64>, configured: Option<u64>) -> u64 {
    explicit.or(configured).unwrap_or_else(rand::random)
}
