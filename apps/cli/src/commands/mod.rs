mod coupons;
mod modules;
mod partitions;
mod split_test;

use crate::args::{Cli, Commands};
use std::io::Write;
use studio::features::commerce::Commerce;
use studio::features::experiments::Experiments;
use studio::kernel::state::StudioState;

/// Executes one parsed command against the application state.
///
/// # Errors
/// Any service error, with its user-facing message, or a failed write to `out`.
pub async fn run(state: &StudioState, cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let course = &cli.course;

    match &cli.command {
        Commands::Modules { action } => {
            modules::handle(state.try_get_slice::<Experiments>()?, course, action, out).await
        },
        Commands::Configs { action } => {
            partitions::handle(state.try_get_slice::<Experiments>()?, course, action, out).await
        },
        Commands::SplitTest { action } => {
            split_test::handle(state.try_get_slice::<Experiments>()?, course, action, out).await
        },
        Commands::Coupons { action } => {
            coupons::handle(state.try_get_slice::<Commerce>()?, course, action, out).await
        },
        Commands::Dashboard { roles } => {
            coupons::dashboard(state.try_get_slice::<Commerce>()?, course, roles, out).await
        },
    }
}
