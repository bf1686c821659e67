use crate::args::ModuleAction;
use std::io::Write;
use studio::domain::course::CourseKey;
use studio::features::experiments::Experiments;

pub(crate) async fn handle(
    experiments: &Experiments,
    course: &CourseKey,
    action: &ModuleAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let configurations = &experiments.configurations;

    match action {
        ModuleAction::List => {
            let modules = configurations.modules(course).await?;
            if modules.is_empty() {
                writeln!(out, "No advanced modules enabled.")?;
            }
            for module in modules {
                writeln!(out, "{module}")?;
            }
        },
        ModuleAction::Enable { name } => {
            let changed = configurations.set_module(course, name, true).await?;
            let state = if changed { "enabled" } else { "already enabled" };
            writeln!(out, "Module '{name}' {state}.")?;
        },
        ModuleAction::Disable { name } => {
            let changed = configurations.set_module(course, name, false).await?;
            let state = if changed { "disabled" } else { "not enabled" };
            writeln!(out, "Module '{name}' {state}.")?;
        },
    }
    Ok(())
}
