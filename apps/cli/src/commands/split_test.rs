use crate::args::SplitTestAction;
use std::io::Write;
use studio::domain::course::CourseKey;
use studio::features::experiments::{Experiments, SplitTestView};

pub(crate) async fn handle(
    experiments: &Experiments,
    course: &CourseKey,
    action: &SplitTestAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let split_tests = &experiments.split_tests;

    match action {
        SplitTestAction::List => {
            for block in split_tests.list(course).await? {
                let binding =
                    block.user_partition_id.map_or_else(|| "-".to_owned(), |id| id.to_string());
                writeln!(out, "{}\t{}\t{binding}", block.id, block.display_name)?;
            }
        },
        SplitTestAction::Create { display_name } => {
            let block = split_tests.create(course, display_name).await?;
            writeln!(out, "Split test {} created.", block.id)?;
        },
        SplitTestAction::Select { block, configuration } => {
            split_tests.select_configuration(course, block, *configuration).await?;
            write_view(out, &split_tests.view(course, block).await?)?;
        },
        SplitTestAction::Show { block } => {
            write_view(out, &split_tests.view(course, block).await?)?;
        },
        SplitTestAction::AddMissing { block } => {
            let created = split_tests.add_missing_groups(course, block).await?;
            writeln!(out, "Added {} group(s).", created.len())?;
            for child in created {
                writeln!(out, "    {}\t{}", child.id, child.display_name)?;
            }
        },
        SplitTestAction::DeleteChild { block, child } => {
            let removed = split_tests.delete_child(course, block, child).await?;
            writeln!(out, "Deleted child {} ({}).", removed.id, removed.display_name)?;
        },
    }
    Ok(())
}

fn write_view(out: &mut impl Write, view: &SplitTestView) -> std::io::Result<()> {
    writeln!(out, "{}", view.message())?;

    let groups = &view.groups;
    if !groups.active.is_empty() {
        writeln!(out, "Active groups:")?;
        for active in &groups.active {
            writeln!(out, "    {}\t{}", active.group.name, active.child.id)?;
        }
    }
    if !groups.inactive.is_empty() {
        writeln!(out, "Inactive groups:")?;
        for child in &groups.inactive {
            writeln!(out, "    {}\t{}", child.display_name, child.id)?;
        }
    }
    if groups.can_add_missing() {
        writeln!(out, "Missing groups:")?;
        for group in &groups.missing {
            writeln!(out, "    {}", group.name)?;
        }
    }
    Ok(())
}
