use crate::args::ConfigAction;
use std::io::Write;
use studio::domain::course::CourseKey;
use studio::domain::partitions::UserPartition;
use studio::features::experiments::configurations::EMPTY_MESSAGE;
use studio::features::experiments::{Experiments, PartitionDraft};

pub(crate) async fn handle(
    experiments: &Experiments,
    course: &CourseKey,
    action: &ConfigAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let configurations = &experiments.configurations;

    match action {
        ConfigAction::List => {
            let details = configurations.list(course).await?;
            if details.is_empty() {
                writeln!(out, "{EMPTY_MESSAGE}")?;
            }
            for row in details {
                write_partition(out, &row.partition)?;
                writeln!(out, "    allocation: {} per group", row.allocation)?;
                if row.used_by.is_empty() {
                    writeln!(out, "    not used by any content experiment")?;
                } else {
                    writeln!(out, "    used by: {}", row.used_by.join(", "))?;
                }
            }
        },
        ConfigAction::Show { id } => {
            write_partition(out, &configurations.get(course, *id).await?)?;
        },
        ConfigAction::Create { name, description, groups } => {
            let mut draft = PartitionDraft::new();
            draft.set_name(name.as_str());
            draft.set_description(description.as_str());
            if !groups.is_empty() {
                replace_groups(&mut draft, groups)?;
            }

            let saved = configurations.save(course, &draft).await?;
            writeln!(out, "Group configuration {} created.", saved.id)?;
            write_partition(out, &saved)?;
        },
        ConfigAction::Edit { id, name, description, rename, remove_group, add_group } => {
            let mut draft = configurations.edit(course, *id).await?;
            if let Some(name) = name {
                draft.set_name(name.as_str());
            }
            if let Some(description) = description {
                draft.set_description(description.as_str());
            }
            for (index, group_name) in rename {
                draft.rename_group(*index, group_name.as_str())?;
            }

            let mut removals = remove_group.clone();
            removals.sort_unstable_by(|a, b| b.cmp(a));
            removals.dedup();
            for index in removals {
                if draft.remove_group(index).is_none() {
                    anyhow::bail!("No group at index {index}");
                }
            }
            for _ in 0..*add_group {
                draft.add_group()?;
            }

            let saved = configurations.save(course, &draft).await?;
            writeln!(out, "Group configuration {} saved.", saved.id)?;
            write_partition(out, &saved)?;
        },
    }
    Ok(())
}

/// Resizes the default groups to `names.len()` and names them in order.
fn replace_groups(draft: &mut PartitionDraft, names: &[String]) -> anyhow::Result<()> {
    while draft.groups().len() < names.len() {
        draft.add_group()?;
    }
    while draft.groups().len() > names.len() {
        draft.remove_group(draft.groups().len() - 1);
    }
    for (index, name) in names.iter().enumerate() {
        draft.rename_group(index, name.as_str())?;
    }
    Ok(())
}

fn write_partition(out: &mut impl Write, partition: &UserPartition) -> std::io::Result<()> {
    writeln!(out, "{}\t{}", partition.id, partition.name)?;
    if !partition.description.is_empty() {
        writeln!(out, "    {}", partition.description)?;
    }
    for group in &partition.groups {
        writeln!(out, "    - [{}] {}", group.id, group.name)?;
    }
    Ok(())
}
