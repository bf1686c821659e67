use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use studio::domain::course::CourseKey;

#[derive(Parser, Debug)]
#[command(
    name = "studio",
    author = env!("CARGO_PKG_AUTHORS"),
    version,
    arg_required_else_help = true,
    about = "Course studio: group configurations, split tests and coupons"
)]
pub struct Cli {
    /// Configuration file (defaults to `studio.toml` in the working directory, if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides `storage.data_dir`
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Course key, e.g. `course-v1:edX+DemoX+2026`
    #[arg(short = 'k', long, value_name = "KEY")]
    pub course: CourseKey,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Advanced modules of the course
    Modules {
        #[command(subcommand)]
        action: ModuleAction,
    },
    /// Group configurations used by content experiments
    Configs {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Split-test blocks and their group children
    SplitTest {
        #[command(subcommand)]
        action: SplitTestAction,
    },
    /// Course coupons
    Coupons {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Instructor dashboard e-commerce section
    Dashboard {
        /// Course role of the viewer; repeatable
        #[arg(
            short,
            long = "role",
            value_name = "ROLE",
            value_parser = ["staff", "instructor", "finance_admin"]
        )]
        roles: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModuleAction {
    /// List enabled advanced modules
    List,
    /// Enable an advanced module (e.g. `split_test`)
    Enable { name: String },
    /// Disable an advanced module
    Disable { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List group configurations with allocation and usage
    List,
    /// Show one group configuration
    Show { id: u64 },
    /// Create a group configuration (two default groups unless `--group` is given)
    Create {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Group name; repeat once per group
        #[arg(short, long = "group", value_name = "NAME")]
        groups: Vec<String>,
    },
    /// Edit a group configuration; indexes refer to the groups as listed before the edit
    Edit {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Rename a group
        #[arg(long, value_name = "INDEX=NAME", value_parser = parse_rename)]
        rename: Vec<(usize, String)>,
        /// Remove a group
        #[arg(long, value_name = "INDEX")]
        remove_group: Vec<usize>,
        /// Append a default-named group; repeatable
        #[arg(long, action = ArgAction::Count)]
        add_group: u8,
    },
}

#[derive(Subcommand, Debug)]
pub enum SplitTestAction {
    /// List split tests of the course
    List,
    /// Create an unconfigured split test
    Create { display_name: String },
    /// Bind a split test to a group configuration
    Select { block: String, configuration: u64 },
    /// Show active, inactive and missing groups
    Show { block: String },
    /// Create children for every missing group
    AddMissing { block: String },
    /// Delete one child block
    DeleteChild { block: String, child: String },
}

#[derive(Subcommand, Debug)]
pub enum CouponAction {
    /// List all coupons, active or not
    List,
    /// Add a coupon
    Add {
        #[arg(short, long)]
        code: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Percentage, an integer between 0 and 100
        #[arg(short = 'p', long, allow_hyphen_values = true)]
        discount: String,
        #[arg(long, default_value = "staff")]
        created_by: String,
    },
    /// Update code, description and discount of a coupon
    Update {
        #[arg(long, default_value = "")]
        id: String,
        #[arg(short, long)]
        code: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short = 'p', long, allow_hyphen_values = true)]
        discount: String,
    },
    /// Deactivate a coupon
    Remove {
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Show an active coupon
    Info {
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Record a paid registration
    Purchase {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        amount_cents: u64,
    },
}

fn parse_rename(raw: &str) -> Result<(usize, String), String> {
    let (index, name) =
        raw.split_once('=').ok_or_else(|| format!("expected INDEX=NAME, got '{raw}'"))?;
    let index = index.trim().parse().map_err(|e| format!("invalid group index '{index}': {e}"))?;
    Ok((index, name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rename_pairs_are_parsed() {
        assert_eq!(parse_rename("1=Control").unwrap(), (1, "Control".to_owned()));
        assert_eq!(parse_rename("0=").unwrap(), (0, String::new()));
        assert!(parse_rename("Control").is_err());
        assert!(parse_rename("x=Control").is_err());
    }

    #[test]
    fn course_key_is_validated_by_the_parser() {
        let err = Cli::try_parse_from(["studio", "--course", "not a key", "modules", "list"]);
        assert!(err.is_err());

        let cli = Cli::try_parse_from(["studio", "-k", "course-v1:edX+DemoX+2026", "modules", "list"])
            .unwrap();
        assert_eq!(cli.course.to_string(), "course-v1:edX+DemoX+2026");
    }
}
