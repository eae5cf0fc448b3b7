use clap::{Parser, Subcommand, ValueEnum};

use gsoc_mentor_rewards::rewards::ProjectStatus;

#[derive(Parser)]
#[command(name = "gsoc-rewards")]
#[command(about = "Split GSoC sponsorship money among mentors of funded projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the roster file (falls back to the built-in roster)
    #[arg(short, long, global = true, default_value = "rewards.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate and print each mentor's reward
    Calculate {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Override the amount received per eligible project
        #[arg(short, long)]
        reward_per_project: Option<u64>,
    },

    /// List projects and their mentors
    Projects {
        /// Filter by status (eligible, ineligible, participating, all)
        #[arg(short, long, default_value = "all")]
        status: ProjectStatus,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write the effective roster to the config path for editing
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
