mod cli;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use colored::*;
use gsoc_mentor_rewards::{
    rewards::ProjectStatus, utils, Allocation, Config, Result, RewardError, RewardReport,
};
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("gsoc_rewards=info,gsoc_mentor_rewards=info,warn")
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        // Reader went away (e.g. piped into `head`); nothing left to report
        Err(RewardError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            error!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Calculate { format, reward_per_project } => {
            info!("Calculating mentor rewards...");
            calculate(&mut out, &config, format, reward_per_project)
        }

        Commands::Projects { status, format } => list_projects(&mut out, &config, status, format),

        Commands::Init { force } => {
            info!("Writing roster to {}", cli.config);
            initialize(&mut out, &config, &cli.config, force)
        }
    }
}

fn calculate<W: Write>(
    out: &mut W,
    config: &Config,
    format: OutputFormat,
    reward_per_project: Option<u64>,
) -> Result<()> {
    let reward_per_project = reward_per_project.unwrap_or(config.reward.per_project);
    let allocation = Allocation::calculate(&config.projects, reward_per_project)?;
    let report = RewardReport::from_allocation(&allocation, &config.reward.currency);

    match format {
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
        OutputFormat::Table => report.write_summary(out)?,
    }

    Ok(())
}

fn list_projects<W: Write>(
    out: &mut W,
    config: &Config,
    status: ProjectStatus,
    format: OutputFormat,
) -> Result<()> {
    let projects: Vec<_> = config
        .projects
        .iter()
        .filter(|p| p.matches(status))
        .collect();

    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&projects)?)?;
        return Ok(());
    }

    let widths = [36, 10, 26, 14];
    writeln!(
        out,
        "{}",
        format!("=== Projects ({}: {}) ===", status, projects.len()).cyan().bold()
    )?;
    utils::write_table_border(out, 90)?;
    utils::write_table_row(
        out,
        &[
            "Project".normal(),
            "Eligible".normal(),
            "Mentor".normal(),
            "Accepts reward".normal(),
        ],
        &widths,
    )?;
    utils::write_table_border(out, 90)?;

    for project in &projects {
        if project.mentors.is_empty() {
            utils::write_table_row(
                out,
                &[
                    project.name.as_str().normal(),
                    utils::format_flag(project.eligible),
                    "-".normal(),
                    "-".normal(),
                ],
                &widths,
            )?;
        }
        for (i, mentor) in project.mentors.iter().enumerate() {
            let (name, flag) = if i == 0 {
                (project.name.as_str().normal(), utils::format_flag(project.eligible))
            } else {
                ("".normal(), "".normal())
            };
            utils::write_table_row(
                out,
                &[
                    name,
                    flag,
                    mentor.name.as_str().normal(),
                    utils::format_flag(mentor.accepts_reward),
                ],
                &widths,
            )?;
        }
    }
    utils::write_table_border(out, 90)?;

    Ok(())
}

fn initialize<W: Write>(out: &mut W, config: &Config, path: &str, force: bool) -> Result<()> {
    config.write_to(Path::new(path), force)?;

    writeln!(out, "{}", format!("✓ Roster written to {}", path).green())?;
    writeln!(
        out,
        "  Reward per project: {}",
        utils::format_amount(config.reward.per_project, &config.reward.currency)
    )?;
    writeln!(out, "  Projects:           {}", config.projects.len())?;
    writeln!(out, "\n{}", "Edit the file, then run:".cyan())?;
    writeln!(out, "  {} to list the roster", "gsoc-rewards projects".yellow())?;
    writeln!(out, "  {} to compute rewards", "gsoc-rewards calculate".yellow())?;
    Ok(())
}
