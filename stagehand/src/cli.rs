// stagehand/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "The Declarative Warehouse-to-Webhook Flow Runner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the flow end to end (SQL -> Load -> Sign -> Notify)
    Run {
        /// Flow directory (contains flow.yaml)
        #[arg(long, default_value = ".")]
        flow_dir: PathBuf,
    },

    /// 🗺️ Validates the flow and prints the execution sequence
    Plan {
        /// Flow directory (contains flow.yaml)
        #[arg(long, default_value = ".")]
        flow_dir: PathBuf,
    },

    /// 📜 Renders the SQL templates without touching the warehouse
    Render {
        /// Flow directory (contains flow.yaml)
        #[arg(long, default_value = ".")]
        flow_dir: PathBuf,

        /// Render only a specific step (ex: "create_table")
        #[arg(long, short)]
        step: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["stagehand", "run"]);
        match args.command {
            Commands::Run { flow_dir } => {
                assert_eq!(flow_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_flow_dir() -> Result<()> {
        let args = Cli::parse_from(["stagehand", "run", "--flow-dir", "/srv/flows/balance"]);
        match args.command {
            Commands::Run { flow_dir } => {
                assert_eq!(flow_dir.to_string_lossy(), "/srv/flows/balance");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_render_step() -> Result<()> {
        let args = Cli::parse_from(["stagehand", "render", "--step", "create_table"]);
        match args.command {
            Commands::Render { step, flow_dir } => {
                assert_eq!(step, Some("create_table".to_string()));
                assert_eq!(flow_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_plan() -> Result<()> {
        let args = Cli::parse_from(["stagehand", "plan", "--flow-dir", "/tmp"]);
        match args.command {
            Commands::Plan { flow_dir } => {
                assert_eq!(flow_dir.to_string_lossy(), "/tmp");
                Ok(())
            }
            _ => bail!("Expected Plan command"),
        }
    }
}
