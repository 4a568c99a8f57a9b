use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use planwatch_core::plan::PlanningResources;

/// How plan progress is drawn.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Interactive view when stdout is a terminal, log lines otherwise.
    Auto,
    Interactive,
    Log,
}

#[derive(Parser, Debug)]
#[command(name = "planwatch", version, about = "Watch a streamed plan-generation run")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consume a plan event stream and render its progress.
    Watch(WatchArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct WatchArgs {
    /// JSONL file with one `{"type", "data"}` event per line. Reads stdin when
    /// omitted or `-`.
    #[arg(long)]
    pub events: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = RenderMode::Auto)]
    pub mode: RenderMode,

    /// Pause between replayed events (overrides config).
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Number of agents discovered before planning, shown in the header.
    #[arg(long)]
    pub agents: Option<usize>,

    #[arg(long)]
    pub teams: Option<usize>,

    #[arg(long)]
    pub environments: Option<usize>,
}

impl WatchArgs {
    /// Discovered-resource counts, if any were given.
    pub fn resources(&self) -> Option<PlanningResources> {
        if self.agents.is_none() && self.teams.is_none() && self.environments.is_none() {
            return None;
        }
        Some(PlanningResources {
            agents: self.agents.unwrap_or(0),
            teams: self.teams.unwrap_or(0),
            environments: self.environments.unwrap_or(0),
        })
    }

    pub fn reads_stdin(&self) -> bool {
        self.events
            .as_deref()
            .map(|p| p.as_os_str() == "-")
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watch(argv: &[&str]) -> WatchArgs {
        let mut full = vec!["planwatch", "watch"];
        full.extend_from_slice(argv);
        match Args::parse_from(full).command {
            Commands::Watch(args) => args,
        }
    }

    #[test]
    fn defaults_to_auto_mode_on_stdin() {
        let args = watch(&[]);
        assert_eq!(args.mode, RenderMode::Auto);
        assert!(args.reads_stdin());
        assert!(args.resources().is_none());
    }

    #[test]
    fn parses_file_mode_and_resources() {
        let args = watch(&["--events", "run.jsonl", "--mode", "log", "--agents", "4", "--teams", "2"]);
        assert_eq!(args.mode, RenderMode::Log);
        assert!(!args.reads_stdin());
        assert_eq!(
            args.resources(),
            Some(PlanningResources {
                agents: 4,
                teams: 2,
                environments: 0
            })
        );
    }

    #[test]
    fn dash_means_stdin() {
        assert!(watch(&["--events", "-"]).reads_stdin());
    }
}
