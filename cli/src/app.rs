use planwatch_core::config::AppConfig;
use planwatch_core::error::CliError;
use planwatch_core::plan::PlanResult;
use planwatch_core::source::spawn_jsonl_replay;
use tokio::io::AsyncRead;

use crate::commands::cli::WatchArgs;
use crate::render::{is_interactive_terminal, select_renderer};

/// Opens the event source, picks a renderer and consumes the stream.
pub async fn run_watch(args: WatchArgs, mut cfg: AppConfig) -> Result<PlanResult, CliError> {
    if let Some(delay_ms) = args.delay_ms {
        cfg.replay.delay_ms = delay_ms;
    }

    let reader: Box<dyn AsyncRead + Unpin + Send> = match args.events.as_deref() {
        Some(path) if !args.reads_stdin() => {
            let file = tokio::fs::File::open(path).await.map_err(|e| {
                CliError::Anyhow(anyhow::anyhow!("open events file {}: {e}", path.display()))
            })?;
            Box::new(file)
        }
        _ => Box::new(tokio::io::stdin()),
    };

    let (channels, replay_task) = spawn_jsonl_replay(reader, &cfg.replay);
    let mut renderer = select_renderer(
        args.mode,
        is_interactive_terminal(),
        &cfg.tui,
        args.resources(),
    );
    tracing::info!(
        renderer = renderer.name(),
        stdin = args.reads_stdin(),
        delay_ms = cfg.replay.delay_ms,
        "watching plan stream"
    );

    let result = renderer.render(channels).await;
    // A cancelled run leaves the source mid-stream.
    replay_task.abort();
    match &result {
        Ok(plan) => tracing::info!(plan_id = %plan.plan_id, "plan received"),
        Err(e) => tracing::warn!(error = %e, "plan stream did not produce a plan"),
    }
    result
}
