use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use mouse_strafing::cli::Cli;
use mouse_strafing::replay::{run_replay, ReplayScript};
use mouse_strafing::{Preferences, SceneState};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let prefs = match &cli.prefs {
        Some(path) => Preferences::load(path)
            .with_context(|| format!("loading preferences {}", path.display()))?,
        None => Preferences::default(),
    };

    let scene = match &cli.state {
        Some(path) if path.exists() => SceneState::load(path)
            .with_context(|| format!("loading scene state {}", path.display()))?,
        _ => SceneState::default(),
    };

    let script = ReplayScript::load(&cli.script)
        .with_context(|| format!("loading replay script {}", cli.script.display()))?;

    let report = run_replay(&script, prefs, scene).context("replay failed")?;
    info!(
        "{} events, {} ticks, {} pose changes over {} session(s)",
        report.events, report.ticks, report.pose_changes, report.sessions
    );

    println!("{}", serde_json::to_string_pretty(&report.final_pose)?);

    if cli.save_state {
        if let Some(path) = &cli.state {
            report
                .scene
                .save(path)
                .with_context(|| format!("saving scene state {}", path.display()))?;
            info!("scene state written to {}", path.display());
        }
    }

    if cli.save_prefs {
        if let Some(path) = &cli.prefs {
            report
                .prefs
                .save(path)
                .with_context(|| format!("saving preferences {}", path.display()))?;
            info!("preferences written to {}", path.display());
        }
    }

    Ok(())
}
