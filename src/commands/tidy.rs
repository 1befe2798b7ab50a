//! Tidy command handler
//!
//! Loads layered config, plans the run, asks for confirmation when needed,
//! then reports or deletes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use dialoguer::Confirm;

use uv_tidy::application::{TidyOptions, TidyReport};
use uv_tidy::config::Config;
use uv_tidy::domain::value_objects::{format_size_kb, ExecutionMode};
use uv_tidy::infrastructure::fs::{default_roots, expand_home};
use uv_tidy::presentation::{create_tidy_use_case, Cli};

use crate::ui::context::UiContext;
use crate::ui::json::emit_report;
use crate::ui::output::print_config_warnings;
use crate::ui::views::tidy::{render_plan, render_tidy_header, render_tidy_result};

/// How the run may end up deleting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Report,
    Prompt,
    Delete,
}

fn resolve_gate(cli: &Cli, ui: &UiContext) -> Gate {
    if cli.yes {
        return Gate::Delete;
    }
    if cli.interactive && !cli.dry_run {
        if ui.can_prompt() {
            return Gate::Prompt;
        }
        tracing::warn!("--interactive needs a terminal; nothing will be deleted");
    }
    Gate::Report
}

/// Only `--yes` is confirmed up front; a prompt may still be declined
fn header_mode(gate: Gate) -> ExecutionMode {
    match gate {
        Gate::Delete => ExecutionMode::Confirmed,
        Gate::Report | Gate::Prompt => ExecutionMode::DryRun,
    }
}

fn resolve_roots(cli: &Cli) -> Vec<PathBuf> {
    if cli.venv_dirs.is_empty() {
        let roots = default_roots();
        tracing::info!(count = roots.len(), "using default roots");
        roots
    } else {
        cli.venv_dirs.iter().map(|p| expand_home(p)).collect()
    }
}

fn install_cancel_handler() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %err, "cannot install Ctrl-C handler");
    }
    cancel
}

/// Execute the tidy command
pub fn cmd_tidy(cli: &Cli) -> Result<()> {
    let (mut config, warnings) =
        Config::load_layered(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_to(&mut config);

    let ui = UiContext::new(cli.json, cli.verbose, &config);
    print_config_warnings(&warnings, ui.json);

    let options = TidyOptions::from_config(&config)?.with_roots(resolve_roots(cli));
    let gate = resolve_gate(cli, &ui);

    let cancel = install_cancel_handler();
    let use_case = create_tidy_use_case(&options).with_cancel_flag(Arc::clone(&cancel));

    let started = Instant::now();
    let plan = use_case.plan(&options)?;

    if !ui.json {
        print!(
            "{}",
            render_tidy_header(&plan.roots, &options, header_mode(gate), ui.color, ui.unicode)
        );
        println!();
        print!("{}", render_plan(&plan, ui.verbose, ui.color, ui.unicode));
        println!();
    }

    let mut mode = match gate {
        Gate::Delete => ExecutionMode::Confirmed,
        Gate::Report => ExecutionMode::DryRun,
        Gate::Prompt if plan.selection.is_empty() => ExecutionMode::DryRun,
        Gate::Prompt => {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Remove {} venvs ({})?",
                    plan.selection.len(),
                    format_size_kb(plan.selection.total_size_kb())
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Aborted.");
            }
            ExecutionMode::from_confirmation(confirmed)
        }
    };

    if cancel.load(Ordering::SeqCst) && !mode.is_dry_run() {
        tracing::warn!("cancelled; nothing will be deleted");
        mode = ExecutionMode::DryRun;
    }

    let execution = use_case.apply(&plan, mode);
    let report = TidyReport { plan, execution };

    if ui.json {
        let elapsed = started.elapsed().as_millis() as u64;
        emit_report(&report, elapsed)?;
    } else {
        print!("{}", render_tidy_result(&report, ui.color, ui.unicode));
    }

    Ok(())
}
