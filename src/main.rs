//! gridshed entry point: CLI wiring, model loading and the headless runner.

use std::process;

use clap::Parser;
use tracing::info;

use gridshed::assets::{AssetStatus, probe_image};
use gridshed::cli::CliOptions;
use gridshed::config::DashboardConfig;
use gridshed::grid::GridSnapshot;
use gridshed::io::export::export_history_csv;
use gridshed::logging::{self, LogTarget};
use gridshed::model::TreeModel;
use gridshed::session::{Session, unix_now};

/// Picks the log destination: files win, the TUI never logs to stderr.
fn log_target(cli: &CliOptions) -> LogTarget {
    if let Some(path) = &cli.log_file {
        return LogTarget::File(path.clone());
    }
    #[cfg(feature = "tui")]
    if cli.tui {
        return LogTarget::Off;
    }
    LogTarget::Stderr
}

/// Prints the per-device badge grid for one snapshot.
fn print_devices(snapshot: &GridSnapshot) {
    for d in &snapshot.devices {
        let badge = if d.active { "🟢 ACTIVE" } else { "🔴 SHED" };
        println!(
            "  {} {:<24} {:<10} ({})  {badge}",
            d.profile.emoji, d.name, d.profile.category, d.profile.priority,
        );
    }
}

/// Runs `cli.cycles` refresh passes without a terminal UI.
fn run_headless(cli: &CliOptions, cfg: &DashboardConfig, model: &TreeModel, asset: &AssetStatus) {
    let mut session = Session::from_config(cfg);
    for name in &cli.remove {
        session.remove_device(name);
    }
    for name in &cli.add {
        session.add_device(name);
    }

    let set_point = cli.initial_reading(cfg);
    let mut sensor = cfg.simulated_sensor();
    let mut last = None;

    for cycle in 0..cli.cycles {
        let reading = if cycle == 0 {
            set_point
        } else {
            sensor.sample(set_point)
        };
        let snapshot = session.refresh(model, reading, unix_now());

        if cli.json {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("error: failed to serialize snapshot: {e}");
                    process::exit(1);
                }
            }
        } else {
            println!("{snapshot}");
        }
        last = Some(snapshot);
    }

    if !cli.json {
        if let Some(snapshot) = &last {
            println!();
            print_devices(snapshot);
        }
        if asset.is_missing() {
            println!("\n⚠ {}", asset.describe());
        }
    }

    if let Some(path) = &cli.history_out {
        if let Err(e) = export_history_csv(session.history(), path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("History written to {}", path.display());
    }
}

fn main() {
    let cli = CliOptions::parse();

    if let Err(e) = logging::init(&log_target(&cli)) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    // Load and validate config
    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    // The model is required; there is no fallback.
    let model = match TreeModel::load(&cfg.model.path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Model file not found or unusable; provide a trained artifact with --model.");
            process::exit(1);
        }
    };

    let asset = probe_image(cfg.assets.image.as_deref());
    info!(
        preset = cli.preset_name().unwrap_or("custom"),
        devices = cfg.session.devices.len(),
        "dashboard ready"
    );

    #[cfg(feature = "tui")]
    if cli.tui {
        let preset = cli.preset_name().unwrap_or("custom").to_string();
        let mut app = gridshed::tui::runtime::App::new(cfg, Box::new(model), asset, preset);
        let reading = cli.initial_reading(app.config());
        app.start_with(reading, &cli.remove, &cli.add);
        if let Err(e) = gridshed::tui::run(&mut app) {
            eprintln!("error: TUI crashed: {e}");
            process::exit(1);
        }
        return;
    }

    run_headless(&cli, &cfg, &model, &asset);
}
