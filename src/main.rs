// RailOptic - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/railoptic
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/railoptic --seed 42 --recommend-every 5 --disrupt F205:5 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use railoptic::sim_event;
use railoptic::simulation::{LoggingConfig, LoggingGuard, SimulationController, StateSnapshot};
use railoptic::types::config::CliArgs;
use railoptic::types::{OperatorPolicy, OutputFormat, SimulationConfig};
use std::process;
use std::time::Instant;
use tracing::{error, info, Level};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging_guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting RailOptic");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    let final_state = match run_simulation(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Simulation failed: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_report(&final_state, config.output_format) {
        eprintln!("Failed to write report: {:#}", e);
        process::exit(1);
    }

    info!("RailOptic completed successfully");
}

/// Install the tracing subscriber selected by the CLI flags
fn init_logging(args: &CliArgs) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
    let mut logging = if args.debug {
        LoggingConfig::new().with_level(Level::DEBUG).with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(Level::INFO)
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(Level::WARN)
    };

    if args.json_logs {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }

    logging.init()
}

/// Run the configured number of ticks and return the final state
fn run_simulation(config: &SimulationConfig) -> anyhow::Result<StateSnapshot> {
    let started = Instant::now();
    let mut controller =
        SimulationController::new(config.clone()).context("Failed to build simulation controller")?;

    let applied = controller.apply_configured_disruptions();
    if !config.disruptions.is_empty() {
        eprintln!("Applied {} of {} disruptions", applied, config.disruptions.len());
    }

    if config.realtime {
        controller.start_simulation();
    }

    while controller.current_tick() < config.ticks {
        let before = controller.current_tick();

        if config.realtime {
            if let Some(due) = controller.next_tick_due() {
                let now = Instant::now();
                if due > now {
                    std::thread::sleep(due - now);
                }
            }
            controller.advance_at_most(Instant::now(), config.ticks - before);
        } else {
            controller.tick();
        }

        let after = controller.current_tick();
        if (before + 1..=after).any(|tick| config.recommendation_due(tick)) {
            consult_operator(&mut controller, config.operator_policy);
        }
    }

    controller.stop_simulation();

    let state = controller.get_state();
    sim_event!(
        info,
        "Simulation run complete",
        ticks = state.tick,
        throughput = state.metrics.total_throughput,
        conflicts_averted = state.metrics.conflicts_averted,
        runtime_ms = started.elapsed().as_millis() as u64,
    );
    Ok(state)
}

/// Request a recommendation and resolve it the way the operator policy says
fn consult_operator(controller: &mut SimulationController, policy: OperatorPolicy) {
    let tick = controller.current_tick();
    let Some(recommendation) = controller.request_recommendation() else {
        return;
    };

    info!(
        tick,
        recommendation_id = %recommendation.id,
        kind = %recommendation.kind,
        "Operator consulted"
    );

    match policy {
        OperatorPolicy::Accept => {
            controller.accept_recommendation();
        }
        OperatorPolicy::Reject => {
            controller.reject_recommendation();
        }
        OperatorPolicy::Hold => {}
    }
}

/// Write the final state to stdout
fn print_report(state: &StateSnapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", state),
        OutputFormat::Json => println!("{}", state.to_json().context("Failed to serialize state")?),
    }
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("RailOptic");
    eprintln!("=========");
    eprintln!("Rail traffic simulation and junction conflict arbitration");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Ticks: {}", config.ticks);
    eprintln!("  Tick Interval: {} ms", config.tick_interval_ms);
    eprintln!("  Pacing: {}", if config.realtime { "real time" } else { "as fast as possible" });
    if config.recommend_every == 0 {
        eprintln!("  Recommendations: never requested");
    } else {
        eprintln!(
            "  Recommendations: every {} ticks, policy {}",
            config.recommend_every, config.operator_policy
        );
    }
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    eprintln!("\nRoster:");
    for train in &config.trains {
        eprintln!(
            "  {} {} (P{}, {}, {:.0} -> {:.0})",
            train.id, train.name, train.priority, train.track, train.position, train.target_position
        );
    }
    if !config.disruptions.is_empty() {
        eprintln!("\nDisruptions:");
        for disruption in &config.disruptions {
            eprintln!("  {} +{} min", disruption.train_id, disruption.minutes);
        }
    }
    eprintln!();
}
