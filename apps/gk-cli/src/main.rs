use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gk_app::{
    AppResult, DecisionPanel, GatekeeperConfig, KD_RANGE, KP_RANGE, PerformanceMetrics, Scenario,
    accident_report, energy_report, gatekeeper_report, sweep_gains, write_csv, write_json,
};
use gk_sim::{IntegratorType, SimulationParameters, simulate_with};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gk-cli")]
#[command(about = "Gatekeeper - PD-controlled cart teaching simulator", long_about = None)]
struct Cli {
    /// YAML file overriding decision thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one cart with explicit parameters
    Simulate(SimulateArgs),
    /// Stage 1: compare the digital twin against the real cart
    Accident {
        #[arg(long)]
        json: bool,
    },
    /// Stage 2: kinetic energy on the real cart for the given gains
    Energy {
        #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
        kp: f64,
        #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
        kd: f64,
        #[arg(long)]
        json: bool,
    },
    /// Stage 3: gatekeeper decision on the worst-case plant
    Gatekeeper {
        #[arg(long, default_value_t = 25.0, allow_hyphen_values = true)]
        kp: f64,
        #[arg(long, default_value_t = 8.0, allow_hyphen_values = true)]
        kd: f64,
        #[arg(long)]
        json: bool,
    },
    /// Rate a grid of gains spanning the teaching ranges
    Sweep {
        #[arg(long, value_enum, default_value_t = StageArg::Gatekeeper)]
        stage: StageArg,
        /// Number of Kp values between the slider limits
        #[arg(long, default_value_t = 6)]
        kp_steps: usize,
        /// Number of Kd values between the slider limits
        #[arg(long, default_value_t = 5)]
        kd_steps: usize,
        #[arg(long)]
        json: bool,
    },
    /// Write the default thresholds to a YAML file
    InitConfig {
        /// Output path
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Cart mass (kg)
    #[arg(long)]
    mass: f64,
    /// Viscous friction coefficient (N·s/m)
    #[arg(long)]
    friction: f64,
    /// Proportional gain
    #[arg(long, allow_hyphen_values = true)]
    kp: f64,
    /// Derivative gain
    #[arg(long, allow_hyphen_values = true)]
    kd: f64,
    /// Target position (m); defaults to the configured target
    #[arg(long, allow_hyphen_values = true)]
    x_ref: Option<f64>,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x0: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    v0: f64,
    /// Time horizon (s)
    #[arg(long, default_value_t = 5.0)]
    t_max: f64,
    /// Fixed step (s)
    #[arg(long, default_value_t = 0.01)]
    dt: f64,
    #[arg(long, value_enum, default_value_t = IntegratorArg::Euler)]
    integrator: IntegratorArg,
    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,
    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Euler,
    Rk4,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
            IntegratorArg::Rk4 => IntegratorType::RK4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Summary,
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum StageArg {
    Energy,
    Gatekeeper,
}

impl From<StageArg> for Scenario {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Energy => Scenario::FeelTheEnergy,
            StageArg::Gatekeeper => Scenario::GatekeeperDecision,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV/JSON on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GatekeeperConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(config = ?cli.config, "thresholds ready");

    match cli.command {
        Commands::Simulate(args) => cmd_simulate(&args, &config),
        Commands::Accident { json } => cmd_accident(&config, json),
        Commands::Energy { kp, kd, json } => cmd_energy(kp, kd, &config, json),
        Commands::Gatekeeper { kp, kd, json } => cmd_gatekeeper(kp, kd, &config, json),
        Commands::Sweep {
            stage,
            kp_steps,
            kd_steps,
            json,
        } => cmd_sweep(stage.into(), kp_steps, kd_steps, &config, json),
        Commands::InitConfig { path } => cmd_init_config(&path),
    }
}

fn cmd_simulate(args: &SimulateArgs, config: &GatekeeperConfig) -> AppResult<()> {
    let params = SimulationParameters::new(
        args.mass,
        args.friction,
        args.kp,
        args.kd,
        args.x_ref.unwrap_or(config.x_ref),
    )
    .with_initial(args.x0, args.v0)
    .with_horizon(args.t_max, args.dt);

    let started = Instant::now();
    let traj = simulate_with(&params, args.integrator.into())?;
    tracing::debug!(
        samples = traj.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "simulation finished"
    );

    match args.format {
        Format::Csv => with_output(args.output.as_deref(), |out| write_csv(&traj, out)),
        Format::Json => with_output(args.output.as_deref(), |out| write_json(&traj, out)),
        Format::Summary => {
            let metrics = PerformanceMetrics::compute(
                &traj,
                &GatekeeperConfig {
                    x_ref: params.x_ref,
                    ..config.clone()
                },
            )?;
            println!("✓ Simulated {} samples", traj.len());
            println!(
                "  m = {} kg, c = {} N·s/m, Kp = {}, Kd = {}, x_ref = {} m",
                params.mass, params.friction, params.kp, params.kd, params.x_ref
            );
            if let Some(x) = traj.final_position() {
                println!("  Final position: {:.4} m", x);
            }
            print_metrics(&metrics);
            Ok(())
        }
    }
}

fn cmd_accident(config: &GatekeeperConfig, json: bool) -> AppResult<()> {
    let report = accident_report(config)?;
    if json {
        return write_json(&report, io::stdout().lock());
    }

    println!("{}", Scenario::AccidentAnalysis.label());
    println!("\nExpected (digital twin):");
    print_metrics(&report.twin);
    println!("\nActual (real cart):");
    print_metrics(&report.actual);

    match report.divergence_time_s {
        Some(t) => println!(
            "\nTrajectories diverge by more than {} m at t = {:.2} s",
            config.divergence_tolerance, t
        ),
        None => println!("\nTrajectories never diverge"),
    }
    if report.model_mismatch_caused_crash() {
        println!("The twin stays clear of the wall; the real cart does not.");
    }
    Ok(())
}

fn cmd_energy(kp: f64, kd: f64, config: &GatekeeperConfig, json: bool) -> AppResult<()> {
    let report = energy_report(kp, kd, config)?;
    if json {
        return write_json(&report, io::stdout().lock());
    }

    println!("{}", Scenario::FeelTheEnergy.label());
    println!("  Kp = {}, Kd = {}", kp, kd);
    print_metrics(&report.metrics);
    println!("\n{}", report.lesson.summary());
    Ok(())
}

fn cmd_gatekeeper(kp: f64, kd: f64, config: &GatekeeperConfig, json: bool) -> AppResult<()> {
    let report = gatekeeper_report(kp, kd, config)?;
    if json {
        return write_json(&report, io::stdout().lock());
    }

    println!("{}", Scenario::GatekeeperDecision.label());
    println!("  Kp = {}, Kd = {}", kp, kd);
    print_panel(&report.panel);
    Ok(())
}

fn cmd_sweep(
    scenario: Scenario,
    kp_steps: usize,
    kd_steps: usize,
    config: &GatekeeperConfig,
    json: bool,
) -> AppResult<()> {
    let kp_values = KP_RANGE.steps(kp_steps);
    let kd_values = KD_RANGE.steps(kd_steps);
    let cells = sweep_gains(scenario.plant(), &kp_values, &kd_values, config)?;
    if json {
        return write_json(&cells, io::stdout().lock());
    }

    println!("{}", scenario.label());
    println!(
        "{:>6} {:>6} {:>9} {:>9} {:>8}  {}",
        "Kp", "Kd", "margin", "settle", "cost", "verdict"
    );
    for cell in &cells {
        let m = &cell.panel.metrics;
        println!(
            "{:>6.1} {:>6.1} {:>9.3} {:>9.2} {:>8.1}  {}",
            cell.kp,
            cell.kd,
            m.safety_margin,
            m.settling_time_s,
            m.actuation_cost,
            cell.panel.verdict.label()
        );
    }
    Ok(())
}

fn cmd_init_config(path: &Path) -> AppResult<()> {
    GatekeeperConfig::default().save_yaml(path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn print_metrics(m: &PerformanceMetrics) {
    println!("  Safety margin:  {:.2} m", m.safety_margin);
    println!("  Arrival time:   {:.2} s", m.settling_time_s);
    println!("  Energy cost:    £{:.0}", m.actuation_cost);
    println!("  Peak energy:    {:.2} J", m.peak_energy_j);
}

fn print_panel(panel: &DecisionPanel) {
    let m = &panel.metrics;
    println!("\nDecision panel:");
    println!(
        "  Safety margin: {:.2} m  [{}]",
        m.safety_margin,
        panel.safety.label()
    );
    println!(
        "  Arrival time:  {:.2} s  [{}]",
        m.settling_time_s,
        panel.speed.label()
    );
    println!(
        "  Energy cost:   £{:.0}  [{}]",
        m.actuation_cost,
        panel.cost.label()
    );
    println!(
        "\nFinal decision: {} - {}",
        panel.verdict.label(),
        panel.verdict.summary()
    );
}

fn with_output<F>(path: Option<&Path>, write: F) -> AppResult<()>
where
    F: FnOnce(&mut dyn Write) -> AppResult<()>,
{
    match path {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write(&mut file)?;
            eprintln!("✓ Wrote {}", path.display());
            Ok(())
        }
        None => write(&mut io::stdout().lock()),
    }
}
