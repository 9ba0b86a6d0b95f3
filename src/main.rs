//! delta-hedge CLI
//!
//! - `delta-hedge run` - hedge one simulated path, print a summary and write a chart
//! - `delta-hedge batch` - Monte Carlo distribution of the terminal hedging P&L
//!
//! Flags override values from `--config <file.toml>`, which override defaults.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use delta_hedge_rs::quant::hedging::HedgingErrorSummary;
use delta_hedge_rs::visualization::HedgePlotter;
use delta_hedge_rs::OptionType;
use delta_hedge_rs::ProcessExt;
use delta_hedge_rs::SimulationConfig;
use delta_hedge_rs::SimulationResult;
use prettytable::row;
use prettytable::Table;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "delta-hedge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (per-step hedge trace)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// TOML scenario file
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(flatten)]
  overrides: Overrides,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args, Default)]
struct Overrides {
  #[arg(long, global = true)]
  spot: Option<f64>,
  #[arg(long, global = true)]
  strike: Option<f64>,
  #[arg(long, global = true)]
  rate: Option<f64>,
  #[arg(long, global = true)]
  volatility: Option<f64>,
  /// Horizon in years
  #[arg(long, global = true)]
  horizon: Option<f64>,
  /// Rebalancing steps
  #[arg(long, global = true)]
  steps: Option<usize>,
  /// call or put
  #[arg(long = "option-type", global = true)]
  option_type: Option<String>,
  #[arg(long, global = true)]
  seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
  /// Hedge a single simulated path
  Run {
    /// Chart file name inside the output directory
    #[arg(long, default_value = "hedging_results.html")]
    chart: String,

    /// Skip writing the chart
    #[arg(long)]
    no_chart: bool,
  },

  /// Hedge many independent paths and summarise terminal P&L
  Batch {
    /// Number of paths
    #[arg(short, long)]
    paths: Option<usize>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer())
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .init();

  let mut config = match &cli.config {
    Some(path) => SimulationConfig::from_file(path)
      .with_context(|| format!("loading config from {}", path.display()))?,
    None => SimulationConfig::default(),
  };
  apply_overrides(&mut config, &cli.overrides)?;

  match cli.command {
    Commands::Run { chart, no_chart } => {
      config.validate()?;
      run_single(&config, (!no_chart).then_some(chart))
    }
    Commands::Batch { paths } => {
      if let Some(paths) = paths {
        config.paths = paths;
      }
      config.validate()?;
      run_batch(&config)
    }
  }
}

fn apply_overrides(config: &mut SimulationConfig, o: &Overrides) -> Result<()> {
  if let Some(v) = o.spot {
    config.spot = v;
  }
  if let Some(v) = o.strike {
    config.strike = v;
  }
  if let Some(v) = o.rate {
    config.rate = v;
  }
  if let Some(v) = o.volatility {
    config.volatility = v;
  }
  if let Some(v) = o.horizon {
    config.horizon = v;
  }
  if let Some(v) = o.steps {
    config.steps = v;
  }
  if let Some(tag) = &o.option_type {
    config.option_type = tag.parse::<OptionType>()?;
  }
  if o.seed.is_some() {
    config.seed = o.seed;
  }
  Ok(())
}

fn run_single(config: &SimulationConfig, chart: Option<String>) -> Result<()> {
  info!(
    spot = config.spot,
    strike = config.strike,
    steps = config.steps,
    option_type = %config.option_type,
    "hedging single path"
  );

  let path = config
    .gbm()
    .sample_seeded(config.seed)
    .context("simulating price path")?;
  let result = config.hedger().run(&path).context("running delta hedge")?;

  print_steps(&result);
  println!(
    "\npremium {:.4}  terminal P&L {:.4}  final cash {:.4}",
    result.initial_premium(),
    result.terminal_pnl(),
    result.final_cash()
  );

  if let Some(chart) = chart {
    let out = config.output_dir.join(chart);
    HedgePlotter::hedging_report(&path, &result)
      .write_html(&out)
      .with_context(|| format!("writing chart to {}", out.display()))?;
  }

  Ok(())
}

fn run_batch(config: &SimulationConfig) -> Result<()> {
  info!(paths = config.paths, steps = config.steps, "running monte carlo batch");

  let summary = config
    .monte_carlo()
    .run()
    .context("running monte carlo hedge batch")?;
  print_summary(&summary);

  Ok(())
}

fn print_steps(result: &SimulationResult) {
  let mut table = Table::new();
  table.add_row(row![
    "day", "spot", "tau", "option", "delta", "gamma", "vega", "shares", "pnl", "cum pnl"
  ]);
  for s in result.steps() {
    table.add_row(row![
      s.day,
      format!("{:.4}", s.spot),
      format!("{:.4}", s.tau),
      format!("{:.4}", s.quote.price),
      format!("{:.4}", s.quote.delta),
      format!("{:.5}", s.quote.gamma),
      format!("{:.4}", s.quote.vega),
      format!("{:.4}", s.stock_position),
      format!("{:.4}", s.daily_pnl),
      format!("{:.4}", s.cumulative_pnl),
    ]);
  }
  table.printstd();
}

fn print_summary(summary: &HedgingErrorSummary) {
  let mut table = Table::new();
  table.add_row(row!["paths", summary.paths]);
  table.add_row(row!["premium", format!("{:.4}", summary.initial_premium)]);
  table.add_row(row!["mean", format!("{:.4}", summary.mean)]);
  table.add_row(row!["std dev", format!("{:.4}", summary.std_dev)]);
  table.add_row(row![
    "std dev / premium",
    format!("{:.2}%", summary.relative_std_dev() * 100.0)
  ]);
  table.add_row(row!["min", format!("{:.4}", summary.min)]);
  table.add_row(row!["5%", format!("{:.4}", summary.q05)]);
  table.add_row(row!["95%", format!("{:.4}", summary.q95)]);
  table.add_row(row!["max", format!("{:.4}", summary.max)]);
  table.printstd();
}
