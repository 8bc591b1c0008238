//! rubin-etc CLI - Exposure time calculator for Rubin Observatory follow-up planning.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "rubin-etc")]
#[command(about = "Exposure time calculator for Rubin Observatory ToO planning", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and logs)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Exposure time needed to reach a 5-sigma depth
    Exptime {
        /// Target 5-sigma point-source depth (AB mag)
        m5: f64,

        /// Filter band (u, g, r, i, z, y)
        #[arg(short, long)]
        filter: String,

        /// Airmass of the observation
        #[arg(short = 'X', long, default_value = "1.0")]
        airmass: f64,

        /// Use bright-twilight sky and seeing (r, i, z only)
        #[arg(long)]
        twilight: bool,
    },

    /// 5-sigma depth reached in a given exposure time
    Depth {
        /// Exposure time in seconds
        exptime: f64,

        /// Filter band (u, g, r, i, z, y)
        #[arg(short, long)]
        filter: String,

        /// Airmass of the observation
        #[arg(short = 'X', long, default_value = "1.0")]
        airmass: f64,

        /// Use bright-twilight sky and seeing (r, i, z only)
        #[arg(long)]
        twilight: bool,
    },

    /// Magnitude losses for a moving target
    Trailing {
        /// Apparent rate of motion (e.g., "2 deg/day", "0.3 arcsec/s")
        #[arg(long, default_value = "2 deg/day")]
        velocity: String,

        /// Seeing FWHM (e.g., "0.8 arcsec")
        #[arg(long, default_value = "0.8 arcsec")]
        seeing: String,

        /// Exposure time (e.g., "30 s", "0.5 min")
        #[arg(long, default_value = "30 s")]
        exptime: String,
    },

    /// Total time to observe a visit sequence on several fields
    Budget {
        /// Number of fields
        #[arg(short = 'n', long, default_value = "1")]
        fields: u32,

        /// Filters of the visit (e.g., "griz" or "g r i z")
        #[arg(short, long, num_args = 1.., required = true)]
        filters: Vec<String>,

        /// Exposure time per filter in seconds
        #[arg(short, long, num_args = 1.., required = true)]
        exptimes: Vec<f64>,

        /// JSON file overriding the default overheads
        #[arg(long)]
        overheads: Option<PathBuf>,
    },

    /// List filter bands and their photometric constants
    Filters,

    /// Show details and a depth table for one filter
    Info {
        /// Filter band (u, g, r, i, z, y)
        filter: String,
    },

    /// Convert a V magnitude to a Pan-STARRS1 band
    Color {
        /// Johnson V magnitude
        mag_v: f64,

        /// PS1 passband (g, r, i, z, y, w)
        #[arg(short, long)]
        passband: String,

        /// Asteroid taxonomic class (solar, mean, s, c, q, x, d, neo)
        #[arg(short, long, default_value = "mean")]
        taxonomy: String,
    },

    /// Query close approaches from the JPL SBDB
    #[cfg(feature = "fetch")]
    CloseApproach {
        /// Maximum miss distance (au, or with LD suffix)
        #[arg(long, default_value = "1LD")]
        max_distance: String,

        /// Faintest absolute magnitude H
        #[arg(long, default_value = "28.0")]
        max_h: f64,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Query a JPL Horizons ephemeris around a close approach
    #[cfg(feature = "fetch")]
    Ephemeris {
        /// Small-body designation (e.g., "2023 EY")
        target: String,

        /// Close-approach time as a TDB Julian date
        #[arg(long)]
        jd: f64,

        /// Days on each side of the close approach
        #[arg(long, default_value = "15")]
        days: i64,

        /// Ephemeris step size
        #[arg(long, default_value = "1h")]
        step: String,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Exptime {
            m5,
            filter,
            airmass,
            twilight,
        } => commands::exptime::exposure_time(m5, &filter, airmass, twilight),
        Commands::Depth {
            exptime,
            filter,
            airmass,
            twilight,
        } => commands::depth::depth(exptime, &filter, airmass, twilight),
        Commands::Trailing {
            velocity,
            seeing,
            exptime,
        } => commands::trailing::trailing(&velocity, &seeing, &exptime),
        Commands::Budget {
            fields,
            filters,
            exptimes,
            overheads,
        } => commands::budget::budget(fields, &filters, &exptimes, overheads.as_deref()),
        Commands::Filters => commands::filters::list_filters(),
        Commands::Info { filter } => commands::info::show_info(&filter),
        Commands::Color {
            mag_v,
            passband,
            taxonomy,
        } => commands::color::color(mag_v, &passband, &taxonomy),
        #[cfg(feature = "fetch")]
        Commands::CloseApproach {
            max_distance,
            max_h,
            start,
            end,
        } => {
            commands::close_approach::close_approach(
                &max_distance,
                max_h,
                start.as_deref(),
                end.as_deref(),
                cli.quiet,
            )
            .await
        }
        #[cfg(feature = "fetch")]
        Commands::Ephemeris {
            target,
            jd,
            days,
            step,
        } => commands::ephemeris::ephemeris(&target, jd, days, &step, cli.quiet).await,
    }
}
