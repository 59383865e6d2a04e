use std::io::Write;
use std::path;

use crate::error::*;

/// Resolve and inspect static site settings
#[derive(Debug, clap::Parser)]
#[command(name = "siteconf", about, version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    pub(crate) color: colorchoice_clap::Color,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    Init(crate::init::InitArgs),
    Check(crate::check::CheckArgs),
    #[command(subcommand)]
    Debug(crate::debug::DebugCommands),
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _siteconf.yml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<path::PathBuf>,

    /// Output folder, relative to the site root [default: ./output]
    #[arg(short, long, value_name = "DIR")]
    destination: Option<String>,

    /// Ignore SITECONF_* environment overrides
    #[arg(long)]
    no_env: bool,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<siteconf::Config> {
        let mut config = if let Some(config_path) = self.config.as_deref() {
            siteconf::Config::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = std::env::current_dir().context("Could not read current directory")?;
            siteconf::Config::from_cwd(cwd)?
        };

        if !self.no_env {
            config = config.with_process_env()?;
        }

        if let Some(destination) = self.destination.as_deref() {
            config.output_path = siteconf::config::RelPath::try_from(destination)
                .context("Invalid destination")?;
        }

        Ok(config)
    }

    pub(crate) fn load_site(&self) -> Result<siteconf::SiteConfig> {
        let config = self.load_config()?;
        siteconf::SiteConfig::from_config(config)
    }
}

pub(crate) fn init_logging(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);

    let write_style = match colorchoice::ColorChoice::global() {
        colorchoice::ColorChoice::Never => env_logger::WriteStyle::Never,
        colorchoice::ColorChoice::Always | colorchoice::ColorChoice::AlwaysAnsi => {
            env_logger::WriteStyle::Always
        }
        colorchoice::ColorChoice::Auto => env_logger::WriteStyle::Auto,
    };
    builder.write_style(write_style);

    builder.format(|f, record| {
        let style = level_style(record.level());
        let level = format!("[{}]", record.level()).to_lowercase();
        writeln!(f, "{style}{level:8}{style:#} {}", record.args())
    });

    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug => anstyle::AnsiColor::Blue.on_default(),
        log::Level::Trace => anstyle::AnsiColor::Cyan.on_default().dimmed(),
    }
}
