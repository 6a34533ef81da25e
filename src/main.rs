//! Command line front end for the ATCF configuration files.
//!
//! # Execution Flow
//!
//! 1. Load tool settings from `atcf-config.yaml` (defaults when missing)
//! 2. Initialize logging → `<log_dir>/atcf-config.YYYY-MM-DD`
//! 3. Open the store root and create the [`AtcfConfigurationManager`]
//! 4. Run the subcommand and log a metrics summary

use anyhow::Result;
use atcf_config::config::SETTINGS_FILE;
use atcf_config::logging::setup_logging;
use atcf_config::{APP_NAME, AtcfConfigurationManager, ConfigKind, ToolSettings, VERSION};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Read, convert and export ATCF configuration files")]
struct Args {
    /// Tool settings file
    #[arg(short, long, default_value = SETTINGS_FILE)]
    settings: Utf8PathBuf,

    /// Directory holding `atcf/config`, overrides the settings file
    #[arg(short, long)]
    root: Option<Utf8PathBuf>,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every configuration file, converting legacy text to XML where needed
    LoadAll,
    /// Print a configuration file as XML
    Show { kind: ConfigKind },
    /// Re-parse a legacy file and overwrite its XML copy
    Convert { kind: ConfigKind },
    /// Write a configuration file back as legacy text
    ExportText { kind: ConfigKind },
    /// List objective aid profiles
    Profiles,
    /// Print the geography points of a basin
    Geography { basin: String },
    /// Print the ATCF environment from atcf.properties
    Env,
    /// Print the storm table
    StormTable,
}

fn run(mgr: &AtcfConfigurationManager, command: Command) -> Result<()> {
    match command {
        Command::LoadAll => mgr.load_configuration()?,
        Command::Show { kind } => print!("{}", kind.show(mgr)?),
        Command::Convert { kind } => {
            kind.convert(mgr)?;
            println!("Converted {}", kind.file_name());
        }
        Command::ExportText { kind } => {
            kind.export_text(mgr)?;
            println!("Exported {}", kind.file_name());
        }
        Command::Profiles => {
            for name in mgr.obj_aids_profile_names()? {
                let profile = mgr.site_obj_aids_profile(&name)?;
                println!("{:<16} {}", name, profile.names().join(" "));
            }
        }
        Command::Geography { basin } => {
            for point in mgr.basin_geo_points(&basin)?.points {
                println!("{:>6.1} {:>7.1} {}", point.lat, point.lon, point.name);
            }
        }
        Command::Env => {
            let env = mgr.env_config();
            println!("ATCFSITE            {}", env.atcf_site);
            println!("BACKUPSITE          {}", env.backup_site);
            println!("ATCFSTRMS           {}", env.atcfstrms);
            println!("ATCF_OUTGOING       {}", env.atcf_outgoing);
            println!("ATCF_RETRIEVED      {}", env.atcf_retrieved);
            println!("ATCFTMP             {}", env.atcftmp);
            println!("ATCF_ARCH           {}", env.atcf_arch);
            println!("WCOSS_TIMEOUT       {}", env.wcoss_timeout);
            println!("FIXDATAIN           {}", env.fix_data_in);
            println!("FIXDATAOUT          {}", env.fix_data_out);
            println!("AIDMESSAGESDIR      {}", env.aid_messages_dir);
            println!("ADVISORYPATH        {}", env.advisory_path);
            println!("ADVISORYARCHIVEPATH {}", env.advisory_archive_path);
        }
        Command::StormTable => {
            for line in mgr.load_storm_table()? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = ToolSettings::load(&args.settings)?;
    if let Some(root) = args.root {
        settings.store_root = root;
    }
    settings.debug |= args.debug;

    // Keep the guard alive for the whole run so buffered log lines are flushed
    let _guard = setup_logging(
        &settings.log_dir,
        settings.debug,
        settings.console_log,
        settings.json_log,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let mgr = AtcfConfigurationManager::open(&settings.store_root)?;
    let result = run(&mgr, args.command);

    mgr.metrics().log_summary();

    result.map_err(|e| {
        tracing::error!("Command failed: {:#}", e);
        e
    })
}
