#![forbid(unsafe_code)]

mod applier;
mod constants;
mod document;
mod error;
mod host;
mod profile;
mod store;
mod transfer;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, debug};
use tracing_subscriber::FmtSubscriber;

use applier::ProxyApplier;
use host::FileHostBoundary;
use profile::SocksProfile;
use store::ProfileStore;
use store::preferences::FilePreferences;
use transfer::MergePolicy;

#[derive(Parser)]
#[command(name = "quicksocks", version, about = "SOCKS proxy profile manager")]
struct Cli {
    /// Settings-import file the host reads proxy configuration from
    #[arg(long, global = true)]
    target: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all profiles
    List,
    /// Show the active profile and proxy state
    Show,
    /// Add a new profile
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Route DNS queries through the SOCKS proxy
        #[arg(long)]
        dns_over_socks: bool,
    },
    /// Edit fields of an existing profile
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        dns_over_socks: Option<bool>,
    },
    /// Remove a profile (the last one cannot be removed)
    Remove { id: String },
    /// Duplicate a profile under "<name> (Copy)"
    Duplicate { id: String },
    /// Set the active profile
    Use { id: String },
    /// Enable the proxy and apply the active profile
    On,
    /// Disable the proxy
    Off,
    /// Re-apply the active profile with the current enabled state
    Apply,
    /// Export all profiles to a JSON file
    Export { file: PathBuf },
    /// Import profiles from a JSON file
    Import {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "merge")]
        mode: ImportMode,
        /// Assign fresh ids to imported profiles instead of taking ids
        /// verbatim
        #[arg(long)]
        fresh_ids: bool,
    },
    /// Print the host's current configuration snapshot
    Snapshot,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImportMode {
    /// Discard existing profiles and adopt the imported list
    Replace,
    /// Append imported profiles to the existing list
    Merge,
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let prefs = FilePreferences::open(&FilePreferences::default_path());
    let mut store = ProfileStore::new(Box::new(prefs));
    store.add_change_listener(Box::new(|| debug!("profile store changed")));

    let target = cli.target.unwrap_or_else(FileHostBoundary::default_path);
    let applier = ProxyApplier::new(Box::new(FileHostBoundary::new(&target)));

    match cli.command {
        Command::List => {
            let active_id = store.active_profile_id().to_string();
            for profile in store.profiles() {
                let marker = if profile.id() == active_id { "*" } else { " " };
                println!("{} {}  {}", marker, profile.id(), describe(&profile));
            }
        }
        Command::Show => {
            let profile = store
                .get_active()
                .context("no active profile")?;
            println!("active: {}", describe(profile));
            println!(
                "proxy:  {}",
                if store.is_enabled() { "enabled" } else { "disabled" }
            );
        }
        Command::Add {
            name,
            host,
            port,
            username,
            password,
            dns_over_socks,
        } => {
            let profile = SocksProfile::with_details(
                None,
                &name,
                &host,
                port,
                &username,
                &password,
                dns_over_socks,
            )?;
            println!("added {}  {}", profile.id(), describe(&profile));
            store.add(profile);
            store.save()?;
        }
        Command::Edit {
            id,
            name,
            host,
            port,
            username,
            password,
            dns_over_socks,
        } => {
            let mut profile = store
                .get_by_id(&id)
                .with_context(|| format!("no profile with id {id}"))?
                .clone();
            if let Some(name) = name {
                profile.set_name(&name)?;
            }
            if let Some(host) = host {
                profile.set_host(&host)?;
            }
            if let Some(port) = port {
                profile.set_port(port)?;
            }
            if let Some(username) = username {
                profile.set_username(&username);
            }
            if let Some(password) = password {
                profile.set_password(&password);
            }
            if let Some(dns) = dns_over_socks {
                profile.set_dns_over_socks(dns);
            }
            println!("updated {}  {}", profile.id(), describe(&profile));
            store.update(profile);
            store.save()?;
        }
        Command::Remove { id } => {
            if store.profiles().len() <= 1 {
                bail!("cannot remove the last remaining profile");
            }
            if store.get_by_id(&id).is_none() {
                bail!("no profile with id {id}");
            }
            store.delete(&id);
            store.save()?;
            println!("removed {id}");
        }
        Command::Duplicate { id } => {
            let source = store
                .get_by_id(&id)
                .with_context(|| format!("no profile with id {id}"))?
                .clone();
            let copy = store.duplicate(&source)?;
            store.save()?;
            println!("created {}  {}", copy.id(), describe(&copy));
        }
        Command::Use { id } => {
            if store.get_by_id(&id).is_none() {
                bail!("no profile with id {id}");
            }
            store.set_active(&id);
            store.save()?;
            let profile = store.get_active().context("no active profile")?;
            println!("active profile: {}", describe(profile));
        }
        Command::On => {
            store.set_enabled(true);
            store.save()?;
            let profile = store.get_active().context("no active profile")?;
            applier.apply(profile, true)?;
            println!("proxy enabled via {}", describe(profile));
        }
        Command::Off => {
            store.set_enabled(false);
            store.save()?;
            applier.disable();
            println!("proxy disabled");
        }
        Command::Apply => {
            let profile = store.get_active().context("no active profile")?;
            applier.apply(profile, store.is_enabled())?;
            println!(
                "applied {} ({})",
                describe(profile),
                if store.is_enabled() { "enabled" } else { "disabled" }
            );
        }
        Command::Export { file } => {
            let profiles = store.profiles();
            transfer::export_to_path(&file, &profiles)?;
            println!("exported {} profile(s) to {}", profiles.len(), file.display());
        }
        Command::Import {
            file,
            mode,
            fresh_ids,
        } => {
            let candidates = transfer::import_from_path(&file)?;
            if candidates.is_empty() {
                println!("no profiles found in {}", file.display());
                return Ok(());
            }
            let policy = match mode {
                ImportMode::Replace => MergePolicy::Replace,
                ImportMode::Merge => MergePolicy::Merge { fresh_ids },
            };
            let count = store.import(candidates, policy)?;
            println!("imported {count} profile(s) from {}", file.display());
        }
        Command::Snapshot => {
            println!("{}", applier.host_snapshot()?);
        }
    }

    Ok(())
}

fn describe(profile: &SocksProfile) -> String {
    let auth = if profile.has_authentication() {
        " [authenticated]"
    } else {
        ""
    };
    let dns = if profile.dns_over_socks() {
        " [dns-over-socks]"
    } else {
        ""
    };
    format!(
        "{} ({}:{}){}{}",
        profile.name(),
        profile.host(),
        profile.port(),
        auth,
        dns
    )
}
