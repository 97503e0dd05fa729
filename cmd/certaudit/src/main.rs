mod client;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Args, Parser, Subcommand, ValueEnum};
use pkg_audit::cluster::KubeClusterLister;
use pkg_audit::{AuditError, Auditor, TracingReporter};
use pkg_constants::kube::READ_TIMEOUT_SECS;
use pkg_constants::paths::DEFAULT_CONFIG;
use pkg_pki::CertEvaluator;
use pkg_release::{KubeReleaseStore, ReleaseToggler};
use pkg_types::config::{AuditConfig, ConfigFile, ReleaseToggleConfig, load_config_file};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "certaudit",
    about = "Flag cluster TLS secrets whose certificates were issued for too short a window"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG)]
    config: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit certificates in every secret of every namespace (default)
    ///
    /// Ctrl-C stops the audit between entries. A list call already in flight
    /// is not cancelled and may take up to the 30s read timeout to return.
    Audit(AuditArgs),
    /// Set and immediately clear an annotation on every release outside system namespaces
    TouchReleases(ReleaseArgs),
}

#[derive(Args, Default)]
struct AuditArgs {
    /// Path to the kubeconfig (defaults to the kube client's lookup chain)
    #[arg(long, alias = "kubeConfig")]
    kubeconfig: Option<String>,

    /// Minimum acceptable validity window, in days [default: 365]
    #[arg(long, alias = "day")]
    min_validity_days: Option<f64>,
}

#[derive(Args)]
struct ReleaseArgs {
    /// Path to the kubeconfig (defaults to the kube client's lookup chain)
    #[arg(long, alias = "kubeConfig")]
    kubeconfig: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    // Load config file (returns defaults if file not found)
    let file_cfg: ConfigFile = load_config_file(&cli.config)?;
    info!("Config file: {}", cli.config);

    match cli.command {
        Some(Commands::TouchReleases(args)) => touch_releases(args, &file_cfg).await,
        Some(Commands::Audit(args)) => audit(args, &file_cfg).await,
        None => audit(AuditArgs::default(), &file_cfg).await,
    }
}

async fn audit(args: AuditArgs, file_cfg: &ConfigFile) -> anyhow::Result<()> {
    // Merge: CLI args > config file > defaults
    let config = AuditConfig::from_sources(args.kubeconfig, args.min_validity_days, &file_cfg.audit)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))?;
    info!(
        "Ctrl-C stops the audit between entries; an in-flight list call can take up to {}s",
        READ_TIMEOUT_SECS
    );

    let client = client::create_client(config.kubeconfig()).await?;
    let lister = KubeClusterLister::new(client);
    let auditor = Auditor::new(CertEvaluator::new(&config), TracingReporter);

    match auditor.run(&lister, &lister, &stop).await {
        Ok(()) => Ok(()),
        Err(AuditError::Interrupted) => {
            warn!("Audit interrupted");
            std::process::exit(130);
        }
        Err(e) => Err(e.into()),
    }
}

async fn touch_releases(args: ReleaseArgs, file_cfg: &ConfigFile) -> anyhow::Result<()> {
    let config = ReleaseToggleConfig::from_sources(args.kubeconfig, &file_cfg.release)?;
    info!(
        "Touching {}/{} {} releases with annotation {}",
        config.group, config.version, config.kind, config.annotation
    );

    let client = client::create_client(config.kubeconfig.as_deref()).await?;
    let toggler = ReleaseToggler::new(KubeReleaseStore::new(client, &config), &config);
    let toggled = toggler.run().await?;

    info!("Toggled {} releases", toggled);
    Ok(())
}
