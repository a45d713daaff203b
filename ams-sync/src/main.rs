//! Main entry point for the ams-sync binary
//!
//! Wires the file-backed registry and AMS session into the orchestrator
//! and runs a single reconciliation cycle. Meant to be run from cron.

use clap::{ArgAction, Parser};

use ams_sync::{
    services::{FilePortal, FileRegistry, Outbox, RegistryMail},
    LocalRegistry, Orchestrator, PortalOptions, RunMode, SyncConfig, SyncResult,
};
use shared::{logging, run_info, RunId};

/// Reconcile the chapter registry with the ISOC.ORG AMS
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "ams-sync")]
#[command(disable_help_flag = true)]
pub struct Args {
    /// Dry run: compute and report actions without applying them
    #[arg(short = 'd', long = "dry", action = ArgAction::SetTrue)]
    pub dry: bool,

    /// Don't run headless: show the AMS session
    #[arg(short = 'h', long = "head", action = ArgAction::SetTrue)]
    pub head: bool,
}

/// Accepted arguments, matched exactly so clustered flags like `-dh` are rejected
const FLAGS: [&str; 4] = ["-d", "--dry", "-h", "--head"];

fn usage(program: &str) -> String {
    format!(
        "usage: {program} [-d | --dry] [-h | --head]\n       \
         -d | --dry   dry run\n       \
         -h | --head  don't run headless"
    )
}

/// Parse the command line, `None` when usage should be printed instead
fn parse_args(argv: &[String]) -> Option<Args> {
    if argv.iter().skip(1).any(|arg| !FLAGS.contains(&arg.as_str())) {
        return None;
    }
    Args::try_parse_from(argv).ok()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> SyncResult<()> {
    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let Some(args) = parse_args(&argv) else {
        let program = argv.first().map(String::as_str).unwrap_or("ams-sync");
        println!("{}", usage(program));
        return Ok(());
    };

    let config = SyncConfig::from_env()?;
    let _log_guard =
        logging::init_tracing_with_log_dir(config.log_dir.as_deref(), Some(config.log_level.as_str()))?;

    let run_id = RunId::init();
    logging::log_startup(
        run_id,
        if args.dry { "AMS sync (dry run)" } else { "AMS sync" },
    );

    let registry = FileRegistry::open(
        config.registry_path.clone(),
        config.credentials.clone(),
        RegistryMail {
            from: config.mail_from.clone(),
            ams_support: config.ams_support.clone(),
        },
        Outbox::new(config.outbox_dir.clone()),
    )
    .await?;

    let options = PortalOptions {
        headless: !args.head,
        dry_run: args.dry,
    };
    let portal = FilePortal::connect(
        config.snapshot_path.clone(),
        &registry.credentials(),
        options,
        config.settle_delay,
    )
    .await?;

    let orchestrator = Orchestrator::new(registry, portal);
    let outcome = match orchestrator.run_cycle(RunMode::from_dry_run(args.dry)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            logging::log_error(run_id, "Reconciliation", &e);
            return Err(e);
        }
    };

    if outcome.is_converged() {
        logging::log_success(run_id, "Cycle converged");
    } else {
        run_info!(run_id, "🏁 Cycle finished");
    }
    Ok(())
}
