//! Roledeck role assignment console.

#![forbid(unsafe_code)]

mod presenter;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use roledeck_application::{ReconciliationService, RoleMembershipGateway};
use roledeck_core::{ConsoleError, ConsoleResult};
use roledeck_domain::{Role, RoleId, SubjectEmail};
use roledeck_infrastructure::{HttpRoleMembershipGateway, InMemoryRoleDirectory};

use presenter::TerminalPresenter;

/// Subjects pre-registered when the in-memory provider is selected.
const DEMO_SUBJECTS: &[(&str, &str)] = &[
    ("avery.chen@example.com", "Avery Chen"),
    ("blake.reyes@example.com", "Blake Reyes"),
    ("devon.ko@example.com", "Devon Ko"),
];

/// Role assignment console for a remote role directory.
#[derive(Parser)]
#[command(name = "roledeck", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a subject's assigned and assignable roles.
    Lookup {
        /// Subject email address.
        email: String,
    },
    /// Grant one or more roles to a subject, then refresh.
    Assign {
        /// Subject email address.
        email: String,
        /// Role identifiers to grant.
        role_ids: Vec<String>,
    },
    /// Revoke one or more roles from a subject, then refresh.
    Remove {
        /// Subject email address.
        email: String,
        /// Role identifiers to revoke.
        role_ids: Vec<String>,
    },
    /// List every role the directory can grant.
    Catalog,
    /// List all subject-role bindings across the directory.
    Overview,
}

#[derive(Debug, Clone)]
struct ConsoleConfig {
    base_url: String,
    request_timeout_secs: u64,
    directory_provider: String,
}

impl ConsoleConfig {
    fn load() -> ConsoleResult<Self> {
        let base_url = env::var("ROLE_SERVICE_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        reqwest::Url::parse(&base_url).map_err(|error| {
            ConsoleError::Validation(format!(
                "invalid ROLE_SERVICE_BASE_URL '{base_url}': {error}"
            ))
        })?;

        let request_timeout_secs = parse_env_u64("ROLE_SERVICE_TIMEOUT_SECS", 15)?;
        if request_timeout_secs == 0 {
            return Err(ConsoleError::Validation(
                "ROLE_SERVICE_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let directory_provider =
            env::var("ROLE_DIRECTORY_PROVIDER").unwrap_or_else(|_| "http".to_owned());

        Ok(Self {
            base_url,
            request_timeout_secs,
            directory_provider,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        provider = %config.directory_provider,
        base_url = %config.base_url,
        timeout_secs = config.request_timeout_secs,
        "roledeck console started"
    );

    let gateway = match build_gateway(&config).await {
        Ok(gateway) => gateway,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };
    let service = ReconciliationService::new(gateway, Arc::new(TerminalPresenter::new()));

    match run_command(&service, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        // The presenter has already reported the failure.
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run_command(service: &ReconciliationService, command: Commands) -> ConsoleResult<()> {
    match command {
        Commands::Lookup { email } => service.lookup(&email).await.map(|_| ()),
        Commands::Assign { email, role_ids } => service.assign(&email, role_ids).await.map(|_| ()),
        Commands::Remove { email, role_ids } => service.remove(&email, role_ids).await.map(|_| ()),
        Commands::Catalog => service.catalog().await.map(|_| ()),
        Commands::Overview => service.memberships().await.map(|_| ()),
    }
}

async fn build_gateway(config: &ConsoleConfig) -> ConsoleResult<Arc<dyn RoleMembershipGateway>> {
    match config.directory_provider.as_str() {
        "http" => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .map_err(|error| {
                    ConsoleError::Transport(format!("failed to build HTTP client: {error}"))
                })?;

            Ok(Arc::new(HttpRoleMembershipGateway::new(
                http_client,
                config.base_url.clone(),
            )))
        }
        "memory" => Ok(Arc::new(build_demo_directory().await?)),
        other => Err(ConsoleError::Validation(format!(
            "ROLE_DIRECTORY_PROVIDER must be either 'http' or 'memory', got '{other}'"
        ))),
    }
}

/// Local directory with a small catalog so the console works offline.
async fn build_demo_directory() -> ConsoleResult<InMemoryRoleDirectory> {
    let catalog = vec![
        Role::new(RoleId::new("role-reader")?, "Reader"),
        Role::new(RoleId::new("role-editor")?, "Editor"),
        Role::new(RoleId::new("role-approver")?, "Approver"),
        Role::new(RoleId::new("role-admin")?, "Administrator"),
    ];
    let directory = InMemoryRoleDirectory::with_catalog(catalog);

    for (email, display_name) in DEMO_SUBJECTS {
        let subject = SubjectEmail::new(*email)?;
        directory.register_subject(&subject, display_name).await;
    }

    Ok(directory)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_env_u64(name: &str, default: u64) -> ConsoleResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            ConsoleError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
