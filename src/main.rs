mod cli;

use guideart::{
    config::{self, Config},
    fs::LocalFileSystem,
    images::DirectoryImageSink,
    live_tv::{LiveTvProgram, ServiceRegistry, UrlTemplateService},
    metadata::{MetadataProvider, ProgramImageProvider, ProviderInfo},
    net::{HttpClient, ReqwestHttpClient},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn build_provider(config: &Config) -> Result<ProgramImageProvider> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new(&config.http)?);

    let mut registry = ServiceRegistry::new();
    for service in config.services.iter().filter(|s| s.enabled) {
        tracing::debug!(service = %service.name, "Registering live TV service");
        registry.register(Arc::new(UrlTemplateService::new(
            service.name.clone(),
            service.url_template.clone(),
            http.clone(),
        )));
    }

    Ok(ProgramImageProvider::new(
        Arc::new(registry),
        Arc::new(LocalFileSystem),
        http,
        Arc::new(DirectoryImageSink::new(config.images.dir.clone())),
    ))
}

async fn resolve(program_path: &Path, force: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let content = std::fs::read_to_string(program_path)
        .with_context(|| format!("Failed to read program file: {:?}", program_path))?;
    let program: LiveTvProgram = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse program file: {:?}", program_path))?;

    let provider = build_provider(&config)?;

    if !provider.needs_refresh(&program) {
        tracing::info!(item_id = %program.id, "Program already has a primary image");
    }

    // Ctrl-C cancels the in-flight refresh
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let mut info = ProviderInfo::default();
    provider
        .fetch(&program, force, &mut info, &cancel)
        .await
        .with_context(|| format!("Failed to resolve image for program {}", program.name))?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "guideart=trace,guideart_common=debug,reqwest=debug".to_string()
        } else {
            "guideart=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Resolve { program, force } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve(&program, force, cli.config.as_deref()))
        }
        Commands::Validate { config: path } => {
            let path = path.or(cli.config);
            let config = config::load_config_or_default(path.as_deref())?;
            config::validate_config(&config)?;
            println!(
                "Configuration is valid ({} service(s) configured)",
                config.services.len()
            );
            Ok(())
        }
        Commands::Version => {
            println!("guideart {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
