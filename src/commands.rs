use crate::cli::{CheckArgs, InitArgs, ResolveArgs, ScanArgs};
use crate::output::{print_scan_results, verdict_text};
use autodeploy::config::{
    config_dir, discover_config, render_config, Config, DEFAULT_CONFIG_NAME,
};
use autodeploy::scan::scan_directory;
use autodeploy::{DeployError, DeployableUnit, Result, WebAppProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Execute the `autodeploy init` command
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let config_path = match args.config {
        Some(p) => p,
        None => std::env::current_dir()
            .map_err(|e| DeployError::io(e, "Failed to get current directory"))?
            .join(DEFAULT_CONFIG_NAME),
    };

    if config_path.exists() {
        return Err(DeployError::ConfigAlreadyExists { path: config_path });
    }

    let content = render_config(&Config::default())?;

    fs::write(&config_path, &content).map_err(|e| {
        DeployError::io(e, format!("Failed to write config to {:?}", config_path))
    })?;

    println!("Created config at {:?}", config_path);
    info!("Created config at {:?}", config_path);

    Ok(())
}

/// Load the config if one can be found. A missing config is only an error
/// when the caller asked for a specific file.
fn load_optional_config(override_path: Option<&Path>) -> Result<Option<(Config, PathBuf)>> {
    match discover_config(override_path) {
        Ok(found) => Ok(Some(found)),
        Err(DeployError::ConfigNotFound) if override_path.is_none() => {
            debug!("No config found, using defaults");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Execute the `autodeploy scan` command
pub fn cmd_scan(args: ScanArgs) -> Result<()> {
    let loaded = if args.config.is_none() && args.dir.is_some() {
        load_optional_config(None)?
    } else {
        Some(discover_config(args.config.as_deref())?)
    };

    let (provider, monitored_dir) = match loaded {
        Some((config, path)) => {
            let base = config_dir(&path);
            let provider = WebAppProvider::from_config(&config, &base);
            (provider, config.monitored_dir(&base))
        }
        None => (WebAppProvider::new(), PathBuf::new()),
    };

    let dir = args.dir.unwrap_or(monitored_dir);

    if let Some(ref contexts) = args.contexts {
        provider.set_context_descriptor_dir(contexts);
    }

    debug!(
        "Context descriptor dir: {:?}, scan interval: {}s",
        provider.context_descriptor_dir(),
        provider.scan_interval()
    );

    let results = scan_directory(&provider, &dir)?;
    print_scan_results(&results, &dir);

    Ok(())
}

/// Execute the `autodeploy check` command
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let provider = WebAppProvider::new();
    if let Some(ref contexts) = args.contexts {
        provider.set_context_descriptor_dir(contexts);
    }

    let verdict = provider.evaluate(&args.dir, &args.name);
    println!("{}: {}", args.name, verdict_text(&verdict));

    Ok(())
}

/// Execute the `autodeploy resolve` command
pub fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    let provider = match load_optional_config(args.config.as_deref())? {
        Some((config, path)) => WebAppProvider::from_config(&config, &config_dir(&path)),
        None => WebAppProvider::new(),
    };

    if args.extract {
        provider.set_extract_archives(true);
    }
    if args.parent_first {
        provider.set_parent_loader_priority(true);
    }
    if args.defaults.is_some() {
        provider.set_defaults_descriptor(args.defaults);
    }

    let descriptor = provider
        .resolve(&DeployableUnit::new(&args.path))
        .inspect_err(|e| warn!("Failed to resolve {:?} ({})", args.path, e.kind()))?;

    let rendered =
        serde_yaml::to_string(&descriptor).map_err(|e| DeployError::SerializeError {
            message: format!("Failed to serialize descriptor: {}", e),
        })?;
    print!("{}", rendered);

    Ok(())
}
