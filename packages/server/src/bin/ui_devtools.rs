/**
 * ui-devtools - development host for the component meta service
 *
 * Scans the component sources for devtools override blocks, then serves
 * the merged catalog and example sources to the inspector panel.
 */
use clap::{Arg, ArgAction, Command};
use glob::glob;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui_devtools_meta::{apply_transform, MetaStore, DEFAULT_PREFIX};
use ui_devtools_server::{DevtoolsServer, FileIntrospectionSource, ServerConfig};

/// Poll interval for watch mode.
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let matches = Command::new("ui-devtools")
        .version(env!("CARGO_PKG_VERSION"))
        .about("UI devtools component meta service")
        .arg(
            Arg::new("components")
                .long("components")
                .value_name("DIR")
                .required(true)
                .help("Component source root, scanned for devtools override blocks"),
        )
        .arg(
            Arg::new("component-meta")
                .long("component-meta")
                .value_name("FILE")
                .required(true)
                .help("Introspection catalog JSON, re-read on every request"),
        )
        .arg(
            Arg::new("examples")
                .long("examples")
                .value_name("DIR")
                .required(true)
                .help("Directory holding <Component>.vue example sources"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .default_value("42124")
                .help("Port to listen on"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("PREFIX")
                .default_value(DEFAULT_PREFIX)
                .help("Component-name prefix for the library's own components"),
        )
        .arg(
            Arg::new("watch")
                .long("watch")
                .action(ArgAction::SetTrue)
                .help("Re-process components when their files change"),
        )
        .get_matches();

    let components_dir = PathBuf::from(matches.get_one::<String>("components").unwrap());
    let meta_path = PathBuf::from(matches.get_one::<String>("component-meta").unwrap());
    let examples_dir = PathBuf::from(matches.get_one::<String>("examples").unwrap());
    let prefix = matches.get_one::<String>("prefix").unwrap().clone();
    let port: u16 = match matches.get_one::<String>("port").unwrap().parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("Error: invalid port");
            process::exit(1);
        }
    };

    let store = MetaStore::new();
    let mtimes = match scan_components(&store, &components_dir) {
        Ok(mtimes) => mtimes,
        Err(errors) => {
            for e in errors {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    };
    info!(
        "processed {} component units, {} with devtools meta",
        mtimes.len(),
        store.len()
    );

    if matches.get_flag("watch") {
        let store = store.clone();
        let dir = components_dir.clone();
        tokio::spawn(async move {
            watch_components(store, dir, mtimes).await;
        });
    }

    let config = ServerConfig {
        addr: SocketAddr::from(([127, 0, 0, 1], port)),
        examples_dir,
        prefix,
    };
    let introspection = Box::new(FileIntrospectionSource::new(meta_path));
    let server = DevtoolsServer::new(config, store, introspection);

    if let Err(e) = server.start().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Feed every component unit under `dir` through the transform once.
///
/// Authoring errors are collected so every offending unit is reported in
/// one pass; any error is fatal for the initial build.
fn scan_components(
    store: &MetaStore,
    dir: &Path,
) -> Result<HashMap<PathBuf, SystemTime>, Vec<String>> {
    let pattern = format!("{}/**/*.vue", dir.display());
    let mut mtimes = HashMap::new();
    let mut errors = Vec::new();

    let paths = match glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => return Err(vec![e.to_string()]),
    };

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping unreadable path: {}", e);
                continue;
            }
        };
        match process_unit(store, &path) {
            Ok(mtime) => {
                mtimes.insert(path, mtime);
            }
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(mtimes)
    } else {
        Err(errors)
    }
}

fn process_unit(store: &MetaStore, path: &Path) -> Result<SystemTime, String> {
    let source =
        std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let id = path.to_string_lossy().replace('\\', "/");
    apply_transform(store, &source, &id).map_err(|e| e.to_string())?;
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Mtime-polling watch loop. Re-processing a changed unit overwrites its
/// slug in the store; a unit that becomes malformed mid-session is reported
/// loudly but keeps the last good entry and the server alive.
async fn watch_components(
    store: MetaStore,
    dir: PathBuf,
    mut mtimes: HashMap<PathBuf, SystemTime>,
) {
    let pattern = format!("{}/**/*.vue", dir.display());
    let mut interval = tokio::time::interval(WATCH_POLL_INTERVAL);

    loop {
        interval.tick().await;

        let Ok(paths) = glob(&pattern) else { continue };
        for path in paths.flatten() {
            let Ok(modified) = std::fs::metadata(&path).and_then(|meta| meta.modified()) else {
                continue;
            };
            let changed = mtimes.get(&path) != Some(&modified);
            if !changed {
                continue;
            }
            match process_unit(&store, &path) {
                Ok(mtime) => {
                    info!("reprocessed {}", path.display());
                    mtimes.insert(path, mtime);
                }
                Err(e) => {
                    error!("{}", e);
                    mtimes.insert(path, modified);
                }
            }
        }
    }
}
