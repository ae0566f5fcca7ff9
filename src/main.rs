use anyhow::{Context, Result};
use depresolver::config::{DependencyResolver, LogConfig, MapSource};
use depresolver::{logging, utils};
use log::{error, info};
use std::process;

fn main() {
    if let Err(e) = run() {
        // the logger may not be up yet if resolution itself failed
        if log::log_enabled!(log::Level::Error) {
            error!("{:#}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Settings come from a YAML file when one is given, otherwise from the environment
    let resolved = match std::env::args().nth(1) {
        Some(path) => {
            DependencyResolver::new(MapSource::from_yaml_file(&path)?).resolve_operator_config()
        }
        None => depresolver::resolve(),
    };

    let config = match resolved {
        Ok(config) => config,
        Err(e) => {
            if let Err(init_err) = logging::init(&LogConfig::default()) {
                eprintln!("{:#}", init_err);
            }
            return Err(e).context("Invalid operator configuration");
        }
    };
    logging::init(&config.log)?;

    info!("Cluster NS name: {}", config.cluster_ns_name());
    for (geo_tag, ns_name) in config.external_cluster_ns_names() {
        info!("External cluster {} NS name: {}", geo_tag, ns_name);
    }
    println!("{}", utils::to_string(&*config));
    Ok(())
}
