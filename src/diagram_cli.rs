//! generate / init / projects subcommands

use clap::Subcommand;
use diagram::{Error, Pipeline, ProjectGraph, RawConfig, ResolvedConfig, DEFAULT_CONFIG_FILE};
use msbuild::MsBuildProvider;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

#[derive(Subcommand)]
pub enum DiagramCommands {
    /// Generate the diagram described by a config file
    Generate {
        /// Config file (default: slnx-mermaid.yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Only write the diagram file, without printing it
        #[arg(short, long)]
        quiet: bool,
    },
    /// Write a starter config for a solution
    Init {
        /// Solution file (.sln or .slnx)
        solution: PathBuf,
        /// Config file to create (default: slnx-mermaid.yml next to the solution)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// List analyzed projects and their direct dependencies
    Projects {
        /// Config file (default: slnx-mermaid.yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(cmd: DiagramCommands) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let listener = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, cancelling");
                cancel.cancel();
            }
        })
    };

    let result = match cmd {
        DiagramCommands::Generate { config, quiet } => {
            cmd_generate(config.as_deref(), quiet, cancel).await
        }
        DiagramCommands::Init { solution, config, force } => {
            cmd_init(&solution, config.as_deref(), force).await
        }
        DiagramCommands::Projects { config, json } => {
            cmd_projects(config.as_deref(), json, cancel).await
        }
    };

    listener.abort();
    result
}

async fn cmd_generate(config: Option<&Path>, quiet: bool, cancel: CancellationToken) -> anyhow::Result<()> {
    let (config_path, config) = load_config(config)?;
    println!("Using config: {}", config_path.display());
    println!("Analyzing: {}", config.solution.display());

    let generated = tokio::task::spawn_blocking(move || {
        Pipeline::new(MsBuildProvider::new()).generate(&config, &cancel)
    })
    .await??;

    if !quiet {
        println!("\n{}\n", generated.rendering.markdown());
    }
    println!(
        "Discovered {} projects. Diagram written to: {}",
        generated.rendering.project_count(),
        generated.output.display()
    );

    Ok(())
}

async fn cmd_init(solution: &Path, config: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let solution = absolute(solution)?;
    if !solution.is_file() {
        return Err(Error::SolutionNotFound(solution).into());
    }

    let config_path = match config {
        Some(path) => absolute(path)?,
        None => solution
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_CONFIG_FILE),
    };
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let template = RawConfig::template_for(&solution);
    let yaml = template
        .to_yaml()
        .map_err(|reason| anyhow::anyhow!("Cannot serialize config: {}", reason))?;
    let content = format!("# Generated by slnx-mermaid init\n{}", yaml);

    if let Some(dir) = config_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&config_path, content).await?;
    println!("Config written to: {}", config_path.display());

    Ok(())
}

async fn cmd_projects(config: Option<&Path>, json: bool, cancel: CancellationToken) -> anyhow::Result<()> {
    let (_, config) = load_config(config)?;

    let graph = tokio::task::spawn_blocking(move || {
        Pipeline::new(MsBuildProvider::new()).analyze(&config, &cancel)
    })
    .await??;

    if json {
        #[derive(serde::Serialize)]
        struct ProjectItem {
            id: String,
            path: String,
            dependencies: Vec<String>,
        }

        let items: Vec<_> = graph.iter().map(|(_, node)| ProjectItem {
            id: node.id().to_string(),
            path: node.path().display().to_string(),
            dependencies: dependency_ids(&graph, node),
        }).collect();

        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("\n{} projects:\n", graph.len());
        for (_, node) in graph.iter() {
            println!("  {}", node.id());
            println!("    {}", node.path().display());
            for dep in dependency_ids(&graph, node) {
                println!("    -> {}", dep);
            }
            println!();
        }
    }

    Ok(())
}

/// Print a failure with a hint on how to fix it
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::ConfigNotFound(path)) => {
            eprintln!("Configuration file not found: {}", path.display());
            eprintln!(
                "Expected default file: {} (create one with `slnx-mermaid init <solution>`)",
                DEFAULT_CONFIG_FILE
            );
        }
        Some(Error::ConfigInvalid { path, reason }) => {
            eprintln!("Config file is invalid: {}", path.display());
            eprintln!("  {}", reason);
        }
        Some(Error::SolutionNotFound(path)) => {
            eprintln!("Solution file not found: {}", path.display());
            eprintln!("Check the `solution` entry of the config file.");
        }
        Some(Error::SolutionLoad(load)) => {
            eprintln!("Failed to load solution: {}", load);
            eprintln!("Offending file: {}", load.path().display());
        }
        Some(Error::OutputPathMissing) => {
            eprintln!("Diagram output path is missing in the configuration file.");
            eprintln!("Add an `output.file` entry for the generated Mermaid diagram.");
        }
        Some(Error::Cancelled) => eprintln!("Cancelled."),
        Some(other @ Error::Output { .. }) => eprintln!("{}", other),
        None => eprintln!("Error: {:#}", err),
    }
}

fn load_config(config: Option<&Path>) -> diagram::Result<(PathBuf, ResolvedConfig)> {
    let path = config.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let path = absolute(path).map_err(|_| Error::ConfigNotFound(path.to_path_buf()))?;
    if !path.is_file() {
        return Err(Error::ConfigNotFound(path));
    }

    let config = RawConfig::load(&path)?.resolve(&path)?.validate()?;
    tracing::debug!("Resolved config: {:?}", config);
    Ok((path, config))
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(msbuild::normalize(&cwd, &path.to_string_lossy()))
}

fn dependency_ids(graph: &ProjectGraph, node: &diagram::ProjectNode) -> Vec<String> {
    let mut ids: Vec<String> = node
        .dependencies()
        .filter_map(|dep| graph.node(dep))
        .map(|dep| dep.id().to_string())
        .collect();
    ids.sort();
    ids
}
