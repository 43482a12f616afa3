use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use graft_build::{
    AppManifest, BundleIdentity, DevServer, Emitter, GraftConfig, tag_entry_scripts,
};
use graft_core::{RouteNode, namespace_routes};

#[derive(Parser)]
#[command(name = "graft", about = "GRAFT build tool — sub-application glue for host orchestrators")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the entry and context modules plus the emit report
    Emit {
        /// App directory containing Cargo.toml and an optional Graft.toml
        #[arg(long, default_value = ".")]
        app_dir: PathBuf,

        /// Output directory; defaults to <app-dir>/.graft
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Dev-server build; the server address is read from the environment
        #[arg(long)]
        dev: bool,
    },
    /// Namespace a route tree so the app also serves under /{namespace}
    Routes {
        /// JSON file holding the declared route list
        #[arg(long)]
        input: PathBuf,

        /// Namespace; defaults to the app config (or "default")
        #[arg(long)]
        namespace: Option<String>,

        /// App directory to read the namespace from when not given
        #[arg(long, default_value = ".")]
        app_dir: PathBuf,

        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the derived bundle identity
    Identity {
        #[arg(long, default_value = ".")]
        app_dir: PathBuf,

        /// Include dev-server source-map options
        #[arg(long)]
        dev: bool,
    },
    /// Tag entry <script> tags in an emitted HTML shell
    TagHtml {
        /// HTML file to process
        #[arg(long)]
        input: PathBuf,

        /// Entry stem; defaults to the app package name
        #[arg(long)]
        entry: Option<String>,

        #[arg(long, default_value = ".")]
        app_dir: PathBuf,

        /// Write here instead of rewriting the input in place
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they don't interfere with JSON output on stdout
    fmt()
        .with_env_filter(EnvFilter::from_env("GRAFT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Emit {
            app_dir,
            out_dir,
            dev,
        } => {
            let out_dir = out_dir.unwrap_or_else(|| app_dir.join(".graft"));
            let mut emitter = Emitter::new(&app_dir, &out_dir);
            if dev {
                emitter = emitter.with_dev_server(DevServer::from_env());
            }
            let report = emitter.run()?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Routes {
            input,
            namespace,
            app_dir,
            output,
        } => {
            let namespace = match namespace {
                Some(ns) => ns,
                None => GraftConfig::load_or_default(&app_dir)?.app.namespace,
            };
            let raw = std::fs::read_to_string(&input)?;
            let routes: Vec<RouteNode> = serde_json::from_str(&raw)?;
            let transformed = namespace_routes(&routes, &namespace);
            let rendered = serde_json::to_string_pretty(&transformed)?;
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
        }
        Command::Identity { app_dir, dev } => {
            let manifest = AppManifest::load(&app_dir)?;
            let config = GraftConfig::load_or_default(&app_dir)?;
            let dev_server = dev.then(DevServer::from_env);
            let identity = BundleIdentity::derive(&manifest, &config, dev_server.as_ref());
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Command::TagHtml {
            input,
            entry,
            app_dir,
            output,
        } => {
            let entry = match entry {
                Some(stem) => stem,
                None => AppManifest::load(&app_dir)?.name,
            };
            let html = std::fs::read_to_string(&input)?;
            let tagged = tag_entry_scripts(&html, &entry)?;
            match output {
                Some(path) => std::fs::write(path, tagged)?,
                None => std::fs::write(&input, tagged)?,
            }
        }
    }
    Ok(())
}
