//! `modeprompt`: generate and inspect mode-aware system prompts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modeprompt::prelude::*;
use modeprompt::prompt::ensure_config_dir;
use modeprompt_cli::{CliConfig, CliError, PromptOptions, locale_from_lang};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Generate and inspect mode-aware system prompts.
#[derive(Parser)]
#[command(name = "modeprompt")]
struct Cli {
    /// Project working directory.
    #[arg(long, default_value = ".", global = true)]
    cwd: PathBuf,

    /// Installed package root containing dist/prompts.
    #[arg(long, default_value = ".", global = true)]
    package_root: PathBuf,

    /// Global configuration directory (default: ~/.roo).
    #[arg(long, global = true)]
    global_dir: Option<PathBuf>,

    /// Ignore the global configuration directory.
    #[arg(long, global = true)]
    no_global: bool,

    /// JSON file with custom modes: {"customModes": [...]}.
    #[arg(long, global = true)]
    custom_modes: Option<PathBuf>,

    /// JSON file with an MCP server snapshot: {"servers": [...]}.
    #[arg(long, global = true)]
    mcp_servers: Option<PathBuf>,

    /// JSON file with per-mode prompt overrides: {"<slug>": {...}}.
    #[arg(long, global = true)]
    mode_prompts: Option<PathBuf>,

    /// JSON file with extraction phrase tables.
    #[arg(long, global = true)]
    patterns: Option<PathBuf>,

    /// Log resolution decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the system prompt for a mode.
    Prompt {
        /// Mode slug.
        #[arg(default_value = DEFAULT_MODE_SLUG)]
        mode: String,

        /// Enable diff-based editing (apply_diff).
        #[arg(long)]
        diff: bool,

        /// The host can drive a browser.
        #[arg(long)]
        computer_use: bool,

        /// Browser viewport, e.g. 900x600.
        #[arg(long)]
        viewport: Option<String>,

        /// Include guidance on creating MCP servers.
        #[arg(long)]
        mcp_server_creation: bool,

        /// Response language, e.g. ru or pt-BR. Defaults to the locale.
        #[arg(long)]
        language: Option<String>,

        /// Host locale (default: from LANG).
        #[arg(long)]
        locale: Option<String>,

        /// Instructions applied to every mode.
        #[arg(long)]
        global_instructions: Option<String>,

        /// Text describing files the assistant must not access.
        #[arg(long)]
        ignore_instructions: Option<String>,
    },

    /// Print the resolved role, description and usage of a mode as JSON.
    Info {
        /// Mode slug.
        mode: String,
    },

    /// List available modes.
    Modes {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Create the project configuration directory.
    Init,

    /// Copy packaged rules-* directories into the project configuration directory.
    ExportRules,

    /// Copy the packaged prompts tree into <cwd>/prompts.
    ExportInstructions,
}

#[derive(Serialize)]
struct ModeListing<'a> {
    slug: &'a str,
    name: &'a str,
    origin: ModeOrigin,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("modeprompt=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = CliConfig {
        cwd: std::fs::canonicalize(&cli.cwd).unwrap_or_else(|_| cli.cwd.clone()),
        package_root: cli.package_root,
        global_config_dir: cli.global_dir,
        no_global: cli.no_global,
        custom_modes_path: cli.custom_modes,
        mcp_servers_path: cli.mcp_servers,
        mode_prompts_path: cli.mode_prompts,
        patterns_path: cli.patterns,
    };

    if let Err(e) = run(&config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &CliConfig, command: Command) -> Result<(), CliError> {
    let ctx = config.build_context()?;
    debug!(
        cwd = %config.cwd.display(),
        assets = %ctx.assets_dir().display(),
        "host paths resolved"
    );

    match command {
        Command::Prompt {
            mode,
            diff,
            computer_use,
            viewport,
            mcp_server_creation,
            language,
            locale,
            global_instructions,
            ignore_instructions,
        } => {
            let options = PromptOptions {
                diff_enabled: diff,
                computer_use,
                browser_viewport_size: viewport,
                mcp_server_creation,
                language,
                locale: locale.or_else(|| {
                    std::env::var("LANG")
                        .ok()
                        .and_then(|lang| locale_from_lang(&lang))
                }),
                global_instructions,
                ignore_instructions,
                shell: std::env::var("SHELL").ok(),
            };
            let request = config.build_request(&mode, &options)?;
            let prompt = system_prompt(Some(&ctx), &request).await?;
            println!("{prompt}");
        }
        Command::Info { mode } => {
            let catalog = config.load_catalog()?;
            let options = ModeInfoOptions {
                cwd: Some(&config.cwd),
                custom_modes: Some(catalog.custom_modes()),
                builtin_mode: catalog.builtin_mode(&mode),
            };
            let info = load_mode_info(&ctx, &mode, options).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&info).unwrap_or_else(|_| "{}".to_string())
            );
        }
        Command::Modes { json } => {
            let catalog = config.load_catalog()?;
            let listings: Vec<ModeListing<'_>> = catalog
                .all_modes()
                .into_iter()
                .map(|m| ModeListing {
                    slug: &m.slug,
                    name: &m.name,
                    origin: m.origin,
                })
                .collect();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&listings).unwrap_or_else(|_| "[]".to_string())
                );
            } else {
                for listing in &listings {
                    let origin = match listing.origin {
                        ModeOrigin::BuiltIn => "built-in",
                        ModeOrigin::Custom => "custom",
                    };
                    println!("{:<12} {:<10} {}", listing.slug, origin, listing.name);
                }
            }
        }
        Command::Init => {
            let dir = ensure_config_dir(&ctx, &config.cwd).await?;
            println!("{}", dir.display());
        }
        Command::ExportRules => {
            for name in export_builtin_rules(&ctx, &config.cwd).await? {
                println!("{name}");
            }
        }
        Command::ExportInstructions => {
            let dir = export_role_instructions(&ctx, &config.cwd).await?;
            println!("{}", dir.display());
        }
    }
    Ok(())
}
