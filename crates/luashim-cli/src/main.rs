//! luashim command-line tool
//!
//! Reads a C++ header (through clang) or a pre-dumped JSON AST and prints the
//! C++ source that registers Lua bindings for the whitelisted declarations.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use env_logger::Env;
use std::path::PathBuf;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "luashim")]
#[command(about = "Lua binding generator for overloaded C++ APIs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// When to color diagnostics (auto, always, never)
    #[arg(long, global = true, value_name = "WHEN")]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings for a header
    Generate {
        /// Header to compile, or a JSON AST dump with --ast
        file: PathBuf,
        /// Config file (default: nearest luashim.toml, else the ImGui preset)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Treat FILE as a clang JSON AST dump
        #[arg(long)]
        ast: bool,
        /// Write the generated source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compiler executable
        #[arg(long)]
        compiler: Option<String>,
        /// Language standard passed to the compiler
        #[arg(long)]
        std: Option<String>,
        /// Diagnostic format
        #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
        format: String,
        /// Exit non-zero on warnings too
        #[arg(long)]
        deny_warnings: bool,
    },

    /// List the types the catalog can marshal
    Types {
        /// Config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let color = output::resolve_color_choice(cli.color.as_deref());

    match cli.command {
        Commands::Generate {
            file,
            config,
            ast,
            output,
            compiler,
            std,
            format,
            deny_warnings,
        } => commands::generate::execute(
            commands::generate::GenerateArgs {
                file,
                config,
                ast,
                output,
                compiler,
                std,
                format,
                deny_warnings,
            },
            color,
        ),
        Commands::Types { config } => commands::types::execute(config.as_deref()),
        Commands::Config { config } => commands::config::execute(config.as_deref()),
    }
}
