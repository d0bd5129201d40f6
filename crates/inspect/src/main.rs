use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use loader::{LoaderLimits, encode_module, encode_module_with_header, parse_module_with};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use types::Module;

mod view;

use view::ModuleView;

/// Inspect and convert Sedna module images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reject images with bytes after the last method
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode an image and print its contents
    Dump {
        image: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Re-encode an image, adding or stripping the SDNA header
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Write the raw layout without the magic/version header
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = Args::parse();
    let limits = if args.strict {
        LoaderLimits::strict()
    } else {
        LoaderLimits::default()
    };

    match args.command {
        Command::Dump { image, format } => {
            let module = load(&image, &limits)?;
            let view = ModuleView::from(&module);
            match format {
                Format::Text => print_module(&view),
                Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            }
        }
        Command::Convert { input, output, raw } => {
            let module = load(&input, &limits)?;
            let bytes = if raw {
                encode_module(&module)
            } else {
                encode_module_with_header(&module)
            };
            fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(bytes = bytes.len(), raw, "wrote {}", output.display());
        }
    }
    Ok(())
}

fn load(path: &Path, limits: &LoaderLimits) -> Result<Module> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(len = bytes.len(), "read {}", path.display());
    let module = parse_module_with(&bytes, limits)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(module)
}

fn print_module(view: &ModuleView) {
    println!("{} {}", "scope:".bold(), view.scope.cyan());

    println!("{} {}", "imports:".bold(), view.imports.len());
    for import in &view.imports {
        println!("  {}", import);
    }

    println!("{} {}", "types:".bold(), view.types.len());
    for t in &view.types {
        println!("  {} : {}", t.name.yellow(), t.base);
    }

    println!("{} {}", "methods:".bold(), view.methods.len());
    for m in &view.methods {
        println!("  {}({})", m.name.green(), m.params.join(", "));
        println!(
            "    ops: {}  bytecode: {} bytes  [{}]",
            m.op_count, m.bytecode_size, m.bytecode_preview
        );
    }
}
