//! viewkit CLI
//!
//! Usage:
//!   viewkit [OPTIONS] [MANIFEST]
//!
//! Options:
//!   -p, --pretty     Pretty-print the HTML output
//!   -m, --mount      Wrap the output in the instance's mount element
//!   -l, --list       List registered components, partials and transitions
//!   -v, --verbose    Log registrations and composition steps to stderr
//!   -h, --help       Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use viewkit::{Manifest, RenderConfig};

#[derive(Parser)]
#[command(name = "viewkit")]
#[command(about = "Compose component templates from an app manifest into HTML")]
struct Cli {
    /// Manifest file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Pretty-print the HTML output
    #[arg(short, long)]
    pretty: bool,

    /// Wrap the output in the instance's mount element
    #[arg(short, long)]
    mount: bool,

    /// List what the manifest registers instead of rendering
    #[arg(short, long)]
    list: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "viewkit=debug" } else { "viewkit=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let loaded = match &cli.input {
        Some(path) => Manifest::from_file(path).map_err(|e| format!("'{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => Manifest::from_str(&buffer).map_err(|e| e.to_string()),
                Err(e) => Err(format!("reading from stdin: {}", e)),
            }
        }
    };

    let manifest = match loaded {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading manifest {}", e);
            std::process::exit(1);
        }
    };

    if cli.list {
        print_listing(&manifest);
        return;
    }

    let config = RenderConfig::new()
        .with_pretty_print(cli.pretty)
        .with_wrap_mount(cli.mount);
    match manifest.mount().render_with_config(&config) {
        Ok(html) => {
            println!("{}", html);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_listing(manifest: &Manifest) {
    if let Some(name) = &manifest.name {
        println!("app: {}", name);
    }
    println!("mount: {}", manifest.instance.el);

    let registry = &manifest.registry;
    for name in registry.components().names() {
        let locals = registry
            .resolve(name)
            .map(|def| def.components.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        if locals.is_empty() {
            println!("component: {}", name);
        } else {
            println!("component: {} (local: {})", name, locals.join(", "));
        }
    }
    for name in manifest.instance.components.keys() {
        println!("instance component: {}", name);
    }
    for name in registry.partials().names() {
        println!("partial: {}", name);
    }
    for name in registry.transitions().names() {
        println!("transition: {}", name);
    }
}

const INTRO: &str = r##"viewkit - compose component templates into HTML

USAGE:
    viewkit [OPTIONS] [MANIFEST]
    cat app.toml | viewkit

OPTIONS:
    -p, --pretty     Pretty-print the HTML output
    -m, --mount      Wrap the output in the mount element
    -l, --list       List registered components, partials and transitions
    -v, --verbose    Log composition steps to stderr
    -h, --help       Print help

MANIFEST:
    [instance]
    el = "#app"
    template = "<my-component></my-component>"

    [components.my-component]
    template = "<div>{{ msg }}</div>"
    data = { msg = "A custom component!" }"##;

fn print_intro() {
    println!("{}", INTRO);
}
