//! vimplug compiler CLI

use std::path::PathBuf;
use std::process;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use vimplug_compiler::{CompileOptions, Compiler};

#[derive(Parser, Debug)]
#[command(name = "vimplugc")]
#[command(about = "Vim setup generator - turns a JSON plugin list into a vim-plug vimrc and hotkey map")]
#[command(version)]
struct Args {
    /// JSON plugin list
    #[arg(value_name = "PLUGINS_JSON")]
    input: Option<PathBuf>,

    /// Output directory where vim scripts will be generated
    #[arg(short = 'd', long, visible_short_alias = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print the generated files instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let Some(output_dir) = args.output else {
        println!("Specify output directory where vim scripts will be generated!");
        println!("{}", Args::command().render_usage());
        return Ok(());
    };
    let Some(input) = args.input else {
        bail!("no plugin list given (usage: {})", Args::command().render_usage());
    };

    let options = CompileOptions::new(input).output_dir(output_dir.clone());
    let compiler = Compiler::new(options);

    let output = compiler.compile().context("compilation failed")?;

    if args.dry_run {
        let layout = compiler.layout();
        println!("=== {} ===", layout.startup_script_path.display());
        print!("{}", output.startup_script);
        println!("\n=== {} ===", layout.hotkey_map_path.display());
        print!("{}", output.hotkey_map);
        return Ok(());
    }

    let written = compiler
        .layout()
        .write(&output)
        .context("failed to write output files")?;

    if args.verbose {
        println!("Wrote: {}", written.startup_script.display());
        println!("Wrote: {}", written.hotkey_map.display());
    }

    println!(
        "Generated vim configuration for {} plugins in {}",
        output.plugin_count,
        output_dir.display()
    );
    print!("{}", compiler.layout().describe());

    Ok(())
}
