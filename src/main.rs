use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lagen_codegen::Generator;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// lagen - single-header C vector library generator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the header
    Generate {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// lagen.toml selecting guards, sizes, types and operations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the type and function names the header declares
    Names {
        /// lagen.toml selecting guards, sizes, types and operations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for generated text
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Generate { output, config } => {
            let generator = load_generator(config.as_deref())?;
            generate_header(&generator, output.as_deref())?;
        }

        Commands::Names { config } => {
            let generator = load_generator(config.as_deref())?;
            list_names(&generator)?;
        }
    }

    Ok(())
}

/// Default generator, or the one described by a manifest
fn load_generator(config: Option<&Path>) -> Result<Generator> {
    let Some(path) = config else {
        return Ok(Generator::default());
    };

    info!("Using configuration {}", path.display());
    let manifest = lagen_manifest::from_path(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    manifest
        .to_generator()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Write the header to `output`, or stdout when no path is given
fn generate_header(generator: &Generator, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let report = write_atomically(path, |out| {
                generator
                    .generate(out)
                    .with_context(|| format!("Failed to write {}", path.display()))
            })?;
            info!(
                "Wrote {} ({} types, {} functions)",
                path.display(),
                report.type_definitions,
                report.definitions
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            generator
                .generate(&mut out)
                .context("Failed to write header to stdout")?;
        }
    }

    Ok(())
}

/// Write into a temporary file next to `path`, then move it over `path`
///
/// An existing file at `path` is left untouched unless `write` succeeds.
fn write_atomically<T>(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<&File>) -> Result<T>,
) -> Result<T> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;

    let value = {
        let mut out = BufWriter::new(file.as_file());
        let value = write(&mut out)?;
        out.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        value
    };

    // Temporary files are private; give the result the permissions a new or
    // replaced file would have had
    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    };
    if let Some(permissions) = permissions {
        fs::set_permissions(file.path(), permissions)?;
    }

    file.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(value)
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Print one `kind<TAB>name<TAB>type` line per public symbol
fn list_names(generator: &Generator) -> Result<()> {
    let symbols = generator.symbols()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for symbol in &symbols {
        writeln!(
            out,
            "{}\t{}\t{}",
            symbol.kind.as_str(),
            symbol.name,
            symbol.type_name
        )?;
    }
    out.flush()?;

    info!("{} symbols", symbols.len());
    Ok(())
}
