use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use ulif::container::{self, DecodeMode};
use ulif::header::FormatVersion;
use ulif::{info, resize, source};
use walkdir::WalkDir;

/// Shared flag for commands that touch container files.
#[derive(clap::Args, Clone, Copy)]
struct FormatArgs {
    /// Read/write the legacy tagged header (12 bytes) instead of the stable
    /// 8-byte header
    #[arg(long)]
    legacy: bool,
}

impl FormatArgs {
    fn version(self) -> FormatVersion {
        if self.legacy {
            FormatVersion::Legacy
        } else {
            FormatVersion::Stable
        }
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "ulif")]
#[command(about = "Encode, decode and inspect ULIF image containers")]
#[command(long_about = "\
Encode, decode and inspect ULIF image containers

ULIF stores an uncompressed raster image: a fixed-layout big-endian header
(width, height) followed by raw interleaved RGBA bytes. Legacy files carry an
extra 4-byte ASCII layout tag after the dimensions; pass --legacy to read or
write that shape. Nothing in the bytes says which shape a file uses — you
have to know.

Typical usage:

  ulif encode photo.jpg                 # → photo.ulif, longest edge ≤ 1020
  ulif decode photo.ulif -o photo.png   # export back to PNG
  ulif info photo.ulif --json           # header-derived report
  ulif list ./album                     # report every .ulif in a directory
  ulif convert ./album -o ./encoded     # batch-encode, in parallel

Decoding validates that the payload length matches width*height*channels and
fails on mismatch. Some old files only open under the historical tolerance
for that mismatch; pass --permissive to reproduce it.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a source image (png/jpg/tiff/webp/bmp) into a container
    Encode {
        /// Source image path
        source: PathBuf,
        /// Destination path (defaults to the source with a .ulif extension)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Shrink so the longer edge fits this bound (never upscales)
        #[arg(long, default_value_t = resize::DEFAULT_MAX_DIMENSION)]
        max_dimension: u32,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Decode a container and export it as PNG
    Decode {
        /// Container path (.ulif)
        container: PathBuf,
        /// Destination PNG path (defaults to the container with a .png extension)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Tolerate payload/header size mismatches the way legacy decoders did
        #[arg(long)]
        permissive: bool,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Print a report for a container without decoding its payload
    Info {
        /// Container path (.ulif)
        container: PathBuf,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Report every container in a directory
    List {
        /// Directory to scan (non-recursive)
        dir: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Batch-encode every source image in a directory
    Convert {
        /// Directory of source images (non-recursive)
        dir: PathBuf,
        /// Directory for the encoded containers
        #[arg(long, short)]
        output_dir: PathBuf,
        /// Shrink so the longer edge fits this bound (never upscales)
        #[arg(long, default_value_t = resize::DEFAULT_MAX_DIMENSION)]
        max_dimension: u32,
        #[command(flatten)]
        format: FormatArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            source,
            output,
            max_dimension,
            format,
        } => {
            let dest = output.unwrap_or_else(|| source.with_extension("ulif"));
            let buffer = source::import(&source, max_dimension)?;
            container::encode(&buffer, format.version(), &dest)?;
            println!("Encoded {} → {}", source.display(), dest.display());
            println!("{}", info::read_info(&dest, format.version())?);
        }
        Command::Decode {
            container: path,
            output,
            permissive,
            format,
        } => {
            let mode = if permissive {
                DecodeMode::Permissive
            } else {
                DecodeMode::Strict
            };
            let dest = output.unwrap_or_else(|| path.with_extension("png"));
            let buffer = container::decode(&path, format.version(), mode)?;
            source::export_png(&buffer, &dest)?;
            println!(
                "Decoded {} → {} ({} x {} pixels)",
                path.display(),
                dest.display(),
                buffer.width,
                buffer.height
            );
        }
        Command::Info {
            container: path,
            json,
            format,
        } => {
            let report = info::read_info(&path, format.version())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Command::List { dir, format } => {
            let files = collect_files(&dir, container::has_container_extension);
            if files.is_empty() {
                println!("No ULIF files found in {}", dir.display());
                return Ok(());
            }
            for (index, path) in files.iter().enumerate() {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
                println!("{:03} {}", index + 1, name);
                match info::read_info(path, format.version()) {
                    Ok(report) => println!(
                        "    {} x {} pixels, {:.2} MP, {}, {}",
                        report.width,
                        report.height,
                        report.megapixels,
                        report.mode.tag(),
                        report.file_size
                    ),
                    Err(e) => println!("    Unreadable: {e}"),
                }
            }
        }
        Command::Convert {
            dir,
            output_dir,
            max_dimension,
            format,
        } => {
            let sources = collect_files(&dir, source::is_source_image);
            if sources.is_empty() {
                println!("No source images found in {}", dir.display());
                return Ok(());
            }
            std::fs::create_dir_all(&output_dir)?;

            let results: Vec<(PathBuf, Result<PathBuf, String>)> = sources
                .par_iter()
                .map(|path| {
                    let dest = output_dir
                        .join(path.file_name().unwrap_or_default())
                        .with_extension("ulif");
                    let outcome = source::import(path, max_dimension)
                        .map_err(|e| e.to_string())
                        .and_then(|buffer| {
                            container::encode(&buffer, format.version(), &dest)
                                .map_err(|e| e.to_string())
                        })
                        .map(|()| dest);
                    (path.clone(), outcome)
                })
                .collect();

            let mut failures = 0;
            for (path, outcome) in &results {
                match outcome {
                    Ok(dest) => println!("{} → {}", path.display(), dest.display()),
                    Err(reason) => {
                        failures += 1;
                        println!("{}: failed: {reason}", path.display());
                    }
                }
            }
            println!(
                "Converted {} of {} images",
                results.len() - failures,
                results.len()
            );
            if failures > 0 {
                return Err(format!("{failures} image(s) failed to convert").into());
            }
        }
    }

    Ok(())
}

/// Collect matching files directly inside `dir`, in name order.
fn collect_files(dir: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| keep(path))
        .collect();
    files.sort();
    files
}
