use clap::{Parser, Subcommand};
use logokit::imaging::{OperationChain, RustBackend};
use logokit::process::{self, Job};
use logokit::{config, output};
use std::path::PathBuf;

/// Shared arguments for commands that write images.
#[derive(clap::Args, Clone)]
struct TargetArgs {
    /// Image files or directories (directories are not searched recursively)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Overwrite input files instead of writing suffixed copies
    #[arg(short, long)]
    replace: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("LOGOKIT_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("LOGOKIT_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "logokit")]
#[command(about = "Trim and extend logo images around their background")]
#[command(long_about = "\
Trim and extend logo images around their background

Trim detects the background from the image corners (at least 3 of 4 must
agree) and crops to the content plus a margin. Extend centers the image on a
canvas three times its size, filled with the majority border color.

Chains combine both, left to right:

  logokit manipulate e,t48 logos/     # extend, then trim with a 48px margin
  logokit manipulate t logo.png       # trim with the default 20px margin

Output goes next to the input with a suffix (_trimmed, _extended,
_processed) unless --replace is given. Files that would not change are
left alone.

Run 'logokit gen-config' to generate a documented logokit.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; stock defaults apply when absent)
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop uniform borders down to the content plus a margin
    Trim {
        /// Pixels kept around the content [default: from config, 10]
        #[arg(short, long)]
        margin: Option<u32>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// Center images on a canvas three times their size
    Extend(TargetArgs),
    /// Apply a comma-separated chain of operations: e, t, t<margin>
    Manipulate {
        /// Operation chain, e.g. "e,t48"
        ops: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Save results even when they are identical to the input
        #[arg(long)]
        no_skip_same: bool,
    },
    /// Print a stock logokit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let (job, target, settings) = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Trim { margin, target } => {
            let settings = config::load_config(&cli.config)?;
            let margin = margin.unwrap_or(settings.trim.margin);
            (Job::trim(margin, target.replace), target, settings)
        }
        Command::Extend(target) => {
            let settings = config::load_config(&cli.config)?;
            (Job::extend(target.replace), target, settings)
        }
        Command::Manipulate {
            ops,
            target,
            no_skip_same,
        } => {
            // Malformed chains abort before any file is touched
            let chain: OperationChain = ops.parse()?;
            let settings = config::load_config(&cli.config)?;
            let skip_same = settings.manipulate.skip_same && !no_skip_same;
            (
                Job::manipulate(chain, target.replace, skip_same),
                target,
                settings,
            )
        }
    };

    let collected = process::collect_files(&target.paths, &settings.files.extensions);
    output::print_input_warnings(&collected);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let summary = process::process_batch(&RustBackend::new(), &collected.files, &job, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    output::print_summary(&summary);

    Ok(())
}
