use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use yardproof::summary::{catalog_summary, fit_summary};
use yardproof::{
    HeadlessError, OutputPaths, Pipeline, PipelineConfig, ProductRecord, RejectedRecord, Yard,
    store,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Pipeline(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Pipeline(value)
    }
}

impl From<yardproof::Error> for CliError {
    fn from(value: yardproof::Error) -> Self {
        Self::Pipeline(value.into())
    }
}

impl From<store::StoreError> for CliError {
    fn from(value: store::StoreError) -> Self {
        Self::Pipeline(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Extract,
    Specs,
    Render,
    Build,
    Fit,
    Summary,
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    log_level: Option<String>,
    config: Option<String>,
    input: Option<String>,
    pretty: bool,
    out: Option<String>,
    out_dir: Option<String>,
    products: Option<String>,
    specs_dir: Option<String>,
    yard_length: Option<f64>,
    yard_width: Option<f64>,
}

const DEFAULT_PRODUCTS: &str = "products.json";
const DEFAULT_SPECS_DIR: &str = "inflatables";
const DEFAULT_FLOORPLANS_DIR: &str = "output/floorplans";

fn usage() -> &'static str {
    "yardproof\n\
\n\
USAGE:\n\
  yardproof [--log-level <level>] [--config <path.json>] <command> ...\n\
  yardproof extract [--pretty] [--out <path>] [<listing>|-]\n\
  yardproof specs [--out-dir <dir>] [<products.json>]\n\
  yardproof render [--out-dir <dir>] [<specs-dir>]\n\
  yardproof build [--products <path>] [--specs-dir <dir>] [--out-dir <dir>] [<listing>|-]\n\
  yardproof fit --yard-length <ft> --yard-width <ft> [<products.json>]\n\
  yardproof summary [<products.json>]\n\
\n\
NOTES:\n\
  - If <listing> is omitted or '-', the listing is read from stdin.\n\
  - extract prints the product catalog JSON to stdout unless --out is given.\n\
  - Defaults: products.json, inflatables/ for specs, output/floorplans/ for SVGs.\n\
  - --log-level takes a tracing filter (e.g. `debug`, `yardproof=trace`); logs go to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "extract" | "specs" | "render" | "build" | "fit" | "summary"
                if args.command.is_none() =>
            {
                args.command = Some(match a.as_str() {
                    "extract" => Command::Extract,
                    "specs" => Command::Specs,
                    "render" => Command::Render,
                    "build" => Command::Build,
                    "fit" => Command::Fit,
                    _ => Command::Summary,
                });
            }
            "--pretty" => args.pretty = true,
            "--log-level" => {
                let Some(level) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.log_level = Some(level.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(dir.clone());
            }
            "--products" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.products = Some(path.clone());
            }
            "--specs-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.specs_dir = Some(dir.clone());
            }
            "--yard-length" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.yard_length = Some(parse_feet(v)?);
            }
            "--yard-width" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.yard_width = Some(parse_feet(v)?);
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn parse_feet(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v >= 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn init_tracing(level: Option<&str>) -> Result<(), CliError> {
    let filter = tracing_subscriber::EnvFilter::try_new(level.unwrap_or("info"))
        .map_err(|_| CliError::Usage(usage()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<PipelineConfig, CliError> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config = PipelineConfig::from_json_str(&text)?;
    tracing::debug!(path, "loaded config");
    Ok(config)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn path_or(value: Option<&str>, default: &str) -> PathBuf {
    PathBuf::from(value.unwrap_or(default))
}

fn read_catalog(input: Option<&str>) -> Result<Vec<ProductRecord>, CliError> {
    Ok(store::read_products(&path_or(input, DEFAULT_PRODUCTS))?)
}

fn print_rejected(rejected: &[RejectedRecord]) {
    for record in rejected {
        println!("skipped product {}: {}", record.id, record.message);
    }
}

fn run_render(pipeline: &Pipeline, specs_dir: &Path, out_dir: &Path) -> Result<(), CliError> {
    if store::spec_files(specs_dir)?.is_empty() {
        println!("No spec files found in {}", specs_dir.display());
        return Ok(());
    }
    let report = pipeline.render_spec_dir(specs_dir, out_dir)?;
    for floorplan in &report.rendered {
        println!("rendered {}.svg", floorplan.slug);
    }
    for failure in &report.failed {
        println!("failed {}: {}", failure.source, failure.message);
    }
    println!(
        "Rendered {} of {} floorplans into {}",
        report.rendered.len(),
        report.attempted(),
        out_dir.display()
    );
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    let pipeline = Pipeline::with_config(load_config(args.config.as_deref())?)?;

    match command {
        Command::Extract => {
            let listing = read_input(args.input.as_deref())?;
            let report = pipeline.extract(&listing);
            match args.out.as_deref() {
                None => write_json(&report.records, args.pretty)?,
                Some(out) => {
                    store::write_products(Path::new(out), &report.records)?;
                    println!(
                        "Found {} setup markers; kept {} products ({} discarded) -> {out}",
                        report.markers_found,
                        report.records.len(),
                        report.discarded()
                    );
                }
            }
            Ok(())
        }
        Command::Specs => {
            let records = read_catalog(args.input.as_deref())?;
            let dir = path_or(args.out_dir.as_deref(), DEFAULT_SPECS_DIR);
            let catalog = pipeline.write_specs(&records, &dir)?;
            print_rejected(&catalog.rejected);
            println!(
                "Wrote {} spec files to {} ({} slug collisions, {} non-bounce-house products skipped)",
                catalog.specs.len(),
                dir.display(),
                catalog.collisions.len(),
                catalog.skipped
            );
            Ok(())
        }
        Command::Render => {
            let specs_dir = path_or(args.input.as_deref(), DEFAULT_SPECS_DIR);
            let out_dir = path_or(args.out_dir.as_deref(), DEFAULT_FLOORPLANS_DIR);
            run_render(&pipeline, &specs_dir, &out_dir)
        }
        Command::Build => {
            let listing = read_input(args.input.as_deref())?;
            let paths = OutputPaths {
                products: path_or(args.products.as_deref(), DEFAULT_PRODUCTS),
                specs_dir: path_or(args.specs_dir.as_deref(), DEFAULT_SPECS_DIR),
                floorplans_dir: path_or(args.out_dir.as_deref(), DEFAULT_FLOORPLANS_DIR),
            };
            let report = pipeline.build(&listing, &paths)?;
            print_rejected(&report.rejected);
            println!(
                "Found {} setup markers; kept {} products",
                report.markers_found, report.products
            );
            println!(
                "Wrote {} spec files ({} slug collisions)",
                report.specs_written,
                report.collisions.len()
            );
            println!(
                "Rendered {} floorplans ({} failed) into {}",
                report.rendered,
                report.failed,
                paths.floorplans_dir.display()
            );
            Ok(())
        }
        Command::Fit => {
            let (Some(length), Some(width)) = (args.yard_length, args.yard_width) else {
                return Err(CliError::Usage(usage()));
            };
            let records = read_catalog(args.input.as_deref())?;
            print!("{}", fit_summary(&Yard::new(length, width), &records));
            Ok(())
        }
        Command::Summary => {
            let records = read_catalog(args.input.as_deref())?;
            print!("{}", catalog_summary(&records));
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(args.log_level.as_deref()) {
        eprintln!("{err}");
        std::process::exit(2);
    }

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
