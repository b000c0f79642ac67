use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use income_pictogram::format::{format_long, format_short};
use income_pictogram::viz::{raster, svg};
use income_pictogram::{compose, dataset, storage, ChartConfig, StatInput};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pictogram",
    version,
    about = "Render an income-distribution pictogram as SVG, HTML or PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the chart (and optionally export the derived bands and print stats).
    Render(RenderArgs),
    /// Write the bundled dataset as JSON, as a starting point for custom inputs.
    Dataset(DatasetArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LayoutKind {
    /// Bands as wide as their population share; icon values from the densest band.
    Population,
    /// Linear USD axis with fixed icon values.
    Range,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input statistics as JSON (defaults to the bundled Belstat dataset).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Chart configuration as JSON; overrides --layout.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Layout preset.
    #[arg(long, value_enum, default_value_t = LayoutKind::Population)]
    layout: LayoutKind,
    /// Output file (.svg, .html or .png). Prints SVG to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Width of the output in pixels (default: the configured server size).
    #[arg(long)]
    width: Option<f64>,
    /// Height of the output in pixels (default: the configured server size).
    #[arg(long)]
    height: Option<f64>,
    /// TTF/OTF font for labels in PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Save the derived bands (.csv or .json).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print the derived bands and totals (to stderr when the SVG goes to stdout).
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Destination file; prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Dataset(args) => cmd_dataset(args),
    }
}

fn load_input(path: Option<&PathBuf>) -> Result<StatInput> {
    match path {
        Some(p) => dataset::load_json(p),
        None => Ok(dataset::belstat()),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let input = load_input(args.data.as_ref())?;
    let config = match (&args.config, args.layout) {
        (Some(p), _) => ChartConfig::load_json(p)?,
        (None, LayoutKind::Population) => ChartConfig::default(),
        (None, LayoutKind::Range) => ChartConfig::range_layout(),
    };
    let width = args.width.unwrap_or(config.server_size.0);
    let height = args.height.unwrap_or(config.server_size.1);

    let chart = compose(&input, width, height, &config)?;

    match args.out.as_ref() {
        Some(path) => {
            match extension(path).as_str() {
                "svg" => std::fs::write(path, svg::render_to_string(&chart.document))?,
                "html" | "htm" => std::fs::write(
                    path,
                    svg::render_page(&chart.document, &config.captions.title),
                )?,
                "png" => {
                    if let Some(font) = args.font.as_ref() {
                        raster::register_font_file(font)?;
                    }
                    raster::save_bitmap(&chart.document, path)?;
                }
                other => anyhow::bail!("unsupported output format: {}", other),
            }
            eprintln!("Wrote chart to {}", path.display());
        }
        None => println!("{}", svg::render_to_string(&chart.document)),
    }

    if let Some(path) = args.export.as_ref() {
        match extension(path).as_str() {
            "csv" => storage::save_csv(&chart.derivation.bands, path)?,
            "json" => storage::save_json(&chart.derivation.bands, path)?,
            other => anyhow::bail!("unsupported export format: {}", other),
        }
        eprintln!(
            "Saved {} bands to {}",
            chart.derivation.bands.len(),
            path.display()
        );
    }

    if args.stats {
        // stdout carries the SVG when there is no --out
        let mut sink: Box<dyn Write> = if args.out.is_some() {
            Box::new(io::stdout())
        } else {
            Box::new(io::stderr())
        };
        for (b, l) in chart.derivation.bands.iter().zip(&chart.layout.bands) {
            writeln!(
                sink,
                "${:.0}-${:.0}  people={}  total=${}  per_person=${}  icons={}/{}",
                b.from_usd,
                b.to_usd,
                format_long(b.people),
                format_long(b.total_usd),
                format_short(b.usd_per_person()),
                l.money_icons,
                l.people_icons
            )?;
        }
        let d = &chart.derivation;
        writeln!(
            sink,
            "income=${}  taxes=${}  usd_per_icon={}  people_per_icon={}",
            format_long(d.all_usd),
            format_long(d.taxes_usd),
            format_short(chart.layout.usd_per_icon),
            format_short(chart.layout.people_per_icon)
        )?;
    }

    Ok(())
}

fn cmd_dataset(args: DatasetArgs) -> Result<()> {
    let data = dataset::belstat();
    match args.out.as_ref() {
        Some(path) => {
            dataset::save_json(&data, path)?;
            eprintln!("Wrote dataset to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&data)?),
    }
    Ok(())
}
