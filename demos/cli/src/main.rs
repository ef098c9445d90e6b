use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use masonry_timeline_core::{
    DateFormat, Granularity, MasonryTimeline, StaticLayout, TimelineConfig, TimelineModel,
};
use tracing_subscriber::EnvFilter;

mod sample;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Months,
    Years,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Months => Granularity::Months,
            GranularityArg::Years => Granularity::Years,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "masonry-timeline",
    about = "Lay out a masonry timeline strip for a list of measured posts."
)]
struct Args {
    /// JSON file with `[{ "date", "left", "width" }]`.
    #[arg(short, long, conflicts_with = "generate")]
    input: Option<PathBuf>,

    /// Generate this many sample posts instead of reading a file.
    #[arg(short, long)]
    generate: Option<usize>,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Date of the newest generated post (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Moment-style date pattern of the `date` field.
    #[arg(long, default_value = "DD.MM.YYYY")]
    date_format: String,

    #[arg(long, value_enum, default_value_t = GranularityArg::Months)]
    granularity: GranularityArg,

    /// Width of the timeline strip in pixels.
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    #[arg(long, default_value_t = 0.0)]
    scroll_left: f64,

    #[arg(long, default_value_t = 960.0)]
    viewport_width: f64,

    /// Print the widget snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = TimelineConfig {
        date_format: args.date_format.clone(),
        granularity: args.granularity.into(),
        ..TimelineConfig::default()
    };

    let layout = match (&args.input, args.generate) {
        (Some(path), _) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read file {path:?}"))?;
            StaticLayout::from_json(&data).with_context(|| format!("cannot parse {path:?}"))?
        }
        (None, Some(count)) => {
            let format = DateFormat::parse(&config.date_format)?;
            let start = args.start.unwrap_or_else(|| Local::now().date_naive());
            StaticLayout::new(sample::generate(
                count,
                args.seed,
                start,
                &format,
                config.packery.gutter,
            ))
        }
        (None, None) => bail!("pass either --input <file> or --generate <count>"),
    }
    .with_viewport(args.scroll_left, args.viewport_width)
    .with_timeline_width(args.width);

    let widget = MasonryTimeline::new(layout, config)?;
    let snapshot = widget.snapshot();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", describe(&snapshot.timeline));
    }

    Ok(())
}

fn describe(timeline: &TimelineModel) -> String {
    let mut out = String::new();
    for band in &timeline.bands {
        out.push_str(&format!("{}\n", band.label));
        for segment in &band.segments {
            let fill = segment
                .fill_percent
                .map(|fill| format!("{fill:>3}%"))
                .unwrap_or_else(|| "   -".to_string());
            let marker = if segment.active { " *" } else { "" };
            out.push_str(&format!(
                "  {:<5} {:>8.1}px {:>4} posts {fill}{marker}\n",
                segment.label, segment.width, segment.post_count
            ));
        }
    }
    out
}
