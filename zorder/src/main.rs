#[macro_use]
extern crate log;

mod logging;
mod process;
mod records;
mod reporter;

use anyhow::{Context, Result};
use argh::FromArgs;
use morton::{AxisOrder, Domain, Encoder, EncoderConfig, RangePolicy};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Debug, FromArgs, Serialize, Clone)]
#[argh(description = "write the Z-order code of every `x,y` line of the input, one per line")]
pub struct Config {
    #[argh(
        option,
        description = "bits per axis, between 1 and 32 (default 32)",
        default = "morton::DEFAULT_BITS_PER_AXIS"
    )]
    bits: u32,
    #[argh(
        option,
        description = "domain as xmin,xmax,ymin,ymax (default -180,180,-90,90)",
        from_str_fn(parse_domain)
    )]
    domain: Option<Domain>,
    #[argh(
        option,
        description = "x-major (default) puts x on the odd bits, y-major on the even ones",
        from_str_fn(parse_order)
    )]
    order: Option<AxisOrder>,
    #[argh(
        switch,
        description = "clamp coordinates outside of the domain instead of skipping them"
    )]
    clamp: bool,
    #[argh(option, description = "write a JSON summary of the run to this file")]
    report: Option<PathBuf>,
    #[argh(switch, description = "toggle verbose logging", short = 'v')]
    verbose: bool,
    #[argh(positional, description = "input file, one `x,y` pair per line")]
    input: PathBuf,
    #[argh(positional, description = "output file, one code per line")]
    output: PathBuf,
}

impl Config {
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig::default()
            .with_bits(self.bits)
            .with_domain(self.domain.unwrap_or_default())
            .with_order(self.order.unwrap_or_default())
            .with_policy(if self.clamp {
                RangePolicy::Clamp
            } else {
                RangePolicy::Reject
            })
    }
}

fn parse_domain(arg: &str) -> Result<Domain, String> {
    use regex::Regex;
    let re_domain = Regex::new(r"^\s*([^,]+),([^,]+),([^,]+),([^,]+)\s*$").unwrap();
    let captures = re_domain
        .captures(arg)
        .ok_or_else(|| format!("expected xmin,xmax,ymin,ymax, got {:?}", arg))?;
    let mut bounds = [0.0; 4];
    for (i, bound) in bounds.iter_mut().enumerate() {
        let s = captures
            .get(i + 1)
            .ok_or_else(|| format!("unable to get capture {}", i + 1))?
            .as_str()
            .trim();
        *bound = s
            .parse::<f64>()
            .or_else(|e| Err(format!("unable to parse {:?} as a number: {:?}", s, e)))?;
    }
    let domain = Domain::new(bounds[0], bounds[1], bounds[2], bounds[3]);
    domain.validate().map_err(|e| e.to_string())?;
    Ok(domain)
}

fn parse_order(arg: &str) -> Result<AxisOrder, String> {
    match arg {
        "x-major" => Ok(AxisOrder::XMajor),
        "y-major" => Ok(AxisOrder::YMajor),
        _ => Err(format!(
            "Unrecognized axis order: {} (expected x-major or y-major)",
            arg
        )),
    }
}

fn run(config: Config) -> Result<reporter::Reporter> {
    // Configuration problems are fatal, and must surface before touching any file
    let encoder =
        Encoder::new(config.encoder_config()).context("invalid encoder configuration")?;
    debug!("Encoder configuration {:?}", encoder.config());

    let input = File::open(&config.input)
        .with_context(|| format!("opening input file {:?}", config.input))?;
    let output = File::create(&config.output)
        .with_context(|| format!("creating output file {:?}", config.output))?;
    info!("Encoding {:?} into {:?}", config.input, config.output);

    let mut reporter = reporter::Reporter::new(config.clone(), *encoder.config());
    process::process(
        BufReader::new(input),
        BufWriter::new(output),
        &encoder,
        &mut reporter,
    )?;
    Ok(reporter)
}

fn main() -> Result<()> {
    let config: Config = argh::from_env();
    logging::init_logging(config.verbose);

    let report_path = config.report.clone();
    let reporter = run(config)?;
    reporter.report();
    if let Some(path) = report_path {
        reporter.write_json(&path)?;
        info!("Summary written to {:?}", path);
    }
    Ok(())
}
