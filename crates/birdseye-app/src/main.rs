// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Birdseye — scan photographed documents into flat, top-down images.
//
// Entry point. Initialises logging, loads configuration, then scans every input
// file once and writes the results.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::DynamicImage;

use birdseye_bridge::{Base64Sink, FileFrameSource, Frame, FrameSink, FrameSource, PngFileSink};
use birdseye_core::ScanConfig;
use birdseye_vision::DocumentScanner;

#[derive(Debug, Parser)]
#[command(name = "birdseye")]
#[command(about = "Find the document in each photo and straighten it")]
struct Cli {
    /// Input image files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for output PNGs
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Also write the input with the detected outline drawn on it
    #[arg(long)]
    overlay: bool,

    /// Print base64-encoded PNGs to stdout instead of writing files
    #[arg(long)]
    base64: bool,

    /// JSON scan configuration; defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    tracing::info!(inputs = args.inputs.len(), "Birdseye starting");

    let config = match &args.config {
        Some(path) => ScanConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };
    let scanner = DocumentScanner::new(config).context("Invalid scan configuration")?;

    let mut source = FileFrameSource::new(args.inputs.iter().cloned());
    if args.base64 {
        let stdout = std::io::stdout();
        run(&scanner, &mut source, &mut Base64Sink::new(stdout.lock()), args.overlay)
    } else {
        let mut sink = PngFileSink::new(&args.out_dir)
            .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
        tracing::info!(dir = %sink.dir().display(), "Writing PNG output");
        run(&scanner, &mut source, &mut sink, args.overlay)
    }
}

/// Scan every frame from `source` and hand the results to `sink`.
fn run(
    scanner: &DocumentScanner,
    source: &mut impl FrameSource,
    sink: &mut impl FrameSink,
    overlay: bool,
) -> anyhow::Result<()> {
    let mut found = 0usize;
    let mut total = 0usize;

    while let Some(frame) = source.next_frame().context("Failed to read input frame")? {
        total += 1;
        let outputs = scan_one(scanner, &frame, overlay)
            .with_context(|| format!("Failed to scan {}", frame.label))?;
        if outputs.found {
            found += 1;
        } else {
            tracing::warn!(label = %frame.label, "No document found; writing the frame unchanged");
        }
        for output in &outputs.frames {
            sink.deliver(output)
                .with_context(|| format!("Failed to write {}", output.label))?;
        }
    }

    tracing::info!(total, found, "Scan complete");
    Ok(())
}

struct ScanOutputs {
    found: bool,
    frames: Vec<Frame>,
}

/// `<label>.rectified`, plus `<label>.outline` when an overlay is requested.
fn scan_one(scanner: &DocumentScanner, frame: &Frame, overlay: bool) -> anyhow::Result<ScanOutputs> {
    if !overlay {
        let outcome = scanner.scan(&frame.image)?;
        return Ok(ScanOutputs {
            found: outcome.is_rectified(),
            frames: vec![Frame::new(format!("{}.rectified", frame.label), outcome.into_image())],
        });
    }

    let report = scanner.scan_traced(&frame.image)?;
    tracing::debug!(label = %frame.label, contours = report.contour_count, "Traced scan");
    Ok(ScanOutputs {
        found: report.outcome.is_rectified(),
        frames: vec![
            Frame::new(format!("{}.rectified", frame.label), report.outcome.into_image()),
            Frame::new(
                format!("{}.outline", frame.label),
                DynamicImage::ImageRgba8(report.outline),
            ),
        ],
    })
}
