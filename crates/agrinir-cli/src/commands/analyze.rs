use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use agrinir_core::classify::HealthCoverage;
use agrinir_core::config::{EstimatorConfig, ProcessingConfig};
use agrinir_core::io::image_io::{load_frame, save_bgr_png, save_field_png, save_gray_png};
use agrinir_core::pipeline::{FrameAnalysis, FrameAnalyzer};

use crate::summary::{print_config_summary, print_coverage_table};

#[derive(Args)]
pub struct RunArgs {
    /// Input image files (PNG, JPEG, TIFF, ...)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Processing config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use the three-method estimator (no multi-resolution component)
    #[arg(long)]
    pub three_method: bool,

    /// Low-pass radius as a fraction of the shorter image side
    #[arg(long)]
    pub radius_ratio: Option<f32>,

    /// EXG cut value for the weed mask (0-255)
    #[arg(long)]
    pub weed_threshold: Option<u8>,

    /// Also write every NIR component as its own image
    #[arg(long)]
    pub components: bool,

    /// Directory for output images
    #[arg(short, long, default_value = "agrinir-out")]
    pub output_dir: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    check_unique_stems(&args.files)?;
    let config = build_config(args)?;
    print_config_summary(&config, args.files.len(), &args.output_dir);

    let analyzer = FrameAnalyzer::new(config).context("Invalid processing config")?;
    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Analyzing");

    let results: Vec<(PathBuf, Result<HealthCoverage>)> = args
        .files
        .par_iter()
        .map(|path| {
            let outcome = process_file(&analyzer, path, &args.output_dir, args.components);
            pb.inc(1);
            (path.clone(), outcome)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut rows = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (path, outcome) in results {
        match outcome {
            Ok(coverage) => rows.push((path, coverage)),
            Err(e) => {
                failures += 1;
                warn!("{}: {:#}", path.display(), e);
                eprintln!("Failed: {}: {:#}", path.display(), e);
            }
        }
    }

    print_coverage_table(&rows);
    println!("\nOutput saved to {}", args.output_dir.display());

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed", failures, args.files.len());
    }
    Ok(())
}

fn build_config(args: &RunArgs) -> Result<ProcessingConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        ProcessingConfig::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        ProcessingConfig::default()
    };

    if args.three_method {
        let preset = EstimatorConfig::three_method();
        config.estimator.methods = preset.methods;
        config.estimator.weights = preset.weights;
    }
    if let Some(ratio) = args.radius_ratio {
        config.estimator.radius_ratio = ratio;
    }
    if let Some(threshold) = args.weed_threshold {
        config.classifier.weed_threshold = threshold;
    }
    Ok(config)
}

fn output_stem(input: &Path) -> &str {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame")
}

/// Outputs are named after the input stem, so two inputs sharing one would
/// overwrite each other.
fn check_unique_stems(files: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for path in files {
        if let Some(first) = seen.insert(output_stem(path), path) {
            anyhow::bail!(
                "{} and {} would write the same output files",
                first.display(),
                path.display()
            );
        }
    }
    Ok(())
}

fn process_file(
    analyzer: &FrameAnalyzer,
    path: &Path,
    output_dir: &Path,
    write_components: bool,
) -> Result<HealthCoverage> {
    let frame = load_frame(path).with_context(|| format!("Failed to load {}", path.display()))?;
    debug!(
        file = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "Loaded frame"
    );

    let analysis = analyzer.analyze(&frame)?;
    write_outputs(&analysis, path, output_dir, write_components)?;
    Ok(analysis.coverage()?)
}

fn write_outputs(
    analysis: &FrameAnalysis,
    input: &Path,
    output_dir: &Path,
    write_components: bool,
) -> Result<()> {
    let stem = output_stem(input);
    let out = |suffix: &str| output_dir.join(format!("{}_{}.png", stem, suffix));

    save_field_png(&analysis.nir, &out("nir"))?;
    save_gray_png(&analysis.ndvi, &out("ndvi"))?;
    save_gray_png(&analysis.vari, &out("vari"))?;
    save_gray_png(&analysis.exg, &out("exg"))?;
    save_gray_png(&analysis.weed_mask, &out("weeds"))?;
    save_bgr_png(&analysis.health_map, &out("health"))?;

    if write_components {
        for (method, component) in &analysis.components {
            save_field_png(component, &out(method.key()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrinir_core::decompose::LaplacianKernel;

    fn args(files: &[&str]) -> RunArgs {
        RunArgs {
            files: files.iter().map(PathBuf::from).collect(),
            config: None,
            three_method: false,
            radius_ratio: None,
            weed_threshold: None,
            components: false,
            output_dir: PathBuf::from("agrinir-out"),
        }
    }

    #[test]
    fn rejects_inputs_sharing_a_stem() {
        let files = args(&["a/img.png", "b/img.jpg"]).files;
        assert!(check_unique_stems(&files).is_err());
        let files = args(&["a/img.png", "b/other.png"]).files;
        assert!(check_unique_stems(&files).is_ok());
    }

    #[test]
    fn three_method_keeps_loaded_estimator_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agrinir.toml");
        std::fs::write(
            &path,
            "[estimator]\nepsilon = 0.001\nlaplacian = \"cross\"\n\n[estimator.mix]\nred = 0.5\n",
        )
        .unwrap();

        let mut run_args = args(&["field.png"]);
        run_args.config = Some(path);
        run_args.three_method = true;
        let config = build_config(&run_args).unwrap();

        let preset = EstimatorConfig::three_method();
        assert_eq!(config.estimator.methods, preset.methods);
        assert_eq!(config.estimator.weights, preset.weights);
        assert_eq!(config.estimator.epsilon, 0.001);
        assert_eq!(config.estimator.laplacian, LaplacianKernel::Cross);
        assert_eq!(config.estimator.mix.red, 0.5);
    }
}
