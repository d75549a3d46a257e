use std::path::{Path, PathBuf};

use console::Style;

use agrinir_core::classify::HealthCoverage;
use agrinir_core::config::ProcessingConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(config: &ProcessingConfig, file_count: usize, output_dir: &Path) {
    let s = Styles::new();
    let est = &config.estimator;
    let cls = &config.classifier;

    println!();
    println!("  {}", s.title.apply_to("agrinir"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Inputs"),
        s.value.apply_to(format!("{} file(s)", file_count))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output_dir.display())
    );

    let methods: Vec<String> = est
        .methods
        .iter()
        .map(|m| format!("{} ({:.2})", m, est.weights.weight(*m)))
        .collect();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Methods"),
        s.method.apply_to(methods.join(", "))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Radius"),
        s.value.apply_to(format!("{:.3}", est.radius_ratio))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Laplacian"),
        s.value.apply_to(est.laplacian)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Weeds"),
        s.value.apply_to(format!(
            "EXG > {}, median {}x{}",
            cls.weed_threshold, cls.median_window, cls.median_window
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Health"),
        s.value.apply_to(format!(
            "healthy >= {}, unhealthy <= {}",
            cls.healthy_threshold, cls.unhealthy_threshold
        ))
    );
    println!();
}

pub fn print_coverage_table(rows: &[(PathBuf, HealthCoverage)]) {
    if rows.is_empty() {
        return;
    }
    let s = Styles::new();

    println!();
    println!(
        "  {:<32}{:>10}{:>11}{:>8}",
        s.title.apply_to("File"),
        s.title.apply_to("Healthy"),
        s.title.apply_to("Unhealthy"),
        s.title.apply_to("Weeds")
    );
    for (path, cov) in rows {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!(
            "  {:<32}{:>9.1}%{:>10.1}%{:>7.1}%",
            name,
            cov.healthy * 100.0,
            cov.unhealthy * 100.0,
            cov.weeds * 100.0
        );
    }
}
