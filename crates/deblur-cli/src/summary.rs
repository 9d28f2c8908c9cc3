use console::Style;
use deblur_core::metrics::QualityReport;
use deblur_core::optimize::{Solution, SolverStatus};
use deblur_core::pipeline::DeblurConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    warn: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warn: Style::new().yellow(),
        }
    }
}

pub fn print_config_summary(config: &DeblurConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Deblur"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(6)));
    println!();

    println!(
        "  {:<16}{}",
        s.label.apply_to("PSF"),
        s.value.apply_to(format!(
            "Gaussian {0}x{0}, sigma {1}",
            config.psf.kernel_size, config.psf.sigma
        ))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Noise"),
        s.value.apply_to(match config.noise.seed {
            Some(seed) => format!("std {} (seed {seed})", config.noise.std_dev),
            None => format!("std {}", config.noise.std_dev),
        })
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Regularization"),
        s.method.apply_to(config.regularization())
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Solver"),
        s.method.apply_to(format!(
            "Gradient descent, {} iterations, tol {:e}, start {}",
            config.solver.max_iterations, config.solver.absolute_stop, config.initial_guess
        ))
    );
    println!();
}

pub fn print_quality_table(rows: &[(&str, QualityReport)]) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<16}{:>14}{:>14}",
        s.label.apply_to("Image"),
        s.label.apply_to("PSNR (dB)"),
        s.label.apply_to("MSE")
    );
    for (name, report) in rows {
        println!(
            "  {:<16}{:>14}{:>14}",
            name,
            s.value.apply_to(format!("{:.6}", report.psnr)),
            s.value.apply_to(format!("{:.6}", report.mse))
        );
    }
}

pub fn print_history(solution: &Solution) {
    let s = Styles::new();

    println!();
    println!(
        "  {:>5}  {:>14}  {:>14}  {:>14}  {:>10}",
        "Iter", "Objective", "Grad norm", "Residual", "Step"
    );
    println!("  {}", "-".repeat(65));
    for r in &solution.history {
        let residual = r
            .residual_norm
            .map_or_else(|| "-".to_string(), |v| format!("{v:.6e}"));
        let step = r.step.map_or_else(|| "-".to_string(), |v| format!("{v:.4e}"));
        println!(
            "  {:>5}  {:>14.6e}  {:>14.6e}  {:>14}  {:>10}",
            r.iteration, r.objective, r.gradient_norm, residual, step
        );
    }
    println!();

    let status = match solution.status {
        SolverStatus::Converged => s.method.apply_to(solution.status.to_string()),
        _ => s.warn.apply_to(solution.status.to_string()),
    };
    println!(
        "  {:<16}{} after {} iterations",
        s.label.apply_to("Status"),
        status,
        solution.iterations
    );
}
