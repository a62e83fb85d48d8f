//! Batch entry points that hide the wiring.

use std::io::ErrorKind;

use pressforge_config::{BatchConfig, ConfigError};
use pressforge_core::{parse_batch, Machine, PressForgeError, Result};
use pressforge_solver::{BatchReport, BatchSolver};

/// Config file read from the working directory.
const CONFIG_FILE: &str = "pressforge.toml";

/// Loads `pressforge.toml`, or defaults if there is none.
///
/// A file that exists but does not parse or validate is an error.
pub fn load_config() -> Result<BatchConfig> {
    match BatchConfig::load(CONFIG_FILE) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(BatchConfig::default()),
        Err(err) => Err(PressForgeError::Config(err.to_string())),
    }
}

/// Parses one machine per line and solves the batch.
pub fn solve_lines<I, S>(lines: I) -> Result<BatchReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    solve_text(&text)
}

/// Parses a batch, one machine per non-blank line, and solves it.
pub fn solve_text(text: &str) -> Result<BatchReport> {
    let machines = parse_batch(text)?;
    solve_machines(&machines, load_config()?)
}

/// Solves already parsed machines with `config`.
pub fn solve_machines(machines: &[Machine], config: BatchConfig) -> Result<BatchReport> {
    #[cfg(feature = "console")]
    pressforge_console::init();

    build_solver(config).solve(machines)
}

#[cfg(feature = "console")]
fn build_solver(config: BatchConfig) -> BatchSolver {
    use pressforge_config::RendererKind;

    if config.progress.renderer == RendererKind::Terminal {
        let terminal = pressforge_console::TerminalRenderer::stdout(&config.progress);
        BatchSolver::new(config).with_renderer(terminal)
    } else {
        BatchSolver::new(config)
    }
}

#[cfg(not(feature = "console"))]
fn build_solver(config: BatchConfig) -> BatchSolver {
    BatchSolver::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressforge_config::RendererKind;
    use pressforge_core::{MachineStatus, ParseError};
    use pressforge_test::{sample_batch, SAMPLE_LINES, SAMPLE_SUM};

    #[test]
    fn test_solve_lines_sample() {
        let report = solve_lines(SAMPLE_LINES).unwrap();
        assert_eq!(report.sum, SAMPLE_SUM);
        assert_eq!(report.succeeded, 3);
    }

    #[test]
    fn test_solve_text_skips_blank_lines() {
        let report = solve_text("(0) {1}\n\n(0,1) {1,0}\n(0) (1) {2,3}\n").unwrap();
        assert_eq!(report.sum, 6);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.machine_count(), 3);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = solve_lines(["(0) {1}", "(0) (1"]).unwrap_err();
        match err {
            PressForgeError::Parse { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source, ParseError::MissingTarget);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_solve_machines_with_config() {
        let machines = sample_batch();
        let config = BatchConfig::new()
            .with_renderer(RendererKind::None)
            .with_incumbent_pruning(true);

        let report = solve_machines(&machines, config).unwrap();
        assert_eq!(report.sum, SAMPLE_SUM);
        assert!(machines.iter().all(|m| m.status() == MachineStatus::Success));
    }

    #[test]
    fn test_missing_config_file_is_default() {
        assert_eq!(load_config().unwrap(), BatchConfig::default());
    }
}
