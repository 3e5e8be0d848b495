//! Report generation port trait.

use std::path::Path;

use crate::domain::engine::BacktestResult;
use crate::domain::error::SigtraderError;
use crate::domain::metrics::Metrics;

/// Port for exporting backtest output. The core produces the equity curve,
/// trade log, and metrics; rendering and persistence live behind this seam.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        metrics: &Metrics,
        strategy_name: &str,
        output_dir: &Path,
    ) -> Result<(), SigtraderError>;
}
