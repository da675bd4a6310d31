// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - train_loss:  mean pointer NLL over training batches
//   - val_loss:    mean pointer NLL on the validation set
//   - train_acc:   fraction of decode positions pointing at
//                  the right input position (teacher forced)
//   - val_acc:     same, on the validation set
//   - sorted_rate: fraction of validation sequences that
//                  greedy decoding sorts completely
//
// Output file: checkpoints/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,val_loss,train_acc,val_acc,sorted_rate
//   1,1.874500,1.602200,0.301000,0.356000,0.002000
//   2,1.120100,0.954300,0.612000,0.648000,0.071000
//
// A random pointer over L positions has loss ≈ ln(L) and
// accuracy ≈ 1/L, which is the baseline to beat.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    pub train_loss: f64,

    /// Should track train_loss — divergence indicates overfitting
    pub val_loss: f64,

    pub train_acc: f64,

    pub val_acc: f64,

    /// Range: [0.0, 1.0] — 1.0 means every validation sequence
    /// came out fully sorted under greedy decoding
    pub sorted_rate: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:       usize,
        train_loss:  f64,
        val_loss:    f64,
        train_acc:   f64,
        val_acc:     f64,
        sorted_rate: f64,
    ) -> Self {
        Self { epoch, train_loss, val_loss, train_acc, val_acc, sorted_rate }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Appending across runs keeps earlier rows
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,train_acc,val_acc,sorted_rate")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.train_acc,
            m.val_acc,
            m.sorted_rate,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.5, 2.3, 0.2, 0.2, 0.0);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_rows_append_after_header() {
        let dir = std::env::temp_dir().join(format!("pointer-sort-metrics-{}", std::process::id()));
        let logger = MetricsLogger::new(dir.display().to_string()).unwrap();

        logger.log(&EpochMetrics::new(1, 1.5, 1.4, 0.3, 0.35, 0.01)).unwrap();
        logger.log(&EpochMetrics::new(2, 1.1, 1.0, 0.5, 0.55, 0.05)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,val_loss,train_acc,val_acc,sorted_rate");
        assert!(lines[2].starts_with("2,1.100000,1.000000,"));

        fs::remove_dir_all(&dir).ok();
    }
}
