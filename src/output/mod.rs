//! Snapshots of a running simulation.
//!
//! Nothing in here touches the simulation state; renderers only read a
//! slice of charges.

mod csv;
#[cfg(feature = "render")]
mod png;

pub use csv::CsvWriter;
#[cfg(feature = "render")]
pub use png::PngRenderer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{Charge, Error, Result};

/// Writes one artifact per snapshot.
pub trait Renderer {
    /// Write the snapshot taken before step `index`, returning the file written.
    fn render(&mut self, charges: &[Charge], index: usize) -> Result<PathBuf>;
}

/// Number of digits needed to print every step index of a run.
#[must_use]
pub fn pad_width(num_steps: usize) -> usize {
    num_steps.to_string().len()
}

/// `dir/<index zero padded to pad>.<extension>`
#[must_use]
pub fn frame_path(dir: &Path, index: usize, pad: usize, extension: &str) -> PathBuf {
    dir.join(format!("{index:0pad$}.{extension}"))
}

/// Create `dir` if needed and remove the files a previous run left in it.
pub fn prepare_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    if removed > 0 {
        debug!("removed {removed} old files from {}", dir.display());
    }

    Ok(())
}

/// Decides before which steps a snapshot is taken.
///
/// A frame is due before step `i` once `i * dt * fps` has caught up with the
/// number of frames written so far.
#[derive(Clone, Debug)]
pub struct SnapshotCadence {
    dt: f64,
    fps: f64,
    frames: usize,
}

impl SnapshotCadence {
    pub fn new(dt: f64, fps: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.) {
            return Err(Error::InvalidTimeStep(dt));
        }
        if !(fps.is_finite() && fps > 0.) {
            return Err(Error::InvalidParam(format!(
                "frame rate must be finite and > 0, got {fps}"
            )));
        }
        Ok(Self { dt, fps, frames: 0 })
    }

    /// Whether a frame is due before step `step`; counts it if so.
    pub fn due(&mut self, step: usize) -> bool {
        if step as f64 * self.dt * self.fps - self.frames as f64 >= 0. {
            self.frames += 1;
            true
        } else {
            false
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

#[cfg(test)]
pub(crate) fn test_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("defects-{}-{name}", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        assert_eq!(pad_width(9), 1);
        assert_eq!(pad_width(25_000), 5);
        assert_eq!(
            frame_path(Path::new("out"), 42, 5, "png"),
            Path::new("out").join("00042.png")
        );
    }

    #[test]
    fn cadence_every_step() {
        // one frame per step
        let mut cadence = SnapshotCadence::new(0.5, 2.).unwrap();
        assert!((0..10).all(|i| cadence.due(i)));
        assert_eq!(cadence.frames(), 10);
    }

    #[test]
    fn cadence_every_hundredth_step() {
        let mut cadence = SnapshotCadence::new(1e-5, 1000.).unwrap();
        let due: Vec<_> = (0..1000).filter(|&i| cadence.due(i)).collect();
        assert_eq!(due.len(), 10);
        assert_eq!(due[0], 0);
        for (k, &i) in due.iter().enumerate() {
            assert!((i as f64 - 100. * k as f64).abs() <= 1.);
        }
    }

    #[test]
    fn cadence_rejects_bad_input() {
        assert!(SnapshotCadence::new(0., 10.).is_err());
        assert!(SnapshotCadence::new(1e-3, 0.).is_err());
    }

    #[test]
    fn prepare_dir_clears_files() {
        let dir = test_dir("prepare");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("old.csv"), "stale").unwrap();

        prepare_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        fs::remove_dir_all(&dir).unwrap();
    }
}
