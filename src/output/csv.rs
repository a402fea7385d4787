use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use log::debug;

use super::{frame_path, Renderer};
use crate::{Charge, Result};

/// One CSV file per snapshot with a row per charge.
#[derive(Clone, Debug)]
pub struct CsvWriter {
    dir: PathBuf,
    pad: usize,
}

impl CsvWriter {
    pub fn new(dir: impl Into<PathBuf>, pad: usize) -> Self {
        Self {
            dir: dir.into(),
            pad,
        }
    }
}

impl Renderer for CsvWriter {
    fn render(&mut self, charges: &[Charge], index: usize) -> Result<PathBuf> {
        let path = frame_path(&self.dir, index, self.pad, "csv");
        let mut file = BufWriter::new(File::create(&path)?);

        writeln!(file, "id,sign,mass,x,y,vx,vy")?;
        for c in charges {
            let (x, v) = (c.position(), c.velocity());
            writeln!(
                file,
                "{},{},{},{},{},{},{}",
                c.id().0,
                c.sign().value(),
                c.mass(),
                x.x,
                x.y,
                v.x,
                v.y
            )?;
        }
        file.flush()?;

        debug!("wrote {} charges to {}", charges.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use nalgebra::Vector2;

    use super::*;
    use crate::{output::test_dir, ChargeId, Sign};

    #[test]
    fn writes_one_row_per_charge() {
        let dir = test_dir("csv");
        fs::create_dir_all(&dir).unwrap();

        let charges = vec![
            Charge::new(ChargeId(0), 2., Sign::Positive, Vector2::new(1., -1.)).unwrap(),
            Charge::new(ChargeId(5), 3., Sign::Negative, Vector2::new(0.5, 4.))
                .unwrap()
                .with_velocity(Vector2::new(-2., 0.25))
                .unwrap(),
        ];

        let mut writer = CsvWriter::new(&dir, 3);
        let path = writer.render(&charges, 7).unwrap();
        assert_eq!(path, dir.join("007.csv"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec!["id,sign,mass,x,y,vx,vy", "0,1,2,1,-1,0,0", "5,-1,3,0.5,4,-2,0.25"]
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
