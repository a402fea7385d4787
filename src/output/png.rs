use std::path::PathBuf;

use image::{Rgb, RgbImage};
use log::debug;

use super::{frame_path, Renderer};
use crate::{Charge, Error, Result, Sign};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const AXES: Rgb<u8> = Rgb([150, 150, 150]);
const POSITIVE: Rgb<u8> = Rgb([220, 30, 30]);
const NEGATIVE: Rgb<u8> = Rgb([30, 30, 220]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);

/// Spacing of the grid lines in simulation units.
const GRID_SPACING: f64 = 10.;

/// Distance of the legend from the top left corner, in pixels.
const LEGEND_ORIGIN: i64 = 4;
const LEGEND_ROW_HEIGHT: i64 = 14;
const LEGEND_SWATCH: i64 = 8;
/// Pixel size of one glyph cell.
const GLYPH_SCALE: i64 = 2;

/// 3x5 digit glyphs, one row per entry, most significant bit on the left.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Raster frames of the square `[-extent / 2, extent / 2]²`.
///
/// Positive charges are drawn red and negative charges blue. Charges outside
/// the window are skipped. A legend in the top left corner counts the
/// positive, negative and total charges, each next to a swatch of its color.
#[derive(Clone, Debug)]
pub struct PngRenderer {
    dir: PathBuf,
    pad: usize,
    width: u32,
    height: u32,
    extent: f64,
    dot_radius: i64,
}

impl PngRenderer {
    pub fn new(
        dir: impl Into<PathBuf>,
        pad: usize,
        width: u32,
        height: u32,
        extent: f64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParam("frame size must be non-zero".into()));
        }
        if !(extent.is_finite() && extent > 0.) {
            return Err(Error::InvalidParam(format!(
                "view extent must be finite and > 0, got {extent}"
            )));
        }

        Ok(Self {
            dir: dir.into(),
            pad,
            width,
            height,
            extent,
            dot_radius: 1,
        })
    }

    #[must_use]
    pub fn dot_radius(mut self, dot_radius: u32) -> Self {
        self.dot_radius = i64::from(dot_radius);
        self
    }

    /// Pixel column and row of a point, y pointing up.
    fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        let half = self.extent / 2.;
        let col = (x + half) / self.extent * f64::from(self.width);
        let row = (half - y) / self.extent * f64::from(self.height);
        (col.floor() as i64, row.floor() as i64)
    }

    fn put(&self, img: &mut RgbImage, col: i64, row: i64, color: Rgb<u8>) {
        if (0..i64::from(self.width)).contains(&col) && (0..i64::from(self.height)).contains(&row)
        {
            img.put_pixel(col as u32, row as u32, color);
        }
    }

    fn draw_grid(&self, img: &mut RgbImage) {
        let half = self.extent / 2.;
        let lines = (half / GRID_SPACING).floor() as i64;

        for k in -lines..=lines {
            let u = k as f64 * GRID_SPACING;
            let color = if k == 0 { AXES } else { GRID };
            let (col, row) = self.to_pixel(u, u);
            for r in 0..i64::from(self.height) {
                self.put(img, col, r, color);
            }
            for c in 0..i64::from(self.width) {
                self.put(img, c, row, color);
            }
        }
    }

    fn draw_charge(&self, img: &mut RgbImage, charge: &Charge) {
        let color = match charge.sign() {
            Sign::Positive => POSITIVE,
            Sign::Negative => NEGATIVE,
        };
        let (col, row) = self.to_pixel(charge.position().x, charge.position().y);
        let r = self.dot_radius;

        for dr in -r..=r {
            for dc in -r..=r {
                if dr * dr + dc * dc <= r * r {
                    self.put(img, col + dc, row + dr, color);
                }
            }
        }
    }

    fn fill(&self, img: &mut RgbImage, col: i64, row: i64, size: i64, color: Rgb<u8>) {
        for r in row..row + size {
            for c in col..col + size {
                self.put(img, c, r, color);
            }
        }
    }

    fn draw_number(&self, img: &mut RgbImage, col: i64, row: i64, number: usize) {
        let advance = 4 * GLYPH_SCALE;
        for (k, digit) in number.to_string().bytes().enumerate() {
            let glyph = DIGITS[usize::from(digit - b'0')];
            let left = col + k as i64 * advance;
            for (gy, bits) in glyph.iter().enumerate() {
                for gx in 0..3 {
                    if bits & (0b100 >> gx) != 0 {
                        self.fill(
                            img,
                            left + gx * GLYPH_SCALE,
                            row + gy as i64 * GLYPH_SCALE,
                            GLYPH_SCALE,
                            TEXT,
                        );
                    }
                }
            }
        }
    }

    fn draw_legend(&self, img: &mut RgbImage, positive: usize, negative: usize) {
        let rows = [
            (POSITIVE, positive),
            (NEGATIVE, negative),
            (TEXT, positive + negative),
        ];
        for (k, (color, count)) in rows.into_iter().enumerate() {
            let top = LEGEND_ORIGIN + k as i64 * LEGEND_ROW_HEIGHT;
            self.fill(img, LEGEND_ORIGIN, top + 1, LEGEND_SWATCH, color);
            self.draw_number(img, LEGEND_ORIGIN + LEGEND_SWATCH + 4, top, count);
        }
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, charges: &[Charge], index: usize) -> Result<PathBuf> {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        self.draw_grid(&mut img);
        for charge in charges {
            self.draw_charge(&mut img, charge);
        }

        let positive = charges
            .iter()
            .filter(|c| c.sign() == Sign::Positive)
            .count();
        let negative = charges.len() - positive;
        self.draw_legend(&mut img, positive, negative);

        let path = frame_path(&self.dir, index, self.pad, "png");
        img.save(&path)?;

        debug!("frame {}: {positive} positive, {negative} negative", path.display());
        Ok(path)
    }
}
