use rayon::prelude::*;
use serde::Serialize;

/// A dense 2D scalar field over the rectangular index domain [0,W)x[0,H).
///
/// Pipeline stages never mutate a field they were handed; each stage
/// returns a fresh one.
#[derive(Clone, Debug, Serialize)]
pub struct Field {
    pub width: usize,
    pub height: usize,
    data: Vec<f64>,
}

impl Field {
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_with(width, height, 0.0)
    }

    pub fn new_with(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a field from a row-major value buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), width * height, "buffer does not match dimensions");
        Self { width, height, data }
    }

    /// Build a field by evaluating `f` at every cell, rows in parallel.
    ///
    /// `f` must be a pure function of the coordinates; the result is
    /// independent of thread scheduling.
    pub fn from_fn_par<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut data = vec![0.0; width * height];
        data.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = f(x, y);
            }
        });
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(move |(idx, &val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Minimum and maximum value over the whole field.
    pub fn min_max(&self) -> (f64, f64) {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for &v in &self.data {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        (min, max)
    }

    /// Sample at fractional coordinates using bilinear interpolation.
    /// Coordinates outside the grid clamp to the border cells.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        let fx = x - x.floor();
        let fy = y - y.floor();

        let sx0 = x0.clamp(0, self.width as i64 - 1) as usize;
        let sx1 = x1.clamp(0, self.width as i64 - 1) as usize;
        let sy0 = y0.clamp(0, self.height as i64 - 1) as usize;
        let sy1 = y1.clamp(0, self.height as i64 - 1) as usize;

        let v00 = self.get(sx0, sy0);
        let v10 = self.get(sx1, sy0);
        let v01 = self.get(sx0, sy1);
        let v11 = self.get(sx1, sy1);

        let v0 = v00 * (1.0 - fx) + v10 * fx;
        let v1 = v01 * (1.0 - fx) + v11 * fx;
        v0 * (1.0 - fy) + v1 * fy
    }
}

/// An elevation field produced by the terrain pipeline.
///
/// Guarantees: every value lies in [0,1], and any cell strictly below
/// `sea_level` is exactly 0 (sea). Cells at or above keep their smoothed
/// magnitude (mainland).
#[derive(Clone, Debug, Serialize)]
pub struct ElevationField {
    field: Field,
    sea_level: f64,
}

impl ElevationField {
    pub(crate) fn new(field: Field, sea_level: f64) -> Self {
        Self { field, sea_level }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn width(&self) -> usize {
        self.field.width
    }

    pub fn height(&self) -> usize {
        self.field.height
    }

    pub fn sea_level(&self) -> f64 {
        self.sea_level
    }

    pub fn is_sea(&self, x: usize, y: usize) -> bool {
        self.field.get(x, y) == 0.0
    }

    /// Fraction of cells above sea level.
    pub fn land_fraction(&self) -> f64 {
        let land = self.field.values().iter().filter(|&&v| v > 0.0).count();
        land as f64 / self.field.values().len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_roundtrip() {
        let field = Field::from_vec(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(2, 0), 2.0);
        assert_eq!(field.get(0, 1), 3.0);
        assert_eq!(field.get(2, 1), 5.0);
    }

    #[test]
    fn test_from_fn_par_matches_serial() {
        let par = Field::from_fn_par(17, 9, |x, y| (x * 31 + y) as f64);
        for y in 0..9 {
            for x in 0..17 {
                assert_eq!(par.get(x, y), (x * 31 + y) as f64);
            }
        }
    }

    #[test]
    fn test_min_max() {
        let mut field = Field::new(4, 4);
        field.set(1, 2, -3.5);
        field.set(3, 0, 7.25);
        assert_eq!(field.min_max(), (-3.5, 7.25));
    }

    #[test]
    fn test_bilinear_interpolates_between_cells() {
        let field = Field::from_vec(2, 2, vec![0.0, 1.0, 2.0, 3.0]);
        // Cell centers reproduce exact values
        assert_eq!(field.sample_bilinear(0.0, 0.0), 0.0);
        assert_eq!(field.sample_bilinear(1.0, 1.0), 3.0);
        // Midpoint is the average of the four corners
        assert!((field.sample_bilinear(0.5, 0.5) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_bilinear_clamps_outside_domain() {
        let field = Field::from_vec(2, 2, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(field.sample_bilinear(-5.0, -5.0), 0.0);
        assert_eq!(field.sample_bilinear(10.0, 10.0), 3.0);
    }
}
