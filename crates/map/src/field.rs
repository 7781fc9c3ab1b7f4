//! A gridded daily field.

use ndarray::{Array3, ArrayView1, Axis, s};

use crate::error::MapError;

/// Daily values on a regular grid, stored `time × lat × lon`, with the
/// coordinate vectors of the two spatial axes.
#[derive(Debug, Clone)]
pub struct Field {
    values: Array3<f64>,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl Field {
    /// Creates a field after checking the coordinates against the data shape.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ShapeMismatch`] if `lats` or `lons` do not match
    /// the second or third dimension of `values`.
    pub fn new(values: Array3<f64>, lats: Vec<f64>, lons: Vec<f64>) -> Result<Self, MapError> {
        let (_, n_lat, n_lon) = values.dim();
        if lats.len() != n_lat {
            return Err(MapError::ShapeMismatch {
                axis: "lat".to_string(),
                expected: n_lat,
                got: lats.len(),
            });
        }
        if lons.len() != n_lon {
            return Err(MapError::ShapeMismatch {
                axis: "lon".to_string(),
                expected: n_lon,
                got: lons.len(),
            });
        }
        Ok(Self { values, lats, lons })
    }

    /// Joins fields along time in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NoFields`] for an empty list and
    /// [`MapError::GridMismatch`] if the parts are on different grids.
    pub fn concat_time(parts: Vec<Field>) -> Result<Self, MapError> {
        let mut parts = parts.into_iter();
        let first = parts.next().ok_or(MapError::NoFields)?;
        let rest: Vec<Field> = parts.collect();
        if rest.is_empty() {
            return Ok(first);
        }

        for part in &rest {
            if part.lats != first.lats {
                return Err(MapError::GridMismatch {
                    axis: "lat".to_string(),
                });
            }
            if part.lons != first.lons {
                return Err(MapError::GridMismatch {
                    axis: "lon".to_string(),
                });
            }
        }

        let views: Vec<_> = std::iter::once(&first)
            .chain(&rest)
            .map(|f| f.values.view())
            .collect();
        let values = ndarray::concatenate(Axis(0), &views).map_err(|_| MapError::GridMismatch {
            axis: "time".to_string(),
        })?;

        Ok(Self {
            values,
            lats: first.lats,
            lons: first.lons,
        })
    }

    /// Number of time steps.
    pub fn n_time(&self) -> usize {
        self.values.dim().0
    }

    /// Number of latitudes.
    pub fn n_lat(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitudes.
    pub fn n_lon(&self) -> usize {
        self.lons.len()
    }

    /// Latitude coordinates.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// The `time × lat × lon` values.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Time series of one grid point as a strided view.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn point(&self, lat_index: usize, lon_index: usize) -> ArrayView1<'_, f64> {
        self.values.slice(s![.., lat_index, lon_index])
    }

    /// Time series of one grid point, copied into a contiguous vector.
    pub fn point_series(&self, lat_index: usize, lon_index: usize) -> Vec<f64> {
        self.point(lat_index, lon_index).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(nt: usize, offset: f64) -> Field {
        let values = Array3::from_shape_fn((nt, 2, 3), |(t, i, j)| offset + (t * 100 + i * 10 + j) as f64);
        Field::new(values, vec![-10.0, 10.0], vec![0.0, 120.0, 240.0]).unwrap()
    }

    #[test]
    fn rejects_bad_coordinates() {
        let values = Array3::<f64>::zeros((4, 2, 3));
        let err = Field::new(values.clone(), vec![0.0], vec![0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, MapError::ShapeMismatch { expected: 2, got: 1, .. }));
        let err = Field::new(values, vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert!(matches!(err, MapError::ShapeMismatch { expected: 3, got: 1, .. }));
    }

    #[test]
    fn point_series_follows_time() {
        let f = field(4, 0.0);
        assert_eq!(f.point_series(1, 2), vec![12.0, 112.0, 212.0, 312.0]);
    }

    #[test]
    fn concat_preserves_order() {
        let f = Field::concat_time(vec![field(2, 0.0), field(3, 1000.0)]).unwrap();
        assert_eq!(f.n_time(), 5);
        assert_eq!(f.point_series(0, 0), vec![0.0, 100.0, 1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn concat_single_and_empty() {
        assert_eq!(Field::concat_time(vec![field(2, 0.0)]).unwrap().n_time(), 2);
        assert_eq!(Field::concat_time(Vec::new()).unwrap_err(), MapError::NoFields);
    }

    #[test]
    fn concat_rejects_different_grids() {
        let other = Field::new(Array3::zeros((2, 2, 3)), vec![-10.0, 11.0], vec![0.0, 120.0, 240.0]).unwrap();
        let err = Field::concat_time(vec![field(2, 0.0), other]).unwrap_err();
        assert_eq!(
            err,
            MapError::GridMismatch {
                axis: "lat".to_string()
            }
        );
    }
}
