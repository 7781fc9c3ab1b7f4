//! Grid sweeps over synthetic fields.

use ndarray::{Array3, s};
use sre_events::{PercentileSet, SreConfig, SreEngine};
use sre_map::{Field, GridMapBuilder};

const N_YEARS: usize = 4;

/// A noisy seasonal cycle with a few planted heat spells.
fn series() -> Vec<f64> {
    let mut s: Vec<f64> = (0..N_YEARS * 365)
        .map(|i| {
            let doy = (i % 365) as f64;
            let year = (i / 365) as f64;
            200.0 + 80.0 * (doy / 365.0 * std::f64::consts::TAU).sin() + 10.0 * (year * 3.1 + doy * 0.7).sin()
        })
        .collect();
    s[40..46].iter_mut().for_each(|v| *v += 500.0);
    s[365 + 200..365 + 204].iter_mut().for_each(|v| *v += 500.0);
    s
}

fn uniform_field(n_lat: usize, n_lon: usize) -> Field {
    let s = series();
    let values = Array3::from_shape_fn((s.len(), n_lat, n_lon), |(t, _, _)| s[t]);
    let lats = (0..n_lat).map(|i| -30.0 + 10.0 * i as f64).collect();
    let lons = (0..n_lon).map(|j| 5.0 * j as f64).collect();
    Field::new(values, lats, lons).unwrap()
}

fn config() -> SreConfig {
    SreConfig::new()
        .with_percentiles(PercentileSet::List(vec![5, 50, 95]))
        .with_lengths(3, 12)
}

#[test]
fn uniform_field_gives_identical_cells() {
    let field = uniform_field(3, 4);
    let map = GridMapBuilder::new(config()).unwrap().build(&field).unwrap();
    assert_eq!(map.counts().dim(), (3, 3, 4, 13));
    assert!(map.is_complete());

    for k in 0..3 {
        let reference = map.counts().slice(s![k, 0, 0, ..]).to_owned();
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(map.counts().slice(s![k, i, j, ..]), reference);
            }
        }
    }
}

#[test]
fn uniform_field_matches_point_analysis() {
    let field = uniform_field(2, 2);
    let map = GridMapBuilder::new(config()).unwrap().build(&field).unwrap();
    let out = SreEngine::new(config()).unwrap().run(&series()).unwrap();
    for (p, rec) in out.iter() {
        assert_eq!(
            map.cell(p, 1, 1).unwrap().to_vec(),
            rec.duration_totals().into_vec()
        );
    }
    // The planted spells are found at the upper tail.
    assert!(map.event_map(95).unwrap()[[0, 0]] >= 1);
}

#[test]
fn parallel_and_sequential_agree() {
    let s = series();
    let values = Array3::from_shape_fn((s.len(), 3, 3), |(t, i, j)| s[t] * (1.0 + 0.01 * (i * 3 + j) as f64) + ((t * (i + 1) * (j + 2)) % 17) as f64);
    let field = Field::new(values, vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();

    let par = GridMapBuilder::new(config()).unwrap().with_parallel(true).build(&field).unwrap();
    let seq = GridMapBuilder::new(config()).unwrap().with_parallel(false).build(&field).unwrap();
    assert_eq!(par.counts(), seq.counts());
}

#[test]
fn missing_point_is_isolated() {
    let s = series();
    let values = Array3::from_shape_fn((s.len(), 2, 3), |(t, i, j)| {
        if (i, j) == (1, 2) { f64::NAN } else { s[t] }
    });
    let field = Field::new(values, vec![10.0, 20.0], vec![0.0, 1.0, 2.0]).unwrap();
    let map = GridMapBuilder::new(config()).unwrap().build(&field).unwrap();

    assert_eq!(map.failed().len(), 1);
    let failed = &map.failed()[0];
    assert_eq!((failed.lat_index, failed.lon_index), (1, 2));
    assert_eq!(failed.lat, 20.0);
    assert_eq!(failed.lon, 2.0);

    for &p in map.percentiles() {
        assert!(map.cell(p, 1, 2).unwrap().iter().all(|&c| c == 0));
        assert_eq!(map.cell(p, 0, 0).unwrap(), map.cell(p, 1, 1).unwrap());
    }
}
