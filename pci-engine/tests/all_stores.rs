#![allow(unused_macros, dead_code)]
use pci_engine::{CurveStore, DistressType, Point, Severity};
use rstest_reuse::template;
use std::{fs::File, io::BufReader};

// This creates a testing "template" to allow for the injection of each way
// of building a curve store

#[template]
#[rstest]
#[case::programmatic(crate::all_stores::programmatic_store())]
#[case::json(crate::all_stores::json_store())]
pub fn all_stores(#[case] store: CurveStore) -> () {}

// Placeholder curves for illustration only; these are not ASTM data
const DENSITIES: [f64; 7] = [0.0, 1.0, 5.0, 10.0, 20.0, 50.0, 100.0];
const POTHOLE_DENSITIES: [f64; 7] = [0.0, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0];
const TDVS: [f64; 7] = [0.0, 10.0, 20.0, 50.0, 100.0, 150.0, 200.0];

const DEDUCTS: [(DistressType, [[f64; 7]; 3]); 6] = [
    (
        DistressType::AlligatorCracking,
        [
            [0.0, 6.0, 18.0, 26.0, 34.0, 44.0, 52.0],
            [0.0, 12.0, 32.0, 44.0, 56.0, 72.0, 84.0],
            [0.0, 18.0, 42.0, 56.0, 70.0, 88.0, 100.0],
        ],
    ),
    (
        DistressType::BlockCracking,
        [
            [0.0, 2.0, 6.0, 10.0, 15.0, 22.0, 30.0],
            [0.0, 4.0, 12.0, 18.0, 26.0, 38.0, 50.0],
            [0.0, 8.0, 20.0, 30.0, 42.0, 60.0, 78.0],
        ],
    ),
    (
        DistressType::LongitudinalTransverseCracking,
        [
            [0.0, 2.0, 6.0, 10.0, 14.0, 20.0, 28.0],
            [0.0, 5.0, 14.0, 22.0, 32.0, 46.0, 62.0],
            [0.0, 10.0, 26.0, 38.0, 52.0, 72.0, 90.0],
        ],
    ),
    (
        DistressType::Potholes,
        [
            [0.0, 8.0, 18.0, 24.0, 32.0, 42.0, 52.0],
            [0.0, 15.0, 32.0, 42.0, 54.0, 70.0, 84.0],
            [0.0, 22.0, 48.0, 62.0, 78.0, 94.0, 100.0],
        ],
    ),
    (
        DistressType::Rutting,
        [
            [0.0, 4.0, 10.0, 14.0, 20.0, 28.0, 36.0],
            [0.0, 8.0, 20.0, 30.0, 42.0, 58.0, 74.0],
            [0.0, 14.0, 34.0, 48.0, 64.0, 84.0, 98.0],
        ],
    ),
    (
        DistressType::WeatheringRaveling,
        [
            [0.0, 1.0, 3.0, 5.0, 8.0, 14.0, 20.0],
            [0.0, 4.0, 10.0, 16.0, 24.0, 36.0, 50.0],
            [0.0, 8.0, 20.0, 32.0, 46.0, 66.0, 86.0],
        ],
    ),
];

const CDVS: [[f64; 7]; 7] = [
    [0.0, 10.0, 20.0, 50.0, 100.0, 100.0, 100.0],
    [0.0, 8.0, 15.0, 40.0, 72.0, 88.0, 96.0],
    [0.0, 6.0, 12.0, 32.0, 58.0, 76.0, 88.0],
    [0.0, 5.0, 10.0, 26.0, 48.0, 66.0, 80.0],
    [0.0, 4.0, 8.0, 22.0, 42.0, 58.0, 72.0],
    [0.0, 4.0, 7.0, 19.0, 37.0, 52.0, 66.0],
    [0.0, 3.0, 6.0, 17.0, 33.0, 47.0, 60.0],
];

fn points(xs: &[f64; 7], ys: &[f64; 7]) -> Vec<Point> {
    xs.iter()
        .copied()
        .zip(ys.iter().copied())
        .map(Point::from)
        .collect()
}

pub fn programmatic_store() -> CurveStore {
    let mut store = CurveStore::new();
    for (distress, rows) in DEDUCTS {
        let xs = if distress == DistressType::Potholes {
            &POTHOLE_DENSITIES
        } else {
            &DENSITIES
        };
        for (severity, ys) in Severity::ALL.into_iter().zip(rows.iter()) {
            store = store
                .with_deduct_curve(distress, Some(severity), points(xs, ys))
                .unwrap();
        }
    }
    for (idx, ys) in CDVS.iter().enumerate() {
        store = store.with_cdv_curve(idx + 1, points(&TDVS, ys)).unwrap();
    }
    store
}

pub fn json_store() -> CurveStore {
    let file = File::open("tests/fixtures/curves.json").unwrap();
    CurveStore::from_reader(BufReader::new(file)).unwrap()
}
