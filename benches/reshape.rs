use std::collections::HashMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use epi_reshape::merge::get_merged_country_data;
use epi_reshape::reshape::{transform_df, ReshapeOptions};
use epi_reshape::types::{DataSet, DataType, Field, Schema, Value};

const COUNTRIES: usize = 190;
const REGIONS_PER_COUNTRY: usize = 3;
const DAYS: usize = 365;

fn day_label(i: usize) -> String {
    let d = chrono::NaiveDate::from_ymd_opt(2020, 1, 22).unwrap() + chrono::Days::new(i as u64);
    d.format("%-m/%-d/%y").to_string()
}

fn wide_table() -> DataSet {
    let mut fields = vec![
        Field::new("Province/State", DataType::Utf8),
        Field::new("Country/Region", DataType::Utf8),
        Field::new("Lat", DataType::Float64),
        Field::new("Long", DataType::Float64),
    ];
    fields.extend((0..DAYS).map(|i| Field::new(day_label(i), DataType::Int64)));

    let mut rows = Vec::with_capacity(COUNTRIES * REGIONS_PER_COUNTRY);
    for c in 0..COUNTRIES {
        for r in 0..REGIONS_PER_COUNTRY {
            let mut row = vec![
                Value::utf8(format!("region-{r}")),
                Value::utf8(format!("country-{c}")),
                Value::Float64(0.0),
                Value::Float64(0.0),
            ];
            row.extend((0..DAYS).map(|d| Value::Int64((d * (r + 1)) as i64)));
            rows.push(row);
        }
    }
    DataSet::new(Schema::new(fields), rows)
}

fn bench_transform_df(c: &mut Criterion) {
    let wide = wide_table();
    let opts = ReshapeOptions::default();
    c.bench_function("transform_df/190x365", |b| {
        b.iter(|| transform_df(black_box(&wide), black_box(&opts)).unwrap())
    });
}

fn bench_merge(c: &mut Criterion) {
    let tidy = transform_df(&wide_table(), &ReshapeOptions::default()).unwrap();
    let datasets = HashMap::from([
        ("confirmed".to_string(), tidy.clone()),
        ("deaths".to_string(), tidy.clone()),
        ("recovered".to_string(), tidy),
    ]);
    c.bench_function("get_merged_country_data/365", |b| {
        b.iter(|| get_merged_country_data(black_box("country-42"), black_box(&datasets)).unwrap())
    });
}

criterion_group!(benches, bench_transform_df, bench_merge);
criterion_main!(benches);
