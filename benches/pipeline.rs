use bangalore_homeprice::{
    dataset::RawRecord,
    model::{Fitted, LinearModel, LinearParams},
    preprocessing::CleaningPipeline,
    Predictor, Trainer,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;

/// Synthetic listings: `n_locations` areas with `per_location` rows each.
fn synthetic_records(n_locations: usize, per_location: usize) -> Vec<RawRecord> {
    let mut rows = Vec::with_capacity(n_locations * per_location);
    for l in 0..n_locations {
        let base_pps = 4000.0 + 150.0 * l as f64;
        for i in 0..per_location {
            let bhk = 1 + i % 4;
            let sqft = 450.0 * bhk as f64 + 13.0 * (i % 17) as f64;
            let pps = base_pps * (1.0 + 0.01 * ((i * 7) % 11) as f64 - 0.05);
            let price = pps * sqft / 100_000.0;
            rows.push(RawRecord::new(
                &format!("Location {l}"),
                &format!("{bhk} BHK"),
                &format!("{sqft}"),
                &format!("{}", bhk.max(2) - 1),
                &format!("{price:.2}"),
            ));
        }
    }
    rows
}

fn bench_cleaning(c: &mut Criterion) {
    for n_locations in [20usize, 200].iter() {
        let raw = synthetic_records(*n_locations, 50);
        c.bench_with_input(
            BenchmarkId::new("clean_and_encode", raw.len()),
            &raw,
            |b, raw| {
                let pipeline = CleaningPipeline::default();
                b.iter(|| black_box(pipeline.run(black_box(raw)).expect("pipeline")));
            },
        );
    }
}

fn bench_fit(c: &mut Criterion) {
    let raw = synthetic_records(100, 50);
    let cleaned = CleaningPipeline::default().run(&raw).expect("pipeline");
    let trainer = Trainer::builder().build().expect("trainer");

    c.bench_function("fit_holdout", |b| {
        b.iter(|| black_box(trainer.fit(black_box(&cleaned.matrix)).expect("fit")));
    });
}

fn bench_estimate(c: &mut Criterion) {
    let n_locations = 240;
    let mut columns: Vec<String> = vec!["total_sqft".into(), "bath".into(), "bhk".into()];
    columns.extend((0..n_locations).map(|l| format!("location {l}")));
    let model = LinearModel::<Fitted>::new(LinearParams {
        coefficients: Array1::from_shape_fn(columns.len(), |j| j as f64 * 0.01),
        intercept: 12.0,
    });
    let predictor = Predictor::from_parts(model, &columns);

    c.bench_function("estimate", |b| {
        b.iter(|| {
            let price = predictor.estimate(black_box("LOCATION 117"), 1250.0, 2, 3);
            black_box(price)
        });
    });
}

criterion_group!(benches, bench_cleaning, bench_fit, bench_estimate);
criterion_main!(benches);
