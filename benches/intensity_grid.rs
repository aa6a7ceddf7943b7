use beamprop::{
    degree, meter, milliwatt, nanometer, BeamProfile, GaussianBeam, GridConfig, LensSystem,
    ThinLens,
};
use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_grid(c: &mut Criterion) {
    let beam = GaussianBeam::new(nanometer!(850.0), milliwatt!(1.5), degree!(4.0)).unwrap();
    let config = GridConfig::default();
    c.bench_function("intensity grid 100x100", |b| {
        b.iter(|| beam.intensity_grid(meter!(0.01), &config))
    });
}

fn criterion_aperture(c: &mut Criterion) {
    let beam = GaussianBeam::new(nanometer!(850.0), milliwatt!(1.5), degree!(4.0)).unwrap();
    let train = LensSystem::new(vec![
        ThinLens::new(meter!(0.1), meter!(0.05)).unwrap(),
        ThinLens::new(meter!(0.3), meter!(0.1)).unwrap(),
    ])
    .unwrap()
    .propagate(&beam)
    .unwrap();
    c.bench_function("aperture power", |b| {
        b.iter(|| train.aperture_power(meter!(0.5), meter!(0.001), meter!(0.001)))
    });
}

criterion_group!(benches, criterion_grid, criterion_aperture);
criterion_main!(benches);
