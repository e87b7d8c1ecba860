use criterion::{criterion_group, criterion_main, Criterion};
use eobands::{build_registry, BandArrays, IndexParams, Raster, SpectralBand};
use ndarray::Array2;

const SIZE: (usize, usize) = (1024, 1024);

fn band_arrays() -> BandArrays {
    [
        SpectralBand::Blue,
        SpectralBand::Green,
        SpectralBand::Red,
        SpectralBand::Nir,
        SpectralBand::Swir1,
        SpectralBand::Swir2,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, band)| {
        let values = Array2::from_shape_fn(SIZE, |(row, col)| {
            ((row * SIZE.1 + col + i * 7919) % 10_000) as f64 / 10_000.
        });
        (band, Raster::new(band.to_string(), values))
    })
    .collect()
}

fn bench_library_index(c: &mut Criterion) {
    let registry = build_registry().unwrap();
    let arrays = band_arrays();
    let params = IndexParams::new();
    c.bench_function("compute_ndvi", |b| {
        b.iter(|| registry.compute("NDVI", &arrays, &params))
    });
    c.bench_function("compute_evi", |b| {
        b.iter(|| registry.compute("EVI", &arrays, &params))
    });
}

fn bench_custom_index(c: &mut Criterion) {
    let registry = build_registry().unwrap();
    let arrays = band_arrays();
    let params = IndexParams::new();
    c.bench_function("compute_tcbri", |b| {
        b.iter(|| registry.compute("TCBRI", &arrays, &params))
    });
}

fn bench_compute_many(c: &mut Criterion) {
    let registry = build_registry().unwrap();
    let arrays = band_arrays();
    let params = IndexParams::new();
    let names = ["NDVI", "NDWI", "NBR", "SAVI", "TCBRI", "TCWET"];
    c.bench_function("compute_many", |b| {
        b.iter(|| registry.compute_many(&names, &arrays, &params))
    });
}

criterion_group!(benches, bench_library_index, bench_custom_index, bench_compute_many);
criterion_main!(benches);
