use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use isp_stages_rs::image_pipeline::{
    BayerPattern, ColorStandard, RawImageData, RgbConversion, RgbConversionConfig, SensorInfo,
    WhiteBalance, WhiteBalanceConfig, YuvImageData,
};

fn generate_mock_raw_data(width: usize, height: usize) -> RawImageData {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) % 4096) as u16))
        .collect();
    RawImageData::new(width, height, data, 12)
}

fn generate_mock_yuv_data(width: usize, height: usize) -> YuvImageData {
    let data = (0..width * height * 3).map(|i| (i % 256) as u8).collect();
    YuvImageData::new(width, height, data).expect("valid mock frame")
}

const SIZES: [(usize, usize, &str); 3] = [
    (100, 100, "100x100"),
    (500, 500, "500x500"),
    (1000, 1000, "1000x1000"),
];

fn benchmark_white_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("white_balance_by_size");

    let config = WhiteBalanceConfig::builder().r_gain(1.94).b_gain(1.52).build();
    let sensor = SensorInfo::with_pattern(12, BayerPattern::Rggb).expect("valid sensor");
    let stage = WhiteBalance::new(config, sensor);

    for (width, height, label) in SIZES {
        let raw = generate_mock_raw_data(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &raw, |b, raw| {
            b.iter(|| stage.apply_wb_parameters(black_box(raw)));
        });
    }

    group.finish();
}

fn benchmark_rgb_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb_conversion_by_standard");
    let yuv = generate_mock_yuv_data(500, 500);

    for (standard, label) in [(ColorStandard::Bt709, "bt709"), (ColorStandard::Bt601, "bt601")] {
        let stage = RgbConversion::new(RgbConversionConfig::builder().color_standard(standard).build());
        group.bench_with_input(BenchmarkId::from_parameter(label), &yuv, |b, yuv| {
            b.iter(|| stage.yuv_to_rgb(black_box(yuv)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_white_balance, benchmark_rgb_conversion);
criterion_main!(benches);
