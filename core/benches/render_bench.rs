use bmp2hex_core::{EmissionConfig, OutputMode, SourceImage, TableName, encode_header, render};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 800;

fn screen_bitmap() -> Vec<u8> {
    let stride = (WIDTH as usize).div_ceil(8).div_ceil(4) * 4;
    let pixel_len = stride * HEIGHT as usize;
    let mut data = encode_header(WIDTH as i32, HEIGHT as i32, 1, pixel_len as u32).to_vec();
    data.extend((0..pixel_len).map(|i| (i * 31) as u8));
    data
}

fn bench_render(c: &mut Criterion) {
    let data = screen_bitmap();
    let image = SourceImage::parse(&data).unwrap();
    let name = TableName::new("screen");

    let mut group = c.benchmark_group("render");
    for mode in [OutputMode::Raw, OutputMode::Xbm] {
        let config = EmissionConfig::new(mode);
        group.bench_function(mode.label(), |b| {
            b.iter(|| {
                let mut out = String::with_capacity(data.len() * 6);
                render(&mut out, &image, black_box(&data), &name, &config).unwrap();
                out
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
