use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rr_core::Grid;
use rr_rectify::decompose;

fn comb_raster(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new_fill(width, height, 1);
    // Interleaved teeth from the top and bottom edges.
    for x in (2..width.saturating_sub(2)).step_by(6) {
        let from_top = (x / 6) % 2 == 0;
        for y in 0..height / 2 {
            let row = if from_top { y } else { height - 1 - y };
            grid.data_mut()[row * width + x] = 0;
        }
    }
    grid
}

fn bench_decompose(c: &mut Criterion) {
    let grid = comb_raster(512, 512);
    let view = grid.as_view();

    c.bench_function("rr_rectify_decompose_512_comb", |b| {
        b.iter(|| {
            let rects = decompose(black_box(&view)).expect("valid raster");
            black_box(rects.len());
        });
    });
}

criterion_group!(benches, bench_decompose);
criterion_main!(benches);
