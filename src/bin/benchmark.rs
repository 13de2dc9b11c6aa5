//! Step throughput: serial vs rayon, across grid sizes

use std::time::Instant;
use toroidal_life::Grid;

fn benchmark(size: usize, iterations: u32, step: fn(&Grid) -> Grid) -> f64 {
    let mut grid = Grid::random(size, size);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = step(&grid);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Toroidal Life Step Benchmark ===\n");

    let sizes = [50, 100, 200, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(size, iterations, Grid::step);
        let parallel_ms = benchmark(size, iterations, Grid::step_parallel);

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    let size = 2000;
    let cells = (size * size) as f64;
    let parallel_ms = benchmark(size, iterations, Grid::step_parallel);
    println!(
        "\nParallel at {}x{}: {:.2} ms/gen, {:.1}M cells/sec",
        size,
        size,
        parallel_ms,
        cells / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
