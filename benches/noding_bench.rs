use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo_topology::graph::{Edge, Label, Location};
use geo_topology::{EdgeNoder, NodingValidator};
use geo_types::LineString;

fn generate_grid(n: usize) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();
    for i in 0..=n {
        // Horizontal
        lines.push(LineString::from(vec![(0.0, i as f64), (n as f64, i as f64)]));
        // Vertical
        lines.push(LineString::from(vec![(i as f64, 0.0), (i as f64, n as f64)]));
    }
    lines
}

fn to_edges(lines: &[LineString<f64>]) -> Vec<Edge> {
    lines
        .iter()
        .map(|ls| Edge::from_line_string(ls.clone(), Label::line(0, Location::Interior)))
        .collect()
}

fn bench_noding(c: &mut Criterion) {
    let mut group = c.benchmark_group("noding");
    group.sample_size(10);

    for size in [5, 10, 20].iter() {
        let lines = generate_grid(*size);

        group.bench_with_input(BenchmarkId::new("node_grid", size), size, |b, _| {
            let noder = EdgeNoder { validate_output: false };
            b.iter(|| noder.node(to_edges(&lines)).unwrap());
        });

        let noded: Vec<LineString<f64>> = EdgeNoder::new()
            .node(to_edges(&lines))
            .unwrap()
            .iter()
            .map(Edge::line_string)
            .collect();
        group.bench_with_input(BenchmarkId::new("validate_grid", size), size, |b, _| {
            b.iter(|| NodingValidator::new(&noded).check_valid().unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_noding);
criterion_main!(benches);
