//! Benchmarks for circuit construction and layering
//!
//! Run with: cargo bench -p qlayer-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qlayer_ir::{Circuit, Gate, Layering, library};

/// Brick-wall circuit: alternating single-qubit and nearest-neighbour layers.
fn brick_wall(num_qubits: usize, rounds: usize) -> Vec<Gate> {
    let mut gates = Vec::new();
    for round in 0..rounds {
        for q in 0..num_qubits {
            gates.push(Gate::single("h", q, library::h()).unwrap());
        }
        let offset = round % 2;
        for q in (offset..num_qubits.saturating_sub(1)).step_by(2) {
            gates.push(Gate::pair("cz", q, q + 1, library::cz()).unwrap());
        }
    }
    gates
}

/// Benchmark appending gates (incremental layering)
fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_append");

    for num_qubits in &[5, 20, 50] {
        let gates = brick_wall(*num_qubits, 20);
        group.bench_with_input(
            BenchmarkId::new("brick_wall", num_qubits),
            &gates,
            |b, gates| {
                b.iter(|| Circuit::from_gates(black_box(gates).iter().cloned()));
            },
        );
    }

    group.finish();
}

/// Benchmark recomputing a layering from scratch
fn bench_layering(c: &mut Criterion) {
    let mut group = c.benchmark_group("layering");

    for rounds in &[10, 100, 1000] {
        let gates = brick_wall(16, *rounds);
        group.bench_with_input(BenchmarkId::new("from_gates", rounds), &gates, |b, gates| {
            b.iter(|| Layering::from_gates(black_box(gates)).depth());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_layering);
criterion_main!(benches);
