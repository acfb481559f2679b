// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use drover_bnb::engine::SearchEngine;
use drover_bnb::expand::Pruning;
use drover_bnb::incumbent::LocalIncumbent;
use drover_bnb::monitor::no_op::NoOpMonitor;
use drover_model::generate::seeded_random_graph;
use drover_model::tour::PartialTour;
use std::hint::black_box;

const SIZES: [usize; 4] = [6, 8, 9, 10];
const POPULATION: u8 = 80;
const SEED: u64 = 7;

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_benchmark");
    group.sample_size(20);

    for &n in SIZES.iter() {
        let graph = seeded_random_graph(n, POPULATION, SEED);
        group.throughput(Throughput::Elements(n as u64));

        for (label, pruning) in [("prune", Pruning::Enabled), ("no_prune", Pruning::Disabled)] {
            if !pruning.is_enabled() && n > 9 {
                continue;
            }
            let mut engine = SearchEngine::preallocated(n, pruning);
            group.bench_with_input(BenchmarkId::new(label, n), &graph, |b, graph| {
                b.iter(|| {
                    let mut store = LocalIncumbent::new();
                    let outcome = engine
                        .solve(
                            graph,
                            PartialTour::root(graph.num_nodes()),
                            i64::MAX,
                            &mut store,
                            &mut NoOpMonitor,
                        )
                        .expect("stack is sized for the graph");
                    black_box(outcome.bound)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
