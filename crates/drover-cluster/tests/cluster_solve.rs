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

use drover_bnb::sequential::SequentialSolver;
use drover_cluster::cluster::Cluster;
use drover_model::{
    generate::{example_graph, random_graph},
    graph::{Graph, GraphBuilder},
    index::NodeIndex,
};
use rand::{SeedableRng, rngs::StdRng};

fn ni(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

/// Minimum closed-tour distance over every permutation of `1..n`.
fn brute_force(graph: &Graph<i64>) -> Option<i64> {
    fn visit(
        graph: &Graph<i64>,
        last: usize,
        used: &mut [bool],
        depth: usize,
        dist: i64,
    ) -> Option<i64> {
        let n = graph.num_nodes();
        if depth == n {
            return graph.closing_weight(ni(last)).map(|w| dist + w);
        }
        let mut best: Option<i64> = None;
        for next in 1..n {
            if used[next] {
                continue;
            }
            let Some(w) = graph.edge(ni(last), ni(next)) else {
                continue;
            };
            used[next] = true;
            if let Some(total) = visit(graph, next, used, depth + 1, dist + w) {
                best = Some(best.map_or(total, |b| b.min(total)));
            }
            used[next] = false;
        }
        best
    }

    let mut used = vec![false; graph.num_nodes()];
    used[0] = true;
    visit(graph, 0, &mut used, 1, 0)
}

/// Sum of the edges along a closed tour, or `None` if an edge is missing.
fn tour_weight(graph: &Graph<i64>, nodes: &[NodeIndex]) -> Option<i64> {
    if graph.num_nodes() == 1 {
        return Some(0);
    }
    nodes
        .windows(2)
        .map(|pair| graph.edge(pair[0], pair[1]))
        .sum()
}

fn solve(graph: &Graph<i64>, workers: usize, prune: bool) -> Option<i64> {
    let outcome = Cluster::builder()
        .with_workers(workers)
        .with_pruning(prune)
        .build()
        .expect("at least one worker")
        .solve(graph)
        .expect("cluster run succeeds");

    if let Some(tour) = outcome.result.tour() {
        assert!(tour.is_closed(), "result {} is not closed", tour);
        assert_eq!(tour_weight(graph, tour.nodes()), Some(tour.dist()));
    }
    assert_eq!(outcome.manager.terminations_sent, workers as u64);
    outcome.result.distance()
}

#[test]
fn test_example_graph_optimum() {
    let outcome = Cluster::builder()
        .build()
        .unwrap()
        .solve(&example_graph())
        .unwrap();
    let tour = outcome.result.tour().expect("example has a tour");
    assert_eq!(tour.nodes(), &[ni(0), ni(3), ni(1), ni(2), ni(0)]);
    assert_eq!(tour.dist(), 15);
    assert_eq!(brute_force(&example_graph()), Some(15));
}

#[test]
fn test_single_node() {
    let graph = GraphBuilder::<i64>::new(1).build();
    for workers in [1, 3] {
        let outcome = Cluster::builder()
            .with_workers(workers)
            .build()
            .unwrap()
            .solve(&graph)
            .unwrap();
        let tour = outcome.result.tour().expect("trivial tour");
        assert_eq!(tour.nodes(), &[ni(0), ni(0)]);
        assert_eq!(tour.dist(), 0);
    }
}

#[test]
fn test_no_edge_into_origin() {
    let mut b = GraphBuilder::<i64>::new(5);
    for from in 0..5 {
        for to in 1..5 {
            if from != to {
                b.set_edge(ni(from), ni(to), (from * 5 + to) as i64);
            }
        }
    }
    let graph = b.build();
    for workers in [1, 2, 4] {
        assert_eq!(solve(&graph, workers, true), None);
        assert_eq!(solve(&graph, workers, false), None);
    }
}

#[test]
fn test_matches_brute_force_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for round in 0..24 {
        let n = 2 + round % 7;
        let population = [40u8, 70, 100][round % 3];
        let graph = random_graph(n, population, &mut rng);
        let expected = brute_force(&graph);

        for workers in [1, 3] {
            assert_eq!(
                solve(&graph, workers, true),
                expected,
                "round {} (n = {}, workers = {})",
                round,
                n,
                workers
            );
        }
    }
}

#[test]
fn test_pruning_does_not_change_the_optimum() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..8 {
        let graph = random_graph(7, 80, &mut rng);
        assert_eq!(solve(&graph, 2, true), solve(&graph, 2, false));
    }
}

#[test]
fn test_worker_count_does_not_change_the_optimum() {
    let mut rng = StdRng::seed_from_u64(23);
    let graph = random_graph(8, 75, &mut rng);
    let expected = brute_force(&graph);
    for workers in 1..=6 {
        assert_eq!(solve(&graph, workers, true), expected, "workers = {}", workers);
    }
}

#[test]
fn test_repeated_runs_agree() {
    let mut rng = StdRng::seed_from_u64(99);
    let graph = random_graph(8, 90, &mut rng);
    let first = solve(&graph, 3, true);
    for _ in 0..5 {
        assert_eq!(solve(&graph, 3, true), first);
    }
}

#[test]
fn test_agrees_with_sequential_solver() {
    let mut rng = StdRng::seed_from_u64(314);
    for _ in 0..6 {
        let graph = random_graph(8, 60, &mut rng);
        let sequential = SequentialSolver::new()
            .solve(&graph)
            .expect("stack is sized for the graph");
        assert_eq!(solve(&graph, 4, true), sequential.result.distance());
    }
}
