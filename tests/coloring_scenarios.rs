//! End-to-end coloring scenarios through the batsat backend

use colorsat::graph::Graph;
use colorsat::solver::{Options, Solver};
use colorsat::ColoringError;

fn triangle() -> Graph<&'static str> {
    Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C")]).expect("triangle has no self-loops")
}

#[test]
fn test_triangle_two_colors_unsat() {
    let solver = Solver::new(Options::default());
    let solution = solver.solve(&triangle(), 2).expect("solve failed");

    assert!(solution.is_unsat(), "a triangle is not 2-colorable");
}

#[test]
fn test_triangle_three_colors_sat() {
    let graph = triangle();
    let solver = Solver::new(Options::default());
    let solution = solver.solve(&graph, 3).expect("solve failed");

    let coloring = solution.coloring().expect("a triangle is 3-colorable");
    let a = coloring.color_of(&"A").unwrap();
    let b = coloring.color_of(&"B").unwrap();
    let c = coloring.color_of(&"C").unwrap();

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
    assert!(a < 3 && b < 3 && c < 3);
}

#[test]
fn test_single_edge_one_color_unsat() {
    let graph = Graph::from_edges([("A", "B")]).unwrap();
    let solution = Solver::default().solve(&graph, 1).expect("solve failed");

    assert!(solution.is_unsat());
}

#[test]
fn test_single_edge_two_colors_sat() {
    let graph = Graph::from_edges([("A", "B")]).unwrap();
    let solution = Solver::default().solve(&graph, 2).expect("solve failed");

    let coloring = solution.coloring().expect("an edge is 2-colorable");
    assert_ne!(coloring.color_of(&"A"), coloring.color_of(&"B"));
    assert_eq!(coloring.len(), 2);
}

#[test]
fn test_empty_graph_any_palette() {
    let graph: Graph<&str> = Graph::new();
    for colors in 0..5 {
        let solution = Solver::default().solve(&graph, colors).expect("solve failed");
        assert!(solution.is_sat(), "empty graph with {colors} colors");
        assert!(solution.coloring().unwrap().is_empty());
        assert_eq!(solution.statistics().num_clauses(), 0);
    }
}

#[test]
fn test_zero_colors_rejected() {
    let graph = Graph::from_edges([("A", "B")]).unwrap();
    let err = Solver::default().solve(&graph, 0).unwrap_err();

    assert_eq!(err, ColoringError::InvalidPalette { colors: 0, nodes: 2 });
}

#[test]
fn test_isolated_nodes_colored() {
    let mut graph = Graph::from_edges([("A", "B")]).unwrap();
    graph.add_node("lonely");

    let solution = Solver::default().solve(&graph, 2).unwrap();
    let coloring = solution.coloring().unwrap();

    assert_eq!(coloring.len(), 3);
    assert!(coloring.color_of(&"lonely").is_some());
    assert!(coloring.is_proper(&graph));
}

#[test]
fn test_petersen_graph() {
    // Outer 5-cycle 0..5, inner pentagram 5..10, spokes i -- i+5
    let mut edges = Vec::new();
    for i in 0..5u32 {
        edges.push((i, (i + 1) % 5));
        edges.push((i + 5, (i + 2) % 5 + 5));
        edges.push((i, i + 5));
    }
    let graph = Graph::from_edges(edges).unwrap();
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 15);

    let solver = Solver::default();
    assert!(solver.solve(&graph, 2).unwrap().is_unsat());

    let solution = solver.solve(&graph, 3).unwrap();
    assert!(solution.coloring().unwrap().is_proper(&graph));

    let (chromatic, _) = solver.chromatic_number(&graph, 10).unwrap().unwrap();
    assert_eq!(chromatic, 3);
}

#[test]
fn test_complete_graph_chromatic_number() {
    for n in 1..7u32 {
        let mut graph = Graph::new();
        graph.add_node(0);
        for u in 0..n {
            for v in (u + 1)..n {
                graph.add_edge(u, v).unwrap();
            }
        }

        let (chromatic, coloring) = Solver::default()
            .chromatic_number(&graph, n as usize)
            .unwrap()
            .expect("K_n is n-colorable");
        assert_eq!(chromatic, n as usize, "chromatic number of K_{n}");
        assert_eq!(coloring.num_colors_used(), n as usize);
    }
}

#[test]
fn test_odd_cycle_symmetry_breaking() {
    let edges: Vec<(u32, u32)> = (0..7).map(|i| (i, (i + 1) % 7)).collect();
    let graph = Graph::from_edges(edges).unwrap();

    let options = Options {
        symmetry_breaking: true,
        ..Options::default()
    };
    let solver = Solver::new(options);

    assert!(solver.solve(&graph, 2).unwrap().is_unsat());

    let solution = solver.solve(&graph, 3).unwrap();
    let coloring = solution.coloring().unwrap();
    assert_eq!(coloring.color_of(&0), Some(0));
    assert!(coloring.is_proper(&graph));
}

#[test]
fn test_self_loop_rejected_before_encoding() {
    let err = Graph::from_edges([("A", "B"), ("C", "C")]).unwrap_err();
    assert_eq!(err, ColoringError::SelfLoop("\"C\"".to_string()));
}
