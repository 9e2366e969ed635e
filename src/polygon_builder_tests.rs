#[cfg(test)]
mod tests {
    use crate::error::TopologyError;
    use crate::graph::{Label, Location, PlanarGraph};
    use crate::polygon_builder::PolygonBuilder;
    use approx::assert_relative_eq;
    use geo::Area;
    use geo_types::{Coord, LineString};

    fn area() -> Label {
        Label::area(0, Location::Boundary, Location::Exterior, Location::Interior)
    }

    /// Adds each segment of `coords` as an edge whose forward direction is in the result.
    fn add_result_ring(graph: &mut PlanarGraph, coords: &[(f64, f64)]) {
        for w in coords.windows(2) {
            let e = graph.add_line_string(LineString::from(vec![w[0], w[1]]), area());
            let de = graph.directed_edge_of(e, true);
            graph.set_in_result(de, true);
        }
    }

    fn square_cw(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(f64, f64)> {
        vec![(x0, y0), (x0, y1), (x1, y1), (x1, y0), (x0, y0)]
    }

    fn square_ccw(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(f64, f64)> {
        vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]
    }

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn test_square_with_hole() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 10.0, 10.0));
        add_result_ring(&mut graph, &square_ccw(2.0, 2.0, 8.0, 8.0));

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        let polygons = builder.polygons();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].interiors().len(), 1);
        assert_eq!(polygons[0].interiors()[0], LineString::from(square_ccw(2.0, 2.0, 8.0, 8.0)));
        assert_relative_eq!(polygons[0].unsigned_area(), 64.0);

        assert!(builder.contains_point(c(1.0, 1.0)));
        assert!(!builder.contains_point(c(5.0, 5.0)));
        assert!(!builder.contains_point(c(20.0, 5.0)));
    }

    #[test]
    fn test_two_disjoint_shells() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 10.0, 10.0));
        add_result_ring(&mut graph, &square_cw(20.0, 0.0, 30.0, 10.0));

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        let polygons = builder.polygons();
        assert_eq!(polygons.len(), 2);
        assert!(polygons.iter().all(|p| p.interiors().is_empty()));
        assert!(builder.contains_point(c(25.0, 5.0)));
        assert!(!builder.contains_point(c(15.0, 5.0)));
    }

    #[test]
    fn test_hole_goes_to_innermost_shell() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 100.0, 100.0));
        add_result_ring(&mut graph, &square_cw(10.0, 10.0, 50.0, 50.0));
        add_result_ring(&mut graph, &square_ccw(20.0, 20.0, 30.0, 30.0));

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        // Rings are numbered in directed edge order: outer, inner, hole
        assert_eq!(builder.ring(2).shell(), Some(1));
        assert!(builder.ring(0).holes().is_empty());
        assert_eq!(builder.ring(1).holes(), &[2]);

        let polygons = builder.polygons();
        assert_eq!(polygons.len(), 2);
        let inner = polygons.iter().find(|p| p.interiors().len() == 1).unwrap();
        assert_relative_eq!(inner.unsigned_area(), 1500.0);
    }

    #[test]
    fn test_hole_in_notch_of_non_convex_shell() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 100.0, 100.0));
        // U-shaped shell whose envelope covers the hole but whose interior does not
        add_result_ring(
            &mut graph,
            &[
                (10.0, 10.0),
                (10.0, 40.0),
                (20.0, 40.0),
                (20.0, 20.0),
                (30.0, 20.0),
                (30.0, 40.0),
                (40.0, 40.0),
                (40.0, 10.0),
                (10.0, 10.0),
            ],
        );
        add_result_ring(&mut graph, &square_ccw(22.0, 25.0, 28.0, 35.0));

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        assert_eq!(builder.ring(2).shell(), Some(0));
    }

    #[test]
    fn test_hole_touching_shell_is_split_off() {
        let mut graph = PlanarGraph::new();
        add_result_ring(
            &mut graph,
            &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (5.0, 0.0), (0.0, 0.0)],
        );
        add_result_ring(&mut graph, &[(5.0, 0.0), (8.0, 4.0), (2.0, 4.0), (5.0, 0.0)]);

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        // One maximal ring plus its two minimal rings
        assert_eq!(builder.rings().len(), 3);
        assert_eq!(builder.ring(0).max_node_degree(), Some(4));

        let polygons = builder.polygons();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].interiors().len(), 1);
        assert_eq!(polygons[0].interiors()[0].0.len(), 4);
        assert_relative_eq!(polygons[0].unsigned_area(), 100.0 - 12.0);

        assert!(builder.contains_point(c(1.0, 1.0)));
        assert!(!builder.contains_point(c(5.0, 2.0)));
    }

    #[test]
    fn test_figure_eight_of_holes_is_unassignable() {
        let mut graph = PlanarGraph::new();
        add_result_ring(
            &mut graph,
            &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0), (10.0, 10.0), (5.0, 5.0), (0.0, 10.0), (0.0, 0.0)],
        );

        let mut builder = PolygonBuilder::new();
        let err = builder.add_graph(&mut graph).unwrap_err();
        assert!(matches!(err, TopologyError::UnassignableHole { .. }), "got {:?}", err);
    }

    #[test]
    fn test_lone_hole_is_unassignable() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_ccw(0.0, 0.0, 10.0, 10.0));

        let mut builder = PolygonBuilder::new();
        let err = builder.add_graph(&mut graph).unwrap_err();
        assert_eq!(err, TopologyError::UnassignableHole { coordinate: c(0.0, 0.0) });
    }

    #[test]
    fn test_two_shells_in_one_set_is_ambiguous() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 10.0, 10.0));
        add_result_ring(&mut graph, &square_cw(20.0, 0.0, 30.0, 10.0));

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();

        let err = builder.find_shell(&[0, 1]).unwrap_err();
        assert_eq!(err, TopologyError::AmbiguousShellSet { coordinate: c(20.0, 0.0) });
        assert_eq!(builder.find_shell(&[1]).unwrap(), Some(1));
    }

    #[test]
    fn test_line_edges_are_ignored() {
        let mut graph = PlanarGraph::new();
        add_result_ring(&mut graph, &square_cw(0.0, 0.0, 10.0, 10.0));
        let e = graph.add_line_string(
            LineString::from(vec![(20.0, 0.0), (30.0, 0.0)]),
            Label::line(0, Location::Interior),
        );
        let de = graph.directed_edge_of(e, true);
        graph.set_in_result(de, true);

        let mut builder = PolygonBuilder::new();
        builder.add_graph(&mut graph).unwrap();
        assert_eq!(builder.polygons().len(), 1);
        assert!(!graph.edges[e].in_result);
    }
}
