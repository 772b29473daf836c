use super::*;

parameterized_test! {can_build_ring, (num_vertices, expected_edges), {
    let ring = Ring::new(num_vertices);

    assert_eq!(ring.num_vertices(), num_vertices);
    assert_eq!(ring.edges(), expected_edges);
}}

can_build_ring! {
    case01_empty: (0, Vec::<(usize, usize)>::new()),
    case02_single: (1, Vec::<(usize, usize)>::new()),
    case03_two: (2, vec![(0, 1), (1, 0)]),
    case04_three: (3, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]),
    case05_four: (4, vec![(0, 1), (0, 3), (1, 0), (1, 2), (2, 1), (2, 3), (3, 0), (3, 2)]),
}

parameterized_test! {can_build_one_way_ring, (num_vertices, expected_edges), {
    let ring = OneWayRing::new(num_vertices);

    assert_eq!(ring.num_vertices(), num_vertices);
    assert_eq!(ring.edges(), expected_edges);
}}

can_build_one_way_ring! {
    case01_single: (1, Vec::<(usize, usize)>::new()),
    case02_two: (2, vec![(0, 1), (1, 0)]),
    case03_three: (3, vec![(0, 1), (1, 2), (2, 0)]),
    case04_four: (4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]),
}

#[test]
fn can_get_inverse_neighbors_of_one_way_ring() {
    let ring = OneWayRing::new(4);

    assert_eq!(ring.get_inv_neighbors(0), Ok(vec![3]));
    assert_eq!(ring.get_inv_neighbors(2), Ok(vec![1]));
}

#[test]
fn can_fail_on_unknown_vertex() {
    let ring = Ring::new(2);

    assert_eq!(ring.get_neighbors(2).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert!(!ring.are_adjacent(5, 0));
}

#[test]
fn can_display_ring() {
    let ring = Ring::new(2);

    let text = ring.to_string();

    assert!(text.contains("Topology type: Ring"));
    assert!(text.contains("Number of edges: 2"));
    assert!(text.contains("0 -> [1]"));
}
