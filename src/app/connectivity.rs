use crate::mesh::MeshNode;

pub fn derive_edges(nodes: &[MeshNode], connection_range_km: f64) -> Vec<(usize, usize)> {
    if connection_range_km <= 0.0 {
        return Vec::new();
    }

    let range_sq = connection_range_km * connection_range_km;
    let mut edges = Vec::new();

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let dx = nodes[i].position[0] - nodes[j].position[0];
            let dy = nodes[i].position[1] - nodes[j].position[1];
            if (dx * dx) + (dy * dy) <= range_sq {
                edges.push((i, j));
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f64, y: f64) -> MeshNode {
        MeshNode {
            id: id.to_owned(),
            position: [x, y],
            ..MeshNode::default()
        }
    }

    fn id_pairs(nodes: &[MeshNode], edges: &[(usize, usize)]) -> Vec<(String, String)> {
        let mut pairs = edges
            .iter()
            .map(|&(i, j)| {
                let (a, b) = (nodes[i].id.clone(), nodes[j].id.clone());
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect::<Vec<_>>();
        pairs.sort();
        pairs
    }

    #[test]
    fn example_scenario_edge_set() {
        // world 10 km, range 2 km: only A-B is within range (sqrt(2) <= 2).
        let nodes = vec![node("A", 0.0, 0.0), node("B", 1.0, 1.0), node("C", 5.0, 5.0)];
        let edges = derive_edges(&nodes, 2.0);
        assert_eq!(edges, vec![(0, 1)]);
    }

    #[test]
    fn edge_set_is_independent_of_traversal_order() {
        let forward = vec![node("A", 0.0, 0.0), node("B", 1.0, 1.0), node("C", 2.1, 1.9)];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(
            id_pairs(&forward, &derive_edges(&forward, 2.0)),
            id_pairs(&reversed, &derive_edges(&reversed, 2.0))
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let nodes = vec![node("A", 0.0, 0.0), node("B", 2.0, 0.0)];
        assert_eq!(derive_edges(&nodes, 2.0), vec![(0, 1)]);
        assert!(derive_edges(&nodes, 1.999).is_empty());
    }

    #[test]
    fn non_positive_range_yields_no_edges() {
        let nodes = vec![node("A", 0.0, 0.0), node("B", 0.0, 0.0)];
        assert!(derive_edges(&nodes, 0.0).is_empty());
        assert!(derive_edges(&nodes, -1.0).is_empty());
    }

    #[test]
    fn self_pairs_are_excluded() {
        let nodes = vec![node("A", 3.0, 3.0)];
        assert!(derive_edges(&nodes, 5.0).is_empty());
    }

    #[test]
    fn recomputation_is_deterministic() {
        let nodes = vec![node("A", 0.0, 0.0), node("B", 1.0, 0.5), node("C", 1.5, 1.5)];
        assert_eq!(derive_edges(&nodes, 2.0), derive_edges(&nodes, 2.0));
    }
}
