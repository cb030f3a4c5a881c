//! Partition quality metrics

use std::collections::HashMap;

use petgraph::visit::EdgeRef;

use crate::cluster::Partition;
use crate::graph::Adjacency;

/// Directed modularity of a partition (resolution 1)
///
/// `Q = sum_c [ L_c / m - out_c * in_c / m^2 ]` with `m` the total edge
/// weight, `L_c` the weight inside community `c` and `out_c` / `in_c` the
/// weighted out/in degree of its members. Parallel edges each count. A node
/// listed in several communities belongs to the first one. Returns 0.0 for
/// a graph without edge weight.
pub fn modularity(adjacency: &Adjacency, partition: &Partition) -> f64 {
    let total: f64 = adjacency.edge_weights().sum();
    if total == 0.0 {
        return 0.0;
    }

    let mut community_of: HashMap<&str, usize> = HashMap::new();
    for (c, community) in partition.iter().enumerate() {
        for name in community {
            community_of.entry(name.as_str()).or_insert(c);
        }
    }

    let mut internal = vec![0.0f64; partition.len()];
    let mut out_weight = vec![0.0f64; partition.len()];
    let mut in_weight = vec![0.0f64; partition.len()];

    for edge in adjacency.edge_references() {
        let w = *edge.weight();
        let src = community_of.get(adjacency[edge.source()].as_str()).copied();
        let dst = community_of.get(adjacency[edge.target()].as_str()).copied();

        if let Some(c) = src {
            out_weight[c] += w;
        }
        if let Some(c) = dst {
            in_weight[c] += w;
        }
        if let (Some(a), Some(b)) = (src, dst) {
            if a == b {
                internal[a] += w;
            }
        }
    }

    (0..partition.len())
        .map(|c| internal[c] / total - out_weight[c] * in_weight[c] / (total * total))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pairs() -> Adjacency {
        let mut adjacency = Adjacency::new();
        let a = adjacency.add_node("A".into());
        let b = adjacency.add_node("B".into());
        let c = adjacency.add_node("C".into());
        let d = adjacency.add_node("D".into());
        adjacency.add_edge(a, b, 1.0);
        adjacency.add_edge(c, d, 1.0);
        adjacency
    }

    fn groups(raw: &[&[&str]]) -> Partition {
        raw.iter()
            .map(|g| g.iter().map(|n| n.to_string()).collect())
            .collect()
    }

    #[test]
    fn single_community_has_zero_modularity() {
        let q = modularity(&two_pairs(), &groups(&[&["A", "B", "C", "D"]]));
        assert!(q.abs() < 1e-12);
    }

    #[test]
    fn natural_split_scores_half() {
        let q = modularity(&two_pairs(), &groups(&[&["A", "B"], &["C", "D"]]));
        assert!((q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn splitting_a_pair_lowers_modularity() {
        let q = modularity(&two_pairs(), &groups(&[&["A"], &["B"], &["C", "D"]]));
        assert!((q - 0.25).abs() < 1e-12);
    }

    #[test]
    fn edgeless_graph_scores_zero() {
        let mut adjacency = Adjacency::new();
        adjacency.add_node("A".into());
        assert_eq!(modularity(&adjacency, &groups(&[&["A"]])), 0.0);
    }
}
