//! Argument graph: one node per argument, one edge per identity-view attack.
//!
//! Layout is left to the consumer; `render_dot` hands the graph to Graphviz.

use serde::Serialize;

use crate::view_model::{DisplayKind, ViewModel};

const NORMAL_EDGE_COLOR: &str = "#2874A6";
const REVERSE_EDGE_COLOR: &str = "#E74C3C";
const NODE_FILL_COLOR: &str = "#6fb5ff";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    /// `a1`
    pub short: String,
    /// `a1: {a} ⊢ a`
    pub full: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: DisplayKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArgumentGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

fn node_id(id: u64) -> String {
    format!("n{id}")
}

impl ArgumentGraph {
    pub fn from_view(view: &ViewModel) -> Self {
        let mut graph = Self::default();
        let mut seen = std::collections::HashSet::new();

        for row in &view.arguments {
            if !seen.insert(row.id) {
                continue;
            }
            graph.nodes.push(GraphNode {
                id: node_id(row.id),
                short: row.label.clone(),
                full: row.full_label(),
            });
        }

        for (i, attack) in view.identity_attacks.iter().enumerate() {
            if view.argument(attack.attacker).is_none() || view.argument(attack.target).is_none() {
                tracing::debug!(
                    attacker = attack.attacker,
                    target = attack.target,
                    "dropping graph edge with unknown endpoint"
                );
                continue;
            }
            graph.edges.push(GraphEdge {
                id: format!("e{i}"),
                source: node_id(attack.attacker),
                target: node_id(attack.target),
                kind: attack.kind,
            });
        }

        graph
    }
}

pub fn render_dot(graph: &ArgumentGraph) -> String {
    fn dot_escape(s: &str) -> String {
        s.replace('\\', "\\\\").replace('"', "\\\"")
    }

    let mut out = String::new();
    out.push_str("digraph aba {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str(&format!(
        "  node [shape=circle, style=filled, fillcolor=\"{NODE_FILL_COLOR}\", fontname=\"Helvetica\"];\n"
    ));
    out.push_str("  edge [fontname=\"Helvetica\"];\n\n");

    for n in &graph.nodes {
        out.push_str(&format!(
            "  {} [label=\"{}\", tooltip=\"{}\"];\n",
            n.id,
            dot_escape(&n.short),
            dot_escape(&n.full)
        ));
    }
    if !graph.edges.is_empty() {
        out.push('\n');
    }
    for e in &graph.edges {
        let style = match e.kind {
            DisplayKind::Normal => format!("color=\"{NORMAL_EDGE_COLOR}\""),
            DisplayKind::Reverse => format!("color=\"{REVERSE_EDGE_COLOR}\", style=dashed"),
        };
        out.push_str(&format!("  {} -> {} [{style}];\n", e.source, e.target));
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::SolverResponse;
    use crate::view_model::build_view_model;
    use aba_dsl::framework::RunOptions;
    use serde_json::json;

    fn sample_view() -> ViewModel {
        let resp = SolverResponse::from_value(json!({
            "arguments": [
                {"id": 0, "conclusion": "a", "assumptions": ["a"]},
                {"id": 1, "conclusion": "r", "assumptions": ["b", "c"]}
            ],
            "attacks": [
                {"attacker": 1, "target": 0, "kind": "normal"},
                {"attacker": 0, "target": 1, "kind": "reverse"},
                {"attacker": 0, "target": 7, "kind": "normal"}
            ]
        }));
        build_view_model(&resp, &RunOptions::default())
    }

    #[test]
    fn graph_skips_edges_to_unknown_arguments() {
        let graph = ArgumentGraph::from_view(&sample_view());
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.nodes[1].full, "a2: {b, c} ⊢ r");
        assert_eq!(graph.edges[1].kind, DisplayKind::Reverse);
    }

    #[test]
    fn dot_styles_reverse_edges_dashed() {
        let dot = render_dot(&ArgumentGraph::from_view(&sample_view()));
        assert!(dot.starts_with("digraph aba {\n"));
        assert!(dot.contains("n0 [label=\"a1\", tooltip=\"a1: {a} ⊢ a\"];"));
        assert!(dot.contains("n1 -> n0 [color=\"#2874A6\"];"));
        assert!(dot.contains("n0 -> n1 [color=\"#E74C3C\", style=dashed];"));
        assert!(!dot.contains("n7"));
    }
}
