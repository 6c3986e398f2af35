//! Media-source / word network.
//!
//! A directed bipartite graph: media source nodes point at the words they use
//! most, with the term count as edge weight. Uses `petgraph` for storage and
//! a label index so nodes are deduplicated by their label string.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use wordmap_core::{MediaId, MediaSource, WordSet};

/// Node type, serialized as the `type` attribute in both export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    MediaSource,
    Word,
}

impl NodeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::MediaSource => "media_source",
            NodeKind::Word => "word",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VizColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VizPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Visual hints Gephi reads from the GEXF `viz` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viz {
    pub color: VizColor,
    pub position: VizPosition,
    pub size: u32,
}

/// Styling applied to every word node.
pub const WORD_VIZ: Viz = Viz {
    color: VizColor { r: 77, g: 7, b: 0 },
    position: VizPosition {
        x: 1.0,
        y: 1.0,
        z: 0.0,
    },
    size: 42,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub label: String,
    pub kind: NodeKind,
    pub category: Option<String>,
    pub viz: Option<Viz>,
}

/// Directed source → word graph.
#[derive(Debug, Default)]
pub struct WordNetwork {
    graph: DiGraph<NetworkNode, i64>,
    index: HashMap<String, NodeIndex>,
}

impl WordNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or merge into the existing node with the same label.
    ///
    /// Merging overwrites `kind` and replaces `category`/`viz` only when a new
    /// value is supplied.
    pub fn upsert_node(
        &mut self,
        label: &str,
        kind: NodeKind,
        category: Option<&str>,
        viz: Option<Viz>,
    ) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            let node = &mut self.graph[idx];
            node.kind = kind;
            if let Some(category) = category {
                node.category = Some(category.to_owned());
            }
            if viz.is_some() {
                node.viz = viz;
            }
            return idx;
        }

        let idx = self.graph.add_node(NetworkNode {
            label: label.to_owned(),
            kind,
            category: category.map(str::to_owned),
            viz,
        });
        self.index.insert(label.to_owned(), idx);
        idx
    }

    pub fn add_word(&mut self, term: &str) -> NodeIndex {
        self.upsert_node(term, NodeKind::Word, None, Some(WORD_VIZ))
    }

    pub fn add_media_source(&mut self, name: &str, category: Option<&str>) -> NodeIndex {
        self.upsert_node(name, NodeKind::MediaSource, category, None)
    }

    /// Add `source -> target`, overwriting the weight if the edge exists.
    pub fn set_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: i64) {
        self.graph.update_edge(source, target, weight);
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node(&self, label: &str) -> Option<&NetworkNode> {
        self.index.get(label).map(|&idx| &self.graph[idx])
    }

    #[must_use]
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<i64> {
        let s = *self.index.get(source)?;
        let t = *self.index.get(target)?;
        let edge = self.graph.find_edge(s, t)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Number of edges pointing at `label`.
    #[must_use]
    pub fn in_degree(&self, label: &str) -> usize {
        self.index.get(label).map_or(0, |&idx| {
            self.graph.edges_directed(idx, Direction::Incoming).count()
        })
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NetworkNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// `(source_label, target_label, weight)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, i64)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].label.as_str(),
                self.graph[e.target()].label.as_str(),
                *e.weight(),
            )
        })
    }
}

/// Build the source → word network from cleaned word lists.
///
/// Sources are visited in the order given. A source with no entry in
/// `word_set` is skipped. The source node is only created once it has at
/// least one word; with `media_attributes` supplied, the source's entry (if
/// any) becomes the node's `category`.
#[must_use]
pub fn build_network(
    word_set: &WordSet,
    sources: &[MediaSource],
    media_attributes: Option<&HashMap<MediaId, String>>,
) -> WordNetwork {
    let mut network = WordNetwork::new();

    for source in sources {
        let Some(terms) = word_set.get(source.media_id) else {
            tracing::debug!(
                media_id = source.media_id,
                name = %source.name,
                "skipping media source with no word data"
            );
            continue;
        };

        let category = media_attributes
            .and_then(|attrs| attrs.get(&source.media_id))
            .map(String::as_str);

        for tc in terms {
            let word = network.add_word(&tc.term);
            let media = network.add_media_source(&source.name, category);
            network.set_edge(media, word, tc.count);
        }
    }

    tracing::debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "built word network"
    );
    network
}
