//! D3 force-graph node-link JSON, in the shape networkx's `node_link_data`
//! produces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::with_suffix;
use crate::error::NetworkError;
use crate::graph::{NodeKind, Viz, WordNetwork};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct D3Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viz: Option<Viz>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct D3Link {
    pub source: String,
    pub target: String,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct D3Graph {
    pub directed: bool,
    pub multigraph: bool,
    #[serde(default)]
    pub graph: Map<String, Value>,
    pub nodes: Vec<D3Node>,
    pub links: Vec<D3Link>,
}

#[must_use]
pub fn to_d3(network: &WordNetwork) -> D3Graph {
    D3Graph {
        directed: true,
        multigraph: false,
        graph: Map::new(),
        nodes: network
            .nodes()
            .map(|n| D3Node {
                id: n.label.clone(),
                kind: n.kind,
                category: n.category.clone(),
                viz: n.viz,
            })
            .collect(),
        links: network
            .edges()
            .map(|(source, target, weight)| D3Link {
                source: source.to_owned(),
                target: target.to_owned(),
                weight,
            })
            .collect(),
    }
}

/// Write the network to `<base>.json`, returning the path written.
///
/// # Errors
///
/// Returns [`NetworkError::Json`] if serialization fails or
/// [`NetworkError::Io`] if the file cannot be written.
pub fn write_d3(network: &WordNetwork, base: &Path) -> Result<PathBuf, NetworkError> {
    let path = with_suffix(base, ".json");
    tracing::debug!(
        nodes = network.node_count(),
        path = %path.display(),
        "writing D3 JSON graph"
    );
    let body = serde_json::to_vec(&to_d3(network)).map_err(|source| NetworkError::Json {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(&path, body).map_err(|e| NetworkError::io(&path, e))?;
    Ok(path)
}

/// Read a node-link document back from `path`.
///
/// # Errors
///
/// Returns [`NetworkError::Io`] or [`NetworkError::Json`].
pub fn read_d3(path: &Path) -> Result<D3Graph, NetworkError> {
    let body = std::fs::read(path).map_err(|e| NetworkError::io(path, e))?;
    serde_json::from_slice(&body).map_err(|source| NetworkError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use wordmap_core::{MediaSource, TermCount, WordSet};

    use super::*;
    use crate::graph::build_network;

    fn sample_network() -> WordNetwork {
        let sources = vec![MediaSource::new(1, "A")];
        let word_set: WordSet = vec![(1, vec![TermCount::new("x", 5), TermCount::new("y", 2)])]
            .into_iter()
            .collect();
        build_network(&word_set, &sources, None)
    }

    #[test]
    fn node_link_document_has_expected_shape() {
        let value = serde_json::to_value(to_d3(&sample_network())).unwrap();

        assert_eq!(value["directed"], Value::Bool(true));
        assert_eq!(value["multigraph"], Value::Bool(false));
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["links"].as_array().map(Vec::len), Some(2));

        let word = &value["nodes"][0];
        assert_eq!(word["id"], "x");
        assert_eq!(word["type"], "word");
        assert_eq!(word["viz"]["color"]["r"], 77);
        assert_eq!(word["viz"]["size"], 42);
        assert!(word["viz"]["size"].is_u64());

        let source = &value["nodes"][1];
        assert_eq!(source["type"], "media_source");
        assert!(source.get("viz").is_none());
        assert!(source.get("category").is_none());

        assert_eq!(value["links"][0]["source"], "A");
        assert_eq!(value["links"][0]["target"], "x");
        assert_eq!(value["links"][0]["weight"], 5);
    }

    #[test]
    fn write_then_read_preserves_counts_and_weights() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("wordmap");
        let network = sample_network();

        let path = write_d3(&network, &base).unwrap();
        assert_eq!(path, dir.path().join("wordmap.json"));

        let loaded = read_d3(&path).unwrap();
        assert_eq!(loaded.nodes.len(), network.node_count());
        assert_eq!(loaded.links.len(), network.edge_count());
        let weight = |s: &str, t: &str| {
            loaded
                .links
                .iter()
                .find(|l| l.source == s && l.target == t)
                .map(|l| l.weight)
        };
        assert_eq!(weight("A", "x"), Some(5));
        assert_eq!(weight("A", "y"), Some(2));
        assert_eq!(loaded, to_d3(&network));
    }
}
