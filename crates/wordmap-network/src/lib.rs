//! Topic word networks: which media sources use which words, and how often.
//!
//! A run selects the top media sources of a Media Cloud topic, fetches each
//! source's top words concurrently, strips stopwords, and links every source
//! to its words with the word count as edge weight. The result is written
//! as GEXF (Gephi), D3 node-link JSON and an optional plain-text word list.

pub mod clean;
pub mod error;
pub mod export;
pub mod fetch;
pub mod graph;
pub mod lock;
pub mod pipeline;
pub mod select;

pub use clean::clean_top_words;
pub use error::NetworkError;
pub use fetch::fetch_top_words;
pub use graph::{build_network, NetworkNode, NodeKind, Viz, VizColor, VizPosition, WordNetwork, WORD_VIZ};
pub use lock::RunLock;
pub use pipeline::{create_word_map_files, generate_network_of_frames, WordMapFiles};
pub use select::{remove_media_source, remove_word_source, select_sources};
