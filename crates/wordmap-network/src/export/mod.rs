//! File exporters for a finished [`WordNetwork`](crate::graph::WordNetwork).
//!
//! All exporters only read the network.

mod d3;
mod gexf;
mod word_list;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use d3::{read_d3, to_d3, write_d3, D3Graph, D3Link, D3Node};
pub use gexf::{generate_gexf, write_gexf};
pub use word_list::{render_word_lists, write_word_lists};

/// `base` with `suffix` appended verbatim (`out.v2` + `.json` → `out.v2.json`).
pub(crate) fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
