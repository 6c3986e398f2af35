//! GEXF 1.2 writer with the `viz` extension, readable by Gephi.

use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::NetworkError;
use crate::graph::{NetworkNode, Viz, WordNetwork};

const GEXF_NS: &str = "http://www.gexf.net/1.2draft";
const VIZ_NS: &str = "http://www.gexf.net/1.2draft/viz";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.gexf.net/1.2draft http://www.gexf.net/1.2draft/gexf.xsd";

const ATTR_TYPE: &str = "0";
const ATTR_CATEGORY: &str = "1";

type XmlWriter = Writer<Vec<u8>>;

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), NetworkError> {
    writer
        .write_event(event)
        .map_err(|e| NetworkError::Gexf(e.to_string()))
}

fn start(writer: &mut XmlWriter, tag: BytesStart<'_>) -> Result<(), NetworkError> {
    write(writer, Event::Start(tag))
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<(), NetworkError> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn empty(writer: &mut XmlWriter, tag: BytesStart<'_>) -> Result<(), NetworkError> {
    write(writer, Event::Empty(tag))
}

/// Render the network as a GEXF document.
///
/// # Errors
///
/// Returns [`NetworkError::Gexf`] if the XML writer fails.
pub fn generate_gexf(network: &WordNetwork) -> Result<String, NetworkError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;

    let mut root = BytesStart::new("gexf");
    root.push_attribute(("xmlns", GEXF_NS));
    root.push_attribute(("xmlns:viz", VIZ_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    root.push_attribute(("version", "1.2"));
    start(&mut writer, root)?;

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("lastmodifieddate", today.as_str()));
    start(&mut writer, meta)?;
    start(&mut writer, BytesStart::new("creator"))?;
    write(
        &mut writer,
        Event::Text(BytesText::new(concat!("wordmap ", env!("CARGO_PKG_VERSION")))),
    )?;
    end(&mut writer, "creator")?;
    end(&mut writer, "meta")?;

    let mut graph = BytesStart::new("graph");
    graph.push_attribute(("defaultedgetype", "directed"));
    graph.push_attribute(("mode", "static"));
    graph.push_attribute(("name", ""));
    start(&mut writer, graph)?;

    write_attribute_decls(&mut writer)?;

    start(&mut writer, BytesStart::new("nodes"))?;
    for node in network.nodes() {
        write_node(&mut writer, node)?;
    }
    end(&mut writer, "nodes")?;

    start(&mut writer, BytesStart::new("edges"))?;
    for (id, (source, target, weight)) in network.edges().enumerate() {
        let id = id.to_string();
        let weight = weight.to_string();
        let mut edge = BytesStart::new("edge");
        edge.push_attribute(("source", source));
        edge.push_attribute(("target", target));
        edge.push_attribute(("id", id.as_str()));
        edge.push_attribute(("weight", weight.as_str()));
        empty(&mut writer, edge)?;
    }
    end(&mut writer, "edges")?;

    end(&mut writer, "graph")?;
    end(&mut writer, "gexf")?;

    String::from_utf8(writer.into_inner()).map_err(|e| NetworkError::Gexf(e.to_string()))
}

fn write_attribute_decls(writer: &mut XmlWriter) -> Result<(), NetworkError> {
    let mut attributes = BytesStart::new("attributes");
    attributes.push_attribute(("class", "node"));
    attributes.push_attribute(("mode", "static"));
    start(writer, attributes)?;
    for (id, title) in [(ATTR_TYPE, "type"), (ATTR_CATEGORY, "category")] {
        let mut attr = BytesStart::new("attribute");
        attr.push_attribute(("id", id));
        attr.push_attribute(("title", title));
        attr.push_attribute(("type", "string"));
        empty(writer, attr)?;
    }
    end(writer, "attributes")
}

fn write_node(writer: &mut XmlWriter, node: &NetworkNode) -> Result<(), NetworkError> {
    let mut tag = BytesStart::new("node");
    tag.push_attribute(("id", node.label.as_str()));
    tag.push_attribute(("label", node.label.as_str()));
    start(writer, tag)?;

    start(writer, BytesStart::new("attvalues"))?;
    let mut kind = BytesStart::new("attvalue");
    kind.push_attribute(("for", ATTR_TYPE));
    kind.push_attribute(("value", node.kind.as_str()));
    empty(writer, kind)?;
    if let Some(category) = &node.category {
        let mut cat = BytesStart::new("attvalue");
        cat.push_attribute(("for", ATTR_CATEGORY));
        cat.push_attribute(("value", category.as_str()));
        empty(writer, cat)?;
    }
    end(writer, "attvalues")?;

    if let Some(viz) = &node.viz {
        write_viz(writer, viz)?;
    }

    end(writer, "node")
}

fn write_viz(writer: &mut XmlWriter, viz: &Viz) -> Result<(), NetworkError> {
    let size = viz.size.to_string();
    let mut size_tag = BytesStart::new("viz:size");
    size_tag.push_attribute(("value", size.as_str()));
    empty(writer, size_tag)?;

    let (r, g, b) = (
        viz.color.r.to_string(),
        viz.color.g.to_string(),
        viz.color.b.to_string(),
    );
    let mut color = BytesStart::new("viz:color");
    color.push_attribute(("r", r.as_str()));
    color.push_attribute(("g", g.as_str()));
    color.push_attribute(("b", b.as_str()));
    empty(writer, color)?;

    let (x, y, z) = (
        format!("{:?}", viz.position.x),
        format!("{:?}", viz.position.y),
        format!("{:?}", viz.position.z),
    );
    let mut position = BytesStart::new("viz:position");
    position.push_attribute(("x", x.as_str()));
    position.push_attribute(("y", y.as_str()));
    position.push_attribute(("z", z.as_str()));
    empty(writer, position)
}

/// Write the network to `path` as GEXF, returning the document written.
///
/// # Errors
///
/// Returns [`NetworkError::Gexf`] if rendering fails or [`NetworkError::Io`]
/// if the file cannot be written.
pub fn write_gexf(network: &WordNetwork, path: &Path) -> Result<String, NetworkError> {
    tracing::debug!(
        nodes = network.node_count(),
        path = %path.display(),
        "writing GEXF network"
    );
    let document = generate_gexf(network)?;
    std::fs::write(path, &document).map_err(|e| NetworkError::io(path, e))?;
    Ok(document)
}
