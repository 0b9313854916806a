//! Export of resolved models to Graphviz.
//!
//! # Pipeline Position
//!
//! ```text
//! Inventory records
//!     ↓ build + resolve
//! ApplicationGraph
//!     ↓ export (this module)
//! dot_structures::Graph
//!     ↓ print / render
//! DOT text, SVG / PNG
//! ```
//!
//! # Available Backends
//!
//! - [`dot`] - tiered application diagrams
//! - [`relationship`] - application relationship maps

pub mod dot;
pub mod relationship;

pub use dot_structures::Graph;

use std::{fmt, str::FromStr};

use dot_generator::id;
use dot_structures::{Attribute, Edge, EdgeTy, Id, Node, NodeId, Stmt, Subgraph, Vertex};
use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};

/// DOT keywords, which are never written as bare IDs.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Abstraction for Graphviz export backends.
pub trait Exporter<T: ?Sized> {
    /// Builds the Graphviz graph of `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if the configured style cannot be applied.
    fn export(&self, diagram: &T) -> Result<Graph, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A style setting that cannot be turned into DOT attributes.
    Style(String),
    /// Graphviz could not be run or rejected the graph.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(msg) => write!(f, "Style error: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Output format of rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl RenderFormat {
    /// Returns the file extension, which is also the Graphviz output format name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl From<RenderFormat> for Format {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Svg => Format::Svg,
            RenderFormat::Png => Format::Png,
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(format!("unsupported render format `{s}` (expected svg or png)")),
        }
    }
}

/// Prints `graph` as DOT text.
pub fn to_dot(graph: &Graph) -> String {
    graph.print(&mut PrinterContext::default())
}

/// Renders `graph` to `format` with the Graphviz executables found on `PATH`.
///
/// # Errors
///
/// Returns [`Error::Render`] if Graphviz cannot be started or fails.
pub fn render(graph: &Graph, format: RenderFormat) -> Result<Vec<u8>, Error> {
    debug!(format:% = format; "Invoking graphviz");

    let image = exec(
        graph.clone(),
        &mut PrinterContext::default(),
        vec![CommandArg::Format(format.into())],
    )
    .map_err(|err| Error::Render(err.to_string()))?;

    info!(format:% = format, bytes = image.len(); "Diagram rendered");
    Ok(image)
}

/// Returns `value` as a double-quoted DOT string.
pub(crate) fn quoted(value: &str) -> Id {
    id!(esc value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn is_bare(value: &str) -> bool {
    let mut chars = value.chars();
    let identifier = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    identifier && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(value))
}

/// Returns `value` as a bare DOT ID when it is an identifier, quoted otherwise.
pub(crate) fn name(value: &str) -> Id {
    if is_bare(value) {
        id!(value)
    } else {
        quoted(value)
    }
}

/// An attribute with a quoted string value.
pub(crate) fn text_attr(key: &str, value: &str) -> Attribute {
    Attribute(id!(key), quoted(value))
}

pub(crate) fn node(node_name: &str, attributes: Vec<Attribute>) -> Stmt {
    Stmt::Node(Node {
        id: NodeId(name(node_name), None),
        attributes,
    })
}

pub(crate) fn edge(from: &str, to: &str, attributes: Vec<Attribute>) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(
            Vertex::N(NodeId(name(from), None)),
            Vertex::N(NodeId(name(to), None)),
        ),
        attributes,
    })
}

pub(crate) fn subgraph(subgraph_name: &str, stmts: Vec<Stmt>) -> Stmt {
    Stmt::Subgraph(Subgraph {
        id: name(subgraph_name),
        stmts,
    })
}

/// A named directed graph.
pub(crate) fn digraph(graph_name: &str, stmts: Vec<Stmt>) -> Graph {
    Graph::DiGraph {
        id: quoted(graph_name),
        strict: false,
        stmts,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_format_parse() {
        assert_eq!("svg".parse::<RenderFormat>(), Ok(RenderFormat::Svg));
        assert_eq!("PNG".parse::<RenderFormat>(), Ok(RenderFormat::Png));
        assert!("pdf".parse::<RenderFormat>().is_err());
        assert_eq!(RenderFormat::default().extension(), "svg");
    }

    #[test]
    fn test_names() {
        assert_eq!(name("virtualmachines_1"), Id::Plain("virtualmachines_1".to_string()));
        assert_eq!(name("lb-web"), Id::Escaped("\"lb-web\"".to_string()));
        assert_eq!(name("Node"), Id::Escaped("\"Node\"".to_string()));
        assert_eq!(name(""), Id::Escaped("\"\"".to_string()));
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("say \"hi\""), Id::Escaped("\"say \\\"hi\\\"\"".to_string()));
        assert_eq!(quoted("share\\"), Id::Escaped("\"share\\\\\"".to_string()));
    }

    #[test]
    fn test_printed_graph() {
        let graph = digraph(
            "Pay roll",
            vec![
                subgraph("cluster01", vec![node("Web_top", vec![text_attr("label", "")])]),
                edge("a", "b-c", vec![]),
            ],
        );

        let dot = to_dot(&graph);

        assert!(dot.starts_with("digraph \"Pay roll\""));
        assert!(dot.contains("subgraph cluster01"));
        assert!(dot.contains("Web_top"));
        assert!(dot.contains("\"b-c\""));
    }
}
