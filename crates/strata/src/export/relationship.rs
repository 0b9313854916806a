//! Relationship map export.

use dot_generator::{attr, id};
use dot_structures::{Attribute, Graph, GraphAttributes, Id, Stmt};
use log::debug;

use strata_core::relationship::{Direction, Mechanism, Relationship};

use super::{Error, Exporter, digraph, edge, node, subgraph, text_attr};
use crate::relationship::{LayoutEngine, RelationshipMap};

fn mechanism_style(mechanism: Mechanism) -> (&'static str, &'static str) {
    match mechanism {
        Mechanism::Fileshare => ("blue", "odot"),
        Mechanism::Ftp => ("red", "box"),
        Mechanism::Api => ("green", "diamond"),
        Mechanism::Other => ("black", "normal"),
    }
}

fn application_node(application: &str, shape: &str) -> Stmt {
    node(
        application,
        vec![
            text_attr("label", application),
            Attribute(id!("shape"), id!(shape)),
            attr!("color", "deepskyblue"),
            attr!("fillcolor", "lightskyblue"),
            attr!("style", "filled"),
        ],
    )
}

fn relationship_edge(relationship: &Relationship, topics: bool) -> Stmt {
    let (color, arrowhead) = mechanism_style(relationship.mechanism());
    let (style, arrowtail, dir) = match relationship.direction() {
        Direction::Bidirectional => ("bold", arrowhead, "both"),
        Direction::DependsOn => ("dashed", "normal", "forward"),
        Direction::Forward => ("solid", "normal", "forward"),
    };

    let mut attributes = Vec::with_capacity(7);
    if topics {
        attributes.push(text_attr("label", relationship.topic().unwrap_or_default()));
    }
    attributes.extend([
        attr!("shape", "box"),
        Attribute(id!("style"), id!(style)),
        Attribute(id!("arrowhead"), id!(arrowhead)),
        Attribute(id!("arrowtail"), id!(arrowtail)),
        Attribute(id!("dir"), id!(dir)),
        Attribute(id!("color"), id!(color)),
    ]);
    edge(relationship.source(), relationship.target(), attributes)
}

fn legend() -> [Stmt; 2] {
    let direction = subgraph(
        "cluster_legend",
        vec![
            Stmt::Attribute(text_attr("label", "Legend")),
            Stmt::Attribute(attr!("style", "dashed")),
            node("Legend", vec![attr!("shape", "box")]),
            edge(
                "Legend",
                "Bi-Directional",
                vec![
                    text_attr("label", "Double Arrow"),
                    attr!("style", "bold"),
                    attr!("dir", "both"),
                ],
            ),
            edge(
                "Legend",
                "Depends On",
                vec![text_attr("label", "Dashed Line"), attr!("style", "dashed")],
            ),
            edge(
                "Legend",
                "Normal Flow",
                vec![text_attr("label", "Solid Line"), attr!("style", "solid")],
            ),
        ],
    );

    let mut stmts = vec![
        Stmt::Attribute(text_attr("label", "Mechanism")),
        Stmt::Attribute(attr!("style", "dashed")),
        node("Mechanism", vec![attr!("shape", "box")]),
    ];
    for (mechanism, target, label) in [
        (Mechanism::Api, "API", "Green Diamond"),
        (Mechanism::Ftp, "FTP", "Red Box"),
        (Mechanism::Fileshare, "Fileshare", "Blue Circle"),
    ] {
        let (color, arrowhead) = mechanism_style(mechanism);
        stmts.push(edge(
            "Mechanism",
            target,
            vec![
                text_attr("label", label),
                Attribute(id!("arrowhead"), id!(arrowhead)),
                Attribute(id!("color"), id!(color)),
            ],
        ));
    }

    [direction, subgraph("cluster_mechanism", stmts)]
}

/// Exports a [`RelationshipMap`] as a digraph laid out by its engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipDiagram;

impl Exporter<RelationshipMap> for RelationshipDiagram {
    fn export(&self, map: &RelationshipMap) -> Result<Graph, Error> {
        let beautify = map.engine() == LayoutEngine::Circo;

        let mut stmts = vec![
            Stmt::Attribute(attr!("compound", "true")),
            Stmt::Attribute(Attribute(id!("ranksep"), id!(map.rank_separation()))),
            Stmt::Attribute(Attribute(id!("nodesep"), id!(map.node_separation()))),
            Stmt::Attribute(attr!("overlap", "false")),
            Stmt::Attribute(attr!("splines", "true")),
            Stmt::Attribute(attr!("K", ".5")),
            Stmt::Attribute(attr!("repulsiveforce", "1.25")),
            Stmt::Attribute(attr!("overlap_scale", "0")),
            Stmt::Attribute(attr!("smoothing", "avg_dist")),
            Stmt::Attribute(Attribute(id!("beautify"), id!(beautify))),
            Stmt::Attribute(attr!("bgcolor", "lightyellow")),
            Stmt::Attribute(Attribute(id!("layout"), id!(map.engine().as_str()))),
        ];

        // Invisible chain keeping the selected applications together.
        for pair in map.applications().windows(2) {
            stmts.push(edge(
                &pair[0],
                &pair[1],
                vec![
                    text_attr("label", ""),
                    attr!("len", "10"),
                    attr!("dir", "none"),
                    attr!("style", "invisible"),
                ],
            ));
        }
        stmts.push(Stmt::GAttribute(GraphAttributes::Edge(vec![attr!("len", "4.0")])));

        for application in map.applications() {
            stmts.push(application_node(application, "box3d"));
        }
        for peer in map.peers() {
            stmts.push(application_node(peer, "box"));
        }

        for (index, cluster) in map.clusters().iter().enumerate() {
            let mut cluster_stmts = vec![
                Stmt::Attribute(text_attr("label", cluster.application())),
                Stmt::Attribute(attr!("style", "dashed")),
            ];
            cluster_stmts.extend(
                cluster
                    .relationships()
                    .iter()
                    .map(|relationship| relationship_edge(relationship, map.shows_topics())),
            );
            stmts.push(subgraph(&format!("cluster{index}"), cluster_stmts));
        }

        if map.has_legend() {
            stmts.extend(legend());
        }

        debug!(clusters = map.clusters().len(), engine = map.engine().as_str(); "Exported relationship map");
        Ok(digraph("Relationships", stmts))
    }
}
