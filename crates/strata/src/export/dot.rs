//! Tiered application diagrams.
//!
//! One digraph per application: a URL entry node, invisible anchor edges
//! that stack the tier clusters top to bottom, and one cluster per non-empty
//! tier holding the parent edges of its members.

use dot_generator::{attr, id};
use dot_structures::{Attribute, Graph, GraphAttributes, Id, Stmt};
use indexmap::IndexMap;
use log::{debug, trace};

use strata_core::{
    node::{Node, NodeId, Parent, URL_ANCHOR_LABEL},
    resource::ResourceKind,
    store::NodeStore,
    tier::Tier,
};

use super::{Error, Exporter, digraph, edge, node, subgraph, text_attr};
use crate::{config::StyleConfig, model::ApplicationGraph};

/// Icon of the application URL node.
const URL_ICON: &str = "Website-Power.svg";

/// Visual attributes of one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeStyle {
    shape: &'static str,
    fill: &'static str,
    icon: Option<&'static str>,
    margin: &'static str,
    labelloc: &'static str,
    imagepos: &'static str,
}

impl NodeStyle {
    const fn icon(shape: &'static str, fill: &'static str, icon: &'static str) -> Self {
        Self {
            shape,
            fill,
            icon: Some(icon),
            margin: "0.35",
            labelloc: "bc",
            imagepos: "tc",
        }
    }

    const DEFAULT: NodeStyle = NodeStyle {
        shape: "box",
        fill: "gray",
        icon: None,
        margin: "0.00",
        labelloc: "mc",
        imagepos: "tc",
    };

    /// Returns the style of a raw provider type.
    fn for_type(raw_type: &str) -> Self {
        match raw_type.to_ascii_lowercase().as_str() {
            "microsoft.compute/virtualmachines" => Self::icon("box3d", "lightblue", "VM-Images-l.svg"),
            "microsoft.sqlvirtualmachine/sqlvirtualmachines" => {
                Self::icon("box3d", "lightblue", "Sql-Server.svg")
            }
            "microsoft.network/networkinterfaces" => {
                Self::icon("component", "lightyellow", "Network-Interfaces-l.svg")
            }
            "microsoft.network/loadbalancers" => {
                Self::icon("Mdiamond", "lawngreen", "Load-Balancers-l.svg")
            }
            "microsoft.web/serverfarms" => Self::icon("box", "gray", "Server-Farm.svg"),
            "microsoft.storage/storageaccounts" => {
                Self::icon("folder", "gray", "Storage-Accounts.svg")
            }
            "microsoft.sql/managedinstances/databases" => {
                Self::icon("folder", "gray", "Managed-Database.svg")
            }
            "microsoft.sql/managedinstances" => {
                Self::icon("folder", "gray", "SQL-Managed-Instance.svg")
            }
            "microsoft.keyvault/vaults" => Self::icon("folder", "gray", "Key-Vaults.svg"),
            "microsoft.appconfiguration/configurationstores" => {
                Self::icon("folder", "gray", "App-Configuration.svg")
            }
            "microsoft.cache/redis" => Self::icon("folder", "gray", "Cache-Redis.svg"),
            "microsoft.servicebus/namespaces" => {
                Self::icon("folder", "gray", "Notification-Hub-Namespaces.svg")
            }
            "microsoft.containerregistry/registries" => {
                Self::icon("folder", "gray", "Container-Registries.svg")
            }
            "microsoft.web/sites" => Self::icon("folder", "gray", "Function-Apps.svg"),
            "microsoft.network/privateendpoints" => {
                Self::icon("folder", "gray", "Private-Endpoints.svg")
            }
            _ => Self::DEFAULT,
        }
    }
}

/// Returns `true` for nodes left out of the drawing: machines named after a
/// database server, which their SQL resource represents, and unattached
/// network interfaces.
fn is_hidden(node: &Node) -> bool {
    match node.resource_type().kind() {
        ResourceKind::VirtualMachine => node.name().to_lowercase().contains("sql"),
        ResourceKind::NetworkInterface => node.parent().is_none(),
        _ => false,
    }
}

/// Returns `true` when `tier`'s cluster leaves out resources of `kind`.
fn is_excluded(tier: Tier, kind: ResourceKind) -> bool {
    matches!(
        (tier, kind),
        (Tier::Web, ResourceKind::SqlVirtualMachine) | (Tier::Sql, ResourceKind::VirtualMachine)
    )
}

fn top_anchor(tier: Tier) -> String {
    format!("{}_top", tier.display_name())
}

fn bottom_anchor(tier: Tier) -> String {
    format!("{}_bottom", tier.display_name())
}

fn cluster_name(tier: Tier) -> String {
    format!("cluster{}", tier.cluster_number().unwrap_or_default())
}

/// Members of each clustered tier, in store order.
fn cluster_members(store: &NodeStore) -> IndexMap<Tier, Vec<NodeId>> {
    Tier::CLUSTERED
        .into_iter()
        .map(|tier| {
            let members = store.select(|node| {
                node.tier() == tier
                    && !is_hidden(node)
                    && !is_excluded(tier, node.resource_type().kind())
            });
            (tier, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

/// Exports an [`ApplicationGraph`] as a tiered digraph.
///
/// Nodes left out of the drawing are not declared at all.
///
/// # Examples
///
/// ```
/// use strata::{
///     config::StyleConfig,
///     export::{Exporter, dot::TierDiagram, to_dot},
///     model::ApplicationGraph,
/// };
/// use strata::store::NodeStore;
///
/// let style = StyleConfig::default();
/// let graph = ApplicationGraph::new("Payroll", "https://payroll.example", NodeStore::new());
/// let dot = to_dot(&TierDiagram::new(&style).export(&graph).unwrap());
/// assert!(dot.starts_with("digraph \"Payroll\""));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TierDiagram<'a> {
    style: &'a StyleConfig,
}

fn invisible() -> Vec<Attribute> {
    vec![attr!("style", "invisible"), attr!("dir", "none")]
}

impl<'a> TierDiagram<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    fn graph_attributes(&self, application: &str) -> Result<Vec<Stmt>, Error> {
        let color = self.style.cluster_color().map_err(Error::Style)?;
        let fill = self.style.cluster_fill_color().map_err(Error::Style)?;

        Ok(vec![
            Stmt::Attribute(attr!("compound", "true")),
            Stmt::Attribute(attr!("style", "filled")),
            Stmt::Attribute(attr!("rankdir", "TB")),
            Stmt::Attribute(text_attr("color", &color.to_hex())),
            Stmt::Attribute(text_attr("fillcolor", &fill.to_hex())),
            Stmt::Attribute(Attribute(id!("ranksep"), id!(self.style.rank_separation()))),
            Stmt::Attribute(Attribute(id!("nodesep"), id!(self.style.node_separation()))),
            Stmt::Attribute(attr!("overlap", "false")),
            Stmt::Attribute(attr!("splines", "true")),
            Stmt::Attribute(text_attr("packmode", "clust")),
            Stmt::Attribute(text_attr("label", application)),
            Stmt::Attribute(attr!("labelloc", "t")),
        ])
    }

    /// Declares every drawn node, grouped by raw type under that type's style defaults.
    fn node_declarations(&self, store: &NodeStore) -> Vec<Stmt> {
        let mut groups: IndexMap<&str, Vec<&Node>> = IndexMap::new();
        for (_, member) in store.iter() {
            groups.entry(member.raw_type()).or_default().push(member);
        }

        let mut stmts = Vec::new();
        for (raw_type, members) in groups {
            let style = NodeStyle::for_type(raw_type);
            let image = style
                .icon
                .and_then(|icon| self.style.icon_path(icon))
                .unwrap_or_default();

            stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![
                Attribute(id!("shape"), id!(style.shape)),
                attr!("style", "filled"),
                Attribute(id!("fillcolor"), id!(style.fill)),
                Attribute(id!("labelloc"), id!(style.labelloc)),
                Attribute(id!("margin"), id!(style.margin)),
                Attribute(id!("imagepos"), id!(style.imagepos)),
                text_attr("image", &image),
            ])));

            for member in members {
                if is_hidden(member) {
                    trace!(label = member.label(), name = member.name(); "Node left out of the drawing");
                    continue;
                }
                stmts.push(node(member.label(), vec![text_attr("label", member.name())]));
            }
        }
        stmts
    }

    fn url_anchor(&self, url: &str) -> Stmt {
        let image = self.style.icon_path(URL_ICON).unwrap_or_default();

        node(
            URL_ANCHOR_LABEL,
            vec![
                text_attr("label", url),
                attr!("shape", "none"),
                attr!("margin", "0.50"),
                text_attr("image", &image),
                attr!("labelloc", "bc"),
            ],
        )
    }

    /// Stacks the clusters with edges between their anchors.
    fn anchor_edges(&self, clusters: &IndexMap<Tier, Vec<NodeId>>) -> Vec<Stmt> {
        let link = |from: Tier, to: Tier| {
            edge(
                &bottom_anchor(from),
                &top_anchor(to),
                vec![
                    Attribute(id!("ltail"), id!(cluster_name(from))),
                    Attribute(id!("lhead"), id!(cluster_name(to))),
                    text_attr("image", ""),
                ],
            )
        };

        let mut stmts = vec![edge(URL_ANCHOR_LABEL, &top_anchor(Tier::Web), vec![])];
        if clusters.contains_key(&Tier::Sql) {
            stmts.push(link(Tier::Web, Tier::Sql));
        }
        if clusters.contains_key(&Tier::App) {
            stmts.push(link(Tier::Web, Tier::App));
            stmts.push(link(Tier::App, Tier::Paas));
        } else {
            stmts.push(link(Tier::Web, Tier::Paas));
        }
        stmts
    }

    fn cluster(&self, store: &NodeStore, tier: Tier, members: &[NodeId]) -> Stmt {
        let top = top_anchor(tier);
        let bottom = bottom_anchor(tier);

        let mut stmts = vec![
            Stmt::Attribute(text_attr("label", &format!("{} Tier", tier.display_name()))),
            node(
                &top,
                vec![
                    attr!("style", "invisible"),
                    text_attr("label", ""),
                    text_attr("image", ""),
                ],
            ),
        ];

        for &id in members {
            let member = &store[id];
            // The URL anchor enters the cluster through its top anchor, so a
            // node hanging off it is drawn like a root.
            let parent = match member.parent() {
                Some(Parent::Node(parent)) if !is_hidden(&store[parent]) => {
                    Some(store[parent].label())
                }
                _ => None,
            };
            match parent {
                Some(parent) => stmts.push(edge(parent, member.label(), vec![])),
                None => stmts.push(edge(&top, member.label(), invisible())),
            }

            let has_child = store.iter().any(|(_, child)| {
                child.parent_node() == Some(id) && child.tier() == tier && !is_hidden(child)
            });
            if !has_child {
                stmts.push(edge(member.label(), &bottom, invisible()));
            }
        }

        stmts.push(node(
            &bottom,
            vec![
                attr!("style", "invisible"),
                text_attr("label", ""),
                attr!("dir", "none"),
                text_attr("image", ""),
            ],
        ));
        subgraph(&cluster_name(tier), stmts)
    }
}

impl Exporter<ApplicationGraph> for TierDiagram<'_> {
    fn export(&self, graph: &ApplicationGraph) -> Result<Graph, Error> {
        let store = graph.store();
        let clusters = cluster_members(store);

        let mut stmts = self.graph_attributes(graph.application())?;
        stmts.extend(self.node_declarations(store));
        stmts.push(self.url_anchor(graph.url()));
        stmts.extend(self.anchor_edges(&clusters));
        for (tier, members) in &clusters {
            stmts.push(self.cluster(store, *tier, members));
        }

        debug!(app = graph.application(), clusters = clusters.len(); "Exported tier diagram");
        Ok(digraph(graph.application(), stmts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::query;

    const VM: &str = "microsoft.compute/virtualmachines";
    const NIC: &str = "microsoft.network/networkinterfaces";
    const LB: &str = "microsoft.network/loadbalancers";
    const VAULT: &str = "microsoft.keyvault/vaults";

    fn web_graph() -> ApplicationGraph {
        let mut store = NodeStore::new();
        let vm = store.push(Node::new(VM, "virtualmachines_1", "payweb01").with_tier(Tier::Web));
        let sql_vm = store.push(Node::new(VM, "virtualmachines_2", "paysql01").with_tier(Tier::Sql));
        store.push(Node::new(VAULT, "vaults_1", "kv-pay").with_tier(Tier::Paas));
        let lb = store.push(Node::new(LB, "loadbalancers_1", "lb-iis").with_tier(Tier::Web));
        let nic = store.push(
            Node::new(NIC, "networkinterfaces_1", "payweb01-nic-01").with_tier(Tier::Web),
        );
        let sql_nic = store.push(
            Node::new(NIC, "networkinterfaces_2", "paysql01-nic-01").with_tier(Tier::Sql),
        );
        store.push(Node::new(NIC, "networkinterfaces_3", "orphan-nic-01").with_tier(Tier::Web));
        store.set_parent(lb, Parent::UrlAnchor).unwrap();
        store.set_parent(vm, Parent::Node(lb)).unwrap();
        store.set_parent(nic, Parent::Node(vm)).unwrap();
        store.set_parent(sql_nic, Parent::Node(sql_vm)).unwrap();

        ApplicationGraph::new("Payroll", "https://payroll.example", store)
    }

    fn export(graph: &ApplicationGraph) -> Graph {
        TierDiagram::new(&StyleConfig::default()).export(graph).unwrap()
    }

    fn cluster(graph: &Graph, name: &str) -> Vec<Stmt> {
        query::subgraph(query::stmts(graph), name)
            .map(|subgraph| subgraph.stmts.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_graph_header() {
        let graph = export(&web_graph());
        let stmts = query::stmts(&graph);

        assert_eq!(query::graph_id(&graph), "Payroll");
        assert_eq!(query::graph_attr(stmts, "color"), Some("#00bfff"));
        assert_eq!(query::graph_attr(stmts, "fillcolor"), Some("#87cefa"));
        assert_eq!(query::graph_attr(stmts, "ranksep"), Some("2"));
        assert_eq!(query::graph_attr(stmts, "nodesep"), Some("1.5"));
        assert_eq!(query::graph_attr(stmts, "label"), Some("Payroll"));
    }

    #[test]
    fn test_node_declarations() {
        let graph = export(&web_graph());
        let stmts = query::stmts(&graph);

        let vm_defaults = stmts.iter().find_map(|stmt| match stmt {
            Stmt::GAttribute(GraphAttributes::Node(attributes))
                if query::attr(attributes, "shape") == Some("box3d") =>
            {
                Some(attributes)
            }
            _ => None,
        });
        let vm_defaults = vm_defaults.unwrap();
        assert_eq!(query::attr(vm_defaults, "fillcolor"), Some("lightblue"));
        assert_eq!(query::attr(vm_defaults, "image"), Some("icons/VM-Images-l.svg"));

        let vm = query::node(stmts, "virtualmachines_1").unwrap();
        assert_eq!(query::attr(&vm.attributes, "label"), Some("payweb01"));
        assert!(query::node(stmts, "networkinterfaces_1").is_some());
        assert!(query::node(stmts, "virtualmachines_2").is_none());
        assert!(query::node(stmts, "networkinterfaces_3").is_none());

        let url = query::node(stmts, URL_ANCHOR_LABEL).unwrap();
        assert_eq!(query::attr(&url.attributes, "label"), Some("https://payroll.example"));
        assert_eq!(query::attr(&url.attributes, "image"), Some("icons/Website-Power.svg"));
    }

    #[test]
    fn test_anchor_edges_without_app_tier() {
        let graph = export(&web_graph());
        let stmts = query::stmts(&graph);

        assert!(query::edge(stmts, URL_ANCHOR_LABEL, "Web_top").is_some());
        let to_sql = query::edge(stmts, "Web_bottom", "Sql_top").unwrap();
        assert_eq!(query::attr(&to_sql.attributes, "ltail"), Some("cluster01"));
        assert_eq!(query::attr(&to_sql.attributes, "lhead"), Some("cluster03"));
        let to_paas = query::edge(stmts, "Web_bottom", "Paas_top").unwrap();
        assert_eq!(query::attr(&to_paas.attributes, "lhead"), Some("cluster04"));
        assert!(query::edge(stmts, "Web_bottom", "App_top").is_none());
    }

    #[test]
    fn test_web_cluster_edges() {
        let graph = export(&web_graph());
        let web = cluster(&graph, "cluster01");

        assert_eq!(query::graph_attr(&web, "label"), Some("Web Tier"));
        assert!(query::edge(&web, "loadbalancers_1", "virtualmachines_1").is_some());
        assert!(query::edge(&web, "virtualmachines_1", "networkinterfaces_1").is_some());
        let bottom = query::edge(&web, "networkinterfaces_1", "Web_bottom").unwrap();
        assert_eq!(query::attr(&bottom.attributes, "style"), Some("invisible"));
        assert!(query::edge(&web, "virtualmachines_1", "Web_bottom").is_none());
    }

    #[test]
    fn test_url_anchored_node_hangs_off_top_anchor() {
        let graph = export(&web_graph());
        let web = cluster(&graph, "cluster01");

        let root = query::edge(&web, "Web_top", "loadbalancers_1").unwrap();
        assert_eq!(query::attr(&root.attributes, "style"), Some("invisible"));
        assert!(query::edge(&web, URL_ANCHOR_LABEL, "loadbalancers_1").is_none());
        assert!(query::node(&web, URL_ANCHOR_LABEL).is_none());
    }

    #[test]
    fn test_hidden_parent_treated_as_absent() {
        let graph = export(&web_graph());
        let sql = cluster(&graph, "cluster03");

        assert!(query::edge(&sql, "Sql_top", "networkinterfaces_2").is_some());
        assert!(query::edge(&sql, "virtualmachines_2", "networkinterfaces_2").is_none());
    }

    #[test]
    fn test_empty_tiers_have_no_cluster() {
        let graph = export(&web_graph());
        let stmts = query::stmts(&graph);

        assert!(query::subgraph(stmts, "cluster02").is_none());
        assert!(query::subgraph(stmts, "cluster00").is_none());
        assert!(query::subgraph(stmts, "cluster04").is_some());
    }

    #[test]
    fn test_label_with_backslash_stays_terminated() {
        let mut store = NodeStore::new();
        store.push(Node::new(VAULT, "vaults_1", "share\\").with_tier(Tier::Paas));
        let graph = export(&ApplicationGraph::new("Payroll", "https://pay.example", store));

        let vault = query::node(query::stmts(&graph), "vaults_1").unwrap();
        assert_eq!(vault.attributes[0].1, Id::Escaped("\"share\\\\\"".to_string()));
    }

    #[test]
    fn test_unknown_type_uses_default_style() {
        assert_eq!(NodeStyle::for_type("microsoft.insights/components"), NodeStyle::DEFAULT);
        assert_eq!(
            NodeStyle::for_type("Microsoft.Network/LoadBalancers").shape,
            "Mdiamond"
        );
    }

    #[test]
    fn test_exclusions() {
        assert!(is_excluded(Tier::Web, ResourceKind::SqlVirtualMachine));
        assert!(is_excluded(Tier::Sql, ResourceKind::VirtualMachine));
        assert!(!is_excluded(Tier::Web, ResourceKind::VirtualMachine));
    }
}
