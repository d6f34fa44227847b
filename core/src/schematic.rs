use serde::{Deserialize, Serialize};

/// The static view of a configured transition node.
///
/// `Schematic` is extracted from a node builder without executing it. It lists
/// the steps the node will run, in order, as a linear graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schematic {
    pub name: String,
    pub kind: TransitionKind,
    pub style: String,
    pub animated: bool,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Schematic {
    pub fn new(name: impl Into<String>, kind: TransitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl ToString, animated: bool) -> Self {
        self.style = style.to_string();
        self.animated = animated;
        self
    }

    /// Append a step and link it to the previous one.
    pub fn push(&mut self, kind: NodeKind, label: impl Into<String>) {
        let id = format!("{}#{}", self.name, self.nodes.len());
        if let Some(last) = self.nodes.last() {
            self.edges.push(Edge {
                from: last.id.clone(),
                to: id.clone(),
                label: None,
            });
        }
        self.nodes.push(Node {
            id,
            kind,
            label: label.into(),
        });
    }

    /// Labels of the steps that actually run, in execution order.
    pub fn steps(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| !matches!(n.kind, NodeKind::Origin | NodeKind::Destination))
            .map(|n| n.label.as_str())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Storyboard,
    Segue,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Origin,      // Requesting screen
    PreLink,     // Caller hook before the default action
    Default,     // Installed present / push / link / close action
    PostLink,    // Caller hook after the default action
    Destination, // Resolved (or pending) destination
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_links_steps() {
        let mut schematic = Schematic::new("node", TransitionKind::Segue);
        schematic.push(NodeKind::Origin, "Home");
        schematic.push(NodeKind::Default, "link:showDetail");
        schematic.push(NodeKind::Destination, "pending");

        assert_eq!(schematic.edges.len(), 2);
        assert_eq!(schematic.edges[0].from, "node#0");
        assert_eq!(schematic.edges[1].to, "node#2");
        assert_eq!(schematic.steps(), vec!["link:showDetail"]);
    }

    #[test]
    fn test_json_shape() {
        let schematic = Schematic::new("close", TransitionKind::Close).with_style("default", true);
        let json = schematic.to_json();
        assert_eq!(json["kind"], "close");
        assert_eq!(json["animated"], true);
    }
}
