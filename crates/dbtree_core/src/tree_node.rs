use crate::ConnectionProfile;
use serde::{Deserialize, Serialize};

/// Context tag for informational nodes (errors, empty results).
pub const MESSAGE_CONTEXT_VALUE: &str = "azure.resource.itemType.message";

/// Whether the host should render an expander for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollapsibleState {
    /// Leaf node; no children.
    #[default]
    None,

    /// Container whose children are fetched on first expansion.
    Collapsed,
}

/// Node kinds the host attaches object-explorer behavior to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Server,
}

/// Icon pair for dark and light themes, already resolved to host paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemedIconPath {
    pub dark: String,
    pub light: String,
}

/// A node in the host's navigation tree.
///
/// Containers carry neither payload nor child provider; leaves carry both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Stable across refreshes, so re-expanding never duplicates nodes.
    pub id: String,

    pub label: String,
    pub icon_path: Option<ThemedIconPath>,
    pub collapsible_state: CollapsibleState,

    /// Selects the host's context-menu contributions.
    pub context_value: String,

    pub payload: Option<ConnectionProfile>,

    /// Driver tag of the backend that handles further interaction.
    pub child_provider: Option<String>,

    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
}

impl TreeNode {
    /// Creates a collapsed container node.
    pub fn container(
        id: impl Into<String>,
        label: impl Into<String>,
        icon_path: ThemedIconPath,
        context_value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon_path: Some(icon_path),
            collapsible_state: CollapsibleState::Collapsed,
            context_value: context_value.into(),
            payload: None,
            child_provider: None,
            node_type: None,
        }
    }

    /// Creates a server leaf that carries a connection profile.
    pub fn server(
        id: impl Into<String>,
        label: impl Into<String>,
        icon_path: ThemedIconPath,
        context_value: impl Into<String>,
        profile: ConnectionProfile,
    ) -> Self {
        let child_provider = profile.provider_name.clone();

        Self {
            id: id.into(),
            label: label.into(),
            icon_path: Some(icon_path),
            collapsible_state: CollapsibleState::None,
            context_value: context_value.into(),
            payload: Some(profile),
            child_provider: Some(child_provider),
            node_type: Some(NodeType::Server),
        }
    }

    /// Creates an informational leaf shown in place of children that
    /// could not be loaded.
    ///
    /// Carries no profile: only `NodeType::Server` leaves do, so check
    /// `profile()` rather than `is_leaf()` before connecting.
    pub fn message(parent_id: &str, text: impl Into<String>) -> Self {
        Self {
            id: format!("{}|message", parent_id),
            label: text.into(),
            icon_path: None,
            collapsible_state: CollapsibleState::None,
            context_value: MESSAGE_CONTEXT_VALUE.to_string(),
            payload: None,
            child_provider: None,
            node_type: None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.collapsible_state != CollapsibleState::None
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container()
    }

    pub fn profile(&self) -> Option<&ConnectionProfile> {
        self.payload.as_ref()
    }
}
