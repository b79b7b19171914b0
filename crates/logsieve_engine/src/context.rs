//! The context: the process-wide root of a compiled rulebase.
//!
//! A context owns the node arena, the main PDAG root, the named components,
//! the diagnostics handlers, and the optional annotator. Building and
//! optimization mutate the context; matching only reads it, so a frozen
//! context may be shared across threads.

use logsieve_foundation::{Diagnostics, Error, Record, Result};

use crate::graph::{Component, ComponentId, NodeId, PdagNode};

/// Enriches a successfully normalized record with information derived from
/// the terminal node's tags. Implementations must be purely additive.
pub trait Annotate: Send + Sync {
    /// Augments `record` based on `tags`.
    fn annotate(&self, record: &mut Record, tags: &[String]);
}

/// Root object of a compiled rulebase.
pub struct Context {
    nodes: Vec<PdagNode>,
    root: NodeId,
    components: Vec<Component>,
    /// Diagnostics handlers for this context.
    pub diag: Diagnostics,
    annotator: Option<Box<dyn Annotate>>,
}

impl Context {
    /// Creates an empty context with a fresh main root.
    #[must_use]
    pub fn new() -> Self {
        let mut ctx = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            components: Vec::new(),
            diag: Diagnostics::new(),
            annotator: None,
        };
        ctx.root = ctx.new_node();
        ctx
    }

    /// Root node of the main PDAG.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes allocated so far (including nodes orphaned by the
    /// optimizer).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a fresh node.
    pub(crate) fn new_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(PdagNode::default());
        id
    }

    /// Immutable access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &PdagNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PdagNode {
        &mut self.nodes[id.index()]
    }

    /// Looks up a named component. `name` includes the leading `@`.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|c| c.name == name)
            .map(|i| ComponentId(i as u32))
    }

    /// Root node of a component.
    #[must_use]
    pub fn component_root(&self, id: ComponentId) -> NodeId {
        self.components[id.index()].root
    }

    /// Name of a component, including the leading `@`.
    #[must_use]
    pub fn component_name(&self, id: ComponentId) -> &str {
        &self.components[id.index()].name
    }

    /// The named components in definition order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i as u32), c))
    }

    /// Defines a new named component and returns its root node, which
    /// subsequent builder calls populate.
    ///
    /// # Errors
    /// Returns `DuplicateComponent` if the name is already taken.
    pub fn define_component(&mut self, name: &str) -> Result<NodeId> {
        if self.component(name).is_some() {
            let err = Error::duplicate_component(name);
            self.diag.error(0, &err.to_string());
            return Err(err);
        }
        let root = self.new_node();
        self.components.push(Component {
            name: name.to_string(),
            root,
        });
        Ok(root)
    }

    /// Installs the annotator invoked on tagged matches.
    pub fn set_annotator(&mut self, annotator: Box<dyn Annotate>) {
        self.annotator = Some(annotator);
    }

    pub(crate) fn annotator(&self) -> Option<&dyn Annotate> {
        self.annotator.as_deref()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("nodes", &self.nodes.len())
            .field("components", &self.components.len())
            .field("annotator", &self.annotator.is_some())
            .finish()
    }
}
