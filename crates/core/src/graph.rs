//! Dependency tree construction
//!
//! Resolves a requested task into a tree of its transitive dependencies. Shared
//! dependencies are expanded once per parent, so the tree of a diamond-shaped
//! graph contains the shared task more than once; the layer planner removes
//! the duplicates.

use crate::registry::TaskRegistry;
use crate::types::{RunnerError, RunnerResult, TaskName};

/// A resolved task together with its resolved dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyNode {
    Leaf {
        name: TaskName,
    },
    Branch {
        name: TaskName,
        children: Vec<DependencyNode>,
    },
}

impl DependencyNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name } | Self::Branch { name, .. } => name.as_str(),
        }
    }

    pub fn children(&self) -> &[DependencyNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Branch { children, .. } => children.as_slice(),
        }
    }

    /// Append this node at `depth` and its children one level deeper, growing
    /// `layers` as needed. Nodes reached through several paths are appended
    /// once per path.
    pub fn fill_layers(&self, depth: usize, layers: &mut Vec<Vec<TaskName>>) {
        if layers.len() <= depth {
            layers.resize_with(depth + 1, Vec::new);
        }
        layers[depth].push(self.name().to_string());

        for child in self.children() {
            child.fill_layers(depth + 1, layers);
        }
    }

    /// Number of nodes in the tree, duplicates included
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(DependencyNode::node_count)
            .sum::<usize>()
    }
}

/// Build the dependency tree rooted at `root`.
///
/// Fails with [`RunnerError::UnknownTask`] when `root` or any transitive
/// dependency is missing from the registry, and with
/// [`RunnerError::CyclicDependency`] when a dependency chain comes back to a
/// task already on that chain. A chain returning to the root is therefore
/// reported with the root's name.
pub fn build_dependency_tree(registry: &TaskRegistry, root: &str) -> RunnerResult<DependencyNode> {
    let mut path = Vec::new();
    let tree = resolve(registry, root, &mut path)?;
    tracing::debug!(root, nodes = tree.node_count(), "dependency tree built");
    Ok(tree)
}

fn resolve<'a>(
    registry: &'a TaskRegistry,
    name: &'a str,
    path: &mut Vec<&'a str>,
) -> RunnerResult<DependencyNode> {
    if path.contains(&name) {
        return Err(RunnerError::CyclicDependency(name.to_string()));
    }

    let task = registry
        .get(name)
        .ok_or_else(|| RunnerError::UnknownTask(name.to_string()))?;

    if task.is_leaf() {
        tracing::trace!(task = name, "resolved leaf");
        return Ok(DependencyNode::Leaf {
            name: name.to_string(),
        });
    }

    path.push(name);
    let children = task
        .dependencies()
        .iter()
        .map(|dep| resolve(registry, dep, path))
        .collect::<RunnerResult<Vec<_>>>();
    path.pop();

    tracing::trace!(task = name, dependencies = task.dependencies().len(), "resolved branch");
    Ok(DependencyNode::Branch {
        name: name.to_string(),
        children: children?,
    })
}
