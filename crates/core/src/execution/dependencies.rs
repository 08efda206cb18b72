//! Task dependency layering
//!
//! This module turns a dependency tree into execution layers. A layer's index is
//! the depth at which its tasks sit below the requested task (the root is layer
//! 0). Layers are executed from the highest index down to 0, so every
//! dependency finishes before anything that needs it starts.

use std::collections::HashMap;

use crate::graph::DependencyNode;
use crate::types::TaskName;

/// Ordered execution layers for one requested task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerPlan {
    layers: Vec<Vec<TaskName>>,
}

impl LayerPlan {
    /// Layers indexed by depth, root first
    pub fn layers(&self) -> &[Vec<TaskName>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Index of the layer holding `name`
    pub fn layer_of(&self, name: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.iter().any(|task| task == name))
    }

    /// Layers in the order they run: deepest index first, root last
    pub fn execution_order(&self) -> impl Iterator<Item = (usize, &[TaskName])> + '_ {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .map(|(index, layer)| (index, layer.as_slice()))
    }
}

/// Group the tasks of a dependency tree into execution layers.
///
/// Every task lands in exactly one layer: the deepest one it was reached at.
/// Since each path to a task continues on to that task's dependencies, a
/// dependency is always reached deeper than its dependent and so runs first.
pub fn group_by_dependency_levels(tree: &DependencyNode) -> LayerPlan {
    let mut raw_layers = Vec::new();
    tree.fill_layers(0, &mut raw_layers);

    // Deepest observation wins
    let mut deepest: HashMap<&str, usize> = HashMap::new();
    for (depth, layer) in raw_layers.iter().enumerate() {
        for name in layer {
            deepest
                .entry(name.as_str())
                .and_modify(|d| *d = (*d).max(depth))
                .or_insert(depth);
        }
    }

    let mut layers: Vec<Vec<TaskName>> = vec![Vec::new(); raw_layers.len()];
    for (name, depth) in deepest {
        layers[depth].push(name.to_string());
    }

    for layer in &mut layers {
        layer.sort_unstable();
    }
    layers.retain(|layer| !layer.is_empty());

    tracing::debug!(
        raw_nodes = raw_layers.iter().map(Vec::len).sum::<usize>(),
        layers = layers.len(),
        "layers built and deduplicated"
    );

    LayerPlan { layers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_dependency_tree;
    use crate::registry::TaskRegistry;
    use crate::test_support::{diamond, registry};

    fn plan_for(registry: &TaskRegistry, root: &str) -> LayerPlan {
        let tree = build_dependency_tree(registry, root).unwrap();
        group_by_dependency_levels(&tree)
    }

    fn names(layer: &[&str]) -> Vec<TaskName> {
        layer.iter().map(|s| s.to_string()).collect()
    }

    /// Every dependency must sit in a strictly deeper layer than its dependent
    fn assert_dependencies_run_first(registry: &TaskRegistry, plan: &LayerPlan) {
        for layer in plan.layers() {
            for name in layer {
                let own = plan.layer_of(name).unwrap();
                for dep in registry.get(name).unwrap().dependencies() {
                    let dep_layer = plan.layer_of(dep).unwrap();
                    assert!(
                        dep_layer > own,
                        "{} (layer {}) should be deeper than {} (layer {})",
                        dep,
                        dep_layer,
                        name,
                        own
                    );
                }
            }
        }
    }

    #[test]
    fn test_diamond_layers() {
        let registry = diamond();
        let plan = plan_for(&registry, "A");

        assert_eq!(
            plan.layers(),
            &[names(&["A"]), names(&["B", "C"]), names(&["D"])]
        );
        assert_eq!(plan.task_count(), 4);
        assert_dependencies_run_first(&registry, &plan);
    }

    #[test]
    fn test_execution_order_is_deepest_first() {
        let plan = plan_for(&diamond(), "A");
        let order: Vec<(usize, Vec<TaskName>)> = plan
            .execution_order()
            .map(|(index, layer)| (index, layer.to_vec()))
            .collect();
        assert_eq!(
            order,
            vec![
                (2, names(&["D"])),
                (1, names(&["B", "C"])),
                (0, names(&["A"])),
            ]
        );
    }

    #[test]
    fn test_shared_dependency_takes_deepest_layer() {
        // D is a direct dependency of A and also sits under B -> C
        let registry = registry(&[
            ("A", &[], &["B", "D"]),
            ("B", &[], &["C"]),
            ("C", &[], &["D"]),
            ("D", &[], &[]),
        ]);
        let plan = plan_for(&registry, "A");

        assert_eq!(plan.layer_of("D"), Some(3));
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.task_count(), 4);
        assert_dependencies_run_first(&registry, &plan);
    }

    #[test]
    fn test_layer_of_unknown_task() {
        let plan = plan_for(&diamond(), "B");
        assert_eq!(plan.layers(), &[names(&["B"]), names(&["D"])]);
        assert_eq!(plan.layer_of("A"), None);
    }

    #[test]
    fn test_planning_is_deterministic() {
        let registry = registry(&[
            ("root", &[], &["e", "d", "c", "b", "a"]),
            ("a", &[], &["z"]),
            ("b", &[], &["z"]),
            ("c", &[], &[]),
            ("d", &[], &["z", "y"]),
            ("e", &[], &[]),
            ("y", &[], &["z"]),
            ("z", &[], &[]),
        ]);
        let tree = build_dependency_tree(&registry, "root").unwrap();

        let first = group_by_dependency_levels(&tree);
        let second = group_by_dependency_levels(&tree);
        assert_eq!(first, second);
        assert_eq!(first.layers()[1], names(&["a", "b", "c", "d", "e"]));
        assert_dependencies_run_first(&registry, &first);
    }

    #[test]
    fn test_each_task_appears_once() {
        let registry = registry(&[
            ("app", &[], &["lib", "utils", "codegen"]),
            ("lib", &[], &["utils", "codegen"]),
            ("utils", &[], &["codegen"]),
            ("codegen", &[], &[]),
        ]);
        let plan = plan_for(&registry, "app");

        let mut all: Vec<&TaskName> = plan.layers().iter().flatten().collect();
        all.sort();
        assert_eq!(all, vec!["app", "codegen", "lib", "utils"]);
        assert_dependencies_run_first(&registry, &plan);
    }

    #[test]
    fn test_single_task_plan() {
        let registry = registry(&[("solo", &["true"], &[])]);
        let plan = plan_for(&registry, "solo");
        assert_eq!(plan.layers(), &[names(&["solo"])]);
    }
}
