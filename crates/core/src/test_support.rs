use crate::configs::tasks::TaskConfig;
use crate::registry::TaskRegistry;

pub(crate) fn task(actions: &[&str], dependencies: &[&str]) -> TaskConfig {
    TaskConfig {
        actions: actions.iter().map(|a| a.to_string()).collect(),
        dependencies: if dependencies.is_empty() {
            None
        } else {
            Some(dependencies.iter().map(|d| d.to_string()).collect())
        },
    }
}

/// Registry from `(name, actions, dependencies)` triples
pub(crate) fn registry(entries: &[(&str, &[&str], &[&str])]) -> TaskRegistry {
    TaskRegistry::from_tasks(
        entries
            .iter()
            .map(|(name, actions, dependencies)| (*name, task(actions, dependencies))),
    )
}

/// The four-task diamond: A needs B and C, both of which need D
pub(crate) fn diamond() -> TaskRegistry {
    registry(&[
        ("A", &["echo A"], &["B", "C"]),
        ("B", &["echo B"], &["D"]),
        ("C", &["echo C"], &["D"]),
        ("D", &["echo D"], &[]),
    ])
}
