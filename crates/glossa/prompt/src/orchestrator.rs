use crate::error::ComposeError;
use crate::module::{PromptContext, PromptModule};
use glossa_types::{ComposedArtifact, ModuleOutput};
use std::collections::{BTreeMap, BTreeSet};

/// Resolves the module dependency graph, orders the modules, and
/// concatenates their fragments into a [`ComposedArtifact`].
///
/// Pure computation over already-registered module objects; no side
/// effects, safe to call concurrently.
pub struct PromptOrchestrator;

impl PromptOrchestrator {
    /// Compose the modules into an artifact.
    ///
    /// Fails with [`ComposeError::DuplicateModule`] when two modules
    /// share an id, [`ComposeError::MissingDependency`] when a declared
    /// dependency is absent from the set, and
    /// [`ComposeError::CyclicDependency`] when the graph has a cycle.
    pub fn compose(
        modules: &[Box<dyn PromptModule>],
        context: &PromptContext,
    ) -> Result<ComposedArtifact, ComposeError> {
        let order = resolve_order(modules)?;

        let mut sections = Vec::with_capacity(order.len());
        for index in order {
            let module = &modules[index];
            let content = module.execute(context);
            sections.push(ModuleOutput::new(
                module.module_id(),
                content,
                module.priority(),
                module.dependencies(),
            ));
        }

        let artifact = ComposedArtifact::from_sections(sections);
        tracing::debug!(
            sections = artifact.section_count(),
            size = artifact.total_estimated_size,
            "prompt composed"
        );
        Ok(artifact)
    }
}

/// Kahn's algorithm over the declared dependencies. The ready set is
/// drained in (priority desc, module id asc) order, which makes the
/// emission order deterministic regardless of registration order.
fn resolve_order(modules: &[Box<dyn PromptModule>]) -> Result<Vec<usize>, ComposeError> {
    let mut by_id: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, module) in modules.iter().enumerate() {
        if by_id.insert(module.module_id(), index).is_some() {
            return Err(ComposeError::DuplicateModule(
                module.module_id().to_string(),
            ));
        }
    }

    let mut pending: Vec<BTreeSet<String>> = Vec::with_capacity(modules.len());
    for module in modules {
        let declared = module.dependencies();
        for dependency in &declared {
            if !by_id.contains_key(dependency.as_str()) {
                return Err(ComposeError::MissingDependency {
                    module: module.module_id().to_string(),
                    dependency: dependency.clone(),
                });
            }
        }
        pending.push(declared);
    }

    let mut emitted: Vec<usize> = Vec::with_capacity(modules.len());
    let mut done: BTreeSet<String> = BTreeSet::new();
    let mut remaining: Vec<usize> = (0..modules.len()).collect();

    while !remaining.is_empty() {
        let mut ready: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| pending[i].iter().all(|d| done.contains(d)))
            .collect();

        if ready.is_empty() {
            return Err(ComposeError::CyclicDependency {
                cycle: find_cycle(modules, &remaining),
            });
        }

        // One module per step: a module unblocked by this emission
        // competes on priority at the very next selection.
        ready.sort_by(|&a, &b| {
            modules[b]
                .priority()
                .cmp(&modules[a].priority())
                .then_with(|| modules[a].module_id().cmp(modules[b].module_id()))
        });
        let index = ready[0];
        emitted.push(index);
        done.insert(modules[index].module_id().to_string());
        remaining.retain(|&i| i != index);
    }

    Ok(emitted)
}

/// Walk dependency edges among the stuck modules until a node repeats,
/// then return the cycle path for the error message.
fn find_cycle(modules: &[Box<dyn PromptModule>], stuck: &[usize]) -> Vec<String> {
    let ids: BTreeMap<&str, usize> = stuck
        .iter()
        .map(|&i| (modules[i].module_id(), i))
        .collect();

    let start = stuck[0];
    let mut path: Vec<usize> = vec![start];
    let mut current = start;

    loop {
        let next = modules[current]
            .dependencies()
            .iter()
            .find_map(|d| ids.get(d.as_str()).copied());
        let Some(next) = next else {
            // Stuck on dependencies outside the stuck set; report the
            // path walked so far.
            break;
        };
        if let Some(pos) = path.iter().position(|&i| i == next) {
            path.push(next);
            path.drain(..pos);
            break;
        }
        path.push(next);
        current = next;
    }

    path.iter()
        .map(|&i| modules[i].module_id().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::deps;
    use glossa_types::{Category, ClassificationResult, ConfidenceLabel, TermContext};
    use std::collections::BTreeMap;

    struct Fixed {
        id: &'static str,
        priority: i32,
        dependencies: BTreeSet<String>,
    }

    impl Fixed {
        fn boxed(id: &'static str, priority: i32, dependencies: &[&str]) -> Box<dyn PromptModule> {
            Box::new(Fixed {
                id,
                priority,
                dependencies: deps(dependencies),
            })
        }
    }

    impl PromptModule for Fixed {
        fn module_id(&self) -> &str {
            self.id
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn dependencies(&self) -> BTreeSet<String> {
            self.dependencies.clone()
        }
        fn execute(&self, _context: &PromptContext) -> String {
            format!("[{}]", self.id)
        }
    }

    fn make_context() -> PromptContext {
        let scores: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        PromptContext::new(
            TermContext::new("besluit").with_legal("Awb"),
            ClassificationResult {
                category: Category::Resultaat,
                confidence: 0.5,
                confidence_label: ConfidenceLabel::Medium,
                all_scores: scores,
                cascade_applied: false,
                override_applied: false,
            },
        )
    }

    // Dependency ordering from the acceptance checklist: A (priority 10)
    // depends on B (priority 5); order is [B, A] for any priorities.
    #[test]
    fn dependencies_outrank_priority() {
        let modules = vec![Fixed::boxed("A", 10, &["B"]), Fixed::boxed("B", 5, &[])];
        let artifact = PromptOrchestrator::compose(&modules, &make_context()).unwrap();
        assert_eq!(artifact.manifest, vec!["B", "A"]);
    }

    #[test]
    fn ready_set_ordered_by_priority_then_id() {
        let modules = vec![
            Fixed::boxed("c", 5, &[]),
            Fixed::boxed("a", 5, &[]),
            Fixed::boxed("b", 9, &[]),
        ];
        let artifact = PromptOrchestrator::compose(&modules, &make_context()).unwrap();
        assert_eq!(artifact.manifest, vec!["b", "a", "c"]);
    }

    #[test]
    fn order_is_independent_of_registration_order() {
        let build = |ids: &[(&'static str, i32, &[&str])]| {
            ids.iter()
                .copied()
                .map(|(id, p, d)| Fixed::boxed(id, p, d))
                .collect::<Vec<_>>()
        };
        let forward = build(&[("x", 1, &[]), ("y", 2, &["x"]), ("z", 3, &[])]);
        let backward = build(&[("z", 3, &[]), ("y", 2, &["x"]), ("x", 1, &[])]);
        let a = PromptOrchestrator::compose(&forward, &make_context()).unwrap();
        let b = PromptOrchestrator::compose(&backward, &make_context()).unwrap();
        assert_eq!(a.manifest, b.manifest);
        assert_eq!(a.rendered(), b.rendered());
    }

    // Missing dependency from the acceptance checklist.
    #[test]
    fn missing_dependency_names_module_and_dep() {
        let modules = vec![Fixed::boxed("C", 0, &["nonexistent"])];
        let err = PromptOrchestrator::compose(&modules, &make_context()).unwrap_err();
        match err {
            ComposeError::MissingDependency { module, dependency } => {
                assert_eq!(module, "C");
                assert_eq!(dependency, "nonexistent");
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }

    #[test]
    fn cycle_is_reported_with_path() {
        let modules = vec![
            Fixed::boxed("a", 0, &["b"]),
            Fixed::boxed("b", 0, &["c"]),
            Fixed::boxed("c", 0, &["a"]),
        ];
        let err = PromptOrchestrator::compose(&modules, &make_context()).unwrap_err();
        match err {
            ComposeError::CyclicDependency { cycle } => {
                assert!(cycle.len() >= 3);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_module_rejected() {
        let modules = vec![Fixed::boxed("a", 0, &[]), Fixed::boxed("a", 1, &[])];
        let err = PromptOrchestrator::compose(&modules, &make_context()).unwrap_err();
        assert!(matches!(err, ComposeError::DuplicateModule(id) if id == "a"));
    }

    proptest::proptest! {
        // Registration order never changes the emission order.
        #[test]
        fn manifest_invariant_under_registration_order(
            permutation in proptest::sample::select(vec![
                vec![0usize, 1, 2, 3],
                vec![3, 2, 1, 0],
                vec![1, 3, 0, 2],
                vec![2, 0, 3, 1],
            ])
        ) {
            let specs: [(&'static str, i32, &[&str]); 4] = [
                ("root", 0, &[]),
                ("left", 1, &["root"]),
                ("right", 9, &["root"]),
                ("sink", 5, &["left", "right"]),
            ];
            let baseline: Vec<_> = specs
                .iter()
                .copied()
                .map(|(id, p, d)| Fixed::boxed(id, p, d))
                .collect();
            let expected = PromptOrchestrator::compose(&baseline, &make_context()).unwrap();

            let shuffled: Vec<_> = permutation
                .iter()
                .map(|&i| specs[i])
                .map(|(id, p, d)| Fixed::boxed(id, p, d))
                .collect();
            let actual = PromptOrchestrator::compose(&shuffled, &make_context()).unwrap();
            proptest::prop_assert_eq!(&actual.manifest, &expected.manifest);
            proptest::prop_assert_eq!(actual.rendered(), expected.rendered());
        }
    }

    #[test]
    fn diamond_graph_resolves_deterministically() {
        let modules = vec![
            Fixed::boxed("sink", 0, &["left", "right"]),
            Fixed::boxed("left", 1, &["root"]),
            Fixed::boxed("right", 9, &["root"]),
            Fixed::boxed("root", 0, &[]),
        ];
        let artifact = PromptOrchestrator::compose(&modules, &make_context()).unwrap();
        assert_eq!(artifact.manifest, vec!["root", "right", "left", "sink"]);
    }
}
