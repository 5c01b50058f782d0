// stagehand-core/src/domain/flow/plan.rs

use crate::domain::error::DomainError;
use crate::domain::flow::{FlowConfig, StepAction, StepSpec};
use std::collections::{BTreeSet, HashMap};

/// The validated, strictly sequential execution order of a flow.
///
/// Steps run one at a time. When the declared dependencies leave room
/// (two steps ready at once), declaration order breaks the tie, so the
/// sequence is stable across runs.
pub struct FlowPlan<'a> {
    ordered: Vec<&'a StepSpec>,
}

impl<'a> FlowPlan<'a> {
    /// Linearizes the step graph (Topological Sort, Kahn).
    ///
    /// Rejects duplicate step names, references to unknown steps, cycles,
    /// and any notify step that could run before a link was signed.
    pub fn sequence(flow: &'a FlowConfig) -> Result<Self, DomainError> {
        let steps = &flow.steps;

        // 1. Name index, with duplicate detection
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            if index.insert(step.name.as_str(), i).is_some() {
                return Err(DomainError::DuplicateStep(step.name.clone()));
            }
        }

        // 2. Graph construction (dependency inversion)
        let mut in_degree = vec![0usize; steps.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); steps.len()];
        for (i, step) in steps.iter().enumerate() {
            for dep in &step.depends_on {
                let Some(&j) = index.get(dep.as_str()) else {
                    return Err(DomainError::UnknownDependency {
                        step: step.name.clone(),
                        dependency: dep.clone(),
                    });
                };
                dependents[j].push(i);
                in_degree[i] += 1;
            }
        }

        // 3. Kahn's algorithm; the ready set is ordered by declaration index
        let mut ready: BTreeSet<usize> = (0..steps.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut ordered: Vec<&StepSpec> = Vec::with_capacity(steps.len());

        while let Some(&i) = ready.iter().next() {
            ready.remove(&i);
            ordered.push(&steps[i]);
            for &dependent in &dependents[i] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        // 4. Cycle detection
        if ordered.len() != steps.len() {
            let stuck: Vec<&str> = steps
                .iter()
                .enumerate()
                .filter(|(i, _)| in_degree[*i] > 0)
                .map(|(_, s)| s.name.as_str())
                .collect();
            return Err(DomainError::CircularDependency(stuck.join(", ")));
        }

        // 5. A link must be signed before anyone can announce it
        let mut link_seen = false;
        for step in &ordered {
            match &step.action {
                StepAction::PresignGet => link_seen = true,
                StepAction::Notify if !link_seen => {
                    return Err(DomainError::NotifyBeforeLink(step.name.clone()));
                }
                _ => {}
            }
        }

        Ok(Self { ordered })
    }

    pub fn steps(&self) -> impl Iterator<Item = &'a StepSpec> + '_ {
        self.ordered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
