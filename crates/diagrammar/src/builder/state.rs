//! State diagram builder.

use log::debug;
use thiserror::Error;

use diagrammar_core::structure::{
    ClassDef, Direction,
    state::{NoteSide, PSEUDO_STATE, State, StateBody, StateDiagram, StateNote, Transition},
};

use crate::config::BuildOptions;

/// A reference a state diagram could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateValidationError {
    #[error("unknown state `{id}` referenced by {referenced_by}")]
    UnknownState { id: String, referenced_by: String },

    #[error("undefined class `{id}` referenced by {referenced_by}")]
    UndefinedClass { id: String, referenced_by: String },
}

/// Declaration methods shared by the diagram and composite builders.
macro_rules! body_methods {
    () => {
        /// Declare a state in this scope. Declaring an id again replaces its
        /// record in place.
        pub fn state(mut self, state: State) -> Self {
            self.body_mut().states.insert(state.id.clone(), state);
            self
        }

        pub fn transition(mut self, transition: Transition) -> Self {
            self.body_mut().transitions.push(transition);
            self
        }

        /// Open the composite state `id`, declaring it if needed. Opening the
        /// same composite again continues its body.
        pub fn composite<F>(mut self, id: impl Into<String>, scope: F) -> Self
        where
            F: FnOnce(CompositeBuilder) -> CompositeBuilder,
        {
            let id = id.into();
            let inner = self
                .body_mut()
                .states
                .get_mut(&id)
                .and_then(|state| state.body.take())
                .unwrap_or_default();
            let filled = scope(CompositeBuilder { body: inner }).body;
            self.body_mut()
                .states
                .entry(id.clone())
                .or_insert_with(|| State::new(id))
                .body = Some(filled);
            self
        }
    };
}

/// Accumulates a [`StateDiagram`].
#[derive(Debug, Clone, Default)]
pub struct StateBuilder {
    diagram: StateDiagram,
    /// `(state, class)` pairs applied at build time.
    assignments: Vec<(String, String)>,
}

impl StateBuilder {
    metadata_setters!(diagram);

    pub fn direction(mut self, direction: Direction) -> Self {
        self.diagram.direction = direction;
        self
    }

    body_methods!();

    fn body_mut(&mut self) -> &mut StateBody {
        &mut self.diagram.body
    }

    pub fn note(
        mut self,
        side: NoteSide,
        state: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.diagram.notes.push(StateNote {
            side,
            state: state.into(),
            text: text.into(),
        });
        self
    }

    pub fn class_def<I, S>(mut self, name: impl Into<String>, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let def = ClassDef::new(name, styles);
        self.diagram.class_defs.insert(def.name().to_string(), def);
        self
    }

    /// Assign `class` to the state `id` wherever it is declared.
    pub fn class(mut self, id: impl Into<String>, class: impl Into<String>) -> Self {
        self.assignments.push((id.into(), class.into()));
        self
    }

    /// Produce the state diagram.
    ///
    /// # Errors
    ///
    /// With validation enabled, fails on the first transition endpoint, class
    /// assignment or note naming an undeclared state, or a state class without
    /// a `classDef`. `[*]` is always a valid endpoint. Unchecked builds declare
    /// unresolved class targets at the top level.
    pub fn build(self, options: BuildOptions) -> Result<StateDiagram, StateValidationError> {
        let Self {
            mut diagram,
            assignments,
        } = self;
        debug!(
            states = diagram.state_ids().len(),
            validate = options.validate();
            "Building state diagram"
        );

        for (id, class) in assignments {
            if find_state_mut(&mut diagram.body, &id).is_none() {
                if options.validate() {
                    return Err(StateValidationError::UnknownState {
                        referenced_by: format!("class assignment `{class}`"),
                        id,
                    });
                }
                diagram.body.states.insert(id.clone(), State::new(id.clone()));
            }
            if let Some(state) = find_state_mut(&mut diagram.body, &id) {
                if !state.classes.contains(&class) {
                    state.classes.push(class);
                }
            }
        }

        if options.validate() {
            validate(&diagram)?;
        }
        Ok(diagram)
    }
}

fn find_state_mut<'a>(body: &'a mut StateBody, id: &str) -> Option<&'a mut State> {
    if body.states.contains_key(id) {
        return body.states.get_mut(id);
    }
    body.states
        .values_mut()
        .find_map(|state| state.body.as_mut().and_then(|inner| find_state_mut(inner, id)))
}

fn validate(diagram: &StateDiagram) -> Result<(), StateValidationError> {
    let ids = diagram.state_ids();
    let require = |id: &str, referenced_by: &dyn Fn() -> String| {
        if id == PSEUDO_STATE || ids.contains(&id) {
            Ok(())
        } else {
            Err(StateValidationError::UnknownState {
                id: id.to_string(),
                referenced_by: referenced_by(),
            })
        }
    };

    let mut states = Vec::new();
    let mut transitions = Vec::new();
    walk(&diagram.body, &mut states, &mut transitions);

    for transition in transitions {
        let describe = || format!("transition {} --> {}", transition.source, transition.target);
        require(&transition.source, &describe)?;
        require(&transition.target, &describe)?;
    }
    for state in states {
        if let Some(class) = state.classes.iter().find(|c| !diagram.class_defs.contains_key(*c)) {
            return Err(StateValidationError::UndefinedClass {
                id: class.clone(),
                referenced_by: format!("state {}", state.id),
            });
        }
    }
    for note in &diagram.notes {
        let describe = || format!("note {}", note.side.as_str());
        if note.state == PSEUDO_STATE {
            return Err(StateValidationError::UnknownState {
                id: note.state.clone(),
                referenced_by: describe(),
            });
        }
        require(&note.state, &describe)?;
    }
    Ok(())
}

/// Every state and transition of `body`, depth first.
fn walk<'a>(
    body: &'a StateBody,
    states: &mut Vec<&'a State>,
    transitions: &mut Vec<&'a Transition>,
) {
    transitions.extend(&body.transitions);
    for state in body.states.values() {
        states.push(state);
        if let Some(inner) = &state.body {
            walk(inner, states, transitions);
        }
    }
}

/// Accumulates the body of one composite state.
#[derive(Debug, Clone)]
pub struct CompositeBuilder {
    body: StateBody,
}

impl CompositeBuilder {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.body.direction = Some(direction);
        self
    }

    body_methods!();

    fn body_mut(&mut self) -> &mut StateBody {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use diagrammar_core::structure::state::StateKind;

    use super::*;

    #[test]
    fn test_composites_nest_and_reopen() {
        let diagram = StateBuilder::default()
            .state(State::new("Idle").with_description("Waiting"))
            .transition(Transition::new(PSEUDO_STATE, "Idle"))
            .composite("Active", |c| {
                c.direction(Direction::LeftToRight)
                    .state(State::new("Running"))
                    .transition(Transition::new(PSEUDO_STATE, "Running"))
            })
            .composite("Active", |c| {
                c.state(State::new("Paused").with_kind(StateKind::Choice))
            })
            .transition(Transition::new("Idle", "Paused").with_label("pause"))
            .build(BuildOptions::default())
            .unwrap();

        assert_eq!(diagram.state_ids(), ["Idle", "Active", "Running", "Paused"]);
        let active = diagram.body.states["Active"].body.as_ref().unwrap();
        assert_eq!(active.direction, Some(Direction::LeftToRight));
        assert_eq!(active.transitions.len(), 1);
    }

    #[test]
    fn test_unknown_transition_endpoint() {
        let builder = StateBuilder::default()
            .state(State::new("Idle"))
            .composite("Active", |c| c.transition(Transition::new("Idle", "Gone")));

        let err = builder.clone().build(BuildOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown state `Gone` referenced by transition Idle --> Gone"
        );
        assert!(builder.build(BuildOptions::unchecked()).is_ok());
    }

    #[test]
    fn test_class_assignments_reach_nested_states() {
        let diagram = StateBuilder::default()
            .composite("Active", |c| c.state(State::new("Running")))
            .class_def("hot", ["fill:red"])
            .class("Running", "hot")
            .build(BuildOptions::default())
            .unwrap();
        let active = diagram.body.states["Active"].body.as_ref().unwrap();
        assert_eq!(active.states["Running"].classes, ["hot"]);

        let err = StateBuilder::default()
            .state(State::new("A"))
            .class("A", "cold")
            .build(BuildOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            StateValidationError::UndefinedClass {
                id: "cold".into(),
                referenced_by: "state A".into(),
            }
        );

        let diagram = StateBuilder::default()
            .class("B", "cold")
            .build(BuildOptions::unchecked())
            .unwrap();
        assert_eq!(diagram.body.states["B"].classes, ["cold"]);
    }

    #[test]
    fn test_note_target_must_be_a_state() {
        let err = StateBuilder::default()
            .note(NoteSide::Right, "Nowhere", "text")
            .build(BuildOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown state `Nowhere` referenced by note right of");

        let err = StateBuilder::default()
            .note(NoteSide::Left, PSEUDO_STATE, "text")
            .build(BuildOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            StateValidationError::UnknownState { ref id, .. } if id == PSEUDO_STATE
        ));
    }
}
