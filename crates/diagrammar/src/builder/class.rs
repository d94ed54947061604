//! Class diagram builder.

use log::debug;
use thiserror::Error;

use diagrammar_core::structure::{
    ClassDef, Direction,
    class::{ClassDiagram, ClassNode, ClassNote, ClassRelation, Namespace},
};

use crate::config::BuildOptions;

/// A reference a class diagram could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassValidationError {
    #[error("unknown class `{id}` referenced by {referenced_by}")]
    UnknownClass { id: String, referenced_by: String },

    #[error("undefined cssClass `{id}` referenced by {referenced_by}")]
    UndefinedCssClass { id: String, referenced_by: String },
}

/// Accumulates a [`ClassDiagram`].
#[derive(Debug, Clone, Default)]
pub struct ClassBuilder {
    diagram: ClassDiagram,
    /// `(class, cssClass)` pairs applied at build time.
    assignments: Vec<(String, String)>,
}

impl ClassBuilder {
    metadata_setters!(diagram);

    pub fn direction(mut self, direction: Direction) -> Self {
        self.diagram.direction = direction;
        self
    }

    /// Declare a class. Declaring an id again replaces its record in place.
    pub fn class(mut self, class: ClassNode) -> Self {
        self.diagram.classes.insert(class.id.clone(), class);
        self
    }

    pub fn relation(mut self, relation: ClassRelation) -> Self {
        self.diagram.relations.push(relation);
        self
    }

    /// Open a namespace; classes declared in `scope` become its members.
    pub fn namespace<F>(mut self, name: impl Into<String>, scope: F) -> Self
    where
        F: FnOnce(NamespaceBuilder) -> NamespaceBuilder,
    {
        let child = scope(NamespaceBuilder::new(name));
        for class in child.classes {
            self.diagram.classes.insert(class.id.clone(), class);
        }
        self.diagram.namespaces.push(child.namespace);
        self
    }

    /// A note attached to no class.
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.diagram.notes.push(ClassNote {
            target: None,
            text: text.into(),
        });
        self
    }

    pub fn note_for(mut self, class: impl Into<String>, text: impl Into<String>) -> Self {
        self.diagram.notes.push(ClassNote {
            target: Some(class.into()),
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

    /// `cssClass "id" name`; the class may be declared later.
    pub fn css_class(mut self, id: impl Into<String>, css_class: impl Into<String>) -> Self {
        self.assignments.push((id.into(), css_class.into()));
        self
    }

    /// Produce the class diagram.
    ///
    /// # Errors
    ///
    /// With validation enabled, fails on the first relation endpoint, note
    /// or `cssClass` target naming an undeclared class, or a `cssClass` with
    /// no `classDef`.
    pub fn build(self, options: BuildOptions) -> Result<ClassDiagram, ClassValidationError> {
        let Self {
            mut diagram,
            assignments,
        } = self;
        debug!(
            classes = diagram.classes.len(),
            relations = diagram.relations.len(),
            validate = options.validate();
            "Building class diagram"
        );

        for (id, css_class) in assignments {
            if options.validate() && !diagram.classes.contains_key(&id) {
                return Err(ClassValidationError::UnknownClass {
                    referenced_by: format!("cssClass `{css_class}`"),
                    id,
                });
            }
            diagram
                .classes
                .entry(id.clone())
                .or_insert_with(|| ClassNode::new(id))
                .css_classes
                .push(css_class);
        }

        if options.validate() {
            validate(&diagram)?;
        }
        Ok(diagram)
    }
}

fn validate(diagram: &ClassDiagram) -> Result<(), ClassValidationError> {
    let require = |id: &str, referenced_by: String| {
        if diagram.classes.contains_key(id) {
            Ok(())
        } else {
            Err(ClassValidationError::UnknownClass {
                id: id.to_string(),
                referenced_by,
            })
        }
    };

    for relation in &diagram.relations {
        let describe = format!("relation {} -- {}", relation.source, relation.target);
        require(&relation.source, describe.clone())?;
        require(&relation.target, describe)?;
    }
    for note in &diagram.notes {
        if let Some(target) = &note.target {
            require(target, "a note".to_string())?;
        }
    }
    for class in diagram.classes.values() {
        let undefined = class
            .css_classes
            .iter()
            .find(|c| !diagram.class_defs.contains_key(*c));
        if let Some(css_class) = undefined {
            return Err(ClassValidationError::UndefinedCssClass {
                id: css_class.clone(),
                referenced_by: format!("class {}", class.id),
            });
        }
    }
    Ok(())
}

/// Accumulates one namespace inside a [`ClassBuilder`].
#[derive(Debug, Clone)]
pub struct NamespaceBuilder {
    namespace: Namespace,
    classes: Vec<ClassNode>,
}

impl NamespaceBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace {
                name: name.into(),
                classes: Vec::new(),
            },
            classes: Vec::new(),
        }
    }

    /// Declare a class and make it a member of this namespace.
    pub fn class(mut self, class: ClassNode) -> Self {
        if !self.namespace.classes.contains(&class.id) {
            self.namespace.classes.push(class.id.clone());
        }
        self.classes.push(class);
        self
    }
}
