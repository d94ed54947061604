//! Canonical user journey text.

use diagrammar_core::{
    structure::journey::{Journey, Task},
    text::format_number,
};

use super::writer::Writer;
use crate::config::RenderOptions;

/// Render a user journey.
pub fn journey(journey: &Journey, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header("journey");
    w.title(&journey.meta);
    w.accessibility(&journey.meta);
    write_tasks(&mut w, &journey.tasks);
    for section in &journey.sections {
        w.line(format!("section {}", section.name));
        w.nested(|w| write_tasks(w, &section.tasks));
    }
    w.finish()
}

/// `Make tea: 5: Me, Cat`
fn write_tasks(w: &mut Writer<'_>, tasks: &[Task]) {
    for task in tasks {
        let mut text = format!("{}: {}", task.name, format_number(task.score));
        if !task.actors.is_empty() {
            text.push_str(": ");
            text.push_str(&task.actors.join(", "));
        }
        w.line(text);
    }
}
