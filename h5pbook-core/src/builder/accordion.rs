//! Accordion builder: panels split on `+++Title` marker lines

use super::{text_object, BlockBuilder, BuildContext};
use crate::types::{
    AccordionPanel, AccordionParams, ContentMetadata, ContentObject, ContentParams, ContentType,
    LibraryId,
};

/// Title used when a marker line carries no text
pub const DEFAULT_PANEL_TITLE: &str = "Panel";

const PANEL_MARKER: &str = "+++";

pub struct AccordionBuilder;

impl BlockBuilder for AccordionBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::Accordion
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        ctx: &BuildContext<'_>,
    ) -> ContentObject {
        let panels = split_panels(lines)
            .into_iter()
            .map(|(title, body)| AccordionPanel {
                content: text_object(ctx.text_library(), ctx.render(&body.join("\n")), &title),
                title,
            })
            .collect();

        ContentObject::new(
            library,
            ContentParams::Accordion(AccordionParams {
                panels,
                heading_tag: "h2".to_string(),
            }),
            ContentMetadata::new("Accordion", ContentType::Accordion),
        )
    }
}

/// Split lines into `(title, body)` panels in source order.
///
/// Lines before the first marker are discarded.
pub fn split_panels(lines: &[String]) -> Vec<(String, Vec<String>)> {
    let mut panels: Vec<(String, Vec<String>)> = Vec::new();

    for line in lines {
        if let Some(rest) = line.trim_start().strip_prefix(PANEL_MARKER) {
            let title = rest.trim();
            let title = if title.is_empty() {
                DEFAULT_PANEL_TITLE
            } else {
                title
            };
            panels.push((title.to_string(), Vec::new()));
        } else if let Some((_, body)) = panels.last_mut() {
            body.push(line.clone());
        }
    }

    panels
}
