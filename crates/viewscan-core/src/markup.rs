//! Minimal reader for view `arch` markup.
//!
//! Only `field` elements matter to the scanner, so the document is streamed
//! once and the relevant attributes are collected. The reader still rejects
//! markup that is not well-formed.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::catalogs::{FIELD_TAG, TRIGGER_ATTRIBUTE};
use crate::error::MarkupError;

/// A `field` element found below the root, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldElement {
    pub name: Option<String>,
    pub on_change: Option<String>,
}

/// Collect every descendant `field` element of the root element.
pub fn field_elements(arch: &str) -> Result<Vec<FieldElement>, MarkupError> {
    let mut reader = Reader::from_str(arch);
    // (tag, byte offset) of currently open elements
    let mut open: Vec<(String, u64)> = Vec::new();
    let mut root_done = false;
    let mut found = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| MarkupError::Syntax {
            position,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                if root_done {
                    return Err(MarkupError::TrailingContent { position });
                }
                let attrs = read_attributes(&e, position)?;
                if !open.is_empty() && e.name().as_ref() == FIELD_TAG {
                    found.push(field_element(attrs));
                }
                open.push((tag_name(&e), position));
            }
            Event::Empty(e) => {
                if root_done {
                    return Err(MarkupError::TrailingContent { position });
                }
                let attrs = read_attributes(&e, position)?;
                if open.is_empty() {
                    root_done = true;
                } else if e.name().as_ref() == FIELD_TAG {
                    found.push(field_element(attrs));
                }
            }
            Event::End(_) => {
                if open.pop().is_none() {
                    return Err(MarkupError::Syntax {
                        position,
                        message: "end tag without matching start tag".into(),
                    });
                }
                if open.is_empty() {
                    root_done = true;
                }
            }
            Event::Text(text) => {
                if open.is_empty() {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(MarkupError::TrailingContent { position });
                    }
                } else {
                    text.unescape().map_err(|err| MarkupError::Syntax {
                        position,
                        message: err.to_string(),
                    })?;
                }
            }
            Event::CData(_) => {
                if open.is_empty() {
                    return Err(MarkupError::TrailingContent { position });
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some((tag, position)) = open.pop() {
        return Err(MarkupError::Unclosed { tag, position });
    }
    if !root_done {
        return Err(MarkupError::NoRoot);
    }

    Ok(found)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Unescaped `(key, value)` pairs of an element. Unquoted, duplicated or
/// badly escaped attributes and a raw `<` in a value are errors.
fn read_attributes(
    e: &BytesStart<'_>,
    position: u64,
) -> Result<Vec<(Vec<u8>, String)>, MarkupError> {
    let syntax = |message: String| MarkupError::Syntax { position, message };

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| syntax(err.to_string()))?;
        if attr.value.contains(&b'<') {
            return Err(syntax(format!(
                "'<' in value of attribute {}",
                String::from_utf8_lossy(attr.key.as_ref())
            )));
        }
        let value = attr
            .unescape_value()
            .map_err(|err| syntax(err.to_string()))?;
        attrs.push((attr.key.as_ref().to_vec(), value.into_owned()));
    }
    Ok(attrs)
}

fn field_element(attrs: Vec<(Vec<u8>, String)>) -> FieldElement {
    let mut element = FieldElement {
        name: None,
        on_change: None,
    };
    for (key, value) in attrs {
        match key.as_slice() {
            b"name" => element.name = Some(value),
            k if k == TRIGGER_ATTRIBUTE => element.on_change = Some(value),
            _ => {}
        }
    }
    element
}
