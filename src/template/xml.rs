//! Minimal element tree over quick-xml events
//!
//! Only what substitution needs: element nesting, unescaped text and every
//! other event carried through untouched so parts round-trip.

use quick_xml::events::{BytesText, Event};
use quick_xml::events::BytesStart;
use quick_xml::{Reader, Writer};

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub start: BytesStart<'static>,
    pub children: Vec<Node>,
    pub self_closing: bool,
}

impl Element {
    pub fn is(&self, name: &[u8]) -> bool {
        self.start.name().into_inner() == name
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn set_text(&mut self, text: &str) {
        let edge_space = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
        if edge_space && !self.has_attribute("xml:space") {
            self.start.push_attribute(("xml:space", "preserve"));
        }
        self.children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(text.to_string())]
        };
        self.self_closing = false;
    }

    fn has_attribute(&self, name: &str) -> bool {
        matches!(self.start.try_get_attribute(name), Ok(Some(_)))
    }
}

pub fn parse(xml: &str) -> Result<Vec<Node>, String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut roots = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {}", reader.buffer_position(), e))?;

        let node = match event {
            Event::Start(start) => {
                stack.push(Element {
                    start: start.into_owned(),
                    children: Vec::new(),
                    self_closing: false,
                });
                continue;
            }
            Event::End(_) => match stack.pop() {
                Some(element) => Node::Element(element),
                None => return Err("unexpected closing tag".to_string()),
            },
            Event::Empty(start) => Node::Element(Element {
                start: start.into_owned(),
                children: Vec::new(),
                self_closing: true,
            }),
            Event::Text(text) => Node::Text(text.unescape().map_err(|e| e.to_string())?.into_owned()),
            Event::Eof => break,
            other => Node::Other(other.into_owned()),
        };

        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    if !stack.is_empty() {
        return Err(format!("{} unclosed element(s)", stack.len()));
    }

    Ok(roots)
}

pub fn write(nodes: &[Node]) -> Result<Vec<u8>, String> {
    let mut writer = Writer::new(Vec::new());
    for node in nodes {
        write_node(&mut writer, node)?;
    }
    Ok(writer.into_inner())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), String> {
    match node {
        Node::Element(element) => {
            if element.self_closing && element.children.is_empty() {
                emit(writer, Event::Empty(element.start.borrow()))?;
            } else {
                emit(writer, Event::Start(element.start.borrow()))?;
                for child in &element.children {
                    write_node(writer, child)?;
                }
                emit(writer, Event::End(element.start.to_end()))?;
            }
        }
        Node::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
        Node::Other(event) => emit(writer, event.borrow())?,
    }
    Ok(())
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}
