use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A parsed XML element with its attributes, text and children
///
/// Lookups match on local names, so `lido:title` is found as `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified name as written in the document
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

fn local_part(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

impl XmlElement {
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// First child with the given local name
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    /// All children with the given local name
    pub fn children_named<'a, 's>(
        &'a self,
        local: &'s str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 's> {
        self.children.iter().filter(move |c| c.local_name() == local)
    }

    /// Follow the first match at every step of a path
    pub fn path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |element, step| element.child(step))
    }

    /// Every element reachable through the path, following repeated
    /// elements on all branches
    pub fn find_all<'a>(&'a self, path: &[&str]) -> Vec<&'a XmlElement> {
        let mut current = vec![self];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|element| element.children_named(step))
                .collect();
        }
        current
    }

    /// Attribute value by local name (`lang` matches `xml:lang`)
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_part(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed text content, `None` when empty
    pub fn text(&self) -> Option<&str> {
        let text = self.text.trim();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Text at the end of a path
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.path(path).and_then(XmlElement::text)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.context("Malformed attribute")?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .context("Malformed attribute value")?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Parse a full XML document into its root element
pub fn parse_xml(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().context("Failed to read XML event")? {
            Event::Start(ref e) => stack.push(element_from_start(e)?),
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack.pop().context("Unbalanced closing tag")?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape().context("Malformed text")?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        bail!("Unclosed element <{}>", stack[stack.len() - 1].name);
    }
    root.context("Document has no root element")
}
