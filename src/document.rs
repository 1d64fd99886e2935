use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{config::Markers, page::CartView};

const HIDDEN_FLAG: &str = "!hidden";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub hidden: bool,
}

impl Element {
    pub fn with_class(class: &str, text: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(id: &str, text: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(id) = &self.id {
            parts.push(format!("#{id}"));
        }
        parts.extend(self.classes.iter().map(|c| format!(".{c}")));
        if self.hidden {
            parts.push(HIDDEN_FLAG.to_string());
        }
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Ordered list of elements, enough of a page to carry the cart markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Parses one element per line: `#id`, `.class` and `!hidden` tokens first, then the text.
    /// Blank lines and lines starting with `//` are skipped.
    pub fn parse_markup(markup: &str) -> Self {
        let elements = markup
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("//"))
            .map(parse_line)
            .collect();
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| e.has_class(class))
    }

    pub fn elements_by_class_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> {
        self.elements.iter_mut().filter(move |e| e.has_class(class))
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id.as_deref() == Some(id))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            writeln!(f, "{element}")?;
        }
        Ok(())
    }
}

fn parse_line(line: &str) -> Element {
    let mut element = Element::default();
    let mut rest = line;

    loop {
        let token = rest.split_whitespace().next().unwrap_or("");
        let is_marker = token.len() > 1 && (token.starts_with('#') || token.starts_with('.'));
        if !is_marker && token != HIDDEN_FLAG {
            break;
        }

        if token == HIDDEN_FLAG {
            element.hidden = true;
        } else if let Some(id) = token.strip_prefix('#') {
            element.id = Some(id.to_string());
        } else if let Some(class) = token.strip_prefix('.') {
            element.classes.push(class.to_string());
        }
        rest = rest.trim_start()[token.len()..].trim_start();
    }

    element.text = rest.to_string();
    element
}

/// [`CartView`] writing into a shared [`Document`] through the configured markers.
#[derive(Debug, Clone)]
pub struct DocumentView {
    document: Arc<Mutex<Document>>,
    markers: Markers,
}

impl DocumentView {
    pub fn new(document: Document, markers: Markers) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            markers,
        }
    }

    /// Copy of the current page state.
    pub fn snapshot(&self) -> Document {
        self.document.lock().clone()
    }

    /// Texts of every element carrying `class`, in page order.
    pub fn texts_of(&self, class: &str) -> Vec<String> {
        self.document
            .lock()
            .elements_by_class(class)
            .map(|e| e.text.clone())
            .collect()
    }

    fn set_text(&self, class: &str, text: &str) {
        let mut document = self.document.lock();
        for element in document.elements_by_class_mut(class) {
            element.text = text.to_string();
        }
    }
}

impl CartView for DocumentView {
    fn render_quantity(&self, text: &str) {
        self.set_text(&self.markers.counter_class, text);
    }

    fn render_amount(&self, text: &str) {
        self.set_text(&self.markers.amount_class, text);
    }

    fn hide_row(&self, product_id: &str) -> bool {
        let row_id = self.markers.row_id(product_id);
        match self.document.lock().element_by_id_mut(&row_id) {
            Some(row) => {
                row.hidden = true;
                true
            }
            None => false,
        }
    }
}
