//! An in-memory page for tests and hosts without a browser document.

use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{FeedbackError, Page, PageElement};

#[derive(Debug, Default)]
struct ElementState {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    inner_html: String,
    disabled: bool,
    style: FxHashMap<String, String>,
    connected: bool,
}

/// A cheaply cloneable handle to an element stored in memory.
///
/// Clones refer to the same element, the way two `web_sys::Element` handles can.
#[derive(Clone, Debug, Default)]
pub struct MemoryElement {
    state: Rc<RefCell<ElementState>>,
}

impl MemoryElement {
    /// Create a detached element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ElementState {
                tag: tag.into(),
                ..Default::default()
            })),
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.state.borrow_mut().classes.push(class.into());
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.state.borrow_mut().id = Some(id.into());
        self
    }

    pub fn with_inner_html(self, html: impl Into<String>) -> Self {
        self.state.borrow_mut().inner_html = html.into();
        self
    }

    pub fn tag(&self) -> String {
        self.state.borrow().tag.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    /// The inline value of a style property, if one was set.
    pub fn style_property(&self, property: &str) -> Option<String> {
        self.state.borrow().style.get(property).cloned()
    }

    /// Whether two handles point at the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn matches(&self, selector: &CompoundSelector) -> bool {
        let state = self.state.borrow();
        if let Some(tag) = &selector.tag {
            if !state.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if state.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        selector
            .classes
            .iter()
            .all(|class| state.classes.iter().any(|c| c == class))
    }
}

impl PageElement for MemoryElement {
    fn inner_html(&self) -> String {
        self.state.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, html: &str) {
        self.state.borrow_mut().inner_html = html.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn set_style_property(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    fn remove(&self) {
        self.state.borrow_mut().connected = false;
    }
}

/// A flat document of [`MemoryElement`]s kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryPage {
    elements: Rc<RefCell<Vec<MemoryElement>>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `element` at the end of the document and return it.
    ///
    /// Appending an element that is already attached moves it to the end. Detached
    /// elements are pruned on the way.
    pub fn append(&self, element: MemoryElement) -> MemoryElement {
        let mut elements = self.elements.borrow_mut();
        elements.retain(|e| e.is_connected() && !e.ptr_eq(&element));
        element.state.borrow_mut().connected = true;
        elements.push(element.clone());
        element
    }

    /// Every element still attached, in document order.
    pub fn elements(&self) -> Vec<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.is_connected())
            .cloned()
            .collect()
    }

    pub fn contains(&self, element: &MemoryElement) -> bool {
        element.is_connected() && self.elements.borrow().iter().any(|e| e.ptr_eq(element))
    }
}

impl Page for MemoryPage {
    type Element = MemoryElement;

    fn query_selector_all(&self, selectors: &str) -> Result<Vec<MemoryElement>, FeedbackError> {
        let parsed = parse_selector_list(selectors)?;
        Ok(self
            .elements()
            .into_iter()
            .filter(|element| parsed.iter().any(|selector| element.matches(selector)))
            .collect())
    }
}

/// `tag`, `.class` and `#id` parts with no combinators.
#[derive(Debug, Default, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

fn parse_selector_list(list: &str) -> Result<Vec<CompoundSelector>, FeedbackError> {
    list.split(',')
        .map(|part| parse_compound(part.trim()).ok_or_else(|| FeedbackError::invalid_selector(list)))
        .collect()
}

fn parse_compound(input: &str) -> Option<CompoundSelector> {
    fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    if input.is_empty() {
        return None;
    }

    let mut selector = CompoundSelector::default();
    let mut rest = input;

    let tag_len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
    if tag_len > 0 {
        selector.tag = Some(rest[..tag_len].to_string());
        rest = &rest[tag_len..];
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let len = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
        if len == 0 {
            return None;
        }
        let name = body[..len].to_string();
        match marker {
            '.' => selector.classes.push(name),
            '#' if selector.id.is_none() => selector.id = Some(name),
            _ => return None,
        }
        rest = &body[len..];
    }

    Some(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_compound_selectors() {
        assert_eq!(
            parse_compound("div.bg-green-100.p-4"),
            Some(CompoundSelector {
                tag: Some("div".into()),
                id: None,
                classes: vec!["bg-green-100".into(), "p-4".into()],
            })
        );
        assert_eq!(
            parse_compound("#flash"),
            Some(CompoundSelector {
                tag: None,
                id: Some("flash".into()),
                classes: vec![],
            })
        );
    }

    #[test]
    fn rejects_unsupported_selectors() {
        assert_eq!(parse_compound(""), None);
        assert_eq!(parse_compound("."), None);
        assert_eq!(parse_compound("div > p"), None);
        assert_eq!(parse_compound("#a#b"), None);

        let page = MemoryPage::new();
        assert_eq!(
            page.query_selector_all(".ok, ").unwrap_err(),
            FeedbackError::InvalidSelector {
                selector: ".ok, ".into()
            }
        );
    }

    #[test]
    fn query_returns_document_order_without_duplicates() {
        let page = MemoryPage::new();
        let error = page.append(MemoryElement::new("div").with_class("bg-red-100"));
        page.append(MemoryElement::new("p").with_class("text-sm"));
        let both = page.append(
            MemoryElement::new("div")
                .with_class("bg-green-100")
                .with_class("bg-red-100"),
        );

        let found = page.query_selector_all(".bg-green-100, .bg-red-100").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ptr_eq(&error));
        assert!(found[1].ptr_eq(&both));
    }

    #[test]
    fn removed_elements_are_not_matched() {
        let page = MemoryPage::new();
        let banner = page.append(MemoryElement::new("div").with_class("bg-green-100"));
        banner.remove();
        banner.remove();

        assert!(!page.contains(&banner));
        assert!(page.query_selector_all(".bg-green-100").unwrap().is_empty());
    }

    #[test]
    fn reappended_element_moves_to_the_end() {
        let page = MemoryPage::new();
        let a = page.append(MemoryElement::new("div").with_id("a"));
        let b = page.append(MemoryElement::new("div").with_id("b"));

        a.remove();
        page.append(a.clone());

        let order = page.elements();
        assert_eq!(order.len(), 2);
        assert!(order[0].ptr_eq(&b));
        assert!(order[1].ptr_eq(&a));

        page.append(b.clone());
        let order = page.elements();
        assert!(order[0].ptr_eq(&a));
        assert!(order[1].ptr_eq(&b));
    }

    #[test]
    fn detached_elements_are_pruned() {
        let page = MemoryPage::new();
        for _ in 0..10 {
            page.append(MemoryElement::new("div").with_class("bg-red-100")).remove();
        }
        page.append(MemoryElement::new("p"));

        assert_eq!(page.elements.borrow().len(), 1);
    }

    #[test]
    fn tag_and_id_matching() {
        let page = MemoryPage::new();
        let button = page.append(MemoryElement::new("BUTTON").with_id("save"));
        page.append(MemoryElement::new("button"));

        let found = page.query_selector_all("button#save").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ptr_eq(&button));
    }
}
