use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTableRowElement};

use omc_friends_shared::{RowFacts, StandingsTable, normalize};

use crate::config::{
    HIGHLIGHT_BACKGROUND, HIGHLIGHT_BORDER, INJECTED_CLASS, INJECTED_ROW_STYLE, ROW_SELECTOR,
    STANDINGS_ROOT_SELECTOR, STAR_CLASS, TBODY_SELECTOR, USER_LINK_SELECTOR,
};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn standings_root(document: &Document) -> Option<Element> {
    document.query_selector(STANDINGS_ROOT_SELECTOR).ok().flatten()
}

/// All elements under `root` matching `selector`, in document order.
pub fn query_all<T: JsCast>(root: &impl AsRef<web_sys::Node>, selector: &str) -> Vec<T> {
    let node: &web_sys::Node = root.as_ref();
    let list = if let Some(element) = node.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else if let Some(document) = node.dyn_ref::<Document>() {
        document.query_selector_all(selector)
    } else {
        return Vec::new();
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Text of a user link without any star control we appended to it.
pub fn link_text(link: &Element) -> String {
    let Ok(copy) = link.clone_node_with_deep(true) else {
        return String::new();
    };
    let Ok(copy) = copy.dyn_into::<Element>() else {
        return String::new();
    };
    for star in query_all::<Element>(&copy, &format!(".{STAR_CLASS}")) {
        star.remove();
    }
    copy.text_content().unwrap_or_default()
}

pub fn link_key(link: &Element) -> String {
    normalize(&link_text(link))
}

/// The host's standings table, read and patched in place.
pub struct DomTable {
    document: Document,
}

impl DomTable {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn tbody(&self) -> Option<Element> {
        self.document.query_selector(TBODY_SELECTOR).ok().flatten()
    }

    fn injected_rows(&self) -> Vec<Element> {
        match self.tbody() {
            Some(tbody) => query_all(&tbody, &format!(".{INJECTED_CLASS}")),
            None => Vec::new(),
        }
    }
}

impl StandingsTable for DomTable {
    type Row = HtmlElement;

    fn rows(&self) -> Vec<HtmlElement> {
        query_all(&self.document, ROW_SELECTOR)
    }

    fn facts(&self, row: &HtmlElement) -> RowFacts {
        let link = row.query_selector(USER_LINK_SELECTOR).ok().flatten();
        let first_cell_text = row
            .dyn_ref::<HtmlTableRowElement>()
            .and_then(|tr| tr.cells().item(0))
            .and_then(|cell| cell.dyn_into::<HtmlElement>().ok())
            .map(|cell| cell.inner_text());
        RowFacts {
            injected: row.class_list().contains(INJECTED_CLASS),
            user_link_text: link.as_ref().map(link_text),
            has_heading_cell: row.query_selector("th").ok().flatten().is_some(),
            first_cell_text,
        }
    }

    fn row_markup(&self, row: &HtmlElement) -> String {
        row.inner_html()
    }

    fn set_hidden(&mut self, row: &HtmlElement, hidden: bool) {
        let style = row.style();
        if hidden {
            let _ = style.set_property_with_priority("display", "none", "important");
        } else {
            let _ = style.remove_property("display");
        }
    }

    fn set_highlighted(&mut self, row: &HtmlElement, highlighted: bool) {
        let style = row.style();
        if highlighted {
            let _ = style.set_property("background", HIGHLIGHT_BACKGROUND);
            let _ = style.set_property("border-left", HIGHLIGHT_BORDER);
        } else {
            let _ = style.remove_property("background");
            let _ = style.remove_property("border-left");
        }
    }

    fn injected_count(&self) -> usize {
        self.injected_rows().len()
    }

    fn remove_injected(&mut self) {
        for row in self.injected_rows() {
            row.remove();
        }
    }

    fn append_injected(&mut self, inner_html: &str) {
        let Some(tbody) = self.tbody() else {
            return;
        };
        let Ok(tr) = self.document.create_element("tr") else {
            return;
        };
        tr.set_class_name(INJECTED_CLASS);
        let _ = tr.set_attribute("style", INJECTED_ROW_STYLE);
        tr.set_inner_html(inner_html);
        let _ = tbody.append_child(&tr);
    }
}
