use crate::config::MarkupConfig;
use crate::core::controller::ModalController;
use crate::domain::ports::{Document, EventKind, EventOutcome, EventTarget, Key, Selector, UiEvent};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    data: BTreeMap<String, String>,
    text: String,
    hidden: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            data: BTreeMap::new(),
            text: String::new(),
            hidden: false,
            parent: None,
            children: Vec::new(),
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Tag(tag) => &self.tag == tag,
            Selector::Data { key, value } => match (self.data.get(key), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

/// Arena-backed document tree implementing [`Document`] without a rendering surface.
///
/// Removed subtrees are freed; their [`NodeId`]s stay dangling and every query on
/// them answers as if the element no longer exists.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    nodes: Vec<Option<Element>>,
    body: NodeId,
    active: Option<NodeId>,
    listeners: Vec<(EventTarget<NodeId>, EventKind)>,
    card_attribute: String,
    last_focus_prevented_scroll: Option<bool>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            body: NodeId(0),
            active: None,
            listeners: Vec::new(),
            card_attribute: MarkupConfig::default().business_attribute,
            last_focus_prevented_scroll: None,
        }
    }

    /// Builds the review-bot page: a `main` with one card per business id and the
    /// hidden overlay with its window, header and footer dismiss buttons, stats and
    /// review list.
    pub fn scaffold<I, S>(markup: &MarkupConfig, business_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Self::new();
        doc.card_attribute = markup.business_attribute.clone();
        let body = doc.body;

        let main = doc.element(&body, "main");
        for business_id in business_ids {
            let card = doc.element(&main, "article");
            doc.apply_selector(&card, &markup.card_selector);
            doc.set_data_attribute(&card, &markup.business_attribute, business_id.as_ref());
            doc.set_text(&card, business_id.as_ref());
        }

        let overlay = doc.element(&body, "div");
        doc.set_id(&overlay, &markup.overlay_id);
        doc.add_class(&overlay, "bot-overlay");
        doc.set_hidden(&overlay, true);

        let window = doc.element(&overlay, "section");
        doc.apply_selector(&window, &markup.window_selector);

        let header = doc.element(&window, "header");
        doc.add_class(&header, "bot-header");
        let heading = doc.element(&header, "h2");
        doc.set_id(&heading, &markup.heading_id);
        let subheading = doc.element(&header, "p");
        doc.set_id(&subheading, &markup.subheading_id);
        let close_header = doc.element(&header, "button");
        doc.apply_selector(&close_header, &markup.close_selector);

        let content = doc.element(&window, "div");
        doc.add_class(&content, "bot-body");
        let summary = doc.element(&content, "p");
        doc.set_id(&summary, &markup.summary_id);
        let stats = doc.element(&content, "div");
        doc.add_class(&stats, "bot-stats");
        let average = doc.element(&stats, "span");
        doc.set_id(&average, &markup.average_id);
        let count = doc.element(&stats, "span");
        doc.set_id(&count, &markup.count_id);
        let reviews = doc.element(&content, "ul");
        doc.set_id(&reviews, &markup.reviews_id);

        let footer = doc.element(&window, "footer");
        doc.add_class(&footer, "bot-footer");
        let close_footer = doc.element(&footer, "button");
        doc.apply_selector(&close_footer, &markup.close_selector);

        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Creates a `tag` element and appends it to `parent`.
    pub fn element(&mut self, parent: &NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(parent, &node);
        node
    }

    pub fn set_id(&mut self, node: &NodeId, id: &str) {
        if let Some(element) = self.get_mut(node) {
            element.id = Some(id.to_string());
        }
    }

    pub fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    /// Makes `node` match `selector` where that is possible after creation.
    fn apply_selector(&mut self, node: &NodeId, selector: &str) {
        match Selector::parse(selector) {
            Ok(Selector::Class(class)) => self.add_class(node, &class),
            Ok(Selector::Id(id)) => self.set_id(node, &id),
            Ok(Selector::Data { key, value }) => {
                self.set_data_attribute(node, &key, value.as_deref().unwrap_or(""))
            }
            Ok(Selector::Tag(_)) | Err(_) => {
                tracing::trace!("Selector '{}' cannot be applied to an existing element", selector)
            }
        }
    }

    pub fn card(&self, business_id: &str) -> Option<NodeId> {
        let selector = Selector::Data {
            key: self.card_attribute.clone(),
            value: Some(business_id.to_string()),
        };
        self.query_first(None, &selector)
    }

    pub fn text(&self, node: &NodeId) -> &str {
        self.get(node).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn tag(&self, node: &NodeId) -> Option<&str> {
        self.get(node).map(|e| e.tag.as_str())
    }

    pub fn children(&self, node: &NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    pub fn is_connected(&self, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == self.body {
                return self.get(&id).is_some();
            }
            current = self.parent(&id);
        }
        false
    }

    /// Detaches `node` from its parent and frees its subtree.
    pub fn remove(&mut self, node: &NodeId) {
        if *node == self.body {
            return;
        }
        if let Some(parent) = self.parent(node) {
            if let Some(element) = self.get_mut(&parent) {
                element.children.retain(|child| child != node);
            }
        }
        self.free(*node);
    }

    pub fn live_nodes(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn last_focus_prevented_scroll(&self) -> Option<bool> {
        self.last_focus_prevented_scroll
    }

    /// Event deliveries for a gesture on `target`: every listening element from
    /// the target up through its ancestors, then the document.
    pub fn propagation(&self, target: NodeId, kind: EventKind, key: Option<Key>) -> Vec<UiEvent<NodeId>> {
        let mut path: Vec<EventTarget<NodeId>> = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(EventTarget::Element(node));
            current = self.parent(&node);
        }
        path.push(EventTarget::Document);

        path.into_iter()
            .filter(|current_target| {
                self.listeners
                    .iter()
                    .any(|(listening, listened)| listening == current_target && *listened == kind)
            })
            .map(|current_target| UiEvent {
                kind,
                key: key.clone(),
                target,
                current_target,
            })
            .collect()
    }

    /// Indented outline of `node` and its subtree.
    pub fn snapshot(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.write_snapshot(&mut out, node, 0);
        out
    }

    fn write_snapshot(&self, out: &mut String, node: &NodeId, depth: usize) {
        let Some(element) = self.get(node) else {
            return;
        };

        let _ = write!(out, "{}{}", "  ".repeat(depth), element.tag);
        if let Some(id) = &element.id {
            let _ = write!(out, "#{}", id);
        }
        for class in &element.classes {
            let _ = write!(out, ".{}", class);
        }
        for (key, value) in &element.data {
            let _ = write!(out, "[data-{}=\"{}\"]", key, value);
        }
        if element.hidden {
            out.push_str(" (hidden)");
        }
        if self.active == Some(*node) {
            out.push_str(" (focused)");
        }
        if !element.text.is_empty() {
            let _ = write!(out, " {:?}", element.text);
        }
        out.push('\n');

        for child in &element.children {
            self.write_snapshot(out, child, depth + 1);
        }
    }

    fn get(&self, node: &NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, node: &NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    fn free(&mut self, node: NodeId) {
        let Some(element) = self.nodes.get_mut(node.0).and_then(Option::take) else {
            return;
        };
        if self.active == Some(node) {
            self.active = None;
        }
        self.listeners
            .retain(|(target, _)| *target != EventTarget::Element(node));
        for child in element.children {
            self.free(child);
        }
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(&root) {
            out.push(*child);
            self.descendants(*child, out);
        }
    }
}

impl Document for InMemoryDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_first(None, &Selector::Id(id.to_string()))
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &Selector) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        self.descendants(scope.copied().unwrap_or(self.body), &mut nodes);
        nodes
            .into_iter()
            .filter(|node| self.get(node).is_some_and(|e| e.matches(selector)))
            .collect()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Some(Element::new(tag)));
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            return;
        }
        if let Some(old_parent) = self.parent(child) {
            if let Some(element) = self.get_mut(&old_parent) {
                element.children.retain(|c| c != child);
            }
        }
        if let Some(element) = self.get_mut(child) {
            element.parent = Some(*parent);
        }
        if let Some(element) = self.get_mut(parent) {
            element.children.push(*child);
        }
    }

    fn clear_children(&mut self, node: &NodeId) {
        let children = match self.get_mut(node) {
            Some(element) => std::mem::take(&mut element.children),
            None => return,
        };
        for child in children {
            self.free(child);
        }
    }

    /// Like `textContent`, replaces any children.
    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.clear_children(node);
        if let Some(element) = self.get_mut(node) {
            element.text = text.to_string();
        }
    }

    fn data_attribute(&self, node: &NodeId, key: &str) -> Option<String> {
        self.get(node).and_then(|e| e.data.get(key).cloned())
    }

    fn set_data_attribute(&mut self, node: &NodeId, key: &str, value: &str) {
        if let Some(element) = self.get_mut(node) {
            element.data.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_data_attribute(&mut self, node: &NodeId, key: &str) {
        if let Some(element) = self.get_mut(node) {
            element.data.remove(key);
        }
    }

    /// Hiding the subtree that holds focus blurs it.
    fn set_hidden(&mut self, node: &NodeId, hidden: bool) {
        if let Some(element) = self.get_mut(node) {
            element.hidden = hidden;
        }
        if let Some(active) = self.active {
            if !self.is_focusable(&active) {
                self.active = None;
            }
        }
    }

    fn is_hidden(&self, node: &NodeId) -> bool {
        self.get(node).map(|e| e.hidden).unwrap_or(true)
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Connected and not inside a hidden subtree.
    fn is_focusable(&self, node: &NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.is_hidden(&id) {
                return false;
            }
            current = self.parent(&id);
        }
        true
    }

    fn focus(&mut self, node: &NodeId, prevent_scroll: bool) {
        if self.is_focusable(node) {
            self.active = Some(*node);
            self.last_focus_prevented_scroll = Some(prevent_scroll);
        }
    }

    fn listen(&mut self, target: EventTarget<NodeId>, kind: EventKind) {
        self.listeners.push((target, kind));
    }
}

/// Host-side dispatch for a controller bound to an [`InMemoryDocument`].
impl ModalController<InMemoryDocument> {
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind, key: Option<Key>) -> EventOutcome {
        let deliveries = self.document().propagation(target, kind, key);
        deliveries
            .iter()
            .fold(EventOutcome::ignored(), |outcome, event| {
                outcome.merge(self.handle_event(event))
            })
    }

    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.dispatch(target, EventKind::Click, None)
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> EventOutcome {
        self.dispatch(target, EventKind::KeyDown, Some(key))
    }

    /// Presses `key` on the focused element, or on the body when nothing has focus.
    pub fn press_key(&mut self, key: Key) -> EventOutcome {
        let target = self
            .document()
            .active_element()
            .unwrap_or_else(|| self.document().body());
        self.key_down(target, key)
    }
}
