use crate::config::MarkupConfig;
use crate::core::render::{self, average_text, count_text, heading_text};
use crate::core::{
    Catalog, Document, EventKind, EventOutcome, EventTarget, Key, ModalState, Result, ReviewRecord,
    Selector, UiEvent,
};
use crate::utils::error::ReviewBotError;

/// Elements inside the overlay the controller writes to.
#[derive(Debug, Clone)]
struct ModalSlots<N> {
    overlay: N,
    window: Option<N>,
    heading: Option<N>,
    subheading: Option<N>,
    summary: Option<N>,
    average: Option<N>,
    count: Option<N>,
    reviews: Option<N>,
}

#[derive(Debug, Clone, PartialEq)]
enum Trigger<N> {
    Card(N),
    Dismiss,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone)]
struct Binding<N> {
    target: EventTarget<N>,
    kind: EventKind,
    trigger: Trigger<N>,
}

/// Owns the modal state and the remembered focus target, and turns catalog
/// lookups and user gestures into document mutations.
pub struct ModalController<D: Document> {
    document: D,
    catalog: Catalog,
    markup: MarkupConfig,
    slots: ModalSlots<D::Node>,
    bindings: Vec<Binding<D::Node>>,
    state: ModalState,
    focus_memory: Option<D::Node>,
}

impl<D: Document> std::fmt::Debug for ModalController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &self.state)
            .field("focus_memory", &self.focus_memory)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl<D: Document> ModalController<D> {
    pub fn new(document: D, catalog: Catalog) -> Result<Self> {
        Self::with_markup(document, catalog, MarkupConfig::default())
    }

    pub fn with_markup(mut document: D, catalog: Catalog, markup: MarkupConfig) -> Result<Self> {
        let overlay = document
            .element_by_id(&markup.overlay_id)
            .ok_or_else(|| ReviewBotError::MissingElement {
                id: markup.overlay_id.clone(),
            })?;

        let window_selector = Selector::parse(&markup.window_selector)?;
        let close_selector = Selector::parse(&markup.close_selector)?;
        let card_selector = Selector::parse(&markup.card_selector)?;

        let slot = |id: &str| {
            let node = document.element_by_id(id);
            if node.is_none() {
                tracing::warn!("Review bot element #{} not found, it will not be updated", id);
            }
            node
        };
        let slots = ModalSlots {
            window: document.query_first(Some(&overlay), &window_selector),
            heading: slot(&markup.heading_id),
            subheading: slot(&markup.subheading_id),
            summary: slot(&markup.summary_id),
            average: slot(&markup.average_id),
            count: slot(&markup.count_id),
            reviews: slot(&markup.reviews_id),
            overlay,
        };
        if slots.window.is_none() {
            tracing::warn!("No {} element inside the overlay, focus will not move on open", markup.window_selector);
        }

        let mut bindings = Vec::new();
        let mut bind = |document: &mut D, target: EventTarget<D::Node>, kind, trigger| {
            document.listen(target.clone(), kind);
            bindings.push(Binding { target, kind, trigger });
        };

        let cards = document.query_all(None, &card_selector);
        for card in &cards {
            bind(&mut document, EventTarget::Element(card.clone()), EventKind::Click, Trigger::Card(card.clone()));
            bind(&mut document, EventTarget::Element(card.clone()), EventKind::KeyDown, Trigger::Card(card.clone()));
        }

        let dismiss_controls = document.query_all(Some(&slots.overlay), &close_selector);
        for control in &dismiss_controls {
            bind(&mut document, EventTarget::Element(control.clone()), EventKind::Click, Trigger::Dismiss);
        }

        bind(&mut document, EventTarget::Element(slots.overlay.clone()), EventKind::Click, Trigger::Backdrop);
        bind(&mut document, EventTarget::Document, EventKind::KeyDown, Trigger::Escape);

        tracing::debug!(
            "Review bot bound to {} cards and {} dismiss controls",
            cards.len(),
            dismiss_controls.len()
        );

        let mut controller = Self {
            document,
            catalog,
            markup,
            slots,
            bindings,
            state: ModalState::Closed,
            focus_memory: None,
        };
        controller.reset_overlay();
        Ok(controller)
    }

    /// Opens the modal for `business_id`. Unknown ids are ignored and leave the
    /// state untouched; returns whether the modal now shows that business.
    pub fn open(&mut self, business_id: &str) -> bool {
        let Some(business) = self.catalog.get(business_id) else {
            tracing::debug!("Ignoring open request for unknown business '{}'", business_id);
            return false;
        };

        // Focus is remembered only when coming from Closed; switching businesses
        // while open keeps the original return target.
        if !self.state.is_open() {
            self.focus_memory = self.document.active_element();
        }
        self.state = ModalState::Open(business_id.to_string());

        let document = &mut self.document;
        let slots = &self.slots;
        document.set_hidden(&slots.overlay, false);
        document.set_data_attribute(&slots.overlay, &self.markup.active_attribute, business_id);

        let texts = [
            (&slots.heading, heading_text(business)),
            (&slots.subheading, business.category.clone()),
            (&slots.summary, business.summary.clone()),
            (&slots.average, average_text(business.average)),
            (&slots.count, count_text(business.review_count)),
        ];
        for (slot, text) in texts {
            if let Some(node) = slot {
                document.set_text(node, &text);
            }
        }

        if let Some(list) = &slots.reviews {
            render::render_reviews(&mut *document, list, &business.reviews);
        }
        if let Some(window) = &slots.window {
            document.focus(window, true);
        }

        tracing::debug!(
            "Opened review bot for '{}' with {} reviews",
            business_id,
            business.reviews.len()
        );
        true
    }

    pub fn close(&mut self) {
        let previous = std::mem::take(&mut self.state);
        self.reset_overlay();

        if let Some(target) = self.focus_memory.take() {
            if self.document.is_focusable(&target) {
                self.document.focus(&target, false);
            } else {
                tracing::debug!("Previously focused element is gone, leaving focus in place");
            }
        }

        if let ModalState::Open(id) = previous {
            tracing::debug!("Closed review bot for '{}'", id);
        }
    }

    /// Renders `reviews` into the review list, replacing what was there.
    /// A closed modal shows no reviews, so this does nothing while closed.
    pub fn render_reviews(&mut self, reviews: &[ReviewRecord]) {
        if !self.state.is_open() {
            tracing::trace!("Skipping review render while the modal is closed");
            return;
        }
        if let Some(list) = &self.slots.reviews {
            render::render_reviews(&mut self.document, list, reviews);
        }
    }

    /// Handles one delivery of an event to a listener registered at construction.
    pub fn handle_event(&mut self, event: &UiEvent<D::Node>) -> EventOutcome {
        let triggers: Vec<Trigger<D::Node>> = self
            .bindings
            .iter()
            .filter(|binding| binding.kind == event.kind && binding.target == event.current_target)
            .map(|binding| binding.trigger.clone())
            .collect();

        triggers
            .into_iter()
            .fold(EventOutcome::ignored(), |outcome, trigger| {
                outcome.merge(self.fire(trigger, event))
            })
    }

    fn fire(&mut self, trigger: Trigger<D::Node>, event: &UiEvent<D::Node>) -> EventOutcome {
        match trigger {
            Trigger::Card(card) => {
                let outcome = match (event.kind, &event.key) {
                    (EventKind::Click, _) => EventOutcome::handled(),
                    (EventKind::KeyDown, Some(key)) if key.activates() => {
                        EventOutcome::handled().prevent_default()
                    }
                    _ => return EventOutcome::ignored(),
                };
                match self.document.data_attribute(&card, &self.markup.business_attribute) {
                    Some(business_id) => {
                        self.open(&business_id);
                    }
                    None => tracing::trace!("Activated card carries no business id"),
                }
                outcome
            }
            Trigger::Dismiss => {
                self.close();
                EventOutcome::handled()
            }
            Trigger::Backdrop if event.target == self.slots.overlay => {
                self.close();
                EventOutcome::handled()
            }
            Trigger::Escape if self.state.is_open() && event.key == Some(Key::Escape) => {
                self.close();
                EventOutcome::handled()
            }
            Trigger::Backdrop | Trigger::Escape => EventOutcome::ignored(),
        }
    }

    fn reset_overlay(&mut self) {
        let overlay = &self.slots.overlay;
        self.document.set_hidden(overlay, true);
        self.document
            .remove_data_attribute(overlay, &self.markup.active_attribute);
        if let Some(list) = &self.slots.reviews {
            self.document.clear_children(list);
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn active_business(&self) -> Option<&str> {
        self.state.active_business()
    }

    pub fn focus_memory(&self) -> Option<&D::Node> {
        self.focus_memory.as_ref()
    }

    pub fn overlay(&self) -> &D::Node {
        &self.slots.overlay
    }

    /// The element matching `window_selector` inside the overlay, if any.
    pub fn window(&self) -> Option<&D::Node> {
        self.slots.window.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access for the host, e.g. to move focus between gestures.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
