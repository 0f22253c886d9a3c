use review_bot::core::{Document, Key, ModalState, Selector};
use review_bot::{
    builtin_catalog, Catalog, InMemoryDocument, MarkupConfig, ModalController, NodeId,
};

struct Page {
    controller: ModalController<InMemoryDocument>,
    overlay: NodeId,
}

impl Page {
    fn new() -> Self {
        Self::with_catalog(builtin_catalog())
    }

    fn with_catalog(catalog: Catalog) -> Self {
        let document = InMemoryDocument::scaffold(&MarkupConfig::default(), catalog.ids());
        let controller = ModalController::new(document, catalog).unwrap();
        let overlay = *controller.overlay();
        Self { controller, overlay }
    }

    fn doc(&self) -> &InMemoryDocument {
        self.controller.document()
    }

    fn text_of(&self, id: &str) -> String {
        let node = self.doc().element_by_id(id).unwrap();
        self.doc().text(&node).to_string()
    }

    fn review_titles(&self) -> Vec<String> {
        let list = self.doc().element_by_id("bot-reviews").unwrap();
        self.doc()
            .children(&list)
            .iter()
            .map(|item| {
                let title = self.doc().children(item)[0];
                self.doc().text(&title).to_string()
            })
            .collect()
    }

    fn card(&self, business_id: &str) -> NodeId {
        self.doc().card(business_id).unwrap()
    }

    fn window(&self) -> NodeId {
        self.doc()
            .query_first(Some(&self.overlay), &Selector::Class("bot-window".into()))
            .unwrap()
    }

    fn close_buttons(&self) -> Vec<NodeId> {
        self.doc()
            .query_all(Some(&self.overlay), &Selector::Class("bot-close".into()))
    }

    fn focus(&mut self, node: NodeId) {
        self.controller.document_mut().focus(&node, false);
    }

    fn active_attribute(&self) -> Option<String> {
        self.doc().data_attribute(&self.overlay, "active-business")
    }
}

#[test]
fn test_overlay_starts_hidden_and_closed() {
    let page = Page::new();
    assert!(page.doc().is_hidden(&page.overlay));
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert!(page.active_attribute().is_none());
    assert!(page.review_titles().is_empty());
}

#[test]
fn test_open_bella_bistro() {
    let mut page = Page::new();
    let card = page.card("bella-bistro");
    page.focus(card);

    assert!(page.controller.open("bella-bistro"));

    assert!(!page.doc().is_hidden(&page.overlay));
    assert_eq!(page.active_attribute().as_deref(), Some("bella-bistro"));
    assert_eq!(page.text_of("bot-heading"), "Bella Bistro reviews");
    assert_eq!(page.text_of("bot-subheading"), "Restaurant");
    assert!(page.text_of("bot-summary").contains("candle-lit ambiance"));
    assert_eq!(page.text_of("bot-average"), "4.6 ★");
    assert_eq!(page.text_of("bot-count"), "128 verified reviews");
    assert_eq!(page.review_titles(), vec!["Ava M. • 5.0★", "Marcus L. • 4.0★"]);
    assert_eq!(page.doc().active_element(), Some(page.window()));
    assert_eq!(page.doc().last_focus_prevented_scroll(), Some(true));
}

#[test]
fn test_every_business_renders_its_record() {
    let catalog = builtin_catalog();
    let mut page = Page::new();

    for (id, business) in catalog.iter() {
        assert!(page.controller.open(id));
        assert_eq!(page.controller.active_business(), Some(id));
        assert_eq!(page.active_attribute().as_deref(), Some(id));
        assert_eq!(page.text_of("bot-heading"), format!("{} reviews", business.name));
        assert_eq!(page.text_of("bot-subheading"), business.category);
        assert_eq!(page.text_of("bot-summary"), business.summary);
        assert_eq!(page.text_of("bot-average"), format!("{:.1} ★", business.average));
        assert_eq!(
            page.text_of("bot-count"),
            format!("{} verified reviews", business.review_count)
        );

        let expected: Vec<String> = business
            .reviews
            .iter()
            .map(|r| format!("{} • {:.1}★", r.author, r.rating))
            .collect();
        assert_eq!(page.review_titles(), expected);
    }
}

#[test]
fn test_unknown_business_is_ignored() {
    let mut page = Page::new();
    let card = page.card("green-garden");
    page.focus(card);

    assert!(!page.controller.open("missing-business"));
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert!(page.doc().is_hidden(&page.overlay));
    assert_eq!(page.doc().active_element(), Some(card));
    assert!(page.controller.focus_memory().is_none());

    page.controller.open("green-garden");
    assert!(!page.controller.open("missing-business"));
    assert_eq!(page.controller.active_business(), Some("green-garden"));
    assert_eq!(page.text_of("bot-heading"), "Green Garden reviews");
}

#[test]
fn test_close_restores_focus_and_clears_state() {
    let mut page = Page::new();
    let card = page.card("sparkle-cleaners");
    page.focus(card);

    page.controller.open("sparkle-cleaners");
    page.controller.close();

    assert!(page.doc().is_hidden(&page.overlay));
    assert!(page.active_attribute().is_none());
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert_eq!(page.doc().active_element(), Some(card));
    assert!(page.controller.focus_memory().is_none());
    assert!(page.review_titles().is_empty());
}

#[test]
fn test_close_twice_matches_close_once() {
    let mut page = Page::new();
    let card = page.card("bella-bistro");
    page.focus(card);
    page.controller.open("bella-bistro");

    page.controller.close();
    let once = page.doc().snapshot(&page.doc().body());
    page.controller.close();
    let twice = page.doc().snapshot(&page.doc().body());

    assert_eq!(once, twice);
    assert_eq!(page.doc().active_element(), Some(card));
}

#[test]
fn test_close_when_never_opened_is_harmless() {
    let mut page = Page::new();
    let card = page.card("bella-bistro");
    page.focus(card);

    page.controller.close();
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert_eq!(page.doc().active_element(), Some(card));
}

#[test]
fn test_focus_not_restored_to_removed_element() {
    let mut page = Page::new();
    let card = page.card("sunrise-fitness");
    page.focus(card);
    page.controller.open("sunrise-fitness");

    page.controller.document_mut().remove(&card);
    page.controller.close();

    assert_eq!(page.doc().active_element(), None);
    assert!(page.controller.focus_memory().is_none());
}

#[test]
fn test_card_click_opens_modal() {
    let mut page = Page::new();
    let card = page.card("green-garden");
    page.focus(card);

    let outcome = page.controller.click(card);

    assert!(outcome.handled);
    assert!(!outcome.default_prevented);
    assert_eq!(page.controller.active_business(), Some("green-garden"));
    assert_eq!(page.controller.focus_memory(), Some(&card));
}

#[test]
fn test_card_keyboard_activation() {
    let mut page = Page::new();
    let card = page.card("bella-bistro");
    page.focus(card);

    let outcome = page.controller.key_down(card, Key::Space);
    assert!(outcome.handled);
    assert!(outcome.default_prevented);
    assert_eq!(page.controller.active_business(), Some("bella-bistro"));

    page.controller.close();
    let outcome = page.controller.key_down(card, Key::Enter);
    assert!(outcome.default_prevented);
    assert!(page.controller.is_open());

    page.controller.close();
    let outcome = page.controller.key_down(card, Key::from_dom("a"));
    assert!(!outcome.handled);
    assert!(!outcome.default_prevented);
    assert!(!page.controller.is_open());
}

#[test]
fn test_card_with_unknown_business_is_ignored() {
    let mut catalog_ids: Vec<String> = builtin_catalog().ids().map(str::to_string).collect();
    catalog_ids.push("retired-shop".to_string());
    let document = InMemoryDocument::scaffold(&MarkupConfig::default(), &catalog_ids);
    let mut controller = ModalController::new(document, builtin_catalog()).unwrap();

    let card = controller.document().card("retired-shop").unwrap();
    controller.click(card);
    assert_eq!(controller.state(), &ModalState::Closed);
}

#[test]
fn test_every_dismiss_control_closes() {
    let mut page = Page::new();
    let buttons = page.close_buttons();
    assert_eq!(buttons.len(), 2);

    for button in buttons {
        page.controller.open("bella-bistro");
        let outcome = page.controller.click(button);
        assert!(outcome.handled);
        assert!(!page.controller.is_open());
    }
}

#[test]
fn test_backdrop_click_closes_but_window_click_does_not() {
    let mut page = Page::new();
    page.controller.open("green-garden");

    let window = page.window();
    let outcome = page.controller.click(window);
    assert!(!outcome.handled);
    assert!(page.controller.is_open());

    let heading = page.doc().element_by_id("bot-heading").unwrap();
    page.controller.click(heading);
    assert!(page.controller.is_open());

    let overlay = page.overlay;
    let outcome = page.controller.click(overlay);
    assert!(outcome.handled);
    assert!(!page.controller.is_open());
}

#[test]
fn test_escape_only_closes_when_open() {
    let mut page = Page::new();
    let card = page.card("bella-bistro");
    page.focus(card);

    let outcome = page.controller.press_key(Key::Escape);
    assert!(!outcome.handled);
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert_eq!(page.doc().active_element(), Some(card));

    page.controller.open("bella-bistro");
    let outcome = page.controller.press_key(Key::Escape);
    assert!(outcome.handled);
    assert_eq!(page.controller.state(), &ModalState::Closed);
    assert_eq!(page.doc().active_element(), Some(card));
}

#[test]
fn test_escape_on_card_while_open_closes() {
    let mut page = Page::new();
    let card = page.card("sparkle-cleaners");
    page.controller.open("bella-bistro");

    let outcome = page.controller.key_down(card, Key::Escape);
    assert!(outcome.handled);
    assert!(!outcome.default_prevented);
    assert!(!page.controller.is_open());
}

#[test]
fn test_switching_businesses_keeps_first_focus_target() {
    let mut page = Page::new();
    let first = page.card("bella-bistro");
    let second = page.card("green-garden");
    page.focus(first);

    page.controller.click(first);
    page.controller.click(second);

    assert_eq!(page.controller.active_business(), Some("green-garden"));
    assert_eq!(page.review_titles().len(), 2);
    assert_eq!(page.controller.focus_memory(), Some(&first));

    page.controller.close();
    assert_eq!(page.doc().active_element(), Some(first));
}

#[test]
fn test_render_reviews_is_public() {
    let mut page = Page::new();
    page.controller.open("bella-bistro");
    let reviews = builtin_catalog().get("green-garden").unwrap().reviews.clone();

    page.controller.render_reviews(&reviews);
    assert_eq!(page.review_titles(), vec!["Sasha W. • 5.0★", "Ian R. • 4.0★"]);

    page.controller.render_reviews(&[]);
    assert!(page.review_titles().is_empty());
}

#[test]
fn test_render_reviews_while_closed_renders_nothing() {
    let mut page = Page::new();
    let reviews = builtin_catalog().get("bella-bistro").unwrap().reviews.clone();

    page.controller.render_reviews(&reviews);
    assert!(page.review_titles().is_empty());

    page.controller.open("green-garden");
    page.controller.close();
    page.controller.render_reviews(&reviews);
    assert!(page.review_titles().is_empty());
    assert_eq!(page.controller.state(), &ModalState::Closed);
}

#[test]
fn test_custom_markup_ids() {
    let markup = MarkupConfig {
        overlay_id: "reviews-modal".to_string(),
        count_id: "reviews-total".to_string(),
        card_selector: ".tile".to_string(),
        business_attribute: "shop".to_string(),
        ..MarkupConfig::default()
    };
    let catalog = builtin_catalog();
    let document = InMemoryDocument::scaffold(&markup, catalog.ids());
    let mut controller = ModalController::with_markup(document, catalog, markup).unwrap();

    let card = controller.document().card("sunrise-fitness").unwrap();
    controller.click(card);

    let count = controller.document().element_by_id("reviews-total").unwrap();
    assert_eq!(controller.document().text(&count), "112 verified reviews");
    let overlay = *controller.overlay();
    assert_eq!(
        controller.document().data_attribute(&overlay, "active-business").as_deref(),
        Some("sunrise-fitness")
    );
}

#[test]
fn test_window_follows_configured_selector() {
    let markup = MarkupConfig {
        window_selector: ".dialog-panel".to_string(),
        ..MarkupConfig::default()
    };
    let catalog = builtin_catalog();
    let document = InMemoryDocument::scaffold(&markup, catalog.ids());
    let mut controller = ModalController::with_markup(document, catalog, markup).unwrap();
    let overlay = *controller.overlay();

    let panel = controller
        .document()
        .query_first(Some(&overlay), &Selector::Class("dialog-panel".into()));
    assert!(panel.is_some());
    assert_eq!(controller.window().copied(), panel);

    controller.open("green-garden");
    assert_eq!(controller.document().active_element(), panel);

    let window = *controller.window().unwrap();
    let outcome = controller.click(window);
    assert!(!outcome.handled);
    assert!(controller.is_open());
}

#[test]
fn test_empty_review_list() {
    let mut catalog_json = serde_json::json!({"businesses": {}});
    catalog_json["businesses"]["quiet-corner"] = serde_json::json!({
        "name": "Quiet Corner",
        "category": "Library",
        "summary": "Nothing to see.",
        "average": 0.0,
        "reviewCount": 0,
        "reviews": []
    });
    let catalog = Catalog::from_json_str(&catalog_json.to_string()).unwrap();
    let mut page = Page::with_catalog(catalog);

    assert!(page.controller.open("quiet-corner"));
    assert_eq!(page.text_of("bot-average"), "0.0 ★");
    assert_eq!(page.text_of("bot-count"), "0 verified reviews");
    assert!(page.review_titles().is_empty());
}
