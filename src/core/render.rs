use crate::core::{BusinessRecord, Document, ReviewRecord};

pub fn heading_text(business: &BusinessRecord) -> String {
    format!("{} reviews", business.name)
}

/// One decimal place with ties rounded up (4.25 -> "4.3"), as browsers format ratings.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

pub fn average_text(average: f64) -> String {
    format!("{} ★", one_decimal(average))
}

pub fn count_text(review_count: u32) -> String {
    format!("{} verified reviews", review_count)
}

pub fn review_title(review: &ReviewRecord) -> String {
    format!("{} • {}★", review.author, one_decimal(review.rating))
}

/// Replaces the contents of `list` with one `li` per review, in input order.
pub fn render_reviews<D: Document>(document: &mut D, list: &D::Node, reviews: &[ReviewRecord]) {
    document.clear_children(list);

    for review in reviews {
        let item = document.create_element("li");
        let title = document.create_element("h3");
        document.set_text(&title, &review_title(review));
        let body = document.create_element("p");
        document.set_text(&body, &review.text);

        document.append_child(&item, &title);
        document.append_child(&item, &body);
        document.append_child(list, &item);
    }

    tracing::trace!("Rendered {} review items", reviews.len());
}
