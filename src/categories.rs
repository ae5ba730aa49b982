/// Identifier of one event-listener breakpoint: `category:eventType`.
pub type EventKey = String;

/// Fixed breakpoint taxonomy, in display order.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Mouse", &["click", "mouseover", "dblclick"]),
    ("Keyboard", &["keyup", "keydown"]),
];

/// Build the key for one event type within a category.
pub fn event_key(category: &str, event_type: &str) -> EventKey {
    format!("{category}:{event_type}")
}

/// Category names in taxonomy order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|(name, _)| *name)
}

/// Event types belonging to `category` (empty for unknown names).
pub fn event_types(category: &str) -> &'static [&'static str] {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

/// Every key of a category, in taxonomy order.
pub fn category_keys(category: &str) -> Vec<EventKey> {
    event_types(category)
        .iter()
        .map(|event_type| event_key(category, event_type))
        .collect()
}

/// Whether `key` is one of the keys the taxonomy can produce.
pub fn is_known_key(key: &str) -> bool {
    match key.split_once(':') {
        Some((category, event_type)) => event_types(category).contains(&event_type),
        None => false,
    }
}
