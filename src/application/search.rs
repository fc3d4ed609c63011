use crate::domain::model::Event;

/// Events whose name, description or location contains `query`, ignoring case.
/// A blank query matches everything.
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return events.iter().collect();
    }

    events
        .iter()
        .filter(|event| {
            [
                event.display_name(),
                event.description.as_deref(),
                event.location.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
