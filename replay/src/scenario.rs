use hindsight_protocol::Event;

/// Render applied events as scenario text, one space-joined line per event.
///
/// `inactive` timer lines and `raw` HTML are left out.
pub fn render_scenario(events: &[Event]) -> String {
    events
        .iter()
        .filter(|event| event.kind().is_rendered())
        .map(|event| event.fields().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
