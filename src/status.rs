use crate::capture::session::ExportEvent;

/// Status line shown while a recording is armed.
pub fn recording_status() -> &'static str {
    "Recording"
}

/// User-visible text for an export lifecycle event.
pub fn export_status(event: &ExportEvent) -> String {
    match event {
        ExportEvent::Started => "Starting".to_owned(),
        ExportEvent::Progress(fraction) => {
            format!("{:.0}%", (fraction.clamp(0.0, 1.0) * 100.0))
        }
        ExportEvent::Finished => "Finished".to_owned(),
        ExportEvent::Aborted => "Aborted".to_owned(),
        ExportEvent::Empty => "No frames".to_owned(),
    }
}

/// Status line for the data stream counters.
pub fn stream_status(data_updates: u64, last_client: Option<&str>) -> String {
    match last_client {
        Some(client) => format!("{data_updates} updates, last client {client}"),
        None => format!("{data_updates} updates"),
    }
}
