use crate::metrics::StatusSnapshot;
use crate::sink::StatusSink;
use nuts;
use tracing::error;

#[derive(Clone, Debug)]
pub struct StatusEvent(pub StatusSnapshot);

/// Attaches a display sink as a subscriber; rendering happens synchronously
/// on the publishing thread, which is also the thread that owns the surface.
pub fn register_sink_subscriber(
    sink: Box<dyn StatusSink>,
) -> nuts::ActivityId<Box<dyn StatusSink>> {
    let activity = nuts::new_activity(sink);
    activity.subscribe(move |sink: &mut Box<dyn StatusSink>, evt: &StatusEvent| {
        if let Err(e) = sink.render(&evt.0) {
            error!("Sink render error: {}", e);
        }
    });
    activity
}

pub fn publish_status(snapshot: StatusSnapshot) {
    nuts::publish(StatusEvent(snapshot));
}
