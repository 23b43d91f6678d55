use std::future::Future;

use crate::games::match3::GameEvent;

/// Push seam towards the view layer. One batch is delivered per processed
/// command, and the session awaits each batch before reading the next command.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_events(&self, events: Vec<GameEvent>) -> impl Future<Output = ()> + Send;
}
