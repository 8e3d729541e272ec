//! Graph event dispatch
//!
//! Agents never reach into the UI. When something happens that a renderer
//! may want to animate, the agent hands a [`GraphEvent`] to the
//! [`Dispatcher`] it was constructed with.

/// Events emitted by the graph agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    /// A link was written and the new neighbour should be drawn
    DrawNewNode {
        /// The node that was linked to
        uri: String,
        /// The predicate of the new link
        predicate: String,
    },
    /// A node document was created
    NodeCreated { uri: String },
    /// A resource was deleted
    NodeDeleted { uri: String },
}

pub trait Dispatcher: Send + Sync + std::fmt::Debug {
    fn dispatch(&self, event: GraphEvent);
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl Dispatcher for NoopDispatcher {
    fn dispatch(&self, event: GraphEvent) {
        tracing::trace!("dropping graph event: {:?}", event);
    }
}

/// Forwards events over a flume channel
///
/// The dispatcher half can be cloned freely; the receiver goes to whoever
/// renders the graph.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: flume::Sender<GraphEvent>,
}

impl ChannelDispatcher {
    pub fn new() -> (Self, flume::Receiver<GraphEvent>) {
        let (tx, rx) = flume::unbounded();
        (Self { tx }, rx)
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, event: GraphEvent) {
        tracing::debug!("dispatching graph event: {:?}", event);
        if self.tx.send(event).is_err() {
            tracing::warn!("graph event receiver has been dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_dispatcher() {
        let (dispatcher, rx) = ChannelDispatcher::new();
        dispatcher.dispatch(GraphEvent::NodeCreated {
            uri: "https://alice.example/storage/abcde".to_string(),
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            GraphEvent::NodeCreated {
                uri: "https://alice.example/storage/abcde".to_string()
            }
        );

        drop(rx);
        // a dropped receiver is logged, not fatal
        dispatcher.dispatch(GraphEvent::NodeDeleted {
            uri: "https://alice.example/storage/abcde".to_string(),
        });
    }
}
