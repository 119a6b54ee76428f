use crossbeam_channel::Sender;
use serde::Serialize;

/// One progress emission per popped node.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent<R> {
    /// Node-provided snapshot of the popped state.
    pub report: R,
    /// Distinct nodes created so far, the root included.
    pub generated: u64,
    /// Nodes popped from the frontier so far, this one included.
    pub popped: u64,
    /// Branch depth of the popped node: assumptions made since the root.
    pub depth: u64,
    pub is_solution: bool,
}

/// Receives progress events from a running search.
///
/// The engine only ever pushes; implementations must not block the search
/// loop waiting for a consumer.
pub trait EventSink<R> {
    fn emit(&self, event: ProgressEvent<R>);
}

/// Discards every event. The right sink when nothing is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl<R> EventSink<R> for NullSink {
    fn emit(&self, _event: ProgressEvent<R>) {}
}

/// Forwards events over an unbounded channel, typically to a renderer on
/// another thread. A disconnected receiver is ignored rather than treated as
/// an error; the search keeps running either way.
#[derive(Debug, Clone)]
pub struct ChannelSink<R> {
    sender: Sender<ProgressEvent<R>>,
}

impl<R> ChannelSink<R> {
    pub fn new(sender: Sender<ProgressEvent<R>>) -> Self {
        Self { sender }
    }
}

impl<R> EventSink<R> for ChannelSink<R> {
    fn emit(&self, event: ProgressEvent<R>) {
        let _ = self.sender.send(event);
    }
}
