//! Broadcast signals
//!
//! A `Signal<T>` is an ordered list of listeners fired synchronously. The
//! controller exposes one signal per event channel; nothing is queued or
//! replayed, so a listener connected after a fire never sees it.

/// Identifies a connected listener for `Signal::disconnect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Synchronous broadcast channel
pub struct Signal<T> {
    name: &'static str,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Create an empty signal. `name` only appears in trace output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a listener; listeners fire in connection order
    pub fn connect(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Call every listener with `payload`
    pub fn fire(&mut self, payload: &T) {
        tracing::debug!(
            signal = self.name,
            listeners = self.listeners.len(),
            "Firing signal"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(payload);
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
