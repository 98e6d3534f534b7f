use tokio::sync::watch;

/// Owning side of a transport readiness flag.
///
/// Receivers observe every transition; the flag may go back to `false`
/// when the session drops.
#[derive(Debug)]
pub struct ReadinessSignal {
    tx: watch::Sender<bool>,
}

impl ReadinessSignal {
    pub fn new(initial: bool) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns true if the value changed.
    pub fn set(&self, ready: bool) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == ready {
                false
            } else {
                *current = ready;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new(false)
    }
}
