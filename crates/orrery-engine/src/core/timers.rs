//! Deferred, cancellable one-shot timers measured in simulation time.
//!
//! Games schedule a payload with a delay; `tick` returns the payloads whose
//! delay has elapsed, in due order. Nothing runs on a real clock, so clearing
//! the set guarantees no stale payload is ever delivered afterwards.

/// Handle returned by `Timers::schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    remaining: f32,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_id: u32,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `payload` to fire after `delay` seconds of simulation time.
    pub fn schedule(&mut self, delay: f32, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            id,
            remaining: delay.max(0.0),
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance all timers by `dt`. Returns fired payloads, earliest first.
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        for p in &mut self.pending {
            p.remaining -= dt;
        }
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].remaining <= 0.0 {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        // Stable sort keeps schedule order among timers due at the same instant.
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|p| p.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(0.5, "clear");
        assert!(timers.tick(0.3).is_empty());
        assert_eq!(timers.tick(0.3), vec!["clear"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule(0.4, 2);
        timers.schedule(0.1, 1);
        timers.schedule(0.9, 3);
        assert_eq!(timers.tick(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::new();
        let id = timers.schedule(0.2, ());
        assert_eq!(timers.len(), 1);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.tick(1.0).is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut timers = Timers::new();
        timers.schedule(0.1, 'a');
        timers.schedule(0.2, 'b');
        timers.clear();
        assert!(timers.tick(5.0).is_empty());
    }

    #[test]
    fn ids_are_unique_after_clear() {
        let mut timers = Timers::new();
        let a = timers.schedule(1.0, ());
        timers.clear();
        let b = timers.schedule(1.0, ());
        assert_ne!(a, b);
        assert!(!timers.cancel(a));
        assert!(timers.cancel(b));
    }
}
