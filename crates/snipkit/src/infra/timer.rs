//! Deferred execution

use crate::constants::DEFER_DELAY;
use std::thread::{self, JoinHandle};
use tracing::trace;

/// Run `f` on a background thread after [`DEFER_DELAY`]
///
/// The caller continues immediately; join the handle to wait for the result.
///
/// ```
/// use snipkit::infra::timer::defer;
///
/// let handle = defer(|| 40 + 2);
/// assert_eq!(handle.join().unwrap(), 42);
/// ```
pub fn defer<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    thread::spawn(move || {
        thread::sleep(DEFER_DELAY);
        trace!("running deferred closure");
        f()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_defer_runs_after_caller() {
        let (tx, rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let deferred_tx = tx.clone();

        let handle = defer(move || {
            gate_rx.recv().unwrap();
            deferred_tx.send("a").unwrap();
        });
        tx.send("b").unwrap();
        gate_tx.send(()).unwrap();
        handle.join().unwrap();

        let order: Vec<&str> = rx.try_iter().collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_defer_returns_closure_result() {
        let handle = defer(|| (1..=4).product::<u32>());
        assert_eq!(handle.join().unwrap(), 24);
    }
}
