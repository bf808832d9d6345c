use std::cell::RefCell;

thread_local! {
    static SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Record a scoring warning. Inside a [`capture`] scope the message is
/// collected; otherwise it is printed to stderr immediately.
pub fn emit(msg: String) {
    SINK.with(|sink| {
        if let Some(buf) = sink.borrow_mut().as_mut() {
            buf.push(msg);
            return;
        }
        eprintln!("warning: {}", msg);
    });
}

/// Run `f` with warning capture active on this thread and return its
/// result together with every warning emitted while it ran.
///
/// Capture scopes nest: an inner scope collects its own warnings and
/// restores the outer one on exit, so evaluations running on separate
/// threads (or inside each other) never see one another's messages. The
/// enclosing scope is restored even if `f` panics.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let scope = CaptureScope {
        previous: SINK.with(|sink| sink.borrow_mut().replace(Vec::new())),
    };
    let value = f();
    (value, scope.drain())
}

/// Puts the enclosing sink state back on drop, so unwinding out of a
/// [`capture`] closure rewinds the scope instead of leaving the
/// thread-local stuck in capture mode.
struct CaptureScope {
    previous: Option<Vec<String>>,
}

impl CaptureScope {
    fn drain(self) -> Vec<String> {
        SINK.with(|sink| sink.borrow_mut().take()).unwrap_or_default()
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SINK.with(|sink| *sink.borrow_mut() = previous);
    }
}

/// Works like `eprintln!` but routes through the warning sink so callers
/// can capture scoring warnings instead of losing them to stderr.
#[macro_export]
macro_rules! score_warn {
    ($($arg:tt)*) => {
        $crate::warnlog::emit(format!($($arg)*))
    };
}
