use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Cooperative cancellation signal for a display session.
///
/// Clones share the same signal. The display loop checks the token at its
/// only suspension point, and a wait is cut short as soon as the token is cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    condvar: Condvar,
    #[cfg(feature = "coroutine")]
    notify: tokio::sync::Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Wakes up anyone waiting on the token
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        {
            // taking the lock makes sure a waiter is either before its check
            // or already waiting on the condvar
            let _guard = match self.inner.lock.lock() {
                Ok(x) => x,
                Err(e) => e.into_inner(),
            };
            self.inner.condvar.notify_all();
        }
        #[cfg(feature = "coroutine")]
        self.inner.notify.notify_waiters();
    }

    /// Check if cancellation was requested
    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Return an error if cancellation was requested
    pub fn check(&self) -> crate::Result<()> {
        if self.is_cancelled() {
            crate::bail!("cancelled")
        }
        Ok(())
    }

    /// Block the current thread for `timeout`, or until cancelled.
    ///
    /// Returns `true` if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        // none if the deadline is not representable, then only cancel ends the wait
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = match self.inner.lock.lock() {
            Ok(x) => x,
            Err(e) => e.into_inner(),
        };
        loop {
            if self.is_cancelled() {
                return true;
            }
            let Some(deadline) = deadline else {
                guard = match self.inner.condvar.wait(guard) {
                    Ok(x) => x,
                    Err(e) => e.into_inner(),
                };
                continue;
            };
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = match self.inner.condvar.wait_timeout(guard, deadline - now) {
                Ok((x, _)) => x,
                Err(e) => e.into_inner().0,
            };
        }
    }

    /// Wait for `timeout`, or until cancelled, without blocking the async runtime.
    ///
    /// Returns `true` if cancelled.
    #[cfg(feature = "coroutine")]
    pub async fn co_wait_timeout(&self, timeout: Duration) -> bool {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // register before checking, so a cancel in between is not missed
        notified.as_mut().enable();
        if self.is_cancelled() {
            return true;
        }
        tokio::select! {
            _ = notified => true,
            _ = tokio::time::sleep(timeout) => self.is_cancelled(),
        }
    }
}

#[cfg(feature = "ctrlc")]
mod ctrlc_impl {
    use std::sync::{Arc, LazyLock, Mutex, Weak};

    use super::{CancelToken, Inner};

    // weak, so tokens dropped by their sessions are not kept alive until Ctrl-C
    static CTRLC_TOKENS: Mutex<Vec<Weak<Inner>>> = Mutex::new(Vec::new());
    static INIT_ONCE: LazyLock<Result<(), String>> = LazyLock::new(|| {
        let set_result = ctrlc::try_set_handler(move || {
            let tokens = match CTRLC_TOKENS.lock() {
                Ok(mut tokens) => std::mem::take(&mut *tokens),
                Err(_) => return,
            };
            // note we are not holding the lock when cancelling
            for inner in tokens.iter().filter_map(Weak::upgrade) {
                CancelToken { inner }.cancel();
            }
        });
        match set_result {
            Err(ctrlc::Error::MultipleHandlers) => {
                Err("failed to set ctrl-c handler: a handler is already set using the `ctrlc` crate".to_string())
            }
            Err(other_error) => Err(format!("failed to set ctrl-c handler: {other_error}")),
            Ok(_) => Ok(()),
        }
    });

    impl CancelToken {
        /// Create a token that is cancelled when Ctrl-C is pressed.
        ///
        /// One process-wide handler is registered the first time this is called.
        /// Each Ctrl-C cancels every token created so far.
        pub fn on_ctrlc() -> crate::Result<Self> {
            let token = Self::new();
            {
                let Ok(mut tokens) = CTRLC_TOKENS.lock() else {
                    crate::bail!("global ctrl-c token list is poisoned");
                };
                tokens.retain(is_live);
                tokens.push(Arc::downgrade(&token.inner));
            }
            if let Err(e) = &*INIT_ONCE {
                crate::bail!("{e}");
            }
            Ok(token)
        }
    }

    fn is_live(token: &Weak<Inner>) -> bool {
        token
            .upgrade()
            .is_some_and(|inner| !CancelToken { inner }.is_cancelled())
    }

    #[cfg(test)]
    pub(super) fn registered() -> usize {
        CTRLC_TOKENS.lock().map(|t| t.len()).unwrap_or(0)
    }
}
