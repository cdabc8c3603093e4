//! Scoped guards for the generation attempt.
//!
//! Both release in `Drop`, so they hold on every exit path: normal return,
//! early `?` return, timeout, and panic unwinding.

use super::presenter::Presenter;
use std::sync::atomic::{AtomicBool, Ordering};

/// Holds the single in-flight slot for the duration of an attempt.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Claim the slot, or `None` if another attempt already holds it.
    pub fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Keeps the loading indicator on while alive.
pub struct LoadingScope<'a> {
    presenter: &'a dyn Presenter,
}

impl<'a> LoadingScope<'a> {
    pub fn show(presenter: &'a dyn Presenter) -> Self {
        presenter.show_loading(true);
        Self { presenter }
    }
}

impl Drop for LoadingScope<'_> {
    fn drop(&mut self) {
        self.presenter.show_loading(false);
    }
}
