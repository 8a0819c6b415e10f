// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The date-range source boundary: a subscribable period collection.
//!
//! [`PeriodCollection`] is the in-process implementation of the external
//! date-range source the selector delegates to: it holds the requested
//! range, and `refresh` publishes the authoritative range to every
//! subscriber. Subscriptions are scoped resources: the returned
//! [`PeriodSubscription`] unsubscribes when dropped, so release is
//! guaranteed on every exit path.
//!
//! [`PeriodNavigator`] wires a [`PeriodSelector`] to a collection: user
//! navigation goes through the selector's transition function, emitted
//! requests are forwarded to the collection, and the subscription callback
//! is the only writer of the confirmed period.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use chrono::{Local, NaiveDateTime};
use parking_lot::RwLock;

use super::granularity::Granularity;
use super::range::{DateRange, Period};
use super::selector::{PeriodSelector, SelectorEvent, SourceRequest};

/// Unique identifier for a period subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for range update callbacks.
type RangeCallback = Arc<dyn Fn(&DateRange) + Send + Sync>;

/// A subscribable date-range collection, optionally keyed so several
/// dashboards can drive independent collections.
///
/// # Thread Safety
///
/// The collection is fully thread-safe; callbacks are dispatched
/// synchronously on the thread that calls [`refresh`](Self::refresh), in
/// arbitrary order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use dashkit::period::{DateRange, PeriodCollection};
///
/// let collection = Arc::new(PeriodCollection::new());
/// let _subscription = collection.subscribe(|range| {
///     println!("new range starting {}", range.start);
/// });
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// collection.set_period(DateRange::from_start(start));
/// collection.refresh();
/// ```
pub struct PeriodCollection {
    key: Option<String>,
    next_id: AtomicU64,
    requested: RwLock<Option<DateRange>>,
    callbacks: RwLock<HashMap<SubscriptionId, RangeCallback>>,
}

impl PeriodCollection {
    /// Creates an unkeyed collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: None,
            next_id: AtomicU64::new(1),
            requested: RwLock::new(None),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a collection for the given collection key.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new()
        }
    }

    /// Returns the collection key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Subscribes to range updates.
    ///
    /// The callback runs on every [`refresh`](Self::refresh) that has a
    /// range to publish. The returned handle unsubscribes on drop.
    #[must_use]
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> PeriodSubscription
    where
        F: Fn(&DateRange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().insert(id, Arc::new(callback));
        tracing::debug!(subscription = %id, "subscribed to period collection");
        PeriodSubscription {
            collection: Arc::downgrade(self),
            id,
        }
    }

    /// Removes a subscription by ID.
    ///
    /// Returns `true` if a subscription was found and removed. Usually
    /// called through [`PeriodSubscription`]'s drop.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.callbacks.write().remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = %id, "unsubscribed from period collection");
        }
        removed
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Records the requested range. Subscribers are not notified until the
    /// next [`refresh`](Self::refresh).
    pub fn set_period(&self, range: DateRange) {
        *self.requested.write() = Some(range);
    }

    /// Returns the currently requested range, if any.
    #[must_use]
    pub fn current(&self) -> Option<DateRange> {
        *self.requested.read()
    }

    /// Publishes the authoritative range to all subscribers.
    ///
    /// Does nothing while no range has been requested yet; consumers stay
    /// uninitialized until data exists (silent wait, no error surface).
    pub fn refresh(&self) {
        let Some(range) = self.current() else {
            tracing::trace!("refresh without a requested range");
            return;
        };

        // Snapshot the callbacks so a subscriber may subscribe or
        // unsubscribe from within its callback without deadlocking.
        let callbacks: Vec<RangeCallback> = self.callbacks.read().values().cloned().collect();
        tracing::debug!(
            start = %range.start,
            subscribers = callbacks.len(),
            "publishing range"
        );
        for callback in callbacks {
            callback(&range);
        }
    }

    /// Applies a request emitted by the selector.
    pub fn apply(&self, request: &SourceRequest) {
        match *request {
            SourceRequest::SetPeriod { start, end } => {
                self.set_period(DateRange::new(start, end));
            }
            SourceRequest::Refresh => self.refresh(),
        }
    }
}

impl Default for PeriodCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PeriodCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodCollection")
            .field("key", &self.key)
            .field("requested", &self.current())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// A scoped subscription to a [`PeriodCollection`].
///
/// Dropping the handle unsubscribes. The handle holds a weak reference, so
/// it outliving the collection is harmless.
#[derive(Debug)]
pub struct PeriodSubscription {
    collection: Weak<PeriodCollection>,
    id: SubscriptionId,
}

impl PeriodSubscription {
    /// Returns the subscription ID.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for PeriodSubscription {
    fn drop(&mut self) {
        if let Some(collection) = self.collection.upgrade() {
            collection.unsubscribe(self.id);
        }
    }
}

/// Type alias for the injectable clock.
type NowFn = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Drives a [`PeriodSelector`] against a [`PeriodCollection`].
///
/// The navigator subscribes on construction and releases the subscription
/// when dropped. Navigation methods run the selector's pure transition,
/// store the optimistic state, and forward the emitted requests; the
/// confirmed period is only ever written by the subscription callback.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use dashkit::period::{Granularity, PeriodCollection, PeriodNavigator};
///
/// let collection = Arc::new(PeriodCollection::new());
/// let navigator = PeriodNavigator::new(Arc::clone(&collection));
///
/// navigator.select_granularity(Granularity::Week);
/// assert_eq!(navigator.granularity(), Some(Granularity::Week));
/// assert!(navigator.period().is_some());
/// ```
pub struct PeriodNavigator {
    collection: Arc<PeriodCollection>,
    state: Arc<RwLock<PeriodSelector>>,
    now_fn: NowFn,
    _subscription: PeriodSubscription,
}

impl PeriodNavigator {
    /// Creates a navigator using the local wall clock.
    #[must_use]
    pub fn new(collection: Arc<PeriodCollection>) -> Self {
        Self::with_clock(collection, || Local::now().naive_local())
    }

    /// Creates a navigator with an injectable clock, for deterministic
    /// tests.
    #[must_use]
    pub fn with_clock<F>(collection: Arc<PeriodCollection>, now_fn: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        let now_fn: NowFn = Arc::new(now_fn);
        let state = Arc::new(RwLock::new(PeriodSelector::new()));

        let callback_state = Arc::clone(&state);
        let callback_now = Arc::clone(&now_fn);
        let subscription = collection.subscribe(move |range| {
            let now = callback_now();
            let mut selector = callback_state.write();
            let (next, _requests) = selector.handle(&SelectorEvent::RangeUpdated(*range), now);
            *selector = next;
        });

        Self {
            collection,
            state,
            now_fn,
            _subscription: subscription,
        }
    }

    /// Returns the confirmed period, if any data has arrived.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.state.read().period()
    }

    /// Returns the current granularity.
    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        self.state.read().granularity()
    }

    /// Switches the reporting granularity.
    pub fn select_granularity(&self, granularity: Granularity) {
        self.apply(SelectorEvent::GranularitySelected(granularity));
    }

    /// Jumps to the period containing today.
    pub fn today(&self) {
        self.apply(SelectorEvent::Today);
    }

    /// Steps one period back.
    pub fn previous(&self) {
        self.apply(SelectorEvent::Previous);
    }

    /// Steps one period forward.
    pub fn next(&self) {
        self.apply(SelectorEvent::Next);
    }

    fn apply(&self, event: SelectorEvent) {
        let now = (self.now_fn)();
        let requests = {
            let mut selector = self.state.write();
            let (next, requests) = selector.handle(&event, now);
            *selector = next;
            requests
        };
        // The lock is released before forwarding: a refresh dispatches the
        // confirmation callback synchronously, which takes the same lock.
        for request in &requests {
            self.collection.apply(request);
        }
    }
}

impl std::fmt::Debug for PeriodNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodNavigator")
            .field("state", &*self.state.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::AtomicU32;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn subscription_id_display() {
        let collection = Arc::new(PeriodCollection::new());
        let subscription = collection.subscribe(|_| {});
        assert_eq!(
            subscription.id().to_string(),
            format!("Sub({})", subscription.id().value())
        );
    }

    #[test]
    fn refresh_without_period_is_silent() {
        let collection = Arc::new(PeriodCollection::new());
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        let _subscription = collection.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        collection.refresh();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn refresh_publishes_to_all_subscribers() {
        let collection = Arc::new(PeriodCollection::new());
        let counter = Arc::new(AtomicU32::new(0));
        let c1 = Arc::clone(&counter);
        let c2 = Arc::clone(&counter);
        let _s1 = collection.subscribe(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let _s2 = collection.subscribe(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        collection.set_period(DateRange::from_start(at(2024, 3, 4, 0)));
        collection.refresh();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let collection = Arc::new(PeriodCollection::new());
        let subscription = collection.subscribe(|_| {});
        assert_eq!(collection.subscriber_count(), 1);
        drop(subscription);
        assert_eq!(collection.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_collection_is_harmless() {
        let collection = Arc::new(PeriodCollection::new());
        let subscription = collection.subscribe(|_| {});
        drop(collection);
        drop(subscription);
    }

    #[test]
    fn keyed_collection_reports_key() {
        let collection = PeriodCollection::with_key("energy");
        assert_eq!(collection.key(), Some("energy"));
        assert_eq!(PeriodCollection::new().key(), None);
    }

    #[test]
    fn navigator_confirms_through_collection() {
        let collection = Arc::new(PeriodCollection::new());
        let navigator =
            PeriodNavigator::with_clock(Arc::clone(&collection), || at(2024, 3, 6, 12));

        assert!(navigator.period().is_none());
        navigator.select_granularity(Granularity::Week);

        let period = navigator.period().expect("confirmed period");
        assert_eq!(period.start(), at(2024, 3, 4, 0));
        assert_eq!(navigator.granularity(), Some(Granularity::Week));
    }

    #[test]
    fn navigator_next_advances_one_week() {
        let collection = Arc::new(PeriodCollection::new());
        let navigator =
            PeriodNavigator::with_clock(Arc::clone(&collection), || at(2024, 3, 6, 12));

        navigator.select_granularity(Granularity::Week);
        navigator.next();

        let period = navigator.period().expect("confirmed period");
        assert_eq!(period.start(), at(2024, 3, 11, 0));
        assert_eq!(navigator.granularity(), Some(Granularity::Week));
    }

    #[test]
    fn navigator_drop_releases_subscription() {
        let collection = Arc::new(PeriodCollection::new());
        let navigator = PeriodNavigator::with_clock(Arc::clone(&collection), || at(2024, 3, 6, 0));
        assert_eq!(collection.subscriber_count(), 1);
        drop(navigator);
        assert_eq!(collection.subscriber_count(), 0);
    }
}
