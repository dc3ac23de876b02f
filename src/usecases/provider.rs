//! Resilient data provider: fetch from the external source, fall back to the
//! bundled dataset on any failure, always return a value.
//!
//! One generic implementation serves every `DataDomain` (schedule, routes, weather).

use crate::domain::{DataDomain, DomainError};
use crate::ports::DataSource;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Upper bound for one external call when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// What a provider last produced. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderState<V> {
    pub last_value: Option<V>,
    pub last_fetch_succeeded: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl<V> Default for ProviderState<V> {
    fn default() -> Self {
        Self {
            last_value: None,
            last_fetch_succeeded: false,
            refreshed_at: None,
        }
    }
}

/// Fetch-or-fallback provider for one data domain.
///
/// The state lives in a single `watch` cell: each completed fetch replaces it in one
/// `send_replace`, so overlapping refreshes resolve last-completed-wins and readers
/// never see a half-updated state.
pub struct ResilientProvider<D: DataDomain> {
    source: Arc<dyn DataSource<D>>,
    timeout: Duration,
    state: watch::Sender<ProviderState<D::Value>>,
}

impl<D: DataDomain> ResilientProvider<D> {
    pub fn new(source: Arc<dyn DataSource<D>>, timeout: Duration) -> Self {
        let (state, _) = watch::channel(ProviderState::default());
        Self {
            source,
            timeout,
            state,
        }
    }

    pub fn with_default_timeout(source: Arc<dyn DataSource<D>>) -> Self {
        Self::new(source, DEFAULT_FETCH_TIMEOUT)
    }

    /// Load the domain value. Never fails: any upstream problem yields the fallback.
    pub async fn fetch(&self) -> D::Value {
        let (value, succeeded) = match self.fetch_validated().await {
            Ok(value) => {
                debug!(
                    domain = D::NAME,
                    records = D::len(&value),
                    "fetched from external source"
                );
                (value, true)
            }
            Err(DomainError::ConfigurationMissing(reason)) => {
                info!(domain = D::NAME, reason = %reason, "source not configured; serving fallback data");
                (D::fallback(), false)
            }
            Err(e) => {
                warn!(domain = D::NAME, error = %e, "fetch failed; serving fallback data");
                (D::fallback(), false)
            }
        };

        self.state.send_replace(ProviderState {
            last_value: Some(value.clone()),
            last_fetch_succeeded: succeeded,
            refreshed_at: Some(Utc::now()),
        });
        value
    }

    /// Re-synchronize with the source. Same contract as `fetch`.
    pub async fn refresh(&self) -> D::Value {
        info!(domain = D::NAME, "refreshing");
        self.fetch().await
    }

    /// Last stored value, without I/O. `None` only before the first fetch.
    pub fn last_known(&self) -> Option<D::Value> {
        self.state.borrow().last_value.clone()
    }

    /// Last stored value, fetching first if nothing was loaded yet.
    pub async fn current(&self) -> D::Value {
        match self.last_known() {
            Some(value) => value,
            None => self.fetch().await,
        }
    }

    pub fn last_fetch_succeeded(&self) -> bool {
        self.state.borrow().last_fetch_succeeded
    }

    /// Consistent snapshot of value, success flag and timestamp.
    pub fn state(&self) -> ProviderState<D::Value> {
        self.state.borrow().clone()
    }

    /// Observe state replacements instead of polling.
    pub fn subscribe(&self) -> watch::Receiver<ProviderState<D::Value>> {
        self.state.subscribe()
    }

    /// Refresh every `period` in the background until the handle is aborted.
    pub fn run_refresh_loop(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                self.refresh().await;
            }
        })
    }

    async fn fetch_validated(&self) -> Result<D::Value, DomainError> {
        if !self.source.is_configured() {
            return Err(DomainError::ConfigurationMissing(format!(
                "{} source has no endpoint or credentials",
                D::NAME
            )));
        }

        let value = tokio::time::timeout(self.timeout, self.source.fetch())
            .await
            .map_err(|_| {
                DomainError::Transport(format!(
                    "no response within {} ms",
                    self.timeout.as_millis()
                ))
            })??;

        D::validate(&value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::{fallback_routes, fallback_schedule, fallback_weather};
    use crate::domain::{RoutesDomain, ScheduleDomain, WeatherDomain, WeatherSnapshot};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the same outcome on every call, after `delay`.
    struct StubSource<D: DataDomain> {
        configured: bool,
        outcome: Result<D::Value, DomainError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl<D: DataDomain> StubSource<D> {
        fn new(outcome: Result<D::Value, DomainError>) -> Self {
            Self {
                configured: true,
                outcome,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(Err(DomainError::Transport("must not be called".into())))
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait::async_trait]
    impl<D: DataDomain> DataSource<D> for StubSource<D> {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn fetch(&self) -> Result<D::Value, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.outcome.clone()
        }
    }

    /// Each call pops the next (delay, value) pair.
    struct SequencedWeather {
        script: Mutex<VecDeque<(Duration, WeatherSnapshot)>>,
    }

    #[async_trait::async_trait]
    impl DataSource<WeatherDomain> for SequencedWeather {
        fn is_configured(&self) -> bool {
            true
        }

        async fn fetch(&self) -> Result<WeatherSnapshot, DomainError> {
            let next = self.script.lock().unwrap().pop_front();
            let (delay, value) =
                next.ok_or_else(|| DomainError::Transport("script exhausted".into()))?;
            tokio::time::sleep(delay).await;
            Ok(value)
        }
    }

    fn weather(temp: f64, condition: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: temp,
            condition: condition.to_string(),
            icon_token: "clear".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_source_serves_fallback_without_calling() {
        let source = Arc::new(StubSource::<ScheduleDomain>::unconfigured());
        let provider: ResilientProvider<ScheduleDomain> =
            ResilientProvider::with_default_timeout(source.clone());

        assert!(provider.last_known().is_none());
        let value = provider.fetch().await;

        assert_eq!(value, fallback_schedule());
        assert!(!provider.last_fetch_succeeded());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.last_known(), Some(fallback_schedule()));
    }

    #[tokio::test]
    async fn test_transport_error_serves_fallback() {
        let source = Arc::new(StubSource::<WeatherDomain>::new(Err(DomainError::Transport(
            "HTTP 503".into(),
        ))));
        let provider: ResilientProvider<WeatherDomain> =
            ResilientProvider::with_default_timeout(source);

        let value = provider.fetch().await;

        assert_eq!(value, fallback_weather());
        assert_eq!(value.temperature_c, 22.0);
        assert_eq!(value.condition, "Partiellement nuageux");
        assert_eq!(value.icon_token, "partly-cloudy");
        assert!(!provider.last_fetch_succeeded());
    }

    #[tokio::test]
    async fn test_invalid_record_rejects_whole_collection() {
        let mut routes = fallback_routes();
        routes.truncate(2);
        routes[0].id = "remote-1".into();
        routes[1].id = "remote-2".into();
        routes[1].distance_km = -12.0;
        let provider: ResilientProvider<RoutesDomain> =
            ResilientProvider::with_default_timeout(Arc::new(StubSource::<RoutesDomain>::new(Ok(routes))));

        let value = provider.fetch().await;

        assert_eq!(value, fallback_routes());
        assert!(!value.iter().any(|r| r.id.starts_with("remote-")));
        assert!(!provider.last_fetch_succeeded());
    }

    #[tokio::test]
    async fn test_missing_title_triggers_fallback() {
        let mut schedule = fallback_schedule();
        schedule[3].title = String::new();
        let provider: ResilientProvider<ScheduleDomain> =
            ResilientProvider::with_default_timeout(Arc::new(StubSource::<ScheduleDomain>::new(Ok(schedule))));

        assert_eq!(provider.fetch().await, fallback_schedule());
        assert!(!provider.last_fetch_succeeded());
    }

    #[tokio::test]
    async fn test_valid_response_passes_through() {
        let mut routes = fallback_routes();
        routes.truncate(1);
        routes[0].id = "remote".into();
        let provider: ResilientProvider<RoutesDomain> =
            ResilientProvider::with_default_timeout(Arc::new(StubSource::<RoutesDomain>::new(Ok(
                routes.clone(),
            ))));

        assert_eq!(provider.fetch().await, routes);
        assert!(provider.last_fetch_succeeded());
        assert!(provider.state().refreshed_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_collection_is_success() {
        let provider: ResilientProvider<ScheduleDomain> =
            ResilientProvider::with_default_timeout(Arc::new(StubSource::<ScheduleDomain>::new(Ok(vec![]))));

        assert!(provider.fetch().await.is_empty());
        assert!(provider.last_fetch_succeeded());
        assert_eq!(provider.last_known(), Some(vec![]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_source_times_out_to_fallback() {
        let source = StubSource::<WeatherDomain>::new(Ok(weather(15.0, "Pluie")))
            .with_delay(Duration::from_secs(60));
        let provider: ResilientProvider<WeatherDomain> =
            ResilientProvider::new(Arc::new(source), Duration::from_secs(5));

        let started = tokio::time::Instant::now();
        let value = provider.fetch().await;

        assert_eq!(value, fallback_weather());
        assert!(!provider.last_fetch_succeeded());
        assert!(started.elapsed() < Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_refresh_replaces_fallback_after_recovery() {
        let script = SequencedWeather {
            script: Mutex::new(VecDeque::from(vec![
                (Duration::ZERO, weather(f64::NAN, "broken")),
                (Duration::ZERO, weather(17.0, "Averses")),
            ])),
        };
        let provider: ResilientProvider<WeatherDomain> =
            ResilientProvider::with_default_timeout(Arc::new(script));

        assert_eq!(provider.fetch().await, fallback_weather());
        assert!(!provider.last_fetch_succeeded());

        assert_eq!(provider.refresh().await, weather(17.0, "Averses"));
        assert!(provider.last_fetch_succeeded());
        assert_eq!(provider.last_known(), Some(weather(17.0, "Averses")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refreshes_last_completed_wins() {
        let slow = weather(10.0, "first call, completes last");
        let fast = weather(20.0, "second call, completes first");
        let script = SequencedWeather {
            script: Mutex::new(VecDeque::from(vec![
                (Duration::from_millis(50), slow.clone()),
                (Duration::from_millis(10), fast.clone()),
            ])),
        };
        let provider: ResilientProvider<WeatherDomain> =
            ResilientProvider::with_default_timeout(Arc::new(script));
        let mut rx = provider.subscribe();

        let (first, second) = tokio::join!(provider.refresh(), provider.refresh());

        assert_eq!(first, slow);
        assert_eq!(second, fast);
        assert_eq!(provider.last_known(), Some(slow.clone()));
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.last_value, Some(slow));
        assert!(seen.last_fetch_succeeded);
    }

    #[tokio::test]
    async fn test_current_fetches_once_then_reuses() {
        let source = Arc::new(StubSource::<ScheduleDomain>::new(Ok(vec![])));
        let provider: ResilientProvider<ScheduleDomain> =
            ResilientProvider::with_default_timeout(source.clone());

        provider.current().await;
        provider.current().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_replaces_state_each_period() {
        let period = Duration::from_secs(3600);
        let source = Arc::new(StubSource::<WeatherDomain>::new(Ok(weather(18.0, "Éclaircies"))));
        let provider: Arc<ResilientProvider<WeatherDomain>> =
            Arc::new(ResilientProvider::with_default_timeout(source.clone()));
        let mut rx = provider.subscribe();
        let started = tokio::time::Instant::now();

        let handle = Arc::clone(&provider).run_refresh_loop(period);
        rx.changed().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= period);

        rx.changed().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= period * 2);
        assert_eq!(provider.last_known(), Some(weather(18.0, "Éclaircies")));
        assert!(rx.borrow().last_fetch_succeeded);

        handle.abort();
    }
}
