//! Observable holder of the latest formatted forecast for one city.
//!
//! The slot is a [`tokio::sync::watch`] channel. Whoever owns the UI keeps a
//! receiver from [`ForecastPresenter::subscribe`] and reacts to changes on its
//! own task; the presenter only ever replaces the whole value.

use std::sync::{Arc, Weak};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    fetcher::{FetchError, WeatherFetcher},
    format::format_forecast,
    model::{FormattedForecast, WeatherForecast},
};

pub type ForecastSlot = Option<FormattedForecast>;

#[derive(Debug)]
struct Shared {
    city: String,
    fetcher: Arc<dyn WeatherFetcher>,
    slot: watch::Sender<ForecastSlot>,
}

impl Shared {
    fn publish(&self, outcome: Result<WeatherForecast, FetchError>) {
        let next = match outcome {
            Ok(forecast) => {
                let formatted = format_forecast(&forecast);
                debug!(city = %self.city, icon = %formatted.icon, "publishing forecast");
                Some(formatted)
            }
            Err(err) => {
                warn!(city = %self.city, error = %err, "forecast fetch failed, clearing data");
                None
            }
        };

        self.slot.send_replace(next);
    }
}

/// Fetches, formats and publishes the current weather of a fixed city.
#[derive(Debug)]
pub struct ForecastPresenter {
    shared: Arc<Shared>,
}

impl ForecastPresenter {
    pub fn new(city: impl Into<String>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                city: city.into(),
                fetcher,
                slot,
            }),
        }
    }

    pub fn city(&self) -> &str {
        &self.shared.city
    }

    /// Snapshot of the slot.
    pub fn current(&self) -> ForecastSlot {
        self.shared.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ForecastSlot> {
        self.shared.slot.subscribe()
    }

    /// Starts one fetch in the background and returns immediately.
    ///
    /// Overlapping refreshes are not coordinated: each completion replaces the
    /// slot. If the presenter is dropped before the fetch completes, the result
    /// is discarded. Must be called within a tokio runtime.
    pub fn refresh(&self) -> JoinHandle<()> {
        let shared = Arc::downgrade(&self.shared);
        let city = self.shared.city.clone();
        let fetcher = Arc::clone(&self.shared.fetcher);

        debug!(%city, "refresh requested");
        tokio::spawn(async move {
            let outcome = fetcher.current_forecast(&city).await;
            publish_if_alive(&shared, outcome);
        })
    }

    /// Same as [`refresh`](Self::refresh) but completes before returning.
    pub async fn refresh_now(&self) {
        let shared = &self.shared;
        let outcome = shared.fetcher.current_forecast(&shared.city).await;
        shared.publish(outcome);
    }
}

fn publish_if_alive(shared: &Weak<Shared>, outcome: Result<WeatherForecast, FetchError>) {
    match shared.upgrade() {
        Some(shared) => shared.publish(outcome),
        None => debug!("presenter dropped before fetch completed"),
    }
}
