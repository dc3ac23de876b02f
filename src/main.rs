//! Wiring & DI. Entry point: bootstrap adapters, build providers, run UI.
//! No business logic here; fetch-or-fallback lives in ResilientProvider.

use ccb_data::adapters::nextcloud::{NextcloudCalendar, NextcloudClient, NextcloudRouteFiles};
use ccb_data::adapters::ui::progress::spinner;
use ccb_data::adapters::ui::tui::TuiInputPort;
use ccb_data::adapters::weather::OpenWeatherAdapter;
use ccb_data::domain::{ClubInfo, RoutesDomain, ScheduleDomain, WeatherDomain};
use ccb_data::ports::{DataSource, InputPort, WaypointSource};
use ccb_data::shared::config::AppConfig;
use ccb_data::usecases::{ResilientProvider, RouteCatalog, WeekInfoService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let club = ClubInfo::bohars();
    ccb_data::adapters::ui::init_ui(&club);

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration; running with defaults");
            AppConfig::default()
        }
    };
    let timeout = Duration::from_secs(cfg.fetch_timeout_secs_or_default());

    // --- Groupware: one client shared by the calendar and files adapters ---
    let groupware = Arc::new(NextcloudClient::from_config(&cfg));
    if cfg.is_nextcloud_configured() {
        info!(url = %groupware.base_url(), "Nextcloud enabled (calendar, routes, GPX files)");
    } else {
        info!("CCB_NEXTCLOUD_USER / CCB_NEXTCLOUD_PASSWORD not set; schedule and routes use bundled data");
    }
    let calendar: Arc<dyn DataSource<ScheduleDomain>> = Arc::new(NextcloudCalendar::new(
        Arc::clone(&groupware),
        cfg.calendar_path_or_default(),
    ));
    let route_files = Arc::new(NextcloudRouteFiles::new(Arc::clone(&groupware)));
    let route_source: Arc<dyn DataSource<RoutesDomain>> = Arc::clone(&route_files) as _;
    let waypoint_source: Arc<dyn WaypointSource> = route_files;

    // --- Weather ---
    if cfg.is_weather_configured() {
        info!(location = %cfg.weather_location_or_default(), "OpenWeather enabled");
    } else {
        info!("CCB_WEATHER_API_KEY not set; weather uses bundled data");
    }
    let weather_source: Arc<dyn DataSource<WeatherDomain>> =
        Arc::new(OpenWeatherAdapter::from_config(&cfg));

    // --- Providers ---
    let schedule = Arc::new(ResilientProvider::new(calendar, timeout));
    let routes = Arc::new(ResilientProvider::new(route_source, timeout));
    let weather = Arc::new(ResilientProvider::new(weather_source, timeout));

    let pb = spinner("Loading schedule, routes and weather...");
    let (schedule_now, routes_now, _) = tokio::join!(schedule.fetch(), routes.fetch(), weather.fetch());
    pb.finish_and_clear();
    info!(
        events = schedule_now.len(),
        routes = routes_now.len(),
        schedule_live = schedule.last_fetch_succeeded(),
        routes_live = routes.last_fetch_succeeded(),
        weather_live = weather.last_fetch_succeeded(),
        "initial load complete"
    );

    let weather_refresh = Duration::from_secs(cfg.weather_refresh_secs_or_default());
    info!(secs = weather_refresh.as_secs(), "weather refresh period");
    let refresh_task = Arc::clone(&weather).run_refresh_loop(weather_refresh);

    // --- Use cases ---
    let catalog = Arc::new(RouteCatalog::new(
        Arc::clone(&routes),
        waypoint_source,
        timeout,
    ));
    let week_info = Arc::new(WeekInfoService::new(
        club.clone(),
        Arc::clone(&routes),
        Arc::clone(&weather),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        club,
        schedule,
        routes,
        weather,
        catalog,
        week_info,
        groupware,
        PathBuf::from(cfg.download_dir_or_default()),
    ));

    // --- Run (main menu) ---
    let outcome = input_port.run().await;
    refresh_task.abort();
    outcome.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
