//! Implements InputPort. Inquire-based menu over the club's data.
//!
//! Pure presentation: every value comes from a provider or a use case, the
//! handlers for each menu entry are owned by `TuiInputPort`.

use super::progress::spinner;
use crate::adapters::nextcloud::NextcloudClient;
use crate::domain::dates::relative_date_label;
use crate::domain::queries::{events_by_category, filter_upcoming};
use crate::domain::{
    CalendarInvite, ClubInfo, Difficulty, DomainError, EventCategory, RouteInfo, RoutesDomain, ScheduleDomain,
    ScheduleEntry, WeatherDomain, WeatherSnapshot, WeekInfo,
};
use crate::ports::InputPort;
use crate::usecases::{ResilientProvider, RouteCatalog, WeekInfoService};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How many upcoming events the schedule view lists.
const UPCOMING_LIMIT: usize = 5;
const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ThisWeek,
    Upcoming,
    ByCategory,
    Routes,
    Download,
    AddToCalendar,
    Club,
    Refresh,
    Status,
    Quit,
}

const MENU: [MenuAction; 10] = [
    MenuAction::ThisWeek,
    MenuAction::Upcoming,
    MenuAction::ByCategory,
    MenuAction::Routes,
    MenuAction::Download,
    MenuAction::AddToCalendar,
    MenuAction::Club,
    MenuAction::Refresh,
    MenuAction::Status,
    MenuAction::Quit,
];

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::ThisWeek => "This week's ride",
            MenuAction::Upcoming => "Upcoming events",
            MenuAction::ByCategory => "Events by category",
            MenuAction::Routes => "Route catalog",
            MenuAction::Download => "Download a route (GPX)",
            MenuAction::AddToCalendar => "Add an event to my calendar",
            MenuAction::Club => "About the club",
            MenuAction::Refresh => "Refresh data",
            MenuAction::Status => "Check groupware connection",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Route wrapper so the select list shows a one-line summary.
struct RouteChoice(RouteInfo);

impl fmt::Display for RouteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_route(&self.0))
    }
}

/// Difficulty filter entry; `None` lists every route.
struct DifficultyChoice(Option<Difficulty>);

impl fmt::Display for DifficultyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => write!(f, "Level {}", d),
            None => f.write_str("All levels"),
        }
    }
}

/// Calendar export entry: label shown in the list, invite behind it.
struct InviteChoice {
    label: String,
    invite: CalendarInvite,
}

impl fmt::Display for InviteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    club: ClubInfo,
    schedule: Arc<ResilientProvider<ScheduleDomain>>,
    routes: Arc<ResilientProvider<RoutesDomain>>,
    weather: Arc<ResilientProvider<WeatherDomain>>,
    catalog: Arc<RouteCatalog>,
    week_info: Arc<WeekInfoService>,
    groupware: Arc<NextcloudClient>,
    download_dir: PathBuf,
}

impl TuiInputPort {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        club: ClubInfo,
        schedule: Arc<ResilientProvider<ScheduleDomain>>,
        routes: Arc<ResilientProvider<RoutesDomain>>,
        weather: Arc<ResilientProvider<WeatherDomain>>,
        catalog: Arc<RouteCatalog>,
        week_info: Arc<WeekInfoService>,
        groupware: Arc<NextcloudClient>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            club,
            schedule,
            routes,
            weather,
            catalog,
            week_info,
            groupware,
            download_dir,
        }
    }

    async fn show_this_week(&self, today: NaiveDate) {
        let week = self.week_info.current(today).await;
        println!("{}", format_week(&week, today));
    }

    async fn show_upcoming(&self, today: NaiveDate) {
        let entries = self.schedule.current().await;
        let upcoming = filter_upcoming(&entries, today, UPCOMING_LIMIT);
        println!("Upcoming events{}", offline_badge(self.schedule.last_fetch_succeeded()));
        if upcoming.is_empty() {
            println!("  No upcoming events.");
        }
        for entry in &upcoming {
            println!("{}", format_entry(entry, today));
        }
    }

    async fn show_by_category(&self, today: NaiveDate) -> Result<(), DomainError> {
        let Some(category) = Select::new("Category", EventCategory::ALL.to_vec())
            .prompt_skippable()
            .map_err(prompt_error)?
        else {
            return Ok(());
        };
        let entries = self.schedule.current().await;
        let matching = events_by_category(&entries, category);
        if matching.is_empty() {
            println!("  No {} events.", category);
        }
        for entry in &matching {
            println!("{}", format_entry(entry, today));
        }
        Ok(())
    }

    async fn show_routes(&self) -> Result<(), DomainError> {
        let choices = vec![
            DifficultyChoice(None),
            DifficultyChoice(Some(Difficulty::A)),
            DifficultyChoice(Some(Difficulty::B)),
            DifficultyChoice(Some(Difficulty::C)),
        ];
        let Some(choice) = Select::new("Level", choices)
            .prompt_skippable()
            .map_err(prompt_error)?
        else {
            return Ok(());
        };
        let routes = self.catalog.list(choice.0).await;
        println!("Routes{}", offline_badge(self.routes.last_fetch_succeeded()));
        for route in &routes {
            println!("  {}", format_route(route));
            if !route.highlights.is_empty() {
                println!("      {}", route.highlights.join(" · "));
            }
        }
        Ok(())
    }

    async fn download_route(&self) -> Result<(), DomainError> {
        let routes = self.catalog.list(None).await;
        let choices: Vec<RouteChoice> = routes.into_iter().map(RouteChoice).collect();
        let Some(choice) = Select::new("Route to download", choices)
            .prompt_skippable()
            .map_err(prompt_error)?
        else {
            return Ok(());
        };

        let download = self.catalog.download_waypoints(&choice.0.id).await?;
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| DomainError::Io(format!("create download dir: {}", e)))?;
        let path = self.download_dir.join(&download.file_name);
        tokio::fs::write(&path, download.content.as_bytes())
            .await
            .map_err(|e| DomainError::Io(format!("write {}: {}", path.display(), e)))?;

        info!(path = %path.display(), synthesized = download.synthesized, "route saved");
        if download.synthesized {
            println!(
                "Saved {} (track unavailable, start point only)",
                path.display()
            );
        } else {
            println!("Saved {}", path.display());
        }
        Ok(())
    }

    async fn add_to_calendar(&self, today: NaiveDate) -> Result<(), DomainError> {
        let week = self.week_info.current(today).await;
        let mut choices = vec![InviteChoice {
            label: format!(
                "{}  This week's ride: {}",
                relative_date_label(today, week.date),
                week.route_name
            ),
            invite: CalendarInvite::for_week(&week),
        }];
        let entries = self.schedule.current().await;
        choices.extend(
            filter_upcoming(&entries, today, UPCOMING_LIMIT)
                .iter()
                .map(|entry| InviteChoice {
                    label: format!("{}  {}", relative_date_label(today, entry.date), entry.title),
                    invite: CalendarInvite::for_entry(entry),
                }),
        );

        let Some(choice) = Select::new("Event", choices)
            .prompt_skippable()
            .map_err(prompt_error)?
        else {
            return Ok(());
        };
        let url = choice.invite.google_calendar_url()?;
        info!(event = %choice.invite.title, "calendar link generated");
        println!("Open this link to add \"{}\":", choice.invite.title);
        println!("  {}", url);
        Ok(())
    }

    fn show_club(&self) {
        let club = &self.club;
        println!("{} ({}), founded {}", club.name, club.short_name, club.founded);
        println!("Contact: {}", club.email);
        println!(
            "Saturday rides: {} (Nov-Mar) / {} (Apr-Oct), Wednesday: {}, meeting point: {}",
            club.saturday_winter_time.format("%H:%M"),
            club.saturday_summer_time.format("%H:%M"),
            club.wednesday_time.format("%H:%M"),
            club.meeting_point
        );
        for level in &club.levels {
            println!(
                "  Level {}: {}, {} ({})",
                level.difficulty, level.distance, level.description, level.pace
            );
        }
    }

    async fn refresh_all(&self) {
        let pb = spinner("Refreshing schedule, routes and weather...");
        let (schedule, routes, weather) = tokio::join!(
            self.schedule.refresh(),
            self.routes.refresh(),
            self.weather.refresh()
        );
        pb.finish_and_clear();
        println!(
            "Schedule: {} events{}",
            schedule.len(),
            offline_badge(self.schedule.last_fetch_succeeded())
        );
        println!(
            "Routes: {} routes{}",
            routes.len(),
            offline_badge(self.routes.last_fetch_succeeded())
        );
        println!(
            "Weather: {}{}",
            format_weather(&weather),
            offline_badge(self.weather.last_fetch_succeeded())
        );
    }

    async fn check_groupware(&self) {
        let pb = spinner(format!("Contacting {}...", self.groupware.base_url()));
        let outcome = tokio::time::timeout(STATUS_TIMEOUT, self.groupware.check_status()).await;
        pb.finish_and_clear();
        match outcome {
            Ok(Ok(true)) => println!("Groupware reachable."),
            Ok(Ok(false)) => println!("Groupware answered but is not ready (maintenance?)."),
            Ok(Err(e)) => {
                warn!(error = %e, "groupware status check failed");
                println!("Groupware unreachable: {}", e);
            }
            Err(_) => println!("Groupware did not answer within {}s.", STATUS_TIMEOUT.as_secs()),
        }
        if !self.groupware.is_configured() {
            println!("No credentials configured: calendar and routes use bundled data.");
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let action = match Select::new("What would you like to see?", MENU.to_vec()).prompt() {
                Ok(action) => action,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(prompt_error(e)),
            };
            let today = Local::now().date_naive();

            match action {
                MenuAction::ThisWeek => self.show_this_week(today).await,
                MenuAction::Upcoming => self.show_upcoming(today).await,
                MenuAction::ByCategory => self.show_by_category(today).await?,
                MenuAction::Routes => self.show_routes().await?,
                MenuAction::Download => {
                    if let Err(e) = self.download_route().await {
                        warn!(error = %e, "download failed");
                        println!("Download failed: {}", e);
                    }
                }
                MenuAction::AddToCalendar => {
                    if let Err(e) = self.add_to_calendar(today).await {
                        warn!(error = %e, "calendar link failed");
                        println!("Could not build the calendar link: {}", e);
                    }
                }
                MenuAction::Club => self.show_club(),
                MenuAction::Refresh => self.refresh_all().await,
                MenuAction::Status => self.check_groupware().await,
                MenuAction::Quit => break,
            }
            println!();
        }
        Ok(())
    }
}

fn prompt_error(e: InquireError) -> DomainError {
    DomainError::Io(format!("prompt failed: {}", e))
}

fn offline_badge(live: bool) -> &'static str {
    if live { "" } else { "  [offline data]" }
}

fn format_entry(entry: &ScheduleEntry, today: NaiveDate) -> String {
    let mut line = format!(
        "  {:>12}  {} ({})",
        relative_date_label(today, entry.date),
        entry.title,
        entry.category
    );
    if let Some(level) = entry.level {
        line.push_str(&format!(" [level {}]", level));
    }
    let mut details = Vec::new();
    if let Some(time) = entry.meeting_time {
        details.push(time.format("%H:%M").to_string());
    }
    if let Some(point) = &entry.meeting_point {
        details.push(point.clone());
    }
    if let Some(leader) = &entry.leader {
        details.push(format!("led by {}", leader));
    }
    if entry.requires_registration {
        details.push("registration required".to_string());
    }
    if !details.is_empty() {
        line.push_str(&format!("\n                {}", details.join(", ")));
    }
    line
}

fn format_route(route: &RouteInfo) -> String {
    format!(
        "[{}] {}, {:.0} km, {:.0} m D+",
        route.difficulty, route.name, route.distance_km, route.elevation_m
    )
}

fn format_weather(weather: &WeatherSnapshot) -> String {
    format!(
        "{}, {:.0}°C ({})",
        weather.condition, weather.temperature_c, weather.icon_token
    )
}

fn format_week(week: &WeekInfo, today: NaiveDate) -> String {
    format!(
        "Ride of {} ({})\n  {}, {:.0} km, level {}\n  Meeting: {} at {}\n  Leader: {}\n  Weather: {}{}",
        week.date.format("%A %d %B %Y"),
        relative_date_label(today, week.date),
        week.route_name,
        week.distance_km,
        week.difficulty,
        week.meeting_time.format("%H:%M"),
        week.meeting_point,
        week.leader,
        format_weather(&week.weather),
        offline_badge(week.weather_is_live)
    )
}
