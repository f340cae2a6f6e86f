//! Terminal UI for finding and registering waste collection points.

mod app;
mod input;
mod ui;

use std::{env, io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ecoponto_core::{
    model::PointQuery, service::EcopontoService, CategorySelection, GeolocationPort,
};
use ecoponto_provider_api::{ApiCatalogPort, ApiRegistryPort, DEFAULT_BASE_URL};
use ecoponto_provider_geoip::IpGeolocationPort;
use ecoponto_provider_ibge::IbgeDirectoryPort;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;

use crate::app::{App, Screen};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // HTTP + service setup
    let base_url =
        env::var("ECOPONTO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
    let client = Client::builder().user_agent("ecoponto/0.1").build()?;

    let directory = Arc::new(IbgeDirectoryPort::new(client.clone()));
    let catalog = Arc::new(ApiCatalogPort::new(client.clone(), base_url.clone()));
    let registry = Arc::new(ApiRegistryPort::new(client.clone(), base_url));
    let geolocation = Arc::new(IpGeolocationPort::new(client));

    let service = Arc::new(EcopontoService::new(directory, catalog, registry));

    // App state; session-scoped lookups happen once up front. A failed
    // lookup degrades its selector to "no options" instead of aborting.
    let mut app = App::new(Arc::clone(&service));

    match service.regions().await {
        Ok(regions) => app.regions = regions,
        Err(err) => app.error_message = Some(format!("Failed to load states: {err}")),
    }

    match service.categories().await {
        Ok(categories) => app.categories = CategorySelection::new(categories),
        Err(err) => {
            app.error_message = Some(format!("Failed to load collection items: {err}"));
        }
    }

    // Best-effort position seed; without it the map stays at the origin.
    if let Ok(coordinate) = geolocation.locate().await {
        app.seed_position(coordinate);
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}

                Action::LoadLocalities(request) => {
                    app.is_loading = true;
                    app.error_message = None;
                    app.info_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let outcome = app.service.localities(&request.region).await;

                    app.is_loading = false;
                    if let Err(err) = &outcome {
                        app.error_message = Some(format!("Failed to load cities: {err}"));
                    }
                    // Stale responses (region changed meanwhile) are dropped.
                    app.cascade.apply_localities(&request, outcome);
                    app.locality_list_index = 0;
                }

                Action::LoadPoints => {
                    app.is_loading = true;
                    app.error_message = None;
                    app.info_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    refresh_points(&mut app).await;
                    app.is_loading = false;
                }

                Action::OpenDetail(point) => {
                    app.is_loading = true;
                    app.error_message = None;
                    app.info_message = None;
                    app.screen = Screen::Detail;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let loaded = app.composer.load(point).await;

                    app.is_loading = false;
                    if let Err(err) = loaded {
                        app.error_message = Some(format!("Failed to load point: {err}"));
                    }
                }

                Action::Submit => {
                    app.is_loading = true;
                    app.error_message = None;
                    app.info_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let submitted = app
                        .pipeline
                        .submit(&app.fields, &app.cascade, &app.categories, &app.position)
                        .await;

                    app.is_loading = false;
                    match submitted {
                        Ok(()) => {
                            app.info_message = Some("Collection point registered!".into());
                            app.reset_registration();
                            app.screen = Screen::PointList;
                            refresh_points(&mut app).await;
                        }
                        Err(err) => {
                            // Rejected input and backend failures both keep the
                            // form state; the user corrects or retries.
                            app.error_message = Some(err.to_string());
                        }
                    }
                }

                Action::ComposeEmail => match app.composer.compose_email_intent() {
                    Some(intent) => {
                        app.error_message = None;
                        app.info_message = Some(format!(
                            "E-mail to {} – \"{}\"",
                            intent.recipients.join(", "),
                            intent.subject
                        ));
                    }
                    None => {
                        app.error_message = Some("No point loaded".into());
                    }
                },

                Action::ComposeWhatsapp => match app.composer.compose_messaging_intent() {
                    Some(intent) => {
                        app.error_message = None;
                        app.info_message = Some(format!("Open {}", intent.uri));
                    }
                    None => {
                        app.error_message = Some("No point loaded".into());
                    }
                },
            }
        }
    }

    Ok(())
}

/// Reload the point list for the current region/locality selection.
async fn refresh_points(app: &mut App) {
    let mut query = PointQuery::default();
    if let Some((region, locality)) = app.cascade.selection() {
        query.region = Some(region);
        query.locality = Some(locality);
    }

    match app.service.search_points(&query).await {
        Ok(points) => {
            app.points = points;
            app.point_list_index = 0;
        }
        Err(err) => {
            app.points.clear();
            app.point_list_index = 0;
            app.error_message = Some(format!("Failed to load points: {err}"));
        }
    }
}
