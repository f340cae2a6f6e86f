use ecoponto_core::{model::Coordinate, DetailState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, RegisterFocus, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("ecoponto – waste collection points")
        .block(Block::default().borders(Borders::ALL).title("Ecoponto"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::RegionSelect => draw_region_select(frame, app, *content_area),
        Screen::LocalitySelect => draw_locality_select(frame, app, *content_area),
        Screen::PointList => draw_point_list(frame, app, *content_area),
        Screen::Register => draw_register(frame, app, *content_area),
        Screen::Detail => draw_detail(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::RegionSelect => "↑/↓ move · Enter select state · q/Ctrl-C quit",
        Screen::LocalitySelect => "↑/↓ move · Enter select city · Left/Esc back · q/Ctrl-C quit",
        Screen::PointList => {
            "↑/↓ move · Enter open point · n register new point · Left/Esc back · q/Ctrl-C quit"
        }
        Screen::Register => "Tab next field · Ctrl-S submit · Esc back · Ctrl-C quit",
        Screen::Detail => "e e-mail · w whatsapp · Esc/←/b back · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.info_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else if app.info_message.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_region_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = if app.regions.is_empty() {
        vec![ListItem::new("No states available.")]
    } else {
        app.regions
            .iter()
            .map(|region| ListItem::new(region.0.clone()))
            .collect::<Vec<ListItem<'_>>>()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select state (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.regions.is_empty() {
        state.select(Some(app.region_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_locality_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let region_label = app
        .cascade
        .region()
        .map_or("<no state>", |region| region.0.as_str());

    let localities = app.cascade.available_localities();
    let items = if localities.is_empty() {
        let placeholder = if app.is_loading {
            "Loading cities…"
        } else {
            "No cities available for this state."
        };
        vec![ListItem::new(placeholder)]
    } else {
        localities
            .iter()
            .map(|locality| ListItem::new(locality.name.clone()))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Select city in {region_label} (↑/↓, Enter)")),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !localities.is_empty() {
        state.select(Some(app.locality_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_point_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let place = app
        .cascade
        .selection()
        .map_or_else(|| "<no city>".to_owned(), |(region, locality)| {
            format!("{locality} - {region}")
        });

    let items = if app.points.is_empty() {
        vec![ListItem::new(
            "No collection points here yet. Press n to register the first one.",
        )]
    } else {
        app.points
            .iter()
            .map(|point| ListItem::new(point.name.clone()))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Points in {place} (↑/↓, Enter)")),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.points.is_empty() {
        state.select(Some(app.point_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_register(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // name
            Constraint::Length(3), // e-mail
            Constraint::Length(3), // whatsapp
            Constraint::Min(0),    // categories + map
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [name_area, email_area, whatsapp_area, lower_area] = chunks else {
        return;
    };

    draw_text_field(
        frame,
        *name_area,
        "Entity name",
        &app.fields.name,
        app.focus == RegisterFocus::Name,
    );
    draw_text_field(
        frame,
        *email_area,
        "E-mail",
        &app.fields.email,
        app.focus == RegisterFocus::Email,
    );
    draw_text_field(
        frame,
        *whatsapp_area,
        "WhatsApp",
        &app.fields.whatsapp,
        app.focus == RegisterFocus::Whatsapp,
    );

    let lower_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(*lower_area);

    let lower = lower_chunks.as_ref();
    let [categories_area, map_area] = lower else {
        return;
    };

    draw_categories(frame, app, *categories_area);
    draw_map(frame, app, *map_area);
}

fn draw_text_field(frame: &mut Frame<'_>, area: Rect, title: &str, value: &str, focused: bool) {
    let field = Paragraph::new(value)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(focus_style(focused)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(field, area);
}

fn draw_categories(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let catalog = app.categories.categories();
    let items = if catalog.is_empty() {
        vec![ListItem::new("No collection items available.")]
    } else {
        catalog
            .iter()
            .map(|category| {
                let marker = if app.categories.contains(category.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(format!("{marker} {}", category.name))
            })
            .collect()
    };

    let focused = app.focus == RegisterFocus::Categories;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Collection items (Space toggles)")
                .border_style(focus_style(focused)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if focused && !catalog.is_empty() {
        state.select(Some(app.category_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_map(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selected_line = app.position.selected().map_or_else(
        || "Selected: none (the map origin will be submitted)".to_owned(),
        |coordinate| format!("Selected: {}", format_coordinate(coordinate)),
    );

    let text = format!(
        "Cursor:   {}\n{selected_line}\nCentered: {}",
        format_coordinate(app.map_cursor),
        format_coordinate(app.position.view_center()),
    );

    let focused = app.focus == RegisterFocus::Map;
    let map = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Map (arrows move, Enter marks the point)")
                .border_style(focus_style(focused)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(map, area);
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Collection point");

    match app.composer.state() {
        DetailState::Idle | DetailState::Loading => {
            let paragraph = Paragraph::new("Loading point…")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        DetailState::Empty => {
            let paragraph = Paragraph::new("Point not found.")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        DetailState::Loaded(detail) => {
            let items = detail
                .items
                .iter()
                .map(|item| item.title.as_str())
                .collect::<Vec<&str>>()
                .join(", ");

            let lines = vec![
                Line::from(Span::styled(
                    detail.point.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(items, Style::default().fg(Color::Green))),
                Line::from(""),
                Line::from(format!(
                    "Address: {} - {}",
                    detail.point.locality, detail.point.region
                )),
                Line::from(format!("E-mail: {}", detail.point.email)),
                Line::from(format!("WhatsApp: {}", detail.point.whatsapp)),
                Line::from(""),
                Line::from("Press e to compose an e-mail, w to open WhatsApp."),
            ];

            let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn format_coordinate(coordinate: Coordinate) -> String {
    format!("{:.4}, {:.4}", coordinate.latitude, coordinate.longitude)
}
