use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ecoponto_core::{model::PointId, selection::LocalityRequest};

use crate::app::{App, RegisterFocus, Screen, MAP_STEP};

#[derive(Debug, Clone)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.localities(...)` for the request's region
    LoadLocalities(LocalityRequest),
    /// Run `service.search_points(...)` for the current selection
    LoadPoints,
    /// Run `composer.load(...)` and switch to the detail screen
    OpenDetail(PointId),
    /// Run `pipeline.submit(...)` with the current form state
    Submit,
    ComposeEmail,
    ComposeWhatsapp,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcuts; plain `q` stays available for typing on the
    // registration form.
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q')
        && key.modifiers.is_empty()
        && !matches!(app.screen, Screen::Register)
    {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::RegionSelect => match key.code {
            Up | Char('k') => {
                if app.region_list_index > 0 {
                    app.region_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.region_list_index + 1 < app.regions.len() {
                    app.region_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if let Some(request) = app.select_current_region() {
                    action = Action::LoadLocalities(request);
                }
            }
            _ => {}
        },

        Screen::LocalitySelect => match key.code {
            Up | Char('k') => {
                if app.locality_list_index > 0 {
                    app.locality_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.locality_list_index + 1 < app.cascade.available_localities().len() {
                    app.locality_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if app.select_current_locality() {
                    action = Action::LoadPoints;
                }
            }
            Left | Esc => {
                app.cascade.set_region(None);
                app.screen = Screen::RegionSelect;
            }
            _ => {}
        },

        Screen::PointList => match key.code {
            Up | Char('k') => {
                if app.point_list_index > 0 {
                    app.point_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.point_list_index + 1 < app.points.len() {
                    app.point_list_index += 1;
                }
            }
            Enter | Right | Tab => {
                if let Some(point) = app.current_point() {
                    action = Action::OpenDetail(point.id);
                }
            }
            Char('n') => {
                app.screen = Screen::Register;
                app.focus = RegisterFocus::Name;
            }
            Left | Esc => {
                app.cascade.set_locality(None);
                app.points.clear();
                app.point_list_index = 0;
                app.screen = Screen::LocalitySelect;
            }
            _ => {}
        },

        Screen::Register => match key.code {
            Tab => {
                app.focus = app.focus.next();
            }
            Esc => {
                // Back to the list; the form state is kept for a retry.
                app.screen = Screen::PointList;
            }
            Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                action = Action::Submit;
            }
            _ => action = handle_register_key(key, app),
        },

        Screen::Detail => match key.code {
            Char('e') => {
                action = Action::ComposeEmail;
            }
            Char('w') => {
                action = Action::ComposeWhatsapp;
            }
            Left | Esc | Char('b') => {
                app.screen = Screen::PointList;
            }
            _ => {}
        },
    }
    action
}

fn handle_register_key(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Left, Right, Up};

    match app.focus {
        RegisterFocus::Name | RegisterFocus::Email | RegisterFocus::Whatsapp => {
            let field = match app.focus {
                RegisterFocus::Name => &mut app.fields.name,
                RegisterFocus::Email => &mut app.fields.email,
                _ => &mut app.fields.whatsapp,
            };
            match key.code {
                Char(character) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT)
                    {
                        field.push(character);
                    }
                }
                Backspace => {
                    field.pop();
                }
                _ => {}
            }
        }

        RegisterFocus::Categories => match key.code {
            Up | Char('k') => {
                if app.category_list_index > 0 {
                    app.category_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.category_list_index + 1 < app.categories.categories().len() {
                    app.category_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if let Some(category) = app.categories.categories().get(app.category_list_index) {
                    let id = category.id;
                    app.categories.toggle(id);
                }
            }
            _ => {}
        },

        RegisterFocus::Map => match key.code {
            Up => app.nudge_map(MAP_STEP, 0.0),
            Down => app.nudge_map(-MAP_STEP, 0.0),
            Left => app.nudge_map(0.0, -MAP_STEP),
            Right => app.nudge_map(0.0, MAP_STEP),
            Enter | Char(' ') => {
                app.position.select(app.map_cursor);
            }
            _ => {}
        },
    }

    Action::None
}
