use crate::calendar::{Clock, Command, MonthView, Navigator, Outcome};
use crate::colors::DateColors;
use crate::help::Help;
use crate::keymap::{Action, KeyMap};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C> {
    navigator: Navigator<C>,
    keymap: KeyMap,
    colors: DateColors,
    state: AppState,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(navigator: Navigator<C>, keymap: KeyMap, colors: DateColors) -> App<C> {
        App {
            navigator,
            keymap,
            colors,
            state: AppState::Picking,
        }
    }

    /// Run the picker until the user selects a date or quits
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<Outcome> {
        log::info!(
            "Picking a date starting from {} ({:?})",
            self.navigator.focused(),
            self.navigator.convention()
        );
        while self.navigator.is_active() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        let outcome = self.navigator.outcome();
        log::info!("Session ended: {outcome:?}");
        Ok(outcome)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.navigate(Command::Cancel);
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Picking => match self.keymap.lookup(key) {
                Some(Action::ToggleHelp) => {
                    self.state = AppState::Helping;
                    true
                }
                Some(Action::Navigate(command)) => self.navigate(command),
                None => {
                    log::debug!("Unbound key {key:?}");
                    false
                }
            },
        }
    }

    fn navigate(&mut self, command: Command) -> bool {
        match self.navigator.apply(command) {
            Ok(()) => {
                log::debug!("{command:?}: focus is now {}", self.navigator.focused());
                true
            }
            Err(e) => {
                log::debug!("{command:?} from {}: {e}", self.navigator.focused());
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        // The calendar is drawn on stderr, so the bell goes there too
        let mut stderr = io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()
    }
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        MonthView::new(&self.navigator, &self.colors).render(area, buf);
        if self.state == AppState::Helping {
            Help(&self.keymap).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekdayConvention;
    use time::{macros::date, Date};

    fn app(start: Date) -> App<impl Clock> {
        let navigator = Navigator::new(WeekdayConvention::MondayFirst, || date!(2024 - 02 - 20))
            .start_date(start);
        App::new(navigator, KeyMap::default(), DateColors::default())
    }

    fn render(app: &App<impl Clock>) -> Buffer {
        let area = Rect::new(0, 0, 40, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app(date!(2024 - 02 - 15));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 16));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 23));
        assert!(app.handle_key(KeyCode::Char('0')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 19));
        assert!(app.handle_key(KeyCode::Char('$')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 25));
        assert!(app.handle_key(KeyCode::Char('G')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 29));
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!(app.navigator.focused(), date!(2024 - 03 - 29));
        assert!(app.handle_key(KeyCode::Char('[')));
        assert_eq!(app.navigator.focused(), date!(2023 - 03 - 29));
        assert!(app.handle_key(KeyCode::Char('t')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 20));
    }

    #[test]
    fn test_unbound_key() {
        let mut app = app(date!(2024 - 02 - 15));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.navigator.focused(), date!(2024 - 02 - 15));
        assert!(app.navigator.is_active());
    }

    #[test]
    fn test_end_of_time_is_invalid() {
        let mut app = app(Date::MAX);
        assert!(!app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.navigator.focused(), Date::MAX);
    }

    #[test]
    fn test_select() {
        let mut app = app(date!(2024 - 02 - 15));
        assert!(app.handle_key(KeyCode::Char('h')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(
            app.navigator.outcome(),
            Outcome::Selected(date!(2024 - 02 - 14))
        );
    }

    #[test]
    fn test_quit() {
        let mut app = app(date!(2024 - 02 - 15));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.navigator.outcome(), Outcome::Cancelled);
    }

    #[test]
    fn test_help() {
        let mut app = app(date!(2024 - 02 - 15));
        assert!(!screen_text(&render(&app)).contains("Keys"));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let text = screen_text(&render(&app));
        assert!(text.contains(" Keys "));
        assert!(text.contains("Previous day"));
        // Any key dismisses the help without acting on it
        assert!(app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Picking);
        assert!(app.navigator.is_active());
        assert!(!screen_text(&render(&app)).contains("Keys"));
    }

    #[test]
    fn test_render_follows_focus() {
        let mut app = app(date!(2024 - 01 - 31));
        assert!(screen_text(&render(&app)).contains("January 2024"));
        assert!(app.handle_key(KeyCode::Char('l')));
        let text = screen_text(&render(&app));
        assert!(text.contains("February 2024"));
        assert!(text.contains("Mo Tu We Th Fr Sa Su"));
        assert!(text.contains("26 27 28 29"));
    }
}
