use crate::calendar::Command;
use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    Navigate(Command),
    ToggleHelp,
}

/// A set of keys that all trigger the same action
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Binding {
    keys: Vec<KeyCode>,
    action: Action,
    description: &'static str,
}

impl Binding {
    pub(crate) fn new<I>(keys: I, action: Action, description: &'static str) -> Binding
    where
        I: IntoIterator<Item = KeyCode>,
    {
        Binding {
            keys: keys.into_iter().collect(),
            action,
            description,
        }
    }

    /// The keys as shown in the help screen, e.g. `h, LEFT`
    pub(crate) fn keys_label(&self) -> String {
        self.keys
            .iter()
            .map(|&k| key_name(k))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn description(&self) -> &'static str {
        self.description
    }
}

/// Maps key presses to actions.  Earlier bindings take precedence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct KeyMap(Vec<Binding>);

impl KeyMap {
    pub(crate) fn new(bindings: Vec<Binding>) -> KeyMap {
        KeyMap(bindings)
    }

    pub(crate) fn lookup(&self, key: KeyCode) -> Option<Action> {
        self.0
            .iter()
            .find(|b| b.keys.contains(&key))
            .map(|b| b.action)
    }

    pub(crate) fn bindings(&self) -> &[Binding] {
        &self.0
    }
}

impl Default for KeyMap {
    fn default() -> KeyMap {
        use Action::{Navigate, ToggleHelp};
        use KeyCode::*;
        KeyMap::new(vec![
            Binding::new([Char('h'), Left], Navigate(Command::DayBack), "Previous day"),
            Binding::new([Char('l'), Right], Navigate(Command::DayForward), "Next day"),
            Binding::new([Char('k'), Up], Navigate(Command::WeekBack), "Previous week"),
            Binding::new([Char('j'), Down], Navigate(Command::WeekForward), "Next week"),
            Binding::new([Char('0'), Home], Navigate(Command::JumpWeekStart), "Start of week"),
            Binding::new([Char('$'), End], Navigate(Command::JumpWeekEnd), "End of week"),
            Binding::new([Char('g')], Navigate(Command::JumpMonthStart), "Start of month"),
            Binding::new([Char('G')], Navigate(Command::JumpMonthEnd), "End of month"),
            Binding::new([Char('H'), PageUp], Navigate(Command::JumpMonthPrev), "Previous month"),
            Binding::new([Char('L'), PageDown], Navigate(Command::JumpMonthNext), "Next month"),
            Binding::new([Char('[')], Navigate(Command::JumpYearPrev), "Previous year"),
            Binding::new([Char(']')], Navigate(Command::JumpYearNext), "Next year"),
            Binding::new([Char('t')], Navigate(Command::JumpToday), "Jump to today"),
            Binding::new([Enter, Char(' ')], Navigate(Command::Confirm), "Select date"),
            Binding::new([Char('q'), Esc], Navigate(Command::Cancel), "Quit without selecting"),
            Binding::new([Char('?')], ToggleHelp, "Show this help"),
        ])
    }
}

fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => String::from("SPACE"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => String::from("LEFT"),
        KeyCode::Right => String::from("RIGHT"),
        KeyCode::Up => String::from("UP"),
        KeyCode::Down => String::from("DOWN"),
        KeyCode::Home => String::from("HOME"),
        KeyCode::End => String::from("END"),
        KeyCode::PageUp => String::from("PAGE UP"),
        KeyCode::PageDown => String::from("PAGE DOWN"),
        KeyCode::Enter => String::from("ENTER"),
        KeyCode::Esc => String::from("ESC"),
        other => format!("{other:?}").to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let keymap = KeyMap::default();
        assert_eq!(
            keymap.lookup(KeyCode::Char('h')),
            Some(Action::Navigate(Command::DayBack))
        );
        assert_eq!(
            keymap.lookup(KeyCode::Left),
            Some(Action::Navigate(Command::DayBack))
        );
        assert_eq!(
            keymap.lookup(KeyCode::Char('G')),
            Some(Action::Navigate(Command::JumpMonthEnd))
        );
        assert_eq!(
            keymap.lookup(KeyCode::Enter),
            Some(Action::Navigate(Command::Confirm))
        );
        assert_eq!(keymap.lookup(KeyCode::Char('?')), Some(Action::ToggleHelp));
        assert_eq!(keymap.lookup(KeyCode::Char('x')), None);
        assert_eq!(keymap.lookup(KeyCode::Tab), None);
    }

    #[test]
    fn test_every_command_is_bound() {
        let keymap = KeyMap::default();
        for command in [
            Command::DayBack,
            Command::DayForward,
            Command::WeekBack,
            Command::WeekForward,
            Command::JumpToday,
            Command::JumpWeekStart,
            Command::JumpWeekEnd,
            Command::JumpMonthStart,
            Command::JumpMonthEnd,
            Command::JumpMonthPrev,
            Command::JumpMonthNext,
            Command::JumpYearPrev,
            Command::JumpYearNext,
            Command::Confirm,
            Command::Cancel,
        ] {
            assert!(
                keymap
                    .bindings()
                    .iter()
                    .any(|b| b.action == Action::Navigate(command)),
                "{command:?} is not bound"
            );
        }
    }

    #[test]
    fn test_earlier_binding_wins() {
        let keymap = KeyMap::new(vec![
            Binding::new([KeyCode::Char('x')], Action::ToggleHelp, "first"),
            Binding::new([KeyCode::Char('x')], Action::Navigate(Command::Cancel), "second"),
        ]);
        assert_eq!(keymap.lookup(KeyCode::Char('x')), Some(Action::ToggleHelp));
    }

    #[test]
    fn test_keys_label() {
        let keymap = KeyMap::default();
        let labels = keymap
            .bindings()
            .iter()
            .map(Binding::keys_label)
            .collect::<Vec<_>>();
        assert_eq!(labels[0], "h, LEFT");
        assert!(labels.contains(&String::from("L, PAGE DOWN")));
        assert!(labels.contains(&String::from("ENTER, SPACE")));
    }
}
