use crate::keymap::KeyMap;
use crate::theme::HELP_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Width of the column listing keys
const KEYS_WIDTH: usize = 15;

static FOOTER: &[&str] = &["", "Press the Any Key to dismiss."];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a>(pub(crate) &'a KeyMap);

impl Help<'_> {
    fn text(self) -> Text<'static> {
        let mut lines = self
            .0
            .bindings()
            .iter()
            .map(|b| {
                Line::raw(format!(
                    "{:<KEYS_WIDTH$} {}",
                    b.keys_label(),
                    b.description()
                ))
            })
            .collect::<Vec<_>>();
        // Not rebindable, so it isn't in the key map
        lines.push(Line::raw(format!("{:<KEYS_WIDTH$} {}", "CTRL-C", "Quit")));
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        Text::from(lines)
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center),
            )
            .style(HELP_STYLE);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(HELP_STYLE).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_bindings() {
        let keymap = KeyMap::default();
        let text = Help(&keymap).text();
        let lines = text
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(lines[0], "h, LEFT         Previous day");
        assert!(lines.contains(&String::from("?               Show this help")));
        assert!(lines.contains(&String::from("CTRL-C          Quit")));
        assert_eq!(lines.last().map(String::as_str), Some("Press the Any Key to dismiss."));
    }

    #[test]
    fn test_render_in_small_area() {
        let keymap = KeyMap::default();
        let area = Rect::new(0, 0, 20, 10);
        let mut buffer = Buffer::empty(area);
        Help(&keymap).render(area, &mut buffer);
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
    }
}
