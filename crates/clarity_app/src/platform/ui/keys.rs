use clarity_core::{Msg, PostAction, RequestAction};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) const KEY_PICK: char = 'o';
pub(crate) const ACTION_KEYS: [char; 4] = ['1', '2', '3', '4'];
pub(crate) const POST_ACTION_KEYS: [char; 3] = ['r', 's', 'w'];
const PAGE: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiCommand {
    Quit,
    Dispatch(Msg),
    ScrollUp(u16),
    ScrollDown(u16),
}

/// Maps a key press to a command. While a notice is open only dismissal and quit apply.
pub(crate) fn map_key(key: KeyEvent, notice_open: bool) -> Option<UiCommand> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiCommand::Quit);
    }

    if notice_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Some(UiCommand::Dispatch(Msg::NoticeDismissed))
            }
            KeyCode::Char('q') => Some(UiCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiCommand::Quit),
        KeyCode::Char(c) if c == KEY_PICK => Some(UiCommand::Dispatch(Msg::PickClicked)),
        KeyCode::Char(c) => {
            if let Some(i) = ACTION_KEYS.iter().position(|&k| k == c) {
                return Some(UiCommand::Dispatch(Msg::ActionClicked(RequestAction::ALL[i])));
            }
            POST_ACTION_KEYS
                .iter()
                .position(|&k| k == c)
                .map(|i| UiCommand::Dispatch(Msg::PostActionClicked(PostAction::ALL[i])))
        }
        KeyCode::Up => Some(UiCommand::ScrollUp(1)),
        KeyCode::Down => Some(UiCommand::ScrollDown(1)),
        KeyCode::PageUp => Some(UiCommand::ScrollUp(PAGE)),
        KeyCode::PageDown => Some(UiCommand::ScrollDown(PAGE)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_trigger_actions_in_order() {
        let expected = [
            RequestAction::Summarize,
            RequestAction::Simplify,
            RequestAction::ExtractInstructions,
            RequestAction::Analyze,
        ];
        for (key, action) in ACTION_KEYS.iter().zip(expected) {
            assert_eq!(
                map_key(press(KeyCode::Char(*key)), false),
                Some(UiCommand::Dispatch(Msg::ActionClicked(action)))
            );
        }
    }

    #[test]
    fn pick_and_post_action_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('o')), false),
            Some(UiCommand::Dispatch(Msg::PickClicked))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('w')), false),
            Some(UiCommand::Dispatch(Msg::PostActionClicked(PostAction::Save)))
        );
        assert_eq!(map_key(press(KeyCode::Char('z')), false), None);
    }

    #[test]
    fn notice_is_modal() {
        assert_eq!(map_key(press(KeyCode::Char('1')), true), None);
        assert_eq!(map_key(press(KeyCode::Char('o')), true), None);
        assert_eq!(
            map_key(press(KeyCode::Enter), true),
            Some(UiCommand::Dispatch(Msg::NoticeDismissed))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, true), Some(UiCommand::Quit));
        assert_eq!(map_key(key, false), Some(UiCommand::Quit));
    }
}
