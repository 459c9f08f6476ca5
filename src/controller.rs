use std::time::Duration;
use tracing::trace;

use crate::domain::{AppConfig, ExplorerError, Message};
use crate::model::Model;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, ExplorerError> {
        if !event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(None);
        }
        let message = match event::read()? {
            // crossterm also emits key release and repeat events on Windows.
            Event::Key(key) if key.kind == event::KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, model),
            Event::Resize(width, height) => Some(Message::Resize(width as usize, height as usize)),
            _ => None,
        };
        Ok(message)
    }

    fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('q'), _) => Some(Message::Quit),
            (KeyCode::Up | KeyCode::Char('k'), _) => Some(Message::MoveUp),
            (KeyCode::Down | KeyCode::Char('j'), _) => Some(Message::MoveDown),
            (KeyCode::Left | KeyCode::Char('h'), _) => Some(Message::MoveLeft),
            (KeyCode::Right | KeyCode::Char('l'), _) => Some(Message::MoveRight),
            (KeyCode::PageUp, _) => Some(Message::MovePageUp),
            (KeyCode::PageDown, _) => Some(Message::MovePageDown),
            (KeyCode::Home | KeyCode::Char('g'), _) => Some(Message::MoveBeginning),
            (KeyCode::End | KeyCode::Char('G'), _) => Some(Message::MoveEnd),
            (KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char(' '), _) => {
                Some(Message::Activate)
            }
            (KeyCode::Char(c @ '1'..='9'), _) => {
                Some(Message::ActivateColumn(c as usize - '1' as usize))
            }
            (KeyCode::Char('?'), _) => Some(Message::Help),
            (KeyCode::Esc, _) => Some(Message::Exit),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }

    fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let message = model.hit_test(mouse.column as usize, mouse.row as usize);
                trace!("Click at {}:{} => {message:?}", mouse.column, mouse.row);
                message
            }
            MouseEventKind::ScrollDown => Some(Message::MoveDown),
            MouseEventKind::ScrollUp => Some(Message::MoveUp),
            _ => None,
        }
    }
}
