use super::super::super::messages::Message;
use super::super::super::state::{App, LIST_SCROLL_ID, RECENT_LISTS_SHOWN};
use super::super::Effect;
use crate::cache::{list_recent, load_bookmark, remember_recent, save_bookmark};
use crate::pronounce::speak_in_background;
use crate::vocab::LoadError;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::LoadList(path) => {
                self.library.loading = true;
                info!(path = %path.display(), "Dispatching list load task");
                Task::perform(async move { read_list(path) }, |message| message)
            }
            Effect::RememberRecent(path) => {
                remember_recent(&path);
                self.library.recent = list_recent(RECENT_LISTS_SHOWN);
                Task::none()
            }
            Effect::ScrollTo(offset) => {
                scrollable::scroll_to(LIST_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y: offset })
            }
            Effect::Pronounce { word, variant } => {
                let client = self.pronunciation.client.clone();
                debug!(%word, %variant, "Dispatching pronunciation task");
                Task::perform(
                    speak_in_background(client, word.clone(), variant),
                    move |result| Message::PronunciationFinished {
                        word: word.clone(),
                        variant,
                        error: result.err(),
                    },
                )
            }
            Effect::SaveBookmark => {
                self.persist_bookmark();
                Task::none()
            }
            Effect::StoreBookmark { path, bookmark } => {
                save_bookmark(&path, &bookmark);
                debug!(position = bookmark.position, path = %path.display(), "Saved bookmark for closed list");
                Task::none()
            }
            Effect::QuitSafely => {
                self.persist_bookmark();
                iced::exit()
            }
        }
    }
}

/// Read a list file and its bookmark off the update loop.
fn read_list(path: PathBuf) -> Message {
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let bookmark = load_bookmark(&path);
            Message::ListLoaded {
                path,
                raw,
                bookmark,
            }
        }
        Err(err) => Message::ListLoadFailed {
            path,
            error: LoadError::Io(err.to_string()),
        },
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(iced::window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
