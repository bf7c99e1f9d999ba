mod reducer;
mod runtime;
mod shortcuts;

use super::super::messages::Message;
use super::super::state::{ANIMATION_FRAME_MS, App, BOOKMARK_SAVE_INTERVAL_MS};
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.scroll.animation.is_some() {
            subscriptions
                .push(time::every(Duration::from_millis(ANIMATION_FRAME_MS)).map(Message::Tick));
        } else if app.bookmark_dirty() {
            subscriptions.push(
                time::every(Duration::from_millis(BOOKMARK_SAVE_INTERVAL_MS)).map(Message::Tick),
            );
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
