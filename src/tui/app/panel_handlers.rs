//! Panel operations and effect commands for the rating TUI.
//!
//! Handlers translate UI messages into [`PanelEvent`]s, feed them to the
//! panel, and wrap every returned [`PanelEffect`] in a bubbletea command that
//! reports its outcome as another [`AppMsg::Panel`].

use std::any::Any;

use bubbletea_rs::Cmd;

use super::RatingApp;
use crate::panel::{self, PanelEffect, PanelEvent, StoreConnection};
use crate::tui::components::{SliderAction, slider, text_field};
use crate::tui::input::Focus;
use crate::tui::messages::AppMsg;

impl RatingApp {
    /// Applies `event` to the panel and returns the commands for its effects.
    pub(super) fn dispatch(&mut self, event: PanelEvent) -> Option<Cmd> {
        if let PanelEvent::DeleteAllSettled(outcome) = &event {
            crate::tui::record_clear_telemetry(outcome.deleted.len(), outcome.failed());
        }

        let connection = self.panel.connection().clone();
        let mut commands: Vec<Cmd> = self
            .panel
            .update(event)
            .into_iter()
            .map(|effect| effect_cmd(effect, connection.clone()))
            .collect();

        match commands.len() {
            0 => None,
            1 => commands.pop(),
            _ => Some(bubbletea_rs::batch(commands)),
        }
    }

    pub(super) fn handle_insert_char(&mut self, ch: char) -> Option<Cmd> {
        if self.focus != Focus::Name {
            return None;
        }
        let name = text_field::insert_char(&self.panel.draft().id, ch)?;
        self.dispatch(PanelEvent::NameEdited(name))
    }

    pub(super) fn handle_delete_char(&mut self) -> Option<Cmd> {
        if self.focus != Focus::Name {
            return None;
        }
        let name = text_field::delete_char(&self.panel.draft().id)?;
        self.dispatch(PanelEvent::NameEdited(name))
    }

    pub(super) fn handle_slider(&mut self, action: SliderAction) -> Option<Cmd> {
        let Focus::Slider(axis) = self.focus else {
            return None;
        };
        let change = slider::interact(&self.slider_props(axis), action)?;
        self.dispatch(PanelEvent::AxisEdited {
            axis: change.name,
            value: change.value,
        })
    }

    pub(super) fn handle_load(&mut self) -> Option<Cmd> {
        let id = self.panel.draft().id.clone();
        self.dispatch(PanelEvent::LoadRequested { id })
    }

    pub(super) fn handle_new(&mut self) -> Option<Cmd> {
        self.dispatch(PanelEvent::NewRequested)
    }

    pub(super) fn handle_save(&mut self) -> Option<Cmd> {
        self.dispatch(PanelEvent::SaveRequested)
    }

    pub(super) fn handle_delete_all(&mut self) -> Option<Cmd> {
        self.dispatch(PanelEvent::DeleteAllRequested)
    }

    /// Creates the startup command that runs the host handshake.
    pub(super) fn connect_cmd() -> Cmd {
        Box::pin(async {
            let event = crate::tui::connect_store().await;
            Some(Box::new(AppMsg::Panel(event)) as Box<dyn Any + Send>)
        })
    }
}

/// Wraps `effect` in a command that reports its outcome to the app.
fn effect_cmd(effect: PanelEffect, connection: StoreConnection) -> Cmd {
    Box::pin(async move {
        panel::perform(effect, &connection)
            .await
            .map(|event| Box::new(AppMsg::Panel(event)) as Box<dyn Any + Send>)
    })
}
