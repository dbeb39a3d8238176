//! Area-attack warnings ("telegraphs").
//!
//! A telegraph is a ground marker showing where an area attack is about to
//! land. Each boss owns one [`TelegraphSlot`], so showing a new marker always
//! removes the previous one.

use bevy::prelude::*;

use super::host::{Presentation, PresentationSignal};

/// Identifies one shown telegraph within its boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TelegraphHandle(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Telegraph {
    pub handle: TelegraphHandle,
    pub position: Vec3,
    pub radius: f32,
    /// Seconds until the warned attack resolves.
    pub remaining_time: f32,
}

#[derive(Debug, Default, Clone)]
pub struct TelegraphSlot {
    active: Option<Telegraph>,
    next_handle: u32,
}

impl TelegraphSlot {
    pub fn active(&self) -> Option<&Telegraph> {
        self.active.as_ref()
    }

    pub fn show<P: Presentation + ?Sized>(
        &mut self,
        position: Vec3,
        radius: f32,
        color: Color,
        duration: f32,
        presentation: &mut P,
    ) -> TelegraphHandle {
        if let Some(previous) = self.active.take() {
            presentation.present(PresentationSignal::HideTelegraph(previous.handle));
        }

        let handle = TelegraphHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);

        self.active = Some(Telegraph {
            handle,
            position,
            radius,
            remaining_time: duration,
        });
        presentation.present(PresentationSignal::ShowTelegraph {
            handle,
            position,
            radius,
            color,
        });

        handle
    }

    /// Hide the telegraph if `handle` is still the shown one.
    pub fn hide<P: Presentation + ?Sized>(&mut self, handle: TelegraphHandle, presentation: &mut P) {
        if self.active.as_ref().is_some_and(|t| t.handle == handle) {
            self.active = None;
            presentation.present(PresentationSignal::HideTelegraph(handle));
        }
    }

    pub fn clear<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        if let Some(telegraph) = self.active.take() {
            presentation.present(PresentationSignal::HideTelegraph(telegraph.handle));
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(telegraph) = self.active.as_mut() {
            telegraph.remaining_time = (telegraph.remaining_time - dt).max(0.0);
        }
    }
}
