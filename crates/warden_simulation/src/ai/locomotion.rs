//! Locomotion collaborator + adapter.
//!
//! Внешняя локомоция (NavigationAgent, kinematic mover) принимает destination и
//! speed, отдаёт remaining distance. Сравнение с arrival threshold делает core.

use bevy::prelude::*;

/// Контракт внешней системы передвижения.
///
/// `set_speed(0.0)` = "стоим", destination при этом может оставаться pending.
pub trait Locomotion {
    fn set_destination(&mut self, destination: Vec3);
    fn set_speed(&mut self, speed: f32);
    /// Без destination = `f32::INFINITY` (не "прибыли").
    fn remaining_distance(&self) -> f32;
    /// false, если collaborator потерял/сбросил destination (новый NavAgent и т.п.)
    fn has_destination(&self) -> bool;
}

/// Shim между FSM и локомоцией.
///
/// Помнит последнюю отправленную destination/speed и не дёргает collaborator
/// повторно с тем же значением (иначе Changed<> спамит и path пересчитывается).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocomotionAdapter {
    destination: Option<Vec3>,
    speed: Option<f32>,
}

impl LocomotionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Возвращает true если команда ушла в collaborator.
    pub fn set_destination(&mut self, nav: &mut dyn Locomotion, destination: Vec3) -> bool {
        // Collaborator сброшен за нашей спиной — кэш врёт, шлём всё заново (и speed тоже)
        if !nav.has_destination() {
            self.invalidate();
        }
        if self.destination == Some(destination) {
            return false;
        }
        self.destination = Some(destination);
        nav.set_destination(destination);
        true
    }

    pub fn move_at(&mut self, nav: &mut dyn Locomotion, speed: f32) -> bool {
        if self.speed == Some(speed) {
            return false;
        }
        self.speed = Some(speed);
        nav.set_speed(speed);
        true
    }

    pub fn stop(&mut self, nav: &mut dyn Locomotion) -> bool {
        self.move_at(nav, 0.0)
    }

    pub fn has_arrived(&self, nav: &dyn Locomotion, threshold: f32) -> bool {
        nav.remaining_distance() <= threshold
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn speed(&self) -> Option<f32> {
        self.speed
    }

    /// Забыть кэш — следующие команды уйдут в collaborator безусловно.
    pub fn invalidate(&mut self) {
        self.destination = None;
        self.speed = None;
    }
}
