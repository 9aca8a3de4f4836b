use log::debug;
use serde::{Deserialize, Serialize};

use super::view::CameraPose;
use crate::error::{NavError, Result};

/// Number of camera-state slots, one per digit key
pub const SLOT_COUNT: usize = 10;

/// Seconds within which a second press of the same digit jumps to the slot
pub const DOUBLE_PRESS_WINDOW: f64 = 1.0;

/// Candidate pose waiting to be committed into a slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImminentSlot {
    pub slot: u8,
    pub since: f64,
    pub pose: CameraPose,
}

/// Result of a digit press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreOutcome {
    /// The current view became the pending candidate for `slot`
    Pending { slot: u8 },
    /// The camera should take on `pose`, stored in `slot`
    Applied { slot: u8, pose: CameraPose },
}

/// Ten persisted camera poses plus at most one uncommitted candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraStateStore {
    slots: [Option<CameraPose>; SLOT_COUNT],
    imminent: Option<ImminentSlot>,
}

fn check_slot(slot: u8) -> Result<usize> {
    let index = slot as usize;
    if index < SLOT_COUNT {
        Ok(index)
    } else {
        Err(NavError::InvalidSlot(slot))
    }
}

impl CameraStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: u8) -> Option<&CameraPose> {
        self.slots.get(slot as usize).and_then(Option::as_ref)
    }

    pub fn is_used(&self, slot: u8) -> bool {
        self.get(slot).is_some()
    }

    pub fn imminent(&self) -> Option<&ImminentSlot> {
        self.imminent.as_ref()
    }

    /// Make `pose` the pending candidate for `slot`, committing any other pending slot first
    pub fn begin_candidate(&mut self, slot: u8, pose: CameraPose, now: f64) -> Result<()> {
        check_slot(slot)?;
        if self.imminent.is_some_and(|pending| pending.slot != slot) {
            self.commit_pending();
        }
        self.imminent = Some(ImminentSlot {
            slot,
            since: now,
            pose,
        });
        Ok(())
    }

    /// Handle a digit press: a quick repeat jumps to the slot, anything else starts a new
    /// candidate from `current`.
    pub fn confirm_or_swap(
        &mut self,
        slot: u8,
        current: CameraPose,
        now: f64,
    ) -> Result<StoreOutcome> {
        let index = check_slot(slot)?;
        match self.imminent {
            Some(pending) if pending.slot == slot && now - pending.since <= DOUBLE_PRESS_WINDOW => {
                let pose = *self.slots[index].get_or_insert(pending.pose);
                self.imminent = None;
                debug!("camera state {slot} recalled by double press");
                Ok(StoreOutcome::Applied { slot, pose })
            }
            _ => {
                self.begin_candidate(slot, current, now)?;
                Ok(StoreOutcome::Pending { slot })
            }
        }
    }

    /// Stored pose of `slot`, if any
    pub fn recall(&self, slot: u8) -> Result<Option<CameraPose>> {
        let index = check_slot(slot)?;
        Ok(self.slots[index])
    }

    /// Commit the pending candidate once its double-press window has passed
    pub fn flush(&mut self, now: f64) {
        if self
            .imminent
            .is_some_and(|pending| now - pending.since > DOUBLE_PRESS_WINDOW)
        {
            self.commit_pending();
        }
    }

    /// Write the pending candidate into its slot unconditionally
    pub fn commit_pending(&mut self) -> Option<u8> {
        let pending = self.imminent.take()?;
        let slot = self.slots.get_mut(pending.slot as usize)?;
        *slot = Some(pending.pose);
        debug!("camera state {} saved", pending.slot);
        Some(pending.slot)
    }

    pub fn clear(&mut self, slot: u8) -> Result<()> {
        let index = check_slot(slot)?;
        self.slots[index] = None;
        if self.imminent.is_some_and(|pending| pending.slot == slot) {
            self.imminent = None;
        }
        Ok(())
    }
}
