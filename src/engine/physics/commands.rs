// Deferred body mutations requested by collision observers

use super::handle::{BodyHandle, BodySet};

/// A change to the body set, applied once the current step has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCommand {
    /// Remove the body from the world
    Remove(BodyHandle),
    /// Enable or disable simulation of the body
    SetActive(BodyHandle, bool),
}

/// Queue handed to the collision callback
///
/// Observers cannot touch the body set while the step is running; they record
/// intents here instead, and the world applies them after resolution.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<BodyCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    /// Request removal of a body
    pub fn remove(&mut self, handle: BodyHandle) {
        self.commands.push(BodyCommand::Remove(handle));
    }

    /// Request that a body be (de)activated
    pub fn set_active(&mut self, handle: BodyHandle, active: bool) {
        self.commands.push(BodyCommand::SetActive(handle, active));
    }

    /// Queue an arbitrary command
    pub fn push(&mut self, command: BodyCommand) {
        self.commands.push(command);
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply queued commands in order and empty the queue
    ///
    /// Commands naming a body that no longer exists are skipped. Returns how
    /// many commands took effect.
    pub fn apply(&mut self, bodies: &mut BodySet) -> usize {
        let mut applied = 0;

        for command in self.commands.drain(..) {
            let done = match command {
                BodyCommand::Remove(handle) => bodies.remove(handle).is_some(),
                BodyCommand::SetActive(handle, active) => match bodies.get_mut(handle) {
                    Some(body) => {
                        body.active = active;
                        true
                    }
                    None => false,
                },
            };

            if done {
                applied += 1;
            } else {
                log::warn!("Skipping deferred {:?}: body no longer exists", command);
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::{BodyType, RigidBody};
    use glam::Vec2;

    fn set_with_two() -> (BodySet, BodyHandle, BodyHandle) {
        let mut set = BodySet::new();
        let a = set.insert(RigidBody::circle(BodyType::Dynamic, Vec2::ZERO, 1.0, 1.0));
        let b = set.insert(RigidBody::circle(BodyType::Dynamic, Vec2::X, 1.0, 1.0));
        (set, a, b)
    }

    #[test]
    fn test_apply_remove_and_deactivate() {
        let (mut set, a, b) = set_with_two();
        let mut queue = CommandQueue::new();
        queue.remove(a);
        queue.set_active(b, false);

        assert_eq!(queue.apply(&mut set), 2);
        assert!(queue.is_empty());
        assert!(!set.contains(a));
        assert_eq!(set.get(b).map(|body| body.active), Some(false));
    }

    #[test]
    fn test_duplicate_remove_applies_once() {
        let (mut set, a, _) = set_with_two();
        let mut queue = CommandQueue::new();
        queue.remove(a);
        queue.remove(a);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.apply(&mut set), 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_active_after_remove_is_skipped() {
        let (mut set, a, _) = set_with_two();
        let mut queue = CommandQueue::new();
        queue.push(BodyCommand::Remove(a));
        queue.push(BodyCommand::SetActive(a, true));

        assert_eq!(queue.apply(&mut set), 1);
    }
}
