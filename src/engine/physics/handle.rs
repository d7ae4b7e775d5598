// Generation-counted body storage and handles

use super::body::RigidBody;

/// Handle to a body stored in a [`BodySet`]
///
/// A handle stays valid until its body is removed. After removal the slot's
/// generation changes, so the old handle no longer resolves, even once the
/// slot is reused by a new body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the owning set
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Unordered pair of bodies
///
/// `BodyPair::new(a, b) == BodyPair::new(b, a)`, so the pair hashes the same
/// whichever order it was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyPair {
    first: BodyHandle,
    second: BodyHandle,
}

impl BodyPair {
    /// Pair two handles, smaller one first
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The smaller handle of the pair
    pub fn first(&self) -> BodyHandle {
        self.first
    }

    /// The larger handle of the pair
    pub fn second(&self) -> BodyHandle {
        self.second
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Contiguous arena of bodies with a free list
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body, reusing a freed slot when one is available
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyHandle::new(index, 0)
    }

    /// Remove a body; stale or unknown handles are ignored
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(body)
    }

    /// Look up a live body
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    /// Look up a live body mutably
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    /// Mutable access to two distinct bodies at once
    ///
    /// Returns `None` if either handle is stale or both name the same body.
    pub fn get2_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a.index == b.index {
            return None;
        }
        self.get(a)?;
        self.get(b)?;

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (low, high) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.slots.split_at_mut(high);
        let low_body = head[low].body.as_mut()?;
        let high_body = tail[0].body.as_mut()?;

        if ia < ib {
            Some((low_body, high_body))
        } else {
            Some((high_body, low_body))
        }
    }

    /// Whether the handle still names a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no bodies
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body
                .as_ref()
                .map(|body| (BodyHandle::new(index as u32, slot.generation), body))
        })
    }

    /// Iterate live bodies mutably in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                let generation = slot.generation;
                slot.body
                    .as_mut()
                    .map(|body| (BodyHandle::new(index as u32, generation), body))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::BodyType;
    use glam::Vec2;

    fn ball(x: f32) -> RigidBody {
        RigidBody::circle(BodyType::Dynamic, Vec2::new(x, 0.0), 1.0, 1.0)
    }

    #[test]
    fn test_insert_and_get() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(a).map(|body| body.position.x), Some(1.0));
        assert_eq!(set.get(b).map(|body| body.position.x), Some(2.0));
    }

    #[test]
    fn test_remove_keeps_other_handles_valid() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));
        let c = set.insert(ball(3.0));

        assert!(set.remove(a).is_some());

        assert!(!set.contains(a));
        assert_eq!(set.get(b).map(|body| body.position.x), Some(2.0));
        assert_eq!(set.get(c).map(|body| body.position.x), Some(3.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut set = BodySet::new();
        let old = set.insert(ball(1.0));
        set.remove(old);

        let new = set.insert(ball(5.0));

        assert_eq!(old.index(), new.index(), "Freed slot should be reused");
        assert_ne!(old, new);
        assert!(set.get(old).is_none(), "Stale handle aliased a new body");
        assert!(set.remove(old).is_none());
        assert_eq!(set.get(new).map(|body| body.position.x), Some(5.0));
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));

        assert!(set.remove(a).is_some());
        assert!(set.remove(a).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_out_of_range_handle() {
        let set = BodySet::new();
        assert!(set.get(BodyHandle::new(42, 0)).is_none());
    }

    #[test]
    fn test_get2_mut() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));

        let (body_b, body_a) = set.get2_mut(b, a).expect("distinct live handles");
        assert_eq!(body_a.position.x, 1.0);
        assert_eq!(body_b.position.x, 2.0);

        assert!(set.get2_mut(a, a).is_none());
    }

    #[test]
    fn test_iter_skips_free_slots() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));
        set.remove(a);

        let handles: Vec<_> = set.iter().map(|(handle, _)| handle).collect();
        assert_eq!(handles, vec![b]);
    }

    #[test]
    fn test_body_pair_is_order_independent() {
        let a = BodyHandle::new(3, 0);
        let b = BodyHandle::new(1, 2);

        assert_eq!(BodyPair::new(a, b), BodyPair::new(b, a));
        assert_eq!(BodyPair::new(a, b).first(), b);
        assert_eq!(BodyPair::new(a, b).second(), a);
    }
}
