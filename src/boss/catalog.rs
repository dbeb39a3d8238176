//! Attack catalog with per-attack cooldown bookkeeping.

use bevy::prelude::*;

use super::attack::AttackDefinition;

/// A definition plus the time it was last used.
#[derive(Clone, Debug)]
struct AttackSlot {
    definition: AttackDefinition,
    last_used_at: f32,
    valid: bool,
}

impl AttackSlot {
    fn is_eligible(&self, distance: f32, now: f32) -> bool {
        self.valid
            && self.definition.enabled
            && now - self.last_used_at >= self.definition.cooldown
            && distance <= self.definition.range
    }
}

/// All attacks a boss knows, in configuration order.
#[derive(Clone, Debug, Default)]
pub struct AttackCatalog {
    slots: Vec<AttackSlot>,
}

impl AttackCatalog {
    pub fn new(definitions: Vec<AttackDefinition>) -> Self {
        let slots = definitions
            .into_iter()
            .map(|definition| {
                let errors = definition.validation_errors();
                for error in &errors {
                    warn!("Attack '{}' will never be used: {}", definition.name, error);
                }
                AttackSlot {
                    last_used_at: -definition.cooldown,
                    valid: errors.is_empty(),
                    definition,
                }
            })
            .collect();

        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttackDefinition> {
        self.slots.get(index).map(|slot| &slot.definition)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.definition.name == name)
    }

    pub fn last_used_at(&self, index: usize) -> Option<f32> {
        self.slots.get(index).map(|slot| slot.last_used_at)
    }

    /// Indices of every attack usable at `distance` at time `now`.
    pub fn eligible(&self, distance: f32, now: f32) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_eligible(distance, now))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn mark_used(&mut self, index: usize, now: f32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.last_used_at = now;
        }
    }

    /// Make every attack immediately available again.
    pub fn reset_cooldowns(&mut self) {
        for slot in &mut self.slots {
            slot.last_used_at = -slot.definition.cooldown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AttackCatalog {
        AttackCatalog::new(vec![
            AttackDefinition::melee("Slam", 1, 2.0, 3.0, 2.0),
            AttackDefinition::melee("Lunge", 2, 4.0, 6.0, 2.5),
        ])
    }

    #[test]
    fn everything_in_range_is_eligible_at_start() {
        let catalog = catalog();
        assert_eq!(catalog.eligible(2.0, 0.0), vec![0, 1]);
        assert_eq!(catalog.eligible(5.0, 0.0), vec![1]);
        assert!(catalog.eligible(7.0, 0.0).is_empty());
    }

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let mut catalog = catalog();
        catalog.mark_used(0, 10.0);

        assert_eq!(catalog.eligible(1.0, 11.9), vec![1]);
        assert_eq!(catalog.eligible(1.0, 12.0), vec![0, 1]);
    }

    #[test]
    fn disabled_and_invalid_attacks_are_never_eligible() {
        let mut disabled = AttackDefinition::melee("Off", 1, 1.0, 10.0, 2.0);
        disabled.enabled = false;
        let broken = AttackDefinition::melee("Broken", 1, 1.0, -3.0, 2.0);

        let catalog = AttackCatalog::new(vec![disabled, broken]);
        assert!(catalog.eligible(0.0, 100.0).is_empty());
    }

    #[test]
    fn reset_restores_availability() {
        let mut catalog = catalog();
        catalog.mark_used(0, 50.0);
        catalog.mark_used(1, 50.0);
        assert!(catalog.eligible(1.0, 50.5).is_empty());

        catalog.reset_cooldowns();
        assert_eq!(catalog.last_used_at(0), Some(-2.0));
        assert_eq!(catalog.eligible(1.0, 0.0), vec![0, 1]);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = catalog();
        assert_eq!(catalog.index_of("Lunge"), Some(1));
        assert_eq!(catalog.index_of("Missing"), None);
    }
}
