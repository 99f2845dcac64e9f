//! Per-cell LIFO storage of entities.

use miam_core::{EmptyStackError, Entity};

/// Last-in first-out collection of the entities occupying one board cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStack {
    entities: Vec<Entity>,
}

impl CellStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Places the entity on top of the stack.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Removes and returns the top entity.
    pub fn pop(&mut self) -> Result<Entity, EmptyStackError> {
        self.entities.pop().ok_or(EmptyStackError)
    }

    /// Returns the top entity without removing it.
    pub fn head(&self) -> Result<&Entity, EmptyStackError> {
        self.entities.last().ok_or(EmptyStackError)
    }

    /// Reports whether the stack holds no entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of stacked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Iterates the entities from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }
}

impl<'a> IntoIterator for &'a CellStack {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miam_core::{AttributeValue, EntityColor};

    fn token(index: i64) -> Entity {
        Entity::new(EntityColor::from_rgb(0, 0, 0)).with_attribute("index", AttributeValue::Int(index))
    }

    #[test]
    fn pop_returns_entities_in_reverse_push_order() {
        let mut stack = CellStack::new();
        for index in 1..=5 {
            stack.push(token(index));
        }

        for expected in (1..=5).rev() {
            let entity = stack.pop().expect("stack holds entities");
            assert_eq!(entity.attribute("index"), Some(&AttributeValue::Int(expected)));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_rejects_pop_and_head() {
        let mut stack = CellStack::new();
        assert_eq!(stack.head(), Err(EmptyStackError));
        assert_eq!(stack.pop(), Err(EmptyStackError));
    }

    #[test]
    fn head_peeks_without_removing() {
        let mut stack = CellStack::new();
        stack.push(token(1));
        stack.push(token(2));

        let head = stack.head().expect("head present");
        assert_eq!(head.attribute("index"), Some(&AttributeValue::Int(2)));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn enumeration_runs_bottom_to_top_and_restarts() {
        let mut stack = CellStack::new();
        stack.push(token(1));
        stack.push(token(2));
        stack.push(token(3));

        let indices = |stack: &CellStack| -> Vec<Option<AttributeValue>> {
            stack.iter().map(|entity| entity.attribute("index").cloned()).collect()
        };
        let expected: Vec<_> = (1..=3).map(|index| Some(AttributeValue::Int(index))).collect();
        assert_eq!(indices(&stack), expected);
        assert_eq!(indices(&stack), expected);
    }
}
