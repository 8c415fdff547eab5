//! Bind-once state shared by variables and constraints.
//!
//! An entity starts `Unbound`. Materialization moves it to `Bound` exactly
//! once. Settable attribute writes are always recorded in the pending cache;
//! once bound they are pushed through to the engine as well.

use crate::attributes::AttrRow;
use deferlp_engine::{Attr, AttrValue};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState<H> {
    Unbound,
    Bound(H),
}

/// Attribute values written before (and after) materialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingAttrs {
    values: BTreeMap<Attr, AttrValue>,
}

impl PendingAttrs {
    pub fn get(&self, attr: Attr) -> Option<&AttrValue> {
        self.values.get(&attr)
    }

    pub fn record(&mut self, attr: Attr, value: AttrValue) {
        self.values.insert(attr, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attr, &AttrValue)> {
        self.values.iter().map(|(attr, value)| (*attr, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding<H> {
    state: BindState<H>,
    pending: PendingAttrs,
}

impl<H> Default for Binding<H> {
    fn default() -> Self {
        Self {
            state: BindState::Unbound,
            pending: PendingAttrs::default(),
        }
    }
}

impl<H: Copy> Binding<H> {
    pub fn state(&self) -> BindState<H> {
        self.state
    }

    pub fn handle(&self) -> Option<H> {
        match self.state {
            BindState::Bound(handle) => Some(handle),
            BindState::Unbound => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound(_))
    }

    /// Bind to `handle`. Fails with the existing handle if already bound.
    pub fn bind(&mut self, handle: H) -> Result<(), H> {
        match self.state {
            BindState::Bound(existing) => Err(existing),
            BindState::Unbound => {
                self.state = BindState::Bound(handle);
                Ok(())
            }
        }
    }

    pub fn pending(&self) -> &PendingAttrs {
        &self.pending
    }

    /// Bind-aware read.
    ///
    /// Unbound: the pending value for settable rows, `None` otherwise.
    /// Bound: always a live read through `live`.
    pub fn read<E>(
        &self,
        row: &AttrRow,
        live: impl FnOnce(H, Attr) -> Result<AttrValue, E>,
    ) -> Result<Option<AttrValue>, E> {
        match self.state {
            BindState::Unbound if row.settable() => Ok(self.pending.get(row.attr()).cloned()),
            BindState::Unbound => Ok(None),
            BindState::Bound(handle) => live(handle, row.attr()).map(Some),
        }
    }

    /// Record into the pending cache, then push through when bound.
    ///
    /// Callers check `row.settable()` first.
    pub fn write<E>(
        &mut self,
        row: &AttrRow,
        value: AttrValue,
        push: impl FnOnce(H, Attr, &AttrValue) -> Result<(), E>,
    ) -> Result<(), E> {
        let attr = row.attr();
        self.pending.record(attr, value.clone());
        match self.state {
            BindState::Bound(handle) => push(handle, attr, &value),
            BindState::Unbound => Ok(()),
        }
    }

    /// Push every pending value through `push`. No-op while unbound.
    pub fn flush<E>(
        &self,
        mut push: impl FnMut(H, Attr, &AttrValue) -> Result<(), E>,
    ) -> Result<usize, E> {
        let Some(handle) = self.handle() else {
            return Ok(0);
        };
        for (attr, value) in self.pending.iter() {
            push(handle, attr, value)?;
        }
        Ok(self.pending.len())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{BindState, Binding};
    use crate::attributes::tables;
    use deferlp_engine::{AttrValue, EngineError};

    fn unreachable_live<H>(_: H, _: deferlp_engine::Attr) -> Result<AttrValue, EngineError> {
        Err(EngineError::new(0, "live read while unbound"))
    }

    #[test]
    fn bind_is_one_shot() {
        let mut binding: Binding<usize> = Binding::default();
        assert_eq!(binding.bind(4), Ok(()));
        assert_eq!(binding.bind(9), Err(4));
        assert_eq!(binding.state(), BindState::Bound(4));
    }

    #[test]
    fn unbound_settable_read_returns_pending() {
        let vars = &tables().expect("tables").var;
        let start = vars.row("start").expect("row");
        let mut binding: Binding<usize> = Binding::default();

        assert_eq!(binding.read(start, unreachable_live), Ok(None));
        binding
            .write(start, AttrValue::Double(2.5), |_, _, _| {
                Err::<(), _>(EngineError::new(0, "push while unbound"))
            })
            .expect("record");
        assert_eq!(
            binding.read(start, unreachable_live),
            Ok(Some(AttrValue::Double(2.5)))
        );
    }

    #[test]
    fn unbound_read_only_attribute_is_absent() {
        let vars = &tables().expect("tables").var;
        let x = vars.row("x").expect("row");
        let binding: Binding<usize> = Binding::default();
        assert_eq!(binding.read(x, unreachable_live), Ok(None));
    }

    #[test]
    fn bound_write_records_and_pushes() {
        let vars = &tables().expect("tables").var;
        let start = vars.row("start").expect("row");
        let mut binding: Binding<usize> = Binding::default();
        binding.bind(0).expect("bind");

        let mut pushed = Vec::new();
        binding
            .write(start, AttrValue::Double(1.0), |h, attr, value| {
                pushed.push((h, attr.name(), value.clone()));
                Ok::<(), EngineError>(())
            })
            .expect("write");
        assert_eq!(pushed, vec![(0, "Start", AttrValue::Double(1.0))]);
        assert_eq!(binding.pending().len(), 1);

        let live = binding
            .read(start, |_, _| Ok::<_, EngineError>(AttrValue::Double(7.0)))
            .expect("read");
        assert_eq!(live, Some(AttrValue::Double(7.0)));
    }
}
