// ============================================================
// Layer 5 — Scoped Model Mode
// ============================================================
// ModeGuard borrows a model mutably, records its current mode and
// switches it to the requested one. Dropping the guard puts the
// prior mode back, which also happens while unwinding from a panic
// in the model or the loss, and on early `?` returns.
//
//   {
//       let model = ModeGuard::enter(&mut model, ModelMode::Eval);
//       ... model.forward(...) ...
//   }   // ← prior mode restored here

use std::ops::{Deref, DerefMut};

use crate::domain::traits::{ModeSwitch, ModelMode};

pub struct ModeGuard<'a, M: ModeSwitch + ?Sized> {
    model: &'a mut M,
    prior: ModelMode,
}

impl<'a, M: ModeSwitch + ?Sized> ModeGuard<'a, M> {
    pub fn enter(model: &'a mut M, mode: ModelMode) -> Self {
        let prior = model.mode();
        model.set_mode(mode);
        tracing::debug!("Model mode {} → {}", prior, mode);
        Self { model, prior }
    }

    /// The mode that will be restored on drop.
    pub fn prior(&self) -> ModelMode {
        self.prior
    }
}

impl<M: ModeSwitch + ?Sized> Deref for ModeGuard<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &*self.model
    }
}

impl<M: ModeSwitch + ?Sized> DerefMut for ModeGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut *self.model
    }
}

impl<M: ModeSwitch + ?Sized> Drop for ModeGuard<'_, M> {
    fn drop(&mut self) {
        self.model.set_mode(self.prior);
        tracing::debug!("Model mode restored to {}", self.prior);
    }
}
