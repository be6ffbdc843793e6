// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

use std::any::Any;
use std::fmt::Debug;

use crate::error::{Error, Result};

use bitflags::bitflags;

bitflags! {
    /// A bitflag set naming the dispatch slots a mechanism provides
    #[derive(Debug, Clone, Copy)]
    pub struct CapFlags: u32 {
        /// The mechanism can initialize a fresh context
        const Create  = 0x00000001;

        /// The mechanism can release a context's internal resources,
        /// leaving it inert
        const Destroy = 0x00000002;

        /// The mechanism can release the context's own storage
        const Delete  = 0x00000004;

        /// The mechanism performs a forward transformation
        /// (encrypt, hash update, ...)
        const Direct  = 0x00000008;

        /// The mechanism performs the inverse transformation (decrypt);
        /// absent for one-way mechanisms
        const Reverse = 0x00000010;
    }
}

/// Per-instance mechanism state produced by [Mechanism::create]
///
/// The registry never holds contexts; their lifetime belongs to the
/// caller, scoped by matching create/destroy (and delete) calls on
/// every exit path.
pub trait Context: Debug + Send {
    /// Upcast used by mechanisms to recover their concrete state type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast used by mechanisms to recover their concrete
    /// state type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The uniform dispatch contract every registered mechanism exposes
///
/// `create` and `destroy` are required methods, so they are present
/// for every mechanism. `direct` and `reverse` default to failing
/// with [crate::ErrorKind::DispatchSlotAbsent]; callers that cannot
/// tolerate the failure should consult [Mechanism::capabilities]
/// before invoking them.
pub trait Mechanism: Debug + Send + Sync {
    /// The slot set this mechanism declares
    ///
    /// Contexts are always heap-managed here, so `Delete` is part of
    /// the default set alongside the two mandatory slots.
    fn capabilities(&self) -> CapFlags {
        CapFlags::Create | CapFlags::Destroy | CapFlags::Delete
    }

    /// Initializes a freshly allocated context for the mechanism
    fn create(&self) -> Result<Box<dyn Context>>;

    /// Releases internal resources held by a context, leaving it inert
    fn destroy(&self, ctx: &mut dyn Context) -> Result<()>;

    /// Releases the context's own storage
    ///
    /// The default destroys the context and then drops the box.
    fn delete(&self, mut ctx: Box<dyn Context>) -> Result<()> {
        self.destroy(ctx.as_mut())
    }

    /// Performs the mechanism's forward transformation
    fn direct(&self, _ctx: &mut dyn Context, _data: &[u8]) -> Result<Vec<u8>> {
        Err(Error::slot_absent("direct"))
    }

    /// Performs the inverse transformation where applicable
    fn reverse(
        &self,
        _ctx: &mut dyn Context,
        _data: &[u8],
    ) -> Result<Vec<u8>> {
        Err(Error::slot_absent("reverse"))
    }
}
