// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

use super::*;

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;


/* Toy mechanisms used to exercise the dispatch contract. The real
 * algorithms live outside this crate and register themselves the same
 * way. */

#[derive(Debug)]
struct XorState {
    key: u8,
    live: bool,
}

impl Context for XorState {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A self-inverse "block cipher" providing every dispatch slot
#[derive(Debug)]
struct XorCipher {
    key: u8,
}

impl Mechanism for XorCipher {
    fn capabilities(&self) -> CapFlags {
        CapFlags::Create
            | CapFlags::Destroy
            | CapFlags::Delete
            | CapFlags::Direct
            | CapFlags::Reverse
    }

    fn create(&self) -> Result<Box<dyn Context>> {
        Ok(Box::new(XorState {
            key: self.key,
            live: true,
        }))
    }

    fn destroy(&self, ctx: &mut dyn Context) -> Result<()> {
        let state = downcast_mut::<XorState>(ctx)?;
        state.key = 0;
        state.live = false;
        Ok(())
    }

    fn direct(&self, ctx: &mut dyn Context, data: &[u8]) -> Result<Vec<u8>> {
        let state = downcast_mut::<XorState>(ctx)?;
        if !state.live {
            return Err(Error::other_error("context already destroyed"));
        }
        Ok(data.iter().map(|b| b ^ state.key).collect())
    }

    fn reverse(&self, ctx: &mut dyn Context, data: &[u8]) -> Result<Vec<u8>> {
        self.direct(ctx, data)
    }
}

#[derive(Debug)]
struct SumState {
    acc: u64,
}

impl Context for SumState {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A one-way "digest": no reverse slot
#[derive(Debug)]
struct DigestSum;

impl Mechanism for DigestSum {
    fn capabilities(&self) -> CapFlags {
        CapFlags::Create | CapFlags::Destroy | CapFlags::Delete | CapFlags::Direct
    }

    fn create(&self) -> Result<Box<dyn Context>> {
        Ok(Box::new(SumState { acc: 0 }))
    }

    fn destroy(&self, ctx: &mut dyn Context) -> Result<()> {
        downcast_mut::<SumState>(ctx)?.acc = 0;
        Ok(())
    }

    fn direct(&self, ctx: &mut dyn Context, data: &[u8]) -> Result<Vec<u8>> {
        let state = downcast_mut::<SumState>(ctx)?;
        for b in data {
            state.acc = state.acc.wrapping_add(u64::from(*b));
        }
        Ok(state.acc.to_be_bytes().to_vec())
    }
}

#[derive(Debug)]
struct ProbeState;

impl Context for ProbeState {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Counts destroy calls so tests can observe the default delete path
#[derive(Debug)]
struct Probe {
    destroyed: Arc<AtomicUsize>,
}

impl Mechanism for Probe {
    fn create(&self) -> Result<Box<dyn Context>> {
        Ok(Box::new(ProbeState))
    }

    fn destroy(&self, ctx: &mut dyn Context) -> Result<()> {
        downcast_mut::<ProbeState>(ctx)?;
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Lies about its capabilities; used to exercise check()
#[derive(Debug)]
struct Undeclared;

impl Mechanism for Undeclared {
    fn capabilities(&self) -> CapFlags {
        CapFlags::empty()
    }

    fn create(&self) -> Result<Box<dyn Context>> {
        Ok(Box::new(ProbeState))
    }

    fn destroy(&self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }
}

fn downcast_mut<T: 'static>(ctx: &mut dyn Context) -> Result<&mut T> {
    match ctx.as_any_mut().downcast_mut::<T>() {
        Some(state) => Ok(state),
        None => Err(Error::other_error("context type mismatch")),
    }
}

/// A registry populated with the GOST R 34 mechanism identifiers used
/// throughout the tests
fn gost_registry() -> OidRegistry {
    let mut reg = OidRegistry::new();
    let entries = [
        OidEntry::new(
            Engine::HashFunction,
            Mode::Algorithm,
            &["streebog256", "md_gost12_256"],
            "1.2.643.7.1.1.2.2",
            None,
            Box::new(DigestSum) as Box<dyn Mechanism>,
        ),
        OidEntry::new(
            Engine::HashFunction,
            Mode::Algorithm,
            &["streebog512", "md_gost12_512"],
            "1.2.643.7.1.1.2.3",
            None,
            Box::new(DigestSum),
        ),
        OidEntry::new(
            Engine::Hmac,
            Mode::Algorithm,
            &["hmac-streebog256"],
            "1.2.643.7.1.1.4.1",
            None,
            Box::new(DigestSum),
        ),
        OidEntry::new(
            Engine::BlockCipher,
            Mode::Algorithm,
            &["magma", "gost3412-2015-magma"],
            "1.2.643.7.1.1.5.1",
            None,
            Box::new(XorCipher { key: 0x3c }),
        ),
        OidEntry::new(
            Engine::BlockCipher,
            Mode::Algorithm,
            &["kuznechik", "grasshopper"],
            "1.2.643.7.1.1.5.2",
            None,
            Box::new(XorCipher { key: 0xa5 }),
        ),
    ];
    for entry in entries {
        reg.register(entry.unwrap()).unwrap();
    }
    reg
}
