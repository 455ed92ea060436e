// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A reader-writer spinlock for the global logger list.

On the wasm main thread we can't necessarily block, so this spins instead.
Critical sections must stay as short as possible.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

const UNLOCKED: u8 = 0;
//up to 254 readers, or one writer
const LOCKED_WRITE: u8 = u8::MAX;

pub(crate) struct Spinlock<T> {
    data: UnsafeCell<T>,
    state: AtomicU8,
}

//safety: access to data is serialized by state
unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send + Sync> Sync for Spinlock<T> {}

/// Releases the lock when dropped, so a panicking closure doesn't leave it held.
struct Guard<'a> {
    state: &'a AtomicU8,
    write: bool,
}

impl Drop for Guard<'_> {
    fn drop(&mut self) {
        if self.write {
            self.state.store(UNLOCKED, Release);
        } else {
            self.state.fetch_sub(1, Release);
        }
    }
}

impl<T> Spinlock<T> {
    pub(crate) const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            state: AtomicU8::new(UNLOCKED),
        }
    }

    fn acquire_write(&self) -> Guard<'_> {
        while self
            .state
            .compare_exchange_weak(UNLOCKED, LOCKED_WRITE, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        Guard {
            state: &self.state,
            write: true,
        }
    }

    fn acquire_read(&self) -> Guard<'_> {
        while self
            .state
            .fetch_update(Acquire, Relaxed, |v| {
                if v < LOCKED_WRITE - 1 { Some(v + 1) } else { None }
            })
            .is_err()
        {
            std::hint::spin_loop();
        }
        Guard {
            state: &self.state,
            write: false,
        }
    }

    pub(crate) fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.acquire_write();
        //safety: the write lock gives exclusive access
        unsafe { f(&mut *self.data.get()) }
    }

    pub(crate) fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let _guard = self.acquire_read();
        //safety: the read lock excludes writers
        unsafe { f(&*self.data.get()) }
    }
}
