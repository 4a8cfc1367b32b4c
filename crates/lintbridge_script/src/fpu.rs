//! Floating-point exception mode guard.
//!
//! JavaScript engines expect floating-point exceptions to be masked, so that
//! `1 / 0` yields `Infinity` instead of trapping. Software loaded into the
//! same host process can unmask them. Every sandbox therefore runs with all
//! exceptions masked and restores the previous mode on teardown.
//!
//! Only Windows MSVC targets expose the control word through the CRT; on
//! every other target the guard does nothing and takes no lock.

/// RAII guard that masks floating-point exceptions while alive.
///
/// Where the mode is actually toggled, guards are serialized by a
/// process-wide lock so one call's restore cannot clobber another call's
/// override. Guards must not be nested on the same thread.
pub struct FpuGuard {
    _inner: imp::Guard,
}

impl FpuGuard {
    /// Masks all floating-point exceptions until the guard is dropped.
    pub fn acquire() -> Self {
        Self {
            _inner: imp::Guard::acquire(),
        }
    }

    /// Returns `true` if this platform actually toggles the control word.
    pub const fn is_active() -> bool {
        imp::ACTIVE
    }
}

#[cfg(all(windows, target_env = "msvc"))]
mod imp {
    use parking_lot::{Mutex, MutexGuard, const_mutex};
    use tracing::trace;

    pub const ACTIVE: bool = true;

    /// `_MCW_EM`: all exception mask bits.
    const MCW_EM: u32 = 0x0008_001f;

    static FPU_LOCK: Mutex<()> = const_mutex(());

    unsafe extern "C" {
        fn _controlfp(new: u32, mask: u32) -> u32;
    }

    pub(crate) fn control_word() -> u32 {
        // SAFETY: a zero mask only reads the calling thread's control word.
        unsafe { _controlfp(0, 0) }
    }

    pub struct Guard {
        previous: u32,
        _lock: MutexGuard<'static, ()>,
    }

    impl Guard {
        pub fn acquire() -> Self {
            let lock = FPU_LOCK.lock();
            let previous = control_word();
            // SAFETY: only the exception mask bits of this thread are written.
            unsafe {
                _controlfp(MCW_EM, MCW_EM);
            }
            trace!("Masked floating-point exceptions (previous: {:#x})", previous);
            Self {
                previous,
                _lock: lock,
            }
        }
    }

    impl Drop for Guard {
        fn drop(&mut self) {
            // SAFETY: restores the mask bits captured in `acquire`.
            unsafe {
                _controlfp(self.previous, MCW_EM);
            }
            trace!("Restored floating-point control word");
        }
    }
}

#[cfg(not(all(windows, target_env = "msvc")))]
mod imp {
    pub const ACTIVE: bool = false;

    pub struct Guard;

    impl Guard {
        pub fn acquire() -> Self {
            Guard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_guards_do_not_block() {
        drop(FpuGuard::acquire());
        drop(FpuGuard::acquire());
    }

    #[test]
    #[cfg(not(all(windows, target_env = "msvc")))]
    fn test_inactive_off_windows() {
        assert!(!FpuGuard::is_active());
    }

    #[test]
    #[cfg(all(windows, target_env = "msvc"))]
    fn test_control_word_restored() {
        let before = imp::control_word();
        {
            let _guard = FpuGuard::acquire();
            assert_eq!(imp::control_word() & 0x0008_001f, 0x0008_001f);
        }
        assert_eq!(imp::control_word(), before);
    }
}
