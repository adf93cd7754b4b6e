//! Protected storage for generated secrets.
//!
//! [`ProtectedSecret`] is the "secure string" returned when a password is not
//! requested as plain text. It:
//! - Zeroes its memory on drop (via `secrecy`'s built-in `Zeroize`)
//! - Locks its pages in RAM via `mlock` to prevent swap (soft fallback)
//! - Masks output in `Debug`/`Display` to prevent accidental leakage
//! - Is sealed at construction: no mutating API, no `Clone`

use crate::error::GeneratorError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

// ---------------------------------------------------------------------------
// Platform-specific memory locking
// ---------------------------------------------------------------------------

/// RAII guard that unlocks memory on drop.
///
/// When created, locks a memory region via `mlock` to prevent it from being
/// swapped to disk. On drop, releases its hold on the region's pages; a page
/// is only `munlock`ed once no other live region still covers it.
struct LockedRegion {
    ptr: *const u8,
    len: usize,
    locked: bool,
}

// SAFETY: The pointer is only passed to mlock/munlock, which are thread-safe.
// The pointed-to data is owned by ProtectedSecret and never read through here.
unsafe impl Send for LockedRegion {}
unsafe impl Sync for LockedRegion {}

impl LockedRegion {
    /// Attempt to lock a memory region. Failure is a soft fallback: the
    /// region stays unlocked and a one-time warning is printed.
    fn try_lock(ptr: *const u8, len: usize) -> Self {
        let locked = platform::try_mlock(ptr, len);
        if !locked && len > 0 {
            static WARNED: std::sync::Once = std::sync::Once::new();
            WARNED.call_once(|| {
                eprintln!(
                    "[passgen-core] WARNING: mlock failed, \
                     generated secrets may be swapped to disk. \
                     Consider increasing RLIMIT_MEMLOCK."
                );
            });
        }
        Self { ptr, len, locked }
    }

    const fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Drop for LockedRegion {
    fn drop(&mut self) {
        if self.locked {
            platform::try_munlock(self.ptr, self.len);
        }
    }
}

// ---------------------------------------------------------------------------
// ProtectedSecret
// ---------------------------------------------------------------------------

/// Read-only container for a generated password.
///
/// Wraps [`SecretString`] from the `secrecy` crate. The characters are
/// written once in [`ProtectedSecret::seal`]; afterwards the value can only
/// be exposed as `&str` or dropped, which wipes the backing allocation.
pub struct ProtectedSecret {
    // Declared first so the pages are released before `inner` frees them.
    lock: LockedRegion,
    inner: SecretString,
    chars: usize,
}

impl ProtectedSecret {
    /// Seal a character sequence into a new protected secret.
    ///
    /// The characters are encoded into an exactly-sized allocation so no
    /// unwiped reallocation copy is left behind. The caller still owns
    /// `chars` and should zeroize it.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::SecureMemory`] if the encoded length
    /// overflows.
    pub fn seal(chars: &[char]) -> Result<Self, GeneratorError> {
        let byte_len = chars
            .iter()
            .try_fold(0usize, |acc, c| acc.checked_add(c.len_utf8()))
            .ok_or_else(|| GeneratorError::SecureMemory("secret length overflow".into()))?;

        let mut text = String::with_capacity(byte_len);
        text.extend(chars.iter());
        // Capacity equals length, so boxing the string does not reallocate.
        let inner = SecretString::from(text);

        let exposed = inner.expose_secret();
        let lock = LockedRegion::try_lock(exposed.as_ptr(), exposed.len());
        Ok(Self {
            lock,
            inner,
            chars: chars.len(),
        })
    }

    /// Expose the secret text. Keep exposure minimal: prefer using the slice
    /// within a single expression over binding it to a long-lived variable.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Number of characters in the secret.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars
    }

    /// Returns `true` if the secret holds no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Returns `true` if the underlying memory is `mlock`'d.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl fmt::Debug for ProtectedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProtectedSecret(***)")
    }
}

impl fmt::Display for ProtectedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProtectedSecret(***)")
    }
}

// ---------------------------------------------------------------------------
// Core dump disabling
// ---------------------------------------------------------------------------

/// Disable core dumps for the current process so secrets cannot end up in
/// a crash dump.
///
/// On Unix: sets `RLIMIT_CORE` to 0 (both soft and hard limits).
/// On non-Unix: no-op (returns `Ok`).
///
/// # Errors
///
/// Returns [`GeneratorError::SecureMemory`] if the `setrlimit` call fails.
pub fn disable_core_dumps() -> Result<(), GeneratorError> {
    platform::disable_core_dumps_impl()
}

// ---------------------------------------------------------------------------
// Platform-specific implementations
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod platform {
    use crate::error::GeneratorError;
    use std::collections::btree_map::Entry;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    /// Live holds per locked page, keyed by page start address.
    ///
    /// `mlock` does not nest: a single `munlock` releases a page no matter
    /// how many secrets share it.
    static PAGE_HOLDS: Mutex<BTreeMap<usize, usize>> = Mutex::new(BTreeMap::new());

    fn page_size() -> usize {
        // SAFETY: sysconf has no preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        usize::try_from(size)
            .ok()
            .filter(|s| s.is_power_of_two())
            .unwrap_or(4096)
    }

    /// Start addresses of every page touched by `[ptr, ptr + len)`.
    pub(super) fn pages(ptr: *const u8, len: usize) -> Option<impl Iterator<Item = usize>> {
        let page = page_size();
        let mask = !page.checked_sub(1)?;
        let first = ptr as usize;
        let last = first.checked_add(len.checked_sub(1)?)?;
        Some(((first & mask)..=(last & mask)).step_by(page))
    }

    /// Number of live regions covering the page that contains `ptr`.
    #[cfg(test)]
    pub(super) fn holds_on_page(ptr: *const u8) -> usize {
        let Some(mut pages) = pages(ptr, 1) else {
            return 0;
        };
        let holds = PAGE_HOLDS.lock().unwrap_or_else(PoisonError::into_inner);
        pages
            .next()
            .and_then(|page| holds.get(&page).copied())
            .unwrap_or(0)
    }

    pub(super) fn try_mlock(ptr: *const u8, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        let Some(pages) = pages(ptr, len) else {
            return false;
        };
        let mut holds = PAGE_HOLDS.lock().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: mlock accepts any pointer/length pair; an invalid range is
        // reported as ENOMEM, which we treat as "not locked".
        if unsafe { libc::mlock(ptr.cast(), len) } != 0 {
            return false;
        }
        for page in pages {
            let count = holds.entry(page).or_insert(0);
            *count = count.saturating_add(1);
        }
        true
    }

    pub(super) fn try_munlock(ptr: *const u8, len: usize) {
        if len == 0 {
            return;
        }
        let Some(pages) = pages(ptr, len) else {
            return;
        };
        let page_len = page_size();
        let mut holds = PAGE_HOLDS.lock().unwrap_or_else(PoisonError::into_inner);
        for page in pages {
            let Entry::Occupied(mut entry) = holds.entry(page) else {
                continue;
            };
            let count = entry.get_mut();
            if *count > 1 {
                *count = (*count).saturating_sub(1);
                continue;
            }
            entry.remove();
            // SAFETY: munlock is safe to call on any page. Failure is
            // non-critical.
            unsafe {
                libc::munlock(page as *const libc::c_void, page_len);
            }
        }
    }

    pub(super) fn disable_core_dumps_impl() -> Result<(), GeneratorError> {
        let limit = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: setrlimit with RLIMIT_CORE is a standard POSIX call.
        let ret = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &raw const limit) };
        if ret != 0 {
            return Err(GeneratorError::SecureMemory(
                "failed to disable core dumps via RLIMIT_CORE".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod platform {
    use crate::error::GeneratorError;

    pub(super) fn try_mlock(_ptr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) fn try_munlock(_ptr: *const u8, _len: usize) {}

    pub(super) fn disable_core_dumps_impl() -> Result<(), GeneratorError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
