//! Verify that `ProtectedSecret` actually zeroes memory after drop.
//!
//! After the secret is zeroed and deallocated, the allocator may write its
//! own metadata into the freed block, so we scan for a sentinel pattern
//! instead of asserting all-zeros.
//!
//! **UB caveat:** Reading freed memory is technically undefined behavior.
//! These are best-effort smoke tests meant for the debug profile.

use passgen_core::memory::ProtectedSecret;
use passgen_core::password::{ExclusionSet, PasswordEngine};

const SENTINEL: &str = "DEADBEEF";

fn sentinel_chars(repeats: usize) -> Vec<char> {
    SENTINEL.repeat(repeats).chars().collect()
}

fn sentinel_in(ptr: *const u8, len: usize) -> bool {
    // SAFETY: see module docs; intentionally reads just-freed memory.
    unsafe {
        let slice = std::slice::from_raw_parts(ptr, len);
        slice.windows(SENTINEL.len()).any(|w| w == SENTINEL.as_bytes())
    }
}

#[test]
fn protected_secret_sentinel_not_found_after_drop() {
    let chars = sentinel_chars(64);
    let ptr: *const u8;
    let len: usize;
    {
        let secret = ProtectedSecret::seal(&chars).expect("seal should succeed");
        let exposed = secret.expose();
        ptr = exposed.as_ptr();
        len = exposed.len();
        assert!(exposed.starts_with(SENTINEL));
    }

    assert!(
        !sentinel_in(ptr, len),
        "sentinel found in memory after ProtectedSecret drop"
    );
}

#[test]
fn large_protected_secret_sentinel_cleared() {
    // Above common allocator small-bin thresholds.
    let chars = sentinel_chars(8192);
    let ptr: *const u8;
    let len: usize;
    {
        let secret = ProtectedSecret::seal(&chars).expect("seal should succeed");
        ptr = secret.expose().as_ptr();
        len = secret.expose().len();
    }

    assert!(
        !sentinel_in(ptr, len),
        "sentinel found in memory after large ProtectedSecret drop"
    );
}

#[test]
fn generated_secret_is_released_without_panicking() {
    let secret = PasswordEngine::new()
        .generate_secret(64, &ExclusionSet::new(), true)
        .expect("generation should succeed");
    assert_eq!(secret.len(), 64);
    drop(secret);
}
