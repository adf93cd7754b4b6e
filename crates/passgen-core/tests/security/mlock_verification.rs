//! Verify that `mlock` status is reported for protected secrets and that
//! core dumps can be disabled.
//!
//! These tests are platform-specific and only run on Unix systems.

#[cfg(unix)]
use passgen_core::memory::{disable_core_dumps, ProtectedSecret};

#[cfg(unix)]
#[test]
fn protected_secret_reports_mlock_status() {
    let chars: Vec<char> = "mlock test data".chars().collect();
    let secret = ProtectedSecret::seal(&chars).expect("seal should succeed");
    // mlock can legitimately fail in containers with a low RLIMIT_MEMLOCK,
    // so only check that the status is queryable.
    eprintln!("mlock status: {}", secret.is_mlocked());
}

#[cfg(unix)]
#[test]
fn empty_secret_counts_as_locked() {
    let secret = ProtectedSecret::seal(&[]).expect("seal should succeed");
    assert!(secret.is_mlocked(), "zero-length regions need no lock");
}

#[cfg(unix)]
#[test]
fn core_dumps_disabled() {
    disable_core_dumps().expect("disable_core_dumps should succeed");

    let mut limit = libc::rlimit {
        rlim_cur: 1,
        rlim_max: 1,
    };
    let ret = unsafe { libc::getrlimit(libc::RLIMIT_CORE, &raw mut limit) };
    assert_eq!(ret, 0);
    assert_eq!(limit.rlim_cur, 0);
    assert_eq!(limit.rlim_max, 0);
}
