mod distribution_quality;
mod mlock_verification;
mod zeroize_on_drop;
