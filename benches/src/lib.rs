//! Shared setup for the xchacha20 benchmarks.
//!
//! Throughput is reported in cycles per byte where the measurement is
//! supported, and in wall-clock time elsewhere.

use criterion::Criterion;

/// Criterion instance measuring cycles per byte.
#[cfg(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux")))]
pub type Benchmarker = Criterion<criterion_cycles_per_byte::CyclesPerByte>;

/// Criterion instance measuring wall-clock time.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux"))))]
pub type Benchmarker = Criterion;

/// Build the [`Benchmarker`] used by every group.
#[cfg(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux")))]
pub fn benchmarker() -> Benchmarker {
    Criterion::default().with_measurement(criterion_cycles_per_byte::CyclesPerByte)
}

/// Build the [`Benchmarker`] used by every group.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux"))))]
pub fn benchmarker() -> Benchmarker {
    Criterion::default()
}

/// Declare a criterion group named `$Name` running `$Target` with the
/// measurement returned by [`benchmarker`].
#[macro_export]
macro_rules! criterion_group_bench {
    ($Name:ident, $Target:ident) => {
        criterion_group!(
            name = $Name;
            config = $crate::benchmarker();
            targets = $Target
        );
    };
}
