//! Support tooling: the deterministic PRNG, the transposition-table
//! contract, and cache-prefetch helpers for table implementations.

pub mod prng;
pub mod tt;

/// An object whose entries can be pulled into cache ahead of a probe.
pub trait PreFetchable {
    /// Prefetches the cache line a key would land on.
    fn prefetch(&self, key: u64);

    /// Prefetches a key alongside its successor.
    fn prefetch2(&self, key: u64) {
        self.prefetch(key);
        self.prefetch(key + 1);
    }
}

/// Prefetches `ptr` into all levels of the cache.
///
/// Compiles to a no-op on targets without SSE prefetch support.
#[inline(always)]
pub fn prefetch_write<T>(ptr: *const T) {
    __prefetch_write::<T>(ptr);
}

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
))]
#[inline(always)]
fn __prefetch_write<T>(ptr: *const T) {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::{_mm_prefetch, _MM_HINT_T0};
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
    unsafe {
        _mm_prefetch(ptr as *const i8, _MM_HINT_T0);
    }
}

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
)))]
#[inline(always)]
fn __prefetch_write<T>(_ptr: *const T) {}
