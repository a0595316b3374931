/*
 * Copyright (c) Radzivon Bartoshyk, 1/2025. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::sync::atomic::{AtomicU32, Ordering};

/// 128-bit integer SIMD tier, SSE2 on x86 machines.
pub const CPU_HAS_SIMD128: u32 = 2;
/// 128-bit SIMD with byte permutes, SSSE3 on x86 machines.
pub const CPU_HAS_BYTE_SHUFFLE: u32 = 4;
/// NEON vector tier on ARM machines.
pub const CPU_HAS_NEON: u32 = 32;
/// Sentinel recording that detection already ran.
pub const CPU_INITIALIZED: u32 = 64;

static CPU_INFO: AtomicU32 = AtomicU32::new(0);

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_cpu_flags() -> u32 {
    let mut flags = 0u32;
    if std::arch::is_x86_feature_detected!("sse2") {
        flags |= CPU_HAS_SIMD128;
    }
    if std::arch::is_x86_feature_detected!("ssse3") {
        flags |= CPU_HAS_BYTE_SHUFFLE;
    }
    flags
}

#[cfg(target_arch = "aarch64")]
fn detect_cpu_flags() -> u32 {
    let mut flags = 0u32;
    if std::arch::is_aarch64_feature_detected!("neon") {
        flags |= CPU_HAS_NEON;
    }
    flags
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_cpu_flags() -> u32 {
    0
}

/// Tests one of the `CPU_HAS_*` capability bits.
///
/// Detection runs on the first query and is cached afterwards. Computing the
/// mask twice from concurrent first-time callers is harmless, both arrive at
/// the same value.
pub fn query_capability(flag: u32) -> bool {
    let mut info = CPU_INFO.load(Ordering::Acquire);
    if info == 0 {
        info = detect_cpu_flags() | CPU_INITIALIZED;
        CPU_INFO.store(info, Ordering::Release);
    }
    info & flag != 0
}

/// Forcibly replaces the cached capability mask.
///
/// `set_capability_override(CPU_INITIALIZED)` disables every vector tier so
/// only scalar kernels dispatch, `set_capability_override(0)` forces
/// re-detection on the next query. Intended for tests and diagnostics.
pub fn set_capability_override(mask: u32) {
    CPU_INFO.store(mask, Ordering::Release);
}

// Tests overriding the process-wide mask serialize on this lock so the
// harness threads do not observe each other's overrides.
#[cfg(test)]
pub(crate) static CAPABILITY_TEST_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_and_reset() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        set_capability_override(CPU_INITIALIZED);
        assert!(!query_capability(CPU_HAS_SIMD128));
        assert!(!query_capability(CPU_HAS_BYTE_SHUFFLE));
        assert!(!query_capability(CPU_HAS_NEON));
        assert!(query_capability(CPU_INITIALIZED));

        set_capability_override(0);
        // Detection reruns lazily and always stamps the sentinel.
        query_capability(CPU_HAS_SIMD128);
        assert!(query_capability(CPU_INITIALIZED));
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        assert_eq!(
            query_capability(CPU_HAS_SIMD128),
            std::arch::is_x86_feature_detected!("sse2")
        );
        set_capability_override(0);
    }
}
