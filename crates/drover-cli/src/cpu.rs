// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Process CPU time.
//!
//! Participants run as threads of one process, so the process-wide user
//! plus system time covers the manager and every worker.

use std::time::Duration;

/// A starting point for measuring the CPU time the process spends.
#[derive(Debug, Clone, Copy)]
pub struct CpuClock {
    start: Option<Duration>,
}

impl CpuClock {
    /// Starts measuring from the CPU time used so far.
    pub fn start() -> Self {
        Self {
            start: process_cpu_time(),
        }
    }

    /// CPU time used since `start`, or `None` where the platform cannot tell.
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.start?;
        process_cpu_time().map(|now| now.saturating_sub(start))
    }
}

/// User plus system time of the whole process.
#[cfg(unix)]
pub fn process_cpu_time() -> Option<Duration> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: `usage` points to writable memory sized for one `rusage`.
    let status = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if status != 0 {
        return None;
    }
    // SAFETY: `getrusage` returned 0, so it filled the struct.
    let usage = unsafe { usage.assume_init() };
    Some(timeval_to_duration(usage.ru_utime)? + timeval_to_duration(usage.ru_stime)?)
}

#[cfg(not(unix))]
pub fn process_cpu_time() -> Option<Duration> {
    None
}

#[cfg(unix)]
fn timeval_to_duration(tv: libc::timeval) -> Option<Duration> {
    let secs = u64::try_from(tv.tv_sec).ok()?;
    let micros = u64::try_from(tv.tv_usec).ok()?;
    Some(Duration::from_secs(secs) + Duration::from_micros(micros))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_cpu_time_is_monotone() {
        let clock = CpuClock::start();
        let before = process_cpu_time().expect("getrusage works on unix");

        let mut acc = 0u64;
        for i in 0..20_000_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        std::hint::black_box(acc);

        let after = process_cpu_time().expect("getrusage works on unix");
        assert!(after >= before);
        assert!(clock.elapsed().is_some());
    }

    #[test]
    #[cfg(unix)]
    fn test_timeval_conversion() {
        let tv = libc::timeval {
            tv_sec: 2,
            tv_usec: 500_000,
        };
        assert_eq!(timeval_to_duration(tv), Some(Duration::from_millis(2500)));
    }
}
