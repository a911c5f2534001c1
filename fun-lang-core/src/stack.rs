//! Deeply nested programs and deep recursion in Fun code recurse through the
//! parser and evaluator. Every recursive entry point goes through
//! [`ensure_sufficient_stack`], which moves onto a fresh stack segment when
//! the current one runs low.

/// Grow once less than this is left.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn depth(n: usize) -> usize {
        ensure_sufficient_stack(|| {
            // A frame large enough that the default test stack overflows
            // without the guard.
            let frame = std::hint::black_box([0u8; 512]);
            if n == 0 {
                usize::from(frame[0])
            } else {
                depth(n - 1) + 1
            }
        })
    }

    #[test]
    fn test_deep_recursion() {
        assert_eq!(depth(50_000), 50_000);
    }
}
