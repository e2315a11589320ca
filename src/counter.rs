//! Free-running hardware counters.
//!
//! A [`TickCounter`] is anything that can be sampled for its current value and
//! knows how fast it counts. The counter is read-only and wraps back to zero
//! after [`TickWord::MAX`].

use core::fmt::Debug;
use core::marker::PhantomData;

/// Fixed-width unsigned value held by a hardware counter.
pub trait TickWord: Copy + Ord + Debug {
    const ZERO: Self;
    const MAX: Self;

    /// Addition modulo the word width, matching the hardware rollover.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Keeps the low bits of `value` that fit into this word.
    fn from_u64_truncating(value: u64) -> Self;

    fn to_u64(self) -> u64;
}

macro_rules! tick_word {
    ($($t:ty),*) => {
        $(
            impl TickWord for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline(always)]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$t>::wrapping_add(self, rhs)
                }

                #[inline(always)]
                fn from_u64_truncating(value: u64) -> Self {
                    value as $t
                }

                #[inline(always)]
                fn to_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

tick_word!(u8, u16, u32, u64);

/// A monotonically increasing, wrapping counter with a fixed frequency.
///
/// The counter source must already be running when it is handed to a
/// [`TickDelay`](crate::delay::TickDelay). A counter that never advances
/// makes every non-zero delay spin forever.
pub trait TickCounter {
    type Word: TickWord;

    /// Samples the counter.
    fn now(&self) -> Self::Word;

    /// Number of counter increments per second.
    fn ticks_per_second(&self) -> u32;
}

impl<C: TickCounter + ?Sized> TickCounter for &C {
    type Word = C::Word;

    #[inline(always)]
    fn now(&self) -> Self::Word {
        (**self).now()
    }

    fn ticks_per_second(&self) -> u32 {
        (**self).ticks_per_second()
    }
}

/// Exposes only the low bits of a wider counter.
///
/// Useful when the platform timer is 64 bits wide but a narrower word is
/// cheaper to compare. The resulting counter wraps at `W::MAX`.
pub struct Truncated<C, W> {
    inner: C,
    _word: PhantomData<W>,
}

impl<C, W> Truncated<C, W>
where
    C: TickCounter,
    W: TickWord,
{
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _word: PhantomData,
        }
    }
}

impl<C, W> TickCounter for Truncated<C, W>
where
    C: TickCounter,
    W: TickWord,
{
    type Word = W;

    #[inline(always)]
    fn now(&self) -> W {
        W::from_u64_truncating(self.inner.now().to_u64())
    }

    fn ticks_per_second(&self) -> u32 {
        self.inner.ticks_per_second()
    }
}
