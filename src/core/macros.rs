//! Macros implementing bit and arithmetic operators for single-field tuple
//! structs wrapping an integer type.

/// Implements a shifting operator (and its assign twin) for a tuple struct,
/// delegating to the wrapping variant on the inner integer.
macro_rules! impl_wrapped_shift {
    ($t:ty, $trait_:ident, $fn_:ident, $wrap:ident, $atrait:ident, $afn:ident) => {
        impl $trait_<usize> for $t {
            type Output = $t;

            #[inline(always)]
            fn $fn_(self, rhs: usize) -> $t {
                Self((self.0).$wrap(rhs as u32))
            }
        }

        impl $atrait<usize> for $t {
            #[inline(always)]
            fn $afn(&mut self, rhs: usize) {
                *self = Self((self.0).$wrap(rhs as u32));
            }
        }
    };
}

/// Implements a binary operator (and its assign twin) for a tuple struct,
/// both against itself and against the bare inner type.
macro_rules! impl_wrapped_op {
    ($t:ty, $b:ty, $trait_:ident, $fn_:ident, $wrap:ident, $atrait:ident, $afn:ident) => {
        impl $trait_ for $t {
            type Output = $t;

            #[inline(always)]
            fn $fn_(self, rhs: $t) -> $t {
                Self((self.0).$wrap(rhs.0))
            }
        }

        impl $atrait for $t {
            #[inline(always)]
            fn $afn(&mut self, rhs: $t) {
                *self = Self((self.0).$wrap(rhs.0));
            }
        }

        impl $trait_<$b> for $t {
            type Output = $t;

            #[inline(always)]
            fn $fn_(self, rhs: $b) -> $t {
                Self((self.0).$wrap(rhs))
            }
        }

        impl $atrait<$b> for $t {
            #[inline(always)]
            fn $afn(&mut self, rhs: $b) {
                *self = Self((self.0).$wrap(rhs));
            }
        }
    };
}

/// Implements `!`, the bit operators `& | ^`, wrapping `+ - *`, the shifts
/// `<< >>` and `From` conversions for a tuple struct wrapping an integer.
macro_rules! impl_bit_ops {
    ($t:tt, $b:tt) => {
        impl From<$b> for $t {
            #[inline(always)]
            fn from(bits: $b) -> Self {
                $t(bits)
            }
        }

        impl From<$t> for $b {
            #[inline(always)]
            fn from(wrapped: $t) -> Self {
                wrapped.0
            }
        }

        impl_wrapped_op!($t, $b, BitOr, bitor, bitor, BitOrAssign, bitor_assign);
        impl_wrapped_op!($t, $b, BitAnd, bitand, bitand, BitAndAssign, bitand_assign);
        impl_wrapped_op!($t, $b, BitXor, bitxor, bitxor, BitXorAssign, bitxor_assign);
        impl_wrapped_op!($t, $b, Add, add, wrapping_add, AddAssign, add_assign);
        impl_wrapped_op!($t, $b, Sub, sub, wrapping_sub, SubAssign, sub_assign);
        impl_wrapped_op!($t, $b, Mul, mul, wrapping_mul, MulAssign, mul_assign);

        impl_wrapped_shift!($t, Shl, shl, wrapping_shl, ShlAssign, shl_assign);
        impl_wrapped_shift!($t, Shr, shr, wrapping_shr, ShrAssign, shr_assign);

        impl Not for $t {
            type Output = $t;

            #[inline(always)]
            fn not(self) -> $t {
                $t(!self.0)
            }
        }
    };
}
