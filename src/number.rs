
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

/// The two numeric kinds of the language. Arithmetic on two integers stays
/// exact; as soon as a float is involved the result is a float.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }
}

macro_rules! impl_binary_ops {
    { $(($optrait:ident, $opname:ident)),* } => {
        $(
            impl $optrait for Number {
                type Output = Number;

                fn $opname(self, other: Number) -> Number {
                    match (self, other) {
                        (Number::Int(a), Number::Int(b)) =>
                            Number::Int($optrait::$opname(a, b)),
                        (a, b) =>
                            Number::Float($optrait::$opname(a.to_f64(),
                                b.to_f64())),
                    }
                }
            }
        )*
    }
}

impl_binary_ops! {
    (Add, add),
    (Sub, sub),
    (Mul, mul)
}

// Division always happens in the reals, even for two integers.
impl Div for Number {
    type Output = Number;

    fn div(self, other: Number) -> Number {
        Number::Float(self.to_f64() / other.to_f64())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(&b),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

#[test]
fn test_exact_sum() {
    assert_eq!(Number::Int(1) + Number::Int(2), Number::Int(3));
}

#[test]
fn test_mixed_sum_promotes() {
    assert_eq!(Number::Int(1) + Number::Float(2.5), Number::Float(3.5));
}

#[test]
fn test_division_is_real() {
    assert_eq!(Number::Int(7) / Number::Int(2), Number::Float(3.5));
}

#[test]
fn test_cross_kind_equality() {
    assert_eq!(Number::Int(1), Number::Float(1.0));
    assert_ne!(Number::Int(1), Number::Float(1.5));
}

#[test]
fn test_cross_kind_ordering() {
    assert!(Number::Int(1) < Number::Float(1.5));
    assert!(Number::Float(2.5) >= Number::Int(2));
}
