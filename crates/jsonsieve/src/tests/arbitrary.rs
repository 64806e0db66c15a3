use quickcheck::{Arbitrary, Gen};

use crate::{Array, Map, Number, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(Number);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            return Self(Number::Integer(i64::arbitrary(g)));
        }
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }
        Self(Number::Float(value))
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 4 {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Number(JsonNumber::arbitrary(g).0),
                _ => Value::String(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return gen_scalar(g);
            }
            match usize::arbitrary(g) % 6 {
                0..4 => gen_scalar(g),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    let mut vec = Array::with_capacity(len);
                    for _ in 0..len {
                        vec.push(gen_val(g, depth - 1));
                    }
                    Value::Array(vec)
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::with_capacity(len);
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        // containers most of the time, so keys and nesting get exercised
        if usize::arbitrary(g) % 4 == 0 {
            gen_scalar(g)
        } else {
            let depth = 1 + usize::arbitrary(g) % 3;
            let mut value = gen_val(g, depth);
            while !matches!(value, Value::Array(_) | Value::Object(_)) {
                value = gen_val(g, depth);
            }
            value
        }
    }
}
