// tests/condition_tests.rs

use im::OrdMap;
use proptest::prelude::*;
use serde_json::json;
use siren::condition::ConditionKind;
use siren::value::{ObjectRef, Value};
use siren::{Resource, SirenError, TypeDescriptor};

#[derive(Default)]
struct Plain;

impl Resource for Plain {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("plain")
    }
}

fn truthy(value: impl Into<Value>) -> bool {
    ConditionKind::True.evaluate(&value.into()).unwrap()
}

#[cfg(test)]
mod true_tests {
    use super::*;

    #[test]
    fn test_true_table() {
        assert!(!ConditionKind::True.evaluate(&Value::Null).unwrap());
        assert!(truthy(true));
        assert!(!truthy(false));
        assert!(truthy("true"));
        assert!(!truthy("True"));
        assert!(!truthy(""));
        assert!(!truthy("yes"));
        assert!(!truthy(0));
        assert!(truthy(-5));
        assert!(truthy(5));
        assert!(!truthy(0.0));
        assert!(truthy(-0.5));
    }

    #[test]
    fn test_every_numeric_width() {
        assert!(!truthy(0i8) && truthy(-1i8));
        assert!(!truthy(0i16) && truthy(i16::MIN));
        assert!(!truthy(0i32) && truthy(7i32));
        assert!(!truthy(0i64) && truthy(i64::MAX));
        assert!(!truthy(0u8) && truthy(u8::MAX));
        assert!(!truthy(0u16) && truthy(1u16));
        assert!(!truthy(0u32) && truthy(1u32));
        assert!(!truthy(0u64) && truthy(u64::MAX));
        assert!(!truthy(0.0f32) && truthy(f32::MIN_POSITIVE));
    }

    #[test]
    fn test_structured_values_are_unsupported() {
        let object = Value::Object(ObjectRef::new(Plain));
        for value in [Value::List(vec![]), Value::Map(OrdMap::new()), object] {
            let err = ConditionKind::True.evaluate(&value).unwrap_err();
            match err {
                SirenError::UnsupportedType {
                    condition,
                    type_name,
                } => {
                    assert_eq!(condition, "TRUE");
                    assert_eq!(type_name, value.type_name());
                }
                other => panic!("expected UnsupportedType, got {other:?}"),
            }
        }
    }

    proptest! {
        #[test]
        fn test_signed_integers_are_true_unless_zero(n in any::<i64>()) {
            prop_assert_eq!(truthy(n), n != 0);
        }

        #[test]
        fn test_unsigned_integers_are_true_unless_zero(n in any::<u64>()) {
            prop_assert_eq!(truthy(n), n != 0);
        }

        #[test]
        fn test_finite_floats_are_true_unless_zero(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            prop_assert_eq!(truthy(n), n != 0.0);
        }

        #[test]
        fn test_only_the_exact_string_is_true(s in ".*") {
            prop_assert_eq!(truthy(s.clone()), s == "true");
        }
    }
}

#[cfg(test)]
mod other_kind_tests {
    use super::*;

    #[test]
    fn test_false_is_not_the_negation_of_true_on_null() {
        assert!(!ConditionKind::False.evaluate(&Value::Null).unwrap());
        assert!(!ConditionKind::True.evaluate(&Value::Null).unwrap());
        assert!(ConditionKind::False.evaluate(&Value::from("false")).unwrap());
        assert!(ConditionKind::False.evaluate(&Value::from(0u8)).unwrap());
    }

    #[test]
    fn test_null_kinds_accept_anything() {
        let list = Value::List(vec![Value::from(1)]);
        assert!(ConditionKind::Null.evaluate(&Value::Null).unwrap());
        assert!(!ConditionKind::Null.evaluate(&list).unwrap());
        assert!(ConditionKind::NotNull.evaluate(&list).unwrap());
        assert!(!ConditionKind::NotNull.evaluate(&Value::Null).unwrap());
    }

    #[test]
    fn test_emptiness_rejects_scalars_and_objects() {
        assert!(ConditionKind::Empty.evaluate(&Value::Null).unwrap());
        assert!(ConditionKind::Empty.evaluate(&Value::from("")).unwrap());
        assert!(ConditionKind::NotEmpty.evaluate(&Value::List(vec![Value::Null])).unwrap());
        for value in [
            Value::from(true),
            Value::from(0),
            Value::Object(ObjectRef::new(Plain)),
        ] {
            assert!(ConditionKind::Empty.evaluate(&value).is_err());
            assert!(ConditionKind::NotEmpty.evaluate(&value).is_err());
        }
    }

    #[test]
    fn test_equals_never_errors_and_never_matches_objects() {
        let object = Value::Object(ObjectRef::new(Plain));
        assert!(!ConditionKind::Equals(json!({})).evaluate(&object).unwrap());
        assert!(ConditionKind::Equals(json!(null)).evaluate(&Value::Null).unwrap());
        assert!(ConditionKind::Equals(json!("open")).evaluate(&Value::from("open")).unwrap());
        assert!(ConditionKind::Equals(json!(2.0)).evaluate(&Value::from(2i16)).unwrap());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ConditionKind::NotEmpty.to_string(), "NOT_EMPTY");
        assert_eq!(ConditionKind::Equals(json!(1)).to_string(), "EQUALS");
    }
}
