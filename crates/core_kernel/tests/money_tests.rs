//! Unit tests for the Money module

use core_kernel::{Money, MoneyError};

mod creation {
    use super::*;

    #[test]
    fn test_from_minor() {
        assert_eq!(Money::from_minor(2500).minor_units(), 2500);
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert!(matches!(Money::positive(0), Err(MoneyError::InvalidAmount(_))));
        assert_eq!(Money::positive(1), Ok(Money::from_minor(1)));
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_zero_and_positive() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_minor(1).is_positive());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add() {
        let sum = Money::from_minor(100).checked_add(Money::from_minor(50)).unwrap();
        assert_eq!(sum, Money::from_minor(150));
    }

    #[test]
    fn test_checked_add_overflow() {
        let result = Money::from_minor(u64::MAX).checked_add(Money::from_minor(1));
        assert_eq!(result, Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_sub_never_goes_negative() {
        let result = Money::from_minor(10).checked_sub(Money::from_minor(11));
        assert_eq!(
            result,
            Err(MoneyError::Insufficient {
                needed: 11,
                available: 10
            })
        );
    }

    #[test]
    fn test_add_saturates() {
        assert_eq!(
            Money::from_minor(u64::MAX) + Money::from_minor(5),
            Money::from_minor(u64::MAX)
        );
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Money::from_minor(50000)).unwrap(), "50000");
        let parsed: Money = serde_json::from_str("50000").unwrap();
        assert_eq!(parsed, Money::from_minor(50000));
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(serde_json::from_str::<Money>("-1").is_err());
    }
}
