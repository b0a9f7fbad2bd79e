/// Property-based tests using proptest
/// Tests width and truncation invariants that must hold for all inputs
use proptest::prelude::*;
use vemovel_export_api::padding::{pad_left, pad_right};
use vemovel_export_api::payment_term::{self, PaymentTermRecord, LINE_WIDTH_WITHOUT_TYPE};
use vemovel_export_api::payment_type::{self, format_code, PaymentTypeRecord};

// Property: padding always yields exactly the requested width
proptest! {
    #[test]
    fn pad_left_has_exact_width(value in "\\PC{0,20}", width in 0usize..30) {
        prop_assert_eq!(pad_left(&value, width, '0').chars().count(), width);
    }

    #[test]
    fn pad_right_has_exact_width(value in "\\PC{0,20}", width in 0usize..30) {
        prop_assert_eq!(pad_right(&value, width, ' ').chars().count(), width);
    }

    #[test]
    fn pad_left_keeps_suffix(value in "[0-9]{0,20}", width in 0usize..30) {
        let padded = pad_left(&value, width, '0');
        if value.len() >= width {
            prop_assert!(value.ends_with(&padded));
        } else {
            prop_assert!(padded.ends_with(&value));
            prop_assert!(padded[..width - value.len()].chars().all(|c| c == '0'));
        }
    }

    #[test]
    fn pad_right_keeps_prefix(value in "[A-Z ]{0,20}", width in 0usize..30) {
        let padded = pad_right(&value, width, ' ');
        if value.len() >= width {
            prop_assert!(value.starts_with(&padded));
        } else {
            prop_assert!(padded.starts_with(&value));
            prop_assert!(padded[value.len()..].chars().all(|c| c == ' '));
        }
    }
}

// Property: payment type codes
proptest! {
    #[test]
    fn small_codes_have_two_digits(code in 0i64..100) {
        let formatted = format_code(code);
        prop_assert_eq!(formatted.len(), 2);
        prop_assert_eq!(formatted.parse::<i64>().unwrap(), code);
    }

    #[test]
    fn large_codes_keep_rightmost_digits(code in 100i64..10_000_000) {
        prop_assert_eq!(format_code(code), format!("{:02}", code % 100));
    }

    #[test]
    fn payment_type_file_has_one_line_per_record(
        descriptions in prop::collection::vec("[A-Za-z ]{0,30}", 0..10)
    ) {
        let records: Vec<PaymentTypeRecord> = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| PaymentTypeRecord { code: i as i64, description: d.clone() })
            .collect();
        let file = payment_type::build_file(&records);
        prop_assert_eq!(file.matches("\r\n").count(), records.len());
        prop_assert_eq!(file.is_empty(), records.is_empty());
    }
}

fn payment_term_strategy() -> impl Strategy<Value = PaymentTermRecord> {
    (
        (
            any::<i64>(),
            "\\PC{0,60}",
            proptest::option::of(-1.0e6f64..1.0e6),
            proptest::option::of(-1.0e6f64..1.0e6),
            proptest::option::of(-100_000i64..100_000),
            proptest::option::of(-1.0e6f64..1.0e6),
        ),
        (
            proptest::option::of("[SsNnX ]{0,3}"),
            proptest::option::of("\\PC{0,60}"),
            proptest::array::uniform12(proptest::option::of(0i64..1_000_000)),
            proptest::option::of("[A-Z ]{0,3}"),
        ),
    )
        .prop_map(
            |(
                (code, label, surcharge, discount, average_term, minimum_value),
                (uses_cash_register, payment_modes, due_day_offsets, type_code),
            )| PaymentTermRecord {
                code,
                label,
                surcharge,
                discount,
                average_term,
                minimum_value,
                uses_cash_register,
                payment_modes,
                due_day_offsets,
                type_code,
            },
        )
}

// Property: CADTPG lines have a fixed width
proptest! {
    #[test]
    fn payment_term_line_has_fixed_width(record in payment_term_strategy()) {
        // Labels and payment modes must not contain the delimiter for this check
        prop_assume!(!record.label.contains('|'));
        prop_assume!(!record.payment_modes.as_deref().unwrap_or("").contains('|'));

        let line = payment_term::format_record(&record);
        let type_width = record
            .type_code
            .as_deref()
            .map(|t| usize::from(!t.trim().is_empty()))
            .unwrap_or(0);

        prop_assert_eq!(line.chars().count(), LINE_WIDTH_WITHOUT_TYPE + type_width);
        prop_assert_eq!(line.split('|').count(), 21);
    }

    #[test]
    fn payment_term_formatting_is_deterministic(record in payment_term_strategy()) {
        prop_assert_eq!(
            payment_term::format_record(&record),
            payment_term::format_record(&record.clone())
        );
    }
}
