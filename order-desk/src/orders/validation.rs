//! Draft validation
//!
//! The calculator assumes finite, in-range inputs. Everything that reaches
//! it from the order form or from a saved order goes through here first.

use shared::{AppError, AppResult, ErrorCode, OrderDraft, OrderInput};

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PRICE, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text, validate_text,
};

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_amount(
            field,
            format!("{} must be a finite number, got {}", field, value),
        ));
    }
    Ok(())
}

/// Finite, non-negative, at most [`MAX_PRICE`]
fn require_amount(value: f64, field: &str) -> AppResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::invalid_amount(
            field,
            format!("{} must be non-negative, got {}", field, value),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::invalid_amount(
            field,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field, MAX_PRICE, value
            ),
        ));
    }
    Ok(())
}

/// Finite, within [0, 100]
fn require_percent(value: f64, field: &str) -> AppResult<()> {
    require_finite(value, field)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::InvalidPercentage,
            format!("{} must be between 0 and 100, got {}", field, value),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an order draft before pricing
pub fn validate_draft(draft: &OrderDraft) -> AppResult<()> {
    // Frame
    let frame = &draft.frame;
    require_amount(frame.list_price, "frame.list_price")?;
    require_amount(frame.allowance, "frame.allowance")?;
    require_percent(frame.discount_percent, "frame.discount_percent")?;
    validate_optional_text(&frame.brand, "frame.brand", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&frame.model, "frame.model", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&frame.color, "frame.color", MAX_SHORT_TEXT_LEN)?;

    // Lenses
    for (category, selection) in &draft.lens_selections {
        if category.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::InvalidLensSelection,
                "lens category key must not be empty",
            ));
        }
        validate_text(category, "lens category", MAX_SHORT_TEXT_LEN)?;
        validate_text(&selection.value, "lens value", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&selection.label, "lens label", MAX_NAME_LEN)?;
        require_amount(selection.regular_price, &format!("lens_selections.{category}.price"))?;
        if let Some(ins) = selection.insurance_price {
            require_amount(ins, &format!("lens_selections.{category}.insurance_price"))?;
        }
    }
    for (column, price) in &draft.legacy_lens_prices {
        require_amount(*price, &format!("legacy_lens_prices.{column}"))?;
    }

    // Warranty
    validate_text(&draft.warranty.kind, "warranty.type", MAX_SHORT_TEXT_LEN)?;
    require_amount(draft.warranty.price, "warranty.price")?;
    if !draft.warranty.is_selected() && draft.warranty.price != 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidWarranty,
            format!(
                "warranty price must be 0 when no warranty is selected, got {}",
                draft.warranty.price
            ),
        )
        .with_detail("field", "warranty.price"));
    }
    if draft.warranty.is_selected() && draft.warranty.price == 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidWarranty,
            format!(
                "warranty \"{}\" is selected but has no price",
                draft.warranty.kind
            ),
        )
        .with_detail("field", "warranty.price"));
    }

    // Copay and adjustments
    require_amount(draft.material_copay, "material_copay")?;
    require_finite(draft.other_charges_adjustment, "other_charges_adjustment")?;
    if draft.other_charges_adjustment.abs() > MAX_PRICE {
        return Err(AppError::invalid_amount(
            "other_charges_adjustment",
            format!(
                "other_charges_adjustment exceeds maximum allowed, got {}",
                draft.other_charges_adjustment
            ),
        ));
    }
    require_percent(draft.other_percent_adjustment, "other_percent_adjustment")?;

    // Other charges and payment
    validate_text(&draft.other_charge_1.kind, "other_charge_1.type", MAX_SHORT_TEXT_LEN)?;
    require_amount(draft.other_charge_1.price, "other_charge_1.price")?;
    validate_text(&draft.other_charge_2.kind, "other_charge_2.type", MAX_SHORT_TEXT_LEN)?;
    require_amount(draft.other_charge_2.price, "other_charge_2.price")?;
    require_amount(draft.payment_today, "payment_today")?;

    Ok(())
}

/// Validate a full save payload (patient fields + draft)
pub fn validate_order_input(input: &OrderInput) -> AppResult<()> {
    if input.patient.name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::PatientRequired).with_detail("field", "patient.name"));
    }
    validate_required_text(&input.patient.name, "patient.name", MAX_NAME_LEN)?;
    validate_optional_text(&input.patient.phone, "patient.phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(
        &input.patient.date_of_birth,
        "patient.date_of_birth",
        MAX_SHORT_TEXT_LEN,
    )?;
    validate_optional_text(&input.doctor, "doctor", MAX_NAME_LEN)?;
    validate_optional_text(&input.employee, "employee", MAX_NAME_LEN)?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;

    if let Some(rx) = &input.prescription {
        for (eye, values) in [("right", &rx.right), ("left", &rx.left)] {
            for (name, value) in [
                ("sphere", values.sphere),
                ("cylinder", values.cylinder),
                ("add", values.add),
            ] {
                if let Some(v) = value {
                    require_finite(v, &format!("prescription.{eye}.{name}"))?;
                }
            }
            if let Some(axis) = values.axis
                && axis > 180
            {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("prescription.{eye}.axis must be between 0 and 180, got {axis}"),
                )
                .with_detail("field", format!("prescription.{eye}.axis")));
            }
        }
        if let Some(pd) = rx.pd {
            require_finite(pd, "prescription.pd")?;
        }
    }

    validate_draft(&input.draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{EyeRx, LensSelection, Patient, Prescription, Warranty};

    fn valid_draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.frame.list_price = 200.0;
        draft.frame.allowance = 50.0;
        draft.frame.discount_percent = 10.0;
        draft.select_lens("lens_type", LensSelection::new("sv", 90.0, Some(60.0)));
        draft.warranty = Warranty::new("1 Year", 35.0);
        draft.other_charges_adjustment = -15.0;
        draft
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&valid_draft()).is_ok());
        assert!(validate_draft(&OrderDraft::default()).is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        let mut draft = valid_draft();
        draft.material_copay = f64::NAN;
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.detail_str("field"), Some("material_copay"));
    }

    #[test]
    fn test_rejects_infinite_adjustment() {
        let mut draft = valid_draft();
        draft.other_charges_adjustment = f64::NEG_INFINITY;
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn test_rejects_negative_lens_price() {
        let mut draft = valid_draft();
        draft.select_lens("tint", LensSelection::new("grey", -5.0, None));
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.detail_str("field"), Some("lens_selections.tint.price"));
    }

    #[test]
    fn test_rejects_percent_out_of_range() {
        let mut draft = valid_draft();
        draft.other_percent_adjustment = 100.5;
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPercentage);

        let mut draft = valid_draft();
        draft.frame.discount_percent = -1.0;
        assert_eq!(
            validate_draft(&draft).unwrap_err().code,
            ErrorCode::InvalidPercentage
        );
    }

    #[test]
    fn test_rejects_priced_none_warranty() {
        let mut draft = valid_draft();
        draft.warranty = Warranty::new("None", 35.0);
        assert_eq!(
            validate_draft(&draft).unwrap_err().code,
            ErrorCode::InvalidWarranty
        );
    }

    #[test]
    fn test_rejects_unpriced_selected_warranty() {
        let mut draft = valid_draft();
        draft.warranty = Warranty::new("1 Year", 0.0);
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWarranty);
        assert_eq!(err.detail_str("field"), Some("warranty.price"));
    }

    #[test]
    fn test_negative_payment_rejected() {
        let mut draft = valid_draft();
        draft.payment_today = -1.0;
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn test_order_input_requires_patient() {
        let input = OrderInput {
            draft: valid_draft(),
            ..Default::default()
        };
        assert_eq!(
            validate_order_input(&input).unwrap_err().code,
            ErrorCode::PatientRequired
        );
    }

    #[test]
    fn test_order_input_checks_axis() {
        let input = OrderInput {
            patient: Patient {
                name: "Jane Doe".into(),
                ..Default::default()
            },
            prescription: Some(Prescription {
                right: EyeRx {
                    sphere: Some(-2.25),
                    cylinder: Some(-0.5),
                    axis: Some(181),
                    add: None,
                },
                ..Default::default()
            }),
            draft: valid_draft(),
            ..Default::default()
        };
        let err = validate_order_input(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.detail_str("field"), Some("prescription.right.axis"));
    }
}
