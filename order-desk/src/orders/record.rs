//! OrderRecord <-> OrderDraft mapping
//!
//! A record stores each draft input in its own column, the lens
//! selections as JSON text, and the computed breakdown flattened next to
//! them. The breakdown columns are always produced by the calculator,
//! never taken from the caller.

use shared::{
    AppError, AppResult, ErrorCode, FrameInput, LensSelections, OrderDraft, OrderInput,
    OrderRecord, OtherCharge, Patient, PriceBreakdown, Warranty,
};

/// Identity columns of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    pub id: String,
    pub order_number: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Encode lens selections for the `lens_selections` column
pub fn encode_lens_selections(selections: &LensSelections) -> AppResult<String> {
    serde_json::to_string(selections).map_err(|e| {
        AppError::with_message(
            ErrorCode::InternalError,
            format!("Failed to encode lens selections: {e}"),
        )
    })
}

/// Decode the `lens_selections` column
///
/// Empty text (rows written before any lens was chosen) decodes to an
/// empty mapping.
pub fn decode_lens_selections(raw: &str) -> AppResult<LensSelections> {
    if raw.trim().is_empty() {
        return Ok(LensSelections::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        AppError::with_message(
            ErrorCode::LensSelectionsCorrupted,
            format!("Failed to decode lens selections: {e}"),
        )
    })
}

/// Build a record from a save payload and its freshly computed breakdown
pub fn build_record(
    meta: RecordMeta,
    input: &OrderInput,
    pricing: PriceBreakdown,
) -> AppResult<OrderRecord> {
    let draft = &input.draft;
    Ok(OrderRecord {
        id: meta.id,
        order_number: meta.order_number,
        created_at: meta.created_at,
        updated_at: meta.updated_at,

        patient_name: input.patient.name.trim().to_string(),
        patient_phone: input.patient.phone.clone(),
        patient_dob: input.patient.date_of_birth.clone(),
        doctor: input.doctor.clone(),
        employee: input.employee.clone(),
        prescription: input.prescription.clone(),
        notes: input.notes.clone(),

        frame_brand: draft.frame.brand.clone(),
        frame_model: draft.frame.model.clone(),
        frame_color: draft.frame.color.clone(),
        frame_list_price: draft.frame.list_price,
        frame_allowance: draft.frame.allowance,
        frame_discount_percent: draft.frame.discount_percent,
        uses_own_frame: draft.frame.uses_own_frame,

        lens_selections: encode_lens_selections(&draft.lens_selections)?,
        legacy_lens_prices: draft.legacy_lens_prices.clone(),

        warranty_type: draft.warranty.kind.clone(),
        warranty_price: draft.warranty.price,
        material_copay: draft.material_copay,
        other_charges_adjustment: draft.other_charges_adjustment,
        other_percent_adjustment: draft.other_percent_adjustment,
        iwellness_selected: draft.iwellness_selected,
        other_charge_1_type: draft.other_charge_1.kind.clone(),
        other_charge_1_price: draft.other_charge_1.price,
        other_charge_2_type: draft.other_charge_2.kind.clone(),
        other_charge_2_price: draft.other_charge_2.price,
        payment_today: draft.payment_today,

        pricing,
    })
}

/// Rebuild the pricing draft stored in a record
pub fn draft_from_record(record: &OrderRecord) -> AppResult<OrderDraft> {
    Ok(OrderDraft {
        frame: FrameInput {
            list_price: record.frame_list_price,
            allowance: record.frame_allowance,
            discount_percent: record.frame_discount_percent,
            uses_own_frame: record.uses_own_frame,
            brand: record.frame_brand.clone(),
            model: record.frame_model.clone(),
            color: record.frame_color.clone(),
        },
        lens_selections: decode_lens_selections(&record.lens_selections)?,
        warranty: Warranty::new(record.warranty_type.clone(), record.warranty_price),
        material_copay: record.material_copay,
        other_charges_adjustment: record.other_charges_adjustment,
        other_percent_adjustment: record.other_percent_adjustment,
        iwellness_selected: record.iwellness_selected,
        other_charge_1: OtherCharge::new(record.other_charge_1_type.clone(), record.other_charge_1_price),
        other_charge_2: OtherCharge::new(record.other_charge_2_type.clone(), record.other_charge_2_price),
        payment_today: record.payment_today,
        legacy_lens_prices: record.legacy_lens_prices.clone(),
    })
}

/// Rebuild the full save payload stored in a record
pub fn input_from_record(record: &OrderRecord) -> AppResult<OrderInput> {
    Ok(OrderInput {
        patient: Patient {
            name: record.patient_name.clone(),
            phone: record.patient_phone.clone(),
            date_of_birth: record.patient_dob.clone(),
        },
        doctor: record.doctor.clone(),
        employee: record.employee.clone(),
        prescription: record.prescription.clone(),
        notes: record.notes.clone(),
        draft: draft_from_record(record)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_pricing;
    use shared::LensSelection;

    fn sample_input() -> OrderInput {
        let mut draft = OrderDraft::default();
        draft.frame.list_price = 200.0;
        draft.frame.allowance = 50.0;
        draft.frame.discount_percent = 10.0;
        draft.frame.brand = Some("Ray-Ban".into());
        draft.select_lens(
            "lens_type",
            LensSelection::new("progressive", 150.0, Some(100.0)).with_label("Progressive"),
        );
        draft.select_lens("tint", LensSelection::new("grey", 25.0, None));
        draft.warranty = Warranty::new("1 Year", 35.0);
        draft.material_copay = 20.0;
        draft.payment_today = 100.0;
        OrderInput {
            patient: Patient {
                name: "  Jane Doe ".into(),
                phone: Some("555-0100".into()),
                date_of_birth: None,
            },
            doctor: Some("Dr. Lee".into()),
            draft,
            ..Default::default()
        }
    }

    fn meta() -> RecordMeta {
        RecordMeta {
            id: "order-1".into(),
            order_number: 7,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_lens_column_uses_persisted_shape() {
        let input = sample_input();
        let record = build_record(meta(), &input, compute_pricing(&input.draft)).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&record.lens_selections).unwrap();
        assert_eq!(raw["lens_type"]["value"], "progressive");
        assert_eq!(raw["lens_type"]["price"], 150.0);
        assert_eq!(raw["lens_type"]["insurance_price"], 100.0);
        assert_eq!(raw["lens_type"]["label"], "Progressive");
        assert!(raw["tint"]["insurance_price"].is_null());
    }

    #[test]
    fn test_record_restores_draft() {
        let input = sample_input();
        let record = build_record(meta(), &input, compute_pricing(&input.draft)).unwrap();
        assert_eq!(record.patient_name, "Jane Doe");
        assert_eq!(draft_from_record(&record).unwrap(), input.draft);

        let restored = input_from_record(&record).unwrap();
        assert_eq!(restored.doctor.as_deref(), Some("Dr. Lee"));
        assert_eq!(restored.patient.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_breakdown_columns_are_flat() {
        let input = sample_input();
        let record = build_record(meta(), &input, compute_pricing(&input.draft)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["final_frame_price"], 135.0);
        assert_eq!(json["balance_due_regular"], record.pricing.balance_due_regular);
        assert!(json.get("pricing").is_none());

        let back: OrderRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_decode_empty_and_corrupt_column() {
        assert!(decode_lens_selections("").unwrap().is_empty());
        let err = decode_lens_selections("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::LensSelectionsCorrupted);
    }
}
