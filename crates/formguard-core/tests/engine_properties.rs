use formguard_core::{
    validate_fields, CnpjPolicy, KeyBinding, RuleKind, Schema, Validator, ValidatorConfig,
    ValueBag, HAS_ERROR_KEY,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn rule_strategy() -> impl Strategy<Value = RuleKind> {
    prop_oneof![
        Just(RuleKind::Required),
        Just(RuleKind::Email),
        Just(RuleKind::Cpf),
        Just(RuleKind::Cnpj),
        Just(RuleKind::ToBeTrue),
        Just(RuleKind::ConfirmPassword),
        "[a-zA-Z_]{1,12}".prop_map(RuleKind::from),
    ]
}

fn raw_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6..1.0e6f64).prop_map(|f| json!(f)),
        "[0-9./-]{0,20}".prop_map(Value::String),
        ".{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("cpf".to_string()),
        Just("cnpj".to_string()),
        Just("email".to_string()),
        Just("password".to_string()),
        Just("confirm_password".to_string()),
        "[a-z]{1,8}",
    ]
}

fn schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::btree_map(field_name_strategy(), rule_strategy(), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

fn bag_strategy() -> impl Strategy<Value = ValueBag> {
    prop::collection::btree_map(field_name_strategy(), raw_value_strategy(), 0..8)
}

fn config_strategy() -> impl Strategy<Value = ValidatorConfig> {
    (
        prop_oneof![Just(KeyBinding::Fixed), Just(KeyBinding::FieldName)],
        prop_oneof![Just(CnpjPolicy::Lenient), Just(CnpjPolicy::Strict)],
    )
        .prop_map(|(key_binding, cnpj_policy)| ValidatorConfig {
            key_binding,
            cnpj_policy,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every schema field gets exactly one flag, and nothing else appears.
    #[test]
    fn prop_report_covers_schema_exactly(
        schema in schema_strategy(),
        values in bag_strategy(),
        config in config_strategy(),
    ) {
        let report = Validator::new(config).validate(&schema, &values);

        prop_assert_eq!(report.len(), schema.len());
        for (field, _) in schema.iter() {
            prop_assert!(report.get(field).is_some());
        }

        let serialized = serde_json::to_value(&report).unwrap();
        let object = serialized.as_object().unwrap();
        prop_assert_eq!(object.len(), schema.len() + 1);
        prop_assert!(object[HAS_ERROR_KEY].is_boolean());
    }

    /// `hasError` is the OR of the field flags.
    #[test]
    fn prop_has_error_is_disjunction(
        schema in schema_strategy(),
        values in bag_strategy(),
        config in config_strategy(),
    ) {
        let report = Validator::new(config).validate(&schema, &values);
        let any_invalid = report.fields().values().any(|invalid| *invalid);
        prop_assert_eq!(report.has_error(), any_invalid);
    }

    /// Repeated calls with identical input give identical reports.
    #[test]
    fn prop_validation_is_idempotent(
        schema in schema_strategy(),
        values in bag_strategy(),
    ) {
        let first = validate_fields(&schema, &values);
        let second = validate_fields(&schema, &values);
        prop_assert_eq!(first, second);
    }

    /// Lenient CNPJ never flags input without exactly fourteen digits.
    #[test]
    fn prop_lenient_cnpj_ignores_wrong_length(digits in "[0-9]{0,13}|[0-9]{15,20}") {
        let schema = Schema::new().field("cnpj", "cnpj");
        let values: ValueBag = [("cnpj".to_string(), json!(digits))].into_iter().collect();
        prop_assert!(!validate_fields(&schema, &values).has_error());
    }

    /// CPF input with fewer than eleven digits is always invalid.
    #[test]
    fn prop_short_cpf_is_invalid(digits in "[0-9]{0,10}") {
        prop_assert!(!formguard_core::is_valid_cpf(&digits));
    }
}

#[test]
fn unknown_rule_fallback_matches_truthiness() {
    let schema = Schema::from_json(r#"{"x": "bogus"}"#).unwrap();

    let accepted: ValueBag = [("x".to_string(), json!(true))].into_iter().collect();
    assert_eq!(
        serde_json::to_value(validate_fields(&schema, &accepted)).unwrap(),
        json!({ "x": false, "hasError": false })
    );

    let refused: ValueBag = [("x".to_string(), json!(false))].into_iter().collect();
    assert_eq!(
        serde_json::to_value(validate_fields(&schema, &refused)).unwrap(),
        json!({ "x": true, "hasError": true })
    );
}

#[test]
fn document_options_drive_validation() {
    let schema = Schema::from_yaml(
        r#"
fields:
  company: cnpj
options:
  key_binding: field_name
  cnpj_policy: strict
"#,
    )
    .unwrap();

    let values: ValueBag = [("company".to_string(), json!("11.111.111/1111-11"))]
        .into_iter()
        .collect();
    let report = validate_fields(&schema, &values);
    assert_eq!(report.get("company"), Some(true));
}

#[test]
fn demo_signup_passes() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let schema = Schema::from_yaml_file(root.join("signup.yaml")).unwrap();
    let raw = std::fs::read_to_string(root.join("signup-values.json")).unwrap();
    let values: ValueBag = serde_json::from_str(&raw).unwrap();

    let report = validate_fields(&schema, &values);
    assert_eq!(report.len(), 6);
    assert!(!report.has_error(), "unexpected report: {:?}", report);
}
