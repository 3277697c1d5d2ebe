use super::*;

#[test]
fn test_kind_keywords_round_trip() {
    for kind in OperationKind::ALL {
        assert_eq!(kind.as_str().parse::<OperationKind>(), Ok(kind));
    }
    assert!("add_menu".parse::<OperationKind>().is_err());
}

#[test]
fn test_option_value_from_yaml() {
    let v: serde_yaml::Value = serde_yaml::from_str("[~, true, 3, text, 1.5, [a]]").unwrap();
    let seq = v.as_sequence().unwrap();
    assert_eq!(OptionValue::from_yaml(&seq[0]), Some(OptionValue::Null));
    assert_eq!(OptionValue::from_yaml(&seq[1]), Some(OptionValue::Bool(true)));
    assert_eq!(OptionValue::from_yaml(&seq[2]), Some(OptionValue::Int(3)));
    assert_eq!(
        OptionValue::from_yaml(&seq[3]),
        Some(OptionValue::Str("text".into()))
    );
    assert_eq!(OptionValue::from_yaml(&seq[4]), None);
    assert_eq!(OptionValue::from_yaml(&seq[5]), None);
}

#[test]
fn test_check_keys_rejects_typo() {
    let op = Operation::new(OperationKind::AddProgram, "Prog")
        .option("functional_area", "Func")
        .option("sequ", 2);
    let err = op.check_keys(&["functional_area", "seq"]).unwrap_err();
    assert!(matches!(err, CoreError::UnknownOption { ref key, .. } if key == "sequ"));
    assert!(err.is_validation_error());
}

#[test]
fn test_require_str_missing_and_null() {
    let op = Operation::new(OperationKind::DropProgram, "Prog");
    assert!(matches!(
        op.require_str("functional_area"),
        Err(CoreError::MissingOption { .. })
    ));

    let op = op.option("functional_area", None::<&str>);
    assert!(matches!(
        op.require_str("functional_area"),
        Err(CoreError::NullOption { .. })
    ));
}

#[test]
fn test_nullable_str_distinguishes_absent_from_null() {
    let op = Operation::new(OperationKind::ChangeProgramFunction, "Fn").option("group", None::<&str>);
    assert_eq!(op.nullable_str("group").unwrap(), Some(None));
    assert_eq!(op.nullable_str("hide_if_const_true").unwrap(), None);
}

#[test]
fn test_wrong_types_rejected() {
    let op = Operation::new(OperationKind::AddProgram, "Prog")
        .option("seq", "one")
        .option("functional_area", true);
    assert!(matches!(
        op.int_opt("seq"),
        Err(CoreError::InvalidOptionType { expected: "an integer", .. })
    ));
    assert!(matches!(
        op.require_str("functional_area"),
        Err(CoreError::InvalidOptionType { expected: "a string", .. })
    ));
}

#[test]
fn test_count_options_ignores_listed_keys() {
    let op = Operation::new(OperationKind::ChangeProgramFunction, "Fn")
        .option("functional_area", "F")
        .option("program", "P")
        .option("match_group", "G");
    assert_eq!(op.count_options(&[]), 3);
    assert_eq!(op.count_options(&["match_group"]), 2);
}
