use casebook::ids::generate_id;
use casebook::lenient::{number, string_list};
use casebook::models::{Admin, AdminRole, Case, CaseDetails, CaseStatus, CaseUpdate, LossType, User, UserPatch};
use casebook::validate::{check_password, is_valid_email, is_valid_phone};
use casebook::{Error, Patch};
use serde_json::json;

fn details() -> CaseDetails {
    CaseDetails {
        company_name: "Acme".into(),
        domain: "Banking".into(),
        incident_date: "2024-01-15".into(),
        description: "charged twice".into(),
        loss_types: vec![LossType::Money, LossType::Time],
        monetary_loss: None,
        contact_name: "Asha".into(),
        contact_email: "asha@example.com".into(),
        contact_phone: "+91 9876543210".into(),
    }
}

// ---- ids --------------------------------------------------------------------

#[test]
fn ids_are_millis_dash_base36() {
    let id = generate_id();
    let (millis, suffix) = id.split_once('-').unwrap();
    assert!(millis.parse::<i64>().unwrap() > 0);
    assert_eq!(suffix.len(), 9);
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(generate_id(), generate_id());
}

// ---- case submission --------------------------------------------------------

#[test]
fn submit_builds_submitted_case() {
    let case = Case::submit("u1", details()).unwrap();
    assert_eq!(case.user_id, "u1");
    assert_eq!(case.status, CaseStatus::Submitted);
    assert_eq!(case.created_at, case.updated_at);
    assert!(case.evidence_files.is_none());
    assert!(!case.id.is_empty());
}

#[test]
fn submit_requires_text_fields() {
    let mut d = details();
    d.company_name = "  ".into();
    match Case::submit("u1", d) {
        Err(Error::Validation(msg)) => assert!(msg.contains("companyName")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn submit_requires_a_loss_type() {
    let mut d = details();
    d.loss_types.clear();
    assert!(matches!(Case::submit("u1", d), Err(Error::Validation(_))));
}

#[test]
fn submit_rejects_negative_or_nan_loss() {
    let mut d = details();
    d.monetary_loss = Some(-1.0);
    assert!(matches!(Case::submit("u1", d.clone()), Err(Error::Validation(_))));
    d.monetary_loss = Some(f64::NAN);
    assert!(matches!(Case::submit("u1", d.clone()), Err(Error::Validation(_))));
    d.monetary_loss = Some(0.0);
    assert!(Case::submit("u1", d).is_ok());
}

#[test]
fn submit_drops_repeated_loss_types() {
    let mut d = details();
    d.loss_types = vec![LossType::Time, LossType::Money, LossType::Time];
    let case = Case::submit("u1", d).unwrap();
    assert_eq!(case.loss_types, vec![LossType::Time, LossType::Money]);
}

// ---- wire shape -------------------------------------------------------------

#[test]
fn case_serializes_camel_case_and_omits_absent_fields() {
    let case = Case::submit("u1", details()).unwrap();
    let v = serde_json::to_value(&case).unwrap();
    assert_eq!(v["userId"], json!("u1"));
    assert_eq!(v["status"], json!("submitted"));
    assert_eq!(v["lossTypes"], json!(["money", "time"]));
    assert!(v.get("monetaryLoss").is_none());
    assert!(v.get("verifiedBy").is_none());
    assert!(v["createdAt"].as_str().unwrap().contains('T'));

    let back: Case = serde_json::from_value(v).unwrap();
    assert_eq!(back, case);
}

#[test]
fn status_and_role_wire_names() {
    assert_eq!(serde_json::to_value(CaseStatus::ScheduledForPodcast).unwrap(), json!("scheduled_for_podcast"));
    assert_eq!(CaseStatus::UnderReview.to_string(), "under_review");
    assert_eq!(serde_json::to_value(AdminRole::SuperAdmin).unwrap(), json!("super_admin"));
    assert_eq!("meeting".parse::<LossType>().unwrap(), LossType::Meeting);
    assert!("refund".parse::<LossType>().is_err());
}

#[test]
fn unknown_loss_type_fails_to_decode() {
    let mut v = serde_json::to_value(Case::submit("u1", details()).unwrap()).unwrap();
    v["lossTypes"] = json!(["money", "karma"]);
    assert!(serde_json::from_value::<Case>(v).is_err());
}

#[test]
fn admin_round_trips() {
    let admin: Admin = serde_json::from_value(json!({
        "id": "a1",
        "email": "ops@example.com",
        "password": "hash",
        "name": "Ops",
        "role": "admin",
        "createdAt": "2024-02-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(admin.role, AdminRole::Admin);
}

#[test]
fn system_updates_are_marked() {
    let update = CaseUpdate::system("c1", "hello");
    assert!(update.is_system());
    assert_eq!(update.created_by, "system");
    assert!(!CaseUpdate::new("c1", "hi", "a1").is_system());
}

// ---- patches ----------------------------------------------------------------

#[test]
fn user_patch_only_touches_set_fields() {
    let user = User::new("a@example.com", "hash", "A", "9876543210");
    let patch = Patch::from_fields(&UserPatch {
        name: Some("Alice".into()),
        ..UserPatch::default()
    })
    .unwrap();
    assert_eq!(patch.fields().len(), 1);

    let merged = patch.apply(&user).unwrap();
    assert_eq!(merged.name, "Alice");
    assert_eq!(merged.email, user.email);
    assert_eq!(merged.created_at, user.created_at);
}

#[test]
fn empty_patch_is_identity() {
    let user = User::new("a@example.com", "hash", "A", "9876543210");
    assert!(Patch::new().is_empty());
    assert_eq!(Patch::new().apply(&user).unwrap(), user);
}

#[test]
fn non_object_patch_is_rejected() {
    assert!(matches!(Patch::from_fields(&vec![1, 2]), Err(Error::Serialize(_))));
}

// ---- lenient decoding -------------------------------------------------------

#[test]
fn string_list_shapes() {
    assert_eq!(string_list(&json!(["a", 1, "b"])), vec!["a", "b"]);
    assert_eq!(string_list(&json!("{a, \"b\" ,c}")), vec!["a", "b", "c"]);
    assert_eq!(string_list(&json!("{}")), Vec::<String>::new());
    assert_eq!(string_list(&json!("[\"x\",\"y\"]")), vec!["x", "y"]);
    assert_eq!(string_list(&json!("x, y,,z")), vec!["x", "y", "z"]);
    assert_eq!(string_list(&json!("[not json")), vec!["[not json"]);
    assert_eq!(string_list(&json!("   ")), Vec::<String>::new());
    assert_eq!(string_list(&json!(42)), Vec::<String>::new());
    assert_eq!(string_list(&json!(null)), Vec::<String>::new());
}

#[test]
fn number_shapes() {
    assert_eq!(number(&json!(12.5)), Ok(Some(12.5)));
    assert_eq!(number(&json!("300")), Ok(Some(300.0)));
    assert_eq!(number(&json!(" ")), Ok(None));
    assert_eq!(number(&json!(null)), Ok(None));
    assert!(number(&json!("lots")).is_err());
    assert!(number(&json!([1])).is_err());
}

// ---- signup checks ----------------------------------------------------------

#[test]
fn well_formed_emails_pass() {
    assert!(is_valid_email("test@example.com"));
    assert!(is_valid_email("user.name@domain.co.uk"));
    assert!(is_valid_email("user+tag@example.com"));
}

#[test]
fn malformed_emails_fail() {
    for bad in ["invalid", "invalid@", "@example.com", "user@", "", "a b@example.com", "a@b@c.com", "user@example.", "user@.com"] {
        assert!(!is_valid_email(bad), "{bad:?} accepted");
    }
}

#[test]
fn phone_numbers_need_ten_digits_and_plain_separators() {
    for good in ["1234567890", "+91 1234567890", "(123) 456-7890", "+1-234-567-8900", "12345678901"] {
        assert!(is_valid_phone(good), "{good:?} rejected");
    }
    for bad in ["123", "abcdefghij", "", "12345", "+", "12345x67890", "123+4567890"] {
        assert!(!is_valid_phone(bad), "{bad:?} accepted");
    }
}

#[test]
fn short_passwords_are_rejected_before_hashing() {
    assert!(matches!(check_password("12345"), Err(Error::Validation(_))));
    assert!(check_password("123456").is_ok());
}

#[test]
fn register_builds_user_from_valid_input() {
    let user = User::register("asha@example.com", "$2a$10$hash", "Asha", "+91 9876543210").unwrap();
    assert_eq!(user.email, "asha@example.com");
    assert_eq!(user.phone, "+91 9876543210");
    let (millis, _) = user.id.split_once('-').unwrap();
    assert!(millis.parse::<u64>().is_ok());
}

#[test]
fn register_rejects_blank_and_malformed_fields() {
    let err = User::register("asha@example.com", "hash", "  ", "9876543210").unwrap_err();
    assert_eq!(err, Error::Validation("name is required".into()));

    let err = User::register("", "hash", "Asha", "9876543210").unwrap_err();
    assert_eq!(err, Error::Validation("email is required".into()));

    let err = User::register("asha.example.com", "hash", "Asha", "9876543210").unwrap_err();
    assert!(err.to_string().contains("invalid email"));

    let err = User::register("asha@example.com", "hash", "Asha", "12345").unwrap_err();
    assert!(err.to_string().contains("invalid phone"));
}
