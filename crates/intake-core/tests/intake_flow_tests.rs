//! End-to-end intake tests: submit, render, delete, persist.

use chrono::{DateTime, Duration, Local, TimeZone};
use patient_intake_core::intake::INPUT_DATE_FORMAT;
use patient_intake_core::{
    Database, EducationLevel, FormInput, Gender, IntakeController, KeyValueStorage, MemoryStorage,
    RecordStore, RemovalOutcome, SubmitOutcome,
};

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn ana() -> FormInput {
    FormInput {
        first_name: "Ana".into(),
        last_name: "Diaz".into(),
        national_id: "12345678".into(),
        phone: "11-2233-4455".into(),
        birth_date: "2010-05-01".into(),
        consult_reason: String::new(),
        grade_level: "5".into(),
        education_level: "Primario".into(),
        gender: "Femenino".into(),
    }
}

fn patient(national_id: &str, first_name: &str) -> FormInput {
    FormInput {
        national_id: national_id.into(),
        first_name: first_name.into(),
        ..ana()
    }
}

fn memory_controller() -> IntakeController<MemoryStorage> {
    IntakeController::new(RecordStore::new(MemoryStorage::new()))
}

fn slot<S: KeyValueStorage>(controller: &IntakeController<S>) -> Option<String> {
    controller.store().storage().get_item("pacientes").unwrap()
}

#[test]
fn test_example_patient_is_stored_and_rendered() {
    let mut c = memory_controller();

    let outcome = c.submit_at(&ana(), now()).unwrap();
    assert!(outcome.is_accepted());

    let records = c.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].first_name, "Ana");
    assert_eq!(records[0].education_level, EducationLevel::Primario);
    assert_eq!(records[0].gender, Gender::Femenino);

    let table = c.render_table().unwrap();
    assert!(table.visible);
    assert_eq!(
        table.rows[0].to_string(),
        "Diaz, Ana | 12345678 | 11-2233-4455 | 01/05/2010 | 5 | Primario | Femenino"
    );
}

#[test]
fn test_stored_fields_are_trimmed_inputs() {
    let mut c = memory_controller();
    let input = FormInput {
        first_name: " Ana ".into(),
        last_name: " Diaz ".into(),
        national_id: " 12345678 ".into(),
        phone: " 11-2233-4455 ".into(),
        consult_reason: " Control de rutina ".into(),
        gender: " Prefiere no decir ".into(),
        ..ana()
    };

    c.submit_at(&input, now()).unwrap();

    let record = &c.records().unwrap()[0];
    assert_eq!(record.first_name, "Ana");
    assert_eq!(record.last_name, "Diaz");
    assert_eq!(record.national_id, "12345678");
    assert_eq!(record.phone, "11-2233-4455");
    assert_eq!(record.consult_reason, "Control de rutina");
    assert_eq!(record.gender, Gender::PrefiereNoDecir);
}

#[test]
fn test_short_national_id_rejected_without_store_change() {
    let mut c = memory_controller();
    c.submit_at(&patient("7654321", "Juan"), now()).unwrap();
    let before = slot(&c);

    let outcome = c.submit_at(&patient("123", "Ana"), now()).unwrap();

    assert_eq!(outcome.message(), "DNI inválido: usar 7 u 8 dígitos.");
    assert_eq!(slot(&c), before);
}

#[test]
fn test_tomorrow_birth_date_rejected() {
    let mut c = memory_controller();
    let tomorrow = now().date_naive() + Duration::days(1);
    let input = FormInput {
        birth_date: tomorrow.format(INPUT_DATE_FORMAT).to_string(),
        ..ana()
    };

    let outcome = c.submit_at(&input, now()).unwrap();

    assert_eq!(outcome.message(), "La fecha de nacimiento debe ser pasada.");
    assert_eq!(slot(&c), None);
}

#[test]
fn test_birth_date_today_accepted() {
    let mut c = memory_controller();
    let input = FormInput {
        birth_date: now().date_naive().format(INPUT_DATE_FORMAT).to_string(),
        ..ana()
    };

    assert!(c.submit_at(&input, now()).unwrap().is_accepted());
}

#[test]
fn test_repeated_rejection_is_idempotent() {
    let mut c = memory_controller();
    let bad = FormInput {
        education_level: "Posgrado".into(),
        ..ana()
    };

    for _ in 0..3 {
        let outcome = c.submit_at(&bad, now()).unwrap();
        assert_eq!(outcome.message(), "Seleccioná un nivel educativo válido.");
    }
    assert_eq!(slot(&c), None);
}

#[test]
fn test_duplicate_national_id_keeps_single_record() {
    let mut c = memory_controller();

    let first = c.submit_at(&patient("12345678", "Ana"), now()).unwrap();
    let second = c.submit_at(&patient("12345678", "Beatriz"), now()).unwrap();

    assert!(first.is_accepted());
    assert!(matches!(second, SubmitOutcome::Rejected(_)));
    assert_eq!(second.message(), "Ya existe un paciente con ese DNI.");

    let records = c.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].first_name, "Ana");
}

#[test]
fn test_records_kept_in_submission_order() {
    let mut c = memory_controller();
    for (id, name) in [("11111111", "Uno"), ("2222222", "Dos"), ("33333333", "Tres")] {
        c.submit_at(&patient(id, name), now()).unwrap();
    }

    let ids: Vec<String> = c
        .render_table()
        .unwrap()
        .rows
        .into_iter()
        .map(|r| r.national_id)
        .collect();
    assert_eq!(ids, vec!["11111111", "2222222", "33333333"]);
}

#[test]
fn test_delete_removes_only_matching_record() {
    let mut c = memory_controller();
    c.submit_at(&patient("11111111", "Uno"), now()).unwrap();
    c.submit_at(&patient("22222222", "Dos"), now()).unwrap();
    c.submit_at(&patient("33333333", "Tres"), now()).unwrap();
    let survivors_before: Vec<_> = c
        .records()
        .unwrap()
        .into_iter()
        .filter(|r| r.national_id != "22222222")
        .collect();

    let outcome = c.delete_record("22222222", &mut |_: &str| true).unwrap();

    assert!(matches!(outcome, RemovalOutcome::Removed { count: 1, .. }));
    assert_eq!(c.records().unwrap(), survivors_before);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut c = memory_controller();
    c.submit_at(&ana(), now()).unwrap();
    let before = slot(&c);

    let outcome = c.delete_record("99999999", &mut |_: &str| true).unwrap();

    assert!(matches!(outcome, RemovalOutcome::Removed { count: 0, .. }));
    assert_eq!(slot(&c), before);
}

#[test]
fn test_declined_delete_leaves_table_alone() {
    let mut c = memory_controller();
    c.submit_at(&ana(), now()).unwrap();

    let outcome = c.delete_record("12345678", &mut |_: &str| false).unwrap();

    assert_eq!(outcome, RemovalOutcome::Declined);
    assert_eq!(c.render_table().unwrap().rows.len(), 1);
}

#[test]
fn test_deleting_last_record_hides_table() {
    let mut c = memory_controller();
    c.submit_at(&ana(), now()).unwrap();

    c.delete_record("12345678", &mut |_: &str| true).unwrap();

    let table = c.render_table().unwrap();
    assert!(!table.visible);
    assert!(table.rows.is_empty());
}

#[test]
fn test_records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.db");

    {
        let mut c = IntakeController::new(RecordStore::new(Database::open(&path).unwrap()));
        c.submit_at(&patient("12345678", "Ana"), now()).unwrap();
        c.submit_at(&patient("7654321", "Juan"), now()).unwrap();
    }

    let mut c = IntakeController::new(RecordStore::new(Database::open(&path).unwrap()));
    assert_eq!(c.records().unwrap().len(), 2);

    let outcome = c.submit_at(&patient("7654321", "Otro"), now()).unwrap();
    assert!(!outcome.is_accepted());
}

#[test]
fn test_save_of_loaded_collection_is_noop() {
    let mut c = IntakeController::new(RecordStore::new(Database::open_in_memory().unwrap()));
    c.submit_at(&patient("12345678", "Ana"), now()).unwrap();
    c.submit_at(&patient("7654321", "Juan"), now()).unwrap();
    let mut store = c.into_store();

    let before = store.storage().get_item("pacientes").unwrap();
    let loaded = store.load().unwrap();
    store.save(&loaded).unwrap();

    assert_eq!(store.storage().get_item("pacientes").unwrap(), before);
}
