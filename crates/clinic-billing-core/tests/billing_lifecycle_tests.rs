//! Billing lifecycle integration tests.

use chrono::NaiveDate;
use clinic_billing_core::{
    BillStatus, DiscountMode, DraftBill, Engine, EngineError, MemoryStore, NewMedicine, Patient,
    PaymentMethod, StaticPatients, Store,
};
use rust_decimal::Decimal;

fn setup_engine() -> Engine {
    let patients = StaticPatients::new(vec![Patient {
        id: 1,
        name: "Ahmed Khan".into(),
        cnic: "35202-1234567-1".into(),
        phone: "0300-1234567".into(),
        age: 42,
        gender: "Male".into(),
    }]);
    Engine::open(Box::new(MemoryStore::new()), Box::new(patients)).unwrap()
}

fn paracetamol() -> NewMedicine {
    NewMedicine {
        name: "Paracetamol 500mg".into(),
        generic_name: "Paracetamol".into(),
        category: "Pain Relief".into(),
        manufacturer: "Generic Manufacturer".into(),
        batch_number: "PARA-2024-001".into(),
        expiry_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        unit_price: Decimal::new(200, 2),
        retail_price: Decimal::new(300, 2),
        discount: Decimal::ZERO,
        tax_rate: Decimal::from(17u32),
        quantity: 100,
        min_stock: 20,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn paracetamol_line_reserves_stock_and_prices() {
    let mut engine = setup_engine();
    let medicine = engine.add_medicine(paracetamol()).unwrap();

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 10).unwrap();

    assert_eq!(engine.get_medicine(medicine.id).unwrap().quantity, 90);
    let line = &draft.items[0];
    assert_eq!(line.total, Decimal::new(3000, 2));
    assert_eq!(line.tax_amount(), Decimal::new(510, 2));
}

#[test]
fn oversized_line_rejected_without_mutation() {
    let mut engine = setup_engine();
    let medicine = engine.add_medicine(paracetamol()).unwrap();

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 10).unwrap();

    // Stock now 90; requesting 150 must fail and leave it at 90
    let err = engine
        .add_medicine_line(&mut draft, medicine.id, 150)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientStock {
            requested: 150,
            available: 90,
            ..
        }
    ));
    assert_eq!(engine.get_medicine(medicine.id).unwrap().quantity, 90);
    assert_eq!(draft.items.len(), 1);
}

#[test]
fn tax_computed_on_pre_discount_subtotal() {
    let mut engine = setup_engine();
    let mut medicine = paracetamol();
    medicine.name = "Flat Hundred".into();
    medicine.retail_price = Decimal::new(10000, 2);
    medicine.unit_price = Decimal::new(9000, 2);
    let medicine = engine.add_medicine(medicine).unwrap();

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 1).unwrap();
    draft.discount_mode = DiscountMode::Fixed(Decimal::new(1000, 2));

    let bill = engine.create_bill(draft, date()).unwrap();
    assert_eq!(bill.amount, Decimal::new(10000, 2));
    assert_eq!(bill.discount, Decimal::new(1000, 2));
    // 17% of 100.00, not of the discounted 90.00
    assert_eq!(bill.tax, Decimal::new(1700, 2));
    assert_eq!(bill.total, Decimal::new(10700, 2));
}

#[test]
fn full_payment_settles_and_closes_the_bill() {
    let mut engine = setup_engine();
    let mut medicine = paracetamol();
    medicine.name = "Flat Hundred".into();
    medicine.retail_price = Decimal::new(10000, 2);
    medicine.unit_price = Decimal::new(9000, 2);
    let medicine = engine.add_medicine(medicine).unwrap();

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 1).unwrap();
    draft.discount_mode = DiscountMode::Fixed(Decimal::new(1000, 2));
    let bill = engine.create_bill(draft, date()).unwrap();
    assert_eq!(bill.total, Decimal::new(10700, 2));

    let paid = engine
        .record_payment(bill.id, Decimal::new(10700, 2), PaymentMethod::Cash)
        .unwrap();
    assert_eq!(paid.status, BillStatus::Paid);
    assert_eq!(paid.paid_amount, Decimal::new(10700, 2));

    let err = engine
        .record_payment(bill.id, Decimal::ONE, PaymentMethod::Cash)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPayment(_)));
}

#[test]
fn percentage_discount_resolved_at_commit() {
    let mut engine = setup_engine();
    let mut draft = DraftBill::for_patient(1);
    // Doctor Consultation: 150.00 at 17% tax
    engine.add_service_line(&mut draft, 1).unwrap();
    draft.discount_mode = DiscountMode::Percentage(Decimal::from(10u32));

    let bill = engine.create_bill(draft, date()).unwrap();
    assert_eq!(bill.discount, Decimal::new(1500, 2));
    assert_eq!(bill.total, bill.amount - bill.discount + bill.tax);
}

#[test]
fn invalid_discount_aborts_commit_without_persisting() {
    let mut engine = setup_engine();
    let mut draft = DraftBill::for_patient(1);
    engine.add_service_line(&mut draft, 1).unwrap();
    draft.discount_mode = DiscountMode::Percentage(Decimal::from(150u32));

    let err = engine.create_bill(draft, date()).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(engine.bills().is_empty());
}

#[test]
fn draft_discard_restores_ledger_exactly() {
    let mut engine = setup_engine();
    let medicine = engine.add_medicine(paracetamol()).unwrap();
    let before = engine.get_medicine(medicine.id).unwrap().quantity;

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 10).unwrap();
    engine.add_medicine_line(&mut draft, medicine.id, 5).unwrap();
    engine.update_line_quantity(&mut draft, 0, 40).unwrap();
    engine.remove_line(&mut draft, 1).unwrap();
    assert_ne!(engine.get_medicine(medicine.id).unwrap().quantity, before);

    engine.discard_draft(draft).unwrap();
    assert_eq!(engine.get_medicine(medicine.id).unwrap().quantity, before);
}

#[test]
fn remove_all_lines_in_any_order_restores_ledger() {
    let mut engine = setup_engine();
    let medicine = engine.add_medicine(paracetamol()).unwrap();
    let before = engine.get_medicine(medicine.id).unwrap().quantity;

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 7).unwrap();
    engine.add_medicine_line(&mut draft, medicine.id, 11).unwrap();
    engine.add_medicine_line(&mut draft, medicine.id, 13).unwrap();

    // Middle, last, first
    engine.remove_line(&mut draft, 1).unwrap();
    engine.remove_line(&mut draft, 1).unwrap();
    engine.remove_line(&mut draft, 0).unwrap();

    assert_eq!(engine.get_medicine(medicine.id).unwrap().quantity, before);
    assert!(draft.items.is_empty());
}

#[test]
fn commit_makes_reservation_final() {
    let mut engine = setup_engine();
    let medicine = engine.add_medicine(paracetamol()).unwrap();

    let mut draft = DraftBill::for_patient(1);
    engine.add_medicine_line(&mut draft, medicine.id, 25).unwrap();
    engine.create_bill(draft, date()).unwrap();

    assert_eq!(engine.get_medicine(medicine.id).unwrap().quantity, 75);
}

#[test]
fn dual_payment_paths_stay_distinct() {
    let mut engine = setup_engine();
    let mut draft = DraftBill::for_patient(1);
    engine.add_service_line(&mut draft, 1).unwrap();
    let bill = engine.create_bill(draft, date()).unwrap();

    // Quick-settle flips the status but tracks no money
    let settled = engine.update_status(bill.id, BillStatus::Paid).unwrap();
    assert_eq!(settled.status, BillStatus::Paid);
    assert_eq!(settled.paid_amount, Decimal::ZERO);

    // The reconciled path refuses to pay a settled bill
    let err = engine
        .record_payment(bill.id, Decimal::ONE, PaymentMethod::Cash)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPayment(_)));
}

#[test]
fn invoice_numbers_follow_bill_count() {
    let mut engine = setup_engine();
    for expected in ["INV-2024-001", "INV-2024-002", "INV-2024-003"] {
        let mut draft = DraftBill::for_patient(1);
        engine.add_service_line(&mut draft, 2).unwrap();
        let bill = engine.create_bill(draft, date()).unwrap();
        assert_eq!(bill.invoice_number, expected);
    }
}

#[test]
fn payments_survive_store_round_trip() {
    let mut store = MemoryStore::new();
    let bill_id;
    {
        let mut engine =
            Engine::open(Box::new(MemoryStore::new()), Box::new(StaticPatients::empty()))
                .unwrap();
        let mut draft = DraftBill::for_patient(9);
        engine.add_service_line(&mut draft, 3).unwrap();
        let bill = engine.create_bill(draft, date()).unwrap();
        engine
            .record_payment(bill.id, Decimal::new(10000, 2), PaymentMethod::BankTransfer)
            .unwrap();
        bill_id = bill.id;
        store.save_bills(engine.bills()).unwrap();
        store.save_medicines(engine.medicines()).unwrap();
    }

    let engine = Engine::open(Box::new(store), Box::new(StaticPatients::empty())).unwrap();
    let bill = engine.get_bill(bill_id).unwrap();
    assert_eq!(bill.paid_amount, Decimal::new(10000, 2));
    assert_eq!(bill.status, BillStatus::PartiallyPaid);
    assert_eq!(bill.payment_method, PaymentMethod::BankTransfer);
}
