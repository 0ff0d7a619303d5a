use super::{EntityDef, FieldSpec};
use common::model::field::FieldKind::{Boolean, Date, Decimal, Text};

static FIELDS: [FieldSpec; 34] = [
    FieldSpec::aliased("s_no", Text, &["srno", "slno"]),
    FieldSpec::new("job_no", Text),
    FieldSpec::new("shipper_name", Text),
    FieldSpec::aliased("invoice_no_dt", Text, &["invoicenodate", "invoiceno"]),
    FieldSpec::new("forwarder_name", Text),
    FieldSpec::aliased("currency_fc", Text, &["currency"]),
    FieldSpec::aliased("invoice_value", Decimal, &["fcvalue", "invoicevaluefc"]),
    FieldSpec::new("description", Text),
    FieldSpec::aliased("hbl_no_dt", Text, &["hblnodate", "hblno"]),
    FieldSpec::aliased("mbl_no_dt", Text, &["mblnodate", "mblno"]),
    FieldSpec::aliased("shipping_line", Text, &["sline"]),
    FieldSpec::aliased("pol", Text, &["polportofloading", "portofloading"]),
    FieldSpec::new("terms", Text),
    FieldSpec::aliased("container_nos", Text, &["containerno"]),
    FieldSpec::aliased("container_size", Text, &["size"]),
    FieldSpec::aliased("nn_copy_rcvd", Boolean, &["nncopyreceived"]),
    FieldSpec::aliased("original_docs_rcvd", Boolean, &["originaldocsreceived"]),
    FieldSpec::new("arrival_status", Text),
    FieldSpec::new("ro_date", Date),
    FieldSpec::aliased("do_status_validity", Date, &["dostatus", "dovalidity"]),
    FieldSpec::new("be_no", Text),
    FieldSpec::new("be_date", Date),
    FieldSpec::aliased("assess_date", Date, &["assessmentdate"]),
    FieldSpec::new("hs_code", Text),
    FieldSpec::aliased("ass_value_inr", Decimal, &["assessedvalue", "assvalue"]),
    FieldSpec::new("duty_paid", Decimal),
    FieldSpec::new("ooc_date", Date),
    FieldSpec::new("destuffed_date", Date),
    FieldSpec::aliased("security_amt_rs", Decimal, &["securityamount", "securityamt"]),
    FieldSpec::new("security_payment_date", Date),
    FieldSpec::new("mode_of_payment", Text),
    FieldSpec::new("security_receipt_no", Text),
    FieldSpec::new("security_receipt_date", Date),
    FieldSpec::new("remarks", Text),
];

pub static IMPORT: EntityDef = EntityDef {
    table: "import_data",
    label: "Import",
    sheet_name: "Import Data",
    fields: &FIELDS,
    expected_headers: &[
        "S/No",
        "Job No",
        "Shipper Name",
        "Invoice No & Date",
        "FC Value",
        "Description",
        "Forwarder Name",
        "HBL No & Date",
        "MBL No & Date",
        "Shipping Line",
        "POL - Port of Loading",
        "Terms",
        "Container Nos",
        "Size",
        "N.N Copy Received",
        "Original Docs Received",
        "Arrival Status",
        "R/O Date",
        "DO Status",
        "BE No",
        "BE Date",
        "Assessment Date",
        "HS Code",
        "Assessed Value",
        "Duty Paid",
        "OOC Date",
        "Destuffed Date",
        "Remarks",
    ],
};
