use super::{EntityDef, FieldSpec};
use common::model::field::FieldKind::{Date, Decimal, Text};

static FIELDS: [FieldSpec; 27] = [
    FieldSpec::aliased("s_no", Text, &["srno", "slno"]),
    FieldSpec::new("job_no", Text),
    FieldSpec::aliased("inv_no", Text, &["invoiceno"]),
    FieldSpec::aliased("inv_date", Date, &["date", "invoicedate"]),
    FieldSpec::aliased("s_bill_no", Text, &["shippingbillno"]),
    FieldSpec::aliased("s_bill_date", Date, &["shippingbilldate"]),
    FieldSpec::new("leo_date", Date),
    FieldSpec::new("forwarder_name", Text),
    FieldSpec::new("booking_no", Text),
    FieldSpec::aliased("contr_no", Text, &["containerno"]),
    FieldSpec::aliased("size", Text, &["containersize"]),
    FieldSpec::aliased("shipping_line", Text, &["sline"]),
    FieldSpec::new("pod", Text),
    FieldSpec::new("train_no", Text),
    FieldSpec::new("wagon_no", Text),
    FieldSpec::aliased("train_wagon_date", Date, &["wagondate"]),
    FieldSpec::new("reward", Text),
    FieldSpec::aliased("inv_value_fc", Decimal, &["invvalue", "invoicevalue"]),
    FieldSpec::aliased("fob_value_inr", Decimal, &["fobvalue"]),
    FieldSpec::aliased("dbk_amt_inr", Decimal, &["dbk", "dbkamt", "dbkamount"]),
    FieldSpec::aliased("igst_amount_inr", Decimal, &["igst", "igstamount"]),
    FieldSpec::new("egm_no", Text),
    FieldSpec::new("egm_date", Date),
    FieldSpec::aliased("current_qye", Text, &["current", "currentqty"]),
    FieldSpec::aliased("dbk_scroll_no", Text, &["dbkscroll"]),
    FieldSpec::aliased("scroll_dt", Date, &["scrolldate"]),
    FieldSpec::new("remarks", Text),
];

pub static EXPORT: EntityDef = EntityDef {
    table: "export_data",
    label: "Export",
    sheet_name: "Export Data",
    fields: &FIELDS,
    expected_headers: &[
        "S/No",
        "Job.No",
        "Inv.No.",
        "Date",
        "S/Bill No.",
        "S/Bill Date",
        "LEO Date",
        "Forwarder Name",
        "Booking No.",
        "Contr.No.",
        "Size",
        "S/Line",
        "POD",
        "Train No.",
        "Wagon No.",
        "Wagon Date",
        "Reward",
        "Inv.Value (FC)",
        "FOB Value",
        "DBK",
        "IGST",
        "EGM No.",
        "EGM Date",
        "Current",
        "DBK Scroll",
        "Scroll Dt.",
        "Remarks",
    ],
};
