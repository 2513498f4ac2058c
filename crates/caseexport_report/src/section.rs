//! Field mappings of every report section, as plain data.

/// One table column: header text and the document field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecColumnMapping {
    pub header: &'static str,
    pub field: &'static str,
}

/// Where the rows of a table section come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSectionSource {
    /// List of sub-documents embedded in the case document.
    Embedded(&'static str),
    /// Children of an embedded list, flattened with inherited parent fields.
    Nested {
        parent: &'static str,
        child: &'static str,
        l_inherit: &'static [&'static str],
    },
    Settlements,
    SettlementPlans,
    Payments,
    Commissions,
}

/// A vertical table section of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecTableSection {
    pub title: &'static str,
    pub source: EnumSectionSource,
    pub columns: &'static [SpecColumnMapping],
    /// Leave the section out entirely when it has no rows.
    pub if_skip_empty: bool,
}

impl SpecTableSection {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header).collect()
    }
}

/// How a case detail value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumDetailRender {
    Plain,
    /// Bold value cell.
    Emphasis,
    /// Numbers grouped with `,` thousand separators.
    Thousands,
    /// Band code resolved through the arrears band reference.
    ArrearsBand,
}

/// One label/value row of the case details block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecDetailField {
    pub label: &'static str,
    pub field: &'static str,
    pub render: EnumDetailRender,
}

const fn col(header: &'static str, field: &'static str) -> SpecColumnMapping {
    SpecColumnMapping { header, field }
}

const fn detail(
    label: &'static str,
    field: &'static str,
    render: EnumDetailRender,
) -> SpecDetailField {
    SpecDetailField {
        label,
        field,
        render,
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region CaseDetails

pub const C_TITLE_CASE_DETAILS: &str = "Case Details";

pub const L_CASE_DETAIL_FIELDS: &[SpecDetailField] = &[
    detail("Case ID", "case_id", EnumDetailRender::Emphasis),
    detail("Incident ID", "incident_id", EnumDetailRender::Emphasis),
    detail("Account No.", "account_no", EnumDetailRender::Plain),
    detail("Customer Ref", "customer_ref", EnumDetailRender::Plain),
    detail("Area", "area", EnumDetailRender::Plain),
    detail("BSS Arrears Amount", "bss_arrears_amount", EnumDetailRender::Thousands),
    detail("Current Arrears Amount", "current_arrears_amount", EnumDetailRender::Thousands),
    detail("Action type", "action_type", EnumDetailRender::Plain),
    detail("Filtered reason", "filtered_reason", EnumDetailRender::Plain),
    detail("Last Payment Date", "last_payment_date", EnumDetailRender::Plain),
    detail("Last BSS Reading Date", "last_bss_reading_date", EnumDetailRender::Plain),
    detail("Commission", "commission", EnumDetailRender::Thousands),
    detail("Case Current Status", "case_current_status", EnumDetailRender::Plain),
    detail("Current Arrears band", "current_arrears_band", EnumDetailRender::ArrearsBand),
    detail("DRC Commission Rule", "drc_commision_rule", EnumDetailRender::Plain),
    detail("Created dtm", "created_dtm", EnumDetailRender::Plain),
    detail("Implemented dtm", "implemented_dtm", EnumDetailRender::Plain),
    detail("RTOM", "rtom", EnumDetailRender::Plain),
    detail("Monitor months", "monitor_months", EnumDetailRender::Plain),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableSections

pub const SECTION_CONTACT_INFO: SpecTableSection = SpecTableSection {
    title: "Contact Info",
    source: EnumSectionSource::Embedded("contact"),
    columns: &[
        col("Mobile", "mob"),
        col("Email", "email"),
        col("Home Phone", "lan"),
        col("Address", "address"),
    ],
    if_skip_empty: false,
};

pub const SECTION_REMARKS: SpecTableSection = SpecTableSection {
    title: "Remarks",
    source: EnumSectionSource::Embedded("remark"),
    columns: &[
        col("Remark", "remark"),
        col("Remark Added by", "remark_added_by"),
        col("Remark Added Date", "remark_added_date"),
    ],
    if_skip_empty: false,
};

pub const SECTION_SETTLEMENT_DETAILS: SpecTableSection = SpecTableSection {
    title: "Settlement Details",
    source: EnumSectionSource::Settlements,
    columns: &[
        col("Settlement ID", "settlement_id"),
        col("Case ID", "case_id"),
        col("DRC Name", "drc_id"),
        col("RO Name", "ro_id"),
        col("Status", "settlement_status"),
        col("Status reason", "status_reason"),
        col("Status DTM", "status_dtm"),
        col("Settlement Type", "settlement_type"),
        col("Settlement Amount", "settlement_amount"),
        col("Settlement Phase", "settlement_phase"),
        col("Settlement Created by", "created_by"),
        col("Settlement Created DTM", "created_on"),
        col("Last Monitoring DTM", "last_monitoring_dtm"),
        col("Remark", "remark"),
    ],
    if_skip_empty: true,
};

pub const SECTION_SETTLEMENT_PLAN: SpecTableSection = SpecTableSection {
    title: "Settlement Plan",
    source: EnumSectionSource::SettlementPlans,
    columns: &[
        col("Settlement ID", "settlement_id"),
        col("Installment Sequence", "installment_seq"),
        col("Installment Settle Amount", "installment_settle_amount"),
        col("Accumulated Amount", "accumulated_amount"),
        col("Plan Date and Time", "plan_date"),
    ],
    if_skip_empty: true,
};

pub const SECTION_APPROVE_DETAILS: SpecTableSection = SpecTableSection {
    title: "Approve Details",
    source: EnumSectionSource::Embedded("approve"),
    columns: &[
        col("Approved Process", "approved_process"),
        col("Approved By", "approved_by"),
        col("Approved On", "approved_on"),
        col("Remark", "remark"),
    ],
    if_skip_empty: false,
};

pub const SECTION_CASE_STATUS: SpecTableSection = SpecTableSection {
    title: "Case Status",
    source: EnumSectionSource::Embedded("case_status"),
    columns: &[
        col("Case Status", "case_status"),
        col("Status Reason", "status_reason"),
        col("Created DTM", "created_dtm"),
        col("Created By", "created_by"),
        col("Notified DTM", "notified_dtm"),
        col("Expire DTM", "expire_dtm"),
    ],
    if_skip_empty: false,
};

pub const SECTION_ABNORMAL_STOP: SpecTableSection = SpecTableSection {
    title: "Abnormal Stop",
    source: EnumSectionSource::Embedded("abnormal_stop"),
    columns: &[
        col("Remark", "remark"),
        col("Done By", "done_by"),
        col("Done On", "done_on"),
        col("Action", "action"),
    ],
    if_skip_empty: false,
};

pub const SECTION_DRC: SpecTableSection = SpecTableSection {
    title: "Debt Recovery Company (DRC)",
    source: EnumSectionSource::Embedded("drc"),
    columns: &[
        col("Order ID", "order_id"),
        col("DRC ID", "drc_id"),
        col("DRC Name", "drc_name"),
        col("Created DTM", "created_dtm"),
        col("DRC Status", "drc_status"),
        col("Status DTM", "status_dtm"),
        col("Expire DTM", "expire_dtm"),
        col("Case Removal Remark", "case_removal_remark"),
        col("Removed By", "removed_by"),
        col("Removed DTM", "removed_dtm"),
        col("DRC Selection Logic", "drc_selection_logic"),
        col("Case Distribution Batch ID", "case_distribution_batch_id"),
    ],
    if_skip_empty: false,
};

pub const SECTION_RECOVERY_OFFICER: SpecTableSection = SpecTableSection {
    title: "Recovery Officer (RO)",
    source: EnumSectionSource::Nested {
        parent: "drc",
        child: "recovery_officers",
        l_inherit: &["drc_id", "drc_name"],
    },
    columns: &[
        col("RO ID", "ro_id"),
        col("Assigned DTM", "assigned_dtm"),
        col("Assigned By", "assigned_by"),
        col("Removed DTM", "removed_dtm"),
        col("Case Removal Remark", "case_removal_remark"),
        col("DRC ID", "drc_id"),
        col("DRC Name", "drc_name"),
    ],
    if_skip_empty: false,
};

pub const SECTION_PAYMENTS: SpecTableSection = SpecTableSection {
    title: "Payments",
    source: EnumSectionSource::Payments,
    columns: &[
        col("Payment ID", "payment_id"),
        col("Settlement ID", "settlement_id"),
        col("Installment Sequence", "installment_seq"),
        col("Bill Payment Sequence", "bill_payment_seq"),
        col("Bill Paid Amount", "bill_paid_amount"),
        col("Bill Paid Date", "bill_paid_date"),
        col("Bill Payment Status", "bill_payment_status"),
        col("Bill Payment Type", "bill_payment_type"),
        col("Settled Balance", "settled_balance"),
        col("Cumulative Settled Balance", "cumulative_settled_balance"),
        col("Created Date and Time", "created_dtm"),
        col("Account No", "account_no"),
        col("Money Transaction Reference Type", "money_transaction_Reference_type"),
        col("Money Transaction ID", "money_transaction_id"),
    ],
    if_skip_empty: false,
};

pub const SECTION_RO_NEGOTIATIONS: SpecTableSection = SpecTableSection {
    title: "Recovery Officer Negotiations",
    source: EnumSectionSource::Embedded("ro_negotiation"),
    columns: &[
        col("DRC ID", "drc_id"),
        col("RO ID", "ro_id"),
        col("Created DTM", "created_dtm"),
        col("Field Reason ID", "field_reason_id"),
        col("Field Reason", "field_reason"),
        col("Remark", "remark"),
    ],
    if_skip_empty: false,
};

pub const SECTION_RO_REQUESTS: SpecTableSection = SpecTableSection {
    title: "Recovery Officer Requests",
    source: EnumSectionSource::Embedded("ro_requests"),
    columns: &[
        col("DRC ID", "drc_id"),
        col("RO ID", "ro_id"),
        col("Created DTM", "created_dtm"),
        col("RO Request ID", "ro_request_id"),
        col("RO Request", "ro_request"),
        col("ToDo On", "todo_on"),
        col("Completed On", "completed_on"),
    ],
    if_skip_empty: false,
};

pub const SECTION_COMMISSIONS: SpecTableSection = SpecTableSection {
    title: "Commissions",
    source: EnumSectionSource::Commissions,
    columns: &[
        col("Money Transaction ID", "money_transaction_id"),
        col("Transaction Type", "transaction_type"),
        col("Paid DTM", "paid_dtm"),
        col("Arrears", "arrears"),
        col("Transaction", "transaction"),
        col("Running Credit", "running_credit"),
        col("Running Debt", "running_debt"),
        col("Cumulative Settled Balance", "cummulative_settled_balance"),
        col("Commissioned Amount", "commissioned_amount"),
    ],
    if_skip_empty: false,
};

/// Table sections placed after the case details block, in report order.
pub const L_TABLE_SECTIONS: &[SpecTableSection] = &[
    SECTION_CONTACT_INFO,
    SECTION_REMARKS,
    SECTION_SETTLEMENT_DETAILS,
    SECTION_SETTLEMENT_PLAN,
    SECTION_APPROVE_DETAILS,
    SECTION_CASE_STATUS,
    SECTION_ABNORMAL_STOP,
    SECTION_DRC,
    SECTION_RECOVERY_OFFICER,
    SECTION_PAYMENTS,
    SECTION_RO_NEGOTIATIONS,
    SECTION_RO_REQUESTS,
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
