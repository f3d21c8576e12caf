//! Fixed vocabularies for synthetic feed events.

pub const PROVIDER_REASONS: &[&str] = &[
    "Benefits Verification",
    "Eligibility Inquiry",
    "Claim Status",
    "Prior Authorization Verification",
    "Coordination of Benefits Verification",
    "Referral Validation",
    "Appeal Status Inquiry",
    "Timely Filing Question",
    "Claim Reprocessing Request",
];

pub const MEMBER_REASONS: &[&str] = &[
    "Claims Status",
    "ID Card Request",
    "Deductible / OOP Balance Inquiry",
    "Pharmacy Coverage Question",
];

pub const PAYERS: &[&str] = &["BCBS", "Aetna", "UHC", "Cigna", "Anthem"];

pub const CLAIMS_EVENT_TYPES: &[&str] = &[
    "Claim Received",
    "Claim Auto-Adjudicated",
    "Claim Flagged for Manual Review",
    "Documentation Validated",
    "Policy Conflict Detected",
    "Claim Paid",
    "Claim Denied (Rule-Based)",
];

pub const NETWORK_EVENT_TYPES: &[&str] = &[
    "Network Routing Optimization",
    "Out-of-Network Redirected",
    "Contract Rate Applied",
    "Specialty Network Match",
    "Marketplace Solution Activated",
    "Stop-Loss Triggered",
];

pub const NETWORKS: &[&str] = &[
    "BlueCross PPO",
    "Aetna HMO",
    "UHC Choice Plus",
    "Cigna OAP",
    "Anthem EPO",
];

pub const PLAN_IMPACTS: &[&str] = &[
    "Reduced PMPM",
    "SLA Improved",
    "Cost Contained",
    "Coverage Expanded",
];

pub const MEMBER_IMPACTS: &[&str] = &[
    "No Disruption",
    "Minimal Change",
    "Improved Access",
    "Lower OOP",
];

pub const ROI_EVENT_TYPES: &[&str] = &[
    "ROI Threshold Reached",
    "Savings Milestone Hit",
    "Cost Avoidance Event Logged",
    "SLA Improvement Trigger",
    "Productivity Lift Increment",
];
