use crate::{AlertStatus, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub steps: Vec<StepView>,
    pub active_step: usize,
    pub step_count: usize,
    pub back_enabled: bool,
    pub next_visible: bool,
    pub next_enabled: bool,
    pub submit_visible: bool,
    pub submit_enabled: bool,
    pub alert_status: Option<AlertStatus>,
    pub alert_messages: Vec<String>,
    /// Earlier steps' values, present only while the last step is active.
    pub review: Option<Vec<ReviewSection>>,
    pub file_encoding: bool,
    pub file_ready: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub title: String,
    pub active: bool,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub invalid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub step: usize,
    pub title: String,
    pub entries: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub label: &'static str,
    pub value: String,
}
