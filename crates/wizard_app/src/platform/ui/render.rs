use wizard_core::{AlertStatus, Field, ReviewSection, WizardViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Back,
    Next,
    Submit,
}

/// Instructions for the rendered form, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    SetStepActive {
        step: usize,
        heading: String,
        active: bool,
    },
    SetFieldValue {
        key: &'static str,
        label: &'static str,
        value: String,
        invalid: bool,
    },
    SetUploadStatus {
        encoding: bool,
        ready: bool,
    },
    ShowReview {
        sections: Vec<ReviewSection>,
    },
    SetControl {
        control: Control,
        visible: bool,
        enabled: bool,
    },
    SetAlert {
        status: Option<AlertStatus>,
        messages: Vec<String>,
    },
}

pub fn render(view: &WizardViewModel) -> Vec<SurfaceCommand> {
    let mut cmds = Vec::new();

    for step in &view.steps {
        cmds.push(SurfaceCommand::SetStepActive {
            step: step.index,
            heading: format!("Step {} of {}: {}", step.index + 1, view.step_count, step.title),
            active: step.active,
        });
        if !step.active {
            continue;
        }
        for field in &step.fields {
            cmds.push(SurfaceCommand::SetFieldValue {
                key: field.field.key(),
                label: field.label,
                value: field.value.clone(),
                invalid: field.invalid,
            });
            if field.field == Field::GovtId {
                cmds.push(SurfaceCommand::SetUploadStatus {
                    encoding: view.file_encoding,
                    ready: view.file_ready,
                });
            }
        }
    }

    if let Some(sections) = &view.review {
        cmds.push(SurfaceCommand::ShowReview {
            sections: sections.clone(),
        });
    }

    cmds.push(SurfaceCommand::SetControl {
        control: Control::Back,
        visible: true,
        enabled: view.back_enabled,
    });
    cmds.push(SurfaceCommand::SetControl {
        control: Control::Next,
        visible: view.next_visible,
        enabled: view.next_enabled,
    });
    cmds.push(SurfaceCommand::SetControl {
        control: Control::Submit,
        visible: view.submit_visible,
        enabled: view.submit_enabled,
    });

    cmds.push(SurfaceCommand::SetAlert {
        status: view.alert_status,
        messages: view.alert_messages.clone(),
    });

    cmds
}
