#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Pending,
    Valid,
    Invalid,
}

/// Single-slot status area. Every `show_*` replaces whatever was shown before.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    status: Option<AlertStatus>,
    messages: Vec<String>,
}

impl Alert {
    pub fn clear(&mut self) {
        self.status = None;
        self.messages.clear();
    }

    pub fn show_pending(&mut self, text: impl Into<String>) {
        self.render(AlertStatus::Pending, vec![text.into()]);
    }

    pub fn show_success(&mut self, text: impl Into<String>) {
        self.render(AlertStatus::Valid, vec![text.into()]);
    }

    pub fn show_errors(&mut self, messages: Vec<String>) {
        self.render(AlertStatus::Invalid, messages);
    }

    pub fn status(&self) -> Option<AlertStatus> {
        self.status
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }

    fn render(&mut self, status: AlertStatus, messages: Vec<String>) {
        self.clear();
        if messages.is_empty() {
            return;
        }
        self.status = Some(status);
        self.messages = messages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_empties_the_slot() {
        let mut alert = Alert::default();
        alert.show_errors(vec!["a".to_string(), "b".to_string()]);
        alert.clear();
        assert!(alert.is_empty());
        assert_eq!(alert.status(), None);
        assert!(alert.messages().is_empty());
    }

    #[test]
    fn each_show_replaces_the_previous_content() {
        let mut alert = Alert::default();
        alert.show_errors(vec![
            "Invalid email address.".to_string(),
            "Invalid date of birth.".to_string(),
        ]);
        assert_eq!(alert.status(), Some(AlertStatus::Invalid));
        assert_eq!(alert.messages().len(), 2);

        alert.show_pending("Please wait...");
        assert_eq!(alert.status(), Some(AlertStatus::Pending));
        assert_eq!(alert.messages(), ["Please wait..."]);

        alert.show_success("ok");
        assert_eq!(alert.status(), Some(AlertStatus::Valid));
        assert_eq!(alert.messages(), ["ok"]);
    }

    #[test]
    fn showing_no_errors_leaves_the_slot_cleared() {
        let mut alert = Alert::default();
        alert.show_success("ok");
        alert.show_errors(Vec::new());
        assert!(alert.is_empty());
        assert!(alert.messages().is_empty());
    }
}
