//! Explicit dialog state.
//!
//! A dialog is open exactly when it holds a value: the form being edited, the identifiers
//! awaiting confirmation, and so on. Each dialog is owned by the page that shows it.

/// Open/closed state carrying the dialog's subject while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog<T> {
    subject: Option<T>,
}

impl<T> Default for Dialog<T> {
    fn default() -> Self {
        Self { subject: None }
    }
}

impl<T> Dialog<T> {
    /// A closed dialog.
    #[must_use]
    pub const fn closed() -> Self {
        Self { subject: None }
    }

    /// Opens the dialog on `subject`, replacing any previous one.
    pub fn open(&mut self, subject: T) {
        self.subject = Some(subject);
    }

    /// Closes the dialog and returns what it held.
    pub fn close(&mut self) -> Option<T> {
        self.subject.take()
    }

    /// Whether the dialog is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    /// What the open dialog is showing.
    #[must_use]
    pub const fn subject(&self) -> Option<&T> {
        self.subject.as_ref()
    }

    /// Mutable access to what the open dialog is showing.
    pub fn subject_mut(&mut self) -> Option<&mut T> {
        self.subject.as_mut()
    }
}
