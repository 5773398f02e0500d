//! Dashboard client - the members page logic that drives the API.
//!
//! The page controller keeps the in-memory member list, the staged filters and the dialog
//! state; the form collects field values and pending uploads; the transport turns both into
//! HTTP requests. Rendering is left to whoever embeds the controller.

/// Members page controller
pub mod controller;
/// Explicit open/close dialog state
pub mod dialog;
/// Member form state and pending uploads
pub mod form;
/// User-facing notifications
pub mod notify;
/// Multipart payload construction
pub mod payload;
/// reqwest-backed API client
pub mod transport;

use crate::{
    errors::Result,
    models::{Member, MemberFilters},
};

pub use controller::MembersPage;
pub use dialog::Dialog;
pub use form::{MemberForm, MemberFormValues, PendingFile};
pub use notify::{Notification, NotificationLog, Notifier, TracingNotifier};
pub use payload::{FilePart, MultipartPayload, SaveTarget};
pub use transport::DashboardClient;

/// The member operations the page controller needs from the backend.
#[allow(async_fn_in_trait)]
pub trait MemberApi {
    /// Fetches members matching `filters`.
    async fn list_members(&self, filters: &MemberFilters) -> Result<Vec<Member>>;

    /// Sends a create (`id == None`) or full replacement and returns the stored member.
    async fn save_member(&self, id: Option<&str>, payload: MultipartPayload) -> Result<Member>;

    /// Deletes every listed member in one request.
    async fn delete_members(&self, ids: &[String]) -> Result<()>;
}
