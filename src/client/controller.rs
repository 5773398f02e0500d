//! Members page controller.
//!
//! Owns the in-memory member list, the staged filters and the two dialogs of the page.
//! Every backend failure is logged, reported once through the [`Notifier`], and leaves the
//! list exactly as it was.

use super::{
    MemberApi,
    dialog::Dialog,
    form::{MemberForm, MemberFormValues, PendingFile},
    notify::Notifier,
    payload::MultipartPayload,
};
use crate::{
    errors::Result,
    models::{FilterKey, Member, MemberFilters},
};
use chrono::DateTime;
use tracing::{debug, error, info};

/// State and actions of the members page.
#[derive(Debug)]
pub struct MembersPage<A, N> {
    api: A,
    notifier: N,
    members: Vec<Member>,
    /// Filters being edited in the filter bar
    staged: MemberFilters,
    /// Filters of the last fetch
    applied: MemberFilters,
    editor: Dialog<MemberForm>,
    delete_confirm: Dialog<Vec<String>>,
}

impl<A: MemberApi, N: Notifier> MembersPage<A, N> {
    /// Empty page; call [`refresh`](Self::refresh) to load.
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            members: Vec::new(),
            staged: MemberFilters::default(),
            applied: MemberFilters::default(),
            editor: Dialog::closed(),
            delete_confirm: Dialog::closed(),
        }
    }

    /// Members as last fetched and patched, in no particular order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members newest first. A missing creation time sorts as the epoch.
    pub fn sorted_members(&self) -> Vec<&Member> {
        let mut sorted: Vec<&Member> = self.members.iter().collect();
        sorted.sort_by_key(|m| std::cmp::Reverse(m.created_at.unwrap_or(DateTime::UNIX_EPOCH)));
        sorted
    }

    /// Filters as edited, not yet applied.
    pub const fn staged_filters(&self) -> &MemberFilters {
        &self.staged
    }

    /// Filters used by the last fetch.
    pub const fn applied_filters(&self) -> &MemberFilters {
        &self.applied
    }

    /// Re-fetches with the applied filters. Returns whether the fetch succeeded.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_members(&self.applied).await {
            Ok(members) => {
                debug!("Fetched {} members", members.len());
                self.members = members;
                true
            }
            Err(e) => {
                error!("Failed to fetch members: {}", e);
                self.notifier.error("Failed to fetch members");
                false
            }
        }
    }

    /// Stages one filter without fetching. An empty value unsets it.
    ///
    /// # Errors
    /// Returns an error if the value does not parse; staged filters are unchanged then.
    pub fn set_filter(&mut self, key: FilterKey, raw: &str) -> Result<()> {
        self.staged.set(key, raw)
    }

    /// Applies the staged filters and re-fetches.
    pub async fn apply_filters(&mut self) -> bool {
        self.applied = self.staged.clone();
        self.refresh().await
    }

    /// Clears every filter and re-fetches unfiltered.
    pub async fn reset_filters(&mut self) -> bool {
        self.staged = MemberFilters::default();
        self.applied = MemberFilters::default();
        self.refresh().await
    }

    /// The create/edit dialog.
    pub const fn editor(&self) -> &Dialog<MemberForm> {
        &self.editor
    }

    /// The form in the open editor, if any.
    pub fn editor_mut(&mut self) -> Option<&mut MemberForm> {
        self.editor.subject_mut()
    }

    /// Opens the editor on an empty form.
    pub fn open_create(&mut self) {
        self.editor.open(MemberForm::new());
    }

    /// Opens the editor on a listed member. Returns `false` if the id is not listed.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(member) = self.members.iter().find(|m| m.id == id) else {
            return false;
        };
        self.editor.open(MemberForm::from_member(member));
        true
    }

    /// Closes the editor and hands back its form.
    pub fn close_editor(&mut self) -> Option<MemberForm> {
        self.editor.close()
    }

    /// Saves the open form. The editor closes on success and stays open on failure.
    pub async fn submit_editor(&mut self) -> bool {
        let Some(form) = self.editor.subject() else {
            return false;
        };
        let id = form.id().map(str::to_string);
        let values = form.values().clone();
        let pending = form.pending().to_vec();

        let saved = self.save_member(id.as_deref(), &values, &pending).await;
        if saved {
            self.editor.close();
        }
        saved
    }

    /// Creates (`id == None`) or replaces a member, then patches the list.
    ///
    /// A create prepends the stored member. An update replaces the listed member with that
    /// id and leaves the list alone when none is listed.
    pub async fn save_member(
        &mut self,
        id: Option<&str>,
        values: &MemberFormValues,
        pending: &[PendingFile],
    ) -> bool {
        let result = match MultipartPayload::build(values, pending) {
            Ok(payload) => self.api.save_member(id, payload).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(member) => {
                if let Some(id) = id {
                    info!("Updated member {}", id);
                    match self.members.iter_mut().find(|m| m.id == id) {
                        Some(existing) => *existing = member,
                        None => debug!("Updated member {} is not listed", id),
                    }
                    self.notifier.success("Member updated successfully");
                } else {
                    info!("Created member {}", member.id);
                    self.members.insert(0, member);
                    self.notifier.success("Member created successfully");
                }
                true
            }
            Err(e) => {
                error!("Failed to save member: {}", e);
                self.notifier.error("Failed to save member");
                false
            }
        }
    }

    /// The delete confirmation dialog.
    pub const fn delete_confirm(&self) -> &Dialog<Vec<String>> {
        &self.delete_confirm
    }

    /// Asks for confirmation before deleting `ids`.
    pub fn request_delete(&mut self, ids: Vec<String>) {
        self.delete_confirm.open(ids);
    }

    /// Closes the confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        self.delete_confirm.close();
    }

    /// Deletes the members awaiting confirmation and closes the dialog.
    pub async fn confirm_delete(&mut self) -> bool {
        match self.delete_confirm.close() {
            Some(ids) => self.delete_members(&ids).await,
            None => false,
        }
    }

    /// Deletes `ids` in one request and drops them from the list. No-op for an empty list.
    pub async fn delete_members(&mut self, ids: &[String]) -> bool {
        if ids.is_empty() {
            return false;
        }
        match self.api.delete_members(ids).await {
            Ok(()) => {
                info!("Deleted {} members", ids.len());
                self.members.retain(|m| !ids.contains(&m.id));
                self.notifier.success("Members deleted successfully");
                true
            }
            Err(e) => {
                error!("Failed to delete members: {}", e);
                self.notifier.error("Failed to delete members");
                false
            }
        }
    }
}
