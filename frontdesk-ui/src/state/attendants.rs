//! Attendants Store
//!
//! CRUD over the `attendants` table. The in-memory list is updated only
//! after the remote write confirms, so the list always reflects stored
//! rows at the cost of round-trip latency.

use leptos::*;
use serde_json::json;

use crate::api::datastore::Datastore;

/// An attendant row
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Attendant {
    pub id: String,
    pub name: String,
    pub n8n_id: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

const DUPLICATE_MESSAGE: &str = "An attendant with this automation ID already exists";

/// Reactive attendant list
#[derive(Clone, Copy)]
pub struct AttendantsStore {
    pub attendants: RwSignal<Vec<Attendant>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AttendantsStore {
    pub fn new() -> Self {
        Self {
            attendants: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            error: create_rw_signal(None),
        }
    }

    /// Load all attendants, newest first
    pub async fn load(&self, ds: &Datastore) {
        self.loading.set(true);
        self.error.set(None);

        match ds
            .select::<Attendant>("attendants", &[("order", "created_at.desc")])
            .await
        {
            Ok(rows) => self.attendants.set(rows),
            Err(e) => self.error.set(Some(e)),
        }

        self.loading.set(false);
    }

    /// Create an attendant after checking `n8n_id` uniqueness.
    ///
    /// The check-then-insert window is racy; the datastore is the final
    /// arbiter and a lost race surfaces as a remote error.
    pub async fn create(
        &self,
        ds: &Datastore,
        name: &str,
        n8n_id: &str,
    ) -> Result<Attendant, String> {
        if has_duplicate_n8n_id(&self.attendants.get_untracked(), n8n_id, None) {
            return Err(DUPLICATE_MESSAGE.to_string());
        }

        let filter = format!("eq.{}", n8n_id);
        let existing: Vec<Attendant> = ds
            .select("attendants", &[("n8n_id", filter.as_str())])
            .await?;
        if !existing.is_empty() {
            return Err(DUPLICATE_MESSAGE.to_string());
        }

        let created: Attendant = ds
            .insert(
                "attendants",
                &json!({ "name": name, "n8n_id": n8n_id, "active": true }),
            )
            .await?;

        self.attendants.update(|list| list.insert(0, created.clone()));
        Ok(created)
    }

    /// Update an attendant's name and automation id
    pub async fn update(
        &self,
        ds: &Datastore,
        id: &str,
        name: &str,
        n8n_id: &str,
    ) -> Result<Attendant, String> {
        if has_duplicate_n8n_id(&self.attendants.get_untracked(), n8n_id, Some(id)) {
            return Err(DUPLICATE_MESSAGE.to_string());
        }

        let updated: Attendant = ds
            .update(
                "attendants",
                "id",
                id,
                &json!({ "name": name, "n8n_id": n8n_id }),
            )
            .await?;

        self.attendants.update(|list| {
            if let Some(slot) = list.iter_mut().find(|a| a.id == id) {
                *slot = updated.clone();
            }
        });
        Ok(updated)
    }

    /// Toggle the active flag
    pub async fn set_active(&self, ds: &Datastore, id: &str, active: bool) -> Result<(), String> {
        let updated: Attendant = ds
            .update("attendants", "id", id, &json!({ "active": active }))
            .await?;

        self.attendants.update(|list| {
            if let Some(slot) = list.iter_mut().find(|a| a.id == id) {
                *slot = updated.clone();
            }
        });
        Ok(())
    }

    /// Delete an attendant
    pub async fn delete(&self, ds: &Datastore, id: &str) -> Result<(), String> {
        ds.delete("attendants", "id", id).await?;
        self.attendants.update(|list| list.retain(|a| a.id != id));
        Ok(())
    }
}

/// True when another attendant already carries `n8n_id`
pub fn has_duplicate_n8n_id(
    attendants: &[Attendant],
    n8n_id: &str,
    exclude_id: Option<&str>,
) -> bool {
    attendants
        .iter()
        .any(|a| a.n8n_id == n8n_id && Some(a.id.as_str()) != exclude_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendant(id: &str, n8n_id: &str) -> Attendant {
        Attendant {
            id: id.to_string(),
            name: "Ana".to_string(),
            n8n_id: n8n_id.to_string(),
            active: true,
            created_at: "2025-05-01T00:00:00Z".to_string(),
            updated_at: "2025-05-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_duplicate_detected() {
        let list = vec![attendant("a1", "wf-1"), attendant("a2", "wf-2")];
        assert!(has_duplicate_n8n_id(&list, "wf-2", None));
        assert!(!has_duplicate_n8n_id(&list, "wf-3", None));
    }

    #[test]
    fn test_duplicate_check_excludes_self_on_edit() {
        let list = vec![attendant("a1", "wf-1"), attendant("a2", "wf-2")];
        // Keeping its own id is not a duplicate
        assert!(!has_duplicate_n8n_id(&list, "wf-1", Some("a1")));
        // Taking another attendant's id is
        assert!(has_duplicate_n8n_id(&list, "wf-2", Some("a1")));
    }
}
