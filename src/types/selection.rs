//! Client selection state.

use serde::{Deserialize, Serialize};

/// Everything a client has chosen so far: identity, package, extras and extra pages.
///
/// A selection is owned by the caller and passed in full with each request. It is expected to be
/// partially filled while the form is being completed; [`Selection::is_complete`] gates quote
/// computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    /// Client name.
    pub client_name: String,
    /// Business name.
    pub business_name: String,
    /// Contact email.
    pub client_email: String,
    /// Name of the chosen package, if any.
    pub package: Option<String>,
    /// Names of chosen extras, unique, in selection order.
    pub extras: Vec<String>,
    /// Number of additional custom pages.
    pub extra_pages: u32,
}

/// A single-field update to a [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionUpdate {
    /// Replace the client name.
    ClientName(String),
    /// Replace the business name.
    BusinessName(String),
    /// Replace the contact email.
    ClientEmail(String),
    /// Replace the chosen package.
    Package(Option<String>),
    /// Select the named extra if unselected, or deselect it otherwise.
    ToggleExtra(String),
    /// Replace the extra-page count.
    ExtraPages(u32),
}

impl Selection {
    /// Applies a single-field update, returning the new selection.
    ///
    /// Identity fields are whitespace-trimmed. Toggling keeps extras unique by name and preserves
    /// selection order for the remaining entries.
    pub fn apply(&self, update: SelectionUpdate) -> Self {
        let mut next = self.clone();
        match update {
            SelectionUpdate::ClientName(name) => next.client_name = name.trim().to_string(),
            SelectionUpdate::BusinessName(name) => next.business_name = name.trim().to_string(),
            SelectionUpdate::ClientEmail(email) => next.client_email = email.trim().to_string(),
            SelectionUpdate::Package(package) => {
                next.package = package.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
            }
            SelectionUpdate::ToggleExtra(name) => {
                let name = name.trim().to_string();
                if let Some(pos) = next.extras.iter().position(|e| *e == name) {
                    next.extras.remove(pos);
                } else {
                    next.extras.push(name);
                }
            }
            SelectionUpdate::ExtraPages(count) => next.extra_pages = count,
        }
        next
    }

    /// Whether the selection carries everything a quote needs: the three identity fields and a
    /// package.
    ///
    /// Extras and extra pages are always optional.
    pub fn is_complete(&self) -> bool {
        !self.client_name.trim().is_empty()
            && !self.business_name.trim().is_empty()
            && !self.client_email.trim().is_empty()
            && self.package.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_fields() {
        let selection = Selection::default()
            .apply(SelectionUpdate::ClientName("  Ada Lovelace ".to_string()))
            .apply(SelectionUpdate::BusinessName("Analytical Engines".to_string()))
            .apply(SelectionUpdate::ClientEmail("ada@example.com".to_string()))
            .apply(SelectionUpdate::Package(Some("Standard Package".to_string())))
            .apply(SelectionUpdate::ExtraPages(2));

        assert_eq!(selection.client_name, "Ada Lovelace");
        assert_eq!(selection.package.as_deref(), Some("Standard Package"));
        assert_eq!(selection.extra_pages, 2);
        assert!(selection.is_complete());
    }

    #[test]
    fn toggle_extra_is_an_involution() {
        let selection = Selection::default()
            .apply(SelectionUpdate::ToggleExtra("Logo Refresh".to_string()))
            .apply(SelectionUpdate::ToggleExtra("Blog Setup".to_string()));
        assert_eq!(selection.extras, ["Logo Refresh", "Blog Setup"]);

        let selection = selection.apply(SelectionUpdate::ToggleExtra("Logo Refresh".to_string()));
        assert_eq!(selection.extras, ["Blog Setup"]);
    }

    #[test]
    fn blank_identity_is_incomplete() {
        let mut selection = Selection {
            client_name: "Ada".to_string(),
            business_name: "Engines".to_string(),
            client_email: "ada@example.com".to_string(),
            package: Some("Basic Package".to_string()),
            ..Default::default()
        };
        assert!(selection.is_complete());

        selection.business_name = "   ".to_string();
        assert!(!selection.is_complete());

        selection.business_name = "Engines".to_string();
        selection.package = None;
        assert!(!selection.is_complete());
    }

    #[test]
    fn clearing_the_package_resets_completeness() {
        let selection = Selection {
            client_name: "Ada".to_string(),
            business_name: "Engines".to_string(),
            client_email: "ada@example.com".to_string(),
            package: Some("Basic Package".to_string()),
            ..Default::default()
        };
        let cleared = selection.apply(SelectionUpdate::Package(None));
        assert!(!cleared.is_complete());

        // An empty package name counts as unset.
        let blank = selection.apply(SelectionUpdate::Package(Some("  ".to_string())));
        assert!(!blank.is_complete());
    }
}
