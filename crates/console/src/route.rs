//! Navigation routes
//!
//! One route per list, create and edit view per entity, plus login, the
//! dashboard and the building-scoped room views.

use std::fmt;

use backoffice_core::{EntityKind, RecordId};

/// A navigable view in the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Credential entry
    Login,

    /// Landing page with per-entity shortcuts
    #[default]
    Dashboard,

    /// Searchable, paginated list of one entity kind
    List(EntityKind),

    /// Room list narrowed to one building
    RoomsInBuilding(RecordId),

    /// Create form
    Create(EntityKind),

    /// Room create form with the building preselected
    CreateRoomInBuilding(RecordId),

    /// Edit form for one record
    Edit(EntityKind, RecordId),
}

impl Route {
    /// Path for this route (`/clients/edit/4`)
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::List(kind) => format!("/{}", kind.slug()),
            Route::RoomsInBuilding(id) => format!("/rooms/building/{}", id),
            Route::Create(kind) => format!("/{}/add", kind.slug()),
            Route::CreateRoomInBuilding(id) => format!("/rooms/building/{}/add", id),
            Route::Edit(kind, id) => format!("/{}/edit/{}", kind.slug(), id),
        }
    }

    /// Entity kind shown by this route
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Route::List(kind) | Route::Create(kind) | Route::Edit(kind, _) => Some(*kind),
            Route::RoomsInBuilding(_) | Route::CreateRoomInBuilding(_) => Some(EntityKind::Room),
            Route::Login | Route::Dashboard => None,
        }
    }

    /// Whether the view needs a logged-in session
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Title for the toolbar
    pub fn title(&self) -> String {
        match self {
            Route::Login => "Sign In".to_string(),
            Route::Dashboard => "Dashboard".to_string(),
            Route::List(kind) => kind.plural_name().to_string(),
            Route::RoomsInBuilding(_) => "Rooms".to_string(),
            Route::Create(kind) => format!("Add {}", kind.display_name()),
            Route::CreateRoomInBuilding(_) => "Add Room".to_string(),
            Route::Edit(kind, _) => format!("Edit {}", kind.display_name()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ============================================================================
// Tests
// ============================================================================
