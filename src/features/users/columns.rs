//! Users table columns

use std::sync::Arc;

use crate::components::composite::data_table::{Alignment, Column, SortKey};
use crate::domain::User;

pub const VIEW_DETAILS_ACTION: &str = "view_details";
pub const EDIT_ACTION: &str = "edit";
pub const ACTIONS_COLUMN: &str = "actions";

type UserCallback = Arc<dyn Fn(&User) + Send + Sync>;

/// Row menu handlers of the actions column
#[derive(Clone, Default)]
pub struct UserTableActions {
    pub on_view_details: Option<UserCallback>,
    pub on_edit_user: Option<UserCallback>,
}

impl UserTableActions {
    pub fn on_view_details(mut self, handler: impl Fn(&User) + Send + Sync + 'static) -> Self {
        self.on_view_details = Some(Arc::new(handler));
        self
    }

    pub fn on_edit_user(mut self, handler: impl Fn(&User) + Send + Sync + 'static) -> Self {
        self.on_edit_user = Some(Arc::new(handler));
        self
    }
}

pub fn user_columns(actions: &UserTableActions) -> Vec<Column<User>> {
    let mut actions_column = Column::new(ACTIONS_COLUMN, "")
        .render(|_: &User| "⋮".to_string())
        .align(Alignment::Center);
    if let Some(handler) = actions.on_view_details.clone() {
        actions_column = actions_column.on_action(VIEW_DETAILS_ACTION, move |u| handler(u));
    }
    if let Some(handler) = actions.on_edit_user.clone() {
        actions_column = actions_column.on_action(EDIT_ACTION, move |u| handler(u));
    }

    vec![
        Column::new("name", "Name")
            .render(|u: &User| u.name.clone())
            .sort_by(|u| SortKey::from(u.name.to_lowercase()))
            .flex_width(Some(12), Some(32)),
        Column::new("email", "Email")
            .render(|u: &User| u.email.clone())
            .sort_by(|u| SortKey::from(u.email.to_lowercase()))
            .flex_width(None, Some(36)),
        Column::new("role", "Role")
            .render(|u: &User| u.role.display_name().to_string())
            .sort_by(|u| SortKey::from(u.role.display_name())),
        Column::new("status", "Status")
            .render(|u: &User| u.status_label().to_string())
            .sort_by(|u| SortKey::from(if u.is_active { 1_u32 } else { 0 })),
        Column::new("created", "Created")
            .render(|u: &User| u.created_at.format("%Y-%m-%d").to_string())
            .sort_by(|u| SortKey::from(u.created_at))
            .align(Alignment::Right),
        actions_column,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    fn user() -> User {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).single().expect("valid date");
        User {
            id: "u7".to_string(),
            role: UserRole::Member,
            name: "Bia Lima".to_string(),
            email: "Bia@corp.io".to_string(),
            is_active: false,
            email_verified_at: None,
            last_login_at: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn renders_and_keys_each_column() {
        let columns = user_columns(&UserTableActions::default());
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["name", "email", "role", "status", "created", "actions"]);

        let u = user();
        assert_eq!(columns[2].render_cell(&u).as_deref(), Some("Member"));
        assert_eq!(columns[3].render_cell(&u).as_deref(), Some("Inactive"));
        assert_eq!(columns[4].render_cell(&u).as_deref(), Some("2024-03-09"));
        assert_eq!(columns[1].sort_key(&u), Some(SortKey::Text("bia@corp.io".into())));
        assert_eq!(columns[3].sort_key(&u), Some(SortKey::Number(0.0)));
        assert!(!columns[5].is_sortable());
    }

    #[test]
    fn actions_column_only_exposes_supplied_handlers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let actions = UserTableActions::default().on_edit_user(move |u| {
            log.lock().expect("lock").push(u.id.clone());
        });
        let columns = user_columns(&actions);
        let actions_column = &columns[5];

        assert_eq!(actions_column.action_names().collect::<Vec<_>>(), [EDIT_ACTION]);
        assert!(actions_column.run_action(EDIT_ACTION, &user()));
        assert!(!actions_column.run_action(VIEW_DETAILS_ACTION, &user()));
        assert_eq!(*seen.lock().expect("lock"), ["u7".to_string()]);
    }
}
