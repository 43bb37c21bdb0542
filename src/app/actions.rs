use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};
use url::form_urlencoded;

use crate::components::composite::data_table::SortDescriptor;
use crate::domain::parse_users;
use crate::features::users::{UserTableActions, UsersTable, inactive_only, render_page};
use crate::states::{AppConfig, UserFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Users(UsersArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsersArgs {
    pub file: PathBuf,
    pub filter: UserFilter,
    pub sort: Option<SortDescriptor>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub inactive: bool,
}

impl UsersArgs {
    /// Location query string equivalent of `--page` and `--limit`
    fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        serializer.finish()
    }
}

/// Handle the action and return the text to print
pub fn handle(action: Action, config: &AppConfig) -> Result<String> {
    match action {
        Action::Users(args) => users(&args, config),
    }
}

fn users(args: &UsersArgs, config: &AppConfig) -> Result<String> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut table = UsersTable::new(&config.table, &args.query_string(), &UserTableActions::default());
    table.set_loading();

    let mut users = match parse_users(&json) {
        Ok(users) => users,
        Err(e) => {
            table.set_error(e.to_string());
            return Ok(render_page(&mut table));
        }
    };
    if args.inactive {
        users = inactive_only(users);
    }
    info!(count = users.len(), file = %args.file.display(), "Listing users");
    table.set_users(users);

    table.set_filter(args.filter.clone());
    if let Some(page) = args.page {
        table.set_page(page);
    }
    table.sort_by(args.sort.clone())?;

    debug!(query = %table.query_string(), "Users page location");
    Ok(render_page(&mut table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::StatusFilter;

    const USERS: &str = r#"[
        {"id": "1", "role": "ADMIN", "name": "Ana", "email": "ana@corp.io", "isActive": true,
         "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"},
        {"id": "2", "role": "MEMBER", "name": "Bruno", "email": "bruno@corp.io", "isActive": false,
         "createdAt": "2024-01-02T00:00:00Z", "updatedAt": "2024-01-02T00:00:00Z"},
        {"id": "3", "role": "GUEST", "name": "Carla", "email": "carla@corp.io", "isActive": false,
         "createdAt": "2024-01-03T00:00:00Z", "updatedAt": "2024-01-03T00:00:00Z"}
    ]"#;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tabula-{}-{name}.json", std::process::id()));
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    fn args(file: PathBuf) -> UsersArgs {
        UsersArgs {
            file,
            filter: UserFilter::default(),
            sort: None,
            page: None,
            limit: None,
            inactive: false,
        }
    }

    #[test]
    fn lists_inactive_users_sorted() {
        let file = write_fixture("inactive", USERS);
        let mut users_args = args(file.clone());
        users_args.inactive = true;
        users_args.sort = Some(SortDescriptor::descending("name"));

        let out = handle(Action::Users(users_args), &AppConfig::default()).expect("rendered");
        std::fs::remove_file(&file).ok();

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with("Carla"));
        assert!(lines[3].starts_with("Bruno"));
        assert!(!out.contains("Ana"));
        assert!(out.ends_with("1 - 2 of 2  page 1 / 1  rows per page: 5 [10] 20 30 40 50"));
    }

    #[test]
    fn filter_and_limit_apply() {
        let file = write_fixture("filter", USERS);
        let mut users_args = args(file.clone());
        users_args.filter.status = StatusFilter::Inactive;
        users_args.limit = Some(1);
        users_args.page = Some(2);
        assert_eq!(users_args.query_string(), "page=2&limit=1");

        let out = handle(Action::Users(users_args), &AppConfig::default()).expect("rendered");
        std::fs::remove_file(&file).ok();

        assert!(out.contains("Carla"));
        assert!(!out.contains("Bruno"));
        assert!(out.contains("2 - 2 of 2  page 2 / 2"));
    }

    #[test]
    fn malformed_file_renders_error() {
        let file = write_fixture("broken", "{ not json");
        let out = handle(Action::Users(args(file.clone())), &AppConfig::default()).expect("rendered");
        std::fs::remove_file(&file).ok();

        assert!(out.starts_with("Failed to load users: JSON error"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("tabula-does-not-exist.json");
        assert!(handle(Action::Users(args(missing)), &AppConfig::default()).is_err());
    }

    #[test]
    fn unknown_sort_column_is_an_error() {
        let file = write_fixture("sort", USERS);
        let mut users_args = args(file.clone());
        users_args.sort = Some(SortDescriptor::ascending("salary"));

        let result = handle(Action::Users(users_args), &AppConfig::default());
        std::fs::remove_file(&file).ok();
        assert!(result.is_err());
    }
}
