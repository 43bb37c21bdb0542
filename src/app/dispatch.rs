use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::app::actions::{Action, UsersArgs};
use crate::components::composite::data_table::SortDescriptor;
use crate::states::{RoleFilter, StatusFilter, UserFilter};

/// Global `--config` path, if given
pub fn config_path(matches: &clap::ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("config").cloned()
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("users", sub_m)) => users(sub_m).map(Action::Users),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

fn users(matches: &clap::ArgMatches) -> Result<UsersArgs> {
    let text = |name: &str| matches.get_one::<String>(name).map(String::as_str);

    let role = RoleFilter::parse(text("role").unwrap_or("all"))?;
    let status = StatusFilter::parse(text("status").unwrap_or("all"))?;
    let sort = text("sort")
        .map(str::parse::<SortDescriptor>)
        .transpose()?;

    Ok(UsersArgs {
        file: matches
            .get_one::<PathBuf>("file")
            .cloned()
            .context("missing required argument: --file")?,
        filter: UserFilter {
            query: text("query").unwrap_or_default().to_string(),
            role,
            status,
        },
        sort,
        page: matches.get_one::<usize>("page").copied(),
        limit: matches.get_one::<usize>("limit").copied(),
        inactive: matches.get_flag("inactive"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands;
    use crate::domain::UserRole;

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn builds_users_action() {
        let action = dispatch(&[
            "tabula", "users", "-f", "users.json", "-q", "ana", "--role", "admin", "--status",
            "active", "--sort", "created:desc", "--page", "2",
        ])
        .expect("valid action");

        let Action::Users(args) = action;
        assert_eq!(args.file, PathBuf::from("users.json"));
        assert_eq!(
            args.filter,
            UserFilter {
                query: "ana".to_string(),
                role: RoleFilter::Only(UserRole::Admin),
                status: StatusFilter::Active,
            }
        );
        assert_eq!(args.sort, Some(SortDescriptor::descending("created")));
        assert_eq!((args.page, args.limit), (Some(2), None));
        assert!(!args.inactive);
    }

    #[test]
    fn rejects_bad_filters() {
        assert!(dispatch(&["tabula", "users", "-f", "u.json", "--role", "owner"]).is_err());
        assert!(dispatch(&["tabula", "users", "-f", "u.json", "--status", "gone"]).is_err());
        assert!(dispatch(&["tabula", "users", "-f", "u.json", "--sort", "name:up"]).is_err());
    }

    #[test]
    fn reads_global_config_path() {
        let matches = commands::new()
            .try_get_matches_from(["tabula", "users", "-f", "u.json", "--config", "t.toml"])
            .expect("valid arguments");
        assert_eq!(config_path(&matches), Some(PathBuf::from("t.toml")));
    }
}
