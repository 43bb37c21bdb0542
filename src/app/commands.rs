use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

use crate::domain::UserRole;

fn role_help() -> String {
    let roles: Vec<&str> = UserRole::ALL.iter().map(|role| role.key()).collect();
    format!("Only show this role: all, {}", roles.join(", "))
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("tabula")
        .about("Filter, sort and page tabular records in the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the TOML config file")
                .env("TABULA_CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(users())
}

fn users() -> Command {
    Command::new("users")
        .about("List users from a JSON file")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("JSON file holding a user array or a { data: [...] } page")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .help("Search text matched against name and email"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help(role_help())
                .default_value("all"),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("Only show this status: all, active or inactive")
                .default_value("all"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .help("Sort column with optional direction, e.g. name or created:desc"),
        )
        .arg(
            Arg::new("page")
                .short('p')
                .long("page")
                .help("1-based page number")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .help("Rows per page")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("inactive")
                .long("inactive")
                .help("Only list deactivated accounts")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        new().debug_assert();
    }

    #[test]
    fn parses_users_subcommand() {
        let matches = new()
            .try_get_matches_from([
                "tabula", "users", "--file", "users.json", "--sort", "name:desc", "--limit", "20",
                "--inactive",
            ])
            .expect("valid arguments");

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "users");
        assert_eq!(sub.get_one::<PathBuf>("file"), Some(&PathBuf::from("users.json")));
        assert_eq!(sub.get_one::<usize>("limit"), Some(&20));
        assert_eq!(sub.get_one::<String>("role").map(String::as_str), Some("all"));
        assert!(sub.get_flag("inactive"));
    }

    #[test]
    fn role_help_lists_every_role() {
        assert_eq!(role_help(), "Only show this role: all, admin, member, guest");
        for role in UserRole::ALL {
            let matches = new()
                .try_get_matches_from(["tabula", "users", "-f", "u.json", "--role", role.key()])
                .expect("valid arguments");
            let (_, sub) = matches.subcommand().expect("subcommand");
            let value = sub.get_one::<String>("role").expect("role");
            assert_eq!(value.parse::<UserRole>().expect("known role"), role);
        }
    }

    #[test]
    fn file_is_required() {
        assert!(new().try_get_matches_from(["tabula", "users"]).is_err());
    }
}
