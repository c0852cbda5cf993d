use clap::{CommandFactory, Parser};
use fsaccess::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["fsaccess", "read"],
        vec!["fsaccess", "read", "--dir", "./resources", "--format", "json"],
        vec!["fsaccess", "show"],
        vec!["fsaccess", "show", "--bucket", "json-files"],
        vec!["fsaccess", "show", "--bucket", "js-files", "--id", "f1"],
        vec!["fsaccess", "status", "--format", "json"],
        vec!["fsaccess", "watch", "--dir", "./resources", "--debounce-ms", "50"],
        vec!["fsaccess", "init", "--force"],
        vec![
            "fsaccess",
            "--workspace",
            "/tmp/ws",
            "--store",
            "/tmp/ws/store",
            "--log-format",
            "json",
            "status",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_id_without_bucket() {
    let result = Cli::try_parse_from(["fsaccess", "show", "--id", "f1"]);
    assert!(result.is_err());
}

#[test]
fn parse_rejects_watch_without_dir() {
    let result = Cli::try_parse_from(["fsaccess", "watch"]);
    assert!(result.is_err());
}

#[test]
fn read_defaults_to_prompt_and_text() {
    let cli = Cli::try_parse_from(["fsaccess", "read"]).unwrap();
    match cli.command {
        Commands::Read { dir, format } => {
            assert!(dir.is_none());
            assert_eq!(format, "text");
        }
        _ => panic!("expected read command"),
    }
}

#[test]
fn help_lists_every_subcommand() {
    let help = Cli::command().render_long_help().to_string();
    for name in ["read", "show", "status", "watch", "init"] {
        assert!(help.contains(name), "help is missing `{name}`");
    }
}
