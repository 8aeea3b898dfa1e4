use super::*;

#[test]
fn parses_bare_crawl_command() {
    let cli = Cli::try_parse_from(["bookdex", "crawl"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            seed: None,
            max_pages: None,
            output: None,
            dry_run: false,
        })
    ));
}

#[test]
fn parses_crawl_with_overrides() {
    let cli = Cli::try_parse_from([
        "bookdex",
        "crawl",
        "--seed",
        "http://localhost:8080/index.html",
        "--max-pages",
        "2",
        "--output",
        "records.ndjson",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Crawl {
            seed,
            max_pages,
            output,
            dry_run,
        }) => {
            assert_eq!(seed.as_deref(), Some("http://localhost:8080/index.html"));
            assert_eq!(max_pages, Some(2));
            assert_eq!(output, Some(PathBuf::from("records.ndjson")));
            assert!(dry_run);
        }
        other => panic!("expected crawl command, got: {other:?}"),
    }
}

#[test]
fn rejects_non_numeric_max_pages() {
    assert!(Cli::try_parse_from(["bookdex", "crawl", "--max-pages", "two"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bookdex"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
