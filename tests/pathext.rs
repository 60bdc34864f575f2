use autorun::exec::pathext::LIST_SEPARATOR;
use autorun::exec::RunnableExtensions;

fn host_list(items: &[&str]) -> String {
    items.join(LIST_SEPARATOR.to_string().as_str())
}

#[test]
fn normalizes_and_filters_host_extensions() {
    let excluded = vec!["py".to_string(), "PYW".to_string(), ".pyc".to_string()];
    let runnable = RunnableExtensions::from_list(
        &host_list(&[".COM", ".EXE", ".PY", ".pyw", "BAT", ""]),
        &excluded,
    );

    assert_eq!(runnable.iter().collect::<Vec<_>>(), vec!["com", "exe", "bat"]);
    assert!(runnable.contains("exe"));
    assert!(!runnable.contains("py"));
    assert!(!runnable.contains(""));
}

#[test]
fn excluding_everything_leaves_an_empty_set() {
    let excluded = vec!["cmd".to_string(), "bat".to_string()];
    let runnable = RunnableExtensions::from_tokens(["cmd", "bat", "cmd"], &excluded);

    assert_eq!(runnable.iter().count(), 0);
    assert_eq!(runnable.to_env_value(), "");
}

#[test]
fn env_value_uses_dotted_entries_and_host_separator() {
    let runnable = RunnableExtensions::from_tokens([".BAT", "exe", ".Bat"], &[]);

    assert_eq!(runnable.to_env_value(), host_list(&[".bat", ".exe"]));
}
