use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_plain_prompt() {
    let text = "a responsive pricing card with three tiers";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_ignores_trailing_words() {
    let cmd = SlashCommand::parse("  /copy now  ").unwrap();
    assert!(cmd.is_copy());
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_quit() {
    let cmd = SlashCommand::parse("/quit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/new").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_short_new() {
    let cmd = SlashCommand::parse("/n").unwrap();
    assert!(cmd.is_new());
}
#[test]
fn it_is_new() {
    let cmd = SlashCommand::parse("/new").unwrap();
    assert!(cmd.is_new());
}
#[test]
fn it_is_reset() {
    let cmd = SlashCommand::parse("/reset").unwrap();
    assert!(cmd.is_new());
}

#[test]
fn it_is_short_copy() {
    let cmd = SlashCommand::parse("/c").unwrap();
    assert!(cmd.is_copy());
}
#[test]
fn it_is_copy() {
    let cmd = SlashCommand::parse("/copy").unwrap();
    assert!(cmd.is_copy());
}

#[test]
fn it_is_show() {
    let cmd = SlashCommand::parse("/show").unwrap();
    assert!(cmd.is_show());
}
#[test]
fn it_is_history() {
    let cmd = SlashCommand::parse("/history").unwrap();
    assert!(cmd.is_history());
    assert!(!cmd.is_help());
}
#[test]
fn it_is_preview() {
    let cmd = SlashCommand::parse("/p").unwrap();
    assert!(cmd.is_preview());
}

#[test]
fn it_is_short_help() {
    let cmd = SlashCommand::parse("/h").unwrap();
    assert!(cmd.is_help());
}
#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
}
