//! End-to-end tests for the `soundboard` binary.

mod fixtures;

use fixtures::*;
use serde_json::Value;

fn list_json(env: &CliEnv, extra: &[&str]) -> Value {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let stdout = env.run_ok(&args);
    serde_json::from_str(&stdout).expect("list output should be JSON")
}

fn add_sound(env: &CliEnv, file_name: &str, extra: &[&str]) {
    let audio = write_audio_file(env.path(), file_name);
    let audio = audio.to_str().unwrap();
    let mut args = vec!["add", "--file", audio];
    args.extend_from_slice(extra);
    env.run_ok(&args);
}

// ============================================================================
// Buttons
// ============================================================================

#[test]
fn test_list_empty_board() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["list"]);
    assert!(stdout.contains("No buttons"));

    let json = list_json(&env, &[]);
    assert_eq!(json["count"], 0);
}

#[test]
fn test_add_names_button_after_file() {
    let env = CliEnv::new();
    add_sound(&env, "air horn.wav", &["--color", "#00BCD4"]);

    let json = list_json(&env, &[]);
    assert_eq!(json["count"], 1);
    let button = &json["buttons"][0];
    assert_eq!(button["index"], 1);
    assert_eq!(button["name"], "air horn");
    assert_eq!(button["color"], "#00BCD4");
    assert!(button["shortcut"].is_null());
    assert!(env.default_store_dir().join("soundboardSession.json").exists());
}

#[test]
fn test_add_rejects_non_audio_file() {
    let env = CliEnv::new();
    let path = write_session_file(env.path(), "notes.txt", "hello");

    let output = env.run(&["add", "--file", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(list_json(&env, &[])["count"], 0);
}

#[test]
fn test_add_with_reserved_shortcut_fails() {
    let env = CliEnv::new();
    let audio = write_audio_file(env.path(), "beep.wav");

    let output = env.run(&["add", "--file", audio.to_str().unwrap(), "--shortcut", "Tab"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("reserved"));
    // rejected before anything is written
    assert!(!env.default_store_dir().join("soundboardSession.json").exists());
    assert_eq!(list_json(&env, &[])["count"], 0);
}

#[test]
fn test_add_with_shortcut() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &["--shortcut", "b"]);

    assert_eq!(list_json(&env, &[])["buttons"][0]["shortcut"], "b");
}

#[test]
fn test_import_replaces_existing_board() {
    let env = CliEnv::new();
    add_sound(&env, "old one.wav", &["--shortcut", "o"]);
    add_sound(&env, "old two.wav", &["--shortcut", "t"]);
    let file = write_session_file(
        env.path(),
        "other.soundboard",
        r#"{ "buttons": [ { "name": "New", "shortcut": "n", "audio": "data:audio/wav;base64,AA==" } ] }"#,
    );

    env.run_ok(&["import", file.to_str().unwrap()]);

    let json = list_json(&env, &[]);
    assert_eq!(json["count"], 1);
    assert_eq!(json["buttons"][0]["name"], "New");
    assert_eq!(json["buttons"][0]["shortcut"], "n");
}

#[test]
fn test_rename_and_blank_name() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &[]);

    env.run_ok(&["rename", "1", "Air Horn"]);
    assert_eq!(list_json(&env, &[])["buttons"][0]["name"], "Air Horn");

    let output = env.run(&["rename", "1", "   "]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(list_json(&env, &[])["buttons"][0]["name"], "Air Horn");
}

#[test]
fn test_unknown_index_is_validation_error() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &[]);

    for args in [["rename", "2", "x"], ["rename", "0", "x"]] {
        let output = env.run(&args);
        assert_eq!(output.status.code(), Some(1));
    }
}

#[test]
fn test_bind_moves_shortcut_between_buttons() {
    let env = CliEnv::new();
    add_sound(&env, "one.wav", &[]);
    add_sound(&env, "two.wav", &[]);

    env.run_ok(&["bind", "1", "k"]);
    let stdout = env.run_ok(&["bind", "2", "k"]);
    assert!(stdout.contains("removed from button 1"));

    let json = list_json(&env, &[]);
    assert!(json["buttons"][0]["shortcut"].is_null());
    assert_eq!(json["buttons"][1]["shortcut"], "k");

    env.run_ok(&["unbind", "2"]);
    env.run_ok(&["unbind", "2"]);
    assert!(list_json(&env, &[])["buttons"][1]["shortcut"].is_null());
}

#[test]
fn test_bind_reserved_key_keeps_existing() {
    let env = CliEnv::new();
    add_sound(&env, "one.wav", &[]);
    add_sound(&env, "two.wav", &[]);
    env.run_ok(&["bind", "1", "a"]);

    let output = env.run(&["bind", "2", "Shift"]);

    assert_eq!(output.status.code(), Some(1));
    let json = list_json(&env, &[]);
    assert_eq!(json["buttons"][0]["shortcut"], "a");
    assert!(json["buttons"][1]["shortcut"].is_null());
}

#[test]
fn test_move_clamps_to_board() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &["--left", "50", "--top", "50"]);

    let stdout = env.run_ok(&["move", "1", "9999", "9999"]);
    assert!(stdout.contains("736px"));

    let button = &list_json(&env, &[])["buttons"][0];
    assert_eq!(button["left"].as_f64(), Some(736.0));
    assert_eq!(button["top"].as_f64(), Some(536.0));

    env.run_ok(&["move", "1", "-40", "-40"]);
    let button = &list_json(&env, &[])["buttons"][0];
    assert_eq!(button["left"].as_f64(), Some(0.0));
    assert_eq!(button["top"].as_f64(), Some(0.0));
}

#[test]
fn test_move_snaps_unless_free() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &["--left", "0", "--top", "0"]);

    env.run_ok(&["move", "1", "13", "13"]);
    assert_eq!(list_json(&env, &[])["buttons"][0]["left"].as_f64(), Some(16.0));

    env.run_ok(&["move", "1", "13", "13", "--free"]);
    assert_eq!(list_json(&env, &[])["buttons"][0]["left"].as_f64(), Some(13.0));
}

#[test]
fn test_delete_button() {
    let env = CliEnv::new();
    add_sound(&env, "one.wav", &[]);
    add_sound(&env, "two.wav", &[]);

    env.run_ok(&["delete", "1"]);

    let json = list_json(&env, &[]);
    assert_eq!(json["count"], 1);
    assert_eq!(json["buttons"][0]["name"], "two");
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_export_reset_import() {
    let env = CliEnv::new();
    add_sound(&env, "air horn.wav", &["--shortcut", "h"]);

    env.run_ok(&["export"]);
    let exported = env.path().join("soundboard-session.soundboard");
    assert!(exported.exists());

    env.run_ok(&["reset"]);
    assert_eq!(list_json(&env, &[])["count"], 0);

    let stdout = env.run_ok(&["import", exported.to_str().unwrap()]);
    assert!(stdout.contains("Imported 1 buttons"));

    let json = list_json(&env, &[]);
    assert_eq!(json["buttons"][0]["name"], "air horn");
    assert_eq!(json["buttons"][0]["shortcut"], "h");
}

#[test]
fn test_export_to_named_file() {
    let env = CliEnv::new();
    add_sound(&env, "beep.wav", &[]);
    let output = env.path().join("backup.soundboard");

    env.run_ok(&["export", "--output", output.to_str().unwrap()]);

    let doc: Value = serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(doc["buttons"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_import_malformed_file_keeps_board() {
    let env = CliEnv::new();
    add_sound(&env, "keep.wav", &[]);
    let bad = write_session_file(env.path(), "bad.soundboard", "{ \"buttons\": 7 }");

    let output = env.run(&["import", bad.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(list_json(&env, &[])["buttons"][0]["name"], "keep");
}

#[test]
fn test_import_missing_file_is_io_error() {
    let env = CliEnv::new();
    let output = env.run(&["import", "does-not-exist.soundboard"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_store_dir_override() {
    let env = CliEnv::new();
    let store = env.path().join("elsewhere");
    let store_arg = store.to_str().unwrap();
    let audio = write_audio_file(env.path(), "beep.wav");

    env.run_ok(&["--store-dir", store_arg, "add", "--file", audio.to_str().unwrap()]);

    assert!(store.join("soundboardSession.json").exists());
    assert_eq!(list_json(&env, &[])["count"], 0);
    assert_eq!(list_json(&env, &["--store-dir", store_arg])["count"], 1);
}

// ============================================================================
// Palette and config
// ============================================================================

#[test]
fn test_palette_set_show_reset() {
    let env = CliEnv::new();

    let json: Value = serde_json::from_str(&env.run_ok(&["palette", "show", "--json"])).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(8));
    assert_eq!(json[7]["name"], "Teal");
    assert_eq!(json[7]["color"], "#009688");

    env.run_ok(&["palette", "set", "teal", "rgb(17, 34, 51)"]);
    let json: Value = serde_json::from_str(&env.run_ok(&["palette", "show", "--json"])).unwrap();
    assert_eq!(json[7]["color"], "#112233");

    let output = env.run(&["palette", "set", "Mauve", "#000000"]);
    assert_eq!(output.status.code(), Some(1));

    env.run_ok(&["palette", "reset"]);
    let json: Value = serde_json::from_str(&env.run_ok(&["palette", "show", "--json"])).unwrap();
    assert_eq!(json[7]["color"], "#009688");
}

#[test]
fn test_config_path_uses_override() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["config", "path"]);
    assert_eq!(
        stdout.trim(),
        env.config_dir().join("config.toml").to_str().unwrap()
    );
}

#[test]
fn test_config_show_json() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["config", "show", "--json"]);
    let json: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["board"]["width"].as_f64(), Some(800.0));
    assert_eq!(json["autosave"]["interval_ms"], 30000);
    assert_eq!(
        json["storage"]["dir"],
        env.default_store_dir().to_str().unwrap()
    );
}

#[test]
fn test_config_file_changes_board() {
    let env = CliEnv::new();
    std::fs::create_dir_all(env.config_dir()).unwrap();
    std::fs::write(
        env.config_dir().join("config.toml"),
        "[board]\nwidth = 400.0\nheight = 300.0\nbutton_width = 64.0\nbutton_height = 64.0\ngrid_size = 8.0\n",
    )
    .unwrap();
    add_sound(&env, "beep.wav", &["--left", "0", "--top", "0"]);

    env.run_ok(&["move", "1", "9999", "9999"]);

    let button = &list_json(&env, &[])["buttons"][0];
    assert_eq!(button["left"].as_f64(), Some(336.0));
    assert_eq!(button["top"].as_f64(), Some(236.0));
}

#[test]
fn test_invalid_config_is_validation_error() {
    let env = CliEnv::new();
    std::fs::create_dir_all(env.config_dir()).unwrap();
    std::fs::write(
        env.config_dir().join("config.toml"),
        "[autosave]\ninterval_ms = 0\n",
    )
    .unwrap();

    let output = env.run(&["list"]);
    assert_eq!(output.status.code(), Some(1));
}
