//! Declarative block-shape metadata for the editor UI.
//!
//! Pure configuration: labels, colours, field types and the option sets
//! each dropdown offers. The editor renders these verbatim; nothing
//! here executes. The voice-command block's cascading selectors are
//! derived from the catalog through gesto-core so the UI and the
//! compiler always agree on the option sets.

use serde::{Deserialize, Serialize};

use gesto_core::{build_chain, Catalog, Selection};

/// A gesture the connected wearable model can recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureDef {
    pub gesture: String,
    pub label: String,
}

/// [label, value] pairs for the keyboard modifier dropdown.
fn mod_keys() -> Vec<[String; 2]> {
    [
        ("<ctrl>+", "ctrl"),
        ("<shift>+", "shift"),
        ("<alt>+", "alt"),
        ("<ctrl>+<alt>+", "ctrl+alt"),
        ("<ctrl>+<shift>+", "ctrl+shift"),
    ]
    .iter()
    .map(|(value, label)| [label.to_string(), value.to_string()])
    .collect()
}

/// [label, value] pairs for the function-key dropdown.
fn func_keys() -> Vec<[String; 2]> {
    let mut keys: Vec<[String; 2]> = [
        ("Left arrow", "<left>"),
        ("Right arrow", "<right>"),
        ("Up arrow", "<up>"),
        ("Down arrow", "<down>"),
        ("Del", "<delete>"),
        ("Esc", "<esc>"),
        ("Enter", "<enter>"),
    ]
    .iter()
    .map(|(label, value)| [label.to_string(), value.to_string()])
    .collect();
    for k in 1..=12 {
        keys.push([format!("f{}", k), format!("<f{}>", k)]);
    }
    keys
}

fn taps() -> Vec<[String; 2]> {
    ["SINGLE_TAP", "TAP_AND_HOLD", "TWO_FINGER_TAP"]
        .iter()
        .map(|name| [name.replace('_', " "), name.to_string()])
        .collect()
}

fn severities() -> Vec<[String; 2]> {
    [("DEBUG", "0"), ("INFO", "1"), ("WARNING", "2"), ("ERROR", "3")]
        .iter()
        .map(|(name, value)| [name.to_string(), value.to_string()])
        .collect()
}

/// The full option-set registry served to the editor.
///
/// `voice_commands` carries the flattened catalog and `speech_fields`
/// the selector chain for the given selection prefix, so the editor can
/// rebuild the cascade after every change without re-deriving options
/// itself.
pub fn registry(
    gestures: &[GestureDef],
    catalog: &Catalog,
    selections: &[Selection],
) -> serde_json::Value {
    let chain = build_chain(catalog, selections);
    serde_json::json!({
        "modKeys": mod_keys(),
        "funcKeys": func_keys(),
        "gestures": gestures,
        "taps": taps(),
        "wristOptions": [["Horizontal", "HORIZONTAL"], ["Vertical", "VERTICAL"]],
        "gripperOptions": [["Open", "OPEN"], ["Close", "CLOSE"]],
        "severity": severities(),
        "voiceCommands": catalog.to_json(),
        "speechFields": chain,
    })
}

/// Block-shape definitions: one entry per custom block, in the editor's
/// `jsonInit` format.
pub fn block_defs() -> serde_json::Value {
    serde_json::json!([
        {
            "type": "main_function",
            "message0": "Main %1",
            "args0": [ { "type": "field_input", "name": "NAME", "text": "app", "editable": false } ],
            "message1": "do %1",
            "args1": [ { "type": "input_statement", "name": "BODY" } ],
            "colour": 230,
            "tooltip": "Main function"
        },
        {
            "type": "debug",
            "message0": "Debug %1",
            "args0": [ { "type": "input_value", "name": "TEXT", "check": "String" } ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#bce261",
            "tooltip": "Send a message to the terminal"
        },
        {
            "type": "gesture_list",
            "message0": "%1 gesture",
            "args0": [ { "type": "field_dropdown", "name": "gesture", "options": "@gestures" } ],
            "output": "Boolean",
            "colour": "#EB6152",
            "tooltip": "Gesture recognized by the wearable"
        },
        {
            "type": "touch_list",
            "message0": "%1",
            "args0": [ { "type": "field_dropdown", "name": "touch", "options": "@taps" } ],
            "output": "Boolean",
            "colour": "#EB6152",
            "tooltip": "Touchpad gesture"
        },
        {
            "type": "take_angle",
            "message0": "take %1 angle",
            "args0": [ { "type": "field_dropdown", "name": "angle",
                         "options": [["Roll", "roll"], ["Pitch", "pitch"], ["Yaw", "yaw"]] } ],
            "output": "Number",
            "colour": "#EB6152",
            "tooltip": "Wearable rotation angle"
        },
        {
            "type": "take_gyro",
            "message0": "take %1 gyro",
            "args0": [ { "type": "field_dropdown", "name": "gyro",
                         "options": [["x-axis", "x"], ["y-axis", "y"], ["z-axis", "z"]] } ],
            "output": "Number",
            "colour": "#EB6152",
            "tooltip": "Wearable gyroscopic axis"
        },
        {
            "type": "listen",
            "message0": "Voice command: %1",
            "args0": [ { "type": "field_chain", "name": "FIELDS", "source": "@speechFields" } ],
            "output": "List",
            "colour": "#EB6152",
            "tooltip": "Listen for a voice command"
        },
        {
            "type": "record",
            "message0": "Record on %1 for %2 seconds",
            "args0": [
                { "type": "input_value", "name": "filename", "check": "String" },
                { "type": "input_value", "name": "seconds", "check": "Number" }
            ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#EB6152",
            "tooltip": "Record audio"
        },
        {
            "type": "play",
            "message0": "Play file audio %1",
            "args0": [ { "type": "input_value", "name": "filename", "check": "String" } ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#EB6152",
            "tooltip": "Play an audio file"
        },
        {
            "type": "keyboard_press",
            "message0": "Press %1",
            "args0": [ { "type": "input_value", "name": "NAME", "check": "KeyboardShortcut" } ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#c2c2c2",
            "tooltip": "Press a key on the keyboard"
        },
        {
            "type": "keyboard_key",
            "message0": "Key: %1",
            "args0": [ { "type": "field_input", "name": "LETTER", "text": "a" } ],
            "output": "KeyboardShortcut",
            "colour": "#c2c2c2",
            "tooltip": "A single keyboard letter"
        },
        {
            "type": "keyboard_funckey",
            "message0": "Fn Key: %1",
            "args0": [ { "type": "field_dropdown", "name": "function_key", "options": "@funcKeys" } ],
            "output": "KeyboardShortcut",
            "colour": "#c2c2c2",
            "tooltip": "A single function key"
        },
        {
            "type": "keyboard_mod_plus_key",
            "message0": "Mod Key %1 + Key %2",
            "args0": [
                { "type": "field_dropdown", "name": "mod_key", "options": "@modKeys" },
                { "type": "field_input", "name": "LETTER", "text": "a" }
            ],
            "output": "KeyboardShortcut",
            "colour": "#c2c2c2",
            "tooltip": "A modifier key plus a letter"
        },
        {
            "type": "braccio_move",
            "message0": "Move (x: %1, y: %2, z: %3)",
            "args0": [
                { "type": "input_value", "name": "x", "check": "Number" },
                { "type": "input_value", "name": "y", "check": "Number" },
                { "type": "input_value", "name": "z", "check": "Number" }
            ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#cb6434",
            "tooltip": "Move the arm to the given coordinates"
        },
        {
            "type": "braccio_wrist",
            "message0": "Wrist %1",
            "args0": [ { "type": "field_dropdown", "name": "wrist", "options": "@wristOptions" } ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#cb6434",
            "tooltip": "Move the arm wrist"
        },
        {
            "type": "braccio_gripper",
            "message0": "Gripper %1",
            "args0": [ { "type": "field_dropdown", "name": "gripper", "options": "@gripperOptions" } ],
            "previousStatement": null,
            "nextStatement": null,
            "colour": "#cb6434",
            "tooltip": "Open or close the arm gripper"
        },
        {
            "type": "get_dict_property",
            "message0": "In dictionary %1 Get value for key %2",
            "args0": [
                { "type": "input_value", "name": "DICT", "check": "Dictionary" },
                { "type": "input_value", "name": "KEY", "check": "String" }
            ],
            "output": null,
            "colour": "#000500",
            "tooltip": "Get the value for a key in a dictionary",
            "inputsInline": true
        },
        {
            "type": "send_get_request",
            "message0": "Send Get Request to %1 %2",
            "args0": [
                { "type": "input_dummy" },
                { "type": "input_value", "name": "URL", "check": "String" }
            ],
            "output": "Dictionary",
            "colour": "#6665DD",
            "tooltip": "Send GET request and return the response",
            "inputsInline": true
        },
        {
            "type": "send_post_request",
            "message0": "Send Post Request to %1 URL %2 Body %3",
            "args0": [
                { "type": "input_dummy" },
                { "type": "input_value", "name": "URL", "check": "String" },
                { "type": "input_value", "name": "BODY", "check": "String" }
            ],
            "output": "String",
            "colour": "#6665DD",
            "tooltip": "Send POST request and return the response"
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesto_core::{CommandBranch, CommandTree};

    fn catalog() -> Catalog {
        Catalog::from_tree(&CommandTree {
            branches: vec![CommandBranch {
                word: "on".to_string(),
                children: Some(CommandTree {
                    branches: vec![CommandBranch {
                        word: "light".to_string(),
                        children: None,
                    }],
                }),
            }],
        })
    }

    #[test]
    fn registry_includes_option_sets_and_chain() {
        let gestures = vec![GestureDef {
            gesture: "up".to_string(),
            label: "Up".to_string(),
        }];
        let value = registry(&gestures, &catalog(), &[]);

        assert_eq!(value["gestures"][0]["gesture"], "up");
        assert_eq!(value["wristOptions"][0][1], "HORIZONTAL");
        assert_eq!(value["speechFields"][0]["name"], "FIELD_0");
        // Wildcard leads the selector's options.
        assert_eq!(value["speechFields"][0]["options"][0]["value"], "---");
        assert!(value["voiceCommands"]["levels"].is_array());
    }

    #[test]
    fn registry_chain_follows_selection() {
        let value = registry(
            &[],
            &catalog(),
            &[Selection::Token("on".to_string())],
        );
        let fields = value["speechFields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["options"][1]["value"], "light");
    }

    #[test]
    fn func_keys_cover_twelve_function_keys() {
        let value = block_defs();
        assert!(value.as_array().unwrap().len() >= 15);
        assert_eq!(func_keys().len(), 7 + 12);
    }
}
