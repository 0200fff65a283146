//! Action-script emission.
//!
//! Turns an in-memory block program into the Python script the runner
//! executes: a fixed import prelude, the runtime helper shims, and an
//! `app(...)` entry function whose body is stitched together from
//! per-block snippets. Voice-command blocks compile their selection
//! against the catalog and embed the grammar literal; an empty grammar
//! emits a no-op listen rather than invalid code.

use serde::{Deserialize, Serialize};

use crate::python::{grammar_literal, py_str};
use crate::CodegenError;
use gesto_core::{compile, normalize, Catalog, CompileError};

const INDENT: &str = "    ";

// ──────────────────────────────────────────────
// Program structure
// ──────────────────────────────────────────────

/// A block program as the editor hands it to the generator. This is the
/// in-memory form, not the editor's saved-workspace format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptProgram {
    pub name: String,
    /// Workspace variable names, declared `global` in the entry function.
    #[serde(default)]
    pub variables: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A statement block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /// Send a message to the runner's terminal.
    Debug { text: Expr },
    /// Press (and release, in reverse order) a keyboard shortcut.
    KeyboardPress { shortcut: Expr },
    /// Move the robotic arm to the given coordinates.
    BraccioMove { x: Expr, y: Expr, z: Expr },
    BraccioWrist { wrist: WristPosition },
    BraccioGripper { gripper: GripperState },
    /// Record audio to a file for a number of seconds.
    Record { filename: Expr, seconds: Expr },
    /// Play an audio file.
    Play { filename: Expr },
    SetVar { name: String, value: Expr },
    If { condition: Expr, then: Vec<Stmt> },
}

/// A value block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Str { value: String },
    Num { value: f64 },
    Bool { value: bool },
    Var { name: String },
    /// True when the wearable reported the given gesture.
    Gesture { gesture: String },
    /// True when the touchpad reported the given tap gesture.
    Touch { touch: String },
    /// Current rotation angle on one axis.
    Angle { axis: AngleAxis },
    /// Current gyroscope reading on one axis.
    Gyro { axis: GyroAxis },
    /// Listen for a voice command; evaluates to the matched path.
    Listen { fields: Vec<String> },
    Key { key: KeySpec },
    DictGet { dict: Box<Expr>, key: Box<Expr> },
    GetRequest { url: Box<Expr> },
    PostRequest { url: Box<Expr>, body: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleAxis {
    Roll,
    Pitch,
    Yaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GyroAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WristPosition {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GripperState {
    Open,
    Close,
}

/// A keyboard shortcut block, rendered as a `HotKey.parse`-able string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeySpec {
    /// A single letter or digit.
    Letter { letter: String },
    /// A function key such as `<f5>` or `<enter>`.
    FuncKey { key: String },
    /// Modifier prefixes (e.g. `<ctrl>+`) followed by a letter.
    ModLetter { mods: Vec<String>, letter: String },
    /// Modifier prefixes followed by a function key.
    ModFuncKey { mods: Vec<String>, key: String },
}

// ──────────────────────────────────────────────
// Fixed script sections
// ──────────────────────────────────────────────

const PRELUDE: &str = r#"import time
import requests
from datetime import datetime
from gesto_runner.shapes import ScriptPostAction, LoggingQueue
from gesto_runner.braccio import BraccioInterface, CommandStatus, Wrist, Gripper
from gesto_runner.tskin import TSkin, Gesture, Touch, OneFingerGesture, TwoFingerGesture, HotWord, TSpeechObject, TSpeech
from pynput.keyboard import Controller as KeyboardController, HotKey, KeyCode
from typing import List, Optional, Union
"#;

const HELPERS: &str = r#"
def send_get_request(url: str):
    if not url:
        return "Please enter a valid URL"

    try:
        response = requests.get(url, timeout=10)
        response.raise_for_status()

        content_type = response.headers.get("Content-Type", "").lower()

        if "application/json" in content_type:
            return response.json()
        else:
            return {
                "text": response.text
            }

    except requests.exceptions.RequestException as e:
        return f"An error occurred: {e}"
    except ValueError as e:
        return f"Invalid JSON response: {e}"

def send_post_request(url: str, body: str):
    if not url:
        return "Please enter a valid URL"

    try:
        response = requests.post(url, json=body, timeout=10)
        response.raise_for_status()

        content_type = response.headers.get("Content-Type", "").lower()

        if "application/json" in content_type:
            return response.json()
        else:
            return {
                "text": response.text
            }

    except requests.exceptions.RequestException as e:
        return f"An error occurred: {e}"
    except ValueError as e:
        return f"Invalid JSON response: {e}"

def check_gesture(gesture: Optional[Gesture], gesture_to_find: str) -> bool:
    if not gesture:
        return False

    return gesture.gesture == gesture_to_find

def check_touch(touch: Optional[Touch], finger_gesture: str, actions: List[ScriptPostAction]) -> bool:
    if not touch:
        return False
    try:
        if touch.one_finger == OneFingerGesture[finger_gesture]:
            return True
    except KeyError:
        pass
    try:
        if touch.two_finger == TwoFingerGesture[finger_gesture]:
            return True
    except KeyError:
        pass
    return False

def check_speech(tskin: TSkin, logging_queue: LoggingQueue, tspeech: Optional[TSpeechObject]):
    if tspeech and tskin.can_listen:
        debug(logging_queue, "Waiting for command...")
        r = tskin.listen(tspeech)
        if r:
            debug(logging_queue, "Listening...")
            text_so_far = ""
            t = None
            while True:
                t = tskin.transcription

                if t:
                    break

                if text_so_far != tskin.text_so_far:
                    text_so_far = tskin.text_so_far
                    debug(logging_queue, f"Listening: {text_so_far}")
                time.sleep(tskin.TICK)

            if t and t.path is not None:
                debug(logging_queue, f"Command found: {[hw.word for hw in t.path]}")
                return [hw.word for hw in t.path]

    debug(logging_queue, "Cannot listen...")
    return []

def record_audio(tskin: TSkin, filename: str, seconds: float):
    tskin.record(filename, seconds)

    while tskin.is_recording:
        time.sleep(tskin.TICK)

def keyboard_press(keyboard: KeyboardController, commands: List[KeyCode]):
    for k in commands:
        _k = k.char if isinstance(k, KeyCode) and k.char else k
        keyboard.press(_k)
    for k in commands[::-1]:
        _k = k.char if isinstance(k, KeyCode) and k.char else k
        keyboard.release(_k)

def braccio_move(braccio: Optional[BraccioInterface], logging_queue: LoggingQueue, x: float, y: float, z: float):
    if braccio:
        res = braccio.move(x, y, z)
        if res:
            if res[0]:
                debug(logging_queue, f"Braccio command executed in {round(res[2], 2)}s.")
            else:
                debug(logging_queue, f"Braccio command error: {res[1].name}")
        else:
            debug(logging_queue, "Braccio not connected")
    else:
        debug(logging_queue, "Braccio not configured")

def braccio_wrist(braccio: Optional[BraccioInterface], logging_queue: LoggingQueue, wrist: Wrist):
    if braccio:
        res = braccio.wrist(wrist)
        if res:
            if res[0]:
                debug(logging_queue, f"Braccio command executed in {round(res[2], 2)}s.")
            else:
                debug(logging_queue, f"Braccio command error: {res[1].name}")
        else:
            debug(logging_queue, "Braccio not connected")
    else:
        debug(logging_queue, "Braccio not configured")

def braccio_gripper(braccio: Optional[BraccioInterface], logging_queue: LoggingQueue, gripper: Gripper):
    if braccio:
        res = braccio.gripper(gripper)
        if res:
            if res[0]:
                debug(logging_queue, f"Braccio command executed in {round(res[2], 2)}s.")
            else:
                debug(logging_queue, f"Braccio command error: {res[1].name}")
        else:
            debug(logging_queue, "Braccio not connected")
    else:
        debug(logging_queue, "Braccio not configured")

def debug(logging_queue: LoggingQueue, msg: str):
    logging_queue.debug(str(msg))

# This is the main function that runs your code. Any
# code blocks you add to this section will be executed.
"#;

// ──────────────────────────────────────────────
// Emission
// ──────────────────────────────────────────────

/// Emit the full Python action script for a block program.
pub fn generate_script(
    program: &ScriptProgram,
    catalog: &Catalog,
) -> Result<String, CodegenError> {
    let mut out = format!("# {} -- generated action script\n\n", program.name);
    out.push_str(PRELUDE);
    out.push_str(HELPERS);

    out.push_str(
        "def app(tskin: TSkin, keyboard: KeyboardController, braccio: Optional[BraccioInterface], \
         actions: List[ScriptPostAction], logging_queue: LoggingQueue):\n",
    );
    for variable in &program.variables {
        check_identifier(variable)?;
        out.push_str(INDENT);
        out.push_str("global ");
        out.push_str(variable);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(INDENT);
    out.push_str("gesture = tskin.gesture\n");
    out.push_str(INDENT);
    out.push_str("touch = tskin.touch\n");

    if program.body.is_empty() {
        out.push_str(INDENT);
        out.push_str("pass\n");
    } else {
        emit_block(&mut out, &program.body, catalog, 1)?;
    }

    Ok(out)
}

fn emit_block(
    out: &mut String,
    statements: &[Stmt],
    catalog: &Catalog,
    level: usize,
) -> Result<(), CodegenError> {
    for statement in statements {
        emit_stmt(out, statement, catalog, level)?;
    }
    Ok(())
}

fn emit_stmt(
    out: &mut String,
    statement: &Stmt,
    catalog: &Catalog,
    level: usize,
) -> Result<(), CodegenError> {
    let pad = INDENT.repeat(level);
    match statement {
        Stmt::Debug { text } => {
            let text = emit_expr(text, catalog)?;
            out.push_str(&format!("{}debug(logging_queue, {})\n", pad, text));
        }
        Stmt::KeyboardPress { shortcut } => {
            let shortcut = emit_expr(shortcut, catalog)?;
            out.push_str(&format!(
                "{}keyboard_press(keyboard, HotKey.parse({}))\n",
                pad, shortcut
            ));
        }
        Stmt::BraccioMove { x, y, z } => {
            let (x, y, z) = (
                emit_expr(x, catalog)?,
                emit_expr(y, catalog)?,
                emit_expr(z, catalog)?,
            );
            out.push_str(&format!(
                "{}braccio_move(braccio, logging_queue, {}, {}, {})\n",
                pad, x, y, z
            ));
        }
        Stmt::BraccioWrist { wrist } => {
            let name = match wrist {
                WristPosition::Horizontal => "HORIZONTAL",
                WristPosition::Vertical => "VERTICAL",
            };
            out.push_str(&format!(
                "{}braccio_wrist(braccio, logging_queue, Wrist['{}'])\n",
                pad, name
            ));
        }
        Stmt::BraccioGripper { gripper } => {
            let name = match gripper {
                GripperState::Open => "OPEN",
                GripperState::Close => "CLOSE",
            };
            out.push_str(&format!(
                "{}braccio_gripper(braccio, logging_queue, Gripper['{}'])\n",
                pad, name
            ));
        }
        Stmt::Record { filename, seconds } => {
            let (filename, seconds) = (emit_expr(filename, catalog)?, emit_expr(seconds, catalog)?);
            out.push_str(&format!(
                "{}record_audio(tskin, {}, {})\n",
                pad, filename, seconds
            ));
        }
        Stmt::Play { filename } => {
            let filename = emit_expr(filename, catalog)?;
            out.push_str(&format!("{}tskin.play({})\n", pad, filename));
        }
        Stmt::SetVar { name, value } => {
            check_identifier(name)?;
            let value = emit_expr(value, catalog)?;
            out.push_str(&format!("{}{} = {}\n", pad, name, value));
        }
        Stmt::If { condition, then } => {
            let condition = emit_expr(condition, catalog)?;
            out.push_str(&format!("{}if {}:\n", pad, condition));
            if then.is_empty() {
                out.push_str(&format!("{}{}pass\n", pad, INDENT));
            } else {
                emit_block(out, then, catalog, level + 1)?;
            }
        }
    }
    Ok(())
}

fn emit_expr(expr: &Expr, catalog: &Catalog) -> Result<String, CodegenError> {
    Ok(match expr {
        Expr::Str { value } => py_str(value),
        Expr::Num { value } => {
            if value.fract() == 0.0 {
                format!("{}", *value as i64)
            } else {
                format!("{}", value)
            }
        }
        Expr::Bool { value } => (if *value { "True" } else { "False" }).to_string(),
        Expr::Var { name } => {
            check_identifier(name)?;
            name.clone()
        }
        Expr::Gesture { gesture } => {
            format!("check_gesture(gesture, {})", py_str(gesture))
        }
        Expr::Touch { touch } => {
            format!("check_touch(touch, {}, actions)", py_str(touch))
        }
        Expr::Angle { axis } => {
            let axis = match axis {
                AngleAxis::Roll => "roll",
                AngleAxis::Pitch => "pitch",
                AngleAxis::Yaw => "yaw",
            };
            format!("tskin.angle and tskin.angle.{}", axis)
        }
        Expr::Gyro { axis } => {
            let axis = match axis {
                GyroAxis::X => "x",
                GyroAxis::Y => "y",
                GyroAxis::Z => "z",
            };
            format!("tskin.gyro and tskin.gyro.{}", axis)
        }
        Expr::Listen { fields } => {
            let selections = normalize(fields);
            match compile(&selections, catalog) {
                Ok(grammar) => format!(
                    "check_speech(tskin, logging_queue, {})",
                    grammar_literal(&grammar)
                ),
                // Nothing configured: the script must not listen on an
                // empty grammar, so the block evaluates to no match.
                Err(CompileError::EmptyGrammar) => "[]".to_string(),
                Err(e) => return Err(e.into()),
            }
        }
        Expr::Key { key } => py_str(&render_key(key)?),
        Expr::DictGet { dict, key } => {
            format!(
                "{}.get({})",
                emit_expr(dict, catalog)?,
                emit_expr(key, catalog)?
            )
        }
        Expr::GetRequest { url } => {
            format!("send_get_request({})", emit_expr(url, catalog)?)
        }
        Expr::PostRequest { url, body } => {
            format!(
                "send_post_request({}, {})",
                emit_expr(url, catalog)?,
                emit_expr(body, catalog)?
            )
        }
    })
}

fn render_key(key: &KeySpec) -> Result<String, CodegenError> {
    match key {
        KeySpec::Letter { letter } => check_letter(letter),
        KeySpec::FuncKey { key } => Ok(key.clone()),
        KeySpec::ModLetter { mods, letter } => {
            Ok(format!("{}{}", mods.concat(), check_letter(letter)?))
        }
        KeySpec::ModFuncKey { mods, key } => Ok(format!("{}{}", mods.concat(), key)),
    }
}

/// A key letter must be a single alphanumeric character; it is lowered
/// for consistency.
fn check_letter(letter: &str) -> Result<String, CodegenError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c.to_ascii_lowercase().to_string()),
        _ => Err(CodegenError::InvalidProgram(format!(
            "key letter must be a single alphanumeric character, got '{}'",
            letter
        ))),
    }
}

fn check_identifier(name: &str) -> Result<(), CodegenError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CodegenError::InvalidProgram(format!(
            "'{}' is not a valid variable name",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesto_core::{CommandBranch, CommandTree};

    fn catalog() -> Catalog {
        Catalog::from_tree(&CommandTree {
            branches: vec![
                CommandBranch {
                    word: "on".to_string(),
                    children: Some(CommandTree {
                        branches: vec![
                            CommandBranch {
                                word: "light".to_string(),
                                children: None,
                            },
                            CommandBranch {
                                word: "fan".to_string(),
                                children: None,
                            },
                        ],
                    }),
                },
                CommandBranch {
                    word: "off".to_string(),
                    children: None,
                },
            ],
        })
    }

    fn str_expr(value: &str) -> Expr {
        Expr::Str {
            value: value.to_string(),
        }
    }

    #[test]
    fn empty_body_emits_pass() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("def app(tskin: TSkin"));
        assert!(script.contains("    pass\n"));
        assert!(script.starts_with("# app -- generated action script"));
        assert!(script.contains("import time"));
    }

    #[test]
    fn variables_become_globals() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec!["positions".to_string()],
            body: vec![Stmt::Debug {
                text: str_expr("hi"),
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("    global positions\n"));
        assert!(script.contains("    debug(logging_queue, 'hi')\n"));
    }

    #[test]
    fn invalid_variable_name_is_rejected() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec!["2bad".to_string()],
            body: vec![],
        };
        assert!(matches!(
            generate_script(&program, &catalog()),
            Err(CodegenError::InvalidProgram(_))
        ));
    }

    #[test]
    fn listen_block_embeds_grammar_literal() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::SetVar {
                name: "command".to_string(),
                value: Expr::Listen {
                    fields: vec!["on".to_string(), "---".to_string()],
                },
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains(
            "command = check_speech(tskin, logging_queue, \
             TSpeechObject([TSpeech(HotWord('on'), \
             TSpeechObject([TSpeech(HotWord('light'), None), TSpeech(HotWord('fan'), None)]))]))"
        ));
    }

    #[test]
    fn unconfigured_listen_emits_noop() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::SetVar {
                name: "command".to_string(),
                value: Expr::Listen { fields: vec![] },
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("command = []\n"));
    }

    #[test]
    fn inconsistent_listen_selection_is_an_error() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::Debug {
                text: Expr::Listen {
                    fields: vec!["heater".to_string()],
                },
            }],
        };
        assert!(matches!(
            generate_script(&program, &catalog()),
            Err(CodegenError::Grammar(CompileError::UnknownToken { .. }))
        ));
    }

    #[test]
    fn if_gesture_block_nests_body() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::If {
                condition: Expr::Gesture {
                    gesture: "up".to_string(),
                },
                then: vec![Stmt::BraccioWrist {
                    wrist: WristPosition::Horizontal,
                }],
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("    if check_gesture(gesture, 'up'):\n"));
        assert!(script
            .contains("        braccio_wrist(braccio, logging_queue, Wrist['HORIZONTAL'])\n"));
    }

    #[test]
    fn keyboard_shortcut_renders_hotkey_string() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::KeyboardPress {
                shortcut: Expr::Key {
                    key: KeySpec::ModLetter {
                        mods: vec!["<ctrl>+".to_string()],
                        letter: "C".to_string(),
                    },
                },
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("keyboard_press(keyboard, HotKey.parse('<ctrl>+c'))\n"));
    }

    #[test]
    fn bad_key_letter_is_rejected() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::KeyboardPress {
                shortcut: Expr::Key {
                    key: KeySpec::Letter {
                        letter: "ab".to_string(),
                    },
                },
            }],
        };
        assert!(matches!(
            generate_script(&program, &catalog()),
            Err(CodegenError::InvalidProgram(_))
        ));
    }

    #[test]
    fn http_and_dict_blocks_compose() {
        let program = ScriptProgram {
            name: "app".to_string(),
            variables: vec![],
            body: vec![Stmt::Debug {
                text: Expr::DictGet {
                    dict: Box::new(Expr::GetRequest {
                        url: Box::new(str_expr("http://localhost/api")),
                    }),
                    key: Box::new(str_expr("status")),
                },
            }],
        };
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(
            script.contains("debug(logging_queue, send_get_request('http://localhost/api').get('status'))\n")
        );
    }

    #[test]
    fn program_round_trips_through_json() {
        let program: ScriptProgram = serde_json::from_value(serde_json::json!({
            "name": "demo",
            "variables": ["count"],
            "body": [
                { "kind": "set_var", "name": "count", "value": { "kind": "num", "value": 0.0 } },
                { "kind": "if",
                  "condition": { "kind": "gesture", "gesture": "push" },
                  "then": [ { "kind": "debug", "text": { "kind": "str", "value": "pushed" } } ] }
            ]
        }))
        .unwrap();
        let script = generate_script(&program, &catalog()).unwrap();
        assert!(script.contains("count = 0\n"));
        assert!(script.contains("if check_gesture(gesture, 'push'):\n"));
    }
}
