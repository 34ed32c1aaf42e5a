use gridclash::api::{parse_battle_json, run_battle};
use gridclash::{auto_place, Position, RosterUnit, Side};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::json;

fn ok_payload(value: serde_json::Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn err_payload(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn respond(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn read_input(env: &mut JNIEnv, json: &JString) -> Result<String, String> {
    env.get_string(json)
        .map(Into::into)
        .map_err(|e| format!("invalid_input: {}", e))
}

#[no_mangle]
pub extern "system" fn Java_com_gridclash_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    respond(&env, "gridclash-ffi 0.1.0".to_string())
}

/// Battle JSON in, `{"ok":true,"result":<CombatReport>}` out.
#[no_mangle]
pub extern "system" fn Java_com_gridclash_Ffi_simulateJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_json_internal(&input),
        Err(e) => err_payload(e),
    };
    respond(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_gridclash_Ffi_autoPlaceJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => auto_place_json_internal(&input),
        Err(e) => err_payload(e),
    };
    respond(&env, payload)
}

#[derive(Deserialize)]
struct AutoPlaceRequest {
    roster: Vec<RosterUnit>,
    side: Side,
    #[serde(default)]
    board: gridclash::Board,
    #[serde(default)]
    taken: Vec<Position>,
    #[serde(default)]
    seed: u64,
}

// Internal functions for testing without JNI overhead
pub fn simulate_json_internal(input: &str) -> String {
    let battle = match parse_battle_json(input) {
        Ok(b) => b,
        Err(e) => return err_payload(format!("invalid_config: {}", e)),
    };
    match run_battle(&battle).and_then(|r| Ok(serde_json::to_value(r)?)) {
        Ok(value) => ok_payload(value),
        Err(e) => err_payload(e),
    }
}

pub fn auto_place_json_internal(input: &str) -> String {
    let req: AutoPlaceRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return err_payload(format!("invalid_config: {}", e)),
    };
    if let Err(e) = req.board.validate() {
        return err_payload(e);
    }
    let entries = auto_place(&req.roster, req.side, &req.board, &req.taken, req.seed);
    match serde_json::to_value(entries) {
        Ok(value) => ok_payload(value),
        Err(e) => err_payload(e),
    }
}
